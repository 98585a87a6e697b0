//! Debounced gesture-to-input state machine.
//!
//! [`GestureSession`] consumes one [`FrameSnapshot`] per camera frame and
//! returns the input events that frame produces. All history (debounce
//! streaks, anchors, held keys, rising-edge flags) lives in the session, so a
//! scripted frame sequence replays to the same events every time.

use crate::{
    ActionEvent, Actions, CoreResult, FrameSnapshot, GestureLabel, GestureTuning, Key,
    LabeledHand, LandmarkPoint, Mode, MouseButton, ScrollDirection,
};

use tracing::{debug, info, instrument, trace};

/// Mode plus the data that only exists while that mode is active.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ModeState {
    Idle {
        /// Wrist position when the current open-palm streak began.
        palm_anchor: Option<LandmarkPoint>,
    },
    MouseControl {
        /// Index tip on the previous frame.
        cursor_anchor: Option<LandmarkPoint>,
        /// Smoothed delta in pixels.
        smoothed: (f32, f32),
        /// Sub-pixel movement not yet emitted.
        remainder: (f32, f32),
        /// Secondary hand showed an OK sign last frame.
        click_latched: bool,
    },
    AltTabHold {
        tab_latched: bool,
        confirm_latched: bool,
    },
    ScrollMode {
        /// Pinch midpoint on the previous frame.
        reference: Option<LandmarkPoint>,
        /// Upward travel not yet turned into ticks (normalized units).
        accumulated: f32,
        frames_since_tick: u32,
    },
}

impl ModeState {
    fn mode(&self) -> Mode {
        match self {
            ModeState::Idle { .. } => Mode::Idle,
            ModeState::MouseControl { .. } => Mode::MouseControl,
            ModeState::AltTabHold { .. } => Mode::AltTabHold,
            ModeState::ScrollMode { .. } => Mode::ScrollMode,
        }
    }

    fn idle() -> Self {
        ModeState::Idle { palm_anchor: None }
    }
}

/// Single-owner gesture state for the lifetime of the application.
///
/// # Key safety
///
/// Every key pressed through the session is tracked until released. When no
/// hand has been seen for `debounce_frames` frames, or [`shutdown`] is called,
/// the session emits a `KeyUp` for every key still held, newest first.
///
/// [`shutdown`]: GestureSession::shutdown
#[derive(Debug, Clone)]
pub struct GestureSession {
    tuning: GestureTuning,
    state: ModeState,
    candidate: GestureLabel,
    streak: u32,
    mismatch: u32,
    absent: u32,
    held: Vec<Key>,
    previous_tip: Option<LandmarkPoint>,
    navigation_cooldown: u32,
    navigation_latched: bool,
    frame: u64,
}

impl GestureSession {
    /// Create an idle session.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidTuning`](crate::GestureError::InvalidTuning)
    /// when any tuning value is out of range.
    #[track_caller]
    #[instrument(skip(tuning))]
    pub fn new(tuning: GestureTuning) -> CoreResult<Self> {
        tuning.validate()?;

        info!(
            debounce_frames = tuning.debounce_frames,
            scroll_interval_frames = tuning.scroll_interval_frames(),
            "GestureSession initialized"
        );

        Ok(Self {
            tuning,
            state: ModeState::idle(),
            candidate: GestureLabel::None,
            streak: 0,
            mismatch: 0,
            absent: 0,
            held: Vec::new(),
            previous_tip: None,
            navigation_cooldown: 0,
            navigation_latched: false,
            frame: 0,
        })
    }

    /// Tuning this session was built with.
    pub fn tuning(&self) -> &GestureTuning {
        &self.tuning
    }

    /// Currently active mode.
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// True while the task switcher holds Alt.
    pub fn is_alt_tab_active(&self) -> bool {
        self.mode() == Mode::AltTabHold
    }

    /// True while the index finger drives the cursor.
    pub fn is_mouse_control_active(&self) -> bool {
        self.mode() == Mode::MouseControl
    }

    /// Whether Alt is logically held.
    pub fn alt_held(&self) -> bool {
        self.held.contains(&Key::Alt)
    }

    /// Index-tip position deltas are measured from, while controlling the cursor.
    pub fn cursor_anchor(&self) -> Option<LandmarkPoint> {
        match self.state {
            ModeState::MouseControl { cursor_anchor, .. } => cursor_anchor,
            _ => None,
        }
    }

    /// Keys logically held down, oldest first.
    pub fn held_keys(&self) -> &[Key] {
        &self.held
    }

    /// Number of frames processed so far.
    pub fn frames_processed(&self) -> u64 {
        self.frame
    }

    /// Advance one frame and return the events it produces.
    #[instrument(skip(self, frame), fields(frame_index = self.frame))]
    pub fn step(&mut self, frame: &FrameSnapshot) -> Actions {
        self.frame += 1;
        self.navigation_cooldown = self.navigation_cooldown.saturating_sub(1);

        let mut out = Vec::new();

        let Some(primary_index) = frame.primary_index(self.mode().sustaining_gesture()) else {
            self.on_absent(&mut out);
            return out.into_iter();
        };

        let hands = frame.hands();
        let primary = &hands[primary_index];
        let secondary_ok = hands
            .iter()
            .enumerate()
            .any(|(i, h)| i != primary_index && h.label == GestureLabel::OkSign);

        self.absent = 0;
        if primary.label == self.candidate {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.candidate = primary.label;
            self.streak = 1;
        }

        trace!(
            label = primary.label.name(),
            streak = self.streak,
            mode = self.mode().name(),
            "Frame classified"
        );

        match self.mode() {
            Mode::Idle => self.step_idle(primary, secondary_ok, &mut out),
            Mode::MouseControl => self.step_mouse(primary, secondary_ok, &mut out),
            Mode::AltTabHold => self.step_alt_tab(primary, &mut out),
            Mode::ScrollMode => self.step_scroll(primary, &mut out),
        }

        if primary.label != GestureLabel::TwoFingers {
            self.navigation_latched = false;
        }
        self.previous_tip = Some(primary.record.index_tip());

        out.into_iter()
    }

    /// Release every held key and return to idle.
    ///
    /// Call on quit so no modifier stays stuck after the process exits.
    #[instrument(skip(self))]
    pub fn shutdown(&mut self) -> Actions {
        let mut out = Vec::new();
        self.release_all(&mut out);
        self.enter(ModeState::idle());
        self.candidate = GestureLabel::None;
        self.streak = 0;
        self.mismatch = 0;

        info!(released = out.len(), "Session shut down");

        out.into_iter()
    }

    fn confirmed(&self, label: GestureLabel) -> bool {
        self.candidate == label && self.streak >= self.tuning.debounce_frames
    }

    fn on_absent(&mut self, out: &mut Vec<ActionEvent>) {
        self.absent = self.absent.saturating_add(1);
        self.candidate = GestureLabel::None;
        self.streak = 0;
        self.previous_tip = None;
        self.navigation_latched = false;

        // Reappearing hands must re-anchor instead of jumping.
        match &mut self.state {
            ModeState::Idle { palm_anchor } => *palm_anchor = None,
            ModeState::MouseControl {
                cursor_anchor,
                click_latched,
                ..
            } => {
                *cursor_anchor = None;
                *click_latched = false;
            }
            ModeState::AltTabHold {
                tab_latched,
                confirm_latched,
            } => {
                *tab_latched = false;
                *confirm_latched = false;
            }
            ModeState::ScrollMode { reference, .. } => *reference = None,
        }

        let timed_out = self.absent >= self.tuning.debounce_frames;
        if timed_out && (self.mode() != Mode::Idle || !self.held.is_empty()) {
            info!(
                absent_frames = self.absent,
                mode = self.mode().name(),
                held = self.held.len(),
                "No hand detected, returning to idle"
            );
            self.release_all(out);
            self.enter(ModeState::idle());
        }
    }

    fn step_idle(&mut self, hand: &LabeledHand, secondary_ok: bool, out: &mut Vec<ActionEvent>) {
        let ModeState::Idle { palm_anchor } = &mut self.state else {
            return;
        };

        if hand.label == GestureLabel::OpenPalm {
            let wrist = hand.record.wrist();
            let anchor = *palm_anchor.get_or_insert(wrist);
            let rise = anchor.y - wrist.y;

            if self.confirmed(GestureLabel::OpenPalm) && rise > self.tuning.alt_trigger_displacement
            {
                debug!(rise, "Open palm raised");
                self.enter(ModeState::AltTabHold {
                    tab_latched: false,
                    confirm_latched: false,
                });
                self.press(Key::Alt, out);
                self.tap(Key::Tab, out);
            }
            return;
        }

        *palm_anchor = None;

        match hand.label {
            GestureLabel::PointingOnly if self.confirmed(GestureLabel::PointingOnly) => {
                self.enter(ModeState::MouseControl {
                    cursor_anchor: self.previous_tip,
                    smoothed: (0.0, 0.0),
                    remainder: (0.0, 0.0),
                    click_latched: secondary_ok,
                });
                self.track_cursor(hand, out);
            }
            GestureLabel::PinchLv if self.confirmed(GestureLabel::PinchLv) => {
                self.enter_scroll(hand);
            }
            GestureLabel::TwoFingers if self.confirmed(GestureLabel::TwoFingers) => {
                if !self.navigation_latched && self.navigation_cooldown == 0 {
                    let midpoint = hand.record.two_finger_midpoint();
                    let key = if midpoint.x < self.tuning.navigation_center_line {
                        Key::LeftArrow
                    } else {
                        Key::RightArrow
                    };

                    debug!(key = ?key, x = midpoint.x, "Navigation gesture");
                    self.tap(key, out);
                    self.navigation_latched = true;
                    self.navigation_cooldown = self.tuning.navigation_cooldown_frames;
                }
            }
            _ => {}
        }
    }

    fn step_mouse(&mut self, hand: &LabeledHand, secondary_ok: bool, out: &mut Vec<ActionEvent>) {
        if self.confirmed(GestureLabel::PinchLv) {
            self.enter_scroll(hand);
            return;
        }

        if hand.label == GestureLabel::PointingOnly {
            self.mismatch = 0;
            self.track_cursor(hand, out);
        } else {
            self.mismatch += 1;
            if self.mismatch >= self.tuning.debounce_frames {
                self.enter(ModeState::idle());
                return;
            }
            // Keep the anchor current so resuming does not jump.
            if let ModeState::MouseControl { cursor_anchor, .. } = &mut self.state {
                *cursor_anchor = Some(hand.record.index_tip());
            }
        }

        if let ModeState::MouseControl { click_latched, .. } = &mut self.state {
            let rising = secondary_ok && !*click_latched;
            *click_latched = secondary_ok;
            if rising {
                debug!("Click gesture");
                out.push(ActionEvent::MouseClick(MouseButton::Left));
            }
        }
    }

    fn track_cursor(&mut self, hand: &LabeledHand, out: &mut Vec<ActionEvent>) {
        let tip = hand.record.index_tip();
        let gain_x = self.tuning.screen_width as f32 * self.tuning.mouse_sensitivity;
        let gain_y = self.tuning.screen_height as f32 * self.tuning.mouse_sensitivity;
        let smoothing = self.tuning.mouse_smoothing;

        let ModeState::MouseControl {
            cursor_anchor,
            smoothed,
            remainder,
            ..
        } = &mut self.state
        else {
            return;
        };

        let Some(anchor) = cursor_anchor.replace(tip) else {
            return;
        };

        let raw = ((tip.x - anchor.x) * gain_x, (tip.y - anchor.y) * gain_y);
        smoothed.0 = smoothed.0 * smoothing + raw.0 * (1.0 - smoothing);
        smoothed.1 = smoothed.1 * smoothing + raw.1 * (1.0 - smoothing);

        let wanted = (smoothed.0 + remainder.0, smoothed.1 + remainder.1);
        let dx = wanted.0.round();
        let dy = wanted.1.round();
        *remainder = (wanted.0 - dx, wanted.1 - dy);

        if dx != 0.0 || dy != 0.0 {
            out.push(ActionEvent::MouseMove {
                dx: dx as i32,
                dy: dy as i32,
            });
        }
    }

    fn step_alt_tab(&mut self, hand: &LabeledHand, out: &mut Vec<ActionEvent>) {
        let ModeState::AltTabHold {
            tab_latched,
            confirm_latched,
        } = &mut self.state
        else {
            return;
        };

        let confirm = hand.label == GestureLabel::OkSign;
        let advance = hand.label == GestureLabel::TwoFingers;
        let confirm_rising = confirm && !*confirm_latched;
        let advance_rising = advance && !*tab_latched;
        *confirm_latched = confirm;
        *tab_latched = advance;

        if confirm_rising {
            debug!("Task switcher confirmed");
            self.tap(Key::Space, out);
            self.release(Key::Alt, out);
            self.enter(ModeState::idle());
        } else if advance_rising {
            debug!("Task switcher advanced");
            self.tap(Key::Tab, out);
        }
    }

    fn enter_scroll(&mut self, hand: &LabeledHand) {
        self.enter(ModeState::ScrollMode {
            reference: Some(hand.record.pinch_midpoint()),
            accumulated: 0.0,
            frames_since_tick: self.tuning.scroll_interval_frames(),
        });
    }

    fn step_scroll(&mut self, hand: &LabeledHand, out: &mut Vec<ActionEvent>) {
        let interval = self.tuning.scroll_interval_frames();
        let unit = self.tuning.scroll_unit;

        if hand.label != GestureLabel::PinchLv {
            self.mismatch += 1;
            if self.mismatch >= self.tuning.debounce_frames {
                self.enter(ModeState::idle());
            } else if let ModeState::ScrollMode {
                reference,
                frames_since_tick,
                ..
            } = &mut self.state
            {
                *reference = None;
                *frames_since_tick = frames_since_tick.saturating_add(1);
            }
            return;
        }
        self.mismatch = 0;

        let ModeState::ScrollMode {
            reference,
            accumulated,
            frames_since_tick,
        } = &mut self.state
        else {
            return;
        };

        let midpoint = hand.record.pinch_midpoint();
        *frames_since_tick = frames_since_tick.saturating_add(1);
        if let Some(previous) = reference.replace(midpoint) {
            // Image y grows downwards; moving the hand up is positive.
            *accumulated += previous.y - midpoint.y;
        }

        let units = (accumulated.abs() / unit).floor();
        if *frames_since_tick >= interval && units >= 1.0 {
            let direction = if *accumulated > 0.0 {
                ScrollDirection::Up
            } else {
                ScrollDirection::Down
            };
            let consumed = accumulated.signum() * units * unit;
            *accumulated -= consumed;
            *frames_since_tick = 0;

            trace!(direction = ?direction, magnitude = units, "Scroll tick");
            out.push(ActionEvent::ScrollTick {
                direction,
                magnitude: units as u32,
            });
        }
    }

    fn enter(&mut self, next: ModeState) {
        let from = self.mode();
        let to = next.mode();
        self.state = next;
        self.mismatch = 0;

        if from != to {
            info!(
                from = from.name(),
                to = to.name(),
                frame = self.frame,
                "Mode changed"
            );
        }
    }

    fn press(&mut self, key: Key, out: &mut Vec<ActionEvent>) {
        if !self.held.contains(&key) {
            self.held.push(key);
            out.push(ActionEvent::KeyDown(key));
        }
    }

    fn release(&mut self, key: Key, out: &mut Vec<ActionEvent>) {
        if let Some(pos) = self.held.iter().position(|k| *k == key) {
            self.held.remove(pos);
            out.push(ActionEvent::KeyUp(key));
        }
    }

    fn tap(&mut self, key: Key, out: &mut Vec<ActionEvent>) {
        self.press(key, out);
        self.release(key, out);
    }

    fn release_all(&mut self, out: &mut Vec<ActionEvent>) {
        while let Some(key) = self.held.pop() {
            out.push(ActionEvent::KeyUp(key));
        }
    }
}
