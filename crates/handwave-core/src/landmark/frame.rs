use crate::{ClassifierTuning, GestureLabel, HandRecord, classify};

/// A hand together with the label the classifier assigned to it this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledHand {
    /// Validated landmark record.
    pub record: HandRecord,
    /// Gesture derived from `record`.
    pub label: GestureLabel,
}

/// Every hand seen in one frame, each tagged with its gesture.
///
/// Lives for one classify + step cycle only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSnapshot {
    hands: Vec<LabeledHand>,
}

impl FrameSnapshot {
    /// A frame with no hands.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Classify each record independently and build the snapshot.
    pub fn classify(records: Vec<HandRecord>, tuning: &ClassifierTuning) -> Self {
        let hands = records
            .into_iter()
            .map(|record| {
                let label = classify(&record, tuning);
                LabeledHand { record, label }
            })
            .collect();

        Self { hands }
    }

    /// Build a snapshot from hands whose labels are already known.
    pub fn labeled(hands: Vec<LabeledHand>) -> Self {
        Self { hands }
    }

    /// Hands in detector order.
    pub fn hands(&self) -> &[LabeledHand] {
        &self.hands
    }

    /// True when the detector reported no usable hands.
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Index of the hand that drives the state machine this frame.
    ///
    /// The first hand showing `preferred` wins; otherwise the first hand with
    /// any gesture; otherwise the first hand.
    pub fn primary_index(&self, preferred: Option<GestureLabel>) -> Option<usize> {
        if self.hands.is_empty() {
            return None;
        }

        preferred
            .and_then(|want| self.hands.iter().position(|h| h.label == want))
            .or_else(|| {
                self.hands
                    .iter()
                    .position(|h| h.label != GestureLabel::None)
            })
            .or(Some(0))
    }
}
