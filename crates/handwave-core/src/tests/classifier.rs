use crate::{
    ClassifierTuning, ExtensionThresholds, Finger, FingerStates, GestureLabel, classify,
    is_extended,
    tests::fixtures::{
        FIST, OPEN_PALM, PINCH_LV, POINTING, Pose, TWO_FINGERS, hand, hand_at, label_of, ok_hand,
    },
};

/// WHAT: Each reference pose maps to its label
/// WHY: Locks down the geometric predicates against regressions
#[test]
fn given_reference_poses_when_classifying_then_expected_labels() {
    assert_eq!(label_of(&hand(FIST)), GestureLabel::None);
    assert_eq!(label_of(&hand(POINTING)), GestureLabel::PointingOnly);
    assert_eq!(label_of(&hand(TWO_FINGERS)), GestureLabel::TwoFingers);
    assert_eq!(label_of(&hand(OPEN_PALM)), GestureLabel::OpenPalm);
    assert_eq!(label_of(&hand(PINCH_LV)), GestureLabel::PinchLv);
    assert_eq!(label_of(&ok_hand()), GestureLabel::OkSign);
}

/// WHAT: Classification is pure
/// WHY: Identical input must never yield different labels across calls
#[test]
fn given_same_record_when_classifying_repeatedly_then_same_label() {
    // Given: Every reference pose
    let tuning = ClassifierTuning::default();
    let records = [
        hand(FIST),
        hand(POINTING),
        hand(TWO_FINGERS),
        hand(OPEN_PALM),
        hand(PINCH_LV),
        ok_hand(),
    ];

    // When/Then: A second pass returns exactly the first pass
    for record in &records {
        let first = classify(record, &tuning);
        for _ in 0..10 {
            assert_eq!(classify(record, &tuning), first);
        }
    }
}

/// WHAT: Translating a hand does not change its label
/// WHY: Only relative finger geometry may matter, not where the hand is
#[test]
fn given_translated_hand_when_classifying_then_label_unchanged() {
    for pose in [POINTING, TWO_FINGERS, OPEN_PALM, PINCH_LV] {
        assert_eq!(
            label_of(&hand_at(pose, -0.2, 0.1)),
            label_of(&hand(pose)),
            "pose {:?}",
            pose
        );
    }
}

/// WHAT: Finger states follow tip-versus-joint distance from the palm
/// WHY: Every higher-level predicate is built on these booleans
#[test]
fn given_two_finger_pose_when_measuring_then_only_index_and_middle_extended() {
    let states = FingerStates::measure(&hand(TWO_FINGERS), &ClassifierTuning::default());

    assert_eq!(
        states,
        FingerStates {
            thumb: false,
            index: true,
            middle: true,
            ring: false,
            pinky: false,
        }
    );
}

/// WHAT: Raising a finger's ratio can flip it to curled
/// WHY: Thresholds are a tuning surface and must actually be honoured
#[test]
fn given_strict_index_ratio_when_measuring_pointing_then_index_curled() {
    // Given: A ratio no real fingertip reaches
    let tuning = ClassifierTuning {
        extension_thresholds: ExtensionThresholds {
            index: 5.0,
            ..ExtensionThresholds::default()
        },
        ..ClassifierTuning::default()
    };

    // When: Measuring a pointing hand
    let extended = is_extended(&hand(POINTING), Finger::Index, &tuning);

    // Then: The index is no longer extended and the hand is unrecognised
    assert!(!extended);
    assert_eq!(classify(&hand(POINTING), &tuning), GestureLabel::None);
}

/// WHAT: OK sign wins over every other predicate
/// WHY: Fixed priority keeps one label per hand per frame
#[test]
fn given_ok_touch_distance_disabled_when_classifying_ok_then_falls_through() {
    // Given: A touch distance too small to ever match
    let tuning = ClassifierTuning {
        ok_touch_distance: 0.001,
        ..ClassifierTuning::default()
    };

    // When/Then: The OK hand is no longer an OK sign
    assert_ne!(classify(&ok_hand(), &tuning), GestureLabel::OkSign);
    assert_eq!(classify(&ok_hand(), &ClassifierTuning::default()), GestureLabel::OkSign);
}

/// WHAT: Pinch angle window rejects shapes outside it
/// WHY: The L/V pinch must not fire when thumb and index are nearly parallel
#[test]
fn given_narrow_angle_window_when_classifying_pinch_then_none() {
    // Given: Accept only angles above 80 degrees (fixture is about 48)
    let tuning = ClassifierTuning {
        pinch_min_angle_deg: 80.0,
        ..ClassifierTuning::default()
    };

    // When/Then
    assert_eq!(classify(&hand(PINCH_LV), &tuning), GestureLabel::None);
}

/// WHAT: Thumbs-up alone is not a gesture
/// WHY: Pinch requires the index finger too
#[test]
fn given_thumb_only_when_classifying_then_none() {
    let thumb_only = Pose {
        thumb: true,
        ..FIST
    };

    assert_eq!(label_of(&hand(thumb_only)), GestureLabel::None);
}
