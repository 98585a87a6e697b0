use crate::{
    EnigoInjector, InputInjector,
    injector::{enigo_button, enigo_key, scroll_length},
};

use handwave_core::{ActionEvent, Key, MouseButton, ScrollDirection};

/// WHAT: Session keys map onto the matching enigo keys
/// WHY: A wrong mapping would press the wrong key system-wide
#[test]
fn given_session_keys_when_mapping_then_matching_enigo_keys() {
    assert_eq!(enigo_key(Key::Alt), enigo::Key::Alt);
    assert_eq!(enigo_key(Key::Tab), enigo::Key::Tab);
    assert_eq!(enigo_key(Key::Space), enigo::Key::Space);
    assert_eq!(enigo_key(Key::LeftArrow), enigo::Key::LeftArrow);
    assert_eq!(enigo_key(Key::RightArrow), enigo::Key::RightArrow);
    assert_eq!(enigo_button(MouseButton::Left), enigo::Button::Left);
}

/// WHAT: Scrolling up is a negative enigo length
/// WHY: enigo scrolls down for positive values
#[test]
fn given_scroll_ticks_when_converting_then_sign_follows_direction() {
    assert_eq!(scroll_length(ScrollDirection::Up, 3), -3);
    assert_eq!(scroll_length(ScrollDirection::Down, 2), 2);
    assert_eq!(scroll_length(ScrollDirection::Down, u32::MAX), i32::MAX);
}

/// WHAT: Real injector presses and releases a harmless key
/// WHY: Smoke test for the platform input API
#[test]
#[ignore] // Requires input permissions and a desktop session - run manually with: cargo test -- --ignored
fn given_enigo_injector_when_tapping_space_then_succeeds() {
    // Given/When/Then: If the platform refuses the connection (headless CI)
    // the test passes trivially.
    if let Ok(mut injector) = EnigoInjector::new() {
        assert!(injector.inject(ActionEvent::KeyDown(Key::Space)).is_ok());
        assert!(injector.inject(ActionEvent::KeyUp(Key::Space)).is_ok());
    }
}
