// Host-side tests for the key bindings.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keys {
    include!("../src/keys.rs");
}

use keys::*;

#[test]
fn bound_keys_map_to_actions() {
    assert_eq!(action_for_key("d"), Some(KeyAction::ToggleDebug));
    assert_eq!(action_for_key("m"), Some(KeyAction::ToggleMirror));
    assert_eq!(action_for_key("t"), Some(KeyAction::ForceTrigger));
    assert_eq!(action_for_key("Enter"), Some(KeyAction::ToggleFullscreen));
    assert_eq!(action_for_key("Escape"), Some(KeyAction::ExitFullscreen));
}

#[test]
fn letter_bindings_ignore_case() {
    for (lower, upper) in [("d", "D"), ("m", "M"), ("t", "T")] {
        assert_eq!(action_for_key(lower), action_for_key(upper));
    }
}

#[test]
fn unbound_keys_do_nothing() {
    for key in ["", "x", "Shift", " ", "enter", "Tab", "ArrowUp", "dd"] {
        assert_eq!(action_for_key(key), None, "{key:?}");
    }
}

#[test]
fn only_fullscreen_suppresses_default() {
    assert!(prevents_default(KeyAction::ToggleFullscreen));
    // Escape must still reach the browser so it can leave fullscreen itself
    assert!(!prevents_default(KeyAction::ExitFullscreen));
    assert!(!prevents_default(KeyAction::ToggleDebug));
    assert!(!prevents_default(KeyAction::ToggleMirror));
    assert!(!prevents_default(KeyAction::ForceTrigger));
}
