/// What a key press asks the driver to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleDebug,
    ToggleMirror,
    /// Trigger at the surface centre, bypassing the dwell machine.
    ForceTrigger,
    ToggleFullscreen,
    ExitFullscreen,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "d" | "D" => Some(KeyAction::ToggleDebug),
        "m" | "M" => Some(KeyAction::ToggleMirror),
        "t" | "T" => Some(KeyAction::ForceTrigger),
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "Escape" => Some(KeyAction::ExitFullscreen),
        _ => None,
    }
}

/// Keys whose browser default should be suppressed.
#[inline]
pub fn prevents_default(action: KeyAction) -> bool {
    matches!(action, KeyAction::ToggleFullscreen)
}
