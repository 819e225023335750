use handseal_core::{DwellEvent, PoseDetection};

pub const HINT: &str = "Raise your index and middle fingers together and hold still";
pub const WAITING_FOR_MODEL: &str = "Loading hand tracking model…";

/// Status line shown under the video, refreshed on every new camera frame.
pub fn status_text(detection: &PoseDetection, progress: f32, effect_active: bool) -> String {
    if effect_active {
        return "Effect playing".to_string();
    }
    if !detection.detected {
        return HINT.to_string();
    }
    let hold = (progress.clamp(0.0, 1.0) * 100.0).round();
    let conf = (detection.confidence.clamp(0.0, 1.0) * 100.0).round();
    if hold >= 100.0 {
        format!("Seal held (confidence {conf:.0}%)")
    } else {
        format!("Seal detected, hold {hold:.0}% (confidence {conf:.0}%)")
    }
}

/// Whether a dwell event is worth a log line.
pub fn is_notable(event: &DwellEvent) -> bool {
    !matches!(
        event,
        DwellEvent::Idle | DwellEvent::Charging | DwellEvent::Held | DwellEvent::Deferred
    )
}
