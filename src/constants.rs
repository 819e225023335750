/// Page wiring and camera request constants for the browser driver.
///
/// Effect and detection tuning lives in `handseal_core::constants`; this file
/// only covers what the page itself needs.
// Element ids expected in index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const VIDEO_ID: &str = "camera";
pub const STATUS_ID: &str = "status";

// Class toggled on #status when something unrecoverable happened
pub const FATAL_CLASS: &str = "fatal";

// Requested camera resolution (the browser may pick something else)
pub const CAMERA_IDEAL_WIDTH: u32 = 1280;
pub const CAMERA_IDEAL_HEIGHT: u32 = 720;
pub const CAMERA_FACING_MODE: &str = "user";

// HTMLMediaElement.readyState at which the current frame can be drawn
pub const VIDEO_HAVE_CURRENT_DATA: u16 = 2;

// Video currentTime is in seconds, the frame cache keys on milliseconds
pub const VIDEO_TIME_TO_MS: f64 = 1000.0;

// Backing-store cap, so 4K displays do not quadruple the fill cost
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Only log estimator failures this often (in frames)
pub const ESTIMATOR_ERROR_LOG_EVERY: u32 = 120;
