//! Application configuration constants.

/// Smallest reachable scale factor.
pub const MIN_SCALE: f32 = 0.01;
/// Largest reachable scale factor.
pub const MAX_SCALE: f32 = 10.0;
pub const DEFAULT_SCALE: f32 = 1.0;

pub const ZOOM_IN_FACTOR: f32 = 1.25;
pub const ZOOM_OUT_FACTOR: f32 = 0.8;

/// Largest display bitmap, in pixels, a zoom may produce (400 MB as RGBA).
pub const MAX_DISPLAY_PIXELS: u64 = 100_000_000;

/// Pixels moved by one press of a pan button.
pub const PAN_STEP: i32 = 50;

/// Extensions offered by the open dialog filter. Decoding itself sniffs content.
pub const OPEN_DIALOG_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

pub const READY_STATUS: &str = "Ready";
