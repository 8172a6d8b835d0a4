//! Zoom, pan and drag state for the currently displayed image.

use crate::config::{
    DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, PAN_STEP, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::error::Result;
use crate::image_handle::ImageHandle;
use image::RgbaImage;

/// Direction of a fixed-step pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    pub fn label(self) -> &'static str {
        match self {
            PanDirection::Up => "up",
            PanDirection::Down => "down",
            PanDirection::Left => "left",
            PanDirection::Right => "right",
        }
    }
}

/// Scroll offsets of the viewport relative to the scaled image's origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanOffset {
    pub x: i32,
    pub y: i32,
}

/// Pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Loaded image plus everything needed to derive what is on screen.
struct Loaded {
    handle: ImageHandle,
    scale: f32,
    pan: PanOffset,
    drag_anchor: Option<Point>,
}

/// `None` is the no-image state; every mutation is a no-op there.
#[derive(Default)]
pub struct ViewState {
    loaded: Option<Loaded>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any current image and resets scale and pan.
    pub fn load(&mut self, handle: ImageHandle) {
        self.loaded = Some(Loaded {
            handle,
            scale: DEFAULT_SCALE,
            pan: PanOffset::default(),
            drag_anchor: None,
        });
    }

    pub fn has_image(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.loaded.as_ref().map(|l| &l.handle)
    }

    /// Current scale; the default when nothing is loaded.
    pub fn scale(&self) -> f32 {
        self.loaded.as_ref().map_or(DEFAULT_SCALE, |l| l.scale)
    }

    pub fn pan(&self) -> PanOffset {
        self.loaded.as_ref().map_or_else(PanOffset::default, |l| l.pan)
    }

    pub fn is_dragging(&self) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|l| l.drag_anchor.is_some())
    }

    /// Returns the new scale, or `None` without an image.
    ///
    /// A scale whose display copy would exceed the pixel budget is refused and
    /// the previous scale kept.
    pub fn zoom_in(&mut self) -> Option<Result<f32>> {
        self.set_scale_with(|scale| scale * ZOOM_IN_FACTOR)
    }

    pub fn zoom_out(&mut self) -> Option<Result<f32>> {
        self.set_scale_with(|scale| scale * ZOOM_OUT_FACTOR)
    }

    pub fn reset_zoom(&mut self) -> Option<Result<f32>> {
        self.set_scale_with(|_| DEFAULT_SCALE)
    }

    fn set_scale_with(&mut self, f: impl FnOnce(f32) -> f32) -> Option<Result<f32>> {
        let loaded = self.loaded.as_mut()?;
        let scale = f(loaded.scale).clamp(MIN_SCALE, MAX_SCALE);
        if let Err(e) = loaded.handle.display_size(scale) {
            return Some(Err(e));
        }
        loaded.scale = scale;
        Some(Ok(scale))
    }

    /// Moves the viewport one step. Offsets are not clamped here.
    pub fn pan_step(&mut self, direction: PanDirection) -> Option<PanOffset> {
        let loaded = self.loaded.as_mut()?;
        match direction {
            PanDirection::Up => loaded.pan.y -= PAN_STEP,
            PanDirection::Down => loaded.pan.y += PAN_STEP,
            PanDirection::Left => loaded.pan.x -= PAN_STEP,
            PanDirection::Right => loaded.pan.x += PAN_STEP,
        }
        Some(loaded.pan)
    }

    /// Overwrites the offsets, e.g. after the viewport clamped them.
    pub fn set_pan(&mut self, pan: PanOffset) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.pan = pan;
        }
    }

    /// Returns false without an image.
    pub fn start_drag(&mut self, at: Point) -> bool {
        match self.loaded.as_mut() {
            Some(loaded) => {
                loaded.drag_anchor = Some(at);
                true
            }
            None => false,
        }
    }

    /// Shifts the offsets against the pointer movement so the image follows it.
    pub fn drag_to(&mut self, at: Point) -> Option<PanOffset> {
        let loaded = self.loaded.as_mut()?;
        let anchor = loaded.drag_anchor?;
        loaded.pan.x -= at.x - anchor.x;
        loaded.pan.y -= at.y - anchor.y;
        loaded.drag_anchor = Some(at);
        Some(loaded.pan)
    }

    /// Returns whether a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        self.loaded
            .as_mut()
            .and_then(|l| l.drag_anchor.take())
            .is_some()
    }

    /// Bitmap to show at the current scale, or `None` to clear the display.
    pub fn display_bitmap(&self) -> Option<Result<RgbaImage>> {
        self.loaded
            .as_ref()
            .map(|l| l.handle.scaled_copy(l.scale))
    }
}
