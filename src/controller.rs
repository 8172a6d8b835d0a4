//! User actions applied to the view state.
//!
//! The controller knows nothing about Slint. Each action returns a
//! [`Reaction`] telling the UI layer what to show: status text, an optional
//! dialog notice, and how much of the display must be redrawn.

use crate::config::READY_STATUS;
use crate::error::AppError;
use crate::image_handle::ImageHandle;
use crate::save_request::{SaveFormat, SaveRequest};
use crate::state::{PanDirection, PanOffset, Point, ViewState};
use log::{debug, error, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

const OPEN_FAILED: &str = "Could not load the image";
const NOTHING_TO_SAVE: &str = "There is no image to save";
const SAVE_INPUT_MISSING: &str = "Make sure the Directory and File name fields are filled in";

/// Message that needs a blocking dialog rather than the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Info(String),
}

/// How much of the display changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Redraw {
    #[default]
    None,
    /// Only the pan offsets moved.
    Viewport,
    /// The image or its scale changed; the scaled copy must be rebuilt.
    Bitmap,
}

/// Outcome of a single user action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    pub status: Option<String>,
    pub notice: Option<Notice>,
    pub redraw: Redraw,
}

impl Reaction {
    fn status(text: impl Into<String>) -> Self {
        Self {
            status: Some(text.into()),
            ..Self::default()
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            notice: Some(Notice::Warning(text.into())),
            ..Self::default()
        }
    }

    fn redraw(mut self, redraw: Redraw) -> Self {
        self.redraw = redraw;
        self
    }
}

/// Values to pre-populate the save form with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePrompt {
    pub directory: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Directory or file name was empty; nothing was written and the form stays open.
    InvalidInput(Reaction),
    /// A write was attempted, successfully or not.
    Finished(Reaction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other,
}

/// Pointer input from the image viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { button: PointerButton, position: Point },
    Move { position: Point },
    Up { button: PointerButton },
}

/// Owns the view state and translates user actions into state transitions.
#[derive(Default)]
pub struct ViewerController {
    view: ViewState,
}

impl ViewerController {
    pub fn new() -> Self {
        Self {
            view: ViewState::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Single source for every image-dependent control's enabled flag.
    pub fn controls_enabled(&self) -> bool {
        self.view.has_image()
    }

    pub fn initial_status(&self) -> &'static str {
        READY_STATUS
    }

    /// Opens `path`, replacing the current image on success only.
    pub fn open(&mut self, path: &Path) -> Reaction {
        match guarded(|| ImageHandle::open(path)) {
            Ok(Ok(handle)) => {
                self.view.load(handle);
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Reaction::status(format!("Loaded: {}", file_name)).redraw(Redraw::Bitmap)
            }
            Ok(Err(e @ AppError::ImageOpening(_))) => {
                error!("{}", e);
                Reaction::warning(OPEN_FAILED)
            }
            Ok(Err(e)) => {
                error!("Unexpected error while opening {}: {}", path.display(), e);
                Reaction::warning(format!("Error while loading the image: {}", e))
            }
            Err(msg) => {
                error!("Decoder failure while opening {}: {}", path.display(), msg);
                Reaction::warning(format!("Error while loading the image: {}", msg))
            }
        }
    }

    /// Returns the save form defaults, or a warning when there is nothing to save.
    pub fn save_prompt(&self) -> Result<SavePrompt, Reaction> {
        let Some(handle) = self.view.image() else {
            warn!("Save requested without an image");
            return Err(Reaction::warning(NOTHING_TO_SAVE));
        };

        Ok(SavePrompt {
            directory: handle
                .source_dir()
                .map(|dir| dir.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_name: handle.name().to_string(),
        })
    }

    /// Validates the form input and writes the full-resolution original.
    pub fn save(&self, directory: &str, file_name: &str, format: SaveFormat) -> SaveOutcome {
        let Some(handle) = self.view.image() else {
            return SaveOutcome::Finished(Reaction::warning(NOTHING_TO_SAVE));
        };

        let Some(request) = SaveRequest::build(directory, file_name, format) else {
            warn!("Save form submitted with empty directory or file name");
            return SaveOutcome::InvalidInput(Reaction::warning(SAVE_INPUT_MISSING));
        };

        let path = request.path();
        debug!("Saving '{}' as {:?}", handle.name(), request.format());
        let reaction = match guarded(|| handle.save(&path)) {
            Ok(Ok(())) => {
                let saved_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Reaction {
                    status: Some(format!("Saved: {}", saved_name)),
                    notice: Some(Notice::Info(format!(
                        "Image saved as {}",
                        path.display()
                    ))),
                    redraw: Redraw::None,
                }
            }
            Ok(Err(e)) => {
                error!("{}", e);
                Reaction::warning(e.to_string())
            }
            Err(msg) => {
                error!("Encoder failure while saving {}: {}", path.display(), msg);
                Reaction::warning(format!("Error while saving: {}", msg))
            }
        };

        SaveOutcome::Finished(reaction)
    }

    pub fn zoom_in(&mut self) -> Reaction {
        zoom_reaction(self.view.zoom_in())
    }

    pub fn zoom_out(&mut self) -> Reaction {
        zoom_reaction(self.view.zoom_out())
    }

    pub fn reset_zoom(&mut self) -> Reaction {
        match self.view.reset_zoom() {
            Some(Ok(_)) => Reaction::status("Original size").redraw(Redraw::Bitmap),
            other => zoom_reaction(other),
        }
    }

    pub fn pan(&mut self, direction: PanDirection) -> Reaction {
        match self.view.pan_step(direction) {
            Some(_) => {
                Reaction::status(format!("Moved {}", direction.label())).redraw(Redraw::Viewport)
            }
            None => Reaction::default(),
        }
    }

    /// Writes back offsets after the viewport limited them to its scroll range.
    pub fn sync_pan(&mut self, pan: PanOffset) {
        self.view.set_pan(pan);
    }

    /// Returns `None` for events left to the toolkit (anything but the middle button).
    pub fn pointer(&mut self, event: PointerEvent) -> Option<Reaction> {
        match event {
            PointerEvent::Down {
                button: PointerButton::Middle,
                position,
            } => {
                if !self.view.start_drag(position) {
                    return None;
                }
                debug!("Drag started at {:?}", position);
                Some(Reaction::status("Dragging"))
            }
            PointerEvent::Move { position } => self
                .view
                .drag_to(position)
                .map(|_| Reaction::default().redraw(Redraw::Viewport)),
            PointerEvent::Up {
                button: PointerButton::Middle,
            } => {
                if !self.view.end_drag() {
                    return None;
                }
                debug!("Drag finished at {:?}", self.view.pan());
                Some(Reaction::status("Drag finished"))
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => None,
        }
    }
}

fn zoom_reaction(scale: Option<Result<f32, AppError>>) -> Reaction {
    match scale {
        Some(Ok(scale)) => {
            debug!("Scale set to {}", scale);
            Reaction::status(format!("Scale: {:.2}x", scale)).redraw(Redraw::Bitmap)
        }
        Some(Err(e)) => {
            warn!("Zoom refused: {}", e);
            Reaction::warning(e.to_string())
        }
        None => Reaction::default(),
    }
}

/// Runs codec work so a panicking decoder or encoder is reported instead of
/// taking the window down.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::path::PathBuf;

    fn fixture(dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        RgbImage::new(20, 10)
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    fn opened() -> (tempfile::TempDir, ViewerController) {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(dir.path(), "photo.png");
        let mut controller = ViewerController::new();
        controller.open(&path);
        (dir, controller)
    }

    #[test]
    fn controls_start_disabled() {
        let controller = ViewerController::new();
        assert!(!controller.controls_enabled());
        assert_eq!(controller.initial_status(), "Ready");
    }

    #[test]
    fn open_enables_controls() {
        let (_dir, controller) = opened();
        assert!(controller.controls_enabled());
        assert_eq!(controller.view().image().unwrap().name(), "photo");
    }

    #[test]
    fn open_reports_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(dir.path(), "photo.png");
        let mut controller = ViewerController::new();

        let reaction = controller.open(&path);
        assert_eq!(reaction.status.as_deref(), Some("Loaded: photo.png"));
        assert_eq!(reaction.redraw, Redraw::Bitmap);
        assert_eq!(reaction.notice, None);
    }

    #[test]
    fn failed_open_keeps_no_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = ViewerController::new();

        let reaction = controller.open(&dir.path().join("nope.png"));
        assert_eq!(reaction.notice, Some(Notice::Warning(OPEN_FAILED.to_string())));
        assert_eq!(reaction.status, None);
        assert!(!controller.controls_enabled());
    }

    #[test]
    fn failed_open_keeps_previous_image() {
        let (dir, mut controller) = opened();
        controller.zoom_in();

        controller.open(&dir.path().join("nope.png"));
        assert!(controller.controls_enabled());
        assert_eq!(controller.view().image().unwrap().name(), "photo");
        assert_eq!(controller.view().scale(), 1.25);
    }

    #[test]
    fn reopening_resets_scale() {
        let (dir, mut controller) = opened();
        controller.zoom_in();
        controller.pan(PanDirection::Down);

        let other = fixture(dir.path(), "other.png");
        controller.open(&other);
        assert_eq!(controller.view().scale(), 1.0);
        assert_eq!(controller.view().pan(), PanOffset::default());
        assert_eq!(controller.view().image().unwrap().name(), "other");
    }

    #[test]
    fn zoom_status_uses_two_decimals() {
        let (_dir, mut controller) = opened();
        assert_eq!(controller.zoom_in().status.as_deref(), Some("Scale: 1.25x"));
        assert_eq!(controller.zoom_out().status.as_deref(), Some("Scale: 1.00x"));
        assert_eq!(controller.zoom_out().status.as_deref(), Some("Scale: 0.80x"));

        let reset = controller.reset_zoom();
        assert_eq!(reset.status.as_deref(), Some("Original size"));
        assert_eq!(reset.redraw, Redraw::Bitmap);
        assert_eq!(controller.view().scale(), 1.0);
    }

    #[test]
    fn zoom_past_display_budget_warns_and_keeps_scale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.bmp");
        RgbImage::new(2000, 1500)
            .save_with_format(&path, ImageFormat::Bmp)
            .unwrap();
        let mut controller = ViewerController::new();
        controller.open(&path);

        let mut last = Reaction::default();
        for _ in 0..11 {
            last = controller.zoom_in();
        }

        assert_eq!(last.redraw, Redraw::None);
        assert_eq!(last.status, None);
        assert!(matches!(last.notice, Some(Notice::Warning(_))));
        assert!(controller.view().scale() < 10.0);
        assert!(controller.controls_enabled());
    }

    #[test]
    fn actions_are_noops_without_image() {
        let mut controller = ViewerController::new();
        assert_eq!(controller.zoom_in(), Reaction::default());
        assert_eq!(controller.zoom_out(), Reaction::default());
        assert_eq!(controller.reset_zoom(), Reaction::default());
        assert_eq!(controller.pan(PanDirection::Left), Reaction::default());
        assert_eq!(
            controller.pointer(PointerEvent::Down {
                button: PointerButton::Middle,
                position: Point::default(),
            }),
            None
        );
    }

    #[test]
    fn pan_up_then_down_is_net_zero() {
        let (_dir, mut controller) = opened();
        let up = controller.pan(PanDirection::Up);
        assert_eq!(up.status.as_deref(), Some("Moved up"));
        assert_eq!(up.redraw, Redraw::Viewport);
        assert_eq!(controller.view().pan().y, -50);

        controller.pan(PanDirection::Down);
        assert_eq!(controller.view().pan().y, 0);
    }

    #[test]
    fn middle_button_drag_pans() {
        let (_dir, mut controller) = opened();
        let start = controller.pointer(PointerEvent::Down {
            button: PointerButton::Middle,
            position: Point { x: 40, y: 40 },
        });
        assert!(start.is_some());

        let moved = controller
            .pointer(PointerEvent::Move {
                position: Point { x: 30, y: 45 },
            })
            .unwrap();
        assert_eq!(moved.redraw, Redraw::Viewport);
        assert_eq!(controller.view().pan(), PanOffset { x: 10, y: -5 });

        assert!(controller
            .pointer(PointerEvent::Up {
                button: PointerButton::Middle
            })
            .is_some());
        assert_eq!(
            controller.pointer(PointerEvent::Move {
                position: Point { x: 0, y: 0 }
            }),
            None
        );
    }

    #[test]
    fn other_buttons_are_not_consumed() {
        let (_dir, mut controller) = opened();
        for button in [PointerButton::Left, PointerButton::Right, PointerButton::Other] {
            assert_eq!(
                controller.pointer(PointerEvent::Down {
                    button,
                    position: Point::default(),
                }),
                None
            );
            assert_eq!(controller.pointer(PointerEvent::Up { button }), None);
        }
        assert!(!controller.view().is_dragging());
    }

    #[test]
    fn save_without_image_never_prompts_or_writes() {
        let dir = tempfile::tempdir().unwrap();
        let controller = ViewerController::new();

        let prompt = controller.save_prompt();
        assert_eq!(
            prompt,
            Err(Reaction::warning(NOTHING_TO_SAVE))
        );

        let dir_str = dir.path().to_string_lossy().into_owned();
        controller.save(&dir_str, "out", SaveFormat::Png);
        assert!(!dir.path().join("out.png").exists());
    }

    #[test]
    fn save_prompt_prefills_name_and_directory() {
        let (dir, controller) = opened();
        let prompt = controller.save_prompt().unwrap();
        assert_eq!(prompt.file_name, "photo");
        assert_eq!(prompt.directory, dir.path().to_string_lossy());
    }

    #[test]
    fn save_rejects_empty_fields() {
        let (dir, controller) = opened();
        let dir_str = dir.path().to_string_lossy().into_owned();

        assert!(matches!(
            controller.save("", "out", SaveFormat::Png),
            SaveOutcome::InvalidInput(_)
        ));
        assert!(matches!(
            controller.save(&dir_str, "", SaveFormat::Png),
            SaveOutcome::InvalidInput(_)
        ));
    }

    #[test]
    fn save_writes_original_resolution() {
        let (dir, mut controller) = opened();
        controller.zoom_in();
        controller.zoom_in();
        let dir_str = dir.path().to_string_lossy().into_owned();

        let SaveOutcome::Finished(reaction) = controller.save(&dir_str, "out", SaveFormat::Bmp)
        else {
            panic!("expected a finished save");
        };
        assert_eq!(reaction.status.as_deref(), Some("Saved: out.bmp"));
        assert!(matches!(reaction.notice, Some(Notice::Info(_))));

        let saved = ImageHandle::open(&dir.path().join("out.bmp")).unwrap();
        assert_eq!((saved.width(), saved.height()), (20, 10));
    }

    #[test]
    fn failed_save_keeps_image_loaded() {
        let (dir, controller) = opened();
        let missing = dir.path().join("missing");
        let missing = missing.to_string_lossy().into_owned();

        let SaveOutcome::Finished(reaction) = controller.save(&missing, "out", SaveFormat::Png)
        else {
            panic!("expected a finished save");
        };
        match reaction.notice {
            Some(Notice::Warning(text)) => assert!(text.contains("'photo'")),
            other => panic!("expected warning, got {:?}", other),
        }
        assert!(controller.controls_enabled());
    }

    #[test]
    fn panics_become_messages() {
        let result: Result<(), String> = guarded(|| panic!("decoder exploded"));
        assert_eq!(result, Err("decoder exploded".to_string()));
    }
}
