//! Event handlers for UI callbacks.
//!
//! Sets up all Logic callbacks (open_image, save_image, zoom, pan, pointer
//! events) and routes them through the shared controller.

use crate::config::OPEN_DIALOG_EXTENSIONS;
use crate::controller::{PointerButton, PointerEvent, Reaction, SaveOutcome, ViewerController};
use crate::save_request::SaveFormat;
use crate::state::{AppState, PanDirection, Point};
use crate::ui::{apply_reaction, hide_save_form, set_status, show_save_form, sync_controls};
use log::{debug, warn};
use rfd::AsyncFileDialog;
use slint::ComponentHandle;
use slint::platform::PointerEventButton;

/// Runs a controller action and applies its reaction to the window.
fn run_action(
    ui_handle: &slint::Weak<crate::AppWindow>,
    state: &AppState,
    action: impl FnOnce(&mut ViewerController) -> Reaction,
) {
    let Some(ui) = ui_handle.upgrade() else {
        return;
    };

    let mut controller = state.controller.borrow_mut();
    let reaction = action(&mut controller);
    apply_reaction(&ui, &mut controller, reaction);
}

fn pointer_button(button: PointerEventButton) -> PointerButton {
    match button {
        PointerEventButton::Left => PointerButton::Left,
        PointerEventButton::Middle => PointerButton::Middle,
        PointerEventButton::Right => PointerButton::Right,
        _ => PointerButton::Other,
    }
}

fn to_point(x: f32, y: f32) -> Point {
    Point {
        x: x.round() as i32,
        y: y.round() as i32,
    }
}

fn pan_direction(button: crate::PanButton) -> PanDirection {
    match button {
        crate::PanButton::Up => PanDirection::Up,
        crate::PanButton::Down => PanDirection::Down,
        crate::PanButton::Left => PanDirection::Left,
        crate::PanButton::Right => PanDirection::Right,
    }
}

/// Sets up all UI event handlers for the application.
pub fn setup_handlers(ui: &crate::AppWindow, state: AppState) {
    {
        let controller = state.controller.borrow();
        set_status(ui, controller.initial_status());
        sync_controls(ui, &controller);
    }

    // Open handler
    // Uses slint::spawn_local because AsyncFileDialog must run on the main thread
    ui.global::<crate::Logic>().on_open_image({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            let ui_handle = ui_handle.clone();
            let state = state.clone();
            let _ = slint::spawn_local(async move {
                let Some(file_handle) = AsyncFileDialog::new()
                    .set_title("Open Image")
                    .add_filter("Images", &OPEN_DIALOG_EXTENSIONS)
                    .pick_file()
                    .await
                else {
                    debug!("Open dialog cancelled");
                    return;
                };

                let path = file_handle.path().to_path_buf();
                run_action(&ui_handle, &state, |controller| controller.open(&path));
            });
        }
    });

    // Save handler: shows the save form, or warns when nothing is loaded
    ui.global::<crate::Logic>().on_save_image({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            let Some(ui) = ui_handle.upgrade() else {
                return;
            };

            let prompt = state.controller.borrow().save_prompt();
            match prompt {
                Ok(prompt) => show_save_form(&ui, prompt),
                Err(reaction) => {
                    apply_reaction(&ui, &mut state.controller.borrow_mut(), reaction)
                }
            }
        }
    });

    ui.global::<crate::Logic>().on_confirm_save({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |directory, file_name, format_index| {
            let Some(ui) = ui_handle.upgrade() else {
                return;
            };

            let format = usize::try_from(format_index)
                .ok()
                .and_then(SaveFormat::from_index)
                .unwrap_or_else(|| {
                    warn!("Unknown format index {}, saving as JPEG", format_index);
                    SaveFormat::Jpeg
                });

            let mut controller = state.controller.borrow_mut();
            match controller.save(&directory, &file_name, format) {
                SaveOutcome::InvalidInput(reaction) => {
                    apply_reaction(&ui, &mut controller, reaction)
                }
                SaveOutcome::Finished(reaction) => {
                    hide_save_form(&ui);
                    apply_reaction(&ui, &mut controller, reaction);
                }
            }
        }
    });

    ui.global::<crate::Logic>().on_cancel_save({
        let ui_handle = ui.as_weak();
        move || {
            if let Some(ui) = ui_handle.upgrade() {
                hide_save_form(&ui);
            }
        }
    });

    ui.global::<crate::Logic>().on_browse_save_directory({
        let ui_handle = ui.as_weak();
        move || {
            let ui_handle = ui_handle.clone();
            let _ = slint::spawn_local(async move {
                let Some(folder) = AsyncFileDialog::new()
                    .set_title("Choose Directory")
                    .pick_folder()
                    .await
                else {
                    return;
                };

                if let Some(ui) = ui_handle.upgrade() {
                    ui.global::<crate::ViewerState>()
                        .set_save_directory(folder.path().to_string_lossy().as_ref().into());
                }
            });
        }
    });

    // Zoom handlers
    ui.global::<crate::Logic>().on_zoom_in({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || run_action(&ui_handle, &state, ViewerController::zoom_in)
    });

    ui.global::<crate::Logic>().on_zoom_out({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || run_action(&ui_handle, &state, ViewerController::zoom_out)
    });

    ui.global::<crate::Logic>().on_reset_zoom({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || run_action(&ui_handle, &state, ViewerController::reset_zoom)
    });

    ui.global::<crate::Logic>().on_pan({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |button| {
            let direction = pan_direction(button);
            run_action(&ui_handle, &state, |controller| controller.pan(direction));
        }
    });

    // Pointer handlers: only middle-button drags are consumed by the controller
    ui.global::<crate::Logic>().on_pointer_down({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |button, x, y| {
            dispatch_pointer(
                &ui_handle,
                &state,
                PointerEvent::Down {
                    button: pointer_button(button),
                    position: to_point(x, y),
                },
            );
        }
    });

    ui.global::<crate::Logic>().on_pointer_up({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |button| {
            dispatch_pointer(
                &ui_handle,
                &state,
                PointerEvent::Up {
                    button: pointer_button(button),
                },
            );
        }
    });

    ui.global::<crate::Logic>().on_pointer_moved({
        let ui_handle = ui.as_weak();
        move |x, y| {
            dispatch_pointer(
                &ui_handle,
                &state,
                PointerEvent::Move {
                    position: to_point(x, y),
                },
            );
        }
    });
}

fn dispatch_pointer(ui_handle: &slint::Weak<crate::AppWindow>, state: &AppState, event: PointerEvent) {
    let Some(ui) = ui_handle.upgrade() else {
        return;
    };

    let mut controller = state.controller.borrow_mut();
    if let Some(reaction) = controller.pointer(event) {
        apply_reaction(&ui, &mut controller, reaction);
    }
}
