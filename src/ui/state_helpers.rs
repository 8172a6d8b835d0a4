//! Helper functions to set multiple ViewerState properties in a grouped manner.

use crate::controller::{Notice, Reaction, SavePrompt, ViewerController};
use crate::save_request::SaveFormat;
use crate::ui::image_display::refresh_display;
use log::error;
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};
use slint::{ComponentHandle, ModelRc, SharedString, VecModel};

/// Applies the outcome of a controller action to the window.
///
/// Enabled flags are recomputed from the controller after every action rather
/// than toggled per handler.
pub fn apply_reaction(ui: &crate::AppWindow, controller: &mut ViewerController, reaction: Reaction) {
    refresh_display(ui, controller, reaction.redraw);
    sync_controls(ui, controller);

    if let Some(status) = reaction.status {
        set_status(ui, &status);
    }
    if let Some(notice) = reaction.notice {
        show_notice(notice);
    }
}

/// Sets the properties derived from whether an image is loaded.
///
/// Groups: image-loaded, dragging
pub fn sync_controls(ui: &crate::AppWindow, controller: &ViewerController) {
    let viewer_state = ui.global::<crate::ViewerState>();
    viewer_state.set_image_loaded(controller.controls_enabled());
    viewer_state.set_dragging(controller.view().is_dragging());
}

pub fn set_status(ui: &crate::AppWindow, text: &str) {
    ui.global::<crate::ViewerState>()
        .set_status_text(text.into());
}

/// Shows a modal message box without blocking the event loop.
pub fn show_notice(notice: Notice) {
    let (level, title, text) = match notice {
        Notice::Warning(text) => (MessageLevel::Warning, "Error", text),
        Notice::Info(text) => (MessageLevel::Info, "Success", text),
    };

    let result = slint::spawn_local(async move {
        AsyncMessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(text)
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    });
    if let Err(e) = result {
        error!("Failed to show message dialog: {}", e);
    }
}

/// Fills the save form with its defaults and the format list, then shows it.
///
/// Groups: save-directory, save-file-name, save-format-index, save-formats,
/// save-form-visible
pub fn show_save_form(ui: &crate::AppWindow, prompt: SavePrompt) {
    let viewer_state = ui.global::<crate::ViewerState>();
    let formats: Vec<SharedString> = SaveFormat::ALL
        .iter()
        .map(|format| format.label().into())
        .collect();

    viewer_state.set_save_formats(ModelRc::new(VecModel::from(formats)));
    viewer_state.set_save_directory(prompt.directory.into());
    viewer_state.set_save_file_name(prompt.file_name.into());
    viewer_state.set_save_format_index(0);
    viewer_state.set_save_form_visible(true);
}

/// Closes the save form and hands keyboard focus back to the window accelerators.
pub fn hide_save_form(ui: &crate::AppWindow) {
    ui.global::<crate::ViewerState>()
        .set_save_form_visible(false);
    ui.invoke_restore_shortcut_focus();
}
