//! Pushing the view state's bitmap and offsets into the window.

use crate::controller::{Notice, Redraw, ViewerController};
use crate::ui::show_notice;
use crate::ui::viewport::clamp_to_viewport;
use image::RgbaImage;
use log::{debug, error};
use slint::{ComponentHandle, Image, Rgba8Pixel, SharedPixelBuffer};

/// Wraps a scaled RGBA bitmap as a Slint image.
pub fn create_slint_image(bitmap: &RgbaImage) -> Image {
    let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
        bitmap.as_raw(),
        bitmap.width(),
        bitmap.height(),
    );

    Image::from_rgba8(buffer)
}

/// Redraws as much of the display as `redraw` asks for.
pub fn refresh_display(ui: &crate::AppWindow, controller: &mut ViewerController, redraw: Redraw) {
    match redraw {
        Redraw::None => return,
        Redraw::Bitmap => update_bitmap(ui, controller),
        Redraw::Viewport => {}
    }

    update_offsets(ui, controller);
}

fn update_bitmap(ui: &crate::AppWindow, controller: &ViewerController) {
    let viewer_state = ui.global::<crate::ViewerState>();

    match controller.view().display_bitmap() {
        Some(Err(e)) => {
            // keep showing the previous bitmap
            error!("{}", e);
            show_notice(Notice::Warning(e.to_string()));
        }
        Some(Ok(bitmap)) => {
            debug!("Displaying {}x{} bitmap", bitmap.width(), bitmap.height());
            viewer_state.set_display_width(bitmap.width() as i32);
            viewer_state.set_display_height(bitmap.height() as i32);
            viewer_state.set_display_image(create_slint_image(&bitmap));
        }
        None => {
            viewer_state.set_display_width(0);
            viewer_state.set_display_height(0);
            viewer_state.set_display_image(Image::default());
        }
    }
}

/// Clamps the pan offsets to the viewport, writes them back, then shows them.
fn update_offsets(ui: &crate::AppWindow, controller: &mut ViewerController) {
    let viewer_state = ui.global::<crate::ViewerState>();
    let content = (
        viewer_state.get_display_width().max(0) as u32,
        viewer_state.get_display_height().max(0) as u32,
    );
    let viewport = (ui.get_viewport_width(), ui.get_viewport_height());

    let pan = clamp_to_viewport(controller.view().pan(), content, viewport);
    controller.sync_pan(pan);

    viewer_state.set_pan_x(pan.x);
    viewer_state.set_pan_y(pan.y);
}
