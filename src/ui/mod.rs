//! UI module for handling user interactions and UI updates.
//!
//! Everything here runs on the Slint event loop thread. Dialogs from `rfd` are
//! awaited inside `slint::spawn_local` tasks so the loop keeps running while
//! they are open.

pub mod handlers;
pub mod image_display;
mod state_helpers;
mod viewport;

pub use handlers::setup_handlers;
pub use state_helpers::*;
