//! State management for the image viewer application.

use crate::controller::ViewerController;
use std::cell::RefCell;
use std::rc::Rc;

pub mod view;

pub use view::{PanDirection, PanOffset, Point, ViewState};

/// Application-wide state container.
///
/// Every callback runs on the Slint event loop thread, so the controller is
/// shared through `Rc<RefCell<_>>` rather than a lock.
#[derive(Clone)]
pub struct AppState {
    pub controller: Rc<RefCell<ViewerController>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            controller: Rc::new(RefCell::new(ViewerController::new())),
        }
    }
}
