use std::sync::Arc;
use winit::window::{CursorGrabMode, Window as WinitWindow};

use crate::traits::{WindowContext, WindowDimensions};

/// Wrapper around winit Window that carries the close request
pub struct Window {
    inner: Arc<WinitWindow>,
    closing: bool,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self {
            inner: window,
            closing: false,
        }
    }

    /// Hide the cursor and keep it inside the window for mouse look
    pub fn capture_cursor(&self) {
        let grabbed = self
            .inner
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| self.inner.set_cursor_grab(CursorGrabMode::Locked));
        if let Err(e) = grabbed {
            log::warn!("cursor grab unavailable: {}", e);
        }
        self.inner.set_cursor_visible(false);
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }
}

impl WindowContext for Window {
    fn dimensions(&self) -> WindowDimensions {
        let size = self.inner.inner_size();
        WindowDimensions::new(size.width, size.height)
    }

    fn should_close(&self) -> bool {
        self.closing
    }

    fn request_close(&mut self) {
        self.closing = true;
    }
}
