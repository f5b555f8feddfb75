/// Window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Cursor position of the window centre
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Window abstraction - size and close state owned by the windowing layer
pub trait WindowContext {
    /// Get window dimensions in physical pixels
    fn dimensions(&self) -> WindowDimensions;

    /// Whether a close has been requested
    fn should_close(&self) -> bool;

    /// Ask the window to close at the next frame boundary
    fn request_close(&mut self);
}
