/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Elapsed time since the previous frame, in viewer time units
    pub elapsed: f32,
    /// Objects drawn this frame
    pub draw_calls: usize,
}

impl FrameInfo {
    pub fn new(number: u64, elapsed: f32, draw_calls: usize) -> Self {
        Self {
            number,
            elapsed,
            draw_calls,
        }
    }
}
