use shared::state::LiveState;

use crate::{DisplayError, Frame, FrameRenderer};

/// Fallback renderer that floods the panel with the live background color.
///
/// Used when no shader-based renderer is linked in; keeps the interpolation
/// and blanking behavior observable on any host.
pub struct FlatRenderer {
    width: u32,
    height: u32,
}

impl FlatRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FrameRenderer for FlatRenderer {
    fn render(&mut self, live: &LiveState, _age: f32, _clock: f32) -> Result<Frame, DisplayError> {
        let mut frame = Frame::new(self.width, self.height);
        frame.fill(live.background_color.to_bytes());
        Ok(frame)
    }
}
