use tracing::{debug, trace, warn};

use crate::{DisplayError, Frame, MatrixOutput};

/// Output sink for hosts without panel hardware.
///
/// Counts frames and clears so the tick cadence stays observable in logs.
pub struct SimOutput {
    width: u32,
    height: u32,
    frames: u64,
    clears: u64,
}

impl SimOutput {
    pub fn open(width: u32, height: u32) -> Result<Self, DisplayError> {
        if width == 0 || height == 0 {
            return Err(DisplayError::Unavailable(format!(
                "panel dimensions {width}x{height} are not drivable"
            )));
        }
        debug!(width, height, "simulated matrix output ready");
        Ok(Self {
            width,
            height,
            frames: 0,
            clears: 0,
        })
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl MatrixOutput for SimOutput {
    fn show(&mut self, frame: &Frame) {
        if frame.width() != self.width || frame.height() != self.height {
            warn!(
                frame_width = frame.width(),
                frame_height = frame.height(),
                panel_width = self.width,
                panel_height = self.height,
                "frame does not match panel dimensions"
            );
        }
        self.frames += 1;
        trace!(frame = self.frames, "frame shown");
    }

    fn clear(&mut self) {
        self.clears += 1;
        trace!(clears = self.clears, "panel blanked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_undrivable_dimensions() {
        assert!(SimOutput::open(0, 64).is_err());
    }

    #[test]
    fn counts_frames_and_clears() {
        let mut output = SimOutput::open(192, 64).expect("open");
        let frame = Frame::new(192, 64);
        output.show(&frame);
        output.show(&frame);
        output.clear();
        assert_eq!(output.frames_shown(), 2);
        assert_eq!(output.clears(), 1);
    }
}
