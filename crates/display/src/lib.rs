//! Contract between the controller core and the panel it drives.
//!
//! The render loop hands a [`FrameRenderer`] the interpolated live state and
//! gets back a [`Frame`]; a [`MatrixOutput`] pushes that frame to real
//! hardware, applying any physical panel remapping internally. The shader port
//! that produces the actual visuals plugs in behind [`FrameRenderer`];
//! [`FlatRenderer`] and [`SimOutput`] stand in on hosts without a GPU or a
//! panel.

use shared::state::LiveState;
use thiserror::Error;

mod flat;
mod frame;
pub mod mock;
mod sim;

pub use flat::FlatRenderer;
pub use frame::Frame;
pub use sim::SimOutput;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("output device unavailable: {0}")]
    Unavailable(String),
    #[error("frame could not be produced: {0}")]
    Render(String),
}

/// Turns the live state into a pixel buffer.
///
/// `age` is the seconds since the last accepted command; `clock` is the
/// animation time for any time-varying effect, already frozen by the caller
/// once the signal goes stale.
pub trait FrameRenderer: Send {
    fn render(&mut self, live: &LiveState, age: f32, clock: f32) -> Result<Frame, DisplayError>;
}

/// Hardware sink for finished frames, addressed by logical `(x, y)`.
pub trait MatrixOutput: Send {
    fn show(&mut self, frame: &Frame);
    fn clear(&mut self);
}
