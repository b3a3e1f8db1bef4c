//! Mock collaborators for testing the render loop.
//!
//! Both mocks record every call behind a shared handle, so a test can keep a
//! clone while the loop owns the boxed trait object.

use std::sync::{Arc, Mutex};

use shared::state::LiveState;

use crate::{DisplayError, Frame, FrameRenderer, MatrixOutput};

#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    Show,
    Clear,
}

#[derive(Clone, Default)]
pub struct MockOutput {
    events: Arc<Mutex<Vec<OutputEvent>>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OutputEvent> {
        self.events.lock().expect("mock output lock").clone()
    }
}

impl MatrixOutput for MockOutput {
    fn show(&mut self, _frame: &Frame) {
        self.events
            .lock()
            .expect("mock output lock")
            .push(OutputEvent::Show);
    }

    fn clear(&mut self) {
        self.events
            .lock()
            .expect("mock output lock")
            .push(OutputEvent::Clear);
    }
}

/// Recorded arguments of one render call.
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub live: LiveState,
    pub age: f32,
    pub clock: f32,
}

#[derive(Clone)]
pub struct MockRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
    fail: bool,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A renderer whose every call fails, for the blank-on-failure path.
    pub fn failing() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().expect("mock renderer lock").clone()
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRenderer for MockRenderer {
    fn render(&mut self, live: &LiveState, age: f32, clock: f32) -> Result<Frame, DisplayError> {
        self.calls
            .lock()
            .expect("mock renderer lock")
            .push(RenderCall {
                live: live.clone(),
                age,
                clock,
            });
        if self.fail {
            Err(DisplayError::Render("mock renderer failure".into()))
        } else {
            Ok(Frame::new(1, 1))
        }
    }
}
