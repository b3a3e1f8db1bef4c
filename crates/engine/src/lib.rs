//! State-reconciliation and interpolation core of the matrix controller.
//!
//! Commands arrive on any worker at any time; the render tick reads a
//! consistent snapshot. [`store::StateStore`] is the only object shared
//! between the two, and [`ticker::RenderLoop`] is the single owner of the
//! live, interpolated state.

pub mod color;
pub mod command;
pub mod integrator;
pub mod reconcile;
pub mod store;
pub mod ticker;

pub use command::{ParseError, PartialCommand};
pub use store::StateStore;
