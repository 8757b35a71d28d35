//! Adapter state modules.
//!
//! - [`pointer`] - routes host pointer events to bound engines

pub mod pointer;

pub use pointer::{dispatch as dispatch_pointer, reset_pointer_state};
