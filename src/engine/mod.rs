//! Gesture engine seam - the contract the adapter consumes.
//!
//! The adapter does not recognize gestures. It drives an external engine
//! through [`GestureEngine`]: construction from an element (via the installed
//! [`EngineFactory`]), per-recognizer configuration, cross-recognizer
//! relations, event subscription, and stop/destroy.
//!
//! [`RecordingEngine`] is the shipped engine double: it records every
//! imperative call and lets a host (or test) emit gesture events manually.

mod contract;
mod handle;
mod options;
mod recording;

pub use contract::{
    installed_factory, reset_engine_factory, set_engine_factory, EngineFactory, GestureEngine,
};
pub use handle::EngineHandle;
pub use options::{EngineOptions, OptionValue, RecognizeWith, RecognizerOptions};
pub use recording::{RecordingEngine, RecordingFactory};
