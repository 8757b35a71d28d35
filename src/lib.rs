//! # spark-gesture
//!
//! Touch gesture adapter component for reactive terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! The crate adapts an external gesture-recognition engine to a component
//! lifecycle. The [`primitives::gesture`] component wraps exactly one child;
//! when the host commits the child's element, an engine is constructed
//! against it through the installed [`engine::EngineFactory`]:
//!
//! ```text
//! children() → child index → element commit → bind → configure → callbacks
//!                                   ↑ reactive prop change ─ reconfigure ↲
//! ```
//!
//! Gesture recognition itself is the engine's concern: the adapter only
//! forwards configuration (direction, per-recognizer options, recognize-with
//! and require-failure relations) and subscribes the declared callbacks,
//! deregistering stale listeners on every reconfiguration. On cleanup the
//! engine is stopped and destroyed exactly once.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Direction, GestureEvent, Element)
//! - [`registry`] - Component registry (the host-framework substrate)
//! - [`engine`] - Engine contract, handle, options, recording double
//! - [`state`] - Pointer routing from host input to bound engines
//! - [`primitives`] - The gesture component and its props

pub mod engine;
pub mod primitives;
pub mod registry;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    installed_factory, reset_engine_factory, set_engine_factory, EngineFactory, EngineHandle,
    EngineOptions, GestureEngine, OptionValue, RecognizeWith, RecognizerOptions, RecordingEngine,
    RecordingFactory,
};

pub use registry::{
    allocate_index, capture, clear_element, element_signal, get_allocated_count,
    get_current_parent_index, get_parent, is_allocated, on_destroy, only_child,
    pop_parent_context, push_parent_context, release_index, reset_registry, set_element,
};

pub use state::{dispatch_pointer, reset_pointer_state};

pub use primitives::{gesture, Cleanup, GestureProps, PropValue, RefSink};
