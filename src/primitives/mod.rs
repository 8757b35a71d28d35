//! Gesture primitives - the component and its props.
//!
//! - [`gesture`] - wraps one child component and drives a gesture engine
//!   over its lifecycle
//!
//! # Architecture
//!
//! The component composes three steps onto the host lifecycle:
//! 1. Bind - construct an engine against the child's committed element
//! 2. Configure - derive a [`configure::ConfigSnapshot`] from the declared
//!    props and apply it, on bind and on every reactive prop change
//! 3. Dispose - stop, then destroy, exactly once, on cleanup
//!
//! # Reactivity
//!
//! Configuration props can be:
//! - Static values: `direction: Some(Direction::ALL.into())`
//! - Signals: `direction: Some(my_signal.into())` (stays connected!)
//! - Getters: `direction: Some(PropValue::Getter(...))`
//!
//! The key is to pass props directly - don't extract values before binding!

pub mod configure;
mod gesture;
mod types;

pub use configure::{apply, ConfigSnapshot};
pub use gesture::gesture;
pub use types::{Cleanup, GestureProps, PropValue, RefSink};
