//! The consumed engine contract and the installed factory.
//!
//! The adapter drives whatever engine the host installs; it never looks
//! inside. Recognizer names and option values are forwarded unvalidated -
//! the engine's own failure behavior governs.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::MouseEvent;

use crate::types::{Element, GestureCallback};

use super::options::{OptionValue, RecognizerOptions};

// =============================================================================
// Engine Contract
// =============================================================================

/// One gesture-recognition engine instance, bound to one element.
///
/// Event subscription (`on`/`off`) takes a space-separated list of native
/// event tokens, e.g. `"tap press"` subscribes one callback to both events.
pub trait GestureEngine {
    /// Apply one engine-level option.
    fn set_option(&mut self, key: &str, value: OptionValue);

    /// Merge a partial configuration into the named recognizer.
    ///
    /// Populated fields overwrite that recognizer's current state; absent
    /// fields are untouched (see [`RecognizerOptions::merge`]).
    fn configure_recognizer(&mut self, recognizer: &str, options: &RecognizerOptions);

    /// The named recognizer is only confirmed once every recognizer in `on`
    /// has definitively failed.
    fn require_failure(&mut self, recognizer: &str, on: &[String]);

    /// Allow the named recognizer to fire concurrently with each recognizer
    /// in `with`. The relation is symmetric.
    fn recognize_with(&mut self, recognizer: &str, with: &[String]);

    /// Subscribe `callback` to each event token in `events`.
    fn on(&mut self, events: &str, callback: GestureCallback);

    /// Remove every subscription for each event token in `events`.
    fn off(&mut self, events: &str);

    /// Raw pointer feed from the host. Recognition is the engine's concern.
    fn pointer_input(&mut self, event: &MouseEvent);

    /// Stop listening: detach from input, cancel in-flight recognition.
    fn stop(&mut self);

    /// Release engine resources. The engine is unusable afterwards.
    fn destroy(&mut self);
}

/// Produces engine instances bound to committed elements.
pub trait EngineFactory {
    fn attach(&self, element: &Element) -> Box<dyn GestureEngine>;
}

// =============================================================================
// Installed Factory
// =============================================================================

thread_local! {
    static FACTORY: RefCell<Option<Rc<dyn EngineFactory>>> = const { RefCell::new(None) };
}

/// Install the engine factory gesture components bind through.
///
/// Without an installed factory, components stay silently non-functional -
/// mounting succeeds, no engine is created.
pub fn set_engine_factory(factory: Rc<dyn EngineFactory>) {
    FACTORY.with(|slot| {
        *slot.borrow_mut() = Some(factory);
    });
}

/// The currently installed factory, if any.
pub fn installed_factory() -> Option<Rc<dyn EngineFactory>> {
    FACTORY.with(|slot| slot.borrow().clone())
}

/// Remove the installed factory (for testing).
pub fn reset_engine_factory() {
    FACTORY.with(|slot| {
        *slot.borrow_mut() = None;
    });
}
