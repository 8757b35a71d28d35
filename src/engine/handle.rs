//! Engine handle - the scoped resource owned by one component instance.
//!
//! Acquired when the child's element is committed, released on unmount.
//! `dispose` runs stop-then-destroy exactly once; `Drop` is the backstop so
//! the engine is released on every exit path.

use crate::types::Element;

use super::contract::{EngineFactory, GestureEngine};

/// Owns at most one engine instance and the element it was bound to.
///
/// Never shared across component instances.
#[derive(Default)]
pub struct EngineHandle {
    engine: Option<Box<dyn GestureEngine>>,
    element: Option<Element>,
}

impl EngineHandle {
    /// A handle with no engine - the pre-commit state.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Construct an engine attached to `element`.
    pub fn bind(factory: &dyn EngineFactory, element: Element) -> Self {
        Self {
            engine: Some(factory.attach(&element)),
            element: Some(element),
        }
    }

    /// Whether an engine is currently bound.
    pub fn is_bound(&self) -> bool {
        self.engine.is_some()
    }

    /// The element the engine was bound to.
    pub fn bound_element(&self) -> Option<Element> {
        self.element
    }

    /// Mutable access to the bound engine.
    pub fn engine_mut(&mut self) -> Option<&mut (dyn GestureEngine + 'static)> {
        self.engine.as_deref_mut()
    }

    /// Stop listening, then release engine resources, then clear the slot.
    ///
    /// Safe to call when no engine was ever bound, and idempotent: the second
    /// call is a no-op.
    pub fn dispose(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.stop();
            engine.destroy();
        }
        self.element = None;
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
