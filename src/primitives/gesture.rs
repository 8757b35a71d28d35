//! Gesture component - wraps one child and drives an engine over its
//! lifecycle.
//!
//! The component renders no node of its own: the `children` closure creates
//! exactly one direct child, and the engine binds to that child's committed
//! element. Binding happens inside a reactive effect observing the child's
//! element slot, so it runs strictly post-commit; the same effect derives a
//! fresh configuration snapshot and re-applies it whenever a reactive prop
//! changes. The returned cleanup stops the effect, releases the engine
//! (stop, then destroy) and the child subtree.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::effect;

use crate::engine::{installed_factory, EngineHandle};
use crate::registry;
use crate::state::pointer;

use super::configure::{self, ConfigInputs};
use super::types::{Cleanup, GestureProps};

/// Create a gesture component around the single child the `children` closure
/// creates.
///
/// Returns a cleanup function that releases the engine and the child.
///
/// # Panics
///
/// Panics when `children` creates zero or more than one direct child
/// component (the host's child-arity enforcement).
pub fn gesture(mut props: GestureProps) -> Cleanup {
    // 1. CREATE THE CHILD - run the children closure in the current parent
    //    context; exactly one direct child is the bind target.
    let children = props.children.take();
    let captured = registry::capture(|| {
        if let Some(children) = children {
            children();
        }
    });
    let child = registry::only_child(&captured);

    // 2. STATE - the engine handle is exclusively owned by this instance.
    let handle: Rc<RefCell<EngineHandle>> = Rc::new(RefCell::new(EngineHandle::unbound()));
    let route_id: Rc<Cell<Option<usize>>> = Rc::new(Cell::new(None));
    let element_slot = registry::element_signal(child);

    // 3. ELEMENT REF FORWARDING - augment the caller's reference holder;
    //    internal observation continues regardless.
    let stop_ref_effect: Option<Box<dyn FnOnce()>> = props.element_ref.take().map(|sink| {
        let slot = element_slot.clone();
        let stop = effect(move || {
            let element = slot.get();
            sink.forward(element.as_ref());
        });
        Box::new(stop) as Box<dyn FnOnce()>
    });

    // 4. BIND + CONFIGURE EFFECT - re-runs when the element slot or any
    //    reactive configuration prop changes.
    let inputs = ConfigInputs {
        vertical: props.vertical.take(),
        direction: props.direction.take(),
        options: props.options.take(),
        recognize_with: props.recognize_with.take(),
        handlers: props.handlers(),
    };
    let handle_effect = handle.clone();
    let route_effect = route_id.clone();
    let slot_effect = element_slot.clone();
    let stop_config_effect = effect(move || {
        let element = slot_effect.get();
        let snapshot = inputs.snapshot();

        let mut guard = handle_effect.borrow_mut();

        // Re-commit churn: the host committed a different element (or cleared
        // it). Release the old engine before anything else.
        if guard.is_bound() && guard.bound_element() != element {
            if let Some(id) = route_effect.take() {
                pointer::unregister(id);
            }
            guard.dispose();
        }

        let mut freshly_bound = false;
        if !guard.is_bound() {
            // Pre-commit, or no engine installed: silently non-functional.
            // The effect re-runs once the element lands.
            let Some(element) = element else { return };
            let Some(factory) = installed_factory() else { return };
            *guard = EngineHandle::bind(factory.as_ref(), element);
            freshly_bound = true;
        }

        if let Some(engine) = guard.engine_mut() {
            configure::apply(engine, &snapshot);
        }
        drop(guard);

        if freshly_bound {
            route_effect.set(Some(pointer::register(handle_effect.clone())));
        }
    });

    // 5. RETURN CLEANUP
    Box::new(move || {
        // No more reactions.
        stop_config_effect();
        // Detach from input routing, then stop and release the engine.
        if let Some(id) = route_id.take() {
            pointer::unregister(id);
        }
        handle.borrow_mut().dispose();
        // Release the child subtree; the still-running ref effect observes
        // the cleared slot and forwards None to the caller's holder.
        registry::release_index(child);
        if let Some(stop) = stop_ref_effect {
            stop();
        }
    })
}

// =============================================================================
// Tests
// =============================================================================
