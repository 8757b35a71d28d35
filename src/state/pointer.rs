//! Pointer routing - delivers host input to bound engines.
//!
//! Binding an engine registers its handle here; disposing unregisters it.
//! Host code feeds raw mouse events to [`dispatch`], which forwards each
//! event to every bound engine whose element region contains the position.
//! Does NOT own stdin - the host's event loop does.
//!
//! Engines should interpret pointer input and emit gesture events from their
//! own scheduling, not synchronously from `pointer_input`; the handle is
//! borrowed for the duration of the call.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::MouseEvent;

use crate::engine::EngineHandle;

// =============================================================================
// Route Table
// =============================================================================

thread_local! {
    static ROUTES: RefCell<Vec<(usize, Rc<RefCell<EngineHandle>>)>> = RefCell::new(Vec::new());
    static NEXT_ROUTE_ID: Cell<usize> = const { Cell::new(0) };
}

/// Register a bound handle for routing. Returns the route id for removal.
pub(crate) fn register(handle: Rc<RefCell<EngineHandle>>) -> usize {
    let id = NEXT_ROUTE_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    ROUTES.with(|routes| {
        routes.borrow_mut().push((id, handle));
    });
    id
}

/// Remove a route by id.
pub(crate) fn unregister(id: usize) {
    ROUTES.with(|routes| {
        routes.borrow_mut().retain(|(route_id, _)| *route_id != id);
    });
}

/// Number of registered routes (for tests).
pub(crate) fn route_count() -> usize {
    ROUTES.with(|routes| routes.borrow().len())
}

// =============================================================================
// Dispatch
// =============================================================================

/// Forward a host pointer event to every bound engine whose element region
/// contains the event position. Returns the number of engines reached.
pub fn dispatch(event: &MouseEvent) -> usize {
    // Collect matching handles first: an engine may unregister routes while
    // handling input (e.g. a callback unmounts a component).
    let matching: Vec<Rc<RefCell<EngineHandle>>> = ROUTES.with(|routes| {
        routes
            .borrow()
            .iter()
            .filter(|(_, handle)| {
                handle
                    .borrow()
                    .bound_element()
                    .is_some_and(|element| element.contains(event.column, event.row))
            })
            .map(|(_, handle)| handle.clone())
            .collect()
    });

    let mut delivered = 0;
    for handle in matching {
        let mut handle = handle.borrow_mut();
        if let Some(engine) = handle.engine_mut() {
            engine.pointer_input(event);
            delivered += 1;
        }
    }
    delivered
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Clear the route table (for testing).
pub fn reset_pointer_state() {
    ROUTES.with(|routes| routes.borrow_mut().clear());
    NEXT_ROUTE_ID.with(|next| next.set(0));
}

// =============================================================================
// Tests
// =============================================================================
