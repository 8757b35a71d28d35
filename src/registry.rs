//! Component registry - the host-framework substrate the adapter consumes.
//!
//! Manages the lifecycle of component indices:
//! - Free index pool for O(1) reuse
//! - Parent context stack for nested component creation
//! - Capture frames for observing what a `children` closure created
//! - Per-index element slots, populated by the host after layout commit
//! - Destroy callbacks so resources tied to an index release with it
//!
//! The adapter never walks the full tree; it only needs "the one child my
//! `children` closure created" and "the element the host committed for it".

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use spark_signals::{signal, Signal};

use crate::types::Element;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Set of currently allocated indices.
    static ALLOCATED: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };

    /// Parent index per component (root components have None).
    static PARENTS: RefCell<HashMap<usize, Option<usize>>> = RefCell::new(HashMap::new());

    /// Stack of parent indices for nested component creation.
    static PARENT_STACK: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Capture frames: indices allocated while a frame is open.
    static CAPTURE_STACK: RefCell<Vec<Vec<usize>>> = RefCell::new(Vec::new());

    /// Element slot per component. A signal so effects observing the slot
    /// re-run when the host commits (or clears) the element.
    static ELEMENTS: RefCell<HashMap<usize, Signal<Option<Element>>>> =
        RefCell::new(HashMap::new());

    /// Destroy callbacks registered per index.
    static DESTROY_CALLBACKS: RefCell<HashMap<usize, Vec<Box<dyn FnOnce()>>>> =
        RefCell::new(HashMap::new());
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Get current parent index (None at root).
pub fn get_current_parent_index() -> Option<usize> {
    PARENT_STACK.with(|stack| stack.borrow().last().copied())
}

/// Push a parent index onto the stack.
pub fn push_parent_context(index: usize) {
    PARENT_STACK.with(|stack| stack.borrow_mut().push(index));
}

/// Pop a parent index from the stack.
pub fn pop_parent_context() {
    PARENT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new component.
///
/// The component's parent is the current parent context. If a capture frame
/// is open, the index is recorded in it.
pub fn allocate_index() -> usize {
    let index = FREE_INDICES.with(|free| {
        let mut free = free.borrow_mut();
        if let Some(index) = free.pop() {
            index
        } else {
            NEXT_INDEX.with(|next| {
                let mut next = next.borrow_mut();
                let index = *next;
                *next += 1;
                index
            })
        }
    });

    ALLOCATED.with(|set| {
        set.borrow_mut().insert(index);
    });
    PARENTS.with(|map| {
        map.borrow_mut().insert(index, get_current_parent_index());
    });
    CAPTURE_STACK.with(|stack| {
        if let Some(frame) = stack.borrow_mut().last_mut() {
            frame.push(index);
        }
    });

    index
}

/// Release an index back to the pool.
///
/// Also recursively releases all children, runs destroy callbacks, and
/// clears the element slot (observers see `None` before the slot is gone).
pub fn release_index(index: usize) {
    let allocated = ALLOCATED.with(|set| set.borrow().contains(&index));
    if !allocated {
        return;
    }

    // Collect children first to avoid modifying while iterating.
    let children: Vec<usize> = ALLOCATED.with(|set| {
        set.borrow()
            .iter()
            .copied()
            .filter(|&child| get_parent(child) == Some(index))
            .collect()
    });
    for child in children {
        release_index(child);
    }

    run_destroy_callbacks(index);
    clear_element(index);

    ELEMENTS.with(|map| {
        map.borrow_mut().remove(&index);
    });
    PARENTS.with(|map| {
        map.borrow_mut().remove(&index);
    });
    ALLOCATED.with(|set| {
        set.borrow_mut().remove(&index);
    });
    FREE_INDICES.with(|free| {
        free.borrow_mut().push(index);
    });
}

/// Get the parent of a component.
pub fn get_parent(index: usize) -> Option<usize> {
    PARENTS.with(|map| map.borrow().get(&index).copied().flatten())
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    ALLOCATED.with(|set| set.borrow().contains(&index))
}

/// Get the count of currently allocated components.
pub fn get_allocated_count() -> usize {
    ALLOCATED.with(|set| set.borrow().len())
}

// =============================================================================
// Capture Frames
// =============================================================================

/// Run a closure and return the indices it allocated (at any depth).
pub fn capture<F: FnOnce()>(f: F) -> Vec<usize> {
    CAPTURE_STACK.with(|stack| stack.borrow_mut().push(Vec::new()));
    f();
    CAPTURE_STACK.with(|stack| stack.borrow_mut().pop().unwrap_or_default())
}

/// The host's child-arity enforcement: of the captured indices, exactly one
/// must be a direct child of the current parent context.
///
/// # Panics
///
/// Panics when the closure created zero or more than one direct child.
pub fn only_child(captured: &[usize]) -> usize {
    let parent = get_current_parent_index();
    let direct: Vec<usize> = captured
        .iter()
        .copied()
        .filter(|&index| get_parent(index) == parent)
        .collect();
    match direct.as_slice() {
        [child] => *child,
        other => panic!(
            "[registry] expected exactly one child component, got {}",
            other.len()
        ),
    }
}

// =============================================================================
// Element Slots
// =============================================================================

/// Get the element slot for a component, creating it on first access.
///
/// Reading the returned signal inside an effect creates a dependency on the
/// host's commit phase.
pub fn element_signal(index: usize) -> Signal<Option<Element>> {
    ELEMENTS.with(|map| {
        map.borrow_mut()
            .entry(index)
            .or_insert_with(|| signal(None))
            .clone()
    })
}

/// Commit an element for a component. Called by the host after layout.
pub fn set_element(index: usize, element: Element) {
    element_signal(index).set(Some(element));
}

/// Clear a component's element slot (pre-release or host re-layout).
pub fn clear_element(index: usize) {
    let existing = ELEMENTS.with(|map| map.borrow().get(&index).cloned());
    if let Some(slot) = existing {
        slot.set(None);
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the component at `index` is released.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

fn run_destroy_callbacks(index: usize) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&index));
    if let Some(callbacks) = callbacks {
        for callback in callbacks {
            callback();
        }
    }
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state (for testing).
pub fn reset_registry() {
    ALLOCATED.with(|set| set.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    PARENTS.with(|map| map.borrow_mut().clear());
    PARENT_STACK.with(|stack| stack.borrow_mut().clear());
    CAPTURE_STACK.with(|stack| stack.borrow_mut().clear());
    ELEMENTS.with(|map| map.borrow_mut().clear());
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        reset_registry();

        let idx1 = allocate_index();
        let idx2 = allocate_index();
        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert!(is_allocated(idx1));
        assert_eq!(get_allocated_count(), 2);

        release_index(idx1);
        assert!(!is_allocated(idx1));

        // Should reuse the freed index
        let idx3 = allocate_index();
        assert_eq!(idx3, idx1);
    }

    #[test]
    fn test_parent_context() {
        reset_registry();

        assert_eq!(get_current_parent_index(), None);
        let root = allocate_index();
        assert_eq!(get_parent(root), None);

        push_parent_context(root);
        let child = allocate_index();
        pop_parent_context();

        assert_eq!(get_parent(child), Some(root));
        assert_eq!(get_current_parent_index(), None);
    }

    #[test]
    fn test_release_recursive() {
        reset_registry();

        let root = allocate_index();
        push_parent_context(root);
        let child = allocate_index();
        push_parent_context(child);
        let grandchild = allocate_index();
        pop_parent_context();
        pop_parent_context();

        release_index(root);
        assert!(!is_allocated(root));
        assert!(!is_allocated(child));
        assert!(!is_allocated(grandchild));
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_capture_and_only_child() {
        reset_registry();

        let captured = capture(|| {
            let child = allocate_index();
            push_parent_context(child);
            allocate_index(); // grandchild, not a direct child
            pop_parent_context();
        });
        assert_eq!(captured.len(), 2);

        let child = only_child(&captured);
        assert_eq!(child, 0);
    }

    #[test]
    #[should_panic(expected = "expected exactly one child")]
    fn test_only_child_rejects_empty() {
        reset_registry();
        let captured = capture(|| {});
        only_child(&captured);
    }

    #[test]
    #[should_panic(expected = "expected exactly one child")]
    fn test_only_child_rejects_siblings() {
        reset_registry();
        let captured = capture(|| {
            allocate_index();
            allocate_index();
        });
        only_child(&captured);
    }

    #[test]
    fn test_element_slot() {
        reset_registry();

        let idx = allocate_index();
        let slot = element_signal(idx);
        assert_eq!(slot.get(), None);

        set_element(idx, Element::new(idx, 2, 3, 10, 4));
        assert_eq!(slot.get(), Some(Element::new(idx, 2, 3, 10, 4)));

        // Release clears the slot so observers see None.
        release_index(idx);
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_destroy_callback() {
        use std::cell::Cell;
        use std::rc::Rc;

        reset_registry();

        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();

        let idx = allocate_index();
        on_destroy(idx, move || {
            called_clone.set(true);
        });

        assert!(!called.get());
        release_index(idx);
        assert!(called.get());
    }
}
