//! Primitive types - props, prop values, cleanup.
//!
//! Props support static values, signals, and getters for reactivity.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::Signal;

use crate::engine::{EngineOptions, RecognizeWith};
use crate::types::{Direction, Element, GestureCallback};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Reading a `Signal` or `Getter` variant inside the configure effect makes
/// the effect re-run when the underlying value changes - that re-run is the
/// "property update" of the component lifecycle.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// =============================================================================
// Reference Sink - dual-shaped element reference holder
// =============================================================================

/// Where the resolved child element is forwarded.
///
/// Callers hold element references in one of two shapes; the variant is
/// chosen once at prop time, not inspected at forward time.
#[derive(Clone)]
pub enum RefSink {
    /// Callback-style holder: invoked with `Some` on commit, `None` when the
    /// element is cleared.
    Callback(Rc<dyn Fn(Option<&Element>)>),
    /// Object-style holder: a shared slot mirrored to the current element.
    Cell(Rc<RefCell<Option<Element>>>),
}

impl RefSink {
    /// Forward the current element to the holder.
    pub fn forward(&self, element: Option<&Element>) {
        match self {
            RefSink::Callback(callback) => callback(element),
            RefSink::Cell(cell) => *cell.borrow_mut() = element.copied(),
        }
    }
}

// =============================================================================
// Gesture Props
// =============================================================================

/// Properties for the gesture component.
///
/// Configuration props are reactive ([`PropValue`]); event callbacks are
/// fixed at creation, like every other callback prop in this model. The
/// `children` closure must create exactly one direct child component - the
/// engine binds to that child's committed element.
///
/// # Example
///
/// ```ignore
/// use std::rc::Rc;
/// use spark_gesture::{gesture, registry, Direction, GestureProps, PropValue};
/// use spark_signals::signal;
///
/// let direction = signal(Direction::HORIZONTAL);
///
/// let cleanup = gesture(GestureProps {
///     direction: Some(direction.clone().into()),
///     on_tap: Some(Rc::new(|event| {
///         println!("tap at ({}, {})", event.x, event.y);
///     })),
///     children: Some(Box::new(|| {
///         // Create the wrapped child component here.
///     })),
///     ..Default::default()
/// });
///
/// // Update direction - the engine is reconfigured automatically.
/// direction.set(Direction::ALL);
/// ```
#[derive(Default)]
pub struct GestureProps {
    // =========================================================================
    // Configuration
    // =========================================================================

    /// Directions the pan and swipe recognizers react to.
    pub direction: Option<PropValue<Direction>>,

    /// Deprecated: use `direction` instead. `true` maps to all directions,
    /// `false` to horizontal only; an explicit `direction` wins.
    pub vertical: Option<PropValue<bool>>,

    /// Structured engine options, including per-recognizer overrides.
    pub options: Option<PropValue<EngineOptions>>,

    /// Cross-recognizer compatibility map (mutual recognize-with relations).
    pub recognize_with: Option<PropValue<RecognizeWith>>,

    // =========================================================================
    // Reference forwarding
    // =========================================================================

    /// Caller-held reference to the child's element. Augmented, not replaced:
    /// the component keeps observing the element internally either way.
    pub element_ref: Option<RefSink>,

    // =========================================================================
    // Gesture event callbacks
    // =========================================================================

    /// Legacy combined binding: fires on both `tap` and `press`.
    pub action: Option<GestureCallback>,

    pub on_double_tap: Option<GestureCallback>,
    pub on_pan: Option<GestureCallback>,
    pub on_pan_cancel: Option<GestureCallback>,
    pub on_pan_end: Option<GestureCallback>,
    pub on_pan_start: Option<GestureCallback>,
    pub on_pinch: Option<GestureCallback>,
    pub on_pinch_cancel: Option<GestureCallback>,
    pub on_pinch_end: Option<GestureCallback>,
    pub on_pinch_in: Option<GestureCallback>,
    pub on_pinch_out: Option<GestureCallback>,
    pub on_pinch_start: Option<GestureCallback>,
    pub on_press: Option<GestureCallback>,
    pub on_press_up: Option<GestureCallback>,
    pub on_rotate: Option<GestureCallback>,
    pub on_rotate_cancel: Option<GestureCallback>,
    pub on_rotate_end: Option<GestureCallback>,
    pub on_rotate_move: Option<GestureCallback>,
    pub on_rotate_start: Option<GestureCallback>,
    pub on_swipe: Option<GestureCallback>,
    pub on_swipe_right: Option<GestureCallback>,
    pub on_swipe_left: Option<GestureCallback>,
    pub on_swipe_up: Option<GestureCallback>,
    pub on_swipe_down: Option<GestureCallback>,
    pub on_tap: Option<GestureCallback>,

    // =========================================================================
    // Children
    // =========================================================================

    /// Must create exactly one direct child component.
    pub children: Option<Box<dyn FnOnce()>>,
}

impl GestureProps {
    /// The flat callback-to-native-event table.
    ///
    /// One entry per declared callback, in table order. Entries are
    /// space-separated native event token lists as the engine consumes them.
    pub fn handlers(&self) -> Vec<(&'static str, GestureCallback)> {
        let mut handlers: Vec<(&'static str, GestureCallback)> = Vec::new();
        let mut add = |events: &'static str, callback: &Option<GestureCallback>| {
            if let Some(callback) = callback {
                handlers.push((events, callback.clone()));
            }
        };

        add("tap press", &self.action);
        add("doubletap", &self.on_double_tap);
        add("pan", &self.on_pan);
        add("pancancel", &self.on_pan_cancel);
        add("panend", &self.on_pan_end);
        add("panstart", &self.on_pan_start);
        add("pinch", &self.on_pinch);
        add("pinchcancel", &self.on_pinch_cancel);
        add("pinchend", &self.on_pinch_end);
        add("pinchin", &self.on_pinch_in);
        add("pinchout", &self.on_pinch_out);
        add("pinchstart", &self.on_pinch_start);
        add("press", &self.on_press);
        add("pressup", &self.on_press_up);
        add("rotate", &self.on_rotate);
        add("rotatecancel", &self.on_rotate_cancel);
        add("rotateend", &self.on_rotate_end);
        add("rotatemove", &self.on_rotate_move);
        add("rotatestart", &self.on_rotate_start);
        add("swipe", &self.on_swipe);
        add("swiperight", &self.on_swipe_right);
        add("swipeleft", &self.on_swipe_left);
        add("swipeup", &self.on_swipe_up);
        add("swipedown", &self.on_swipe_down);
        add("tap", &self.on_tap);

        handlers
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    #[test]
    fn test_prop_value_variants() {
        let stat = PropValue::Static(Direction::UP);
        assert_eq!(stat.get(), Direction::UP);

        let sig = signal(Direction::LEFT);
        let prop: PropValue<Direction> = sig.clone().into();
        assert_eq!(prop.get(), Direction::LEFT);
        sig.set(Direction::RIGHT);
        assert_eq!(prop.get(), Direction::RIGHT);

        let getter = PropValue::Getter(Rc::new(|| Direction::ALL));
        assert_eq!(getter.get(), Direction::ALL);
    }

    #[test]
    fn test_handlers_empty_by_default() {
        let props = GestureProps::default();
        assert!(props.handlers().is_empty());
    }

    #[test]
    fn test_handlers_table_order_and_tokens() {
        let callback: GestureCallback = Rc::new(|_| {});
        let props = GestureProps {
            action: Some(callback.clone()),
            on_tap: Some(callback.clone()),
            on_swipe_left: Some(callback.clone()),
            ..Default::default()
        };

        let handlers = props.handlers();
        let events: Vec<&str> = handlers.iter().map(|(events, _)| *events).collect();
        // Table order: the combined legacy binding first, `tap` last.
        assert_eq!(events, vec!["tap press", "swipeleft", "tap"]);
    }

    #[test]
    fn test_ref_sink_cell_mirrors() {
        let cell = Rc::new(RefCell::new(None));
        let sink = RefSink::Cell(cell.clone());

        let element = Element::new(1, 0, 0, 4, 2);
        sink.forward(Some(&element));
        assert_eq!(*cell.borrow(), Some(element));

        sink.forward(None);
        assert_eq!(*cell.borrow(), None);
    }

    #[test]
    fn test_ref_sink_callback_receives_both_states() {
        use std::cell::Cell;

        let seen = Rc::new(Cell::new((0usize, 0usize)));
        let seen_cb = seen.clone();
        let sink = RefSink::Callback(Rc::new(move |element| {
            let (some, none) = seen_cb.get();
            match element {
                Some(_) => seen_cb.set((some + 1, none)),
                None => seen_cb.set((some, none + 1)),
            }
        }));

        sink.forward(Some(&Element::new(0, 0, 0, 1, 1)));
        sink.forward(None);
        assert_eq!(seen.get(), (1, 1));
    }
}
