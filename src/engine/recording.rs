//! Recording engine - the shipped engine double.
//!
//! Records every imperative call the adapter makes and lets a host or test
//! emit gesture events manually. It does not recognize anything: pointer
//! input is retained verbatim, and events fire only through [`RecordingEngine::emit`].

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crossterm::event::MouseEvent;

use crate::types::{Element, GestureCallback, GestureEvent};

use super::contract::{EngineFactory, GestureEngine};
use super::options::{OptionValue, RecognizerOptions};

// =============================================================================
// State
// =============================================================================

#[derive(Default)]
struct RecordingState {
    element: Option<Element>,
    calls: Vec<String>,
    options: Vec<(String, OptionValue)>,
    recognizers: HashMap<String, RecognizerOptions>,
    require_failure: HashMap<String, HashSet<String>>,
    recognize_with: HashMap<String, HashSet<String>>,
    listeners: Vec<(String, GestureCallback)>,
    pointer_events: Vec<MouseEvent>,
    stop_count: usize,
    destroy_count: usize,
}

// =============================================================================
// Recording Engine
// =============================================================================

/// An engine double sharing its state across clones, so a test can keep a
/// handle to an engine the adapter owns.
#[derive(Clone, Default)]
pub struct RecordingEngine {
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self, entry: String) {
        self.state.borrow_mut().calls.push(entry);
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// The element this engine was attached to, when factory-created.
    pub fn element(&self) -> Option<Element> {
        self.state.borrow().element
    }

    /// The full imperative call log, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// Last value applied for an engine-level option key.
    pub fn engine_option(&self, key: &str) -> Option<OptionValue> {
        self.state
            .borrow()
            .options
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Merged configuration of a recognizer.
    pub fn recognizer(&self, name: &str) -> Option<RecognizerOptions> {
        self.state.borrow().recognizers.get(name).cloned()
    }

    /// Whether `recognizer` has a require-failure relation against `on`.
    pub fn requires_failure_of(&self, recognizer: &str, on: &str) -> bool {
        self.state
            .borrow()
            .require_failure
            .get(recognizer)
            .is_some_and(|set| set.contains(on))
    }

    /// Whether `recognizer` may fire concurrently with `with`.
    pub fn recognizes_with(&self, recognizer: &str, with: &str) -> bool {
        self.state
            .borrow()
            .recognize_with
            .get(recognizer)
            .is_some_and(|set| set.contains(with))
    }

    /// Number of callbacks currently subscribed to an event token.
    pub fn listener_count(&self, event: &str) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|(token, _)| token == event)
            .count()
    }

    /// Pointer events fed by the host, verbatim.
    pub fn pointer_events(&self) -> Vec<MouseEvent> {
        self.state.borrow().pointer_events.clone()
    }

    pub fn stop_count(&self) -> usize {
        self.state.borrow().stop_count
    }

    pub fn destroy_count(&self) -> usize {
        self.state.borrow().destroy_count
    }

    // -------------------------------------------------------------------------
    // Manual emission
    // -------------------------------------------------------------------------

    /// Fire every callback subscribed to `event.name`.
    ///
    /// Callbacks run outside the state borrow, so they may re-enter the
    /// engine (e.g. by triggering a reconfiguration).
    pub fn emit(&self, event: &GestureEvent) {
        let callbacks: Vec<GestureCallback> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(token, _)| *token == event.name)
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }
}

impl GestureEngine for RecordingEngine {
    fn set_option(&mut self, key: &str, value: OptionValue) {
        self.log(format!("set_option {key}"));
        self.state
            .borrow_mut()
            .options
            .push((key.to_string(), value));
    }

    fn configure_recognizer(&mut self, recognizer: &str, options: &RecognizerOptions) {
        self.log(format!("configure_recognizer {recognizer}"));
        self.state
            .borrow_mut()
            .recognizers
            .entry(recognizer.to_string())
            .or_default()
            .merge(options);
    }

    fn require_failure(&mut self, recognizer: &str, on: &[String]) {
        self.log(format!("require_failure {recognizer}"));
        let mut state = self.state.borrow_mut();
        let set = state
            .require_failure
            .entry(recognizer.to_string())
            .or_default();
        for name in on {
            set.insert(name.clone());
        }
    }

    fn recognize_with(&mut self, recognizer: &str, with: &[String]) {
        self.log(format!("recognize_with {recognizer}"));
        let mut state = self.state.borrow_mut();
        for name in with {
            state
                .recognize_with
                .entry(recognizer.to_string())
                .or_default()
                .insert(name.clone());
            // The relation is symmetric.
            state
                .recognize_with
                .entry(name.clone())
                .or_default()
                .insert(recognizer.to_string());
        }
    }

    fn on(&mut self, events: &str, callback: GestureCallback) {
        self.log(format!("on {events}"));
        let mut state = self.state.borrow_mut();
        for token in events.split_whitespace() {
            state.listeners.push((token.to_string(), callback.clone()));
        }
    }

    fn off(&mut self, events: &str) {
        self.log(format!("off {events}"));
        let mut state = self.state.borrow_mut();
        for token in events.split_whitespace() {
            state.listeners.retain(|(t, _)| t != token);
        }
    }

    fn pointer_input(&mut self, event: &MouseEvent) {
        self.state.borrow_mut().pointer_events.push(*event);
    }

    fn stop(&mut self) {
        self.log("stop".to_string());
        self.state.borrow_mut().stop_count += 1;
    }

    fn destroy(&mut self) {
        self.log("destroy".to_string());
        let mut state = self.state.borrow_mut();
        state.destroy_count += 1;
        state.listeners.clear();
    }
}

// =============================================================================
// Recording Factory
// =============================================================================

/// Factory that keeps a handle to every engine it attaches.
#[derive(Default)]
pub struct RecordingFactory {
    created: RefCell<Vec<RecordingEngine>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of engines attached so far.
    pub fn created_count(&self) -> usize {
        self.created.borrow().len()
    }

    /// Handle to the i-th attached engine.
    ///
    /// # Panics
    ///
    /// Panics when fewer than `i + 1` engines were attached.
    pub fn engine(&self, i: usize) -> RecordingEngine {
        self.created.borrow()[i].clone()
    }

    /// Handle to the most recently attached engine.
    pub fn last(&self) -> Option<RecordingEngine> {
        self.created.borrow().last().cloned()
    }
}

impl EngineFactory for RecordingFactory {
    fn attach(&self, element: &Element) -> Box<dyn GestureEngine> {
        let engine = RecordingEngine::new();
        engine.state.borrow_mut().element = Some(*element);
        self.created.borrow_mut().push(engine.clone());
        Box::new(engine)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn tap_counter() -> (GestureCallback, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let count_cb = count.clone();
        let callback: GestureCallback = Rc::new(move |_| count_cb.set(count_cb.get() + 1));
        (callback, count)
    }

    #[test]
    fn test_on_subscribes_each_token() {
        let mut engine = RecordingEngine::new();
        let (callback, count) = tap_counter();

        engine.on("tap press", callback);
        assert_eq!(engine.listener_count("tap"), 1);
        assert_eq!(engine.listener_count("press"), 1);

        engine.emit(&GestureEvent::new("tap", 0, 0));
        engine.emit(&GestureEvent::new("press", 0, 0));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_off_removes_all_token_subscriptions() {
        let mut engine = RecordingEngine::new();
        let (callback, count) = tap_counter();
        let (callback2, _) = tap_counter();

        engine.on("tap", callback);
        engine.on("tap", callback2);
        assert_eq!(engine.listener_count("tap"), 2);

        engine.off("tap");
        assert_eq!(engine.listener_count("tap"), 0);

        engine.emit(&GestureEvent::new("tap", 0, 0));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_configure_recognizer_merges() {
        let mut engine = RecordingEngine::new();
        engine.configure_recognizer(
            "pan",
            &RecognizerOptions {
                threshold: Some(4),
                ..Default::default()
            },
        );
        engine.configure_recognizer("pan", &RecognizerOptions::with_direction(crate::types::Direction::ALL));

        let pan = engine.recognizer("pan").unwrap();
        assert_eq!(pan.threshold, Some(4));
        assert_eq!(pan.direction, Some(crate::types::Direction::ALL));
    }

    #[test]
    fn test_recognize_with_is_symmetric() {
        let mut engine = RecordingEngine::new();
        engine.recognize_with("pan", &["swipe".to_string()]);

        assert!(engine.recognizes_with("pan", "swipe"));
        assert!(engine.recognizes_with("swipe", "pan"));
        assert!(!engine.recognizes_with("pan", "pinch"));
    }

    #[test]
    fn test_destroy_clears_listeners() {
        let mut engine = RecordingEngine::new();
        let (callback, count) = tap_counter();

        engine.on("tap", callback);
        engine.stop();
        engine.destroy();

        engine.emit(&GestureEvent::new("tap", 0, 0));
        assert_eq!(count.get(), 0);
        assert_eq!(engine.stop_count(), 1);
        assert_eq!(engine.destroy_count(), 1);
    }

    #[test]
    fn test_factory_records_element() {
        let factory = RecordingFactory::new();
        let element = Element::new(3, 1, 2, 10, 5);
        let _boxed = factory.attach(&element);

        assert_eq!(factory.created_count(), 1);
        assert_eq!(factory.engine(0).element(), Some(element));
    }
}
