//! Configurator - translates declared props into imperative engine calls.
//!
//! A [`ConfigSnapshot`] is derived fresh from the props on every configure
//! pass and applied in a fixed order:
//!
//! 1. direction resolution (including the deprecated `vertical` flag)
//! 2. the structured options bag (engine-level keys, then recognizers)
//! 3. cross-recognizer recognize-with wiring
//! 4. event listener rebinding (off, then on)
//!
//! Recognizer objects reach their final configured form before dependency
//! relations and listeners attach. Re-applying an identical snapshot leaves
//! the engine in an identical state.

use crate::engine::{EngineOptions, GestureEngine, OptionValue, RecognizeWith, RecognizerOptions};
use crate::types::{Direction, GestureCallback};

use super::types::PropValue;

// =============================================================================
// Snapshot
// =============================================================================

/// The subset of declared props that affects recognizer behavior, resolved
/// to plain values. Never persisted - rebuilt on every configure pass.
pub struct ConfigSnapshot {
    /// The deprecated orientation flag, when declared.
    pub vertical: Option<bool>,
    /// Explicit direction, when declared. Wins over `vertical`.
    pub direction: Option<Direction>,
    /// Structured options bag, when declared.
    pub options: Option<EngineOptions>,
    /// Cross-recognizer compatibility map.
    pub recognize_with: RecognizeWith,
    /// Callback table: (native event tokens, callback).
    pub handlers: Vec<(&'static str, GestureCallback)>,
}

/// The reactive inputs the configure effect reads on every run.
pub(crate) struct ConfigInputs {
    pub vertical: Option<PropValue<bool>>,
    pub direction: Option<PropValue<Direction>>,
    pub options: Option<PropValue<EngineOptions>>,
    pub recognize_with: Option<PropValue<RecognizeWith>>,
    pub handlers: Vec<(&'static str, GestureCallback)>,
}

impl ConfigInputs {
    /// Derive a fresh snapshot. Reading the reactive props inside an effect
    /// subscribes the effect to their changes.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            vertical: self.vertical.as_ref().map(PropValue::get),
            direction: self.direction.as_ref().map(PropValue::get),
            options: self.options.as_ref().map(PropValue::get),
            recognize_with: self
                .recognize_with
                .as_ref()
                .map(PropValue::get)
                .unwrap_or_default(),
            handlers: self.handlers.clone(),
        }
    }
}

// =============================================================================
// Apply
// =============================================================================

/// Apply a snapshot to the engine. Idempotent: applying the same snapshot
/// twice produces the same recognizer state as applying it once.
pub fn apply(engine: &mut dyn GestureEngine, snapshot: &ConfigSnapshot) {
    // 1. Direction resolution. The deprecated flag still works but warns.
    if snapshot.vertical.is_some() {
        eprintln!("[gesture] `vertical` is deprecated, use `direction` instead");
    }
    let direction = snapshot.direction.or_else(|| {
        snapshot.vertical.map(|vertical| {
            if vertical {
                Direction::ALL
            } else {
                Direction::HORIZONTAL
            }
        })
    });
    if let Some(direction) = direction {
        let options = RecognizerOptions::with_direction(direction);
        engine.configure_recognizer("pan", &options);
        engine.configure_recognizer("swipe", &options);
    }

    // 2. Options bag: engine-level keys one at a time, then recognizers.
    if let Some(ref options) = snapshot.options {
        if let Some(enable) = options.enable {
            engine.set_option("enable", OptionValue::Bool(enable));
        }
        if let Some(ref touch_action) = options.touch_action {
            engine.set_option("touch_action", OptionValue::Str(touch_action.clone()));
        }
        for (key, value) in &options.extra {
            engine.set_option(key, value.clone());
        }
        for (name, recognizer) in &options.recognizers {
            engine.configure_recognizer(name, recognizer);
            if let Some(ref on) = recognizer.require_failure {
                engine.require_failure(name, on);
            }
        }
    }

    // 3. Cross-recognizer compatibility.
    for (name, with) in &snapshot.recognize_with {
        engine.recognize_with(name, with);
    }

    // 4. Listeners: deregister before register so a re-applied configuration
    //    never leaves a callback subscribed twice.
    for (events, callback) in &snapshot.handlers {
        engine.off(events);
        engine.on(events, callback.clone());
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RecordingEngine;
    use crate::types::GestureEvent;
    use std::cell::Cell;
    use std::rc::Rc;

    fn empty_snapshot() -> ConfigSnapshot {
        ConfigSnapshot {
            vertical: None,
            direction: None,
            options: None,
            recognize_with: Vec::new(),
            handlers: Vec::new(),
        }
    }

    #[test]
    fn test_vertical_true_resolves_to_all() {
        let mut engine = RecordingEngine::new();
        let snapshot = ConfigSnapshot {
            vertical: Some(true),
            ..empty_snapshot()
        };
        apply(&mut engine, &snapshot);

        assert_eq!(engine.recognizer("pan").unwrap().direction, Some(Direction::ALL));
        assert_eq!(engine.recognizer("swipe").unwrap().direction, Some(Direction::ALL));
    }

    #[test]
    fn test_vertical_false_resolves_to_horizontal() {
        let mut engine = RecordingEngine::new();
        let snapshot = ConfigSnapshot {
            vertical: Some(false),
            ..empty_snapshot()
        };
        apply(&mut engine, &snapshot);

        assert_eq!(
            engine.recognizer("pan").unwrap().direction,
            Some(Direction::HORIZONTAL)
        );
    }

    #[test]
    fn test_explicit_direction_wins_over_vertical() {
        let mut engine = RecordingEngine::new();
        let snapshot = ConfigSnapshot {
            vertical: Some(true),
            direction: Some(Direction::UP),
            ..empty_snapshot()
        };
        apply(&mut engine, &snapshot);

        assert_eq!(engine.recognizer("pan").unwrap().direction, Some(Direction::UP));
        assert_eq!(engine.recognizer("swipe").unwrap().direction, Some(Direction::UP));
    }

    #[test]
    fn test_no_direction_inputs_touch_no_recognizer() {
        let mut engine = RecordingEngine::new();
        apply(&mut engine, &empty_snapshot());
        assert!(engine.recognizer("pan").is_none());
        assert!(engine.recognizer("swipe").is_none());
    }

    #[test]
    fn test_options_bag_application() {
        let mut engine = RecordingEngine::new();
        let snapshot = ConfigSnapshot {
            options: Some(EngineOptions {
                enable: Some(true),
                touch_action: Some("pan-y".to_string()),
                recognizers: vec![(
                    "pan".to_string(),
                    RecognizerOptions {
                        threshold: Some(2),
                        require_failure: Some(vec!["swipe".to_string()]),
                        ..Default::default()
                    },
                )],
                extra: vec![("dom_events".to_string(), OptionValue::Bool(false))],
            }),
            ..empty_snapshot()
        };
        apply(&mut engine, &snapshot);

        assert_eq!(engine.engine_option("enable"), Some(OptionValue::Bool(true)));
        assert_eq!(
            engine.engine_option("touch_action"),
            Some(OptionValue::Str("pan-y".to_string()))
        );
        assert_eq!(
            engine.engine_option("dom_events"),
            Some(OptionValue::Bool(false))
        );
        assert_eq!(engine.recognizer("pan").unwrap().threshold, Some(2));
        assert!(engine.requires_failure_of("pan", "swipe"));
    }

    #[test]
    fn test_recognize_with_is_mutual() {
        let mut engine = RecordingEngine::new();
        let snapshot = ConfigSnapshot {
            recognize_with: vec![("pan".to_string(), vec!["swipe".to_string()])],
            ..empty_snapshot()
        };
        apply(&mut engine, &snapshot);

        assert!(engine.recognizes_with("pan", "swipe"));
        assert!(engine.recognizes_with("swipe", "pan"));
    }

    #[test]
    fn test_step_ordering() {
        let mut engine = RecordingEngine::new();
        let callback: GestureCallback = Rc::new(|_| {});
        let snapshot = ConfigSnapshot {
            direction: Some(Direction::ALL),
            options: Some(EngineOptions {
                enable: Some(true),
                recognizers: vec![("pinch".to_string(), RecognizerOptions::default())],
                ..Default::default()
            }),
            recognize_with: vec![("pan".to_string(), vec!["swipe".to_string()])],
            handlers: vec![("tap", callback)],
            vertical: None,
        };
        apply(&mut engine, &snapshot);

        assert_eq!(
            engine.calls(),
            vec![
                "configure_recognizer pan",
                "configure_recognizer swipe",
                "set_option enable",
                "configure_recognizer pinch",
                "recognize_with pan",
                "off tap",
                "on tap",
            ]
        );
    }

    #[test]
    fn test_reapply_is_idempotent() {
        let count = Rc::new(Cell::new(0));
        let count_cb = count.clone();
        let callback: GestureCallback = Rc::new(move |_| count_cb.set(count_cb.get() + 1));

        let snapshot = ConfigSnapshot {
            direction: Some(Direction::HORIZONTAL),
            options: Some(EngineOptions {
                recognizers: vec![(
                    "pan".to_string(),
                    RecognizerOptions {
                        threshold: Some(3),
                        ..Default::default()
                    },
                )],
                ..Default::default()
            }),
            recognize_with: vec![("pan".to_string(), vec!["swipe".to_string()])],
            handlers: vec![("tap", callback)],
            vertical: None,
        };

        let mut engine = RecordingEngine::new();
        apply(&mut engine, &snapshot);
        let pan_once = engine.recognizer("pan");

        apply(&mut engine, &snapshot);
        assert_eq!(engine.recognizer("pan"), pan_once);
        assert_eq!(engine.listener_count("tap"), 1);

        // Exactly one callback fires per native event occurrence.
        engine.emit(&GestureEvent::new("tap", 0, 0));
        assert_eq!(count.get(), 1);
    }
}
