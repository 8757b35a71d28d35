//! Engine and recognizer configuration values.
//!
//! Statically declared structs with named optional fields. Anything an engine
//! understands beyond the named fields travels through the `extra`
//! pass-through lists, applied one key at a time - no runtime reflection.

use crate::types::Direction;

// =============================================================================
// Option Values
// =============================================================================

/// A single engine option value.
///
/// Engines receive these unvalidated; an out-of-range value is the engine's
/// problem, not the adapter's.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Direction(Direction),
}

// =============================================================================
// Recognizer Options
// =============================================================================

/// Partial configuration for one recognizer.
///
/// Only the populated fields are applied; engines merge them into the
/// recognizer's current state (see [`RecognizerOptions::merge`]). Applying
/// the same options twice leaves the recognizer in the same state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecognizerOptions {
    /// Enable or disable the recognizer.
    pub enable: Option<bool>,
    /// Directions the recognizer reacts to (pan, swipe).
    pub direction: Option<Direction>,
    /// Minimal movement in cells before the gesture is recognized (pan, swipe).
    pub threshold: Option<u16>,
    /// Required number of pointers.
    pub pointers: Option<u8>,
    /// Required number of taps (tap).
    pub taps: Option<u8>,
    /// Maximum interval between taps in milliseconds (tap).
    pub interval_ms: Option<u64>,
    /// Minimal press time in milliseconds (press).
    pub time_ms: Option<u64>,
    /// Minimal velocity in cells per millisecond (swipe).
    pub velocity: Option<f32>,
    /// Recognizer(s) that must fail before this one is confirmed.
    pub require_failure: Option<Vec<String>>,
    /// Engine-specific settings outside the named fields.
    pub extra: Vec<(String, OptionValue)>,
}

impl RecognizerOptions {
    /// Options that only set the direction (the pan/swipe direction pass).
    pub fn with_direction(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    /// Merge a partial update into this configuration.
    ///
    /// Populated fields of `patch` overwrite; absent fields are kept. Extra
    /// keys replace same-named entries and append otherwise.
    pub fn merge(&mut self, patch: &RecognizerOptions) {
        if let Some(enable) = patch.enable {
            self.enable = Some(enable);
        }
        if let Some(direction) = patch.direction {
            self.direction = Some(direction);
        }
        if let Some(threshold) = patch.threshold {
            self.threshold = Some(threshold);
        }
        if let Some(pointers) = patch.pointers {
            self.pointers = Some(pointers);
        }
        if let Some(taps) = patch.taps {
            self.taps = Some(taps);
        }
        if let Some(interval_ms) = patch.interval_ms {
            self.interval_ms = Some(interval_ms);
        }
        if let Some(time_ms) = patch.time_ms {
            self.time_ms = Some(time_ms);
        }
        if let Some(velocity) = patch.velocity {
            self.velocity = Some(velocity);
        }
        if let Some(ref require_failure) = patch.require_failure {
            self.require_failure = Some(require_failure.clone());
        }
        for (key, value) in &patch.extra {
            if let Some(existing) = self.extra.iter_mut().find(|(k, _)| k == key) {
                existing.1 = value.clone();
            } else {
                self.extra.push((key.clone(), value.clone()));
            }
        }
    }
}

// =============================================================================
// Engine Options
// =============================================================================

/// The structured options bag of the gesture component.
///
/// Named engine-level fields, per-recognizer overrides, and an `extra`
/// pass-through for engine-level keys outside the named set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineOptions {
    /// Enable or disable the whole engine.
    pub enable: Option<bool>,
    /// Browser-style touch-action hint, forwarded verbatim.
    pub touch_action: Option<String>,
    /// Per-recognizer overrides, applied in declaration order.
    pub recognizers: Vec<(String, RecognizerOptions)>,
    /// Engine-level settings outside the named fields.
    pub extra: Vec<(String, OptionValue)>,
}

/// Cross-recognizer compatibility map: recognizer name to the counterpart(s)
/// it may recognize together with.
pub type RecognizeWith = Vec<(String, Vec<String>)>;

// =============================================================================
// Tests
// =============================================================================
