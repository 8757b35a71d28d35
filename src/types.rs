//! Core types shared across the crate.
//!
//! - [`Direction`] - pan/swipe direction bitflags
//! - [`GestureEvent`] - payload delivered to gesture callbacks
//! - [`Element`] - a committed host element (the bind target)
//! - [`GestureCallback`] - callback alias used throughout

use std::rc::Rc;

// =============================================================================
// Direction (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Movement directions a pan or swipe recognizer reacts to.
    ///
    /// Combine with bitwise OR: `Direction::LEFT | Direction::UP`.
    /// `Direction::empty()` means "no direction".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Direction: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Direction {
    /// Resolve a textual direction token (`"DIRECTION_ALL"`, `"DIRECTION_UP"`, ...).
    ///
    /// Returns `None` for unknown tokens; callers forward the absence rather
    /// than guessing.
    pub fn from_name(name: &str) -> Option<Direction> {
        match name {
            "DIRECTION_NONE" => Some(Direction::empty()),
            "DIRECTION_LEFT" => Some(Direction::LEFT),
            "DIRECTION_RIGHT" => Some(Direction::RIGHT),
            "DIRECTION_UP" => Some(Direction::UP),
            "DIRECTION_DOWN" => Some(Direction::DOWN),
            "DIRECTION_HORIZONTAL" => Some(Direction::HORIZONTAL),
            "DIRECTION_VERTICAL" => Some(Direction::VERTICAL),
            "DIRECTION_ALL" => Some(Direction::ALL),
            _ => None,
        }
    }
}

// =============================================================================
// Element - the bind target
// =============================================================================

/// A committed host element: a component index plus the screen region the
/// host assigned to it.
///
/// The host populates the element slot of a component after layout commit;
/// until then the slot holds `None` and nothing can bind to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    /// Registry index of the component this element was committed for.
    pub index: usize,
    /// Left edge (0-indexed column).
    pub x: u16,
    /// Top edge (0-indexed row).
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Element {
    pub fn new(index: usize, x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { index, x, y, width, height }
    }

    /// Whether a screen position falls inside this element's region.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

// =============================================================================
// Gesture events
// =============================================================================

/// Payload delivered to gesture callbacks.
///
/// `name` is the native event name the engine emitted (`"tap"`,
/// `"panstart"`, `"swipeleft"`, ...). The remaining fields describe the
/// gesture at the moment of emission; engines fill in what their recognizers
/// track and leave the rest at defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    /// Native event name as emitted by the engine.
    pub name: String,
    /// Gesture center, X (column).
    pub x: u16,
    /// Gesture center, Y (row).
    pub y: u16,
    /// Total movement on X since the gesture started.
    pub delta_x: i32,
    /// Total movement on Y since the gesture started.
    pub delta_y: i32,
    /// Scale factor relative to gesture start (pinch), 1.0 when untracked.
    pub scale: f32,
    /// Rotation in degrees relative to gesture start (rotate).
    pub rotation: f32,
    /// Velocity on X, cells per millisecond.
    pub velocity_x: f32,
    /// Velocity on Y, cells per millisecond.
    pub velocity_y: f32,
    /// Dominant movement direction.
    pub direction: Direction,
    /// True on the final event of a gesture (end/cancel).
    pub is_final: bool,
}

impl GestureEvent {
    /// Create an event with neutral movement data.
    pub fn new(name: impl Into<String>, x: u16, y: u16) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            delta_x: 0,
            delta_y: 0,
            scale: 1.0,
            rotation: 0.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            direction: Direction::empty(),
            is_final: false,
        }
    }

    /// Set movement deltas (builder style, for hosts emitting pan/swipe).
    pub fn with_delta(mut self, delta_x: i32, delta_y: i32) -> Self {
        self.delta_x = delta_x;
        self.delta_y = delta_y;
        self
    }

    /// Set the dominant direction (builder style).
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

// =============================================================================
// Callback alias
// =============================================================================

/// Gesture event callback (Rc for shared ownership in closures).
///
/// Using Rc<dyn Fn> instead of Box<dyn Fn> allows cloning callbacks into the
/// configure pass without ownership issues.
pub type GestureCallback = Rc<dyn Fn(&GestureEvent)>;

// =============================================================================
// Tests
// =============================================================================
