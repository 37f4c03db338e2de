//! Visibility Trigger
//!
//! One-shot "fire once when visible" detection shared by lazy images and
//! carousels. An element is visible when its bounding box intersects the
//! viewport grown by a margin on every side. After the first intersection
//! the trigger disengages and never fires again.

use serde::{Deserialize, Serialize};

// == Geometry ==
/// Bounding box of an element, relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Visible area of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Checks whether `rect` intersects the viewport grown by `margin`.
    pub fn intersects(&self, rect: &Rect, margin: f64) -> bool {
        rect.bottom() >= -margin
            && rect.top <= self.height + margin
            && rect.right() >= -margin
            && rect.left <= self.width + margin
    }
}

// == Trigger ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerState {
    Observing,
    Fired,
    Disconnected,
}

/// Fires a callback the first time an observed element becomes visible.
#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    margin: f64,
    state: TriggerState,
}

impl VisibilityTrigger {
    /// Creates a trigger with the given pre-load margin in pixels.
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            state: TriggerState::Observing,
        }
    }

    /// Creates a trigger that has already fired, for eagerly loaded content.
    pub fn fired(margin: f64) -> Self {
        Self {
            margin,
            state: TriggerState::Fired,
        }
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// True while the trigger still watches for visibility.
    pub fn is_observing(&self) -> bool {
        self.state == TriggerState::Observing
    }

    pub fn has_fired(&self) -> bool {
        self.state == TriggerState::Fired
    }

    /// Reports a new position of the element.
    ///
    /// Calls `on_visible` and returns `true` only on the first intersection.
    pub fn observe<F: FnOnce()>(&mut self, element: Rect, viewport: Viewport, on_visible: F) -> bool {
        if self.state != TriggerState::Observing || !viewport.intersects(&element, self.margin) {
            return false;
        }
        self.state = TriggerState::Fired;
        on_visible();
        true
    }

    /// Stops observing without firing.
    pub fn disconnect(&mut self) {
        if self.state == TriggerState::Observing {
            self.state = TriggerState::Disconnected;
        }
    }
}
