//! Gesture accumulator.
//!
//! Classifies raw wheel and touch-drag deltas against the active section's
//! internal scroll metrics:
//!
//! - **Internal**: the section still has room to scroll in the gesture's
//!   direction, so the host scrolls it natively.
//! - **Boundary discard**: the first event after internal scrolling stopped at
//!   the section's limit is dropped, so one gesture is not split into
//!   "finish internal scroll" plus "change section". This is a heuristic: a
//!   rapid direction reversal right at the boundary also loses one event.
//! - **Accumulating**: the delta counts toward the section-change threshold.
//!
//! Lock handling and side effects live in [`crate::navigation`].

use crate::config::NavigationConfig;
use crate::section::ScrollMetrics;

/// Direction of a section change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the next section (positive delta)
    Forward,
    /// Toward the previous section (negative delta)
    Backward,
}

impl Direction {
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Direction::Forward)
        } else if delta < 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }
}

/// Classification of one input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    /// Suppressed because a transition is in flight
    Ignored,
    /// The active section scrolls by `delta` on its own
    Internal { delta: f64 },
    /// Dropped right after internal scrolling reached a limit
    BoundaryDiscard,
    /// Counted toward the threshold; `percent` is the progress to display
    Accumulating { percent: u8 },
    /// Threshold reached
    Triggered { direction: Direction, percent: u8 },
    /// A touch ended
    Released,
}

/// Result of feeding one event to the navigation session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureOutcome {
    pub action: GestureAction,
    /// Whether the host must cancel the event's native scrolling
    pub default_prevented: bool,
}

impl GestureOutcome {
    pub fn new(action: GestureAction, default_prevented: bool) -> Self {
        Self {
            action,
            default_prevented,
        }
    }
}

/// Progress percentage for an accumulated magnitude
pub fn percent_of(accumulated: f64, threshold: f64) -> u8 {
    if threshold <= 0.0 {
        return 100;
    }
    (accumulated.abs() / threshold * 100.0).min(100.0).round() as u8
}

#[derive(Debug, Clone)]
pub struct GestureAccumulator {
    wheel_threshold: f64,
    touch_threshold: f64,
    /// Signed wheel sum, or the current drag distance for touch
    accumulated: f64,
    was_scrolling_internally: bool,
    touch_anchor: Option<f64>,
    touch_last: Option<f64>,
}

impl Default for GestureAccumulator {
    fn default() -> Self {
        Self::new(&NavigationConfig::default())
    }
}

impl GestureAccumulator {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            wheel_threshold: config.wheel_threshold,
            touch_threshold: config.touch_threshold,
            accumulated: 0.0,
            was_scrolling_internally: false,
            touch_anchor: None,
            touch_last: None,
        }
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    pub fn was_scrolling_internally(&self) -> bool {
        self.was_scrolling_internally
    }

    /// Forget any partial gesture
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    /// Internal / boundary checks shared by wheel and touch
    fn classify_boundary(&mut self, delta: f64, metrics: ScrollMetrics) -> Option<GestureAction> {
        if metrics.has_headroom(delta) {
            self.was_scrolling_internally = true;
            self.accumulated = 0.0;
            return Some(GestureAction::Internal { delta });
        }

        if self.was_scrolling_internally {
            self.was_scrolling_internally = false;
            self.accumulated = 0.0;
            return Some(GestureAction::BoundaryDiscard);
        }

        None
    }

    /// Feed one wheel event
    pub fn wheel(&mut self, delta: f64, metrics: ScrollMetrics) -> GestureAction {
        if let Some(action) = self.classify_boundary(delta, metrics) {
            return action;
        }

        self.accumulated += delta;
        let percent = percent_of(self.accumulated, self.wheel_threshold);

        match Direction::from_delta(self.accumulated) {
            Some(direction) if self.accumulated.abs() >= self.wheel_threshold => {
                GestureAction::Triggered { direction, percent }
            }
            _ => GestureAction::Accumulating { percent },
        }
    }

    pub fn touch_start(&mut self, y: f64) {
        self.touch_anchor = Some(y);
        self.touch_last = Some(y);
        self.accumulated = 0.0;
    }

    /// Feed one touch-move event at vertical coordinate `y`.
    /// Dragging upward (decreasing `y`) moves forward.
    pub fn touch_move(&mut self, y: f64, metrics: ScrollMetrics) -> GestureAction {
        let anchor = *self.touch_anchor.get_or_insert(y);
        let last = self.touch_last.replace(y).unwrap_or(anchor);
        let drag = anchor - y;

        match self.classify_boundary(drag, metrics) {
            Some(GestureAction::Internal { .. }) => {
                self.touch_anchor = Some(y);
                return GestureAction::Internal { delta: last - y };
            }
            Some(action) => {
                self.touch_anchor = Some(y);
                return action;
            }
            None => {}
        }

        self.accumulated = drag;
        let percent = percent_of(drag, self.touch_threshold);

        match Direction::from_delta(drag) {
            Some(direction) if drag.abs() >= self.touch_threshold => {
                self.touch_anchor = Some(y);
                self.accumulated = 0.0;
                GestureAction::Triggered { direction, percent }
            }
            _ => GestureAction::Accumulating { percent },
        }
    }

    /// End the touch. Returns whether it stopped short of the threshold.
    pub fn touch_end(&mut self) -> bool {
        let drag = match (self.touch_anchor, self.touch_last) {
            (Some(anchor), Some(last)) => anchor - last,
            _ => 0.0,
        };
        self.touch_anchor = None;
        self.touch_last = None;
        self.accumulated = 0.0;
        drag.abs() < self.touch_threshold
    }

    /// Drop the current touch without classifying it
    pub fn cancel_touch(&mut self) {
        self.touch_anchor = None;
        self.touch_last = None;
    }

    /// Move the touch anchor to the last seen position
    pub fn reanchor_touch(&mut self) {
        if let Some(last) = self.touch_last {
            self.touch_anchor = Some(last);
        }
    }
}
