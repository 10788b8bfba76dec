//! Intersection-style visibility tracking for fade-in elements.
//!
//! An element counts as shown once at least `threshold` of it is inside the
//! viewport, and hidden again when it drops below.

use std::collections::HashMap;
use std::hash::Hash;

/// Fraction of `[top, top + height)` that lies inside the viewport
pub fn intersection_ratio(top: f64, height: f64, viewport_top: f64, viewport_height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    let start = top.max(viewport_top);
    let end = (top + height).min(viewport_top + viewport_height);
    ((end - start) / height).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct VisibilityTracker<K> {
    threshold: f64,
    visible: HashMap<K, bool>,
}

impl<K: Eq + Hash> VisibilityTracker<K> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            visible: HashMap::new(),
        }
    }

    /// Record an element's current intersection ratio.
    /// Returns the new visibility when it flipped.
    pub fn observe(&mut self, id: K, ratio: f64) -> Option<bool> {
        let now_visible = ratio > 0.0 && ratio >= self.threshold;
        let was_visible = self.visible.insert(id, now_visible).unwrap_or(false);
        (was_visible != now_visible).then_some(now_visible)
    }

    pub fn is_visible(&self, id: &K) -> bool {
        self.visible.get(id).copied().unwrap_or(false)
    }
}
