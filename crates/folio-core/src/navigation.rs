//! Navigation controller.
//!
//! [`NavigationSession`] owns everything the scroll-snapping behaviour mutates:
//! the current section, the transition lock, the gesture accumulator, the
//! progress indicator, the viewport animator and the keyed timers. Hosts feed
//! it input events and call [`NavigationSession::tick`] every frame.
//!
//! The lock is the only mutual exclusion. It is set synchronously when a
//! transition starts and released by the `Unlock` timer once the animation
//! duration has elapsed; while it is held, gesture input is suppressed.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::config::{AppConfig, NavigationConfig};
use crate::gesture::{Direction, GestureAccumulator, GestureAction, GestureOutcome};
use crate::progress::{ProgressIndicator, ProgressView};
use crate::scroll::SmoothScroller;
use crate::section::SectionRegistry;
use crate::store::SessionStore;
use crate::timer::Timers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTask {
    /// Forget a partial wheel gesture
    Decay,
    /// Release the transition lock
    Unlock,
}

/// What started a transition; decides its animation length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Gesture,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct NavigationState {
    /// Always within `0..registry.len()`
    current: usize,
    /// Held while a transition animates
    locked: bool,
}

pub struct NavigationSession {
    registry: SectionRegistry,
    state: NavigationState,
    gesture: GestureAccumulator,
    progress: ProgressIndicator,
    scroller: SmoothScroller,
    timers: Timers<SessionTask>,
    store: Box<dyn SessionStore>,
    config: NavigationConfig,
}

impl NavigationSession {
    pub fn new(
        registry: SectionRegistry,
        config: &AppConfig,
        store: Box<dyn SessionStore>,
    ) -> Self {
        Self {
            registry,
            state: NavigationState::default(),
            gesture: GestureAccumulator::new(&config.navigation),
            progress: ProgressIndicator::new(&config.progress),
            scroller: SmoothScroller::new(config.scroll.easing),
            timers: Timers::new(),
            store,
            config: config.navigation.clone(),
        }
    }

    pub fn current(&self) -> usize {
        self.state.current
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }

    pub fn is_animating(&self) -> bool {
        self.scroller.is_animating()
    }

    pub fn viewport_offset(&self) -> f64 {
        self.scroller.position()
    }

    pub fn progress(&self) -> ProgressView {
        self.progress.view()
    }

    pub fn accumulated(&self) -> f64 {
        self.gesture.accumulated()
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Jump to the section saved by an earlier visit in this session.
    ///
    /// A missing, garbled or out-of-range value leaves the session on the
    /// first section. Returns the restored index.
    pub fn restore(&mut self) -> Option<usize> {
        let raw = match self.store.get(&self.config.session_key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read saved section: {}", e);
                return None;
            }
        };

        let index = match raw.trim().parse::<usize>() {
            Ok(index) if index > 0 && index < self.registry.len() => index,
            _ => {
                debug!("Ignoring saved section {:?}", raw);
                return None;
            }
        };

        let offset = self.registry.get(index)?.page_offset();
        self.state.current = index;
        self.scroller.jump(offset);
        info!("Restored section {}", index);
        Some(index)
    }

    /// Recompute geometry after a resize and snap to the current section
    pub fn relayout(&mut self, viewport_height: f64, content_heights: &[f64]) {
        self.registry.layout(viewport_height, content_heights);
        if let Some(section) = self.registry.get(self.state.current) {
            self.scroller.jump(section.page_offset());
        }
    }

    /// Scroll the active section's content, as the host does for `Internal`
    /// gestures. Returns the distance actually scrolled.
    pub fn scroll_active_section(&mut self, delta: f64) -> f64 {
        self.registry
            .get_mut(self.state.current)
            .map(|section| section.scroll_by(delta))
            .unwrap_or(0.0)
    }

    fn active_metrics(&self) -> crate::section::ScrollMetrics {
        self.registry
            .get(self.state.current)
            .map(|s| s.metrics())
            .unwrap_or_default()
    }

    /// Handle a wheel event with vertical delta `delta`
    pub fn wheel(&mut self, delta: f64, now: Instant) -> GestureOutcome {
        if self.state.locked {
            trace!("Wheel suppressed while locked");
            return GestureOutcome::new(GestureAction::Ignored, true);
        }

        let action = self.gesture.wheel(delta, self.active_metrics());
        match action {
            GestureAction::Internal { .. } => {
                self.progress.hide(now);
                return GestureOutcome::new(action, false);
            }
            GestureAction::BoundaryDiscard => {
                debug!("Discarding wheel event at section boundary");
            }
            GestureAction::Accumulating { percent } => {
                self.progress.show(percent);
                self.timers.schedule_in(
                    SessionTask::Decay,
                    now,
                    Duration::from_millis(self.config.decay_ms),
                );
            }
            GestureAction::Triggered { direction, percent } => {
                self.progress.show(percent);
                self.timers.cancel(SessionTask::Decay);
                self.handle_directional_change(direction, now);
            }
            GestureAction::Ignored | GestureAction::Released => {}
        }

        GestureOutcome::new(action, true)
    }

    pub fn touch_start(&mut self, y: f64) -> GestureOutcome {
        if self.state.locked {
            // a touch begun mid-transition must not measure from an older anchor
            self.gesture.cancel_touch();
            return GestureOutcome::new(GestureAction::Ignored, false);
        }
        self.gesture.touch_start(y);
        GestureOutcome::new(GestureAction::Accumulating { percent: 0 }, false)
    }

    pub fn touch_move(&mut self, y: f64, now: Instant) -> GestureOutcome {
        if self.state.locked {
            trace!("Touch move suppressed while locked");
            return GestureOutcome::new(GestureAction::Ignored, true);
        }

        let action = self.gesture.touch_move(y, self.active_metrics());
        match action {
            GestureAction::Internal { .. } => {
                self.progress.hide(now);
                return GestureOutcome::new(action, false);
            }
            GestureAction::Accumulating { percent } => self.progress.show(percent),
            GestureAction::Triggered { direction, percent } => {
                self.progress.show(percent);
                self.handle_directional_change(direction, now);
            }
            GestureAction::BoundaryDiscard | GestureAction::Ignored | GestureAction::Released => {}
        }

        GestureOutcome::new(action, true)
    }

    pub fn touch_end(&mut self, now: Instant) -> GestureOutcome {
        if self.state.locked {
            self.gesture.cancel_touch();
            return GestureOutcome::new(GestureAction::Ignored, false);
        }
        if self.gesture.touch_end() {
            self.progress.hide(now);
        }
        GestureOutcome::new(GestureAction::Released, false)
    }

    /// Move one section in `direction`. The ends of the registry are terminal:
    /// the request only hides the indicator.
    pub fn handle_directional_change(&mut self, direction: Direction, now: Instant) -> bool {
        let current = self.state.current;
        let target = match direction {
            Direction::Forward if current + 1 < self.registry.len() => current + 1,
            Direction::Backward if current > 0 => current - 1,
            _ => {
                debug!("No section {:?} of {}", direction, current);
                self.gesture.reset();
                self.progress.hide(now);
                return false;
            }
        };

        self.transition(target, TransitionKind::Gesture, now);
        self.progress.confirm(now);
        true
    }

    /// Jump to `index` as a nav link does. Works from any index, including the
    /// current one; out of range is ignored.
    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.registry.len() {
            debug!("Ignoring navigation to out-of-range section {}", index);
            return false;
        }
        if self.progress.is_visible() {
            self.progress.hide(now);
        }
        self.transition(index, TransitionKind::Link, now);
        true
    }

    /// Jump to the section whose id matches a nav link target
    pub fn go_to_id(&mut self, id: &str, now: Instant) -> bool {
        match self.registry.position_of(id) {
            Some(index) => self.go_to(index, now),
            None => {
                debug!("Ignoring navigation to unknown section '{}'", id);
                false
            }
        }
    }

    fn transition(&mut self, index: usize, kind: TransitionKind, now: Instant) {
        let duration = Duration::from_millis(match kind {
            TransitionKind::Gesture => self.config.gesture_transition_ms,
            TransitionKind::Link => self.config.link_transition_ms,
        });

        self.state.locked = true;
        self.gesture.reset();
        self.gesture.reanchor_touch();
        self.timers.cancel(SessionTask::Decay);
        self.registry.reset_all_scroll();

        let target = self
            .registry
            .get(index)
            .map(|s| s.page_offset())
            .unwrap_or_default();
        info!(
            "Section {} -> {} ({:?}, {}ms)",
            self.state.current,
            index,
            kind,
            duration.as_millis()
        );
        self.state.current = index;
        self.scroller.animate_to(target, duration, now);
        self.persist(index);
        self.timers.schedule_in(SessionTask::Unlock, now, duration);
    }

    fn persist(&mut self, index: usize) {
        if let Err(e) = self.store.set(&self.config.session_key, &index.to_string()) {
            warn!("Failed to save current section: {}", e);
        }
    }

    /// Fire due timers and advance the animation.
    /// Returns the viewport offset to apply when it moved this frame.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        while let Some((task, at)) = self.timers.pop_due_with_deadline(now) {
            match task {
                SessionTask::Decay => {
                    trace!("Partial gesture decayed");
                    self.gesture.reset();
                    self.progress.hide(at);
                }
                SessionTask::Unlock => {
                    self.state.locked = false;
                    self.gesture.reset();
                }
            }
        }
        self.progress.tick(now);
        self.scroller.frame(now)
    }

    /// Earliest instant at which `tick` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.timers.next_deadline(), self.progress.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const PAGE: f64 = 100.0;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session_with(store: MemoryStore) -> NavigationSession {
        let config = AppConfig::default();
        let mut registry = SectionRegistry::from_config(&config.sections);
        // the third section ("experience") is internally scrollable
        registry.layout(PAGE, &[PAGE, PAGE, 3.0 * PAGE, PAGE, PAGE, PAGE]);
        NavigationSession::new(registry, &config, Box::new(store))
    }

    fn session() -> NavigationSession {
        session_with(MemoryStore::new())
    }

    fn saved(session: &NavigationSession) -> Option<String> {
        session.store().get("lastSection").unwrap()
    }

    #[test]
    fn test_below_threshold_never_changes_section() {
        let t0 = Instant::now();
        let mut session = session();
        for i in 0..3 {
            session.wheel(40.0, t0 + ms(i * 50));
        }
        session.tick(t0 + ms(150));
        assert_eq!(session.current(), 0);
        assert!(!session.is_locked());
        assert!(session.progress().visible);
        assert_eq!(session.progress().fill, 80);

        // decay window passes without further input
        session.tick(t0 + ms(400));
        assert_eq!(session.accumulated(), 0.0);
        assert!(!session.progress().visible);
        assert_eq!(session.current(), 0);
    }

    #[test]
    fn test_reported_percentage() {
        let t0 = Instant::now();
        let mut session = session();
        let outcome = session.wheel(80.0, t0);
        assert_eq!(outcome.action, GestureAction::Accumulating { percent: 53 });
        assert!(outcome.default_prevented);
        assert_eq!(session.current(), 0);
        assert_eq!(session.progress().fill, 53);
    }

    #[test]
    fn test_decay_is_refreshed_by_new_input() {
        let t0 = Instant::now();
        let mut session = session();
        session.wheel(50.0, t0);
        session.wheel(50.0, t0 + ms(250));
        session.tick(t0 + ms(350));
        assert_eq!(session.accumulated(), 100.0);

        session.wheel(50.0, t0 + ms(500));
        assert_eq!(session.current(), 1);
    }

    #[test]
    fn test_threshold_moves_exactly_one_section() {
        let t0 = Instant::now();
        let mut session = session();
        let outcome = session.wheel(400.0, t0);
        assert!(matches!(
            outcome.action,
            GestureAction::Triggered {
                direction: Direction::Forward,
                ..
            }
        ));
        assert_eq!(session.current(), 1);
        assert!(session.is_locked());
        assert_eq!(session.accumulated(), 0.0);
        assert_eq!(session.progress().fill, 100);
        assert_eq!(saved(&session).as_deref(), Some("1"));
    }

    #[test]
    fn test_gesture_transition_animates_and_unlocks() {
        let t0 = Instant::now();
        let mut session = session();
        session.wheel(150.0, t0);

        let mid = session.tick(t0 + ms(600)).unwrap();
        assert!((mid - 50.0).abs() < 1e-6);
        assert!(session.is_locked());

        // confirmation hides the indicator 200ms after the change
        assert!(!session.progress().visible);

        assert_eq!(session.tick(t0 + ms(1200)), Some(PAGE));
        assert!(!session.is_locked());
        assert!(!session.is_animating());
    }

    #[test]
    fn test_locked_input_is_suppressed() {
        let t0 = Instant::now();
        let mut session = session();
        session.wheel(150.0, t0);

        let outcome = session.wheel(500.0, t0 + ms(100));
        assert_eq!(outcome.action, GestureAction::Ignored);
        assert!(outcome.default_prevented);
        assert_eq!(session.accumulated(), 0.0);

        let outcome = session.touch_move(10.0, t0 + ms(100));
        assert_eq!(outcome.action, GestureAction::Ignored);
        assert!(outcome.default_prevented);

        assert_eq!(session.current(), 1);
    }

    #[test]
    fn test_backward_at_first_section_is_noop() {
        let t0 = Instant::now();
        let mut session = session();
        session.wheel(-200.0, t0);
        assert_eq!(session.current(), 0);
        assert!(!session.is_locked());
        assert!(!session.progress().visible);
        assert_eq!(saved(&session), None);
    }

    #[test]
    fn test_forward_at_last_section_is_noop() {
        let t0 = Instant::now();
        let mut session = session();
        assert!(session.go_to(5, t0));
        session.tick(t0 + ms(1000));

        let outcome = session.wheel(300.0, t0 + ms(1100));
        assert!(outcome.default_prevented);
        assert_eq!(session.current(), 5);
        assert!(!session.is_locked());
        session.tick(t0 + ms(2000));
        assert!(!session.progress().visible);
        assert_eq!(session.progress().fill, 0);
    }

    #[test]
    fn test_internal_scroll_then_boundary_discard() {
        let t0 = Instant::now();
        let mut session = session();
        session.go_to_id("experience", t0);
        session.tick(t0 + ms(1000));

        let outcome = session.wheel(50.0, t0 + ms(1100));
        assert_eq!(outcome.action, GestureAction::Internal { delta: 50.0 });
        assert!(!outcome.default_prevented);
        session.scroll_active_section(200.0);

        let outcome = session.wheel(50.0, t0 + ms(1150));
        assert_eq!(outcome.action, GestureAction::BoundaryDiscard);
        assert!(outcome.default_prevented);
        assert_eq!(session.accumulated(), 0.0);

        session.wheel(100.0, t0 + ms(1200));
        session.wheel(50.0, t0 + ms(1250));
        assert_eq!(session.current(), 3);
    }

    #[test]
    fn test_link_navigation_resets_section_scroll() {
        let t0 = Instant::now();
        let mut session = session();
        session.go_to(2, t0);
        session.tick(t0 + ms(1000));
        session.scroll_active_section(120.0);

        assert!(session.go_to_id("#hero", t0 + ms(1100)));
        assert_eq!(session.current(), 0);
        assert!(session
            .registry()
            .iter()
            .all(|s| s.metrics().scroll_top == 0.0));
        assert_eq!(saved(&session).as_deref(), Some("0"));

        // link jumps unlock after 1000ms, not 1200ms
        session.tick(t0 + ms(2099));
        assert!(session.is_locked());
        session.tick(t0 + ms(2100));
        assert!(!session.is_locked());
    }

    #[test]
    fn test_gesture_navigation_resets_section_scroll() {
        let t0 = Instant::now();
        let mut session = session();
        session.go_to(2, t0);
        session.tick(t0 + ms(1000));
        assert_eq!(session.scroll_active_section(200.0), 200.0);

        // already at the bottom, so the wheel counts toward the next section
        let t1 = t0 + ms(1100);
        session.wheel(100.0, t1);
        session.wheel(50.0, t1);
        assert_eq!(session.current(), 3);
        assert!(session
            .registry()
            .iter()
            .all(|s| s.metrics().scroll_top == 0.0));

        // gesture transitions hold the lock for 1200ms
        session.tick(t1 + ms(1199));
        assert!(session.is_locked());
        session.tick(t1 + ms(1200));
        assert!(!session.is_locked());
    }

    #[test]
    fn test_touch_begun_while_locked_starts_fresh() {
        let t0 = Instant::now();
        let mut session = session();
        session.touch_start(500.0);
        session.touch_move(410.0, t0);
        assert_eq!(session.current(), 1);

        // lift and touch down again before the transition finishes
        session.touch_end(t0 + ms(100));
        session.touch_start(800.0);
        session.tick(t0 + ms(1200));
        assert!(!session.is_locked());

        // a short upward drag must not be measured from the old swipe
        let outcome = session.touch_move(790.0, t0 + ms(1300));
        assert_eq!(outcome.action, GestureAction::Accumulating { percent: 0 });
        let outcome = session.touch_move(780.0, t0 + ms(1316));
        assert_eq!(outcome.action, GestureAction::Accumulating { percent: 13 });
        assert_eq!(session.current(), 1);
    }

    #[test]
    fn test_link_to_current_section_is_safe() {
        let t0 = Instant::now();
        let mut session = session();
        assert!(session.go_to(0, t0));
        assert_eq!(session.current(), 0);
        assert_eq!(session.tick(t0 + ms(1000)), Some(0.0));
    }

    #[test]
    fn test_unknown_link_is_ignored() {
        let t0 = Instant::now();
        let mut session = session();
        assert!(!session.go_to_id("blog", t0));
        assert!(!session.go_to(6, t0));
        assert_eq!(session.current(), 0);
        assert!(!session.is_locked());
        assert_eq!(saved(&session), None);
    }

    #[test]
    fn test_touch_gesture_changes_section() {
        let t0 = Instant::now();
        let mut session = session();
        session.touch_start(500.0);
        let outcome = session.touch_move(450.0, t0);
        assert_eq!(outcome.action, GestureAction::Accumulating { percent: 63 });
        session.touch_move(400.0, t0 + ms(16));
        assert_eq!(session.current(), 1);
        assert!(session.is_locked());

        assert_eq!(session.touch_end(t0 + ms(32)).action, GestureAction::Ignored);
    }

    #[test]
    fn test_touch_release_hides_indicator() {
        let t0 = Instant::now();
        let mut session = session();
        session.touch_start(500.0);
        session.touch_move(470.0, t0);
        assert!(session.progress().visible);
        session.touch_end(t0 + ms(10));
        assert!(!session.progress().visible);
        assert_eq!(session.current(), 0);
    }

    #[test]
    fn test_restore_roundtrip() {
        let t0 = Instant::now();
        let mut first = session();
        first.go_to(3, t0);
        let value = saved(&first).unwrap();

        let mut store = MemoryStore::new();
        store.set("lastSection", &value).unwrap();
        let mut reloaded = session_with(store);
        assert_eq!(reloaded.restore(), Some(3));
        assert_eq!(reloaded.current(), 3);
        assert_eq!(reloaded.viewport_offset(), 3.0 * PAGE);
        assert!(!reloaded.is_animating());
        assert!(!reloaded.is_locked());
    }

    #[test]
    fn test_restore_ignores_garbled_values() {
        for raw in ["", "abc", "0", "6", "-2"] {
            let mut store = MemoryStore::new();
            store.set("lastSection", raw).unwrap();
            let mut session = session_with(store);
            assert_eq!(session.restore(), None, "value {:?}", raw);
            assert_eq!(session.current(), 0);
            assert_eq!(session.viewport_offset(), 0.0);
        }
    }

    #[test]
    fn test_relayout_snaps_to_current_section() {
        let t0 = Instant::now();
        let mut session = session();
        session.go_to(2, t0);
        session.relayout(50.0, &[]);
        assert_eq!(session.viewport_offset(), 100.0);
        assert!(!session.is_animating());
    }

    #[test]
    fn test_next_deadline() {
        let t0 = Instant::now();
        let mut session = session();
        assert_eq!(session.next_deadline(), None);
        session.wheel(10.0, t0);
        assert_eq!(session.next_deadline(), Some(t0 + ms(300)));
    }
}
