//! Scroll animation controller
//!
//! Combines easing functions and timing utilities into a restartable,
//! cancelable animation handle.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Instant,
    /// Starting viewport offset
    from: f64,
    /// Target viewport offset
    to: f64,
    /// Animation duration
    duration: Duration,
}

/// Viewport offset animator
///
/// Call `start()` to begin an animation, then `frame()` on every display frame
/// to get the interpolated offset. Starting while another animation is in
/// flight restarts from the instantaneous position.
#[derive(Debug, Clone)]
pub struct SmoothScroller {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    easing: EasingType,
    /// Current viewport offset (always up-to-date)
    position: f64,
}

impl Default for SmoothScroller {
    fn default() -> Self {
        Self::new(EasingType::default())
    }
}

impl SmoothScroller {
    pub fn new(easing: EasingType) -> Self {
        Self {
            animation: None,
            easing,
            position: 0.0,
        }
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Current interpolated viewport offset
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Final offset of the running animation, or the current offset
    pub fn target(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.position)
    }

    /// Set the offset immediately, cancelling any animation
    pub fn jump(&mut self, offset: f64) {
        self.animation = None;
        self.position = offset;
    }

    /// Begin animating from `from` to `to` over `duration`.
    ///
    /// A zero duration or the `None` easing jumps straight to `to`.
    pub fn start(&mut self, from: f64, to: f64, duration: Duration, now: Instant) {
        if duration.is_zero() || self.easing == EasingType::None {
            self.jump(to);
            return;
        }

        self.position = from;
        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to,
            duration,
        });
    }

    /// Animate from the current offset to `to`
    pub fn animate_to(&mut self, to: f64, duration: Duration, now: Instant) {
        let from = self.position;
        self.start(from, to, duration, now);
    }

    /// Advance the animation to `now`.
    ///
    /// Returns the offset to apply for this frame, or `None` when idle.
    /// The frame at or after the end lands exactly on the target and ends the
    /// animation.
    pub fn frame(&mut self, now: Instant) -> Option<f64> {
        let anim = self.animation.as_ref()?;

        if is_complete(anim.start, now, anim.duration) {
            self.position = anim.to;
            self.animation = None;
        } else {
            let t = progress(anim.start, now, anim.duration);
            self.position = lerp(anim.from, anim.to, self.easing.apply(t));
        }

        Some(self.position)
    }

    /// Cancel any active animation and stop at the current offset
    pub fn stop(&mut self) {
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_animation_runs_to_target() {
        let t0 = Instant::now();
        let mut scroller = SmoothScroller::default();
        scroller.start(0.0, 800.0, ms(1200), t0);
        assert!(scroller.is_animating());
        assert_eq!(scroller.target(), 800.0);

        let quarter = scroller.frame(t0 + ms(300)).unwrap();
        assert!((quarter - 800.0 * 0.0625).abs() < 1e-6);

        assert_eq!(scroller.frame(t0 + ms(1200)), Some(800.0));
        assert!(!scroller.is_animating());
        assert_eq!(scroller.frame(t0 + ms(1300)), None);
    }

    #[test]
    fn test_backward_animation() {
        let t0 = Instant::now();
        let mut scroller = SmoothScroller::default();
        scroller.jump(600.0);
        scroller.animate_to(200.0, ms(1000), t0);
        let mid = scroller.frame(t0 + ms(500)).unwrap();
        assert!((mid - 400.0).abs() < 1e-6);
    }

    #[test]
    fn test_restart_uses_instantaneous_position() {
        let t0 = Instant::now();
        let mut scroller = SmoothScroller::new(EasingType::Linear);
        scroller.start(0.0, 1000.0, ms(1000), t0);
        scroller.frame(t0 + ms(400));

        scroller.animate_to(0.0, ms(1000), t0 + ms(400));
        let mid = scroller.frame(t0 + ms(900)).unwrap();
        assert!((mid - 200.0).abs() < 1e-6);
    }

    #[test]
    fn test_stop_keeps_position() {
        let t0 = Instant::now();
        let mut scroller = SmoothScroller::new(EasingType::Linear);
        scroller.start(0.0, 100.0, ms(100), t0);
        scroller.frame(t0 + ms(50));
        scroller.stop();
        assert!(!scroller.is_animating());
        assert!((scroller.position() - 50.0).abs() < 1e-6);
        assert_eq!(scroller.frame(t0 + ms(100)), None);
    }

    #[test]
    fn test_instant_when_disabled() {
        let t0 = Instant::now();
        let mut scroller = SmoothScroller::new(EasingType::None);
        scroller.start(0.0, 300.0, ms(1200), t0);
        assert!(!scroller.is_animating());
        assert_eq!(scroller.position(), 300.0);

        let mut scroller = SmoothScroller::default();
        scroller.start(0.0, 300.0, Duration::ZERO, t0);
        assert_eq!(scroller.position(), 300.0);
    }
}
