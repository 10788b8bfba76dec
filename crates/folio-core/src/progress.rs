//! Progress indicator driver.
//!
//! Purely reactive: renders accumulated gesture intent as a 0-100% fill and
//! runs the show / hide / reset choreography on keyed timers.

use std::time::{Duration, Instant};

use crate::config::ProgressConfig;
use crate::timer::Timers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressTask {
    /// Fade out after a 100% confirmation
    ConfirmHide,
    /// Snap the fill back to zero once the fade-out has finished
    FillReset,
    /// Re-enable fill transitions after a reset
    TransitionRestore,
}

/// What a host needs to draw the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressView {
    pub visible: bool,
    /// Fill percentage, 0-100
    pub fill: u8,
    /// When false the fill must change without animating
    pub transitions_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    visible: bool,
    fill: u8,
    transitions_enabled: bool,
    confirm_hide: Duration,
    fill_reset: Duration,
    transition_restore: Duration,
    timers: Timers<ProgressTask>,
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::new(&ProgressConfig::default())
    }
}

impl ProgressIndicator {
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            visible: false,
            fill: 0,
            transitions_enabled: true,
            confirm_hide: Duration::from_millis(config.confirm_hide_ms),
            fill_reset: Duration::from_millis(config.fill_reset_ms),
            transition_restore: Duration::from_millis(config.transition_restore_ms),
            timers: Timers::new(),
        }
    }

    pub fn view(&self) -> ProgressView {
        ProgressView {
            visible: self.visible,
            fill: self.fill,
            transitions_enabled: self.transitions_enabled,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn fill(&self) -> u8 {
        self.fill
    }

    /// Make the indicator visible with the given fill (clamped to 100)
    pub fn show(&mut self, percent: u8) {
        self.visible = true;
        self.fill = percent.min(100);
        // an older hide must not wipe a fresh fill
        self.timers.cancel(ProgressTask::FillReset);
        self.timers.cancel(ProgressTask::ConfirmHide);
    }

    /// Fade out, then reset the fill once the fade has finished
    pub fn hide(&mut self, now: Instant) {
        self.visible = false;
        self.timers.cancel(ProgressTask::ConfirmHide);
        self.timers.schedule_in(ProgressTask::FillReset, now, self.fill_reset);
    }

    /// Snap to 100% as confirmation of a section change, then hide shortly after
    pub fn confirm(&mut self, now: Instant) {
        self.fill = 100;
        self.timers.cancel(ProgressTask::FillReset);
        self.timers.schedule_in(ProgressTask::ConfirmHide, now, self.confirm_hide);
    }

    /// Fire due choreography steps. Returns whether the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.view();
        while let Some((task, at)) = self.timers.pop_due_with_deadline(now) {
            match task {
                ProgressTask::ConfirmHide => self.hide(at),
                ProgressTask::FillReset => {
                    self.transitions_enabled = false;
                    self.fill = 0;
                    self.timers
                        .schedule_in(ProgressTask::TransitionRestore, at, self.transition_restore);
                }
                ProgressTask::TransitionRestore => self.transitions_enabled = true,
            }
        }
        self.view() != before
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}
