//! Portrait slideshow: cycles the active slide on a fixed interval.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Slideshow {
    count: usize,
    index: usize,
    interval: Duration,
    next_advance: Option<Instant>,
}

impl Slideshow {
    pub fn new(count: usize, interval: Duration) -> Self {
        Self {
            count,
            index: 0,
            interval,
            next_advance: None,
        }
    }

    /// Begin rotating. A single slide (or none) never rotates.
    pub fn start(&mut self, now: Instant) {
        if self.count > 1 && !self.interval.is_zero() {
            self.next_advance = Some(now + self.interval);
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_advance
    }

    /// Advance for every interval elapsed by `now`. Returns whether the slide changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(at) = self.next_advance.filter(|at| *at <= now) {
            self.index = (self.index + 1) % self.count;
            self.next_advance = Some(at + self.interval);
            changed = true;
        }
        changed
    }
}
