//! Smooth scroll animator for section transitions
//!
//! Animates the viewport offset from its current position to a section's page
//! offset. Frames are driven by the host's per-frame callback: call
//! `SmoothScroller::frame(now)` once per frame and apply the returned offset.
//!
//! # Layers
//!
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation helpers
//! - `animation` - The restartable, cancelable animation handle
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use folio_core::scroll::SmoothScroller;
//! use folio_core::EasingType;
//!
//! let t0 = Instant::now();
//! let mut scroller = SmoothScroller::new(EasingType::EaseInOutCubic);
//! scroller.start(0.0, 400.0, Duration::from_millis(1200), t0);
//!
//! let offset = scroller.frame(t0 + Duration::from_millis(600)).unwrap();
//! assert!((offset - 200.0).abs() < 1e-6);
//! ```

pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::SmoothScroller;
pub use easing::EasingTypeExt;
