pub mod config;
pub mod error;
pub mod gesture;
pub mod navigation;
pub mod progress;
pub mod scroll;
pub mod section;
pub mod slideshow;
pub mod store;
pub mod timer;
pub mod typewriter;
pub mod visibility;

pub use config::{AppConfig, EasingType};
pub use error::{Error, Result};
pub use gesture::{Direction, GestureAction, GestureOutcome};
pub use navigation::NavigationSession;
pub use section::SectionRegistry;
pub use store::{FileStore, MemoryStore, SessionStore};
