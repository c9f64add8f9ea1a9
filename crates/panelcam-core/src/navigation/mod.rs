mod cursor;
mod engine;
mod events;

pub use cursor::NavigationCursor;
pub use engine::{NavigationEngine, TickOutcome};
pub use events::NavigationEvent;
