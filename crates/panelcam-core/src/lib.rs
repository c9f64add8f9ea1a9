pub mod camera;
pub mod cell;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod navigation;
pub mod path;
pub mod session;
pub mod store;
pub mod tween;

pub use camera::{CameraPhase, CameraPose, CameraState, ScaleResolver};
pub use cell::{Cell, CellSource};
pub use config::{AppConfig, EasingType};
pub use error::{Error, Result};
pub use geometry::{Point, Size, Viewport};
pub use history::{FileHistory, HistoryRouter, MemoryHistory};
pub use input::{InputDispatcher, InputEvent, Intent, Key};
pub use navigation::{NavigationCursor, NavigationEngine, NavigationEvent, TickOutcome};
pub use path::{CenterLinePath, Keyframe, KeyframePath, PathBuilder, PointId};
pub use session::{Session, SessionBuilder};
pub use store::{SharedStore, StoreKey, StoreSnapshot};
pub use tween::{TweenController, TweenStatus};
