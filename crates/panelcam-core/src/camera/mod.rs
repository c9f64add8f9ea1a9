mod scale;
mod state;

pub use scale::ScaleResolver;
pub use state::{CameraPhase, CameraPose, CameraState};
