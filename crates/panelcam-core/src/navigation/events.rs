/// Notifications sent to an observer of the navigation engine
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    /// The cursor moved to a new frame (also sent when re-selecting the same one)
    FrameChanged { frame: usize, total: usize },
    /// The viewport changed and the camera is re-fitting the current frame
    Refit { width: f64, height: f64 },
    /// The active tween reached its target
    Settled { frame: usize },
}
