use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::cursor::NavigationCursor;
use super::events::NavigationEvent;
use crate::camera::{CameraPose, CameraState, ScaleResolver};
use crate::config::CameraConfig;
use crate::geometry::Viewport;
use crate::history::{frame_fragment, HistoryRouter};
use crate::path::{Keyframe, KeyframePath, PointId};
use crate::store::SharedStore;
use crate::tween::{TweenController, TweenStatus};
use crate::Result;

/// Result of one display tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Camera transform published this tick
    pub pose: CameraPose,
    pub status: TweenStatus,
    /// The camera is settled: the host should request the next paint
    pub animate: bool,
}

/// Moves the cursor along the keyframe path and drives the camera after it
pub struct NavigationEngine {
    path: KeyframePath,
    cursor: NavigationCursor,
    camera: CameraState,
    tween: TweenController,
    resolver: ScaleResolver,
    viewport: Viewport,
    store: SharedStore,
    history: Box<dyn HistoryRouter>,
    event_tx: Option<mpsc::UnboundedSender<NavigationEvent>>,
}

impl NavigationEngine {
    /// Create an engine at frame 0 with the camera at the origin.
    /// Call [`start_at`](Self::start_at) to place it.
    pub fn new(
        path: KeyframePath,
        viewport: Viewport,
        store: SharedStore,
        history: Box<dyn HistoryRouter>,
        config: &CameraConfig,
    ) -> Self {
        let cursor = NavigationCursor::new(0, path.keys()[0].point_id);
        Self {
            path,
            cursor,
            camera: CameraState::new(),
            tween: TweenController::new(config),
            resolver: ScaleResolver,
            viewport,
            store,
            history,
            event_tx: None,
        }
    }

    /// Set the event sender for cursor and camera notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<NavigationEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Place the camera on `frame` without animating.
    /// The history is left alone since the frame came from it.
    pub fn start_at(&mut self, frame: usize) -> Result<()> {
        let key = *self.path.key(frame)?;
        self.cursor = NavigationCursor::new(frame, key.point_id);
        self.store.set_current_frame(frame);

        let target = self.target_pose(&key);
        self.tween.snap_to(&mut self.camera, target);
        self.store.publish_pose(self.camera.pose());

        debug!(frame, scale = target.scale, "Camera placed");
        Ok(())
    }

    pub fn path(&self) -> &KeyframePath {
        &self.path
    }

    pub fn cursor(&self) -> NavigationCursor {
        self.cursor
    }

    pub fn current_key(&self) -> usize {
        self.cursor.current_key
    }

    pub fn current_keyframe(&self) -> &Keyframe {
        &self.path.keys()[self.cursor.current_key]
    }

    pub fn frame_count(&self) -> usize {
        self.path.len()
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn is_settled(&self) -> bool {
        self.camera.is_settled()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn history(&self) -> &dyn HistoryRouter {
        self.history.as_ref()
    }

    pub fn tween_duration(&self) -> Duration {
        self.tween.duration()
    }

    /// Move to the next keyframe; stays put on the last one
    pub fn advance(&mut self) {
        let next = self.cursor.next_key(self.path.last_index());
        self.move_to(next);
    }

    /// Move to the previous keyframe; stays put on the first one
    pub fn retreat(&mut self) {
        let previous = self.cursor.previous_key();
        self.move_to(previous);
    }

    /// Jump to an explicit frame
    pub fn go_to(&mut self, frame: usize) -> Result<()> {
        self.path.key(frame)?;
        self.move_to(frame);
        Ok(())
    }

    /// Select the keyframe whose point id is closest to `reference`
    pub fn snap_to_closest(&mut self, reference: PointId) {
        let index = self.path.closest(reference);
        self.move_to(index);
    }

    /// Record a free-scroll position along the path without moving the cursor
    pub fn set_path_position(&mut self, position: PointId) {
        self.cursor.current_position = position;
    }

    /// Snap to the keyframe closest to the cursor's own path position
    pub fn snap_to_current_position(&mut self) {
        self.snap_to_closest(self.cursor.current_position);
    }

    /// Re-fit the current keyframe after the viewport changed
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.send_event(NavigationEvent::Refit {
            width: viewport.width,
            height: viewport.height,
        });
        self.tween_to_current();
    }

    /// Stop any tween and settle where the camera is
    pub fn cancel_tween(&mut self) {
        self.tween.cancel(&mut self.camera);
    }

    /// Advance the camera by one display tick and publish the result
    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        let status = self.tween.update(&mut self.camera, dt);
        if status == TweenStatus::Completed {
            self.send_event(NavigationEvent::Settled {
                frame: self.cursor.current_key,
            });
        }

        let pose = self.camera.pose();
        self.store.publish_pose(pose);

        TickOutcome {
            pose,
            status,
            animate: self.camera.is_settled(),
        }
    }

    /// Camera pose that frames `key` in the current viewport
    pub fn target_pose(&self, key: &Keyframe) -> CameraPose {
        let scale = self.resolver.resolve(key.cell.size(), self.viewport);
        CameraPose::framing(key.anchor, scale, self.viewport)
    }

    fn move_to(&mut self, index: usize) {
        let point_id = self.path.keys()[index].point_id;
        self.cursor = NavigationCursor::new(index, point_id);

        self.store.set_current_frame(index);
        self.history.navigate(&frame_fragment(index));
        self.send_event(NavigationEvent::FrameChanged {
            frame: index,
            total: self.path.len(),
        });

        debug!(frame = index, point_id, "Cursor moved");
        self.tween_to_current();
    }

    fn tween_to_current(&mut self) {
        let key = *self.current_keyframe();
        let target = self.target_pose(&key);
        self.tween.tween_to(&mut self.camera, target);
    }

    fn send_event(&self, event: NavigationEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send navigation event: receiver dropped");
            }
        }
    }
}
