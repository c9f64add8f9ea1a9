//! L3 Molecular Layer: Camera tween controller
//!
//! Wraps the tween primitive so the camera has at most one active tween.
//! Starting a tween cancels the previous one in the same call, and only the
//! current tween's completion settles the camera.

use std::time::Duration;

use tracing::debug;

use super::tweener::{TweenHandle, Tweener};
use crate::camera::{CameraPose, CameraState};
use crate::config::{CameraConfig, EasingType};

/// What a tick did to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenStatus {
    /// No tween owns the camera
    Idle,
    /// The active tween moved the camera and is still running
    Running,
    /// The active tween reached its target and the camera settled
    Completed,
}

/// Animates a [`CameraState`] toward target poses
#[derive(Debug, Clone)]
pub struct TweenController {
    tweener: Tweener<CameraPose>,
    duration: Duration,
    easing: EasingType,
    smooth: bool,
}

impl Default for TweenController {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl TweenController {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            tweener: Tweener::new(),
            duration: config.tween_duration(),
            easing: config.easing,
            smooth: config.is_smooth(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Begin animating the camera toward `target`, superseding any tween in flight.
    ///
    /// With smooth motion disabled the camera is placed immediately and no
    /// handle is returned.
    pub fn tween_to(&mut self, camera: &mut CameraState, target: CameraPose) -> Option<TweenHandle> {
        let cancelled = self.tweener.cancel_all();

        if !self.smooth {
            camera.settle_at(target);
            return None;
        }

        let handle = self
            .tweener
            .animate(camera.pose(), target, self.duration, self.easing);
        camera.begin_tween(handle);

        debug!(
            handle = handle.id(),
            superseded = cancelled,
            x = target.x,
            y = target.y,
            scale = target.scale,
            "Camera tween started"
        );

        Some(handle)
    }

    /// Place the camera at `target` without interpolation
    pub fn snap_to(&mut self, camera: &mut CameraState, target: CameraPose) {
        self.tweener.cancel_all();
        camera.settle_at(target);
    }

    /// Stop any tween and leave the camera where it currently is
    pub fn cancel(&mut self, camera: &mut CameraState) {
        if self.tweener.cancel_all() > 0 {
            debug!("Camera tween cancelled");
        }
        camera.halt();
    }

    /// Advance the active tween by `dt` and write its value into the camera
    pub fn update(&mut self, camera: &mut CameraState, dt: Duration) -> TweenStatus {
        let mut status = TweenStatus::Idle;

        for frame in self.tweener.update(dt) {
            if frame.finished {
                match camera.complete_tween(frame.handle, frame.value) {
                    Ok(()) => {
                        debug!(handle = frame.handle.id(), "Camera tween completed");
                        status = TweenStatus::Completed;
                    }
                    Err(e) => debug!(error = %e, "Discarding superseded tween"),
                }
            } else if camera.apply_tween_frame(frame.handle, frame.value) {
                status = TweenStatus::Running;
            }
        }

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_config() -> CameraConfig {
        CameraConfig {
            easing: EasingType::Linear,
            ..Default::default()
        }
    }

    fn pose(x: f64, y: f64, scale: f64) -> CameraPose {
        CameraPose { x, y, scale }
    }

    #[test]
    fn test_tween_runs_then_settles_on_target() {
        let mut controller = TweenController::new(&linear_config());
        let mut camera = CameraState::new();
        let target = pose(100.0, -40.0, 0.5);

        controller.tween_to(&mut camera, target);
        assert!(!camera.is_settled());

        assert_eq!(controller.update(&mut camera, Duration::from_millis(250)), TweenStatus::Running);
        assert_eq!(camera.pose(), pose(50.0, -20.0, 0.75));
        assert!(!camera.is_settled());

        assert_eq!(controller.update(&mut camera, Duration::from_millis(250)), TweenStatus::Completed);
        assert!(camera.is_settled());
        assert_eq!(camera.pose(), target);

        assert_eq!(controller.update(&mut camera, Duration::from_millis(16)), TweenStatus::Idle);
    }

    #[test]
    fn test_second_tween_supersedes_first() {
        let mut controller = TweenController::new(&linear_config());
        let mut camera = CameraState::new();

        let first = controller.tween_to(&mut camera, pose(100.0, 0.0, 1.0)).unwrap();
        controller.update(&mut camera, Duration::from_millis(400));
        assert!(!camera.is_settled());

        let second = controller.tween_to(&mut camera, pose(-100.0, 0.0, 1.0)).unwrap();
        assert_ne!(first, second);
        assert_eq!(camera.active_tween(), Some(second));

        // The first tween's deadline passes without settling anything
        assert_eq!(controller.update(&mut camera, Duration::from_millis(100)), TweenStatus::Running);
        assert!(!camera.is_settled());

        assert_eq!(controller.update(&mut camera, Duration::from_millis(400)), TweenStatus::Completed);
        assert!(camera.is_settled());
        assert_eq!(camera.pose(), pose(-100.0, 0.0, 1.0));
    }

    #[test]
    fn test_second_tween_starts_from_interpolated_pose() {
        let mut controller = TweenController::new(&linear_config());
        let mut camera = CameraState::new();
        camera.settle_at(pose(0.0, 0.0, 1.0));

        controller.tween_to(&mut camera, pose(100.0, 0.0, 1.0));
        controller.update(&mut camera, Duration::from_millis(250));
        controller.tween_to(&mut camera, pose(0.0, 0.0, 1.0));

        controller.update(&mut camera, Duration::from_millis(250));
        // Halfway between 50 and 0
        assert!((camera.pose().x - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_to_settles_immediately() {
        let mut controller = TweenController::new(&linear_config());
        let mut camera = CameraState::new();

        controller.tween_to(&mut camera, pose(10.0, 10.0, 1.0));
        controller.snap_to(&mut camera, pose(5.0, 5.0, 0.5));

        assert!(camera.is_settled());
        assert_eq!(camera.pose(), pose(5.0, 5.0, 0.5));
        assert_eq!(controller.update(&mut camera, Duration::from_secs(1)), TweenStatus::Idle);
        assert_eq!(camera.pose(), pose(5.0, 5.0, 0.5));
    }

    #[test]
    fn test_cancel_stops_mid_flight() {
        let mut controller = TweenController::new(&linear_config());
        let mut camera = CameraState::new();
        camera.settle_at(pose(0.0, 0.0, 1.0));

        controller.tween_to(&mut camera, pose(100.0, 0.0, 1.0));
        controller.update(&mut camera, Duration::from_millis(250));
        controller.cancel(&mut camera);

        assert!(camera.is_settled());
        assert!((camera.pose().x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_disabled_smoothing_jumps() {
        let config = CameraConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut controller = TweenController::new(&config);
        let mut camera = CameraState::new();

        assert!(controller.tween_to(&mut camera, pose(7.0, 8.0, 0.5)).is_none());
        assert!(camera.is_settled());
        assert_eq!(camera.pose(), pose(7.0, 8.0, 0.5));
    }
}
