use crate::geometry::{Point, Viewport};
use crate::tween::{lerp, Lerp, TweenHandle};
use crate::{Error, Result};

/// Camera transform: a canvas point `p` lands on screen at `p * scale + (x, y)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl CameraPose {
    /// Pose that puts `target` in the middle of the viewport at `scale`
    pub fn framing(target: Point, scale: f64, viewport: Viewport) -> Self {
        let center = viewport.center();
        Self {
            x: -target.x * scale + center.x,
            y: -target.y * scale + center.y,
            scale,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Project a canvas point into screen space
    pub fn to_screen(&self, point: Point) -> Point {
        Point::new(point.x * self.scale + self.x, point.y * self.scale + self.y)
    }
}

impl Lerp for CameraPose {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            scale: lerp(self.scale, to.scale, t),
        }
    }
}

/// Who currently owns the camera transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPhase {
    /// Values are authoritative; direct placement is allowed
    #[default]
    Settled,
    /// A tween is driving the values
    Tweening { handle: TweenHandle },
}

/// The camera transform plus its phase
#[derive(Debug, Clone, Default)]
pub struct CameraState {
    pose: CameraPose,
    phase: CameraPhase,
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    #[inline]
    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    /// True unless a tween is in flight
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.phase == CameraPhase::Settled
    }

    /// Handle of the tween currently driving the camera
    pub fn active_tween(&self) -> Option<TweenHandle> {
        match self.phase {
            CameraPhase::Settled => None,
            CameraPhase::Tweening { handle } => Some(handle),
        }
    }

    /// Hand the camera to a tween; any previous tween loses ownership
    pub fn begin_tween(&mut self, handle: TweenHandle) {
        self.phase = CameraPhase::Tweening { handle };
    }

    /// Write an interpolated pose. Ignored unless `handle` owns the camera.
    pub fn apply_tween_frame(&mut self, handle: TweenHandle, pose: CameraPose) -> bool {
        if self.active_tween() == Some(handle) {
            self.pose = pose;
            true
        } else {
            false
        }
    }

    /// Finish the owning tween at its final pose and settle.
    /// A completion from any other handle is stale and changes nothing.
    pub fn complete_tween(&mut self, handle: TweenHandle, final_pose: CameraPose) -> Result<()> {
        if self.active_tween() != Some(handle) {
            return Err(Error::StaleTweenCompletion(handle.id()));
        }
        self.pose = final_pose;
        self.phase = CameraPhase::Settled;
        Ok(())
    }

    /// Place the camera immediately, dropping any tween ownership
    pub fn settle_at(&mut self, pose: CameraPose) {
        self.pose = pose;
        self.phase = CameraPhase::Settled;
    }

    /// Stop where the camera currently is
    pub fn halt(&mut self) {
        self.phase = CameraPhase::Settled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_centers_target() {
        let viewport = Viewport::new(1000.0, 800.0);
        let target = Point::new(1400.0, 300.0);
        let pose = CameraPose::framing(target, 0.5, viewport);

        assert_eq!(pose, CameraPose { x: -200.0, y: 250.0, scale: 0.5 });
        assert_eq!(pose.to_screen(target), viewport.center());
    }

    #[test]
    fn test_pose_lerp() {
        let from = CameraPose { x: 0.0, y: 10.0, scale: 1.0 };
        let to = CameraPose { x: 100.0, y: 20.0, scale: 0.5 };
        assert_eq!(from.lerp(&to, 0.5), CameraPose { x: 50.0, y: 15.0, scale: 0.75 });
    }

    #[test]
    fn test_phase_transitions() {
        let mut camera = CameraState::new();
        assert!(camera.is_settled());

        let handle = TweenHandle::new(1);
        camera.begin_tween(handle);
        assert!(!camera.is_settled());
        assert_eq!(camera.active_tween(), Some(handle));

        let target = CameraPose { x: 5.0, y: 6.0, scale: 0.5 };
        camera.complete_tween(handle, target).unwrap();
        assert!(camera.is_settled());
        assert_eq!(camera.pose(), target);
    }

    #[test]
    fn test_superseded_tween_cannot_settle_or_write() {
        let mut camera = CameraState::new();
        let first = TweenHandle::new(1);
        let second = TweenHandle::new(2);

        camera.begin_tween(first);
        camera.begin_tween(second);

        let stray = CameraPose { x: 99.0, y: 99.0, scale: 0.1 };
        assert!(!camera.apply_tween_frame(first, stray));
        assert!(matches!(
            camera.complete_tween(first, stray),
            Err(Error::StaleTweenCompletion(1))
        ));
        assert!(!camera.is_settled());
        assert_eq!(camera.pose(), CameraPose::default());
    }

    #[test]
    fn test_settle_at_and_halt() {
        let mut camera = CameraState::new();
        camera.begin_tween(TweenHandle::new(3));
        camera.halt();
        assert!(camera.is_settled());

        let pose = CameraPose { x: 1.0, y: 2.0, scale: 1.0 };
        camera.begin_tween(TweenHandle::new(4));
        camera.settle_at(pose);
        assert!(camera.is_settled());
        assert_eq!(camera.pose(), pose);
    }
}
