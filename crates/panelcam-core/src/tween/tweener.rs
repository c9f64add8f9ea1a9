//! L3 Molecular Layer: Handle-based tween primitive
//!
//! `animate()` registers an interpolation and returns a [`TweenHandle`];
//! `update()` advances every live tween by the elapsed tick time and reports
//! the interpolated values. Cancelled handles simply stop appearing.
//!
//! Each tween carries its own easing curve. `EasingType::None` holds the start
//! value until the finishing tick, so the camera jumps once at the end.

use std::time::Duration;

use super::timing::{progress, Lerp};
use crate::config::EasingType;

/// Identifies one tween for its whole life. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

impl TweenHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Interpolated output of one tween for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame<T> {
    pub handle: TweenHandle,
    pub value: T,
    /// Set on the tick that reaches the end; `value` is then exactly the target
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct ActiveTween<T> {
    handle: TweenHandle,
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    easing: EasingType,
}

impl<T: Lerp> ActiveTween<T> {
    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Interpolated value at the current elapsed time
    fn value(&self) -> T {
        if self.is_done() {
            return self.to;
        }
        let t = eased(self.easing, progress(self.elapsed, self.duration));
        self.from.lerp(&self.to, t)
    }
}

/// Map linear progress in [0, 1] onto the tween's curve. Out-of-range input is clamped.
fn eased(easing: EasingType, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        EasingType::None => t.floor(),
        EasingType::Linear => t,
        EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
        EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
        // 2^-10 is not quite zero, so pin the end
        EasingType::EaseOut if t >= 1.0 => 1.0,
        EasingType::EaseOut => 1.0 - (-10.0 * t).exp2(),
    }
}

/// Tween primitive driving any number of independent interpolations
#[derive(Debug, Clone)]
pub struct Tweener<T> {
    next_id: u64,
    active: Vec<ActiveTween<T>>,
}

impl<T> Default for Tweener<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            active: Vec::new(),
        }
    }
}

impl<T: Lerp> Tweener<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start interpolating from `from` to `to` over `duration`
    pub fn animate(&mut self, from: T, to: T, duration: Duration, easing: EasingType) -> TweenHandle {
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;

        self.active.push(ActiveTween {
            handle,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        });

        handle
    }

    /// Drop every live tween, returning how many were cancelled
    pub fn cancel_all(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Advance all tweens by `dt`. Finished tweens are reported once and removed.
    pub fn update(&mut self, dt: Duration) -> Vec<TweenFrame<T>> {
        let frames = self
            .active
            .iter_mut()
            .map(|tween| {
                tween.elapsed = tween.elapsed.saturating_add(dt);
                TweenFrame {
                    handle: tween.handle,
                    value: tween.value(),
                    finished: tween.is_done(),
                }
            })
            .collect();

        self.active.retain(|tween| !tween.is_done());
        frames
    }
}
