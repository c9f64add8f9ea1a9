//! Maps raw input events to navigation intents.
//!
//! Hosts translate their native events into [`InputEvent`] and hand them to
//! [`InputDispatcher::dispatch`]. The mapping itself is the pure
//! [`InputDispatcher::intent_for`], so it can be checked without an engine.

use tracing::trace;

use crate::config::InputConfig;
use crate::geometry::Viewport;
use crate::navigation::NavigationEngine;

const KEY_CODE_ARROW_LEFT: u32 = 37;
const KEY_CODE_ARROW_RIGHT: u32 = 39;

/// Keys the dispatcher distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(u32),
}

impl Key {
    /// Key from a DOM-style key code
    pub fn from_code(code: u32) -> Self {
        match code {
            KEY_CODE_ARROW_LEFT => Key::ArrowLeft,
            KEY_CODE_ARROW_RIGHT => Key::ArrowRight,
            other => Key::Other(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Key::ArrowLeft => KEY_CODE_ARROW_LEFT,
            Key::ArrowRight => KEY_CODE_ARROW_RIGHT,
            Key::Other(code) => *code,
        }
    }
}

/// Normalized input, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click { x: f64, y: f64 },
    TouchStart { x: f64, y: f64 },
    TouchMove { x: f64, y: f64 },
    TouchEnd,
    KeyDown(Key),
    Wheel { delta_x: f64, delta_y: f64 },
    Resize(Viewport),
    OrientationChange(Viewport),
}

/// What an event asks the engine to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Advance,
    Retreat,
    /// Re-fit the current keyframe to a new viewport
    Refit(Viewport),
    /// Stop the camera where it is
    Halt,
    Ignore,
}

/// Result of dispatching one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatch {
    pub intent: Intent,
    /// The host should not run its default handling (page scroll)
    pub suppress_default: bool,
}

impl Dispatch {
    fn plain(intent: Intent) -> Self {
        Self {
            intent,
            suppress_default: false,
        }
    }
}

/// Turns input events into engine calls
#[derive(Debug, Clone, Copy)]
pub struct InputDispatcher {
    wheel_threshold: f64,
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

impl InputDispatcher {
    pub fn new(wheel_threshold: f64) -> Self {
        Self { wheel_threshold }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(config.wheel_threshold)
    }

    pub fn wheel_threshold(&self) -> f64 {
        self.wheel_threshold
    }

    /// Decide what `event` means given the viewport and whether the camera is
    /// settled. Only wheel input depends on `settled`.
    pub fn intent_for(&self, event: &InputEvent, viewport: Viewport, settled: bool) -> Dispatch {
        match *event {
            InputEvent::Click { x, .. } | InputEvent::TouchStart { x, .. } => {
                Dispatch::plain(side_intent(viewport, x))
            }
            InputEvent::KeyDown(Key::ArrowRight) => Dispatch::plain(Intent::Advance),
            InputEvent::KeyDown(Key::ArrowLeft) => Dispatch::plain(Intent::Retreat),
            InputEvent::KeyDown(Key::Other(_)) | InputEvent::TouchMove { .. } | InputEvent::TouchEnd => {
                Dispatch::plain(Intent::Ignore)
            }
            InputEvent::Wheel { delta_x, delta_y } => {
                if !settled {
                    return Dispatch::plain(Intent::Ignore);
                }
                Dispatch {
                    intent: self.wheel_intent(delta_x, delta_y),
                    suppress_default: true,
                }
            }
            InputEvent::Resize(viewport) | InputEvent::OrientationChange(viewport) => {
                Dispatch::plain(Intent::Refit(viewport))
            }
        }
    }

    /// Apply `event` to the engine
    pub fn dispatch(&self, engine: &mut NavigationEngine, event: InputEvent) -> Dispatch {
        let dispatch = self.intent_for(&event, engine.viewport(), engine.is_settled());
        trace!(?event, intent = ?dispatch.intent, "Input dispatched");

        // Accepted wheel input always stops the camera before moving it
        if matches!(event, InputEvent::Wheel { .. }) && dispatch.suppress_default {
            engine.cancel_tween();
        }

        match dispatch.intent {
            Intent::Advance => engine.advance(),
            Intent::Retreat => engine.retreat(),
            Intent::Refit(viewport) => engine.resize(viewport),
            Intent::Halt | Intent::Ignore => {}
        }

        dispatch
    }

    fn wheel_intent(&self, delta_x: f64, delta_y: f64) -> Intent {
        let threshold = self.wheel_threshold;
        if delta_y < -threshold || delta_x < -threshold {
            Intent::Advance
        } else if delta_y > threshold || delta_x > threshold {
            Intent::Retreat
        } else {
            Intent::Halt
        }
    }
}

/// Right half advances, left half (including the midline) retreats
fn side_intent(viewport: Viewport, x: f64) -> Intent {
    if viewport.is_right_half(x) {
        Intent::Advance
    } else {
        Intent::Retreat
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::camera::CameraPose;
    use crate::cell::Cell;
    use crate::config::CameraConfig;
    use crate::history::MemoryHistory;
    use crate::path::{Keyframe, KeyframePath};
    use crate::store::SharedStore;

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };

    fn intent(event: InputEvent, settled: bool) -> Dispatch {
        InputDispatcher::default().intent_for(&event, VIEWPORT, settled)
    }

    fn engine() -> NavigationEngine {
        let keys = (0..3)
            .map(|i| Keyframe::new(i as f64 * 10.0, Cell::new(i as f64 * 900.0, 0.0, 800.0, 600.0)))
            .collect();
        let mut engine = NavigationEngine::new(
            KeyframePath::new(keys).unwrap(),
            VIEWPORT,
            SharedStore::new(),
            Box::new(MemoryHistory::new()),
            &CameraConfig::default(),
        );
        engine.start_at(1).unwrap();
        engine
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code(37), Key::ArrowLeft);
        assert_eq!(Key::from_code(39), Key::ArrowRight);
        assert_eq!(Key::from_code(40), Key::Other(40));
        assert_eq!(Key::ArrowRight.code(), 39);
    }

    #[test]
    fn test_click_sides() {
        assert_eq!(intent(InputEvent::Click { x: 501.0, y: 0.0 }, true).intent, Intent::Advance);
        assert_eq!(intent(InputEvent::Click { x: 500.0, y: 0.0 }, true).intent, Intent::Retreat);
        assert_eq!(intent(InputEvent::Click { x: 10.0, y: 0.0 }, false).intent, Intent::Retreat);
        assert_eq!(intent(InputEvent::TouchStart { x: 900.0, y: 5.0 }, false).intent, Intent::Advance);
        assert_eq!(intent(InputEvent::TouchStart { x: 499.0, y: 5.0 }, true).intent, Intent::Retreat);
    }

    #[test]
    fn test_keys_and_ignored_events() {
        assert_eq!(intent(InputEvent::KeyDown(Key::ArrowRight), false).intent, Intent::Advance);
        assert_eq!(intent(InputEvent::KeyDown(Key::ArrowLeft), true).intent, Intent::Retreat);
        assert_eq!(intent(InputEvent::KeyDown(Key::Other(32)), true).intent, Intent::Ignore);
        assert_eq!(intent(InputEvent::TouchMove { x: 1.0, y: 1.0 }, true).intent, Intent::Ignore);
        assert_eq!(intent(InputEvent::TouchEnd, true).intent, Intent::Ignore);
    }

    #[test]
    fn test_wheel_thresholds() {
        let wheel = |delta_x, delta_y| intent(InputEvent::Wheel { delta_x, delta_y }, true);

        assert_eq!(wheel(0.0, -121.0).intent, Intent::Advance);
        assert_eq!(wheel(-121.0, 0.0).intent, Intent::Advance);
        assert_eq!(wheel(0.0, 121.0).intent, Intent::Retreat);
        assert_eq!(wheel(121.0, 0.0).intent, Intent::Retreat);

        let small = wheel(0.0, -120.0);
        assert_eq!(small.intent, Intent::Halt);
        assert!(small.suppress_default);
        assert!(wheel(0.0, -240.0).suppress_default);
    }

    #[test]
    fn test_wheel_ignored_while_tweening() {
        let dispatch = intent(
            InputEvent::Wheel {
                delta_x: 0.0,
                delta_y: -500.0,
            },
            false,
        );
        assert_eq!(dispatch.intent, Intent::Ignore);
        assert!(!dispatch.suppress_default);
    }

    #[test]
    fn test_resize_refits() {
        let viewport = Viewport::new(640.0, 480.0);
        assert_eq!(intent(InputEvent::Resize(viewport), false).intent, Intent::Refit(viewport));
        assert_eq!(
            intent(InputEvent::OrientationChange(viewport), true).intent,
            Intent::Refit(viewport)
        );
    }

    #[test]
    fn test_dispatch_drives_engine() {
        let dispatcher = InputDispatcher::default();
        let mut engine = engine();

        dispatcher.dispatch(&mut engine, InputEvent::KeyDown(Key::ArrowRight));
        assert_eq!(engine.current_key(), 2);

        // Clicks are not gated by the running tween
        dispatcher.dispatch(&mut engine, InputEvent::Click { x: 100.0, y: 0.0 });
        assert_eq!(engine.current_key(), 1);

        // Wheel is dropped mid-tween
        let dispatch = dispatcher.dispatch(
            &mut engine,
            InputEvent::Wheel {
                delta_x: 0.0,
                delta_y: -300.0,
            },
        );
        assert_eq!(dispatch.intent, Intent::Ignore);
        assert_eq!(engine.current_key(), 1);

        engine.tick(Duration::from_secs(1));
        assert!(engine.is_settled());

        dispatcher.dispatch(
            &mut engine,
            InputEvent::Wheel {
                delta_x: 0.0,
                delta_y: -300.0,
            },
        );
        assert_eq!(engine.current_key(), 2);
    }

    #[test]
    fn test_small_wheel_leaves_camera_settled() {
        let dispatcher = InputDispatcher::default();
        let mut engine = engine();
        let before = engine.camera().pose();

        let dispatch = dispatcher.dispatch(
            &mut engine,
            InputEvent::Wheel {
                delta_x: 30.0,
                delta_y: 0.0,
            },
        );
        assert!(dispatch.suppress_default);
        assert!(engine.is_settled());
        assert_eq!(engine.current_key(), 1);
        assert_eq!(engine.camera().pose(), before);
        assert_ne!(before, CameraPose::default());
    }
}
