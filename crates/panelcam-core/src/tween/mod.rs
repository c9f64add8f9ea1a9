//! Camera tweening
//!
//! Time-sliced interpolation of camera values between keyframes.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `timing` - Progress and interpolation helpers
//!
//! ## L3 Molecular Layer
//! - `tweener` - Handle-based tween primitive with per-tween easing curves
//! - `controller` - Owns the camera's single active tween
//!
//! # Usage
//!
//! ```ignore
//! let mut controller = TweenController::new(&config.camera);
//! controller.tween_to(&mut camera, target);
//!
//! // Once per display tick
//! let status = controller.update(&mut camera, dt);
//! ```

// L4 Atomic Layer
pub mod timing;

// L3 Molecular Layer
pub mod controller;
pub mod tweener;

pub use controller::{TweenController, TweenStatus};
pub use timing::{lerp, progress, Lerp};
pub use tweener::{TweenFrame, TweenHandle, Tweener};
