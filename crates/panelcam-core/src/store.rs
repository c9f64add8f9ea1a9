//! Shared key-value store for camera and frame state.
//!
//! The store is an explicit context object handed to whoever publishes or
//! reads camera values. It is backed by a `tokio::sync::watch` channel, so
//! renderers and other tasks can `subscribe()` and await changes.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::camera::CameraPose;

/// Keys understood by [`SharedStore::get`] / [`SharedStore::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    CurrentFrame,
    X,
    Y,
    Scale,
}

impl StoreKey {
    pub fn name(&self) -> &'static str {
        match self {
            StoreKey::CurrentFrame => "currentFrame",
            StoreKey::X => "x",
            StoreKey::Y => "y",
            StoreKey::Scale => "scale",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the store holds, as seen by subscribers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreSnapshot {
    pub current_frame: usize,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            current_frame: 0,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl StoreSnapshot {
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            x: self.x,
            y: self.y,
            scale: self.scale,
        }
    }
}

/// Cheaply cloneable handle to one store
#[derive(Clone)]
pub struct SharedStore {
    tx: Arc<watch::Sender<StoreSnapshot>>,
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedStore").field(&self.snapshot()).finish()
    }
}

impl SharedStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StoreSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        *self.tx.borrow()
    }

    /// Receive every change made through any handle of this store
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.tx.subscribe()
    }

    pub fn get(&self, key: StoreKey) -> f64 {
        let snapshot = self.snapshot();
        match key {
            StoreKey::CurrentFrame => snapshot.current_frame as f64,
            StoreKey::X => snapshot.x,
            StoreKey::Y => snapshot.y,
            StoreKey::Scale => snapshot.scale,
        }
    }

    /// Set one value. A frame value is truncated to a non-negative index.
    pub fn set(&self, key: StoreKey, value: f64) {
        self.tx.send_modify(|snapshot| match key {
            StoreKey::CurrentFrame => snapshot.current_frame = value.max(0.0) as usize,
            StoreKey::X => snapshot.x = value,
            StoreKey::Y => snapshot.y = value,
            StoreKey::Scale => snapshot.scale = value,
        });
    }

    pub fn current_frame(&self) -> usize {
        self.tx.borrow().current_frame
    }

    pub fn set_current_frame(&self, frame: usize) {
        self.tx.send_if_modified(|snapshot| {
            let changed = snapshot.current_frame != frame;
            snapshot.current_frame = frame;
            changed
        });
    }

    /// Publish the camera transform
    pub fn publish_pose(&self, pose: CameraPose) {
        self.tx.send_if_modified(|snapshot| {
            let changed = snapshot.x != pose.x || snapshot.y != pose.y || snapshot.scale != pose.scale;
            snapshot.x = pose.x;
            snapshot.y = pose.y;
            snapshot.scale = pose.scale;
            changed
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_by_key() {
        let store = SharedStore::new();
        assert_eq!(store.get(StoreKey::Scale), 1.0);

        store.set(StoreKey::X, -12.5);
        store.set(StoreKey::CurrentFrame, 3.0);

        assert_eq!(store.get(StoreKey::X), -12.5);
        assert_eq!(store.current_frame(), 3);
        assert_eq!(store.get(StoreKey::CurrentFrame), 3.0);
        assert_eq!(StoreKey::CurrentFrame.to_string(), "currentFrame");
    }

    #[test]
    fn test_clones_share_state() {
        let store = SharedStore::new();
        let other = store.clone();
        other.publish_pose(CameraPose { x: 1.0, y: 2.0, scale: 0.5 });
        assert_eq!(store.snapshot().pose(), CameraPose { x: 1.0, y: 2.0, scale: 0.5 });
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = SharedStore::new();
        let mut rx = store.subscribe();

        store.set_current_frame(4);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().current_frame, 4);

        // Same value again is not a change
        store.set_current_frame(4);
        assert!(!rx.has_changed().unwrap());
    }
}
