//! Keyframe path: the ordered stopping points the camera navigates between.
//!
//! A [`PathBuilder`] turns loaded cells into keyframes; [`KeyframePath`]
//! validates and owns the result. Each keyframe carries a `point_id`, its
//! position along the path, which is what closest-keyframe snapping compares.

use crate::cell::Cell;
use crate::geometry::Point;
use crate::{Error, Result};

/// Position of a keyframe along the path
pub type PointId = f64;

/// A designated stopping point bound to one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub point_id: PointId,
    /// Canvas point the camera centers on
    pub anchor: Point,
    pub cell: Cell,
}

impl Keyframe {
    /// Keyframe anchored at the cell center
    pub fn new(point_id: PointId, cell: Cell) -> Self {
        Self {
            point_id,
            anchor: cell.center(),
            cell,
        }
    }

    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Builds the ordered keyframe sequence for a set of cells
pub trait PathBuilder {
    fn build(&self, cells: &[Cell]) -> Vec<Keyframe>;
}

/// One keyframe per cell, anchored at its center, with point ids measured as
/// the cumulative center-to-center distance from the first cell
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterLinePath;

impl PathBuilder for CenterLinePath {
    fn build(&self, cells: &[Cell]) -> Vec<Keyframe> {
        let mut keys = Vec::with_capacity(cells.len());
        let mut travelled = 0.0;
        let mut previous: Option<Point> = None;

        for cell in cells {
            let center = cell.center();
            if let Some(prev) = previous {
                travelled += prev.distance(&center);
            }
            keys.push(Keyframe::new(travelled, *cell));
            previous = Some(center);
        }

        keys
    }
}

/// Non-empty, read-only keyframe sequence
#[derive(Debug, Clone)]
pub struct KeyframePath {
    keys: Vec<Keyframe>,
}

impl KeyframePath {
    /// Wrap a keyframe sequence; an empty sequence cannot be navigated
    pub fn new(keys: Vec<Keyframe>) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::InvalidPath("keyframe sequence is empty".to_string()));
        }
        Ok(Self { keys })
    }

    /// Build a path from cells with the given builder
    pub fn build(builder: &dyn PathBuilder, cells: &[Cell]) -> Result<Self> {
        Self::new(builder.build(cells))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Never true for a constructed path
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.keys.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.keys.get(index)
    }

    /// Keyframe at a frame index, failing for out-of-range frames
    pub fn key(&self, index: usize) -> Result<&Keyframe> {
        self.keys.get(index).ok_or_else(|| {
            Error::InvalidPath(format!(
                "frame {} is outside 0..={}",
                index,
                self.last_index()
            ))
        })
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Index of the keyframe whose point id is nearest `reference`.
    /// Scans in order with a strict comparison, so the earliest keyframe
    /// wins a tie.
    pub fn closest(&self, reference: PointId) -> usize {
        let mut best = 0;
        let mut best_diff = (self.keys[0].point_id - reference).abs();

        for (index, key) in self.keys.iter().enumerate().skip(1) {
            let diff = (key.point_id - reference).abs();
            if diff < best_diff {
                best = index;
                best_diff = diff;
            }
        }

        best
    }
}
