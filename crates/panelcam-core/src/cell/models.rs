use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};
use crate::Result;

/// A rectangular content panel positioned on the shared canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Left edge in canvas space
    #[serde(default)]
    pub x: f64,
    /// Top edge in canvas space
    #[serde(default)]
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Cell {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Accepted document shapes: a bare array, or an object wrapping one
#[derive(Deserialize)]
#[serde(untagged)]
enum CellDocument {
    List(Vec<Cell>),
    Wrapped { cells: Vec<Cell> },
}

/// Parse a JSON cell document
pub fn parse_cells(text: &str) -> Result<Vec<Cell>> {
    let document: CellDocument = serde_json::from_str(text)?;
    Ok(match document {
        CellDocument::List(cells) => cells,
        CellDocument::Wrapped { cells } => cells,
    })
}
