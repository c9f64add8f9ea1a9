mod models;
mod source;

pub use models::{parse_cells, Cell};
pub use source::{source_for, CellSource, HttpCellSource, JsonFileSource, StaticCellSource};
