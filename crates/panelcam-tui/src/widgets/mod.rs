mod canvas;
mod status_bar;

pub use canvas::ComicCanvasWidget;
pub use status_bar::StatusBarWidget;
