use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::App;
use crate::widgets::{ComicCanvasWidget, StatusBarWidget};

/// Split the screen into the canvas and an optional one-line status bar
pub fn layout(area: Rect, show_status_bar: bool) -> (Rect, Option<Rect>) {
    if !show_status_bar {
        return (area, None);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

/// Draw one frame of the viewer
pub fn draw(frame: &mut Frame, app: &App) {
    let (canvas_area, status_area) = layout(frame.area(), app.show_status_bar);

    ComicCanvasWidget::render(frame, canvas_area, app);
    if let Some(area) = status_area {
        StatusBarWidget::render(frame, area, app);
    }
}
