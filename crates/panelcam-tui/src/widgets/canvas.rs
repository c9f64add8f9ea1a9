use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{
        canvas::{Canvas, Rectangle},
        Block,
    },
    Frame,
};

use panelcam_core::{CameraPose, Cell, Point, Viewport};

use crate::app::App;

/// Draws every cell through the camera transform
pub struct ComicCanvasWidget;

impl ComicCanvasWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let engine = app.session.engine();
        let pose = engine.camera().pose();
        let viewport = engine.viewport();
        let current = engine.current_key();

        let rects: Vec<(Rectangle, bool)> = engine
            .path()
            .keys()
            .iter()
            .enumerate()
            .map(|(index, key)| {
                let color = if index == current {
                    app.theme.current_cell
                } else {
                    app.theme.cell
                };
                (project(&key.cell, pose, viewport, color), index == current)
            })
            .collect();

        let canvas = Canvas::default()
            .block(Block::default().style(Style::default().bg(app.theme.bg0)))
            .background_color(app.theme.bg0)
            .x_bounds([0.0, viewport.width.max(1.0)])
            .y_bounds([0.0, viewport.height.max(1.0)])
            .paint(move |ctx| {
                // Current frame last so it stays on top
                for (rect, _) in rects.iter().filter(|(_, is_current)| !is_current) {
                    ctx.draw(rect);
                }
                for (rect, _) in rects.iter().filter(|(_, is_current)| *is_current) {
                    ctx.draw(rect);
                }
            });

        frame.render_widget(canvas, area);
    }
}

/// Screen rectangle of a cell; the canvas y axis points up, so rows are flipped
fn project(cell: &Cell, pose: CameraPose, viewport: Viewport, color: ratatui::style::Color) -> Rectangle {
    let top_left = pose.to_screen(Point::new(cell.x, cell.y));
    let width = cell.w * pose.scale;
    let height = cell.h * pose.scale;

    Rectangle {
        x: top_left.x,
        y: viewport.height - top_left.y - height,
        width,
        height,
        color,
    }
}
