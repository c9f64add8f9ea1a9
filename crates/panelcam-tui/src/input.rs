//! Translation of terminal events into viewer actions and camera input.
//!
//! Terminal cells are mapped to canvas pixels with the configured cell size,
//! so the core sees a pixel viewport just like a browser host would.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use panelcam_core::config::AppConfig;
use panelcam_core::input::{InputEvent, Key};
use panelcam_core::Viewport;

use crate::event::AppEvent;
use crate::keymap::{Action, KeyBinding, Keymap};

/// What the app should do with a terminal event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// A keymap action handled by the app
    Action(Action),
    /// Input routed through the camera's input dispatcher
    Input(InputEvent),
    /// Periodic tick
    Tick,
    None,
}

/// Terminal geometry in canvas pixels
#[derive(Debug, Clone, Copy)]
pub struct TerminalMapping {
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    /// Wheel delta reported for one scroll notch
    pub scroll_event_delta: f64,
    /// Rows below the canvas taken by the status bar
    pub reserved_rows: u16,
}

impl TerminalMapping {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cell_width_px: config.ui.cell_width_px,
            cell_height_px: config.ui.cell_height_px,
            scroll_event_delta: config.input.scroll_event_delta,
            reserved_rows: u16::from(config.ui.show_status_bar),
        }
    }

    /// Pixel viewport for a terminal of `cols` x `rows`
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        let canvas_rows = rows.saturating_sub(self.reserved_rows);
        Viewport::new(
            f64::from(cols) * self.cell_width_px,
            f64::from(canvas_rows) * self.cell_height_px,
        )
    }

    /// Canvas pixel position of a terminal cell's top-left corner
    pub fn point(&self, column: u16, row: u16) -> (f64, f64) {
        (
            f64::from(column) * self.cell_width_px,
            f64::from(row) * self.cell_height_px,
        )
    }
}

/// Translate one terminal event
pub fn translate(event: &AppEvent, keymap: &Keymap, mapping: &TerminalMapping) -> Command {
    match event {
        AppEvent::Key(key) => translate_key(*key, keymap),
        AppEvent::Mouse(mouse) => translate_mouse(mouse, mapping),
        AppEvent::Resize(cols, rows) => Command::Input(InputEvent::Resize(mapping.viewport(*cols, *rows))),
        AppEvent::Tick => Command::Tick,
    }
}

fn translate_key(key: KeyEvent, keymap: &Keymap) -> Command {
    // Arrow keys always go to the camera, like a browser keydown
    match key.code {
        KeyCode::Left => return Command::Input(InputEvent::KeyDown(Key::ArrowLeft)),
        KeyCode::Right => return Command::Input(InputEvent::KeyDown(Key::ArrowRight)),
        _ => {}
    }

    match keymap.get(&KeyBinding::from(key)) {
        Some(action) => Command::Action(action),
        None => Command::None,
    }
}

fn translate_mouse(mouse: &MouseEvent, mapping: &TerminalMapping) -> Command {
    let (x, y) = mapping.point(mouse.column, mouse.row);
    let delta = mapping.scroll_event_delta;

    let event = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => InputEvent::Click { x, y },
        // Scrolling down or right reads forward
        MouseEventKind::ScrollDown => InputEvent::Wheel {
            delta_x: 0.0,
            delta_y: -delta,
        },
        MouseEventKind::ScrollUp => InputEvent::Wheel {
            delta_x: 0.0,
            delta_y: delta,
        },
        MouseEventKind::ScrollRight => InputEvent::Wheel {
            delta_x: -delta,
            delta_y: 0.0,
        },
        MouseEventKind::ScrollLeft => InputEvent::Wheel {
            delta_x: delta,
            delta_y: 0.0,
        },
        _ => return Command::None,
    };

    Command::Input(event)
}
