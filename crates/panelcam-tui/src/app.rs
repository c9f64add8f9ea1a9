use std::time::Duration;

use panelcam_core::navigation::{NavigationEvent, TickOutcome};
use panelcam_core::{AppConfig, Session, Viewport};
use tokio::sync::mpsc;
use tracing::debug;

use crate::event::AppEvent;
use crate::input::{translate, Command, TerminalMapping};
use crate::keymap::{Action, Keymap};
use crate::theme::Theme;

/// Viewer state for one terminal session
pub struct App {
    pub session: Session,
    pub keymap: Keymap,
    pub mapping: TerminalMapping,
    pub theme: Theme,
    pub should_quit: bool,
    pub show_status_bar: bool,
    pub status_message: Option<String>,
    /// Result of the last camera tick
    pub last_tick: Option<TickOutcome>,
    events: Option<mpsc::UnboundedReceiver<NavigationEvent>>,
}

impl App {
    pub fn new(session: Session, config: &AppConfig) -> Self {
        Self {
            session,
            keymap: Keymap::from_config(&config.keymap),
            mapping: TerminalMapping::from_config(config),
            theme: Theme::default(),
            should_quit: false,
            show_status_bar: config.ui.show_status_bar,
            status_message: None,
            last_tick: None,
            events: None,
        }
    }

    /// Receive navigation events to show in the status bar
    pub fn with_events(mut self, rx: mpsc::UnboundedReceiver<NavigationEvent>) -> Self {
        self.events = Some(rx);
        self
    }

    /// Whether the camera needs animation-rate ticks
    pub fn is_animating(&self) -> bool {
        !self.session.engine().is_settled()
    }

    /// Pixel viewport for a terminal of the given size
    pub fn viewport_for(&self, cols: u16, rows: u16) -> Viewport {
        self.mapping.viewport(cols, rows)
    }

    /// Handle one terminal event. `elapsed` is the time since the previous
    /// camera tick and is only used for tick events.
    pub fn handle_event(&mut self, event: AppEvent, elapsed: Duration) {
        match translate(&event, &self.keymap, &self.mapping) {
            Command::Action(action) => self.apply_action(action),
            Command::Input(input) => {
                self.session.handle_input(input);
            }
            Command::Tick => self.tick(elapsed),
            Command::None => {}
        }
        self.drain_events();
    }

    pub fn apply_action(&mut self, action: Action) {
        let engine = self.session.engine_mut();
        let result = match action {
            Action::Next => {
                engine.advance();
                Ok(())
            }
            Action::Previous => {
                engine.retreat();
                Ok(())
            }
            Action::First => engine.go_to(0),
            Action::Last => {
                let last = engine.path().last_index();
                engine.go_to(last)
            }
            Action::Snap => {
                engine.snap_to_current_position();
                Ok(())
            }
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
        };

        if let Err(e) = result {
            self.status_message = Some(format!("Error: {}", e));
        }
    }

    /// Advance the camera by `dt`
    pub fn tick(&mut self, dt: Duration) {
        self.last_tick = Some(self.session.tick(dt));
    }

    fn drain_events(&mut self) {
        let Some(rx) = self.events.as_mut() else {
            return;
        };

        while let Ok(event) = rx.try_recv() {
            debug!(?event, "Navigation event");
            self.status_message = match event {
                NavigationEvent::FrameChanged { frame, total } => {
                    Some(format!("Frame {}/{}", frame + 1, total))
                }
                NavigationEvent::Refit { width, height } => {
                    Some(format!("Viewport {:.0}x{:.0}", width, height))
                }
                NavigationEvent::Settled { .. } => None,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use panelcam_core::cell::{Cell, StaticCellSource};

    use super::*;

    async fn app() -> App {
        let config = AppConfig::default();
        let source = StaticCellSource::new(vec![
            Cell::new(0.0, 0.0, 400.0, 300.0),
            Cell::new(500.0, 0.0, 400.0, 300.0),
            Cell::new(1000.0, 0.0, 400.0, 300.0),
        ]);
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Session::builder(&config)
            .viewport(Viewport::new(800.0, 640.0))
            .event_sender(tx)
            .load(&source)
            .await
            .unwrap();
        App::new(session, &config).with_events(rx)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_keys_move_camera() {
        let mut app = app().await;

        app.handle_event(key(KeyCode::Right), Duration::ZERO);
        assert_eq!(app.session.engine().current_key(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Frame 2/3"));
        assert!(app.is_animating());

        app.handle_event(AppEvent::Tick, Duration::from_secs(1));
        assert!(!app.is_animating());
        assert!(app.last_tick.unwrap().animate);
        assert_eq!(app.status_message, None);

        app.handle_event(AppEvent::Key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)), Duration::ZERO);
        assert_eq!(app.session.engine().current_key(), 2);

        app.handle_event(key(KeyCode::Char('g')), Duration::ZERO);
        assert_eq!(app.session.engine().current_key(), 0);
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = app().await;
        app.handle_event(key(KeyCode::Char('q')), Duration::ZERO);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_resize_refits() {
        let mut app = app().await;
        app.handle_event(AppEvent::Resize(40, 21), Duration::ZERO);
        assert_eq!(app.session.engine().viewport(), Viewport::new(320.0, 320.0));
        assert_eq!(app.status_message.as_deref(), Some("Viewport 320x320"));
    }
}
