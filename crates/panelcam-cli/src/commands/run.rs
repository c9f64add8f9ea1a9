use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use panelcam_core::cell::source_for;
use panelcam_core::history::FileHistory;
use panelcam_core::{AppConfig, Session};
use panelcam_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::TerminalMapping,
    ui,
};

pub async fn run(config: AppConfig, start_frame: Option<usize>) -> Result<()> {
    let source = source_for(&config.source)?;

    let history = FileHistory::open(config.history_path())?;

    // The canvas viewport is known before the alternate screen opens
    let (cols, rows) = terminal::size()?;
    let viewport = TerminalMapping::from_config(&config).viewport(cols, rows);

    // Load before touching the terminal so errors print normally
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let session = Session::builder(&config)
        .viewport(viewport)
        .history(Box::new(history))
        .start_frame(start_frame)
        .event_sender(event_tx)
        .load(source.as_ref())
        .await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("panelcam"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, &config).with_events(event_rx);
    let event_handler = EventHandler::from_config(&config.ui);

    let result = event_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(frame = app.session.engine().current_key(), "Viewer closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll faster while the camera is moving
        let event = if app.is_animating() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            let now = Instant::now();
            let is_tick = matches!(event, AppEvent::Tick);
            let was_animating = app.is_animating();

            app.handle_event(event, now.duration_since(last_tick));

            // Idle time before a tween starts must not count toward it
            if is_tick || !was_animating {
                last_tick = now;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
