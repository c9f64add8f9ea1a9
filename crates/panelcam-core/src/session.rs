//! Session bootstrap: fetch cells, build the path, place the camera.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;

use crate::cell::CellSource;
use crate::config::AppConfig;
use crate::geometry::Viewport;
use crate::history::{initial_frame, HistoryRouter, MemoryHistory};
use crate::input::{Dispatch, InputDispatcher, InputEvent};
use crate::navigation::{NavigationEngine, NavigationEvent, TickOutcome};
use crate::path::{CenterLinePath, KeyframePath, PathBuilder};
use crate::store::SharedStore;
use crate::Result;

/// A loaded comic ready to be navigated
pub struct Session {
    engine: NavigationEngine,
    dispatcher: InputDispatcher,
}

impl Session {
    pub fn builder(config: &AppConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    pub fn engine(&self) -> &NavigationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut NavigationEngine {
        &mut self.engine
    }

    pub fn dispatcher(&self) -> &InputDispatcher {
        &self.dispatcher
    }

    /// Route one input event to the engine
    pub fn handle_input(&mut self, event: InputEvent) -> Dispatch {
        self.dispatcher.dispatch(&mut self.engine, event)
    }

    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        self.engine.tick(dt)
    }
}

/// Collects the collaborators a [`Session`] needs; anything not given gets a default
pub struct SessionBuilder {
    config: AppConfig,
    viewport: Viewport,
    store: SharedStore,
    history: Box<dyn HistoryRouter>,
    path_builder: Box<dyn PathBuilder + Send>,
    event_tx: Option<mpsc::UnboundedSender<NavigationEvent>>,
    start_frame: Option<usize>,
}

impl SessionBuilder {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
            viewport: Viewport::new(1000.0, 800.0),
            store: SharedStore::new(),
            history: Box::new(MemoryHistory::new()),
            path_builder: Box::new(CenterLinePath),
            event_tx: None,
            start_frame: None,
        }
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = store;
        self
    }

    pub fn history(mut self, history: Box<dyn HistoryRouter>) -> Self {
        self.history = history;
        self
    }

    pub fn path_builder(mut self, builder: Box<dyn PathBuilder + Send>) -> Self {
        self.path_builder = builder;
        self
    }

    pub fn event_sender(mut self, tx: mpsc::UnboundedSender<NavigationEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Start at this frame instead of the one in the history fragment.
    ///
    /// The override is not written to history; only later cursor moves are.
    pub fn start_frame(mut self, frame: Option<usize>) -> Self {
        self.start_frame = frame;
        self
    }

    /// Fetch the cells and start at the requested frame, or else the one named
    /// by the history fragment.
    ///
    /// Fetch failures, empty layouts and out-of-range start frames are errors;
    /// no engine exists until all of them succeed.
    pub async fn load(self, source: &dyn CellSource) -> Result<Session> {
        let cells = source.fetch().await?;
        let path = KeyframePath::build(self.path_builder.as_ref(), &cells)?;

        let start = match self.start_frame {
            Some(frame) => frame,
            None => initial_frame(self.history.fragment().as_deref())?,
        };

        let mut engine = NavigationEngine::new(
            path,
            self.viewport,
            self.store,
            self.history,
            &self.config.camera,
        );
        if let Some(tx) = self.event_tx {
            engine = engine.with_event_sender(tx);
        }
        engine.start_at(start)?;

        info!(
            source = %source.describe(),
            frames = engine.frame_count(),
            start,
            "Session started"
        );

        Ok(Session {
            engine,
            dispatcher: InputDispatcher::from_config(&self.config.input),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, StaticCellSource};
    use crate::history::{frame_fragment, FileHistory};
    use crate::Error;

    fn cells() -> Vec<Cell> {
        vec![
            Cell::new(0.0, 0.0, 800.0, 600.0),
            Cell::new(900.0, 0.0, 2000.0, 600.0),
            Cell::new(0.0, 700.0, 800.0, 600.0),
        ]
    }

    #[tokio::test]
    async fn test_load_starts_at_history_frame() {
        let source = StaticCellSource::new(cells());
        let store = SharedStore::new();
        let session = Session::builder(&AppConfig::default())
            .store(store.clone())
            .history(Box::new(MemoryHistory::starting_at("frame/2")))
            .load(&source)
            .await
            .unwrap();

        assert_eq!(session.engine().current_key(), 2);
        assert_eq!(store.current_frame(), 2);
        assert!(session.engine().is_settled());
    }

    #[tokio::test]
    async fn test_load_defaults_to_first_frame() {
        let source = StaticCellSource::new(cells());
        let session = Session::builder(&AppConfig::default())
            .history(Box::new(MemoryHistory::starting_at("frame/garbage")))
            .load(&source)
            .await
            .unwrap();
        assert_eq!(session.engine().current_key(), 0);
    }

    #[tokio::test]
    async fn test_load_rejects_out_of_range_start() {
        let source = StaticCellSource::new(cells());
        let result = Session::builder(&AppConfig::default())
            .history(Box::new(MemoryHistory::starting_at("frame/3")))
            .load(&source)
            .await;
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_load_rejects_empty_layout() {
        let source = StaticCellSource::new(Vec::new());
        let result = Session::builder(&AppConfig::default()).load(&source).await;
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_start_frame_overrides_history() {
        let source = StaticCellSource::new(cells());
        let session = Session::builder(&AppConfig::default())
            .history(Box::new(MemoryHistory::starting_at("frame/2")))
            .start_frame(Some(1))
            .load(&source)
            .await
            .unwrap();
        assert_eq!(session.engine().current_key(), 1);
        // Nothing is recorded until the cursor moves
        assert_eq!(session.engine().history().fragment().as_deref(), Some("frame/2"));
    }

    #[tokio::test]
    async fn test_rejected_start_frame_leaves_saved_history_alone() {
        let dir = std::env::temp_dir().join(format!("panelcam-session-{}", std::process::id()));
        let path = dir.join("history");
        let _ = std::fs::remove_file(&path);

        let mut saved = FileHistory::open(&path).unwrap();
        saved.navigate(&frame_fragment(1));

        let source = StaticCellSource::new(cells());
        let result = Session::builder(&AppConfig::default())
            .history(Box::new(FileHistory::open(&path).unwrap()))
            .start_frame(Some(99))
            .load(&source)
            .await;
        assert!(matches!(result, Err(Error::InvalidPath(_))));

        // A plain start afterwards resumes from the saved frame
        let session = Session::builder(&AppConfig::default())
            .history(Box::new(FileHistory::open(&path).unwrap()))
            .load(&source)
            .await
            .unwrap();
        assert_eq!(session.engine().current_key(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_input_and_ticks_flow_through() {
        let source = StaticCellSource::new(cells());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::builder(&AppConfig::default())
            .viewport(Viewport::new(1000.0, 800.0))
            .event_sender(tx)
            .load(&source)
            .await
            .unwrap();

        session.handle_input(InputEvent::Click { x: 900.0, y: 10.0 });
        let outcome = session.tick(Duration::from_millis(500));

        assert!(outcome.animate);
        assert_eq!(outcome.pose.scale, 0.5);
        assert_eq!(
            rx.recv().await,
            Some(NavigationEvent::FrameChanged { frame: 1, total: 3 })
        );
        assert_eq!(rx.recv().await, Some(NavigationEvent::Settled { frame: 1 }));
        assert_eq!(session.engine().history().fragment().as_deref(), Some("frame/1"));
    }
}
