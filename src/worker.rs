//! The engine worker thread.
//!
//! A single thread drains the event queue and applies each event to the
//! document engine before taking the next one. Results that touch the UI go
//! back through the [`MainThreadPoster`].

use crate::config::Config;
use crate::dispatcher::EventReceiver;
use crate::engine::{DocumentEngine, DocumentInfo};
use crate::error::EngineError;
use crate::event::LoEvent;
use crate::geometry::PointF;
use crate::poster::{MainThreadPoster, UiAction};
use std::io;
use std::path::Path;
use std::thread::{self, JoinHandle};

/// Name given to the worker thread
pub const WORKER_THREAD_NAME: &str = "lokit";

/// Worker behaviour switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkerSettings {
    /// Zoom the viewport is reset to after a load or part change
    pub initial_zoom: f32,
    /// Forward key input and selection handle moves
    pub editing_enabled: bool,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            initial_zoom: 1.0,
            editing_enabled: false,
        }
    }
}

impl From<&Config> for WorkerSettings {
    fn from(config: &Config) -> Self {
        Self {
            initial_zoom: config.viewer.initial_zoom,
            editing_enabled: crate::display::is_editing_enabled(&config.editing),
        }
    }
}

/// Applies events to an engine and reports back to the UI
pub struct Worker<E> {
    engine: E,
    poster: MainThreadPoster,
    settings: WorkerSettings,
    processed: usize,
}

/// What the worker hands back once its queue has closed
#[derive(Debug)]
pub struct WorkerSummary<E> {
    pub engine: E,
    pub processed: usize,
}

/// Join handle for a running worker thread
#[derive(Debug)]
pub struct WorkerHandle<E> {
    handle: JoinHandle<WorkerSummary<E>>,
}

impl<E> WorkerHandle<E> {
    /// Wait for the worker to drain its queue and stop. The queue closes when
    /// every dispatcher has been dropped.
    pub fn join(self) -> thread::Result<WorkerSummary<E>> {
        self.handle.join()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<E: DocumentEngine + 'static> Worker<E> {
    /// Start the worker thread
    pub fn spawn(
        receiver: EventReceiver,
        engine: E,
        poster: MainThreadPoster,
        settings: WorkerSettings,
    ) -> io::Result<WorkerHandle<E>> {
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let mut worker = Worker::new(engine, poster, settings);
                worker.run(&receiver);
                log::debug!("worker stopped after {} events", worker.processed);
                WorkerSummary {
                    processed: worker.processed,
                    engine: worker.engine,
                }
            })?;
        Ok(WorkerHandle { handle })
    }
}

impl<E: DocumentEngine> Worker<E> {
    pub fn new(engine: E, poster: MainThreadPoster, settings: WorkerSettings) -> Self {
        Self {
            engine,
            poster,
            settings,
            processed: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Process events until every dispatcher is dropped
    pub fn run(&mut self, receiver: &EventReceiver) {
        while let Some(event) = receiver.recv() {
            self.process_event(event);
        }
    }

    /// Apply a single event to the engine
    pub fn process_event(&mut self, event: LoEvent) {
        log::debug!("process {}", event.name());
        self.processed += 1;

        let result = match event {
            LoEvent::Load { path } => {
                self.with_spinner(|w| w.load(&path, |engine| engine.load(&path)))
            }
            LoEvent::LoadNew {
                path,
                document_type,
            } => self.with_spinner(|w| {
                w.load(&path, |engine| engine.load_new(&path, &document_type))
            }),
            LoEvent::Resume { path, part } => self.with_spinner(|w| w.resume(&path, part)),
            LoEvent::SaveAs { path, format } => {
                log::info!("saving as {} ({format})", path.display());
                self.engine.save_as(&path, &format)
            }
            LoEvent::Close => {
                self.engine.close();
                Ok(())
            }
            LoEvent::Touch { touch_type, point } => {
                if self.engine.document().is_none() {
                    return;
                }
                self.engine.touch(touch_type, point)
            }
            LoEvent::Key(key) => {
                if !self.editable() {
                    return;
                }
                self.engine.key(key)
            }
            LoEvent::SizeChanged { width, height } => {
                self.engine.size_changed(width, height);
                Ok(())
            }
            LoEvent::SwipeLeft => self.step_part(1),
            LoEvent::SwipeRight => self.step_part(-1),
            LoEvent::ChangePart { part } => self.with_spinner(|w| w.change_part(part)),
            LoEvent::Thumbnail(task) => self
                .engine
                .render_thumbnail(&task)
                .map(|thumbnail| self.poster.post(UiAction::ThumbnailReady(thumbnail))),
            LoEvent::TileReevaluation(layer) => {
                self.engine.reevaluate_tiles(layer);
                Ok(())
            }
            LoEvent::TileInvalidation(rect) => {
                self.engine.invalidate_tiles(rect);
                Ok(())
            }
            LoEvent::ChangeHandlePosition { handle, point } => {
                if !self.editable() {
                    return;
                }
                self.engine.set_handle_position(handle, point)
            }
            LoEvent::NavigationClick => {
                self.engine.navigation_click();
                Ok(())
            }
        };

        if let Err(e) = result {
            log::warn!("engine error: {e}");
            self.poster.post(UiAction::ReportError(e.to_string()));
        }
    }

    fn editable(&self) -> bool {
        self.settings.editing_enabled && self.engine.document().is_some()
    }

    fn with_spinner(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        self.poster.show_progress_spinner();
        let result = f(self);
        self.poster.hide_progress_spinner();
        result
    }

    fn load(
        &mut self,
        path: &Path,
        open: impl FnOnce(&mut E) -> Result<DocumentInfo, EngineError>,
    ) -> Result<(), EngineError> {
        log::info!("loading {}", path.display());
        let info = open(&mut self.engine)?;
        self.poster.post(UiAction::DocumentLoaded(info));
        self.reset_viewport();
        Ok(())
    }

    fn resume(&mut self, path: &Path, part: i32) -> Result<(), EngineError> {
        self.load(path, |engine| engine.load(path))?;
        let parts = self.engine.document().map_or(1, |doc| doc.parts);
        let part = part.clamp(0, parts.max(1) - 1);
        if part != self.engine.current_part() {
            self.engine.change_part(part)?;
        }
        self.poster.post(UiAction::PartChanged { part });
        Ok(())
    }

    fn change_part(&mut self, part: i32) -> Result<(), EngineError> {
        self.engine.change_part(part)?;
        self.poster.post(UiAction::PartChanged { part });
        self.reset_viewport();
        Ok(())
    }

    /// Move `delta` parts; no-op at either end or without a document
    fn step_part(&mut self, delta: i32) -> Result<(), EngineError> {
        let Some(parts) = self.engine.document().map(|doc| doc.parts) else {
            return Ok(());
        };
        let target = self.engine.current_part() + delta;
        if target < 0 || target >= parts {
            return Ok(());
        }
        self.with_spinner(|w| w.change_part(target))
    }

    fn reset_viewport(&self) {
        self.poster
            .move_viewport_to(PointF::ORIGIN, self.settings.initial_zoom);
    }
}
