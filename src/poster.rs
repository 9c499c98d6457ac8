//! Posting UI mutations back onto the UI thread.
//!
//! Any thread may post a [`UiAction`]; the thread that owns the
//! [`UiScheduler`] applies them in the order they were posted.

use crate::engine::{DocumentInfo, Thumbnail};
use crate::geometry::PointF;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Instant;

/// Moves the visible document area
pub trait ViewportController {
    /// Move the top-left of the viewport to `position` at `zoom`
    fn move_to(&mut self, position: PointF, zoom: f32);
}

/// UI state the posted actions mutate. Only ever touched on the UI thread.
pub trait UiContext {
    fn is_spreadsheet(&self) -> bool;

    fn show_progress_spinner(&mut self);

    fn hide_progress_spinner(&mut self);

    fn viewport(&mut self) -> &mut dyn ViewportController;

    fn document_loaded(&mut self, _info: DocumentInfo) {}

    fn part_changed(&mut self, _part: i32) {}

    fn thumbnail_ready(&mut self, _thumbnail: Thumbnail) {}

    fn report_error(&mut self, _message: String) {}
}

/// A UI mutation queued for the UI thread
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    ShowProgressSpinner,
    HideProgressSpinner,
    MoveViewportTo { position: PointF, zoom: f32 },
    DocumentLoaded(DocumentInfo),
    PartChanged { part: i32 },
    ThumbnailReady(Thumbnail),
    ReportError(String),
}

impl UiAction {
    /// Apply this action to the UI context
    pub fn apply(self, ctx: &mut impl UiContext) {
        match self {
            UiAction::ShowProgressSpinner => ctx.show_progress_spinner(),
            UiAction::HideProgressSpinner => ctx.hide_progress_spinner(),
            UiAction::MoveViewportTo { position, zoom } => ctx.viewport().move_to(position, zoom),
            UiAction::DocumentLoaded(info) => ctx.document_loaded(info),
            UiAction::PartChanged { part } => ctx.part_changed(part),
            UiAction::ThumbnailReady(thumbnail) => ctx.thumbnail_ready(thumbnail),
            UiAction::ReportError(message) => ctx.report_error(message),
        }
    }
}

/// Create a poster and the scheduler the UI thread drains
pub fn ui_channel() -> (MainThreadPoster, UiScheduler) {
    let (tx, rx) = mpsc::channel();
    (MainThreadPoster { tx }, UiScheduler { rx })
}

/// Handle for scheduling work on the UI thread from any thread
#[derive(Debug, Clone)]
pub struct MainThreadPoster {
    tx: Sender<UiAction>,
}

impl MainThreadPoster {
    /// Queue an action; returns immediately
    pub fn post(&self, action: UiAction) {
        if self.tx.send(action).is_err() {
            log::debug!("dropped UI action: UI loop has stopped");
        }
    }

    pub fn show_progress_spinner(&self) {
        self.post(UiAction::ShowProgressSpinner);
    }

    pub fn hide_progress_spinner(&self) {
        self.post(UiAction::HideProgressSpinner);
    }

    /// Move the viewport to `position` (top-left) and change the zoom level
    pub fn move_viewport_to(&self, position: PointF, zoom: f32) {
        self.post(UiAction::MoveViewportTo { position, zoom });
    }
}

/// Receiving end owned by the UI thread
#[derive(Debug)]
pub struct UiScheduler {
    rx: Receiver<UiAction>,
}

impl UiScheduler {
    /// Apply every queued action in post order. Returns how many ran.
    pub fn run_pending(&self, ctx: &mut impl UiContext) -> usize {
        let mut ran = 0;
        loop {
            match self.rx.try_recv() {
                Ok(action) => {
                    action.apply(ctx);
                    ran += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        ran
    }

    /// Wait until `deadline` for at least one action, then apply everything
    /// queued. Returns how many ran.
    pub fn run_until(&self, ctx: &mut impl UiContext, deadline: Instant) -> usize {
        let timeout = deadline.saturating_duration_since(Instant::now());
        match self.rx.recv_timeout(timeout) {
            Ok(action) => {
                action.apply(ctx);
                1 + self.run_pending(ctx)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }
}
