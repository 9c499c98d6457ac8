//! Shell layer between a document viewer's UI thread and the worker thread
//! that drives its rendering engine.
//!
//! UI callbacks become [`event::LoEvent`]s sent through an
//! [`dispatcher::EventDispatcher`] to a single [`worker::Worker`]; the worker
//! posts [`poster::UiAction`]s back to whichever thread owns the
//! [`poster::UiScheduler`].

pub mod config;
pub mod dispatcher;
pub mod display;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod poster;
pub mod shell;
pub mod worker;

pub use config::Config;
pub use dispatcher::{event_queue, EventDispatcher, EventReceiver};
pub use engine::{DocumentEngine, DocumentInfo, DocumentKind, MemoryEngine};
pub use error::EngineError;
pub use event::LoEvent;
pub use poster::{ui_channel, MainThreadPoster, UiAction, UiContext, UiScheduler};
pub use shell::Shell;
pub use worker::{Worker, WorkerHandle, WorkerSettings};
