//! Event dispatch from UI callbacks to the engine worker queue.
//!
//! Every `send_*` call enqueues exactly one [`LoEvent`] and returns without
//! waiting. The queue is unbounded; events sent before the worker starts are
//! buffered until it begins receiving.

use crate::config::QueueConfig;
use crate::event::{HandleType, LoEvent, ThumbnailTask, TileLayer, TouchType};
use crate::geometry::{PointF, RectF};
use crossterm::event::KeyEvent;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

/// Pending-event accounting shared by both ends of the queue
#[derive(Debug)]
struct QueueDepth {
    pending: AtomicUsize,
    over_threshold: AtomicBool,
    warn_depth: usize,
}

impl QueueDepth {
    fn increment(&self) {
        let depth = self.pending.fetch_add(1, Ordering::SeqCst) + 1;
        if depth > self.warn_depth && !self.over_threshold.swap(true, Ordering::SeqCst) {
            log::warn!(
                "engine event queue is backing up: {depth} pending (threshold {})",
                self.warn_depth
            );
        }
    }

    fn decrement(&self) {
        let depth = self.pending.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        if depth <= self.warn_depth {
            self.over_threshold.store(false, Ordering::SeqCst);
        }
    }
}

/// Create the worker event queue
pub fn event_queue(config: &QueueConfig) -> (EventDispatcher, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    let depth = Arc::new(QueueDepth {
        pending: AtomicUsize::new(0),
        over_threshold: AtomicBool::new(false),
        warn_depth: config.warn_depth,
    });
    (
        EventDispatcher {
            tx,
            depth: Arc::clone(&depth),
        },
        EventReceiver { rx, depth },
    )
}

/// Producer handle for the worker event queue. Cheap to clone; every clone
/// feeds the same queue.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    tx: Sender<LoEvent>,
    depth: Arc<QueueDepth>,
}

impl EventDispatcher {
    /// Enqueue an event for the worker thread
    pub fn send_event(&self, event: LoEvent) {
        log::debug!("dispatch {}", event.name());
        self.depth.increment();
        if let Err(mpsc::SendError(event)) = self.tx.send(event) {
            // Worker is gone; nothing will ever drain this event
            self.depth.decrement();
            log::debug!("dropped {} event: worker has stopped", event.name());
        }
    }

    /// Number of events sent but not yet received by the worker
    pub fn pending(&self) -> usize {
        self.depth.pending.load(Ordering::SeqCst)
    }

    pub fn send_thumbnail_event(&self, task: ThumbnailTask) {
        self.send_event(LoEvent::Thumbnail(task));
    }

    /// Send a touch gesture at a document coordinate
    pub fn send_touch_event(&self, touch_type: TouchType, point: PointF) {
        self.send_event(LoEvent::Touch { touch_type, point });
    }

    /// Send a key press
    pub fn send_key_event(&self, key: KeyEvent) {
        self.send_event(LoEvent::Key(key));
    }

    pub fn send_size_changed_event(&self, width: u16, height: u16) {
        self.send_event(LoEvent::SizeChanged { width, height });
    }

    pub fn send_swipe_right_event(&self) {
        self.send_event(LoEvent::SwipeRight);
    }

    pub fn send_swipe_left_event(&self) {
        self.send_event(LoEvent::SwipeLeft);
    }

    pub fn send_change_part_event(&self, part: i32) {
        self.send_event(LoEvent::ChangePart { part });
    }

    pub fn send_load_event(&self, path: impl Into<PathBuf>) {
        self.send_event(LoEvent::Load { path: path.into() });
    }

    pub fn send_new_document_load_event(
        &self,
        path: impl Into<PathBuf>,
        document_type: impl Into<String>,
    ) {
        self.send_event(LoEvent::LoadNew {
            path: path.into(),
            document_type: document_type.into(),
        });
    }

    pub fn send_save_as_event(&self, path: impl Into<PathBuf>, format: impl Into<String>) {
        self.send_event(LoEvent::SaveAs {
            path: path.into(),
            format: format.into(),
        });
    }

    pub fn send_resume_event(&self, path: impl Into<PathBuf>, part: i32) {
        self.send_event(LoEvent::Resume {
            path: path.into(),
            part,
        });
    }

    pub fn send_close_event(&self) {
        self.send_event(LoEvent::Close);
    }

    /// Ask a tile layer to recompute which tiles it needs
    pub fn send_tile_reevaluation_request(&self, layer: TileLayer) {
        self.send_event(LoEvent::TileReevaluation(layer));
    }

    /// Mark a document area as needing a repaint
    pub fn send_tile_invalidation_request(&self, rect: RectF) {
        self.send_event(LoEvent::TileInvalidation(rect));
    }

    /// Report a selection handle dragged to a new document coordinate
    pub fn send_change_handle_position_event(&self, handle: HandleType, point: PointF) {
        self.send_event(LoEvent::ChangeHandlePosition { handle, point });
    }

    pub fn send_navigation_click_event(&self) {
        self.send_event(LoEvent::NavigationClick);
    }
}

/// Consumer end of the worker event queue, owned by the worker thread
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<LoEvent>,
    depth: Arc<QueueDepth>,
}

impl EventReceiver {
    /// Block until the next event arrives. Returns `None` once every
    /// dispatcher has been dropped and the queue is empty.
    pub fn recv(&self) -> Option<LoEvent> {
        let event = self.rx.recv().ok()?;
        self.depth.decrement();
        Some(event)
    }

    /// Take the next event if one is already queued
    pub fn try_recv(&self) -> Option<LoEvent> {
        match self.rx.try_recv() {
            Ok(event) => {
                self.depth.decrement();
                Some(event)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                self.depth.decrement();
                Some(event)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::thread;

    fn queue() -> (EventDispatcher, EventReceiver) {
        event_queue(&QueueConfig::default())
    }

    fn drain(rx: &EventReceiver) -> Vec<LoEvent> {
        std::iter::from_fn(|| rx.try_recv()).collect()
    }

    #[test]
    fn test_each_call_enqueues_one_event_in_order() {
        let (dispatcher, rx) = queue();
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let rect = RectF::new(0.0, 0.0, 256.0, 256.0);

        dispatcher.send_load_event("/docs/report.odt");
        dispatcher.send_new_document_load_event("/docs/new.ods", "spreadsheet");
        dispatcher.send_save_as_event("/docs/report.pdf", "pdf");
        dispatcher.send_resume_event("/docs/report.odt", 3);
        dispatcher.send_close_event();
        dispatcher.send_touch_event(TouchType::LongPress, PointF::new(1.0, 2.0));
        dispatcher.send_key_event(key);
        dispatcher.send_size_changed_event(800, 600);
        dispatcher.send_swipe_left_event();
        dispatcher.send_swipe_right_event();
        dispatcher.send_change_part_event(2);
        dispatcher.send_thumbnail_event(ThumbnailTask {
            part: 1,
            width: 64,
            height: 48,
        });
        dispatcher.send_tile_reevaluation_request(TileLayer::FixedZoom);
        dispatcher.send_tile_invalidation_request(rect);
        dispatcher.send_change_handle_position_event(HandleType::End, PointF::new(5.0, 6.0));
        dispatcher.send_navigation_click_event();

        let expected = vec![
            LoEvent::Load {
                path: "/docs/report.odt".into(),
            },
            LoEvent::LoadNew {
                path: "/docs/new.ods".into(),
                document_type: "spreadsheet".to_string(),
            },
            LoEvent::SaveAs {
                path: "/docs/report.pdf".into(),
                format: "pdf".to_string(),
            },
            LoEvent::Resume {
                path: "/docs/report.odt".into(),
                part: 3,
            },
            LoEvent::Close,
            LoEvent::Touch {
                touch_type: TouchType::LongPress,
                point: PointF::new(1.0, 2.0),
            },
            LoEvent::Key(key),
            LoEvent::SizeChanged {
                width: 800,
                height: 600,
            },
            LoEvent::SwipeLeft,
            LoEvent::SwipeRight,
            LoEvent::ChangePart { part: 2 },
            LoEvent::Thumbnail(ThumbnailTask {
                part: 1,
                width: 64,
                height: 48,
            }),
            LoEvent::TileReevaluation(TileLayer::FixedZoom),
            LoEvent::TileInvalidation(rect),
            LoEvent::ChangeHandlePosition {
                handle: HandleType::End,
                point: PointF::new(5.0, 6.0),
            },
            LoEvent::NavigationClick,
        ];
        assert_eq!(drain(&rx), expected);
    }

    #[test]
    fn test_pending_count() {
        let (dispatcher, rx) = queue();
        assert_eq!(dispatcher.pending(), 0);

        dispatcher.send_swipe_left_event();
        dispatcher.send_swipe_right_event();
        assert_eq!(dispatcher.pending(), 2);

        rx.recv();
        assert_eq!(dispatcher.pending(), 1);
        rx.try_recv();
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_buffers_before_consumer_reads() {
        let (dispatcher, rx) = queue();
        for part in 0..100 {
            dispatcher.send_change_part_event(part);
        }
        drop(dispatcher);

        let parts: Vec<i32> = std::iter::from_fn(|| rx.recv())
            .map(|event| match event {
                LoEvent::ChangePart { part } => part,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(parts, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_recv_ends_when_dispatchers_dropped() {
        let (dispatcher, rx) = queue();
        let clone = dispatcher.clone();
        drop(dispatcher);
        clone.send_close_event();
        drop(clone);

        assert_eq!(rx.recv(), Some(LoEvent::Close));
        assert_eq!(rx.recv(), None);
    }

    #[test]
    fn test_send_after_worker_gone_is_dropped() {
        let (dispatcher, rx) = queue();
        drop(rx);
        dispatcher.send_close_event();
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_recv_timeout_empty() {
        let (_dispatcher, rx) = queue();
        assert_eq!(rx.recv_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn test_concurrent_producers_keep_per_caller_order() {
        let (dispatcher, rx) = queue();
        let callers = 4;
        let per_caller = 250;

        let handles: Vec<_> = (0..callers)
            .map(|caller| {
                let dispatcher = dispatcher.clone();
                thread::spawn(move || {
                    for seq in 0..per_caller {
                        dispatcher.send_change_part_event(caller * 10_000 + seq);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        drop(dispatcher);

        let mut last_seen = vec![-1; callers as usize];
        let mut total = 0;
        while let Some(event) = rx.recv() {
            let LoEvent::ChangePart { part } = event else {
                panic!("unexpected event {event:?}");
            };
            let caller = (part / 10_000) as usize;
            let seq = part % 10_000;
            assert!(seq > last_seen[caller], "caller {caller} reordered");
            last_seen[caller] = seq;
            total += 1;
        }
        assert_eq!(total, callers * per_caller);
    }

    #[test]
    fn test_over_threshold_flag_resets() {
        let (dispatcher, rx) = event_queue(&QueueConfig { warn_depth: 2 });
        for _ in 0..4 {
            dispatcher.send_navigation_click_event();
        }
        assert!(dispatcher.depth.over_threshold.load(Ordering::SeqCst));

        while rx.try_recv().is_some() {}
        assert!(!dispatcher.depth.over_threshold.load(Ordering::SeqCst));
    }
}
