use crate::input::keyboard::map_key_event;
use crate::input::mouse::map_mouse_event;
use crate::input::{InputHandler, PanDirection, ViewerCommand};
use crate::theme::Theme;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use docshell::display::StaticMemoryService;
use docshell::event::{ThumbnailTask, TileLayer};
use docshell::geometry::{PointF, RectF};
use docshell::poster::ViewportController;
use docshell::{DocumentInfo, DocumentKind, Shell, UiContext, UiScheduler};
use ratatui::prelude::*;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

/// Document units covered by one terminal cell at zoom 1.0
pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;

/// Cells moved per pan step
const PAN_STEP: f32 = 4.0;

const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 4.0;
const ZOOM_STEP: f32 = 1.25;

/// How many sent commands the activity panel remembers
const RECENT_LIMIT: usize = 8;

const THUMBNAIL_WIDTH: u32 = 128;
const THUMBNAIL_HEIGHT: u32 = 96;

/// The visible part of the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top-left corner in document coordinates
    pub position: PointF,
    pub zoom: f32,
}

impl ViewportController for Viewport {
    fn move_to(&mut self, position: PointF, zoom: f32) {
        self.position = position;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

/// Busy indicator driven by spinner show/hide actions
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    pub visible: bool,
    frame: usize,
}

impl Spinner {
    const FRAMES: [&'static str; 4] = ["|", "/", "-", "\\"];

    pub fn tick(&mut self) {
        if self.visible {
            self.frame = (self.frame + 1) % Self::FRAMES.len();
        }
    }

    pub fn glyph(&self) -> &'static str {
        if self.visible {
            Self::FRAMES[self.frame]
        } else {
            " "
        }
    }
}

/// Message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// A thumbnail the worker finished rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSummary {
    pub part: i32,
    pub width: u32,
    pub height: u32,
}

/// UI-thread state. Only the main loop touches it.
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Handles for the engine worker and UI poster
    pub shell: Shell,
    pub theme: Theme,
    pub input_handler: InputHandler,
    pub memory: StaticMemoryService,
    /// Document the worker last reported as loaded
    pub document: Option<DocumentInfo>,
    pub current_part: i32,
    pub viewport: Viewport,
    pub spinner: Spinner,
    pub message: Option<StatusMessage>,
    pub thumbnails: Vec<ThumbnailSummary>,
    /// Most recent commands sent to the worker, newest last
    pub recent: VecDeque<String>,
    /// Last known document area for mouse hit detection
    pub document_area: Option<Rect>,
}

impl App {
    pub fn new(shell: Shell) -> Self {
        let memory = StaticMemoryService::from(&shell.config().memory);
        let zoom = shell.config().viewer.initial_zoom;
        Self {
            should_quit: false,
            shell,
            theme: Theme::dark(),
            input_handler: InputHandler::new(),
            memory,
            document: None,
            current_part: 0,
            viewport: Viewport {
                position: PointF::ORIGIN,
                zoom,
            },
            spinner: Spinner::default(),
            message: None,
            thumbnails: Vec::new(),
            recent: VecDeque::with_capacity(RECENT_LIMIT),
            document_area: None,
        }
    }

    /// Main loop: drain posted UI actions, draw, then forward input
    pub fn run(
        &mut self,
        ratatui_terminal: &mut ratatui::Terminal<impl Backend>,
        scheduler: &UiScheduler,
    ) -> Result<()> {
        let tick = Duration::from_millis(self.shell.config().viewer.tick_ms);

        let (width, height) = crossterm::terminal::size()?;
        self.shell.dispatcher().send_size_changed_event(width, height);

        while !self.should_quit {
            scheduler.run_pending(self);
            self.spinner.tick();

            ratatui_terminal.draw(|frame| ui::draw(frame, self))?;

            if event::poll(tick)? {
                let event = event::read()?;
                self.handle_event(event);
            }
        }

        Ok(())
    }

    /// Handle a terminal input event
    pub fn handle_event(&mut self, event: Event) {
        let editing = self.shell.is_editing_enabled();
        let command = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key_event(key, editing),
            Event::Mouse(mouse) => map_mouse_event(&mut self.input_handler, mouse, editing),
            Event::Resize(width, height) => {
                self.shell.dispatcher().send_size_changed_event(width, height);
                None
            }
            _ => None,
        };
        if let Some(command) = command {
            self.handle_command(command);
        }
    }

    /// Turn a viewer command into dispatch calls
    pub fn handle_command(&mut self, command: ViewerCommand) {
        let dispatcher = self.shell.dispatcher().clone();
        match command {
            ViewerCommand::Quit => self.should_quit = true,
            ViewerCommand::NewDocument => {
                let path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join("untitled.odt");
                self.remember(format!("new {}", path.display()));
                dispatcher.send_new_document_load_event(path, "text");
            }
            ViewerCommand::ExportPdf => match &self.document {
                Some(doc) => {
                    let target = doc.path.with_extension("pdf");
                    self.remember(format!("export {}", target.display()));
                    dispatcher.send_save_as_event(target, "pdf");
                }
                None => self.info("No document to export"),
            },
            ViewerCommand::Reload => match &self.document {
                Some(doc) => {
                    let path = doc.path.clone();
                    self.remember(format!("resume {} @ {}", path.display(), self.current_part));
                    dispatcher.send_resume_event(path, self.current_part);
                }
                None => self.info("No document to reload"),
            },
            ViewerCommand::CloseDocument => {
                self.remember("close".to_string());
                dispatcher.send_close_event();
                self.document = None;
                self.current_part = 0;
                self.thumbnails.clear();
            }
            ViewerCommand::NextPart => {
                self.remember("swipe left".to_string());
                dispatcher.send_swipe_left_event();
            }
            ViewerCommand::PreviousPart => {
                self.remember("swipe right".to_string());
                dispatcher.send_swipe_right_event();
            }
            ViewerCommand::GoToPart(n) => {
                let part = i32::from(n) - 1;
                self.remember(format!("change part {part}"));
                dispatcher.send_change_part_event(part);
            }
            ViewerCommand::Thumbnail => {
                if self.document.is_none() {
                    self.info("No document loaded");
                    return;
                }
                self.remember(format!("thumbnail {}", self.current_part));
                dispatcher.send_thumbnail_event(ThumbnailTask {
                    part: self.current_part,
                    width: THUMBNAIL_WIDTH,
                    height: THUMBNAIL_HEIGHT,
                });
            }
            ViewerCommand::Pan(direction) => {
                let step_x = PAN_STEP * CELL_WIDTH / self.viewport.zoom;
                let step_y = PAN_STEP * CELL_HEIGHT / self.viewport.zoom;
                let (dx, dy) = match direction {
                    PanDirection::Up => (0.0, -step_y),
                    PanDirection::Down => (0.0, step_y),
                    PanDirection::Left => (-step_x, 0.0),
                    PanDirection::Right => (step_x, 0.0),
                };
                let moved = self.viewport.position.offset(dx, dy);
                let position = PointF::new(moved.x.max(0.0), moved.y.max(0.0));
                let zoom = self.viewport.zoom;
                self.viewport.move_to(position, zoom);
                dispatcher.send_tile_reevaluation_request(TileLayer::Dynamic);
            }
            ViewerCommand::ZoomIn => self.zoom_to(self.viewport.zoom * ZOOM_STEP),
            ViewerCommand::ZoomOut => self.zoom_to(self.viewport.zoom / ZOOM_STEP),
            ViewerCommand::ZoomReset => self.zoom_to(self.shell.config().viewer.initial_zoom),
            ViewerCommand::Refresh => {
                let visible = self.visible_rect();
                self.remember("invalidate view".to_string());
                dispatcher.send_tile_invalidation_request(visible);
            }
            ViewerCommand::NavigationClick => {
                self.remember("navigation click".to_string());
                dispatcher.send_navigation_click_event();
            }
            ViewerCommand::Touch {
                touch_type,
                col,
                row,
            } => {
                if let Some(point) = self.cell_to_document(col, row) {
                    self.remember(format!("{touch_type} at {:.0},{:.0}", point.x, point.y));
                    dispatcher.send_touch_event(touch_type, point);
                }
            }
            ViewerCommand::MoveHandle { handle, col, row } => {
                if let Some(point) = self.cell_to_document(col, row) {
                    dispatcher.send_change_handle_position_event(handle, point);
                }
            }
            ViewerCommand::ForwardKey(key) => dispatcher.send_key_event(key),
        }
    }

    fn zoom_to(&mut self, zoom: f32) {
        let position = self.viewport.position;
        self.viewport.move_to(position, zoom);
        self.remember(format!("zoom {:.0}%", self.viewport.zoom * 100.0));
        self.shell
            .dispatcher()
            .send_tile_reevaluation_request(TileLayer::Dynamic);
    }

    /// Map a terminal cell inside the document area to document coordinates
    pub fn cell_to_document(&self, col: u16, row: u16) -> Option<PointF> {
        let area = self.document_area?;
        if col < area.x || col >= area.x + area.width || row < area.y || row >= area.y + area.height
        {
            return None;
        }
        let x = f32::from(col - area.x) * CELL_WIDTH / self.viewport.zoom;
        let y = f32::from(row - area.y) * CELL_HEIGHT / self.viewport.zoom;
        Some(self.viewport.position.offset(x, y))
    }

    /// Document area currently on screen
    pub fn visible_rect(&self) -> RectF {
        let (cols, rows) = self
            .document_area
            .map_or((0, 0), |area| (area.width, area.height));
        RectF::from_origin_size(
            self.viewport.position,
            f32::from(cols) * CELL_WIDTH / self.viewport.zoom,
            f32::from(rows) * CELL_HEIGHT / self.viewport.zoom,
        )
    }

    fn remember(&mut self, entry: String) {
        if self.recent.len() == RECENT_LIMIT {
            self.recent.pop_front();
        }
        self.recent.push_back(entry);
    }

    fn info(&mut self, message: &str) {
        self.message = Some(StatusMessage::Info(message.to_string()));
    }
}

impl UiContext for App {
    fn is_spreadsheet(&self) -> bool {
        self.document
            .as_ref()
            .is_some_and(|doc| doc.kind == DocumentKind::Spreadsheet)
    }

    fn show_progress_spinner(&mut self) {
        self.spinner.visible = true;
    }

    fn hide_progress_spinner(&mut self) {
        self.spinner.visible = false;
    }

    fn viewport(&mut self) -> &mut dyn ViewportController {
        &mut self.viewport
    }

    fn document_loaded(&mut self, info: DocumentInfo) {
        self.message = Some(StatusMessage::Info(format!(
            "Opened {}",
            info.path.display()
        )));
        self.document = Some(info);
        self.current_part = 0;
        self.thumbnails.clear();
    }

    fn part_changed(&mut self, part: i32) {
        self.current_part = part;
    }

    fn thumbnail_ready(&mut self, thumbnail: docshell::engine::Thumbnail) {
        self.thumbnails.retain(|t| t.part != thumbnail.part);
        self.thumbnails.push(ThumbnailSummary {
            part: thumbnail.part,
            width: thumbnail.width,
            height: thumbnail.height,
        });
    }

    fn report_error(&mut self, message: String) {
        self.message = Some(StatusMessage::Error(message));
    }
}
