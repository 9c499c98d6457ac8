//! Handles the UI side needs to talk to the engine worker.

use crate::config::Config;
use crate::dispatcher::EventDispatcher;
use crate::display::{self, DisplayMetrics, MemoryService};
use crate::geometry::PointF;
use crate::poster::{MainThreadPoster, UiContext};

/// Bundle of the event dispatcher, the UI poster and the settings they need.
/// Clone it into whatever component has to send events or post UI updates.
#[derive(Debug, Clone)]
pub struct Shell {
    dispatcher: EventDispatcher,
    poster: MainThreadPoster,
    config: Config,
}

impl Shell {
    pub fn new(dispatcher: EventDispatcher, poster: MainThreadPoster, config: Config) -> Self {
        Self {
            dispatcher,
            poster,
            config,
        }
    }

    /// Event dispatcher feeding the worker thread
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Poster for UI-thread actions
    pub fn poster(&self) -> &MainThreadPoster {
        &self.poster
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn show_progress_spinner(&self) {
        self.poster.show_progress_spinner();
    }

    pub fn hide_progress_spinner(&self) {
        self.poster.hide_progress_spinner();
    }

    pub fn move_viewport_to(&self, position: PointF, zoom: f32) {
        self.poster.move_viewport_to(position, zoom);
    }

    /// Rendering DPI using the configured display density
    pub fn get_dpi(&self, ctx: &impl UiContext) -> f32 {
        display::get_dpi(ctx, &DisplayMetrics::new(self.config.display.density))
    }

    pub fn get_memory_class(&self, service: &impl MemoryService) -> u64 {
        display::get_memory_class(service)
    }

    pub fn is_editing_enabled(&self) -> bool {
        display::is_editing_enabled(&self.config.editing)
    }
}
