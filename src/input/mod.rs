mod command;
pub mod keyboard;
pub mod mouse;

pub use command::{PanDirection, ViewerCommand};

use std::time::{Duration, Instant};

/// Clicks closer together than this count as one multi-click
const MULTI_CLICK_INTERVAL: Duration = Duration::from_millis(500);

/// Tracks click timing so repeated clicks can be told apart from single taps
pub struct InputHandler {
    last_click_time: Instant,
    last_click_pos: (u16, u16),
    click_count: u8,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_click_time: Instant::now(),
            last_click_pos: (0, 0),
            click_count: 0,
        }
    }

    /// Record a click and return the click count (1 = single, 2 = double)
    pub fn record_click(&mut self, x: u16, y: u16) -> u8 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_click_time);

        // Reset if too much time has passed or position changed
        if elapsed > MULTI_CLICK_INTERVAL || (x, y) != self.last_click_pos {
            self.click_count = 1;
        } else {
            self.click_count = (self.click_count % 2) + 1;
        }

        self.last_click_time = now;
        self.last_click_pos = (x, y);
        self.click_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_counting() {
        let mut handler = InputHandler::new();
        assert_eq!(handler.record_click(3, 3), 1);
        assert_eq!(handler.record_click(3, 3), 2);
        assert_eq!(handler.record_click(3, 3), 1);
        assert_eq!(handler.record_click(9, 3), 1);
    }
}
