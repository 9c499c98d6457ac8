use ratatui::style::Color;

/// Color theme for the viewer
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the main UI
    pub bg: Color,
    /// Foreground (text) color
    pub fg: Color,
    /// Background of the document page
    pub page_bg: Color,
    /// Text drawn on the page
    pub page_fg: Color,
    /// Background for the status bar
    pub statusbar_bg: Color,
    /// Foreground for the status bar
    pub statusbar_fg: Color,
    /// Border color
    pub border: Color,
    /// Progress spinner
    pub spinner: Color,
    /// Error messages
    pub error: Color,
    /// Muted labels
    pub muted: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 30),
            fg: Color::Rgb(212, 212, 212),
            page_bg: Color::Rgb(245, 245, 240),
            page_fg: Color::Rgb(40, 40, 40),
            statusbar_bg: Color::Rgb(0, 122, 204),
            statusbar_fg: Color::Rgb(255, 255, 255),
            border: Color::Rgb(60, 60, 60),
            spinner: Color::Rgb(220, 220, 170),
            error: Color::Rgb(244, 71, 71),
            muted: Color::Rgb(133, 133, 133),
        }
    }
}
