use ratatui::style::Color;

/// Pane colors, plus the palette the embedded SGR markers are mapped onto
pub struct Theme {
    pub fg: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub status: Color,
    pub status_bg: Color,
    pub dim: Color,      // 1;30, errors and placeholders
    pub red: Color,      // changed values
    pub green: Color,    // new names
    pub yellow: Color,   // not yet initialised
    pub blue: Color,
    pub magenta: Color,  // arguments
    pub cyan: Color,     // pinned alias marker
    pub white: Color,    // selected thread/frame
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    status: Color::Rgb(137, 180, 250),
    status_bg: Color::Rgb(49, 50, 68),
    dim: Color::Rgb(108, 112, 134),
    red: Color::Rgb(243, 139, 168),
    green: Color::Rgb(166, 227, 161),
    yellow: Color::Rgb(249, 226, 175),
    blue: Color::Rgb(137, 180, 250),
    magenta: Color::Rgb(245, 194, 231),
    cyan: Color::Rgb(148, 226, 213),
    white: Color::Rgb(255, 255, 255),
};

impl Theme {
    /// Color for an SGR foreground code (30-37, 90-97). Bold black is the
    /// conventional "dim" and gets its own color.
    pub fn sgr_foreground(&self, code: u16, bold: bool) -> Option<Color> {
        let base = match code {
            30..=37 => code - 30,
            90..=97 => code - 90,
            _ => return None,
        };
        Some(match base {
            0 if bold => self.dim,
            0 => Color::Black,
            1 => self.red,
            2 => self.green,
            3 => self.yellow,
            4 => self.blue,
            5 => self.magenta,
            6 => self.cyan,
            _ if bold => self.white,
            _ => self.fg,
        })
    }
}
