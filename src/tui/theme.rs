//! Theme module for centralized color and style definitions

use ratatui::style::{Color, Modifier, Style};

use crate::focus_timing::Mode;

/// Application theme with all color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // === Timer modes ===
    pub mode_focus: Color,
    pub mode_short_break: Color,
    pub mode_long_break: Color,

    // === UI Elements ===
    /// Primary accent color (headers, titles)
    pub accent: Color,
    /// Text color for normal content
    pub text: Color,
    /// Text color for muted/secondary content
    pub text_muted: Color,
    /// Color for selected/focused items
    pub selected: Color,
    /// Completed tasks and projects
    pub done: Color,
    /// Color for input mode prompts
    pub input_prompt: Color,

    // === Borders ===
    pub border: Color,
    pub border_focused: Color,
    pub border_warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            mode_focus: Color::Red,
            mode_short_break: Color::Green,
            mode_long_break: Color::Blue,

            accent: Color::Cyan,
            text: Color::White,
            text_muted: Color::DarkGray,
            selected: Color::White,
            done: Color::Green,
            input_prompt: Color::Magenta,

            border: Color::White,
            border_focused: Color::Cyan,
            border_warning: Color::Yellow,
        }
    }

    /// Color associated with a timer mode
    pub fn mode_color(&self, mode: Mode) -> Color {
        match mode {
            Mode::Focus => self.mode_focus,
            Mode::ShortBreak => self.mode_short_break,
            Mode::LongBreak => self.mode_long_break,
        }
    }

    /// Style for headers/titles
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for muted text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for selected items
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Style for input prompts
    pub fn input_style(&self) -> Style {
        Style::default().fg(self.input_prompt)
    }
}

/// Parse a `#rrggbb` color, as stored on checkpoints
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Global theme instance
static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

/// Get the current theme
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
