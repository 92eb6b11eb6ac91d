//! Light and dark palettes.

use ratatui::style::{Color, Modifier, Style};

use crate::ThemeMode;

/// Frames for the braille spinner shown while a request is outstanding.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

pub fn spinner_char(frame: usize) -> char {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub focus: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub user_fg: Color,
    pub user_bg: Color,
    pub assistant: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(250, 250, 250),
            text: Color::Rgb(33, 33, 33),
            dim: Color::Rgb(117, 117, 117),
            border: Color::Rgb(189, 189, 189),
            focus: Color::Rgb(25, 118, 210),
            header_fg: Color::White,
            header_bg: Color::Rgb(25, 118, 210),
            user_fg: Color::White,
            user_bg: Color::Rgb(25, 118, 210),
            assistant: Color::Rgb(33, 33, 33),
            error: Color::Rgb(211, 47, 47),
            highlight_bg: Color::Rgb(227, 236, 250),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 18),
            text: Color::Rgb(238, 238, 238),
            dim: Color::Rgb(150, 150, 150),
            border: Color::Rgb(70, 70, 70),
            focus: Color::Rgb(144, 202, 249),
            header_fg: Color::Rgb(18, 18, 18),
            header_bg: Color::Rgb(144, 202, 249),
            user_fg: Color::Rgb(18, 18, 18),
            user_bg: Color::Rgb(144, 202, 249),
            assistant: Color::Rgb(238, 238, 238),
            error: Color::Rgb(244, 67, 54),
            highlight_bg: Color::Rgb(40, 52, 70),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

impl From<ThemeMode> for Theme {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Theme::light(),
            ThemeMode::Dark => Theme::dark(),
        }
    }
}
