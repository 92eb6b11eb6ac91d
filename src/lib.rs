//! pdfchat library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod backend;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Color scheme for the terminal UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}
