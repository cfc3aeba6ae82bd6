//! Color palettes and style helpers for the terminal UI.
//!
//! Prefer the [`Theme`] role accessors and [`theme_helpers`] over hard-coded
//! colors so every palette renders consistently.

use std::env;

use tracing::{debug, warn};

pub mod ansi256;
pub mod catalog;
pub mod dracula;
pub mod roles;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use catalog::ThemeDefinition;
pub use dracula::DraculaTheme;
pub use roles::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Selects a theme from `TUI_THEME`, then `preferred`, then the default for
/// the detected color capability. ANSI-only terminals always get the indexed
/// palette.
pub fn load(preferred: Option<&str>) -> &'static ThemeDefinition {
    if detect_color_capability() == ColorCapability::Ansi256 {
        debug!("ANSI-only terminal detected; using indexed palette");
        return catalog::default_for(true);
    }

    let env_choice = env::var("TUI_THEME").ok();
    for name in [env_choice.as_deref(), preferred].into_iter().flatten() {
        match catalog::resolve(name) {
            Some(definition) => return definition,
            None => warn!(theme = name, "unknown theme; falling back"),
        }
    }

    catalog::default_for(false)
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var("TUI_COLOR_MODE").ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") || term.contains("direct") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}
