//! # Student Roster TUI
//!
//! Terminal front end for the student entry form. The form logic lives in
//! `roster-types`; this crate renders it with Ratatui, reads input through
//! Crossterm and routes keyboard focus with `rat-focus`.
//!
//! ## Architecture
//!
//! Components (the entry form and the roster list) render themselves and
//! translate input into [`roster_types::Effect`]s. The runtime applies those
//! effects to [`App`] one at a time, so the form has a single writer.

mod app;
mod ui;

use anyhow::{Context, Result};
use roster_util::RosterConfig;
use tracing::info;

use app::App;

/// Runs the roster TUI until the user quits.
///
/// # Errors
///
/// Fails when the grade configuration is invalid or the terminal cannot be
/// put into raw mode.
pub async fn run(config: &RosterConfig) -> Result<()> {
    let grade_input = config.grade_input().context("invalid grade configuration")?;
    let theme = ui::theme::load(config.theme.as_deref());
    info!(theme = theme.label, grade_select = grade_input.is_select(), "starting roster TUI");
    ui::runtime::run_app(App::new(grade_input, theme.build())).await
}
