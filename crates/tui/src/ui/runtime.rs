//! Runtime: terminal lifecycle, event loop and effect dispatch.
//!
//! - Owns raw mode, the alternate screen and mouse capture, and restores
//!   them on every exit path, including panics.
//! - A blocking task reads crossterm events and forwards them over an mpsc
//!   channel so the async loop never blocks on terminal input.
//! - Each event is routed through `MainView`; returned `Effect`s are applied
//!   to `App` in order before the next event is read.
//! - A frame is drawn only when `App` reports itself dirty.

use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend};
use roster_types::{Effect, Msg};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::app::App;
use crate::ui::main_view::MainView;

type RosterTerminal = Terminal<CrosstermBackend<Stdout>>;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);
const IDLE_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Spawn a blocking task that forwards terminal events to the returned
/// receiver. The task stops once the receiver is dropped or reading fails.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(256);
    tokio::task::spawn_blocking(move || {
        loop {
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if sender.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        warn!(%error, "failed to read terminal event");
                        break;
                    }
                },
                Ok(false) if sender.is_closed() => break,
                Ok(false) => {}
                Err(error) => {
                    warn!(%error, "failed to poll terminal events");
                    break;
                }
            }
        }
    });
    receiver
}

fn setup_terminal() -> Result<RosterTerminal> {
    enable_raw_mode().context("failed to enable raw mode")?;
    release_raw_mode_on_error(enter_screen())
}

fn enter_screen() -> Result<RosterTerminal> {
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Leaves raw mode when a setup step after `enable_raw_mode` failed.
fn release_raw_mode_on_error<T>(result: Result<T>) -> Result<T> {
    if let Err(error) = &result {
        warn!(%error, "terminal setup failed; leaving raw mode");
        let _ = disable_raw_mode();
    }
    result
}

fn cleanup_terminal(terminal: &mut RosterTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Restore the terminal before the default panic message is printed.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        previous(panic_info);
    }));
}

fn render(terminal: &mut RosterTerminal, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

async fn event_loop(
    terminal: &mut RosterTerminal,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let mut ticker = time::interval(IDLE_TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, main_view)?;
    app.take_dirty();

    loop {
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(input_event) = maybe_event else {
                    warn!("terminal input closed; exiting");
                    break;
                };
                let effects = handle_input_event(app, main_view, input_event);
                app.apply_effects(effects);
            }
            _ = ticker.tick() => {
                let effects = main_view.handle_message(app, Msg::Tick);
                app.apply_effects(effects);
            }
            _ = signal::ctrl_c() => {
                info!("interrupt received; exiting");
                break;
            }
        }

        if app.should_quit() {
            break;
        }
        if app.take_dirty() {
            render(terminal, app, main_view)?;
        }
    }
    Ok(())
}

/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal whether or not the loop failed.
pub async fn run_app(mut app: App) -> Result<()> {
    install_panic_hook();
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::default();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver).await;
    let cleanup = cleanup_terminal(&mut terminal);

    info!(students = app.form.roster().len(), "roster session ended");
    result.and(cleanup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_failure_is_returned_after_leaving_raw_mode() {
        let result: Result<()> = release_raw_mode_on_error(Err(anyhow::anyhow!("no tty")));
        assert_eq!(result.unwrap_err().to_string(), "no tty");
        assert!(!crossterm::terminal::is_raw_mode_enabled().unwrap_or(false));
    }

    #[test]
    fn setup_success_passes_through() {
        assert_eq!(release_raw_mode_on_error(Ok(7)).unwrap(), 7);
    }
}
