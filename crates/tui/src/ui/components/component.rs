//! Component abstraction for the roster TUI.
//!
//! Components own their local view concerns (layout rectangles, hit testing)
//! and render into a provided `Rect`. Anything that changes the roster or
//! resets the draft is reported back as an [`Effect`] for the runtime to
//! apply.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};
use roster_types::{Effect, Msg};

use crate::app::App;

pub(crate) trait Component {
    /// Handle an application-level message. Most components ignore these.
    fn update(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a key event while this component holds focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a mouse event. Components hit-test against the areas recorded
    /// during their last render.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Draw into `rect`. Implementations only touch the frame and their own
    /// layout cache.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
