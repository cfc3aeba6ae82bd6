//! Application state for the roster TUI.
//!
//! [`App`] owns the [`StudentForm`] together with the view state of each
//! component and the focus tree. The runtime is the only caller of
//! [`App::apply_effect`], which keeps every roster change on one path.

use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use roster_types::{Effect, GradeInput, Msg, StudentForm};
use tracing::debug;

use crate::ui::components::{RosterListState, StudentFormState};
use crate::ui::theme::Theme;

pub struct App {
    pub form: StudentForm,
    pub form_view: StudentFormState,
    pub roster_view: RosterListState,
    pub theme: Box<dyn Theme>,
    pub focus: Focus,
    container_focus: FocusFlag,
    dirty: bool,
    should_quit: bool,
}

impl App {
    pub fn new(grade_input: GradeInput, theme: Box<dyn Theme>) -> Self {
        let mut app = Self {
            form: StudentForm::new(grade_input),
            form_view: StudentFormState::default(),
            roster_view: RosterListState::default(),
            theme,
            focus: Focus::default(),
            container_focus: FocusFlag::named("app"),
            dirty: true,
            should_quit: false,
        };
        app.focus = FocusBuilder::rebuild_for(&app, None);
        app.focus.focus(&app.form_view.f_name);
        app
    }

    #[cfg(test)]
    pub(crate) fn for_tests(grade_input: GradeInput) -> Self {
        Self::new(grade_input, Box::new(crate::ui::theme::DraculaTheme::new()))
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a redraw is pending and resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.mark_dirty();
            }
            Msg::Tick => {}
        }
    }

    pub fn apply_effects(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    pub fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SubmitDraft => match self.form.submit().map(|_| ()) {
                Ok(()) => {
                    let len = self.form.roster().len();
                    self.roster_view.select(Some(len - 1), len);
                    self.focus.focus(&self.form_view.f_name);
                }
                Err(error) => debug!(%error, "submission rejected"),
            },
            Effect::ClearDraft => {
                self.form.reset_draft();
                self.focus.focus(&self.form_view.f_name);
            }
            Effect::RemoveStudent(index) => {
                self.form.remove_at(index);
                self.roster_view.clamp(self.form.roster().len());
            }
            Effect::CycleGrade { forward } => self.form.cycle_grade(forward),
            Effect::Quit => self.should_quit = true,
        }
        self.form_view.sync_from_draft(self.form.draft());
        self.mark_dirty();
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.widget(&self.form_view);
        builder.widget(&self.roster_view);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
