//! Top-level screen: header, entry form, roster and key hints.
//!
//! `MainView` owns the child components, handles the global bindings
//! (quit, focus traversal, clear) and routes everything else to whichever
//! component holds focus.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::Line,
    widgets::{Block, Paragraph},
};
use roster_types::{Effect, Msg};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::components::{RosterComponent, StudentFormComponent};
use crate::ui::theme::theme_helpers::build_hint_spans;

const TITLE: &str = "Student Entry Form";
const SUBTITLE: &str = "Add students and review the list below.";

#[derive(Debug, Default)]
pub struct MainView {
    form: StudentFormComponent,
    roster: RosterComponent,
}

impl MainView {
    pub fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            return vec![Effect::Quit];
        }
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                app.mark_dirty();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                app.mark_dirty();
                return Vec::new();
            }
            KeyCode::Esc => return vec![Effect::ClearDraft],
            _ => {}
        }

        if app.form_view.is_focused() {
            self.form.handle_key_events(app, key)
        } else if app.roster_view.is_focused() {
            self.roster.handle_key_events(app, key)
        } else {
            Vec::new()
        }
    }

    pub fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let mut effects = self.form.handle_mouse_events(app, mouse);
        effects.extend(self.roster.handle_mouse_events(app, mouse));
        effects
    }

    pub fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(msg);
        let mut effects = self.form.update(app, &msg);
        effects.extend(self.roster.update(app, &msg));
        effects
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        frame.render_widget(Block::default().style(app.theme.text_primary_style().bg(app.theme.roles().background)), area);

        let [header, form, roster, hints] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(StudentFormComponent::HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .spacing(1)
        .margin(1)
        .areas(area);

        let header_lines = vec![
            Line::styled(TITLE, app.theme.accent_emphasis_style().add_modifier(Modifier::BOLD)),
            Line::styled(SUBTITLE, app.theme.text_muted_style()),
        ];
        frame.render_widget(Paragraph::new(header_lines), header);

        self.form.render(frame, form, app);
        self.roster.render(frame, roster, app);

        let hint_line = Line::from(build_hint_spans(
            &*app.theme,
            &[
                ("Tab", " Next  "),
                ("Enter", " Add  "),
                ("Esc", " Clear  "),
                ("Del", " Remove  "),
                ("Ctrl+C", " Quit"),
            ],
        ));
        frame.render_widget(Paragraph::new(hint_line), hints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use roster_types::{FormField, GradeInput};

    fn draw(view: &mut MainView, app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| view.render(frame, frame.area(), app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn renders_empty_form() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let screen = draw(&mut MainView::default(), &mut app);
        for expected in [TITLE, SUBTITLE, "Name", "e.g. Aisha Patel", "e.g. 12", "e.g. 7", "Add Student", "Clear", "No students added yet."] {
            assert!(screen.contains(expected), "missing {expected:?} in\n{screen}");
        }
    }

    #[test]
    fn renders_added_student_and_error() {
        let mut app = App::for_tests(GradeInput::FreeText);
        app.form.set_field(FormField::Name, "Aisha Patel");
        app.form.set_field(FormField::Age, "12");
        app.form.set_field(FormField::Grade, "7");
        app.apply_effect(Effect::SubmitDraft);
        app.apply_effect(Effect::SubmitDraft);
        let screen = draw(&mut MainView::default(), &mut app);
        assert!(screen.contains("Aisha Patel"));
        assert!(screen.contains("Age: 12 • Grade: 7"));
        assert!(screen.contains("Remove"));
        assert!(screen.contains("Please fill in all fields."));
        assert!(!screen.contains("No students added yet."));
    }

    #[test]
    fn select_mode_shows_grade_placeholder() {
        let mut app = App::for_tests(GradeInput::default_select());
        let screen = draw(&mut MainView::default(), &mut app);
        assert!(screen.contains("◀ Select grade ▶"));
    }

    #[test]
    fn global_keys() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let mut view = MainView::default();
        let quit = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(view.handle_key_events(&mut app, quit), vec![Effect::Quit]);
        assert_eq!(view.handle_key_events(&mut app, press(KeyCode::Esc)), vec![Effect::ClearDraft]);

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            ..press(KeyCode::Esc)
        };
        assert!(view.handle_key_events(&mut app, release).is_empty());
    }

    #[test]
    fn tab_moves_focus_to_next_field() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let mut view = MainView::default();
        view.handle_key_events(&mut app, press(KeyCode::Tab));
        assert_eq!(app.form_view.focused_field(), Some(FormField::Age));
        view.handle_key_events(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.form_view.focused_field(), Some(FormField::Name));
    }

    #[test]
    fn keys_route_to_the_focused_component() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let mut view = MainView::default();
        for c in "Ana".chars() {
            view.handle_key_events(&mut app, press(KeyCode::Char(c)));
        }
        assert_eq!(app.form.draft().name, "Ana");

        app.focus.focus(&app.roster_view.f_list);
        view.handle_key_events(&mut app, press(KeyCode::Char('x')));
        assert_eq!(app.form.draft().name, "Ana");
    }
}
