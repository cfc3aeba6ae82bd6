use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use roster_types::{Effect, FormField};
use tracing::trace;

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::Theme;
use crate::ui::theme::theme_helpers::{block, render_button};

const ADD_LABEL: &str = "Add Student";
const CLEAR_LABEL: &str = "Clear";
const GRADE_PLACEHOLDER: &str = "Select grade";

/// Rectangles recorded during render for pointer hit-testing.
#[derive(Debug, Default, Clone, Copy)]
struct StudentFormLayout {
    fields: [Rect; 3],
    error: Rect,
    add_button: Rect,
    clear_button: Rect,
}

impl StudentFormLayout {
    fn field_area(&self, field: FormField) -> Rect {
        self.fields[field_index(field)]
    }
}

fn field_index(field: FormField) -> usize {
    match field {
        FormField::Name => 0,
        FormField::Age => 1,
        FormField::Grade => 2,
    }
}

/// Renders the three inputs, the inline error and the two action buttons.
#[derive(Debug, Default)]
pub struct StudentFormComponent {
    layout: StudentFormLayout,
}

impl StudentFormComponent {
    /// Rows needed to draw the form.
    pub const HEIGHT: u16 = 7;

    fn compute_layout(area: Rect, error_visible: bool) -> StudentFormLayout {
        let [inputs, error, buttons] = Layout::vertical([Constraint::Length(3), Constraint::Length(1), Constraint::Length(3)]).areas(area);
        let fields: [Rect; 3] = Layout::horizontal([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)]).areas(inputs);
        let button_width = |label: &str| u16::try_from(label.len()).unwrap_or(u16::MAX).saturating_add(4);
        let [add_button, _, clear_button, _] = Layout::horizontal([
            Constraint::Length(button_width(ADD_LABEL)),
            Constraint::Length(1),
            Constraint::Length(button_width(CLEAR_LABEL)),
            Constraint::Min(0),
        ])
        .areas(buttons);
        StudentFormLayout {
            fields,
            error: if error_visible { error } else { Rect::default() },
            add_button,
            clear_button,
        }
    }

    fn handle_field_keys(&self, app: &mut App, field: FormField, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Enter {
            return vec![Effect::SubmitDraft];
        }
        if field == FormField::Grade && app.form.grade_input().is_select() {
            return match key.code {
                KeyCode::Left | KeyCode::Up => vec![Effect::CycleGrade { forward: false }],
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => vec![Effect::CycleGrade { forward: true }],
                _ => Vec::new(),
            };
        }

        let buffer = app.form_view.input_mut(field);
        let edited = match key.code {
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                buffer.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                buffer.backspace();
                true
            }
            KeyCode::Delete => {
                buffer.delete();
                true
            }
            KeyCode::Left => {
                buffer.move_left();
                false
            }
            KeyCode::Right => {
                buffer.move_right();
                false
            }
            KeyCode::Home => {
                buffer.move_home();
                false
            }
            KeyCode::End => {
                buffer.move_end();
                false
            }
            _ => false,
        };
        if edited {
            let value = buffer.input().to_string();
            trace!(%field, "draft field edited");
            app.form.set_field(field, value);
        }
        app.mark_dirty();
        Vec::new()
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, app: &App, field: FormField) {
        let theme = &*app.theme;
        let focused = app.form_view.field_flag(field).get();
        let block = block(theme, Some(field.label()), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if field == FormField::Grade && app.form.grade_input().is_select() {
            frame.render_widget(Paragraph::new(grade_selector_line(theme, &app.form.draft().grade)), inner);
            return;
        }

        let buffer = app.form_view.input(field);
        if buffer.input().is_empty() {
            frame.render_widget(Paragraph::new(field.placeholder()).style(theme.text_muted_style()), inner);
        } else {
            let scroll = buffer.cursor_column().saturating_sub(inner.width.saturating_sub(1));
            frame.render_widget(
                Paragraph::new(buffer.input().to_string())
                    .style(theme.text_primary_style())
                    .scroll((0, scroll)),
                inner,
            );
        }
        if focused && inner.width > 0 {
            let column = buffer.cursor_column().min(inner.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(inner.x + column, inner.y));
        }
    }
}

fn grade_selector_line<'a>(theme: &dyn Theme, grade: &'a str) -> Line<'a> {
    let value = if grade.is_empty() {
        Span::styled(GRADE_PLACEHOLDER, theme.text_muted_style())
    } else {
        Span::styled(grade, theme.text_primary_style())
    };
    Line::from(vec![
        Span::styled("◀ ", theme.accent_primary_style()),
        value,
        Span::styled(" ▶", theme.accent_primary_style()),
    ])
}

impl Component for StudentFormComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if let Some(field) = app.form_view.focused_field() {
            return self.handle_field_keys(app, field, key);
        }
        let activates = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
        if activates && app.form_view.f_add.get() {
            return vec![Effect::SubmitDraft];
        }
        if activates && app.form_view.f_clear.get() {
            return vec![Effect::ClearDraft];
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let pos = Position::new(mouse.column, mouse.row);

        if self.layout.add_button.contains(pos) {
            app.focus.focus(&app.form_view.f_add);
            return vec![Effect::SubmitDraft];
        }
        if self.layout.clear_button.contains(pos) {
            app.focus.focus(&app.form_view.f_clear);
            return vec![Effect::ClearDraft];
        }
        for field in FormField::ALL {
            let area = self.layout.field_area(field);
            if !area.contains(pos) {
                continue;
            }
            app.focus.focus(app.form_view.field_flag(field));
            let is_select = field == FormField::Grade && app.form.grade_input().is_select();
            if !is_select {
                // Border occupies the first column.
                let column = mouse.column.saturating_sub(area.x + 1);
                app.form_view.input_mut(field).set_cursor_from_column(column);
            }
            app.mark_dirty();
            break;
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let error = app.form.error();
        let layout = Self::compute_layout(rect, error.is_some());

        for field in FormField::ALL {
            self.render_field(frame, layout.field_area(field), app, field);
        }
        if let Some(error) = error {
            frame.render_widget(Paragraph::new(error.to_string()).style(app.theme.status_error()), layout.error);
        }
        render_button(frame, layout.add_button, ADD_LABEL, app.form_view.f_add.get(), true, &*app.theme);
        render_button(frame, layout.clear_button, CLEAR_LABEL, app.form_view.f_clear.get(), false, &*app.theme);

        self.layout = layout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crossterm::event::KeyEventKind;
    use roster_types::{GradeInput, ValidationError};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(component: &mut StudentFormComponent, app: &mut App, text: &str) {
        for c in text.chars() {
            let effects = component.handle_key_events(app, key(KeyCode::Char(c)));
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn typing_updates_the_draft_field() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let mut component = StudentFormComponent::default();
        app.focus.focus(&app.form_view.f_name);
        type_text(&mut component, &mut app, "Aisha");
        component.handle_key_events(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.form.draft().name, "Aish");
        assert_eq!(app.form_view.input(FormField::Name).input(), "Aish");
    }

    #[test]
    fn control_chords_are_not_inserted() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let mut component = StudentFormComponent::default();
        app.focus.focus(&app.form_view.f_age);
        let chord = KeyEvent {
            kind: KeyEventKind::Press,
            ..KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)
        };
        component.handle_key_events(&mut app, chord);
        assert_eq!(app.form.draft().age, "");
    }

    #[test]
    fn enter_in_a_field_requests_submit() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let mut component = StudentFormComponent::default();
        app.focus.focus(&app.form_view.f_grade);
        assert_eq!(component.handle_key_events(&mut app, key(KeyCode::Enter)), vec![Effect::SubmitDraft]);
    }

    #[test]
    fn buttons_map_to_submit_and_clear() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let mut component = StudentFormComponent::default();
        app.focus.focus(&app.form_view.f_add);
        assert_eq!(component.handle_key_events(&mut app, key(KeyCode::Enter)), vec![Effect::SubmitDraft]);
        app.focus.focus(&app.form_view.f_clear);
        assert_eq!(component.handle_key_events(&mut app, key(KeyCode::Char(' '))), vec![Effect::ClearDraft]);
    }

    #[test]
    fn select_mode_grade_cycles_instead_of_typing() {
        let mut app = App::for_tests(GradeInput::default_select());
        let mut component = StudentFormComponent::default();
        app.focus.focus(&app.form_view.f_grade);
        assert_eq!(
            component.handle_key_events(&mut app, key(KeyCode::Right)),
            vec![Effect::CycleGrade { forward: true }]
        );
        assert!(component.handle_key_events(&mut app, key(KeyCode::Char('7'))).is_empty());
        assert_eq!(app.form.draft().grade, "");
    }

    #[test]
    fn full_entry_through_keys_adds_student() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let mut component = StudentFormComponent::default();
        for (flag, text) in [
            (app.form_view.f_name.clone(), "Aisha Patel"),
            (app.form_view.f_age.clone(), "12"),
            (app.form_view.f_grade.clone(), "7"),
        ] {
            app.focus.focus(&flag);
            type_text(&mut component, &mut app, text);
        }
        let effects = component.handle_key_events(&mut app, key(KeyCode::Enter));
        app.apply_effects(effects);
        assert_eq!(app.form.roster().len(), 1);
        assert_eq!(app.form_view.input(FormField::Name).input(), "");
        assert_eq!(app.form.error(), None);
    }

    #[test]
    fn rejected_entry_keeps_typed_values() {
        let mut app = App::for_tests(GradeInput::FreeText);
        let mut component = StudentFormComponent::default();
        app.focus.focus(&app.form_view.f_age);
        type_text(&mut component, &mut app, "12");
        let effects = component.handle_key_events(&mut app, key(KeyCode::Enter));
        app.apply_effects(effects);
        assert_eq!(app.form.error(), Some(ValidationError::MissingField));
        assert_eq!(app.form_view.input(FormField::Age).input(), "12");
    }
}
