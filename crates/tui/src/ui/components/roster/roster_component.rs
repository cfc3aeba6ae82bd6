use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};
use roster_types::Effect;

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers::block;

const TITLE: &str = "Students";
const EMPTY_MESSAGE: &str = "No students added yet.";
const REMOVE_LABEL: &str = "[ Remove ]";
/// Each student takes two lines: name, then age and grade.
const ROW_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy)]
struct RowHitArea {
    index: usize,
    row: Rect,
    remove_button: Rect,
}

/// Lists accepted students with a per-row remove action.
#[derive(Debug, Default)]
pub struct RosterComponent {
    list_area: Rect,
    rows: Vec<RowHitArea>,
}

impl RosterComponent {
    fn visible_rows(area: Rect) -> usize {
        usize::from(area.height / ROW_HEIGHT)
    }

    fn remove_selected(app: &App) -> Vec<Effect> {
        app.roster_view.selected().map(Effect::RemoveStudent).into_iter().collect()
    }

    fn render_row(&self, frame: &mut Frame, area: Rect, app: &App, index: usize) -> RowHitArea {
        let theme = &*app.theme;
        let Some(record) = app.form.roster().get(index) else {
            return RowHitArea {
                index,
                row: area,
                remove_button: Rect::default(),
            };
        };
        let selected = app.roster_view.selected() == Some(index);
        let highlight = selected && app.roster_view.is_focused();

        let remove_width = u16::try_from(REMOVE_LABEL.len()).unwrap_or(u16::MAX);
        let [text_area, remove_button] = Layout::horizontal([Constraint::Min(0), Constraint::Length(remove_width)]).areas(area);
        let [remove_button, _] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(remove_button);

        let marker = if selected { "› " } else { "  " };
        let name_style = if highlight {
            theme.selection_style().add_modifier(Modifier::BOLD)
        } else {
            theme.text_primary_style().add_modifier(Modifier::BOLD)
        };
        let lines = vec![
            Line::from(vec![Span::styled(marker, theme.accent_primary_style()), Span::styled(record.name(), name_style)]),
            Line::from(vec![Span::raw("  "), Span::styled(record.summary(), theme.text_muted_style())]),
        ];
        frame.render_widget(Paragraph::new(lines), text_area);

        let remove_style = if highlight {
            theme.status_error().add_modifier(Modifier::BOLD)
        } else {
            theme.text_secondary_style()
        };
        frame.render_widget(Paragraph::new(REMOVE_LABEL).style(remove_style), remove_button);

        RowHitArea {
            index,
            row: area,
            remove_button,
        }
    }
}

impl Component for RosterComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let len = app.form.roster().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.roster_view.select_previous(len),
            KeyCode::Down | KeyCode::Char('j') => app.roster_view.select_next(len),
            KeyCode::Home => app.roster_view.select(Some(0), len),
            KeyCode::End => app.roster_view.select_last(len),
            KeyCode::Enter | KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => return Self::remove_selected(app),
            _ => return Vec::new(),
        }
        app.mark_dirty();
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let pos = Position::new(mouse.column, mouse.row);
        if !self.list_area.contains(pos) {
            return Vec::new();
        }
        let len = app.form.roster().len();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                app.focus.focus(&app.roster_view.f_list);
                app.mark_dirty();
                if let Some(hit) = self.rows.iter().find(|hit| hit.row.contains(pos)) {
                    app.roster_view.select(Some(hit.index), len);
                    if hit.remove_button.contains(pos) {
                        return vec![Effect::RemoveStudent(hit.index)];
                    }
                }
            }
            MouseEventKind::ScrollDown => {
                app.roster_view.select_next(len);
                app.mark_dirty();
            }
            MouseEventKind::ScrollUp => {
                app.roster_view.select_previous(len);
                app.mark_dirty();
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let block = block(&*app.theme, Some(TITLE), app.roster_view.is_focused());
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        self.list_area = inner;
        self.rows.clear();

        let len = app.form.roster().len();
        if len == 0 {
            frame.render_widget(Paragraph::new(EMPTY_MESSAGE).style(app.theme.text_muted_style()), inner);
            return;
        }

        let visible = Self::visible_rows(inner);
        app.roster_view.scroll_to_selection(visible);
        let start = app.roster_view.offset().min(len);
        let end = (start + visible).min(len);
        for (slot, index) in (start..end).enumerate() {
            let y = inner.y + u16::try_from(slot).unwrap_or(u16::MAX) * ROW_HEIGHT;
            let row = Rect::new(inner.x, y, inner.width, ROW_HEIGHT);
            let hit = self.render_row(frame, row, app, index);
            self.rows.push(hit);
        }
    }
}
