use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Plain })
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers.
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Renders a bordered button. Focused buttons take the accent color.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, is_focused: bool, is_primary: bool, theme: &T) {
    let ThemeRoles {
        accent_primary,
        accent_secondary,
        background,
        ..
    } = *theme.roles();
    let style = match (is_primary, is_focused) {
        (true, true) => Style::default().bg(accent_primary).fg(background).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(accent_primary).add_modifier(Modifier::BOLD),
        (false, true) => Style::default().bg(accent_secondary).fg(background),
        (false, false) => Style::default().fg(accent_secondary),
    };
    frame.render_widget(
        Paragraph::new(label)
            .centered()
            .style(style)
            .block(Block::bordered().border_style(theme.border_style(is_focused))),
        area,
    );
}

/// Builds `key description` hint spans, keys emphasized.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}
