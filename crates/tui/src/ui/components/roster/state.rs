use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// Selection and scroll state for the roster list.
#[derive(Debug, Clone)]
pub struct RosterListState {
    container_focus: FocusFlag,
    pub f_list: FocusFlag,
    selected: Option<usize>,
    /// Index of the first visible row.
    offset: usize,
}

impl Default for RosterListState {
    fn default() -> Self {
        Self {
            container_focus: FocusFlag::named("roster"),
            f_list: FocusFlag::named("roster.list"),
            selected: None,
            offset: 0,
        }
    }
}

impl RosterListState {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_focused(&self) -> bool {
        self.f_list.get()
    }

    pub fn select(&mut self, index: Option<usize>, len: usize) {
        self.selected = index.filter(|_| len > 0).map(|i| i.min(len - 1));
    }

    pub fn select_next(&mut self, len: usize) {
        let next = self.selected.map_or(0, |i| i.saturating_add(1));
        self.select(Some(next), len);
    }

    pub fn select_previous(&mut self, len: usize) {
        let previous = self.selected.map_or(0, |i| i.saturating_sub(1));
        self.select(Some(previous), len);
    }

    pub fn select_last(&mut self, len: usize) {
        self.select(len.checked_sub(1), len);
    }

    /// Keeps the selection inside a roster of `len` records, selecting the
    /// first row when the list becomes non-empty.
    pub fn clamp(&mut self, len: usize) {
        self.select(self.selected.or(Some(0)), len);
        self.offset = self.offset.min(len.saturating_sub(1));
    }

    /// Adjusts the scroll offset so the selection is inside a window of
    /// `visible` rows.
    pub fn scroll_to_selection(&mut self, visible: usize) {
        let Some(selected) = self.selected else {
            self.offset = 0;
            return;
        };
        if visible == 0 {
            return;
        }
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + visible {
            self.offset = selected + 1 - visible;
        }
    }
}

impl HasFocus for RosterListState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_list);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = RosterListState::default();
        state.select_next(0);
        assert_eq!(state.selected(), None);
        state.select_next(2);
        assert_eq!(state.selected(), Some(0));
        state.select_next(2);
        state.select_next(2);
        assert_eq!(state.selected(), Some(1));
        state.select_previous(2);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn clamp_after_removing_last_row() {
        let mut state = RosterListState::default();
        state.select(Some(2), 3);
        state.clamp(2);
        assert_eq!(state.selected(), Some(1));
        state.clamp(0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        let mut state = RosterListState::default();
        state.select(Some(5), 10);
        state.scroll_to_selection(3);
        assert_eq!(state.offset(), 3);
        state.select(Some(1), 10);
        state.scroll_to_selection(3);
        assert_eq!(state.offset(), 1);
    }
}
