use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use roster_types::{Draft, FormField};

use crate::ui::components::common::TextInputState;

/// View state for the entry form: one text buffer per field plus focus
/// flags for the fields and the two buttons.
///
/// The buffers mirror [`Draft`]; the draft stays the source of truth and is
/// copied back with [`StudentFormState::sync_from_draft`] after effects run.
#[derive(Debug, Clone)]
pub struct StudentFormState {
    container_focus: FocusFlag,
    pub f_name: FocusFlag,
    pub f_age: FocusFlag,
    pub f_grade: FocusFlag,
    pub f_add: FocusFlag,
    pub f_clear: FocusFlag,
    name: TextInputState,
    age: TextInputState,
    grade: TextInputState,
}

impl Default for StudentFormState {
    fn default() -> Self {
        Self {
            container_focus: FocusFlag::named("student_form"),
            f_name: FocusFlag::named("student_form.name"),
            f_age: FocusFlag::named("student_form.age"),
            f_grade: FocusFlag::named("student_form.grade"),
            f_add: FocusFlag::named("student_form.add"),
            f_clear: FocusFlag::named("student_form.clear"),
            name: TextInputState::default(),
            age: TextInputState::default(),
            grade: TextInputState::default(),
        }
    }
}

impl StudentFormState {
    pub fn input(&self, field: FormField) -> &TextInputState {
        match field {
            FormField::Name => &self.name,
            FormField::Age => &self.age,
            FormField::Grade => &self.grade,
        }
    }

    pub fn input_mut(&mut self, field: FormField) -> &mut TextInputState {
        match field {
            FormField::Name => &mut self.name,
            FormField::Age => &mut self.age,
            FormField::Grade => &mut self.grade,
        }
    }

    pub fn field_flag(&self, field: FormField) -> &FocusFlag {
        match field {
            FormField::Name => &self.f_name,
            FormField::Age => &self.f_age,
            FormField::Grade => &self.f_grade,
        }
    }

    /// The input field holding focus, if any.
    pub fn focused_field(&self) -> Option<FormField> {
        FormField::ALL.into_iter().find(|field| self.field_flag(*field).get())
    }

    /// True when any field or button of the form holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused_field().is_some() || self.f_add.get() || self.f_clear.get()
    }

    /// Copies draft values into buffers that diverge from it. Buffers that
    /// already match keep their cursor.
    pub fn sync_from_draft(&mut self, draft: &Draft) {
        for field in FormField::ALL {
            let value = draft.get(field);
            let buffer = self.input_mut(field);
            if buffer.input() != value {
                buffer.set_input(value);
            }
        }
    }
}

impl HasFocus for StudentFormState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_name);
        builder.leaf_widget(&self.f_age);
        builder.leaf_widget(&self.f_grade);
        builder.leaf_widget(&self.f_add);
        builder.leaf_widget(&self.f_clear);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
