//! The student entry form state machine.
//!
//! [`StudentForm`] owns the draft, the inline error and the roster in one
//! value so that a successful submission appends, resets and clears in a
//! single step while a rejected one leaves both draft and roster untouched.

use tracing::{debug, info};

use crate::{Draft, FormField, GradeInput, Roster, StudentRecord, ValidationError, validate};

#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    draft: Draft,
    error: Option<ValidationError>,
    roster: Roster,
    grade_input: GradeInput,
}

impl StudentForm {
    pub fn new(grade_input: GradeInput) -> Self {
        Self {
            grade_input,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn grade_input(&self) -> &GradeInput {
        &self.grade_input
    }

    /// Overwrites one draft field. No validation happens here and the current
    /// error, if any, stays visible until the next submission.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Steps the grade selector; no-op for free-text grades.
    pub fn cycle_grade(&mut self, forward: bool) {
        if let Some(next) = self.grade_input.cycle(&self.draft.grade, forward) {
            debug!(grade = %next, "grade selection changed");
            self.draft.grade = next;
        }
    }

    /// Empties every field and clears the error.
    pub fn reset_draft(&mut self) {
        self.draft = Draft::default();
        self.error = None;
    }

    /// Validates the draft.
    ///
    /// On success the record is appended, the draft reset and the error
    /// cleared. On failure only the error changes.
    pub fn submit(&mut self) -> Result<&StudentRecord, ValidationError> {
        match validate(&self.draft) {
            Ok(record) => {
                self.roster.append(record);
                self.reset_draft();
                info!(roster_len = self.roster.len(), "student added");
                let last = self.roster.len() - 1;
                Ok(&self.roster.list()[last])
            }
            Err(error) => {
                debug!(%error, "draft rejected");
                self.error = Some(error);
                Err(error)
            }
        }
    }

    /// Removes the student at `index`; out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<StudentRecord> {
        let removed = self.roster.remove_at(index);
        if removed.is_some() {
            info!(index, roster_len = self.roster.len(), "student removed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut StudentForm, name: &str, age: &str, grade: &str) {
        form.set_field(FormField::Name, name);
        form.set_field(FormField::Age, age);
        form.set_field(FormField::Grade, grade);
    }

    #[test]
    fn successful_submit_appends_and_resets() {
        let mut form = StudentForm::default();
        fill(&mut form, "Aisha Patel", "12", "7");
        let record = form.submit().unwrap().clone();
        assert_eq!((record.name(), record.age(), record.grade()), ("Aisha Patel", "12", "7"));
        assert_eq!(form.roster().len(), 1);
        assert!(form.draft().is_empty());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn failed_submit_preserves_draft_and_roster() {
        let mut form = StudentForm::default();
        fill(&mut form, "", "12", "7");
        assert_eq!(form.submit(), Err(ValidationError::MissingField));
        assert!(form.roster().is_empty());
        assert_eq!(form.draft(), &Draft::new("", "12", "7"));
        assert_eq!(form.error(), Some(ValidationError::MissingField));
    }

    #[test]
    fn later_attempt_overwrites_error() {
        let mut form = StudentForm::default();
        fill(&mut form, "", "12", "7");
        let _ = form.submit();
        form.set_field(FormField::Name, "Bob");
        form.set_field(FormField::Age, "-3");
        assert_eq!(form.submit(), Err(ValidationError::InvalidAge));
        assert_eq!(form.error(), Some(ValidationError::InvalidAge));
    }

    #[test]
    fn valid_resubmission_clears_previous_error() {
        let mut form = StudentForm::default();
        fill(&mut form, "Bob", "-3", "5");
        assert_eq!(form.submit(), Err(ValidationError::InvalidAge));
        assert_eq!(form.error(), Some(ValidationError::InvalidAge));

        form.set_field(FormField::Age, "11");
        assert!(form.submit().is_ok());
        assert_eq!(form.error(), None);
        assert_eq!(form.roster().len(), 1);
        assert!(form.draft().is_empty());
    }

    #[test]
    fn editing_keeps_error_until_next_submit() {
        let mut form = StudentForm::default();
        let _ = form.submit();
        form.set_field(FormField::Name, "Ana");
        assert_eq!(form.error(), Some(ValidationError::MissingField));
    }

    #[test]
    fn stored_record_is_independent_of_later_edits() {
        let mut form = StudentForm::default();
        fill(&mut form, "Ana", "10", "5");
        form.submit().unwrap();
        fill(&mut form, "Changed", "99", "9");
        assert_eq!(form.roster().list()[0].name(), "Ana");
    }

    #[test]
    fn reset_draft_is_idempotent() {
        let mut form = StudentForm::default();
        fill(&mut form, "Ana", "x", "5");
        let _ = form.submit();
        form.reset_draft();
        let once = (form.draft().clone(), form.error());
        form.reset_draft();
        assert_eq!((form.draft().clone(), form.error()), once);
        assert!(form.draft().is_empty());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn cycle_grade_only_moves_in_select_mode() {
        let mut free = StudentForm::default();
        free.cycle_grade(true);
        assert_eq!(free.draft().grade, "");

        let mut select = StudentForm::new(GradeInput::default_select());
        select.cycle_grade(true);
        select.cycle_grade(true);
        assert_eq!(select.draft().grade, "6");
        select.cycle_grade(false);
        assert_eq!(select.draft().grade, "5");
    }

    #[test]
    fn select_mode_requires_a_choice() {
        let mut form = StudentForm::new(GradeInput::default_select());
        form.set_field(FormField::Name, "Ana");
        form.set_field(FormField::Age, "11");
        assert_eq!(form.submit(), Err(ValidationError::MissingField));
        form.cycle_grade(true);
        assert_eq!(form.submit().map(|r| r.grade().to_string()), Ok("5".to_string()));
    }
}
