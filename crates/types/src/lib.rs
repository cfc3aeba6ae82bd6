//! Shared domain types for the student roster.
//!
//! The crate holds everything that does not depend on a terminal: the draft
//! being edited, validated [`StudentRecord`]s, the ordered [`Roster`], the
//! [`StudentForm`] state machine that ties them together, and the
//! [`Effect`]/[`Msg`] vocabulary the UI uses to request changes.

pub mod error;
pub mod form;
pub mod grade;
pub mod messages;
pub mod roster;
pub mod student;

pub use error::ValidationError;
pub use form::StudentForm;
pub use grade::{DEFAULT_GRADE_OPTIONS, GradeInput};
pub use messages::{Effect, Msg};
pub use roster::Roster;
pub use student::{Draft, FormField, ParseFormFieldError, StudentRecord, normalize_age, validate};
