pub mod common;
pub mod component;
pub mod roster;
pub mod student_form;

pub use roster::{RosterComponent, RosterListState};
pub use student_form::{StudentFormComponent, StudentFormState};
