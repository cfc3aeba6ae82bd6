mod state;
mod student_form_component;

pub use state::StudentFormState;
pub use student_form_component::StudentFormComponent;
