use serde::{Deserialize, Serialize};

/// Options offered when the grade is picked from a fixed list.
pub const DEFAULT_GRADE_OPTIONS: [&str; 6] = ["5", "6", "7", "8", "9", "10"];

/// How the grade field is edited.
///
/// Either way the chosen value lands in [`crate::Draft::grade`] as text and is
/// validated like any other field; an unselected choice is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GradeInput {
    #[default]
    FreeText,
    Select { options: Vec<String> },
}

impl GradeInput {
    /// Selector over [`DEFAULT_GRADE_OPTIONS`].
    pub fn default_select() -> Self {
        GradeInput::Select {
            options: DEFAULT_GRADE_OPTIONS.iter().map(|option| option.to_string()).collect(),
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, GradeInput::Select { .. })
    }

    pub fn options(&self) -> &[String] {
        match self {
            GradeInput::FreeText => &[],
            GradeInput::Select { options } => options,
        }
    }

    /// Next value when cycling through `"" → options… → ""`.
    ///
    /// A current value that is not an option restarts the cycle. Returns
    /// `None` in free-text mode.
    pub fn cycle(&self, current: &str, forward: bool) -> Option<String> {
        let GradeInput::Select { options } = self else {
            return None;
        };
        if options.is_empty() {
            return Some(String::new());
        }
        // Slot 0 is the unselected state, slots 1..=len map to options.
        let slots = options.len() + 1;
        let position = options.iter().position(|option| option == current).map_or(0, |index| index + 1);
        let next = if forward { (position + 1) % slots } else { (position + slots - 1) % slots };
        Some(if next == 0 { String::new() } else { options[next - 1].clone() })
    }
}
