use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Names one of the three editable draft fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Age,
    Grade,
}

impl FormField {
    /// All fields in the order they are rendered and validated.
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Age, FormField::Grade];

    /// Label rendered above the input.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Age => "Age",
            FormField::Grade => "Grade",
        }
    }

    /// Placeholder rendered while the input is empty.
    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Name => "e.g. Aisha Patel",
            FormField::Age => "e.g. 12",
            FormField::Grade => "e.g. 7",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Name => "name",
            FormField::Age => "age",
            FormField::Grade => "grade",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFormFieldError;

impl fmt::Display for ParseFormFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid form field; expected 'name', 'age' or 'grade'")
    }
}

impl Error for ParseFormFieldError {}

impl FromStr for FormField {
    type Err = ParseFormFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            "grade" => Ok(Self::Grade),
            _ => Err(ParseFormFieldError),
        }
    }
}

/// The entry currently being edited. Values are kept exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub name: String,
    pub age: String,
    pub grade: String,
}

impl Draft {
    pub fn new(name: impl Into<String>, age: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            grade: grade.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Age => &self.age,
            FormField::Grade => &self.grade,
        }
    }

    /// Overwrites exactly one field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Age => &mut self.age,
            FormField::Grade => &mut self.grade,
        };
        *slot = value.into();
    }

    /// True when every field is the empty string.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.age.is_empty() && self.grade.is_empty()
    }
}

/// A validated roster entry.
///
/// Only [`validate`] constructs records, so `age` always holds canonical
/// numeric text and `name`/`grade` are never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    name: String,
    age: String,
    grade: String,
}

impl StudentRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    /// Secondary line shown under the name in the roster list.
    pub fn summary(&self) -> String {
        format!("Age: {} • Grade: {}", self.age, self.grade)
    }
}

/// Parses `raw` as an age and returns its canonical text form.
///
/// Surrounding whitespace is ignored and decimal or exponent notation is
/// accepted. Whole numbers render without a fractional part (`"12.0"` becomes
/// `"12"`). Non-finite values and values `<= 0` are rejected.
///
/// Hex literals such as `"0x10"` do not parse, and `"Infinity"` or
/// overflowing input like `"1e400"` is treated as invalid rather than infinite.
pub fn normalize_age(raw: &str) -> Option<String> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    if value.fract() == 0.0 && value < 1e15 {
        return Some(format!("{}", value as u64));
    }
    Some(format!("{value}"))
}

/// Validates a draft, first failing check wins:
/// name, age and grade must be non-blank (in that order), then age must
/// parse as a positive number.
pub fn validate(draft: &Draft) -> Result<StudentRecord, ValidationError> {
    if FormField::ALL.iter().any(|field| draft.get(*field).trim().is_empty()) {
        return Err(ValidationError::MissingField);
    }
    let age = normalize_age(&draft.age).ok_or(ValidationError::InvalidAge)?;
    Ok(StudentRecord {
        name: draft.name.clone(),
        age,
        grade: draft.grade.clone(),
    })
}
