use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected before any mutation was attempted.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required name field is empty after trimming.
    EmptyName { field: &'static str },
    /// Category weight is not a finite percentage in `0..=100`.
    InvalidWeight(f64),
    /// Grade is NaN or infinite.
    InvalidGrade(f64),
    /// Color is not `#rgb` or `#rrggbb`.
    InvalidColor(String),
    /// Bulk create asked for zero copies.
    ZeroRepeatCount,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { field } => write!(f, "{field} cannot be empty"),
            Self::InvalidWeight(weight) => {
                write!(f, "category weight must be within 0..=100, got {weight}")
            }
            Self::InvalidGrade(grade) => write!(f, "grade must be a finite number, got {grade}"),
            Self::InvalidColor(color) => write!(f, "color must be #rgb or #rrggbb, got `{color}`"),
            Self::ZeroRepeatCount => write!(f, "repeat count must be at least 1"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyName { field });
    }
    Ok(())
}
