//! Boundary validation errors.

/// A store payload that does not map onto the typed entities.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputMalformed {
    /// A required field is absent or null.
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    /// A field is present but out of range or unparseable.
    InvalidValue { field: &'static str, value: String },
    /// Status string not known for this entity.
    UnknownStatus(String),
    /// Winner reference disagrees with the status or with the assigned slots.
    InconsistentWinner { match_id: i64 },
}

impl std::fmt::Display for InputMalformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputMalformed::MissingField { entity, field } => {
                write!(f, "{} is missing field '{}'", entity, field)
            }
            InputMalformed::InvalidValue { field, value } => {
                write!(f, "Invalid value for '{}': {}", field, value)
            }
            InputMalformed::UnknownStatus(s) => write!(f, "Unknown status '{}'", s),
            InputMalformed::InconsistentWinner { match_id } => {
                write!(f, "Match {} has an inconsistent winner", match_id)
            }
        }
    }
}

impl std::error::Error for InputMalformed {}
