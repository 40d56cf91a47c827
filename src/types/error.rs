use thiserror::Error;

/// The error produced while evaluating a matcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The field name did not resolve against the record: the record has no such field,
    /// or the encoded buffer has no such path.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },
}

impl MatchError {
    pub(crate) fn unknown_field(field: &str) -> Self {
        MatchError::UnknownField {
            field: field.to_owned(),
        }
    }
}
