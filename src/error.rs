use thiserror::Error;

#[cfg(feature = "dsl")]
use crate::parse::ParseError;
use crate::MatchError;

/// Unified error type covering parsing and evaluation.
///
/// Returned by convenience functions like [`matches_dsl()`](crate::matches_dsl) that
/// parse and evaluate in one call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiftError {
    #[cfg(feature = "dsl")]
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Match(#[from] MatchError),
}
