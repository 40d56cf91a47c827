mod error;
mod grammar;

pub use error::ParseError;

use crate::{Expr, Matcher};

/// Parse a matcher expression such as `age >= 18 and name in ["ana", "bob"]`.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid expression.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    use winnow::Parser;
    grammar::matcher_expr
        .parse(input)
        .map_err(|e| ParseError::new(e.offset(), e.inner().to_string()))
}

/// Parse a matcher expression straight into an evaluable tree.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid expression.
pub fn parse_matcher(input: &str) -> Result<Box<dyn Matcher>, ParseError> {
    parse(input).map(Expr::into_matcher)
}
