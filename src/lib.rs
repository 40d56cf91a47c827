//! Composable record matchers.
//!
//! A matcher tree is built from field-bound leaves ([`field`]) and the [`and`], [`or`]
//! and [`not`] combinators, then evaluated against either a structured [`Record`] or a
//! JSON-encoded buffer:
//!
//! ```
//! use sift::{and, field, Fields};
//!
//! let adult_ana = and([field("age").gte(18), field("name").eq("ana")]);
//!
//! let record = Fields::new().set("age", 30).set("name", "ana");
//! assert_eq!(adult_ana.matches_record(&record), Ok(true));
//!
//! let encoded = br#"{"age": 30, "name": "ana"}"#;
//! assert_eq!(adult_ana.matches_encoded(encoded), Ok(true));
//! ```

mod error;
#[cfg(feature = "dsl")]
pub mod parse;
mod types;

pub use error::SiftError;
pub use types::{
    always, and, compare, field, field_matcher, not, or, rename_fields, And, Candidate, Cmp,
    CompareOp, Expr, FieldBinding, FieldExpr, FieldMatcher, FieldPair, FieldSetter, FieldWalker,
    Fields, In, MatchError, Matcher, Not, Or, Record, StrictEq, TrueMatcher, Value, ValueMatcher,
    View,
};

/// Parse `input` as a matcher expression and evaluate it against `candidate`.
///
/// # Errors
///
/// Returns [`SiftError::Parse`] for invalid input and [`SiftError::Match`] if a field
/// does not resolve.
#[cfg(feature = "dsl")]
pub fn matches_dsl(input: &str, candidate: &Candidate<'_>) -> Result<bool, SiftError> {
    let matcher = parse::parse_matcher(input)?;
    Ok(matcher.matches(candidate)?)
}
