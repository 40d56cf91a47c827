use std::borrow::Cow;
use std::fmt;

use super::error::MatchError;
use super::expr::CompareOp;
use super::matcher::{Candidate, Matcher, ValueMatcher, View};
use super::value::Value;

/// A predicate over a single field value. Bind it to a field name with
/// [`FieldBinding`](super::FieldBinding) to obtain a [`Matcher`].
///
/// For matchers that need more than one field, implement [`Matcher`] directly.
pub trait FieldMatcher: fmt::Debug + Send + Sync {
    /// # Errors
    ///
    /// Implementations may fail; the built-in predicates never do.
    fn match_field(&self, value: &Value) -> Result<bool, MatchError>;
}

/// Field value versus a literal, through the comparison algebra.
#[derive(Debug, Clone, PartialEq)]
pub struct Cmp {
    op: CompareOp,
    value: Value,
}

impl Cmp {
    #[must_use]
    pub fn new(op: CompareOp, value: Value) -> Self {
        Self { op, value }
    }
}

impl FieldMatcher for Cmp {
    fn match_field(&self, value: &Value) -> Result<bool, MatchError> {
        Ok(value.compare(self.op, &self.value))
    }
}

/// Field value structurally identical to a literal. No numeric widening: `30` and
/// `30.0` differ.
#[derive(Debug, Clone, PartialEq)]
pub struct StrictEq {
    value: Value,
}

impl StrictEq {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl FieldMatcher for StrictEq {
    fn match_field(&self, value: &Value) -> Result<bool, MatchError> {
        Ok(*value == self.value)
    }
}

/// Field value equal to any element of a list.
///
/// The list is only checked when matching: a non-list never matches anything.
#[derive(Debug, Clone, PartialEq)]
pub struct In {
    list: Value,
}

impl In {
    #[must_use]
    pub fn new(list: Value) -> Self {
        Self { list }
    }
}

impl FieldMatcher for In {
    fn match_field(&self, value: &Value) -> Result<bool, MatchError> {
        let Value::List(items) = &self.list else {
            tracing::trace!(kind = self.list.kind(), "membership target is not a list");
            return Ok(false);
        };
        Ok(items.iter().any(|item| value.compare(CompareOp::Eq, item)))
    }
}

/// Matches every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrueMatcher;

impl Matcher for TrueMatcher {
    fn matches(&self, _candidate: &Candidate<'_>) -> Result<bool, MatchError> {
        Ok(true)
    }

    fn as_value_matcher(&self) -> Option<&dyn ValueMatcher> {
        Some(self)
    }

    fn field(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(""))
    }
}

impl ValueMatcher for TrueMatcher {
    fn match_value(&self, _view: &View<'_>) -> Result<bool, MatchError> {
        Ok(true)
    }
}

/// A matcher that always matches.
#[must_use]
pub fn always() -> Box<dyn Matcher> {
    Box::new(TrueMatcher)
}
