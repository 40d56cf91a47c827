use std::borrow::Cow;

use super::error::MatchError;
use super::expr::CompareOp;
use super::leaf::FieldMatcher;
use super::matcher::{Candidate, FieldSetter, Matcher, ValueMatcher, View};
use super::record::{lookup_path, Record};
use super::value::Value;

/// Binds a [`FieldMatcher`] to a named field.
///
/// Against a record the name is used verbatim. Against an encoded buffer it is
/// lower-cased and walked as a dotted path.
#[derive(Debug, Clone)]
pub struct FieldBinding<P> {
    field: String,
    predicate: P,
}

impl<P: FieldMatcher> FieldBinding<P> {
    #[must_use]
    pub fn new(field: impl Into<String>, predicate: P) -> Self {
        Self {
            field: field.into(),
            predicate,
        }
    }

    fn resolve(&self, view: &View<'_>) -> Result<Value, MatchError> {
        let found = match view {
            View::Record(record) => record.field(&self.field),
            View::Document { doc, .. } => {
                lookup_path(doc, &self.field.to_lowercase()).map(Value::from_encoded)
            }
        };
        found.ok_or_else(|| {
            let encoded = matches!(view, View::Document { .. });
            tracing::trace!(field = %self.field, encoded, "field did not resolve");
            MatchError::unknown_field(&self.field)
        })
    }
}

impl<P: FieldMatcher + 'static> Matcher for FieldBinding<P> {
    fn matches(&self, candidate: &Candidate<'_>) -> Result<bool, MatchError> {
        candidate.with_view(|view| self.match_value(view))
    }

    fn as_value_matcher(&self) -> Option<&dyn ValueMatcher> {
        Some(self)
    }

    fn as_field_setter(&mut self) -> Option<&mut dyn FieldSetter> {
        Some(self)
    }

    fn field(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.field))
    }
}

impl<P: FieldMatcher> ValueMatcher for FieldBinding<P> {
    fn match_value(&self, view: &View<'_>) -> Result<bool, MatchError> {
        let value = self.resolve(view)?;
        self.predicate.match_field(&value)
    }
}

impl<P: FieldMatcher> FieldSetter for FieldBinding<P> {
    fn field_name(&self) -> &str {
        &self.field
    }

    fn set_field(&mut self, field: &str) {
        tracing::debug!(from = %self.field, to = field, "renaming field binding");
        field.clone_into(&mut self.field);
    }
}

/// Bind `predicate` to `field`, producing a leaf matcher.
#[must_use]
pub fn field_matcher(field: &str, predicate: impl FieldMatcher + 'static) -> Box<dyn Matcher> {
    Box::new(FieldBinding::new(field, predicate))
}

/// Compares two fields of the same record.
///
/// Only records are supported: an encoded candidate reports the first field as unknown.
/// The pair is reported as `field1_field2` and cannot be renamed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPair {
    field1: String,
    field2: String,
    op: CompareOp,
}

impl FieldPair {
    #[must_use]
    pub fn new(field1: impl Into<String>, field2: impl Into<String>, op: CompareOp) -> Self {
        Self {
            field1: field1.into(),
            field2: field2.into(),
            op,
        }
    }

    fn resolve(record: &dyn Record, name: &str) -> Result<Value, MatchError> {
        record.field(name).ok_or_else(|| {
            tracing::trace!(field = name, "field did not resolve");
            MatchError::unknown_field(name)
        })
    }
}

impl Matcher for FieldPair {
    fn matches(&self, candidate: &Candidate<'_>) -> Result<bool, MatchError> {
        let Candidate::Record(record) = *candidate else {
            tracing::trace!(field = %self.field1, "field pairs cannot read encoded records");
            return Err(MatchError::unknown_field(&self.field1));
        };
        let left = Self::resolve(record, &self.field1)?;
        let right = Self::resolve(record, &self.field2)?;
        Ok(left.compare(self.op, &right))
    }

    fn field(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(format!("{}_{}", self.field1, self.field2)))
    }
}
