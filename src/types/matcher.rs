use std::borrow::Cow;
use std::fmt;

use super::error::MatchError;
use super::record::Record;

/// A candidate record handed to a matcher by the caller.
#[derive(Clone, Copy)]
pub enum Candidate<'a> {
    /// A live structured record; fields are looked up by their exact name.
    Record(&'a dyn Record),
    /// A JSON-encoded record; fields are looked up as lower-cased dotted paths.
    Encoded(&'a [u8]),
}

impl<'a> Candidate<'a> {
    #[must_use]
    pub fn record(record: &'a dyn Record) -> Self {
        Candidate::Record(record)
    }

    #[must_use]
    pub fn encoded(bytes: &'a [u8]) -> Self {
        Candidate::Encoded(bytes)
    }

    /// Run `f` against the resolved view of this candidate, decoding an encoded buffer
    /// once. A buffer that is not valid JSON is viewed as `null`, so every field lookup
    /// against it fails with [`MatchError::UnknownField`].
    pub fn with_view<R>(&self, f: impl FnOnce(&View<'_>) -> R) -> R {
        match *self {
            Candidate::Record(record) => f(&View::Record(record)),
            Candidate::Encoded(raw) => {
                let doc = serde_json::from_slice::<serde_json::Value>(raw).unwrap_or_else(|e| {
                    tracing::debug!(
                        error = %e,
                        len = raw.len(),
                        "encoded candidate is not valid JSON"
                    );
                    serde_json::Value::Null
                });
                f(&View::Document { raw, doc: &doc })
            }
        }
    }
}

impl fmt::Debug for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Record(_) => f.write_str("Candidate::Record(..)"),
            Candidate::Encoded(raw) => write!(f, "Candidate::Encoded({} bytes)", raw.len()),
        }
    }
}

/// A candidate already resolved into something fields can be read from directly.
#[derive(Clone, Copy)]
pub enum View<'a> {
    Record(&'a dyn Record),
    Document {
        /// The buffer the document was decoded from.
        raw: &'a [u8],
        doc: &'a serde_json::Value,
    },
}

impl<'a> View<'a> {
    /// The candidate this view was resolved from, for children that only evaluate
    /// through [`Matcher::matches`].
    #[must_use]
    pub fn candidate(&self) -> Candidate<'a> {
        match *self {
            View::Record(record) => Candidate::Record(record),
            View::Document { raw, .. } => Candidate::Encoded(raw),
        }
    }
}

/// A node of a matcher tree: tests a candidate record.
///
/// The optional capabilities are probed by combinators and planners through the
/// `as_*` methods, which return `None` unless a matcher opts in.
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Evaluate the matcher against a candidate.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::UnknownField`] if a referenced field does not resolve
    /// against the candidate.
    fn matches(&self, candidate: &Candidate<'_>) -> Result<bool, MatchError>;

    /// The value-typed evaluation path, if this matcher has one.
    fn as_value_matcher(&self) -> Option<&dyn ValueMatcher> {
        None
    }

    /// The rename capability, if this matcher is bound to a single renamable field.
    fn as_field_setter(&mut self) -> Option<&mut dyn FieldSetter> {
        None
    }

    /// The traversal capability, if this matcher has children.
    fn as_field_walker(&mut self) -> Option<&mut dyn FieldWalker> {
        None
    }

    /// The field name this matcher depends on. Empty for matchers with no field
    /// dependency; `None` where no name is reported.
    fn field(&self) -> Option<Cow<'_, str>> {
        None
    }
}

/// Evaluation against an already-resolved [`View`], skipping the decode step that
/// [`Matcher::matches`] performs for encoded candidates.
pub trait ValueMatcher {
    /// # Errors
    ///
    /// Returns [`MatchError::UnknownField`] if a referenced field does not resolve.
    fn match_value(&self, view: &View<'_>) -> Result<bool, MatchError>;
}

/// A leaf bound to a single field whose name can be rewritten.
pub trait FieldSetter {
    fn field_name(&self) -> &str;
    fn set_field(&mut self, field: &str);
}

/// A matcher with children that exposes them for field rewriting.
pub trait FieldWalker {
    /// Invoke `f` once per direct child exposing [`FieldSetter`]. Grandchildren are not
    /// visited.
    fn for_each_field(&mut self, f: &mut dyn FnMut(&mut dyn FieldSetter));

    /// The direct children, for callers that rewrite nested trees themselves.
    fn children_mut(&mut self) -> &mut [Box<dyn Matcher>];
}

impl dyn Matcher + '_ {
    /// Evaluate against a structured record.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::UnknownField`] if a referenced field is not on the record.
    pub fn matches_record(&self, record: &dyn Record) -> Result<bool, MatchError> {
        self.matches(&Candidate::Record(record))
    }

    /// Evaluate against a JSON-encoded record.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::UnknownField`] if a referenced path does not resolve.
    pub fn matches_encoded(&self, bytes: &[u8]) -> Result<bool, MatchError> {
        self.matches(&Candidate::Encoded(bytes))
    }

    /// Evaluate through the value-typed path when available, else through `matches`.
    pub(crate) fn eval_view(&self, view: &View<'_>) -> Result<bool, MatchError> {
        match self.as_value_matcher() {
            Some(vm) => vm.match_value(view),
            None => self.matches(&view.candidate()),
        }
    }
}

/// Rename every field-bound leaf in `matcher`'s tree, at any depth, with `f`.
///
/// [`FieldWalker::for_each_field`] only reaches direct children; this walks nested
/// combinators too.
pub fn rename_fields(matcher: &mut dyn Matcher, f: &mut dyn FnMut(&mut dyn FieldSetter)) {
    if let Some(setter) = matcher.as_field_setter() {
        f(setter);
        return;
    }
    if let Some(walker) = matcher.as_field_walker() {
        for child in walker.children_mut() {
            rename_fields(child.as_mut(), f);
        }
    }
}
