use super::error::MatchError;
use super::matcher::{Candidate, FieldSetter, FieldWalker, Matcher, ValueMatcher, View};

/// Shared traversal for the combinators: only direct children are visited.
fn for_each_direct_field(
    children: &mut [Box<dyn Matcher>],
    f: &mut dyn FnMut(&mut dyn FieldSetter),
) {
    for child in children {
        if let Some(setter) = child.as_field_setter() {
            f(setter);
        }
    }
}

macro_rules! combinator {
    ($name:ident) => {
        impl Matcher for $name {
            fn matches(&self, candidate: &Candidate<'_>) -> Result<bool, MatchError> {
                candidate.with_view(|view| self.match_value(view))
            }

            fn as_value_matcher(&self) -> Option<&dyn ValueMatcher> {
                Some(self)
            }

            fn as_field_walker(&mut self) -> Option<&mut dyn FieldWalker> {
                Some(self)
            }
        }

        impl FieldWalker for $name {
            fn for_each_field(&mut self, f: &mut dyn FnMut(&mut dyn FieldSetter)) {
                for_each_direct_field(&mut self.children, f);
            }

            fn children_mut(&mut self) -> &mut [Box<dyn Matcher>] {
                &mut self.children
            }
        }
    };
}

/// Matches when every child matches. Empty is true.
#[derive(Debug, Default)]
pub struct And {
    children: Vec<Box<dyn Matcher>>,
}

impl ValueMatcher for And {
    fn match_value(&self, view: &View<'_>) -> Result<bool, MatchError> {
        for child in &self.children {
            if !child.eval_view(view)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

combinator!(And);

/// Matches when at least one child matches. Empty is false.
#[derive(Debug, Default)]
pub struct Or {
    children: Vec<Box<dyn Matcher>>,
}

impl ValueMatcher for Or {
    fn match_value(&self, view: &View<'_>) -> Result<bool, MatchError> {
        for child in &self.children {
            if child.eval_view(view)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

combinator!(Or);

/// Matches when no child matches.
///
/// With several children this is "none of": `not([a, b])` behaves like
/// `and([not([a]), not([b])])`, not like `not([and([a, b])])`.
#[derive(Debug, Default)]
pub struct Not {
    children: Vec<Box<dyn Matcher>>,
}

impl ValueMatcher for Not {
    fn match_value(&self, view: &View<'_>) -> Result<bool, MatchError> {
        for child in &self.children {
            if child.eval_view(view)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

combinator!(Not);

/// All of `matchers` must match.
#[must_use]
pub fn and(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Box<dyn Matcher> {
    Box::new(And {
        children: matchers.into_iter().collect(),
    })
}

/// At least one of `matchers` must match.
#[must_use]
pub fn or(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Box<dyn Matcher> {
    Box::new(Or {
        children: matchers.into_iter().collect(),
    })
}

/// None of `matchers` may match.
#[must_use]
pub fn not(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Box<dyn Matcher> {
    Box::new(Not {
        children: matchers.into_iter().collect(),
    })
}
