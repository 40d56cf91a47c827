mod binding;
mod combinator;
mod error;
mod expr;
mod leaf;
mod matcher;
mod record;
mod value;

pub use binding::{field_matcher, FieldBinding, FieldPair};
pub use combinator::{and, not, or, And, Not, Or};
pub use error::MatchError;
pub use expr::{field, CompareOp, Expr, FieldExpr};
pub use leaf::{always, Cmp, FieldMatcher, In, StrictEq, TrueMatcher};
pub use matcher::{
    rename_fields, Candidate, FieldSetter, FieldWalker, Matcher, ValueMatcher, View,
};
pub use record::{Fields, Record};
pub use value::{compare, Value};
