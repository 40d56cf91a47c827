use std::fmt;

use super::binding::{FieldBinding, FieldPair};
use super::combinator::{and, not, or};
use super::leaf::{always, Cmp, In, StrictEq};
use super::matcher::Matcher;
use super::value::Value;

/// Comparison operators understood by the comparison algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A matcher tree as plain data.
///
/// Produced by the DSL parser (and usable directly); turned into an evaluable tree with
/// [`Expr::into_matcher`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },
    CompareFields {
        left: String,
        op: CompareOp,
        right: String,
    },
    StrictEq {
        field: String,
        value: Value,
    },
    In {
        field: String,
        list: Value,
    },
    True,
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Vec<Expr>),
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Expr], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{child}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Compare { field, op, value } => write!(f, "({field} {op} {value})"),
            Expr::CompareFields { left, op, right } => write!(f, "({left} {op} @{right})"),
            Expr::StrictEq { field, value } => write!(f, "({field} === {value})"),
            Expr::In { field, list } => write!(f, "({field} in {list})"),
            Expr::True => write!(f, "true"),
            // The language has no empty group; print an equivalent expression instead.
            Expr::And(children) | Expr::Not(children) if children.is_empty() => {
                write!(f, "true")
            }
            Expr::Or(children) if children.is_empty() => write!(f, "NOT true"),
            Expr::And(children) => write_joined(f, children, " AND "),
            Expr::Or(children) => write_joined(f, children, " OR "),
            Expr::Not(children) => {
                write!(f, "NOT ")?;
                write_joined(f, children, ", ")
            }
        }
    }
}

impl Expr {
    /// Build the evaluable matcher tree for this expression.
    #[must_use]
    pub fn into_matcher(self) -> Box<dyn Matcher> {
        match self {
            Expr::Compare { field, op, value } => {
                Box::new(FieldBinding::new(field, Cmp::new(op, value)))
            }
            Expr::CompareFields { left, op, right } => Box::new(FieldPair::new(left, right, op)),
            Expr::StrictEq { field, value } => {
                Box::new(FieldBinding::new(field, StrictEq::new(value)))
            }
            Expr::In { field, list } => Box::new(FieldBinding::new(field, In::new(list))),
            Expr::True => always(),
            Expr::And(children) => and(children.into_iter().map(Expr::into_matcher)),
            Expr::Or(children) => or(children.into_iter().map(Expr::into_matcher)),
            Expr::Not(children) => not(children.into_iter().map(Expr::into_matcher)),
        }
    }
}

/// Intermediate builder for field-bound matchers.
/// Created by [`field()`]; every method produces a finished leaf.
#[derive(Debug, Clone)]
pub struct FieldExpr {
    name: String,
}

impl FieldExpr {
    fn compare(self, op: CompareOp, value: impl Into<Value>) -> Box<dyn Matcher> {
        Box::new(FieldBinding::new(self.name, Cmp::new(op, value.into())))
    }

    fn compare_field(self, op: CompareOp, other: &str) -> Box<dyn Matcher> {
        Box::new(FieldPair::new(self.name, other.to_owned(), op))
    }

    /// Field equals `value` under the comparison algebra.
    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Box<dyn Matcher> {
        self.compare(CompareOp::Eq, value)
    }

    /// Field is structurally identical to `value`, variant for variant.
    #[must_use]
    pub fn strict_eq(self, value: impl Into<Value>) -> Box<dyn Matcher> {
        Box::new(FieldBinding::new(self.name, StrictEq::new(value.into())))
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Box<dyn Matcher> {
        self.compare(CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Box<dyn Matcher> {
        self.compare(CompareOp::Gte, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Box<dyn Matcher> {
        self.compare(CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Box<dyn Matcher> {
        self.compare(CompareOp::Lte, value)
    }

    /// Field equals one of the elements of `list`.
    ///
    /// `list` should convert into [`Value::List`]; any other value never matches.
    #[must_use]
    pub fn is_in(self, list: impl Into<Value>) -> Box<dyn Matcher> {
        Box::new(FieldBinding::new(self.name, In::new(list.into())))
    }

    #[must_use]
    pub fn eq_field(self, other: &str) -> Box<dyn Matcher> {
        self.compare_field(CompareOp::Eq, other)
    }

    #[must_use]
    pub fn gt_field(self, other: &str) -> Box<dyn Matcher> {
        self.compare_field(CompareOp::Gt, other)
    }

    #[must_use]
    pub fn gte_field(self, other: &str) -> Box<dyn Matcher> {
        self.compare_field(CompareOp::Gte, other)
    }

    #[must_use]
    pub fn lt_field(self, other: &str) -> Box<dyn Matcher> {
        self.compare_field(CompareOp::Lt, other)
    }

    #[must_use]
    pub fn lte_field(self, other: &str) -> Box<dyn Matcher> {
        self.compare_field(CompareOp::Lte, other)
    }
}

#[must_use]
pub fn field(name: &str) -> FieldExpr {
    FieldExpr {
        name: name.to_owned(),
    }
}
