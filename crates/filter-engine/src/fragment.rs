//! Compiled pieces of a condition.
//!
//! Each fragment carries its structural category as a tag, so operand
//! validation is a match on the variant rather than a look at rendered text.

use crate::{
    error::{FilterError, Result},
    placeholder::marker,
    template,
};
use model::{core::value::quote, execution::expr::BinaryOp};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentCategory {
    Composite,
    LeafAttribute,
    LeafPlaceholder,
}

impl fmt::Display for FragmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FragmentCategory::Composite => "expression",
            FragmentCategory::LeafAttribute => "table attribute",
            FragmentCategory::LeafPlaceholder => "stream value or constant",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A bracketed filter object.
    Composite(FilterNode),
    /// A bare field name of the stored document.
    Attribute(String),
    /// A placeholder token standing in for a deferred value.
    Placeholder(String),
}

impl Fragment {
    pub fn category(&self) -> FragmentCategory {
        match self {
            Fragment::Composite(_) => FragmentCategory::Composite,
            Fragment::Attribute(_) => FragmentCategory::LeafAttribute,
            Fragment::Placeholder(_) => FragmentCategory::LeafPlaceholder,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Fragment::Composite(node) => node.render(),
            Fragment::Attribute(name) => name.clone(),
            Fragment::Placeholder(token) => marker(token),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Structure of a composite fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    And(Box<FilterNode>, Box<FilterNode>),
    Or(Box<FilterNode>, Box<FilterNode>),
    /// A filter on one field: the shape produced by compare and null checks,
    /// and the only shape NOT accepts.
    Field { field: String, predicate: Predicate },
}

impl FilterNode {
    pub fn field(field: impl Into<String>, predicate: Predicate) -> Self {
        FilterNode::Field {
            field: field.into(),
            predicate,
        }
    }

    pub fn render(&self) -> String {
        match self {
            FilterNode::And(left, right) => {
                let (left, right) = (left.render(), right.render());
                template::fill(template::AND, &[("left", left.as_str()), ("right", right.as_str())])
            }
            FilterNode::Or(left, right) => {
                let (left, right) = (left.render(), right.render());
                template::fill(template::OR, &[("left", left.as_str()), ("right", right.as_str())])
            }
            FilterNode::Field { field, predicate } => {
                let (field, body) = (quote(field), predicate.render());
                template::fill(
                    template::FIELD,
                    &[("field", field.as_str()), ("body", body.as_str())],
                )
            }
        }
    }
}

/// The operator object applied to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare { op: ComparisonOp, token: String },
    IsNull,
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn render(&self) -> String {
        match self {
            Predicate::Compare { op, token } => {
                let (op, value) = (format!("\"{}\"", op.symbol()), marker(token));
                template::fill(template::COMPARE, &[("op", op.as_str()), ("value", value.as_str())])
            }
            Predicate::IsNull => template::IS_NULL.to_string(),
            Predicate::Not(inner) => {
                let body = inner.render();
                template::fill(template::NOT, &[("body", body.as_str())])
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
}

impl ComparisonOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Equal => "$eq",
            ComparisonOp::NotEqual => "$ne",
            ComparisonOp::GreaterThan => "$gt",
            ComparisonOp::GreaterThanEqual => "$gte",
            ComparisonOp::LessThan => "$lt",
            ComparisonOp::LessThanEqual => "$lte",
        }
    }

    /// The operator that keeps the meaning when both operands swap sides.
    pub fn mirrored(&self) -> Self {
        match self {
            ComparisonOp::GreaterThan => ComparisonOp::LessThan,
            ComparisonOp::GreaterThanEqual => ComparisonOp::LessThanEqual,
            ComparisonOp::LessThan => ComparisonOp::GreaterThan,
            ComparisonOp::LessThanEqual => ComparisonOp::GreaterThanEqual,
            other => *other,
        }
    }
}

impl TryFrom<BinaryOp> for ComparisonOp {
    type Error = FilterError;

    fn try_from(op: BinaryOp) -> Result<Self> {
        match op {
            BinaryOp::Equal => Ok(ComparisonOp::Equal),
            BinaryOp::NotEqual => Ok(ComparisonOp::NotEqual),
            BinaryOp::GreaterThan => Ok(ComparisonOp::GreaterThan),
            BinaryOp::GreaterOrEqual => Ok(ComparisonOp::GreaterThanEqual),
            BinaryOp::LessThan => Ok(ComparisonOp::LessThan),
            BinaryOp::LessOrEqual => Ok(ComparisonOp::LessThanEqual),
            other => Err(FilterError::unsupported(
                format!("{other:?}"),
                "not a comparison operator",
            )),
        }
    }
}
