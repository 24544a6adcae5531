use crate::core::{data_type::DataType, value::Value};
use serde::{Deserialize, Serialize};

/// Condition tree handed over by the query engine for a table lookup,
/// update or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionExpr {
    /// Value bound from the incoming stream at execution time.
    StreamVariable { name: String, data_type: DataType },
    /// Literal known when the query is compiled.
    Constant { value: Value, data_type: DataType },
    /// Field of the stored document.
    Attribute { name: String, data_type: DataType },
    Binary {
        left: Box<ConditionExpr>,
        op: BinaryOp,
        right: Box<ConditionExpr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<ConditionExpr>,
    },
    IsNull { operand: Box<ConditionExpr> },
    FunctionCall {
        name: String,
        args: Vec<ConditionExpr>,
    },
    Aggregate {
        name: String,
        args: Vec<ConditionExpr>,
    },
    /// Set membership test against a named collection.
    In {
        operand: Box<ConditionExpr>,
        source: String,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    // Comparison
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    // Logical
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Negate,
}

impl BinaryOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::GreaterThan
                | BinaryOp::LessThan
                | BinaryOp::GreaterOrEqual
                | BinaryOp::LessOrEqual
        )
    }
}

impl ConditionExpr {
    pub fn variable(name: impl Into<String>, data_type: DataType) -> Self {
        ConditionExpr::StreamVariable {
            name: name.into(),
            data_type,
        }
    }

    pub fn constant(value: impl Into<Value>, data_type: DataType) -> Self {
        ConditionExpr::Constant {
            value: value.into(),
            data_type,
        }
    }

    pub fn attribute(name: impl Into<String>, data_type: DataType) -> Self {
        ConditionExpr::Attribute {
            name: name.into(),
            data_type,
        }
    }

    pub fn binary(left: ConditionExpr, op: BinaryOp, right: ConditionExpr) -> Self {
        ConditionExpr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn and(left: ConditionExpr, right: ConditionExpr) -> Self {
        Self::binary(left, BinaryOp::And, right)
    }

    pub fn or(left: ConditionExpr, right: ConditionExpr) -> Self {
        Self::binary(left, BinaryOp::Or, right)
    }

    pub fn not(operand: ConditionExpr) -> Self {
        ConditionExpr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }
    }

    pub fn is_null(operand: ConditionExpr) -> Self {
        ConditionExpr::IsNull {
            operand: Box::new(operand),
        }
    }
}
