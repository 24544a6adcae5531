//! Begin/end callback protocol over a condition tree.
//!
//! A driver walks the tree once, depth-first, firing `begin_*` before a
//! node's operands and `end_*` after them. Compilers that work on an operand
//! stack only need the `end_*` side; `begin_*` hooks default to no-ops.

use crate::error::Result;
use model::{
    core::{data_type::DataType, value::Value},
    execution::expr::{BinaryOp, ConditionExpr, UnaryOp},
};

/// Arithmetic carried by a condition node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOp {
    Binary(BinaryOp),
    Negate,
}

pub trait ConditionVisitor {
    fn begin_and(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_and(&mut self) -> Result<()>;

    fn begin_or(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_or(&mut self) -> Result<()>;

    fn begin_not(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_not(&mut self) -> Result<()>;

    fn begin_compare(&mut self, _op: BinaryOp) -> Result<()> {
        Ok(())
    }
    fn end_compare(&mut self, op: BinaryOp) -> Result<()>;

    fn begin_is_null(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_is_null(&mut self) -> Result<()>;

    fn begin_stream_variable(&mut self, _name: &str, _data_type: DataType) -> Result<()> {
        Ok(())
    }
    fn end_stream_variable(&mut self, name: &str, data_type: DataType) -> Result<()>;

    fn begin_constant(&mut self, _value: &Value, _data_type: DataType) -> Result<()> {
        Ok(())
    }
    fn end_constant(&mut self, value: &Value, data_type: DataType) -> Result<()>;

    fn begin_attribute(&mut self, _name: &str, _data_type: DataType) -> Result<()> {
        Ok(())
    }
    fn end_attribute(&mut self, name: &str, data_type: DataType) -> Result<()>;

    fn begin_math(&mut self, _op: MathOp) -> Result<()> {
        Ok(())
    }
    fn end_math(&mut self, _op: MathOp) -> Result<()> {
        Ok(())
    }

    fn begin_function(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }
    fn end_function(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn begin_aggregate(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }
    fn end_aggregate(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn begin_in(&mut self, _source: &str) -> Result<()> {
        Ok(())
    }
    fn end_in(&mut self, _source: &str) -> Result<()> {
        Ok(())
    }
}

/// Drives `visitor` over `expr`, operands before their parent's `end_*`.
/// Stops at the first hook that fails.
pub fn walk<V: ConditionVisitor + ?Sized>(expr: &ConditionExpr, visitor: &mut V) -> Result<()> {
    match expr {
        ConditionExpr::StreamVariable { name, data_type } => {
            visitor.begin_stream_variable(name, *data_type)?;
            visitor.end_stream_variable(name, *data_type)
        }
        ConditionExpr::Constant { value, data_type } => {
            visitor.begin_constant(value, *data_type)?;
            visitor.end_constant(value, *data_type)
        }
        ConditionExpr::Attribute { name, data_type } => {
            visitor.begin_attribute(name, *data_type)?;
            visitor.end_attribute(name, *data_type)
        }
        ConditionExpr::Binary { left, op, right } => match op {
            BinaryOp::And => {
                visitor.begin_and()?;
                walk(left, visitor)?;
                walk(right, visitor)?;
                visitor.end_and()
            }
            BinaryOp::Or => {
                visitor.begin_or()?;
                walk(left, visitor)?;
                walk(right, visitor)?;
                visitor.end_or()
            }
            op if op.is_comparison() => {
                visitor.begin_compare(*op)?;
                walk(left, visitor)?;
                walk(right, visitor)?;
                visitor.end_compare(*op)
            }
            op => {
                let math = MathOp::Binary(*op);
                visitor.begin_math(math)?;
                walk(left, visitor)?;
                walk(right, visitor)?;
                visitor.end_math(math)
            }
        },
        ConditionExpr::Unary { op, operand } => match op {
            UnaryOp::Not => {
                visitor.begin_not()?;
                walk(operand, visitor)?;
                visitor.end_not()
            }
            UnaryOp::Negate => {
                visitor.begin_math(MathOp::Negate)?;
                walk(operand, visitor)?;
                visitor.end_math(MathOp::Negate)
            }
        },
        ConditionExpr::IsNull { operand } => {
            visitor.begin_is_null()?;
            walk(operand, visitor)?;
            visitor.end_is_null()
        }
        ConditionExpr::FunctionCall { name, args } => {
            visitor.begin_function(name)?;
            for arg in args {
                walk(arg, visitor)?;
            }
            visitor.end_function(name)
        }
        ConditionExpr::Aggregate { name, args } => {
            visitor.begin_aggregate(name)?;
            for arg in args {
                walk(arg, visitor)?;
            }
            visitor.end_aggregate(name)
        }
        ConditionExpr::In { operand, source } => {
            visitor.begin_in(source)?;
            walk(operand, visitor)?;
            visitor.end_in(source)
        }
    }
}
