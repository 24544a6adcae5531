use crate::{compiled::CompiledCondition, error::Result, visitor::walk};
use model::execution::expr::ConditionExpr;
use tracing::debug;

pub mod stack;

pub use stack::ExpressionCompiler;

/// A trait for compiling condition trees into a specific filter format.
pub trait FilterCompiler {
    /// The type of filter that this compiler produces.
    type Filter;

    /// Compile the condition tree into a filter.
    fn compile(expr: &ConditionExpr) -> Result<Self::Filter>;
}

/// Compiles condition trees into document filter templates.
pub struct DocumentFilterCompiler;

impl FilterCompiler for DocumentFilterCompiler {
    type Filter = CompiledCondition;

    fn compile(expr: &ConditionExpr) -> Result<Self::Filter> {
        debug!("Compiling condition {:?}", expr);
        let mut compiler = ExpressionCompiler::new();
        walk(expr, &mut compiler)?;
        compiler.finish()
    }
}

/// Compiles an optional condition; no condition matches every record.
pub fn compile_condition(expr: Option<&ConditionExpr>) -> Result<CompiledCondition> {
    match expr {
        Some(expr) => DocumentFilterCompiler::compile(expr),
        None => Ok(CompiledCondition::match_all()),
    }
}
