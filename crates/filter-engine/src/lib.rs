pub mod compiled;
pub mod compiler;
pub mod document;
pub mod error;
pub mod fragment;
pub mod placeholder;
pub mod resolver;
pub mod template;
pub mod visitor;

pub use compiled::CompiledCondition;
pub use compiler::{DocumentFilterCompiler, ExpressionCompiler, FilterCompiler, compile_condition};
pub use document::FilterDocument;
pub use error::{FilterError, Result};
pub use resolver::resolve;
pub use visitor::{ConditionVisitor, walk};
