use crate::{
    compiled::CompiledCondition,
    error::{FilterError, Result},
    fragment::{ComparisonOp, FilterNode, Fragment, FragmentCategory, Predicate},
    placeholder::{PlaceholderOrigin, PlaceholderTable, replace_markers},
    visitor::{ConditionVisitor, MathOp},
};
use model::{
    core::{data_type::DataType, value::Value},
    execution::expr::BinaryOp,
};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Operand-stack compiler for one condition.
///
/// Driven through [`ConditionVisitor`] hooks; every `end_*` hook pops its
/// operands, validates their categories and pushes one fragment. A compiler
/// is used for a single pass and consumed by [`ExpressionCompiler::finish`].
#[derive(Debug, Default)]
pub struct ExpressionCompiler {
    stack: Vec<Fragment>,
    placeholders: PlaceholderTable,
}

impl ExpressionCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fragments currently on the operand stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consumes the compiler, inlining constants into the final template.
    pub fn finish(mut self) -> Result<CompiledCondition> {
        let last = self.pop("finish")?;
        if !self.stack.is_empty() {
            return Err(FilterError::Internal(format!(
                "{} fragment(s) left on the operand stack after {last}",
                self.stack.len()
            )));
        }

        let node = match last {
            Fragment::Composite(node) => node,
            other => {
                return Err(FilterError::malformed(
                    "condition",
                    other.render(),
                    format!(
                        "a condition must be a complete expression, not a {}",
                        other.category()
                    ),
                ));
            }
        };

        let (constants, variables) = self.placeholders.into_partition();
        let mut literals = HashMap::with_capacity(constants.len());
        for (token, entry) in constants {
            if let PlaceholderOrigin::Constant { value } = &entry.origin {
                let literal = value
                    .to_filter_literal(entry.data_type)
                    .map_err(|source| FilterError::InvalidLiteral {
                        token: token.clone(),
                        source,
                    })?;
                literals.insert(token, literal);
            }
        }

        let template = replace_markers(&node.render(), |token| {
            Ok::<_, FilterError>(literals.get(token).cloned())
        })?;

        debug!(
            template = %template,
            constants = literals.len(),
            variables = variables.len(),
            "Compiled condition"
        );

        Ok(CompiledCondition::new(template, variables))
    }

    fn push(&mut self, fragment: Fragment) {
        trace!(category = %fragment.category(), fragment = %fragment, "push");
        self.stack.push(fragment);
    }

    fn pop(&mut self, operator: &str) -> Result<Fragment> {
        self.stack.pop().ok_or_else(|| {
            FilterError::Internal(format!("operand stack underflow at {operator}"))
        })
    }

    /// Pops the right then the left operand.
    fn pop_pair(&mut self, operator: &str) -> Result<(Fragment, Fragment)> {
        let right = self.pop(operator)?;
        let left = self.pop(operator)?;
        Ok((left, right))
    }

    fn composite_pair(&mut self, operator: &str) -> Result<(FilterNode, FilterNode)> {
        match self.pop_pair(operator)? {
            (Fragment::Composite(left), Fragment::Composite(right)) => Ok((left, right)),
            (Fragment::Composite(_), operand) | (operand, _) => Err(FilterError::malformed(
                operator,
                operand.render(),
                format!(
                    "{operator} only combines complete expressions, got a {}",
                    operand.category()
                ),
            )),
        }
    }
}

impl ConditionVisitor for ExpressionCompiler {
    fn end_and(&mut self) -> Result<()> {
        let (left, right) = self.composite_pair("AND")?;
        self.push(Fragment::Composite(FilterNode::And(
            Box::new(left),
            Box::new(right),
        )));
        Ok(())
    }

    fn end_or(&mut self) -> Result<()> {
        let (left, right) = self.composite_pair("OR")?;
        self.push(Fragment::Composite(FilterNode::Or(
            Box::new(left),
            Box::new(right),
        )));
        Ok(())
    }

    fn end_not(&mut self) -> Result<()> {
        match self.pop("NOT")? {
            Fragment::Composite(FilterNode::Field { field, predicate }) => {
                self.push(Fragment::Composite(FilterNode::field(
                    field,
                    Predicate::Not(Box::new(predicate)),
                )));
                Ok(())
            }
            other => Err(FilterError::unsupported(
                "NOT",
                format!(
                    "NOT only applies to a single comparison or null-check, not {}",
                    other.render()
                ),
            )),
        }
    }

    fn end_compare(&mut self, op: BinaryOp) -> Result<()> {
        let operator = format!("{op:?}");
        let (left, right) = self.pop_pair(&operator)?;

        for operand in [&left, &right] {
            if operand.category() == FragmentCategory::Composite {
                return Err(FilterError::unsupported(
                    operator.as_str(),
                    format!(
                        "comparisons cannot be made over sub-expressions: {}",
                        operand.render()
                    ),
                ));
            }
        }

        // The attribute always takes the key position; a swapped operator
        // is mirrored so `10 < price` becomes `price > 10`.
        let (field, token, swapped) = match (left, right) {
            (Fragment::Attribute(field), Fragment::Placeholder(token)) => (field, token, false),
            (Fragment::Placeholder(token), Fragment::Attribute(field)) => (field, token, true),
            (left, right) => {
                return Err(FilterError::malformed(
                    operator,
                    format!("{} and {}", left.render(), right.render()),
                    "compare requires exactly one table attribute and one stream value/constant",
                ));
            }
        };

        let op = ComparisonOp::try_from(op)?;
        let op = if swapped { op.mirrored() } else { op };
        self.push(Fragment::Composite(FilterNode::field(
            field,
            Predicate::Compare { op, token },
        )));
        Ok(())
    }

    fn end_is_null(&mut self) -> Result<()> {
        match self.pop("IS NULL")? {
            Fragment::Attribute(field) => {
                self.push(Fragment::Composite(FilterNode::field(
                    field,
                    Predicate::IsNull,
                )));
                Ok(())
            }
            other => Err(FilterError::malformed(
                "IS NULL",
                other.render(),
                format!(
                    "null checks only apply to table attributes, got a {}",
                    other.category()
                ),
            )),
        }
    }

    fn end_stream_variable(&mut self, name: &str, data_type: DataType) -> Result<()> {
        let token = self.placeholders.allocate_variable(name, data_type);
        self.push(Fragment::Placeholder(token));
        Ok(())
    }

    fn end_constant(&mut self, value: &Value, data_type: DataType) -> Result<()> {
        let token = self.placeholders.allocate_constant(value.clone(), data_type);
        self.push(Fragment::Placeholder(token));
        Ok(())
    }

    fn end_attribute(&mut self, name: &str, _data_type: DataType) -> Result<()> {
        self.push(Fragment::Attribute(name.to_string()));
        Ok(())
    }

    fn begin_math(&mut self, op: MathOp) -> Result<()> {
        Err(FilterError::unsupported(
            format!("{op:?}"),
            "arithmetic cannot be expressed in a document filter",
        ))
    }

    fn begin_function(&mut self, name: &str) -> Result<()> {
        Err(FilterError::unsupported(
            format!("function {name}"),
            "attribute functions cannot be expressed in a document filter",
        ))
    }

    fn begin_aggregate(&mut self, name: &str) -> Result<()> {
        Err(FilterError::unsupported(
            format!("aggregate {name}"),
            "aggregations cannot be expressed in a document filter",
        ))
    }

    fn begin_in(&mut self, source: &str) -> Result<()> {
        Err(FilterError::unsupported(
            format!("IN {source}"),
            "set membership cannot be expressed in a document filter",
        ))
    }
}
