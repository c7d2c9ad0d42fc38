//! Predicate compilation shared by WHERE, HAVING and JOIN ... ON.
//!
//! Lists are walked in order; every node is handed to the handler the
//! registry holds for its tag. The built-in handlers live here.

use super::{CompileContext, Compiler};
use crate::error::{CompileError, Result};
use crate::query::{Condition, ConditionNode};
use crate::value::SqlValue;

impl Compiler {
    /// Renders a predicate list as `a AND b OR c ...`.
    ///
    /// The first emitted term has no connective. Terms that render to
    /// nothing (such as an empty group) are skipped.
    pub fn compile_conditions<'c, I>(&self, ctx: &mut CompileContext, conditions: I) -> Result<String>
    where
        I: IntoIterator<Item = &'c Condition>,
    {
        let mut sql = String::new();
        for condition in conditions {
            let fragment = self.compile_condition(ctx, condition)?;
            if fragment.is_empty() {
                continue;
            }
            if !sql.is_empty() {
                sql.push_str(if condition.or { " OR " } else { " AND " });
            }
            sql.push_str(&fragment);
        }
        Ok(sql)
    }

    /// Renders one predicate through its registered handler.
    pub fn compile_condition(&self, ctx: &mut CompileContext, condition: &Condition) -> Result<String> {
        let handler = self.registry().resolve(condition.node.tag())?;
        handler(self, ctx, condition)
    }
}

fn wrong_node(condition: &Condition) -> CompileError {
    CompileError::InvalidClause {
        component: "condition",
        found: condition.node.kind(),
    }
}

fn negate(condition: &Condition, sql: String) -> String {
    if condition.not {
        format!("NOT ({sql})")
    } else {
        sql
    }
}

const fn not_keyword(condition: &Condition) -> &'static str {
    if condition.not {
        "NOT "
    } else {
        ""
    }
}

pub(super) fn compile_basic(
    compiler: &Compiler,
    ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::Basic {
        column,
        operator,
        value,
    } = &condition.node
    else {
        return Err(wrong_node(condition));
    };
    let sql = format!(
        "{} {operator} {}",
        compiler.dialect().wrap(column),
        ctx.bind(value.clone())
    );
    Ok(negate(condition, sql))
}

/// Case-insensitive matches lower the column and the pattern.
pub(super) fn compile_text(
    compiler: &Compiler,
    ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::Text {
        column,
        operator,
        value,
        case_sensitive,
    } = &condition.node
    else {
        return Err(wrong_node(condition));
    };
    let dialect = compiler.dialect();
    let mut column = dialect.wrap(column);
    let mut pattern = operator.pattern(value);
    if !case_sensitive {
        column = dialect.compile_lower(&column);
        pattern = pattern.to_lowercase();
    }
    let sql = format!("{column} LIKE {}", ctx.bind(SqlValue::Text(pattern)));
    Ok(negate(condition, sql))
}

pub(super) fn compile_columns(
    compiler: &Compiler,
    _ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::Columns {
        first,
        operator,
        second,
    } = &condition.node
    else {
        return Err(wrong_node(condition));
    };
    let dialect = compiler.dialect();
    let sql = format!("{} {operator} {}", dialect.wrap(first), dialect.wrap(second));
    Ok(negate(condition, sql))
}

pub(super) fn compile_nested(
    compiler: &Compiler,
    ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::Nested(children) = &condition.node else {
        return Err(wrong_node(condition));
    };
    let inner = compiler.compile_conditions(ctx, children)?;
    if inner.is_empty() {
        return Ok(inner);
    }
    Ok(format!("{}({inner})", not_keyword(condition)))
}

pub(super) fn compile_raw(
    compiler: &Compiler,
    ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::Raw {
        expression,
        bindings,
    } = &condition.node
    else {
        return Err(wrong_node(condition));
    };
    let sql = compiler.compile_raw(ctx, expression, bindings)?;
    Ok(negate(condition, sql))
}

pub(super) fn compile_null(
    compiler: &Compiler,
    _ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::Null { column } = &condition.node else {
        return Err(wrong_node(condition));
    };
    Ok(format!(
        "{} IS {}NULL",
        compiler.dialect().wrap(column),
        not_keyword(condition)
    ))
}

pub(super) fn compile_between(
    compiler: &Compiler,
    ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::Between {
        column,
        lower,
        upper,
    } = &condition.node
    else {
        return Err(wrong_node(condition));
    };
    let column = compiler.dialect().wrap(column);
    let lower = ctx.bind(lower.clone());
    let upper = ctx.bind(upper.clone());
    Ok(format!(
        "{column} {}BETWEEN {lower} AND {upper}",
        not_keyword(condition)
    ))
}

/// An empty list matches nothing, or everything when negated.
pub(super) fn compile_in(
    compiler: &Compiler,
    ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::In { column, values } = &condition.node else {
        return Err(wrong_node(condition));
    };
    if values.is_empty() {
        return Ok(String::from(if condition.not { "1 = 1" } else { "1 = 0" }));
    }
    let placeholders = values
        .iter()
        .map(|value| ctx.bind(value.clone()))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "{} {}IN ({placeholders})",
        compiler.dialect().wrap(column),
        not_keyword(condition)
    ))
}

pub(super) fn compile_in_query(
    compiler: &Compiler,
    ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::InQuery { column, query } = &condition.node else {
        return Err(wrong_node(condition));
    };
    let column = compiler.dialect().wrap(column);
    let sub = compiler.compile_subquery(ctx, query)?;
    Ok(format!("{column} {}IN ({sub})", not_keyword(condition)))
}

pub(super) fn compile_exists(
    compiler: &Compiler,
    ctx: &mut CompileContext,
    condition: &Condition,
) -> Result<String> {
    let ConditionNode::Exists(query) = &condition.node else {
        return Err(wrong_node(condition));
    };
    let sub = compiler.compile_subquery(ctx, query)?;
    Ok(format!("{}EXISTS ({sub})", not_keyword(condition)))
}
