//! Per-component SQL emission.
//!
//! Components are compiled in a fixed order; each step yields an optional
//! fragment and the non-empty fragments are joined with single spaces.

use super::{CompileContext, Compiler};
use crate::error::Result;
use crate::query::{
    Aggregate, ClauseVariant, Column, Combine, Component, Condition, FromClause, Join, Limit, Lock,
    Order, Query,
};
use crate::value::ToSqlValue;

impl Compiler {
    /// Compiles every component of an already expanded query.
    pub fn compile_select(&self, ctx: &mut CompileContext, query: &Query) -> Result<String> {
        let fragments = [
            self.compile_aggregate(query)?,
            self.compile_columns(ctx, query)?,
            self.compile_from(ctx, query)?,
            self.compile_joins(ctx, query)?,
            self.compile_wheres(ctx, query)?,
            self.compile_groups(ctx, query)?,
            self.compile_havings(ctx, query)?,
            self.compile_orders(ctx, query)?,
            self.compile_limit(ctx, query)?,
            self.compile_offset(ctx, query)?,
            self.dialect().compile_unions(self, ctx, query)?,
            self.compile_lock(query)?,
        ];

        Ok(fragments
            .iter()
            .flatten()
            .map(|fragment| fragment.trim())
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Renders the set operations of `query`.
    ///
    /// With `parenthesize` each combined query is wrapped in parentheses.
    pub fn compile_combines(
        &self,
        ctx: &mut CompileContext,
        query: &Query,
        parenthesize: bool,
    ) -> Result<Option<String>> {
        let combines = query.clauses().get_strict::<Combine>(Component::Union)?;
        let mut parts = Vec::with_capacity(combines.len());
        for combine in combines {
            match combine {
                Combine::Query {
                    operation,
                    all,
                    query,
                } => {
                    let keyword = if *all {
                        format!("{} ALL", operation.as_str())
                    } else {
                        String::from(operation.as_str())
                    };
                    let sub = self.compile_subquery(ctx, query)?;
                    if parenthesize {
                        parts.push(format!("{keyword} ({sub})"));
                    } else {
                        parts.push(format!("{keyword} {sub}"));
                    }
                }
                Combine::Raw {
                    expression,
                    bindings,
                } => parts.push(self.compile_raw(ctx, expression, bindings)?),
            }
        }
        Ok(non_empty(parts.join(" ")))
    }

    /// Renders a table expression of a FROM or JOIN.
    pub fn compile_table_expression(
        &self,
        ctx: &mut CompileContext,
        from: &FromClause,
    ) -> Result<String> {
        let dialect = self.dialect();
        match from {
            FromClause::Table { name, alias } => Ok(match alias {
                Some(alias) => format!(
                    "{} AS {}",
                    dialect.wrap_table(name),
                    dialect.wrap_value(alias)
                ),
                None => dialect.wrap_table(name),
            }),
            FromClause::Raw {
                expression,
                bindings,
            } => self.compile_raw(ctx, expression, bindings),
            FromClause::SubQuery { query, alias } => {
                let sub = self.compile_subquery(ctx, query)?;
                Ok(match alias {
                    Some(alias) => format!("({sub}) AS {}", dialect.wrap_value(alias)),
                    None => format!("({sub})"),
                })
            }
        }
    }

    fn compile_column(&self, ctx: &mut CompileContext, column: &Column) -> Result<String> {
        match column {
            Column::Name(name) => Ok(self.dialect().wrap(name)),
            Column::Raw {
                expression,
                bindings,
            } => self.compile_raw(ctx, expression, bindings),
            Column::SubQuery { query, alias } => {
                let sub = self.compile_subquery(ctx, query)?;
                Ok(format!("({sub}) AS {}", self.dialect().wrap_value(alias)))
            }
        }
    }

    fn compile_column_list(&self, ctx: &mut CompileContext, columns: &[&Column]) -> Result<String> {
        let mut compiled = Vec::with_capacity(columns.len());
        for column in columns {
            compiled.push(self.compile_column(ctx, column)?);
        }
        Ok(compiled.join(", "))
    }

    fn compile_aggregate(&self, query: &Query) -> Result<Option<String>> {
        let Some(aggregate) = first::<Aggregate>(query, Component::Aggregate)? else {
            return Ok(None);
        };
        let dialect = self.dialect();
        let mut columns = dialect.columnize(&aggregate.columns);
        if query.is_distinct() && columns != "*" {
            columns = format!("DISTINCT {columns}");
        }
        let alias = aggregate
            .alias
            .clone()
            .unwrap_or_else(|| aggregate.function.as_str().to_lowercase());
        Ok(Some(format!(
            "SELECT {}({columns}) AS {}",
            aggregate.function.as_str(),
            dialect.wrap_value(&alias)
        )))
    }

    fn compile_columns(&self, ctx: &mut CompileContext, query: &Query) -> Result<Option<String>> {
        if query.clauses().has(Component::Aggregate) {
            return Ok(None);
        }
        let columns = query.clauses().get_strict::<Column>(Component::Select)?;
        let list = if columns.is_empty() {
            String::from("*")
        } else {
            self.compile_column_list(ctx, &columns)?
        };
        let distinct = if query.is_distinct() { "DISTINCT " } else { "" };
        Ok(Some(format!("SELECT {distinct}{list}")))
    }

    fn compile_from(&self, ctx: &mut CompileContext, query: &Query) -> Result<Option<String>> {
        match first::<FromClause>(query, Component::From)? {
            Some(from) => Ok(Some(format!(
                "FROM {}",
                self.compile_table_expression(ctx, from)?
            ))),
            None => Ok(None),
        }
    }

    fn compile_joins(&self, ctx: &mut CompileContext, query: &Query) -> Result<Option<String>> {
        let joins = query.clauses().get_strict::<Join>(Component::Join)?;
        let mut parts = Vec::with_capacity(joins.len());
        for join in joins {
            let table = self.compile_table_expression(ctx, &join.table)?;
            let on = self.compile_conditions(ctx, &join.on)?;
            if on.is_empty() {
                parts.push(format!("{} {table}", join.join_type.as_str()));
            } else {
                parts.push(format!("{} {table} ON {on}", join.join_type.as_str()));
            }
        }
        Ok(non_empty(parts.join(" ")))
    }

    fn compile_wheres(&self, ctx: &mut CompileContext, query: &Query) -> Result<Option<String>> {
        if !query.clauses().has(Component::From) || !query.clauses().has(Component::Where) {
            return Ok(None);
        }
        let conditions = query.clauses().get_strict::<Condition>(Component::Where)?;
        let sql = self.compile_conditions(ctx, conditions)?;
        Ok(non_empty(sql).map(|sql| format!("WHERE {sql}")))
    }

    fn compile_groups(&self, ctx: &mut CompileContext, query: &Query) -> Result<Option<String>> {
        let columns = query.clauses().get_strict::<Column>(Component::Group)?;
        if columns.is_empty() {
            return Ok(None);
        }
        let list = self.compile_column_list(ctx, &columns)?;
        Ok(Some(format!("GROUP BY {list}")))
    }

    fn compile_havings(&self, ctx: &mut CompileContext, query: &Query) -> Result<Option<String>> {
        let conditions = query.clauses().get_strict::<Condition>(Component::Having)?;
        let mut parts: Vec<String> = Vec::with_capacity(conditions.len());
        for condition in conditions {
            let sql = self.compile_condition(ctx, condition)?;
            if sql.is_empty() {
                continue;
            }
            let connective = match (parts.is_empty(), condition.or) {
                (true, _) => "",
                (false, true) => "OR ",
                (false, false) => "AND ",
            };
            parts.push(format!("{connective}HAVING {sql}"));
        }
        Ok(non_empty(parts.join(" ")))
    }

    fn compile_orders(&self, ctx: &mut CompileContext, query: &Query) -> Result<Option<String>> {
        let orders = query.clauses().get_strict::<Order>(Component::Order)?;
        if orders.is_empty() {
            return Ok(None);
        }
        let dialect = self.dialect();
        let mut parts = Vec::with_capacity(orders.len());
        for order in orders {
            parts.push(match order {
                Order::Column { column, direction } => {
                    format!("{} {}", dialect.wrap(column), direction.as_str())
                }
                Order::Raw {
                    expression,
                    bindings,
                } => self.compile_raw(ctx, expression, bindings)?,
                Order::Random { seed } => dialect.compile_random(seed.as_deref()),
            });
        }
        Ok(Some(format!("ORDER BY {}", parts.join(", "))))
    }

    fn compile_limit(&self, ctx: &mut CompileContext, query: &Query) -> Result<Option<String>> {
        Ok(first::<Limit>(query, Component::Limit)?
            .and_then(|payload| payload.limit.filter(|_| payload.has_limit()))
            .map(|n| format!("LIMIT {}", ctx.bind(n.to_sql_value()))))
    }

    fn compile_offset(&self, ctx: &mut CompileContext, query: &Query) -> Result<Option<String>> {
        Ok(first::<Limit>(query, Component::Limit)?
            .and_then(|payload| payload.offset)
            .map(|n| format!("OFFSET {}", ctx.bind(n.to_sql_value()))))
    }

    fn compile_lock(&self, query: &Query) -> Result<Option<String>> {
        Ok(first::<Lock>(query, Component::Lock)?.and_then(|lock| self.dialect().compile_lock(lock)))
    }
}

/// First clause of `component`, failing on a foreign variant.
fn first<T: ClauseVariant>(query: &Query, component: Component) -> Result<Option<&T>> {
    Ok(query
        .clauses()
        .get_strict::<T>(component)?
        .into_iter()
        .next())
}

fn non_empty(sql: String) -> Option<String> {
    if sql.is_empty() {
        None
    } else {
        Some(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use crate::query::{AggregateFunction, Clause, JoinType};
    use crate::value::SqlValue;

    fn compile(query: &Query) -> (String, Vec<SqlValue>) {
        let compiler = Compiler::default();
        let mut ctx = CompileContext::new();
        let sql = compiler.compile_select(&mut ctx, query).unwrap();
        (sql, ctx.into_bindings())
    }

    #[test]
    fn test_star_when_no_columns() {
        assert_eq!(compile(&Query::new().from("users")).0, "SELECT * FROM users");
    }

    #[test]
    fn test_from_less_query() {
        let query = Query::new().select_raw("1 + ?", vec![SqlValue::Int(1)]);
        assert_eq!(compile(&query), (String::from("SELECT 1 + ?"), vec![SqlValue::Int(1)]));
    }

    #[test]
    fn test_aggregate_suppresses_columns() {
        let query = Query::new()
            .from("users")
            .select(&["id", "name"])
            .aggregate(AggregateFunction::Max, &["age"]);
        assert_eq!(compile(&query).0, "SELECT MAX(age) AS max FROM users");
    }

    #[test]
    fn test_distinct() {
        let query = Query::new().from("users").select(&["dept"]).distinct();
        assert_eq!(compile(&query).0, "SELECT DISTINCT dept FROM users");

        let query = Query::new().from("users").count().distinct();
        assert_eq!(compile(&query).0, "SELECT COUNT(*) AS count FROM users");

        let query = Query::new()
            .from("users")
            .aggregate(AggregateFunction::Count, &["dept"])
            .distinct();
        assert_eq!(
            compile(&query).0,
            "SELECT COUNT(DISTINCT dept) AS count FROM users"
        );
    }

    #[test]
    fn test_join_without_on() {
        let query = Query::new().from("a").cross_join("b");
        assert_eq!(compile(&query).0, "SELECT * FROM a CROSS JOIN b");
    }

    #[test]
    fn test_join_with_alias() {
        let join = Join {
            join_type: JoinType::Left,
            table: FromClause::Table {
                name: String::from("users"),
                alias: Some(String::from("u")),
            },
            on: vec![Condition::columns("u.id", "=", "posts.user_id")],
        };
        let query = Query::new().from("posts").join_clause(join);
        assert_eq!(
            compile(&query).0,
            "SELECT * FROM posts LEFT JOIN users AS u ON u.id = posts.user_id"
        );
    }

    #[test]
    fn test_where_requires_from() {
        let query = Query::new().filter("id", "=", 1);
        assert_eq!(compile(&query), (String::from("SELECT *"), vec![]));
    }

    #[test]
    fn test_orders() {
        let query = Query::new()
            .from("users")
            .order_by("name")
            .order_by_desc("id")
            .order_by_raw("FIELD(id, ?)", vec![SqlValue::Int(3)])
            .order_by_random(None);
        assert_eq!(
            compile(&query),
            (
                String::from(
                    "SELECT * FROM users ORDER BY name ASC, id DESC, FIELD(id, ?), RANDOM()"
                ),
                vec![SqlValue::Int(3)]
            )
        );
    }

    #[test]
    fn test_limit_zero_and_offset_zero() {
        let query = Query::new().from("users").limit(0).offset(0);
        assert_eq!(
            compile(&query),
            (String::from("SELECT * FROM users OFFSET ?"), vec![SqlValue::Int(0)])
        );
    }

    #[test]
    fn test_generic_dialect_skips_unions_and_lock() {
        let query = Query::new()
            .from("a")
            .union(Query::new().from("b"))
            .lock(crate::query::LockStrength::Update, false);
        assert_eq!(compile(&query).0, "SELECT * FROM a");
    }

    #[test]
    fn test_combines() {
        let compiler = Compiler::default();
        let query = Query::new()
            .from("a")
            .union_all(Query::new().from("b").filter("x", "=", 1))
            .combine_raw("EXCEPT SELECT * FROM c WHERE y = ?", vec![SqlValue::Int(2)]);

        let mut ctx = CompileContext::new();
        let sql = compiler.compile_combines(&mut ctx, &query, true).unwrap();
        assert_eq!(
            sql.as_deref(),
            Some("UNION ALL (SELECT * FROM b WHERE x = ?) EXCEPT SELECT * FROM c WHERE y = ?")
        );
        assert_eq!(ctx.bindings(), &[SqlValue::Int(1), SqlValue::Int(2)]);

        let mut ctx = CompileContext::new();
        let sql = compiler.compile_combines(&mut ctx, &query, false).unwrap();
        assert!(sql.unwrap().starts_with("UNION ALL SELECT * FROM b"));
    }

    #[test]
    fn test_foreign_variant_in_component() {
        let lock = Lock {
            strength: crate::query::LockStrength::Share,
            nowait: false,
        };
        let mut query = Query::new();
        query.clauses_mut().add(Component::From, Clause::Lock(lock));
        let mut ctx = CompileContext::new();
        let err = Compiler::default()
            .compile_select(&mut ctx, &query)
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidClause {
                component: "from",
                found: "lock"
            }
        ));
    }
}
