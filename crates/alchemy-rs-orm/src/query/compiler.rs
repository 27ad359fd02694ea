//! SELECT query AST and SQL compiler.
//!
//! [`Query`] collects class-level [`Operand`]s for filtering and ordering,
//! and [`SqlCompiler`] renders them as parameterized SQL. PostgreSQL uses
//! `$1, $2, ...` placeholders; SQLite and MySQL use `?`.

use alchemy_rs_core::{OrmError, OrmResult, Settings};

use super::expressions::Expression;
use super::operand::Operand;
use crate::model::Model;
use crate::value::Value;

/// The type of database backend, used by the compiler to generate
/// backend-specific SQL syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    /// PostgreSQL (uses `$1, $2, ...` placeholders).
    PostgreSQL,
    /// SQLite (uses `?` placeholders).
    SQLite,
    /// MySQL (uses `?` placeholders).
    MySQL,
}

impl DatabaseBackendType {
    /// Parses a backend name such as "postgresql", "sqlite" or "mysql".
    pub fn from_name(name: &str) -> OrmResult<Self> {
        match name.to_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSQL),
            "sqlite" | "sqlite3" => Ok(Self::SQLite),
            "mysql" | "mariadb" => Ok(Self::MySQL),
            other => Err(OrmError::ConfigurationError(format!(
                "Unknown database backend '{other}'"
            ))),
        }
    }

    /// Returns the backend named by `settings.default_backend`.
    pub fn from_settings(settings: &Settings) -> OrmResult<Self> {
        Self::from_name(&settings.default_backend)
    }
}

/// An ORDER BY term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expression,
    /// Whether to sort in descending order.
    pub descending: bool,
}

/// A table in the FROM clause, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromItem {
    /// The table name.
    pub table: String,
    /// Optional alias.
    pub alias: Option<String>,
}

/// The query AST for a SELECT statement.
#[derive(Debug, Clone)]
pub struct Query {
    /// Tables in the FROM clause.
    pub from: Vec<FromItem>,
    /// Selected expressions; empty means `*`.
    pub select: Vec<Expression>,
    /// WHERE conditions, joined with AND.
    pub filters: Vec<Expression>,
    /// ORDER BY terms.
    pub order_by: Vec<OrderBy>,
    /// LIMIT.
    pub limit: Option<usize>,
}

impl Query {
    /// Creates a new query selecting from the given table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            from: vec![FromItem {
                table: table.into(),
                alias: None,
            }],
            select: Vec::new(),
            filters: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Creates a new query selecting from a model's table.
    pub fn for_model<M: Model>() -> Self {
        Self::new(M::table_name())
    }

    /// Adds another (possibly aliased) table to the FROM clause.
    pub fn also_from(mut self, table: impl Into<String>, alias: Option<&str>) -> Self {
        self.from.push(FromItem {
            table: table.into(),
            alias: alias.map(str::to_string),
        });
        self
    }

    /// Adds a selected column or expression.
    pub fn select(mut self, column: impl Into<Operand>) -> OrmResult<Self> {
        self.select.push(class_side(column.into(), "select")?);
        Ok(self)
    }

    /// Adds a WHERE condition.
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::TypeError`] when given an in-memory value, which
    /// usually means an instance was used where the class was meant.
    pub fn filter(mut self, condition: impl Into<Operand>) -> OrmResult<Self> {
        self.filters.push(class_side(condition.into(), "filter")?);
        Ok(self)
    }

    /// Adds an ORDER BY term.
    pub fn order_by(mut self, key: impl Into<Operand>, descending: bool) -> OrmResult<Self> {
        let expr = class_side(key.into(), "order_by")?;
        self.order_by.push(OrderBy { expr, descending });
        Ok(self)
    }

    /// Sets the LIMIT.
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

fn class_side(operand: Operand, clause: &str) -> OrmResult<Expression> {
    if let Operand::Value(v) = &operand {
        return Err(OrmError::TypeError(format!(
            "{clause}() expects a class-level expression, got the in-memory value {v}"
        )));
    }
    Ok(operand.into_expression())
}

/// The SQL compiler translates expressions and [`Query`] ASTs into
/// parameterized SQL.
pub struct SqlCompiler {
    backend: DatabaseBackendType,
}

impl SqlCompiler {
    /// Creates a new compiler for the given backend type.
    pub const fn new(backend: DatabaseBackendType) -> Self {
        Self { backend }
    }

    /// Creates a compiler for the backend named by `settings`.
    pub fn from_settings(settings: &Settings) -> OrmResult<Self> {
        DatabaseBackendType::from_settings(settings).map(Self::new)
    }

    /// Returns the backend this compiler targets.
    pub const fn backend(&self) -> DatabaseBackendType {
        self.backend
    }

    /// Returns a parameter placeholder for the given 1-based index.
    fn placeholder(&self, index: usize) -> String {
        match self.backend {
            DatabaseBackendType::PostgreSQL => format!("${index}"),
            DatabaseBackendType::SQLite | DatabaseBackendType::MySQL => "?".to_string(),
        }
    }

    /// Compiles a standalone expression into SQL and parameters.
    pub fn compile_expression(&self, expr: &Expression) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let sql = self.expression_sql(expr, &mut params);
        (sql, params)
    }

    /// Compiles a SELECT query into SQL and parameters.
    pub fn compile_select(&self, query: &Query) -> (String, Vec<Value>) {
        let mut params: Vec<Value> = Vec::new();
        let mut sql = String::from("SELECT ");

        if query.select.is_empty() {
            sql.push('*');
        } else {
            let cols: Vec<String> = query
                .select
                .iter()
                .map(|e| self.expression_sql(e, &mut params))
                .collect();
            sql.push_str(&cols.join(", "));
        }

        let from: Vec<String> = query
            .from
            .iter()
            .map(|item| match &item.alias {
                Some(alias) => format!("\"{}\" AS \"{alias}\"", item.table),
                None => format!("\"{}\"", item.table),
            })
            .collect();
        sql.push_str(" FROM ");
        sql.push_str(&from.join(", "));

        if !query.filters.is_empty() {
            let conds: Vec<String> = query
                .filters
                .iter()
                .map(|e| self.expression_sql(e, &mut params))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&conds.join(" AND "));
        }

        if !query.order_by.is_empty() {
            let terms: Vec<String> = query
                .order_by
                .iter()
                .map(|o| {
                    let expr = self.expression_sql(&o.expr, &mut params);
                    if o.descending {
                        format!("{expr} DESC")
                    } else {
                        format!("{expr} ASC")
                    }
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        (sql, params)
    }

    fn expression_sql(&self, expr: &Expression, params: &mut Vec<Value>) -> String {
        match expr {
            Expression::Column { table: Some(t), name } => format!("\"{t}\".\"{name}\""),
            Expression::Column { table: None, name } => format!("\"{name}\""),
            Expression::Value(val) => {
                params.push(val.clone());
                self.placeholder(params.len())
            }
            Expression::Func { name, args } => {
                let arg_parts: Vec<String> = args
                    .iter()
                    .map(|a| self.expression_sql(a, params))
                    .collect();
                format!("{name}({})", arg_parts.join(", "))
            }
            Expression::Binary { op, lhs, rhs } => {
                let l = self.expression_sql(lhs, params);
                let r = self.expression_sql(rhs, params);
                format!("({l} {} {r})", op.sql())
            }
            Expression::Not(inner) => {
                format!("NOT ({})", self.expression_sql(inner, params))
            }
            Expression::IsNull { expr, negated } => {
                let inner = self.expression_sql(expr, params);
                if *negated {
                    format!("{inner} IS NOT NULL")
                } else {
                    format!("{inner} IS NULL")
                }
            }
            Expression::Label { name, expr } => {
                format!("{} AS \"{name}\"", self.expression_sql(expr, params))
            }
        }
    }
}
