//! SQL rendering of predicate trees.
//!
//! Produces a `WHERE` fragment with `?` placeholders plus its parameters, for
//! a schema that describes how each relation joins back to its parent:
//!
//! ```text
//! FieldContains   LOWER("ads"."title") LIKE ? ESCAPE '!'      param: %needle%
//! RelationExists  EXISTS (SELECT 1 FROM "users" AS "r1"
//!                         WHERE "r1"."id" = "ads"."user_id" AND (...))
//! ```
//!
//! Related tables are aliased `r1`, `r2`, … by nesting depth so self-joins
//! (a category's parent category) stay unambiguous.

use fuzzmatch_core::Predicate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const LIKE_ESCAPE: char = '!';

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SqlError {
    #[error("`{ident}` is not a plain SQL identifier")]
    InvalidIdentifier { ident: String },

    #[error("no join described for relation `{relation}`")]
    UnknownRelation { relation: String },
}

/// How a relation's rows link to the row that owns them:
/// `related.key = parent.parent_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    pub table: String,
    pub key: String,
    pub parent_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlSchema {
    pub table: String,
    #[serde(default)]
    pub joins: BTreeMap<String, Join>,
}

/// A rendered condition and its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlWhere {
    pub clause: String,
    pub params: Vec<String>,
}

impl SqlSchema {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            joins: BTreeMap::new(),
        }
    }

    pub fn join(
        mut self,
        relation: impl Into<String>,
        table: impl Into<String>,
        key: impl Into<String>,
        parent_key: impl Into<String>,
    ) -> Self {
        self.joins.insert(
            relation.into(),
            Join {
                table: table.into(),
                key: key.into(),
                parent_key: parent_key.into(),
            },
        );
        self
    }

    pub fn render(&self, predicate: &Predicate) -> Result<SqlWhere, SqlError> {
        let mut params = Vec::new();
        let root = ident(&self.table)?;
        let clause = self.render_node(predicate, &root, 0, &mut params)?;
        tracing::debug!(table = %self.table, params = params.len(), "rendered sql predicate");
        Ok(SqlWhere { clause, params })
    }

    fn render_node(
        &self,
        predicate: &Predicate,
        qualifier: &str,
        depth: usize,
        params: &mut Vec<String>,
    ) -> Result<String, SqlError> {
        match predicate {
            Predicate::MatchAll => Ok("1 = 1".to_string()),
            Predicate::FieldContains { field, needle } => {
                params.push(format!("%{}%", escape_like(&needle.to_lowercase())));
                Ok(format!(
                    "LOWER({qualifier}.{}) LIKE ? ESCAPE '{LIKE_ESCAPE}'",
                    ident(field)?
                ))
            }
            Predicate::RelationExists { relation, predicate } => {
                let join = self
                    .joins
                    .get(relation)
                    .ok_or_else(|| SqlError::UnknownRelation { relation: relation.clone() })?;
                let alias = format!("\"r{}\"", depth + 1);
                let inner = self.render_node(predicate, &alias, depth + 1, params)?;
                Ok(format!(
                    "EXISTS (SELECT 1 FROM {} AS {alias} WHERE {alias}.{} = {qualifier}.{} AND {inner})",
                    ident(&join.table)?,
                    ident(&join.key)?,
                    ident(&join.parent_key)?,
                ))
            }
            Predicate::And(children) => self.render_group(children, "AND", "1 = 1", qualifier, depth, params),
            Predicate::Or(children) => self.render_group(children, "OR", "1 = 0", qualifier, depth, params),
        }
    }

    fn render_group(
        &self,
        children: &[Predicate],
        op: &str,
        empty: &str,
        qualifier: &str,
        depth: usize,
        params: &mut Vec<String>,
    ) -> Result<String, SqlError> {
        match children {
            [] => Ok(empty.to_string()),
            [only] => self.render_node(only, qualifier, depth, params),
            _ => {
                let parts = children
                    .iter()
                    .map(|child| self.render_node(child, qualifier, depth, params))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("({})", parts.join(&format!(" {op} "))))
            }
        }
    }
}

/// Quote a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
fn ident(name: &str) -> Result<String, SqlError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(SqlError::InvalidIdentifier { ident: name.to_string() });
    }
    Ok(format!("\"{name}\""))
}

fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}
