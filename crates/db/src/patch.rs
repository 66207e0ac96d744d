//! Partial-update statement synthesis.
//!
//! An update input carries every column as an `Option`. [`Patch`] turns the
//! present fields into `(column, value)` assignments in declaration order, and
//! [`build_update`] splices them into a scoped
//! `UPDATE <target> SET ... FROM <links> WHERE <ownership predicate>` statement.
//! Placeholders are numbered in the same order the arguments are bound: the
//! generated assignments first, then the scope ids.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use timeslot_core::types::{DbId, Timestamp};

use crate::error::DbError;

/// A value bound to one placeholder of a synthesized statement.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Id(DbId),
    Text(String),
    Timestamp(Timestamp),
    Bool(bool),
}

impl BindValue {
    fn bind_to<'q>(
        self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            BindValue::Id(v) => query.bind(v),
            BindValue::Text(v) => query.bind(v),
            BindValue::Timestamp(v) => query.bind(v),
            BindValue::Bool(v) => query.bind(v),
        }
    }
}

/// One `column = value` pair of a SET clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: &'static str,
    pub value: BindValue,
}

impl Assignment {
    pub fn new(column: &'static str, value: BindValue) -> Self {
        Self { column, value }
    }
}

/// Sparse update input for one resource type.
///
/// Implementations destructure the input struct so that adding a field without
/// mapping it is a compile error.
pub trait Patch {
    /// Assignments for every present field, in declaration order.
    fn assignments(&self) -> Vec<Assignment>;

    fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }
}

/// Target table and ownership predicate for a scoped update.
#[derive(Debug, Clone, Copy)]
pub struct UpdateScope<'a> {
    /// Table being updated, with alias (e.g. `timeslots_lists tl`).
    pub target: &'a str,
    /// Comma-separated link tables joined in the `FROM` clause.
    pub from: &'a str,
    /// Join conditions tying `target` to the link tables, without placeholders.
    pub join: &'a str,
    /// Columns compared against the scope ids, in binding order.
    pub keys: &'a [(&'a str, DbId)],
}

/// A fully synthesized statement with its arguments in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub sql: String,
    pub assignments: Vec<String>,
    pub args: Vec<BindValue>,
}

impl UpdateStatement {
    /// Build an executable query with every argument bound.
    pub fn query(&self) -> Query<'_, Postgres, PgArguments> {
        self.args
            .iter()
            .cloned()
            .fold(sqlx::query(&self.sql), |query, arg| arg.bind_to(query))
    }
}

/// Synthesize a scoped UPDATE for the present fields of `patch`.
///
/// Fails with [`DbError::EmptyUpdate`] when no field is present; nothing is
/// built in that case.
pub fn build_update(patch: &impl Patch, scope: &UpdateScope<'_>) -> Result<UpdateStatement, DbError> {
    let fields = patch.assignments();
    if fields.is_empty() {
        return Err(DbError::EmptyUpdate);
    }

    let mut assignments = Vec::with_capacity(fields.len());
    let mut args = Vec::with_capacity(fields.len() + scope.keys.len());
    let mut param_idx: usize = 1;

    for Assignment { column, value } in fields {
        assignments.push(format!("{column} = ${param_idx}"));
        args.push(value);
        param_idx += 1;
    }

    let mut predicates = vec![scope.join.to_string()];
    for &(column, id) in scope.keys {
        predicates.push(format!("{column} = ${param_idx}"));
        args.push(BindValue::Id(id));
        param_idx += 1;
    }

    let sql = format!(
        "UPDATE {} SET {} FROM {} WHERE {}",
        scope.target,
        assignments.join(", "),
        scope.from,
        predicates.join(" AND ")
    );

    Ok(UpdateStatement {
        sql,
        assignments,
        args,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Default)]
    struct Sample {
        name: Option<String>,
        flag: Option<bool>,
    }

    impl Patch for Sample {
        fn assignments(&self) -> Vec<Assignment> {
            let Sample { name, flag } = self;
            let mut out = Vec::new();
            if let Some(name) = name {
                out.push(Assignment::new("name", BindValue::Text(name.clone())));
            }
            if let Some(flag) = flag {
                out.push(Assignment::new("flag", BindValue::Bool(*flag)));
            }
            out
        }
    }

    const SCOPE: UpdateScope<'static> = UpdateScope {
        target: "things t",
        from: "owners o",
        join: "t.id = o.thing_id",
        keys: &[("o.thing_id", 5), ("o.user_id", 9)],
    };

    #[test]
    fn empty_patch_is_rejected() {
        let result = build_update(&Sample::default(), &SCOPE);
        assert_matches!(result, Err(DbError::EmptyUpdate));
        assert!(Sample::default().is_empty());
    }

    #[test]
    fn scope_placeholders_follow_assignments() {
        let patch = Sample {
            name: Some("n".into()),
            flag: Some(true),
        };
        let stmt = build_update(&patch, &SCOPE).unwrap();

        assert_eq!(
            stmt.sql,
            "UPDATE things t SET name = $1, flag = $2 FROM owners o \
             WHERE t.id = o.thing_id AND o.thing_id = $3 AND o.user_id = $4"
        );
        assert_eq!(
            stmt.args,
            vec![
                BindValue::Text("n".into()),
                BindValue::Bool(true),
                BindValue::Id(5),
                BindValue::Id(9),
            ]
        );
    }

    #[test]
    fn absent_fields_are_skipped() {
        let patch = Sample {
            name: None,
            flag: Some(false),
        };
        let stmt = build_update(&patch, &SCOPE).unwrap();

        assert_eq!(stmt.assignments, vec!["flag = $1".to_string()]);
        assert_eq!(stmt.args.len(), 3);
        assert!(!stmt.sql.contains("name"));
    }
}
