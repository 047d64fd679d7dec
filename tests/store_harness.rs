//! Record-store adapter integration harness.
//!
//! # What this covers
//!
//! - **Memory store**: composed predicates execute against JSON fixtures;
//!   unknown fields and relations surface at execution time.
//! - **SQL renderer**: composed predicates render into a parameterised
//!   `WHERE` fragment with one placeholder per needle, correlated `EXISTS`
//!   subqueries per relation, and self-joins aliased apart.
//!
//! # What this does NOT cover
//!
//! - Running the rendered SQL against a real database
//!
//! # Running
//!
//! ```sh
//! cargo test --test store_harness
//! ```

mod common;
use common::*;

use fuzzmatch_core::{build_predicate, expand, Predicate, Relation};
use fuzzmatch_store::{
    sql::{SqlError, SqlSchema},
    MemoryStore, RecordStore, StoreError,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn ads_schema() -> SqlSchema {
    SqlSchema::new("ads")
        .join("user", "users", "id", "user_id")
        .join("category", "categories", "id", "category_id")
}

// ---------------------------------------------------------------------------
// Memory store
// ---------------------------------------------------------------------------

#[test]
fn unknown_field_surfaces_at_execution() {
    let predicate = build_predicate("bike", &["headline"], &[]);
    let err = ads_store().filter(&predicate).unwrap_err();
    assert!(matches!(err, StoreError::UnknownField { ref field } if field == "headline"));
    assert_eq!(err.to_string(), "unknown field `headline`");
}

#[test]
fn unknown_relation_surfaces_at_execution() {
    let predicate = build_predicate("bike", &[] as &[&str], &[Relation::new("seller", ["name"])]);
    let err = ads_store().filter(&predicate).unwrap_err();
    assert!(matches!(err, StoreError::UnknownRelation { ref relation } if relation == "seller"));
}

#[test]
fn match_all_returns_the_whole_store() {
    let store = ads_store();
    assert_eq!(store.filter(&Predicate::MatchAll).unwrap().len(), 4);
}

#[test]
fn malformed_fixture_is_rejected() {
    assert!(matches!(
        MemoryStore::from_json("{\"not\": \"an array\"}"),
        Err(StoreError::Json(_))
    ));
}

// ---------------------------------------------------------------------------
// SQL renderer
// ---------------------------------------------------------------------------

#[test]
fn short_query_renders_exact_clauses_only() {
    let predicate = build_predicate("Hi", &["title"], &[Relation::new("user", ["name"])]);
    let sql = ads_schema().render(&predicate).unwrap();

    assert_eq!(
        sql.clause,
        concat!(
            r#"(LOWER("ads"."title") LIKE ? ESCAPE '!' OR "#,
            r#"EXISTS (SELECT 1 FROM "users" AS "r1" WHERE "r1"."id" = "ads"."user_id" "#,
            r#"AND LOWER("r1"."name") LIKE ? ESCAPE '!'))"#,
        )
    );
    assert_eq!(sql.params, vec!["%hi%", "%hi%"]);
}

#[test]
fn tiered_query_renders_one_param_per_needle() {
    let relations = [Relation::new("user", ["name", "email"])];
    let predicate = build_predicate("test", &["title", "description"], &relations);
    let sql = ads_schema().render(&predicate).unwrap();

    let variants = expand("test");
    // exact: 2 fields + 2 relation fields; fuzzy: (2 + 2) fields × variants.
    assert_eq!(sql.params.len(), 4 + 4 * variants.len());
    assert_eq!(sql.params.len(), sql.clause.matches('?').count());
    assert!(sql.params.contains(&"%t3st%".to_string()));
    assert!(sql.params.contains(&"%te$t%".to_string()));
}

#[test]
fn self_join_is_aliased() {
    let schema = SqlSchema::new("categories").join("parent", "categories", "id", "parent_id");
    let predicate = build_predicate("ca", &["name"], &[Relation::new("parent", ["name"])]);
    let sql = schema.render(&predicate).unwrap();
    assert!(sql
        .clause
        .contains(r#"FROM "categories" AS "r1" WHERE "r1"."id" = "categories"."parent_id""#));
}

#[test]
fn nested_relations_get_deeper_aliases() {
    let schema = ads_schema().join("plan", "plans", "id", "plan_id");
    let predicate = Predicate::exists("user", Predicate::exists("plan", Predicate::contains("name", "gold")));
    let sql = schema.render(&predicate).unwrap();
    assert!(sql.clause.contains(r#"FROM "plans" AS "r2" WHERE "r2"."id" = "r1"."plan_id""#));
}

#[rstest]
#[case("title; DROP TABLE ads")]
#[case("1title")]
#[case("")]
fn bad_identifiers_are_rejected(#[case] field: &str) {
    let err = ads_schema()
        .render(&Predicate::contains(field, "x"))
        .unwrap_err();
    assert_eq!(err, SqlError::InvalidIdentifier { ident: field.to_string() });
}

#[test]
fn schema_deserializes_from_json() {
    let schema: SqlSchema = serde_json::from_str(
        r#"{ "table": "ads", "joins": { "user": { "table": "users", "key": "id", "parent_key": "user_id" } } }"#,
    )
    .unwrap();
    assert_eq!(schema, SqlSchema::new("ads").join("user", "users", "id", "user_id"));
}
