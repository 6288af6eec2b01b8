//! Query builder for the list operation.
//!
//! `agelte` and `agegte` are carried as raw strings so a non-numeric value is
//! silently ignored instead of failing query-string deserialization.

use mongodb::bson::{Document, doc};
use serde::Deserialize;
use utoipa::IntoParams;

/// Recognized query parameters for listing users
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Inclusive upper bound on age
    pub agelte: Option<String>,
    /// Inclusive lower bound on age
    pub agegte: Option<String>,
}

/// Translate recognized query parameters into a MongoDB filter document.
///
/// Each bound that parses as an integer contributes an `age` clause under
/// `$and`; with no valid bound the filter is empty (the `$and` key must be
/// omitted entirely, since MongoDB rejects an empty `$and` array). Never
/// fails.
pub fn build_filter(query: &ListQuery) -> Document {
    let mut clauses = Vec::new();

    if let Some(upper) = query.agelte.as_deref().and_then(|v| v.parse::<i32>().ok()) {
        clauses.push(doc! { "age": { "$lte": upper } });
    }
    if let Some(lower) = query.agegte.as_deref().and_then(|v| v.parse::<i32>().ok()) {
        clauses.push(doc! { "age": { "$gte": lower } });
    }

    if clauses.is_empty() {
        doc! {}
    } else {
        doc! { "$and": clauses }
    }
}
