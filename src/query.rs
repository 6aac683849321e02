//! Query-string parsing and SELECT construction.
//!
//! Translates the flat `id` / `limit` / `offset` / `search` / `sort` /
//! `order` / per-resource filter parameters into a bound statement via
//! `sqlx::QueryBuilder`. Column names always come from the static schema,
//! never from the request.

use std::collections::HashMap;

use sqlx::sqlite::Sqlite;
use sqlx::QueryBuilder;

use crate::error::{AppError, AppResult};
use crate::schema::{FieldKind, ResourceSchema, shouty};
use crate::validate::SqlVal;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Parsed list parameters.
#[derive(Debug)]
pub struct ListParams {
    pub limit: i64,
    pub offset: i64,
    pub search: Option<String>,
    /// Equality filters as (column, value) pairs.
    pub filters: Vec<(&'static str, SqlVal)>,
    pub sort_column: &'static str,
    pub descending: bool,
}

/// Parses the record selector, if present. Anything non-numeric is a 400.
pub fn parse_id(params: &HashMap<String, String>) -> AppResult<Option<i64>> {
    match params.get("id") {
        None => Ok(None),
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Some(id)),
            _ => Err(AppError::InvalidId),
        },
    }
}

/// Parses list parameters against the schema. Unknown parameters are
/// ignored; enum-constrained filters reject unknown values.
pub fn parse_list(
    schema: &ResourceSchema,
    params: &HashMap<String, String>,
) -> AppResult<ListParams> {
    // Unparsable or zero limit/offset fall back to the defaults, mirroring
    // the lenient parseInt-or-default handling of the public form clients.
    let limit = params
        .get("limit")
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n != 0)
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT);
    let offset = params
        .get("offset")
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0)
        .max(0);

    let search = params
        .get("search")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let mut filters = Vec::new();
    for spec in schema.filters {
        let Some(raw) = params.get(spec.param) else {
            continue;
        };
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        if let Some(allowed) = spec.allowed {
            if !allowed.contains(&raw) {
                return Err(AppError::validation(
                    format!("INVALID_{}", shouty(spec.param)),
                    format!("{} must be one of: {}", spec.param, allowed.join(", ")),
                ));
            }
        }
        let value = match spec.kind {
            FieldKind::Text => SqlVal::Text(raw.to_string()),
            FieldKind::Integer => match raw.parse::<i64>() {
                Ok(n) => SqlVal::Int(n),
                Err(_) => {
                    return Err(AppError::validation(
                        format!("INVALID_{}", shouty(spec.param)),
                        format!("{} must be an integer", spec.param),
                    ))
                }
            },
            FieldKind::Real => match raw.parse::<f64>() {
                Ok(f) => SqlVal::Real(f),
                Err(_) => {
                    return Err(AppError::validation(
                        format!("INVALID_{}", shouty(spec.param)),
                        format!("{} must be a number", spec.param),
                    ))
                }
            },
            FieldKind::Boolean => match raw {
                "true" | "1" => SqlVal::Int(1),
                "false" | "0" => SqlVal::Int(0),
                _ => {
                    return Err(AppError::validation(
                        format!("INVALID_{}", shouty(spec.param)),
                        format!("{} must be true or false", spec.param),
                    ))
                }
            },
            FieldKind::StringArray => SqlVal::Text(raw.to_string()),
        };
        filters.push((spec.column, value));
    }

    let sort_column = params
        .get("sort")
        .map(|s| schema.sort_column(s))
        .unwrap_or("created_at");
    let descending = params
        .get("order")
        .map(|s| !s.eq_ignore_ascii_case("asc"))
        .unwrap_or(true);

    Ok(ListParams {
        limit,
        offset,
        search,
        filters,
        sort_column,
        descending,
    })
}

/// Pushes a typed value as a bind parameter.
pub fn push_bind(qb: &mut QueryBuilder<'_, Sqlite>, value: &SqlVal) {
    match value {
        SqlVal::Text(s) => qb.push_bind(s.clone()),
        SqlVal::Int(n) => qb.push_bind(*n),
        SqlVal::Real(f) => qb.push_bind(*f),
        SqlVal::Null => qb.push_bind(None::<String>),
    };
}

/// Builds the list SELECT: filters AND'd together, search OR'd across the
/// schema's text columns, deterministic ordering with an id tie-break.
pub fn build_select(schema: &ResourceSchema, params: &ListParams) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE 1 = 1", schema.table));

    for (column, value) in &params.filters {
        qb.push(format!(" AND {} = ", column));
        push_bind(&mut qb, value);
    }

    // A search term on a resource with no searchable columns is ignored;
    // an empty OR group would not be valid SQL.
    if let Some(term) = &params.search {
        if !schema.search_columns.is_empty() {
            let pattern = format!("%{}%", term);
            qb.push(" AND (");
            for (i, column) in schema.search_columns.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(format!("{} LIKE ", column));
                qb.push_bind(pattern.clone());
            }
            qb.push(")");
        }
    }

    let dir = if params.descending { "DESC" } else { "ASC" };
    qb.push(format!(
        " ORDER BY {} {}, id {}",
        params.sort_column, dir, dir
    ));
    qb.push(" LIMIT ");
    qb.push_bind(params.limit);
    qb.push(" OFFSET ");
    qb.push_bind(params.offset);

    qb
}
