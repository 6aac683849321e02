//! Declarative resource metadata.
//!
//! Every REST resource is described by a static [`ResourceSchema`]: its
//! table, field list with validation rules, searchable columns, equality
//! filters, sortable columns, and how unique-index violations are resolved.
//! One generic handler set (see `api::crud`) is parameterized by these
//! tables instead of duplicating a handler per entity.

use actix_web::HttpRequest;
use serde_json::{Map, Value};

use crate::error::AppResult;

/// Storage/JSON type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// TEXT column, JSON string. Trimmed before storage.
    Text,
    /// INTEGER column, JSON integer.
    Integer,
    /// REAL column, JSON number.
    Real,
    /// INTEGER 0/1 column, JSON boolean.
    Boolean,
    /// TEXT column holding a serialized JSON array of strings.
    StringArray,
}

/// Extra validation applied after the kind check.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    None,
    /// Must match the email pattern.
    Email,
    /// Must be one of the listed values.
    OneOf(&'static [&'static str]),
    /// Integer within an inclusive range.
    IntRange(i64, i64),
    /// Number within an inclusive range.
    RealRange(f64, f64),
    /// Number strictly greater than zero.
    Positive,
    /// Must be exactly boolean `true` (consent checkboxes).
    ConsentTrue,
}

/// Default written when the field is absent from a create payload.
#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    Text(&'static str),
    Int(i64),
    Bool(bool),
}

/// One field of a resource: JSON name, column, kind and rules.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub rule: Rule,
    pub default: Option<FieldDefault>,
}

/// Starts an optional field with no extra rule.
pub const fn field(name: &'static str, column: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        column,
        kind,
        required: false,
        rule: Rule::None,
        default: None,
    }
}

impl FieldSpec {
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub const fn default_to(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }
}

/// Equality filter exposed as a query parameter.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    /// Query parameter name (matches the JSON field name).
    pub param: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    /// When set, values outside the list are rejected with 400.
    pub allowed: Option<&'static [&'static str]>,
}

pub const fn filter(param: &'static str, column: &'static str, kind: FieldKind) -> FilterSpec {
    FilterSpec {
        param,
        column,
        kind,
        allowed: None,
    }
}

impl FilterSpec {
    pub const fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }
}

/// How a unique-index violation on insert/update is resolved.
///
/// The unique index is the authoritative collision signal; there is no
/// speculative pre-check read.
#[derive(Debug, Clone, Copy)]
pub enum ConflictPolicy {
    /// No unique columns; a violation is an internal error.
    Fail,
    /// Report 409 with the given code (duplicate setting key).
    Duplicate {
        code: &'static str,
        message: &'static str,
    },
    /// Append an epoch-millis suffix to the named column and retry once
    /// (blog slugs).
    SuffixField { field: &'static str },
}

/// Mutates the create payload before validation (derived fields such as
/// slugs or the client IP).
pub type PrepareCreate = fn(&HttpRequest, &mut Map<String, Value>) -> AppResult<()>;

/// Mutates the update payload before validation, given the stored record
/// (slug regeneration, publish transitions).
pub type PrepareUpdate = fn(&Value, &mut Map<String, Value>) -> AppResult<()>;

/// Static description of one REST resource.
pub struct ResourceSchema {
    /// Display name used in messages ("Blog post not found").
    pub name: &'static str,
    /// URL path segment under `/api/`.
    pub path: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldSpec],
    /// Columns OR-matched by the `search` parameter.
    pub search_columns: &'static [&'static str],
    pub filters: &'static [FilterSpec],
    /// JSON field names accepted by the `sort` parameter. `createdAt` and
    /// `updatedAt` are always accepted.
    pub sortable: &'static [&'static str],
    pub on_conflict: ConflictPolicy,
    pub prepare_create: Option<PrepareCreate>,
    pub prepare_update: Option<PrepareUpdate>,
}

impl ResourceSchema {
    /// Looks up a field by its JSON name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Maps a `sort` parameter to a column, falling back to `created_at`.
    pub fn sort_column(&self, param: &str) -> &'static str {
        match param {
            "createdAt" => "created_at",
            "updatedAt" => "updated_at",
            other => {
                if self.sortable.contains(&other) {
                    self.field(other).map(|f| f.column).unwrap_or("created_at")
                } else {
                    "created_at"
                }
            }
        }
    }
}

/// SHOUTY_SNAKE form of a camelCase field name, for error codes
/// (`monthlyIncome` → `MONTHLY_INCOME`).
pub fn shouty(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() && !out.is_empty() {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shouty_converts_camel_case() {
        assert_eq!(shouty("monthlyIncome"), "MONTHLY_INCOME");
        assert_eq!(shouty("name"), "NAME");
        assert_eq!(shouty("imageUrl"), "IMAGE_URL");
    }

    #[test]
    fn sort_column_falls_back_to_created_at() {
        let schema = &crate::modules::testimonials::SCHEMA;
        assert_eq!(schema.sort_column("rating"), "rating");
        assert_eq!(schema.sort_column("createdAt"), "created_at");
        assert_eq!(schema.sort_column("; DROP TABLE"), "created_at");
        assert_eq!(schema.sort_column("review"), "created_at");
    }
}
