//! Body validation: turns a JSON payload into typed column assignments
//! according to a [`ResourceSchema`].
//!
//! Create payloads get full semantics (required fields enforced, defaults
//! filled in); update payloads get partial semantics (a field is validated
//! and written only when present).

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::schema::{FieldDefault, FieldKind, FieldSpec, ResourceSchema, Rule, shouty};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// A typed value ready to be bound into an SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlVal {
    Text(String),
    Int(i64),
    Real(f64),
    Null,
}

impl FieldDefault {
    pub fn to_sql(self) -> SqlVal {
        match self {
            FieldDefault::Text(s) => SqlVal::Text(s.to_string()),
            FieldDefault::Int(i) => SqlVal::Int(i),
            FieldDefault::Bool(b) => SqlVal::Int(b as i64),
        }
    }
}

/// One column write.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub column: &'static str,
    pub value: SqlVal,
}

fn missing(field: &FieldSpec) -> AppError {
    if matches!(field.rule, Rule::ConsentTrue) {
        return AppError::validation("CONSENT_REQUIRED", "consent must be given");
    }
    AppError::validation(
        format!("MISSING_{}", shouty(field.name)),
        format!("{} is required", field.name),
    )
}

fn invalid(field: &FieldSpec, why: &str) -> AppError {
    AppError::validation(
        format!("INVALID_{}", shouty(field.name)),
        format!("{} {}", field.name, why),
    )
}

/// Builds the full assignment list for an insert. Required fields must be
/// present and non-empty; absent optional fields take their default or NULL.
pub fn build_insert(
    schema: &ResourceSchema,
    body: &Map<String, Value>,
) -> AppResult<Vec<Assignment>> {
    let mut out = Vec::with_capacity(schema.fields.len());
    for field in schema.fields {
        match body.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(missing(field));
                }
                let value = field.default.map(FieldDefault::to_sql).unwrap_or(SqlVal::Null);
                out.push(Assignment {
                    column: field.column,
                    value,
                });
            }
            Some(value) => {
                let value = coerce(field, value)?;
                out.push(Assignment {
                    column: field.column,
                    value,
                });
            }
        }
    }
    Ok(out)
}

/// Builds the assignment list for a partial update: only fields present in
/// the payload are validated and written. Explicit `null` clears an
/// optional field and is rejected for a required one.
pub fn build_update(
    schema: &ResourceSchema,
    body: &Map<String, Value>,
) -> AppResult<Vec<Assignment>> {
    let mut out = Vec::new();
    for field in schema.fields {
        let Some(value) = body.get(field.name) else {
            continue;
        };
        if value.is_null() {
            if field.required {
                return Err(missing(field));
            }
            out.push(Assignment {
                column: field.column,
                value: SqlVal::Null,
            });
            continue;
        }
        out.push(Assignment {
            column: field.column,
            value: coerce(field, value)?,
        });
    }
    Ok(out)
}

/// Checks a present, non-null value against the field's kind and rule.
fn coerce(field: &FieldSpec, value: &Value) -> AppResult<SqlVal> {
    match field.kind {
        FieldKind::Text => {
            let Some(s) = value.as_str() else {
                return Err(invalid(field, "must be a string"));
            };
            let trimmed = s.trim();
            if trimmed.is_empty() {
                // Empty after trimming counts as missing.
                if field.required {
                    return Err(missing(field));
                }
                return Ok(SqlVal::Null);
            }
            match field.rule {
                Rule::Email => {
                    if !EMAIL_RE.is_match(trimmed) {
                        return Err(invalid(field, "must be a valid email address"));
                    }
                }
                Rule::OneOf(allowed) => {
                    if !allowed.contains(&trimmed) {
                        return Err(invalid(
                            field,
                            &format!("must be one of: {}", allowed.join(", ")),
                        ));
                    }
                }
                _ => {}
            }
            Ok(SqlVal::Text(trimmed.to_string()))
        }
        FieldKind::Integer => {
            let n = match value.as_i64() {
                Some(n) => n,
                // Accept whole-number floats (JSON has one number type).
                None => match value.as_f64() {
                    Some(f) if f.fract() == 0.0 => f as i64,
                    _ => return Err(invalid(field, "must be an integer")),
                },
            };
            match field.rule {
                Rule::IntRange(min, max) => {
                    if n < min || n > max {
                        return Err(invalid(
                            field,
                            &format!("must be between {} and {}", min, max),
                        ));
                    }
                }
                Rule::Positive => {
                    if n <= 0 {
                        return Err(invalid(field, "must be a positive number"));
                    }
                }
                _ => {}
            }
            Ok(SqlVal::Int(n))
        }
        FieldKind::Real => {
            let Some(f) = value.as_f64() else {
                return Err(invalid(field, "must be a number"));
            };
            match field.rule {
                Rule::RealRange(min, max) => {
                    if f < min || f > max {
                        return Err(invalid(
                            field,
                            &format!("must be between {} and {}", min, max),
                        ));
                    }
                }
                Rule::Positive => {
                    if f <= 0.0 {
                        return Err(invalid(field, "must be a positive number"));
                    }
                }
                _ => {}
            }
            Ok(SqlVal::Real(f))
        }
        FieldKind::Boolean => {
            let Some(b) = value.as_bool() else {
                if matches!(field.rule, Rule::ConsentTrue) {
                    // Truthy values do not count as consent.
                    return Err(missing(field));
                }
                return Err(invalid(field, "must be a boolean"));
            };
            if matches!(field.rule, Rule::ConsentTrue) && !b {
                return Err(missing(field));
            }
            Ok(SqlVal::Int(b as i64))
        }
        FieldKind::StringArray => coerce_string_array(field, value),
    }
}

/// Accepts a JSON array of strings or a JSON-encoded string of one.
/// Non-string elements are silently dropped; anything else is rejected.
fn coerce_string_array(field: &FieldSpec, value: &Value) -> AppResult<SqlVal> {
    let items: Vec<Value> = match value {
        Value::Array(items) => items.clone(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items,
            _ => return Err(invalid(field, "must be a JSON array of strings")),
        },
        _ => return Err(invalid(field, "must be a JSON array of strings")),
    };
    let strings: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
    let serialized = serde_json::to_string(&strings)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
    Ok(SqlVal::Text(serialized))
}
