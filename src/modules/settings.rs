//! Key-value site configuration. Keys are globally unique; the unique index
//! reports duplicates as 409 DUPLICATE_KEY.

use crate::schema::{
    field, filter, ConflictPolicy, FieldDefault, FieldKind, FieldSpec, FilterSpec,
    ResourceSchema, Rule,
};

pub const CATEGORIES: &[&str] = &["contact", "office", "social", "general"];

static FIELDS: &[FieldSpec] = &[
    field("key", "key", FieldKind::Text).required(),
    field("value", "value", FieldKind::Text).required(),
    field("category", "category", FieldKind::Text)
        .rule(Rule::OneOf(CATEGORIES))
        .default_to(FieldDefault::Text("general")),
    field("description", "description", FieldKind::Text),
];

static FILTERS: &[FilterSpec] = &[
    filter("key", "key", FieldKind::Text),
    filter("category", "category", FieldKind::Text).one_of(CATEGORIES),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    name: "Setting",
    path: "settings",
    table: "settings",
    fields: FIELDS,
    search_columns: &["key", "description"],
    filters: FILTERS,
    sortable: &["key", "category"],
    on_conflict: ConflictPolicy::Duplicate {
        code: "DUPLICATE_KEY",
        message: "a setting with this key already exists",
    },
    prepare_create: None,
    prepare_update: None,
};
