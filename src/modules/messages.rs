//! Inbound contact-form messages.

use crate::schema::{
    field, filter, ConflictPolicy, FieldDefault, FieldKind, FieldSpec, FilterSpec,
    ResourceSchema, Rule,
};

static FIELDS: &[FieldSpec] = &[
    field("name", "name", FieldKind::Text).required(),
    field("email", "email", FieldKind::Text).required().rule(Rule::Email),
    field("phone", "phone", FieldKind::Text),
    field("subject", "subject", FieldKind::Text),
    field("message", "message", FieldKind::Text).required(),
    field("isRead", "is_read", FieldKind::Boolean).default_to(FieldDefault::Bool(false)),
];

static FILTERS: &[FilterSpec] = &[filter("isRead", "is_read", FieldKind::Boolean)];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    name: "Message",
    path: "messages",
    table: "messages",
    fields: FIELDS,
    search_columns: &["name", "email", "subject"],
    filters: FILTERS,
    sortable: &[],
    on_conflict: ConflictPolicy::Fail,
    prepare_create: None,
    prepare_update: None,
};
