//! Customer testimonials, curated by admins.

use crate::schema::{
    field, filter, ConflictPolicy, FieldDefault, FieldKind, FieldSpec, FilterSpec,
    ResourceSchema, Rule,
};

static FIELDS: &[FieldSpec] = &[
    field("name", "name", FieldKind::Text).required(),
    field("designation", "designation", FieldKind::Text),
    field("company", "company", FieldKind::Text),
    field("review", "review", FieldKind::Text).required(),
    field("rating", "rating", FieldKind::Integer)
        .required()
        .rule(Rule::IntRange(1, 5)),
    field("imageUrl", "image_url", FieldKind::Text),
    field("isFeatured", "is_featured", FieldKind::Boolean).default_to(FieldDefault::Bool(false)),
];

static FILTERS: &[FilterSpec] = &[
    filter("rating", "rating", FieldKind::Integer),
    filter("isFeatured", "is_featured", FieldKind::Boolean),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    name: "Testimonial",
    path: "testimonials",
    table: "testimonials",
    fields: FIELDS,
    search_columns: &["name", "review", "company"],
    filters: FILTERS,
    sortable: &["rating"],
    on_conflict: ConflictPolicy::Fail,
    prepare_create: None,
    prepare_update: None,
};
