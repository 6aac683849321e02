//! Per-loan-type document checklists (reference data).

use crate::schema::{
    field, filter, ConflictPolicy, FieldDefault, FieldKind, FieldSpec, FilterSpec,
    ResourceSchema, Rule,
};

use super::LOAN_TYPES;

static FIELDS: &[FieldSpec] = &[
    field("loanType", "loan_type", FieldKind::Text)
        .required()
        .rule(Rule::OneOf(LOAN_TYPES)),
    field("documentName", "document_name", FieldKind::Text).required(),
    field("description", "description", FieldKind::Text),
    field("iconName", "icon_name", FieldKind::Text),
    field("displayOrder", "display_order", FieldKind::Integer).default_to(FieldDefault::Int(0)),
    field("isMandatory", "is_mandatory", FieldKind::Boolean).default_to(FieldDefault::Bool(true)),
];

static FILTERS: &[FilterSpec] = &[
    filter("loanType", "loan_type", FieldKind::Text).one_of(LOAN_TYPES),
    filter("isMandatory", "is_mandatory", FieldKind::Boolean),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    name: "Loan document",
    path: "loan-docs",
    table: "loan_docs",
    fields: FIELDS,
    search_columns: &["document_name", "description"],
    filters: FILTERS,
    sortable: &["displayOrder"],
    on_conflict: ConflictPolicy::Fail,
    prepare_create: None,
    prepare_update: None,
};
