//! Loan applications: public lead submissions, status driven by operators.

use crate::schema::{
    field, filter, ConflictPolicy, FieldDefault, FieldKind, FieldSpec, FilterSpec,
    ResourceSchema, Rule,
};

use super::LOAN_TYPES;

pub const STATUSES: &[&str] = &["pending", "approved", "rejected"];

static FIELDS: &[FieldSpec] = &[
    field("name", "name", FieldKind::Text).required(),
    field("phone", "phone", FieldKind::Text).required(),
    field("email", "email", FieldKind::Text).required().rule(Rule::Email),
    field("city", "city", FieldKind::Text).required(),
    field("loanType", "loan_type", FieldKind::Text)
        .required()
        .rule(Rule::OneOf(LOAN_TYPES)),
    field("amount", "amount", FieldKind::Real)
        .required()
        .rule(Rule::Positive),
    field("monthlyIncome", "monthly_income", FieldKind::Real)
        .required()
        .rule(Rule::Positive),
    field("consent", "consent", FieldKind::Boolean)
        .required()
        .rule(Rule::ConsentTrue),
    field("status", "status", FieldKind::Text)
        .rule(Rule::OneOf(STATUSES))
        .default_to(FieldDefault::Text("pending")),
];

static FILTERS: &[FilterSpec] = &[
    filter("status", "status", FieldKind::Text).one_of(STATUSES),
    filter("loanType", "loan_type", FieldKind::Text).one_of(LOAN_TYPES),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    name: "Loan application",
    path: "loan-applications",
    table: "loan_applications",
    fields: FIELDS,
    search_columns: &["name", "email", "city"],
    filters: FILTERS,
    sortable: &["amount"],
    on_conflict: ConflictPolicy::Fail,
    prepare_create: None,
    prepare_update: None,
};
