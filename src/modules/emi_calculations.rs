//! Append-only log of EMI calculator usage. Figures are caller-supplied and
//! range-checked, never recomputed; the client IP is captured for audit.

use actix_web::HttpRequest;
use serde_json::{Map, Value};

use crate::comm::net::client_ip;
use crate::error::AppResult;
use crate::schema::{
    field, ConflictPolicy, FieldKind, FieldSpec, FilterSpec, ResourceSchema, Rule,
};

static FIELDS: &[FieldSpec] = &[
    field("amount", "amount", FieldKind::Real)
        .required()
        .rule(Rule::Positive),
    field("tenureMonths", "tenure_months", FieldKind::Integer)
        .required()
        .rule(Rule::IntRange(1, 480)),
    field("interestRate", "interest_rate", FieldKind::Real)
        .required()
        .rule(Rule::RealRange(0.1, 50.0)),
    field("emiAmount", "emi_amount", FieldKind::Real)
        .required()
        .rule(Rule::Positive),
    field("totalInterest", "total_interest", FieldKind::Real).required(),
    field("totalAmount", "total_amount", FieldKind::Real)
        .required()
        .rule(Rule::Positive),
    field("userIp", "user_ip", FieldKind::Text),
];

static FILTERS: &[FilterSpec] = &[];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    name: "EMI calculation",
    path: "emi-calculations",
    table: "emi_calculations",
    fields: FIELDS,
    search_columns: &[],
    filters: FILTERS,
    sortable: &["amount"],
    on_conflict: ConflictPolicy::Fail,
    prepare_create: Some(prepare_create),
    prepare_update: None,
};

fn prepare_create(req: &HttpRequest, body: &mut Map<String, Value>) -> AppResult<()> {
    body.insert("userIp".into(), Value::String(client_ip(req)));
    Ok(())
}
