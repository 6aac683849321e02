//! Business resources, one module per entity. Each declares a static
//! [`ResourceSchema`](crate::schema::ResourceSchema) consumed by the
//! generic CRUD handlers.

pub mod blog_posts;
pub mod emi_calculations;
pub mod loan_applications;
pub mod loan_docs;
pub mod messages;
pub mod settings;
pub mod testimonials;

use crate::schema::ResourceSchema;

/// Loan product types shared by applications and document catalogs.
pub const LOAN_TYPES: &[&str] = &["home", "business", "education", "personal"];

/// Every registered resource.
pub fn all() -> [&'static ResourceSchema; 7] {
    [
        &blog_posts::SCHEMA,
        &emi_calculations::SCHEMA,
        &loan_applications::SCHEMA,
        &loan_docs::SCHEMA,
        &messages::SCHEMA,
        &settings::SCHEMA,
        &testimonials::SCHEMA,
    ]
}
