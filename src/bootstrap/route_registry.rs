//! Route registration: every resource schema becomes one `/api/<path>`
//! endpoint wired to the generic CRUD handlers.

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api::crud;
use crate::modules;

/// Liveness probe.
#[actix_web::get("/api/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "finlead",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Configures all application routes.
pub fn configure_global_routes(cfg: &mut web::ServiceConfig) {
    for schema in modules::all() {
        cfg.service(
            web::resource(format!("/api/{}", schema.path))
                .app_data(web::Data::new(schema))
                .route(web::get().to(crud::list))
                .route(web::post().to(crud::create))
                .route(web::put().to(crud::update))
                .route(web::delete().to(crud::remove)),
        );
    }
    cfg.service(health);
}
