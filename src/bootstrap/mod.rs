//! Application startup wiring.

pub mod app_bootstrap;
pub mod route_registry;
