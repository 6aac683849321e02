pub mod api;
pub mod bootstrap;
pub mod comm;
pub mod db;
pub mod emi;
pub mod error;
pub mod middleware;
pub mod modules;
pub mod query;
pub mod schema;
pub mod slug;
pub mod validate;

pub use bootstrap::app_bootstrap::AppBootstrap;
pub use error::{AppError, AppResult};
