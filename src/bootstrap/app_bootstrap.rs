//! Application bootstrap: telemetry, database pool, HTTP server.

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

use crate::comm::config::Settings;
use crate::db::{self, AppState};
use crate::error::{AppError, AppResult};
use crate::middleware::request_log::RequestLog;
use crate::bootstrap::route_registry::configure_global_routes;

/// Server builder. Settings come from [`Settings::load`] unless overridden.
pub struct AppBootstrap {
    settings: Option<Settings>,
}

impl AppBootstrap {
    pub fn new() -> Self {
        Self { settings: None }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Initializes telemetry and the connection pool, then runs the HTTP
    /// server until shutdown. The pool is closed after the server exits.
    pub async fn run(self) -> AppResult<()> {
        let settings = match self.settings {
            Some(s) => s,
            None => Settings::load()?,
        };

        init_telemetry(&settings.logging.level);
        info!("starting finlead: {}", settings.summary());

        let pool = db::init_pool(
            &settings.database.url,
            settings.database.max_connections,
        )
        .await?;
        db::migrate(&pool).await?;
        info!("database ready at {}", settings.database.url);

        let state = web::Data::new(AppState { db: pool.clone() });

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(RequestLog)
                .app_data(state.clone())
                .configure(configure_global_routes)
        });
        if let Some(workers) = settings.server.workers {
            server = server.workers(workers);
        }

        server
            .bind((settings.server.host.as_str(), settings.server.port))
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?
            .run()
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

        pool.close().await;
        info!("database pool closed, shutting down");
        Ok(())
    }
}

impl Default for AppBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

/// Bunyan-formatted JSON logs; `RUST_LOG` wins over the configured level.
fn init_telemetry(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let formatting_layer = BunyanFormattingLayer::new("finlead".into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    // Repeated calls (tests) keep the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
