use axum::{routing::get, Router};
use chrono_tz::Tz;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::{Config, PrintSettings};
use crate::error::DtrResult;
use crate::store::RecordStore;

pub mod handlers;
pub mod render;

use handlers::{
    employees_handler, health_handler, index_handler, print_handler, sheet_handler,
};

/// Shared state of the web server
#[derive(Clone)]
pub struct AppState {
    /// Attendance database
    pub store: Arc<dyn RecordStore>,
    /// Collection listing the employees
    pub names_path: String,
    /// Root of the monthly logs
    pub logs_path: String,
    /// Zone used to pick the default month
    pub timezone: Tz,
    /// Printed sheet letterhead
    pub print: Arc<PrintSettings>,
}

impl AppState {
    /// Build the state from configuration and a store
    pub fn new(config: &Config, store: Arc<dyn RecordStore>) -> DtrResult<Self> {
        Ok(Self {
            store,
            names_path: config.names_path.clone(),
            logs_path: config.logs_path.clone(),
            timezone: config.tz()?,
            print: Arc::new(config.print.clone()),
        })
    }
}

/// Build the router with all routes and middleware
pub fn router(state: AppState, assets_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/print", get(print_handler))
        .route("/health", get(health_handler))
        .route("/api/employees", get(employees_handler))
        .route("/api/dtr/{name}", get(sheet_handler))
        // Serve static files
        .nest_service("/assets", ServeDir::new(assets_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
