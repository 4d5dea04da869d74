//! Orders API
//!
//! Lead-capture endpoint for the product landing page. One handler accepts
//! an order submission, appends it as a row to the spreadsheet ledger, then
//! fans the conversion out to the configured attribution providers.
//!
//! ## Endpoints
//!
//! - `POST /api/orders` - Submit an order
//! - `GET /api/orders` - Health check
//! - `OPTIONS *` - CORS preflight, always 200
//!
//! Per request: validate → ledger append (hard prerequisite) → conversion
//! fan-out (best-effort, settle-all) → respond. The client only learns
//! whether the ledger write succeeded.

pub mod config;
pub mod conversions;
pub mod handlers;
pub mod sheets;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use conversions::ConversionReporter;
use sheets::SheetsClient;

/// Application state shared across handlers
pub struct AppState {
    /// Ledger client; `None` when the service-account credentials are not
    /// configured, in which case submissions get a configuration error.
    pub sheets: Option<SheetsClient>,

    /// Conversion fan-out to the attribution providers
    pub reporter: ConversionReporter,
}

impl AppState {
    /// Create new application state
    pub fn new(sheets: Option<SheetsClient>, reporter: ConversionReporter) -> Self {
        Self { sheets, reporter }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/orders",
            get(handlers::health_handler)
                .post(handlers::create_order_handler)
                .options(handlers::preflight_handler)
                .fallback(handlers::method_not_allowed_handler),
        )
        // OPTIONS on any other path still answers 200
        .fallback(handlers::fallback_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
