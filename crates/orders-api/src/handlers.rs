//! HTTP handlers for the orders endpoint

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use leads_common::{ledger, time, Submission};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::conversions::ConversionEvent;
use crate::AppState;

/// Client-facing messages, localized for the landing page
pub const MSG_FIELDS_REQUIRED: &str = "جميع الحقول مطلوبة";
pub const MSG_SERVER_CONFIG: &str = "خطأ في إعدادات الخادم";
pub const MSG_SAVE_FAILED: &str = "حدث خطأ في حفظ الطلب";
pub const MSG_ORDER_RECEIVED: &str = "تم استلام الطلب بنجاح";
pub const MSG_SERVER_HEALTHY: &str = "الخادم يعمل بشكل طبيعي";

/// Response for the health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// Response for order submissions, success or failure
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub message: &'static str,

    #[serde(rename = "orderDate", skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,

    /// Diagnostic text for ledger write failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrderResponse {
    fn accepted(order_date: String) -> Self {
        Self {
            success: true,
            message: MSG_ORDER_RECEIVED,
            order_date: Some(order_date),
            error: None,
        }
    }

    fn rejected(message: &'static str) -> Self {
        Self {
            success: false,
            message,
            order_date: None,
            error: None,
        }
    }

    fn failed(message: &'static str, error: String) -> Self {
        Self {
            success: false,
            message,
            order_date: None,
            error: Some(error),
        }
    }
}

fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    ]
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK",
        message: MSG_SERVER_HEALTHY,
        timestamp: time::cairo_now(),
    })
}

/// Preflight: always 200 with an empty body, regardless of configuration
pub async fn preflight_handler() -> impl IntoResponse {
    (StatusCode::OK, cors_headers())
}

/// OPTIONS succeeds on any path; anything else unmatched is a 404
pub async fn fallback_handler(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight_handler().await.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// 405 for unsupported methods on the orders route
pub async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({
            "success": false,
            "message": "Method not allowed",
        })),
    )
}

/// Accept an order: validate, append to the ledger, then fan the conversion
/// out to the attribution providers.
///
/// The client only learns whether the ledger write succeeded; attribution is
/// best-effort and settles after the write.
pub async fn create_order_handler(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<Submission>,
) -> Response {
    if let Err(e) = submission.validate() {
        warn!("Rejected submission: {}", e);
        return (
            StatusCode::BAD_REQUEST,
            Json(OrderResponse::rejected(MSG_FIELDS_REQUIRED)),
        )
            .into_response();
    }

    // Configuration errors are detected before any network call.
    let Some(sheets) = state.sheets.as_ref() else {
        error!("Google Sheets credentials are not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(OrderResponse::rejected(MSG_SERVER_CONFIG)),
        )
            .into_response();
    };

    let order_date = time::cairo_now();
    let row = ledger::build_row(&submission, &order_date);

    if let Err(e) = sheets.append_row(&row).await {
        error!("Ledger append failed: {:#}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(OrderResponse::failed(MSG_SAVE_FAILED, format!("{:#}", e))),
        )
            .into_response();
    }

    info!(
        name = %submission.name,
        phone = %submission.phone,
        order_date = %order_date,
        "Order recorded"
    );

    let event = ConversionEvent::from_submission(&submission);
    state.reporter.report_all(&event).await;

    (StatusCode::OK, Json(OrderResponse::accepted(order_date))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let response = OrderResponse::accepted("25/08/2026 14:30:00".to_string());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["orderDate"], "25/08/2026 14:30:00");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_rejection_omits_order_date() {
        let response = OrderResponse::rejected(MSG_FIELDS_REQUIRED);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert!(json.get("orderDate").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_carries_diagnostic() {
        let response = OrderResponse::failed(MSG_SAVE_FAILED, "Token exchange failed".to_string());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Token exchange failed");
    }
}
