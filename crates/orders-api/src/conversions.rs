//! Conversion reporting to attribution providers
//!
//! After an order lands in the ledger, the event is fanned out to TikTok and
//! Meta. Each provider is optional, the two calls run concurrently, and both
//! are best-effort: a failed or missing provider never affects the client
//! response. Phone numbers leave this process only as SHA-256 digests.

use leads_common::{hashing, money, Submission};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;

const DEFAULT_TIKTOK_URL: &str = "https://business-api.tiktok.com/open_api/v1.3/event/track/";
const DEFAULT_FACEBOOK_BASE_URL: &str = "https://graph.facebook.com/v18.0";

/// Fixed product identity reported with every conversion
pub const CONTENT_NAME: &str = "Hope K19";
pub const CONTENT_ID: &str = "hope-k19";
pub const CONTENT_CATEGORY: &str = "Mobile Phone";
pub const CURRENCY: &str = "EGP";

/// One conversion, shaped for the provider payloads.
///
/// Holds only the hashed phone; the raw number is dropped at construction.
#[derive(Debug, Clone)]
pub struct ConversionEvent {
    pub hashed_phone: String,
    pub value: f64,
    pub quantity: u32,
    /// Event time in unix seconds
    pub event_time: i64,
    /// Millisecond token for provider-side deduplication
    pub event_millis: i64,
}

impl ConversionEvent {
    pub fn from_submission(submission: &Submission) -> Self {
        let now = chrono::Utc::now();
        Self {
            hashed_phone: hashing::sha256_hex(&submission.phone),
            value: money::parse_order_value(submission.total.as_deref()),
            quantity: parse_quantity(submission.quantity.as_deref()),
            event_time: now.timestamp(),
            event_millis: now.timestamp_millis(),
        }
    }
}

/// Leading integer of the free-form quantity text, defaulting to one.
fn parse_quantity(text: Option<&str>) -> u32 {
    text.map(str::trim)
        .and_then(|t| {
            let digits: String = t.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
        .unwrap_or(1)
}

/// Outcome of one provider dispatch, for the settlement report.
#[derive(Debug)]
pub enum ProviderOutcome {
    /// Provider credentials absent; nothing sent
    Skipped,
    /// Provider accepted the event
    Delivered,
    /// Network error or non-2xx response
    Failed(String),
}

/// Fan-out of conversion events to the configured providers
pub struct ConversionReporter {
    tiktok: Option<ProviderConfig>,
    facebook: Option<ProviderConfig>,
    tiktok_url: String,
    facebook_base_url: String,
    client: reqwest::Client,
}

impl ConversionReporter {
    /// Create a reporter against the real provider endpoints
    pub fn new(tiktok: Option<ProviderConfig>, facebook: Option<ProviderConfig>) -> Self {
        Self::with_endpoints(
            tiktok,
            facebook,
            DEFAULT_TIKTOK_URL.to_string(),
            DEFAULT_FACEBOOK_BASE_URL.to_string(),
        )
    }

    /// Endpoints are injectable so tests can target a local server
    pub fn with_endpoints(
        tiktok: Option<ProviderConfig>,
        facebook: Option<ProviderConfig>,
        tiktok_url: String,
        facebook_base_url: String,
    ) -> Self {
        Self {
            tiktok,
            facebook,
            tiktok_url,
            facebook_base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Dispatch the event to both providers concurrently and wait for both
    /// to settle. Outcomes are logged per provider and returned for
    /// inspection; no failure propagates.
    pub async fn report_all(&self, event: &ConversionEvent) -> [(&'static str, ProviderOutcome); 2] {
        let (tiktok, facebook) = tokio::join!(self.send_tiktok(event), self.send_facebook(event));

        let outcomes = [("tiktok", tiktok), ("facebook", facebook)];
        for (provider, outcome) in &outcomes {
            match outcome {
                ProviderOutcome::Skipped => {
                    debug!("{} credentials not configured, skipping event", provider)
                }
                ProviderOutcome::Delivered => info!("{} conversion event delivered", provider),
                ProviderOutcome::Failed(e) => warn!("{} conversion event failed: {}", provider, e),
            }
        }

        outcomes
    }

    async fn send_tiktok(&self, event: &ConversionEvent) -> ProviderOutcome {
        let Some(creds) = &self.tiktok else {
            return ProviderOutcome::Skipped;
        };

        let payload = tiktok_payload(&creds.pixel_id, event);
        let result = self
            .client
            .post(&self.tiktok_url)
            .header("Access-Token", &creds.access_token)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => ProviderOutcome::Delivered,
            Ok(response) => ProviderOutcome::Failed(format!("status {}", response.status())),
            Err(e) => ProviderOutcome::Failed(e.to_string()),
        }
    }

    async fn send_facebook(&self, event: &ConversionEvent) -> ProviderOutcome {
        let Some(creds) = &self.facebook else {
            return ProviderOutcome::Skipped;
        };

        let url = format!(
            "{}/{}/events?access_token={}",
            self.facebook_base_url, creds.pixel_id, creds.access_token
        );
        let payload = facebook_payload(event);
        let result = self.client.post(&url).json(&payload).send().await;

        match result {
            Ok(response) if response.status().is_success() => ProviderOutcome::Delivered,
            Ok(response) => ProviderOutcome::Failed(format!("status {}", response.status())),
            Err(e) => ProviderOutcome::Failed(e.to_string()),
        }
    }
}

/// TikTok Events API payload ("Lead" event)
pub fn tiktok_payload(pixel_id: &str, event: &ConversionEvent) -> Value {
    json!({
        "event_source": "web",
        "event_source_id": pixel_id,
        "data": [{
            "event": "Lead",
            "event_id": format!("lead_{}", event.event_millis),
            "event_time": event.event_time,
            "user": {
                "phone": event.hashed_phone,
            },
            "properties": {
                "content_type": "product",
                "content_name": CONTENT_NAME,
                "content_id": CONTENT_ID,
                "content_category": CONTENT_CATEGORY,
                "currency": CURRENCY,
                "value": event.value,
                "num_items": event.quantity,
            },
        }],
    })
}

/// Meta Conversions API payload ("Purchase" event)
pub fn facebook_payload(event: &ConversionEvent) -> Value {
    json!({
        "data": [{
            "event_name": "Purchase",
            "event_time": event.event_time,
            "event_id": format!("order_{}", event.event_millis),
            "action_source": "website",
            "user_data": {
                "ph": [event.hashed_phone],
                "country": [hashing::sha256_hex("eg")],
            },
            "custom_data": {
                "currency": CURRENCY,
                "value": event.value,
                "content_name": CONTENT_NAME,
                "content_type": "product",
                "contents": [{
                    "id": CONTENT_ID,
                    "quantity": event.quantity,
                }],
            },
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event() -> ConversionEvent {
        ConversionEvent {
            hashed_phone: hashing::sha256_hex("01012345678"),
            value: 1999.0,
            quantity: 2,
            event_time: 1_756_100_000,
            event_millis: 1_756_100_000_123,
        }
    }

    #[test]
    fn test_parse_quantity_leading_integer() {
        assert_eq!(parse_quantity(Some("2 قطعة")), 2);
        assert_eq!(parse_quantity(Some("3")), 3);
        assert_eq!(parse_quantity(Some("قطعة واحدة")), 1);
        assert_eq!(parse_quantity(None), 1);
    }

    #[test]
    fn test_event_never_holds_raw_phone() {
        let submission: Submission = serde_json::from_value(serde_json::json!({
            "name": "أحمد",
            "phone": "01012345678",
            "governorate": "القاهرة",
            "address": "التحرير",
            "total": "1,999 ج.م"
        }))
        .unwrap();

        let event = ConversionEvent::from_submission(&submission);
        assert_eq!(
            event.hashed_phone,
            "e60124f2fe2045215abda1ae912aa80bb66dab5fc231a758387682c9c0e70c01"
        );
        assert_eq!(event.value, 1999.0);
        assert_eq!(event.quantity, 1);
    }

    #[test]
    fn test_tiktok_payload_shape() {
        let payload = tiktok_payload("pixel-1", &test_event());

        assert_eq!(payload["event_source"], "web");
        assert_eq!(payload["event_source_id"], "pixel-1");

        let data = &payload["data"][0];
        assert_eq!(data["event"], "Lead");
        assert_eq!(data["event_id"], "lead_1756100000123");
        assert_eq!(data["user"]["phone"], test_event().hashed_phone);
        assert_eq!(data["properties"]["currency"], "EGP");
        assert_eq!(data["properties"]["value"], 1999.0);
        assert_eq!(data["properties"]["num_items"], 2);

        // The raw phone number must not appear anywhere in the payload.
        assert!(!payload.to_string().contains("01012345678"));
    }

    #[test]
    fn test_facebook_payload_shape() {
        let payload = facebook_payload(&test_event());

        let data = &payload["data"][0];
        assert_eq!(data["event_name"], "Purchase");
        assert_eq!(data["event_id"], "order_1756100000123");
        assert_eq!(data["action_source"], "website");
        assert_eq!(data["user_data"]["ph"][0], test_event().hashed_phone);
        assert_eq!(
            data["user_data"]["country"][0],
            "d8c59e8348e0c03f9d2105eed9791438f9aea9586381b79deadbc857eef89d78"
        );
        assert_eq!(data["custom_data"]["contents"][0]["id"], CONTENT_ID);
        assert_eq!(data["custom_data"]["contents"][0]["quantity"], 2);

        assert!(!payload.to_string().contains("01012345678"));
    }

    #[tokio::test]
    async fn test_unconfigured_providers_are_skipped() {
        let reporter = ConversionReporter::new(None, None);
        let outcomes = reporter.report_all(&test_event()).await;

        assert!(matches!(outcomes[0].1, ProviderOutcome::Skipped));
        assert!(matches!(outcomes[1].1, ProviderOutcome::Skipped));
    }

    #[tokio::test]
    async fn test_unreachable_provider_reports_failure() {
        let tiktok = ProviderConfig {
            pixel_id: "pixel-1".to_string(),
            access_token: "token".to_string(),
        };
        // Port 1 refuses connections; the outcome is captured, not raised.
        let reporter = ConversionReporter::with_endpoints(
            Some(tiktok),
            None,
            "http://127.0.0.1:1/track".to_string(),
            "http://127.0.0.1:1".to_string(),
        );

        let outcomes = reporter.report_all(&test_event()).await;
        assert!(matches!(outcomes[0].1, ProviderOutcome::Failed(_)));
        assert!(matches!(outcomes[1].1, ProviderOutcome::Skipped));
    }
}
