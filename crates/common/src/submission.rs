//! Order submission model and validation
//!
//! A submission is the raw JSON body posted by the landing page. Only the
//! four required fields are checked; everything else is free-form text that
//! defaults at read time.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ledger::{DEFAULT_QUANTITY_TEXT, DEFAULT_TOTAL_TEXT};

/// One order submission from the landing page form.
///
/// Missing JSON fields deserialize to empty strings (or `None`) so that an
/// incomplete body is rejected by [`Submission::validate`] with a 400 rather
/// than failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub governorate: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
}

impl Submission {
    /// Check that all required fields are present and non-empty.
    ///
    /// Empty strings count as missing. Values are deliberately not trimmed:
    /// whitespace-only input is accepted, matching what the landing page has
    /// always been allowed to send.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();

        if self.name.is_empty() {
            missing.push("name");
        }
        if self.phone.is_empty() {
            missing.push("phone");
        }
        if self.governorate.is_empty() {
            missing.push("governorate");
        }
        if self.address.is_empty() {
            missing.push("address");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingFields(missing))
        }
    }

    /// WhatsApp number, falling back to the phone number.
    pub fn whatsapp_or_phone(&self) -> &str {
        match &self.whatsapp {
            Some(w) if !w.is_empty() => w,
            _ => &self.phone,
        }
    }

    /// Free-form quantity text, defaulting to "one piece".
    pub fn quantity_text(&self) -> &str {
        match &self.quantity {
            Some(q) if !q.is_empty() => q,
            _ => DEFAULT_QUANTITY_TEXT,
        }
    }

    /// Free-form total text, defaulting to the list price.
    pub fn total_text(&self) -> &str {
        match &self.total {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_TOTAL_TEXT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Submission {
        serde_json::from_value(serde_json::json!({
            "name": "أحمد محمد",
            "phone": "01012345678",
            "governorate": "القاهرة",
            "address": "شارع التحرير 12"
        }))
        .unwrap()
    }

    #[test]
    fn test_complete_submission_is_valid() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_reported_by_name() {
        let submission: Submission = serde_json::from_value(serde_json::json!({
            "name": "أحمد",
            "address": "شارع التحرير"
        }))
        .unwrap();

        let err = submission.validate().unwrap_err();
        assert_eq!(err.missing_fields(), Some(&["phone", "governorate"][..]));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let submission: Submission = serde_json::from_value(serde_json::json!({
            "name": "",
            "phone": "01012345678",
            "governorate": "الجيزة",
            "address": "الهرم"
        }))
        .unwrap();

        let err = submission.validate().unwrap_err();
        assert_eq!(err.missing_fields(), Some(&["name"][..]));
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        let submission: Submission = serde_json::from_value(serde_json::json!({
            "name": "  ",
            "phone": "01012345678",
            "governorate": "الجيزة",
            "address": "الهرم"
        }))
        .unwrap();

        // Whitespace-only passes validation; empty-only is rejected.
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn test_whatsapp_defaults_to_phone() {
        let submission = complete();
        assert_eq!(submission.whatsapp_or_phone(), "01012345678");

        let with_whatsapp: Submission = serde_json::from_value(serde_json::json!({
            "name": "أحمد",
            "phone": "01012345678",
            "whatsapp": "01098765432",
            "governorate": "القاهرة",
            "address": "وسط البلد"
        }))
        .unwrap();
        assert_eq!(with_whatsapp.whatsapp_or_phone(), "01098765432");
    }

    #[test]
    fn test_quantity_and_total_defaults() {
        let submission = complete();
        assert_eq!(submission.quantity_text(), DEFAULT_QUANTITY_TEXT);
        assert_eq!(submission.total_text(), DEFAULT_TOTAL_TEXT);
    }
}
