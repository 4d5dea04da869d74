//! Canonical ledger row schema
//!
//! The ledger is a shared spreadsheet; each accepted order becomes one
//! appended row. The column layout is fixed at 12 columns:
//!
//! | Col | Content                              |
//! |-----|--------------------------------------|
//! | A   | order date (Cairo time)              |
//! | B   | customer name                        |
//! | C   | phone                                |
//! | D   | whatsapp (defaults to phone)         |
//! | E   | governorate                          |
//! | F   | spacer                               |
//! | G   | address                              |
//! | H   | order details ("{quantity} - {total}") |
//! | I   | spacer                               |
//! | J   | spacer                               |
//! | K   | product label                        |
//! | L   | status ("جديد")                      |

use crate::submission::Submission;

/// Product label written to the ledger for every order.
pub const PRODUCT_LABEL: &str = "موبايل المهام الخاصة K19";

/// Status a freshly appended order starts in.
pub const STATUS_NEW: &str = "جديد";

/// Quantity text used when the form sends none ("one piece").
pub const DEFAULT_QUANTITY_TEXT: &str = "قطعة واحدة";

/// Total text used when the form sends none (the list price).
pub const DEFAULT_TOTAL_TEXT: &str = "1,999 ج.م";

/// Number of columns in the canonical row.
pub const COLUMN_COUNT: usize = 12;

/// Build the ledger row for a validated submission.
pub fn build_row(submission: &Submission, order_date: &str) -> Vec<String> {
    let order_details = format!(
        "{} - {}",
        submission.quantity_text(),
        submission.total_text()
    );

    vec![
        order_date.to_string(),
        submission.name.clone(),
        submission.phone.clone(),
        submission.whatsapp_or_phone().to_string(),
        submission.governorate.clone(),
        String::new(),
        submission.address.clone(),
        order_details,
        String::new(),
        String::new(),
        PRODUCT_LABEL.to_string(),
        STATUS_NEW.to_string(),
    ]
}
