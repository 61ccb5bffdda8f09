use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A recorded buying event subject to the feedback → publication → refund
/// workflow. Never physically deleted in the normal flow; a refund flips
/// the `refunded` flag instead.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Purchase {
    pub id: String,
    pub tester_uuid: String,
    pub date: NaiveDate,
    /// Merchant order number.
    pub order: String,
    pub description: String,
    /// Amount in minor currency units.
    pub amount_cents: i64,
    /// Opaque reference to the receipt image blob.
    pub screenshot: String,
    pub screenshot_summary: Option<String>,
    pub refunded: bool,
    pub created_at: NaiveDateTime,
}

impl Purchase {
    pub fn new(
        tester_uuid: String,
        date: NaiveDate,
        order: String,
        description: String,
        amount_cents: i64,
        screenshot: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tester_uuid,
            date,
            order,
            description,
            amount_cents,
            screenshot,
            screenshot_summary: None,
            refunded: false,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Review text a tester submitted for a purchase. At most one per purchase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: String,
    pub purchase_id: String,
    pub date: NaiveDate,
    pub feedback: String,
    pub created_at: NaiveDateTime,
}

impl Feedback {
    pub fn new(purchase_id: String, date: NaiveDate, feedback: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            purchase_id,
            date,
            feedback,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Proof that a feedback was published. Created after the feedback exists;
/// precondition for refund eligibility.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Publication {
    pub id: String,
    pub purchase_id: String,
    pub date: NaiveDate,
    pub screenshot: String,
    pub created_at: NaiveDateTime,
}

impl Publication {
    pub fn new(purchase_id: String, date: NaiveDate, screenshot: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            purchase_id,
            date,
            screenshot,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// A recorded refund. Its existence implies the purchase's `refunded` flag
/// is set by the write path.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Refund {
    pub id: String,
    pub purchase_id: String,
    /// Date the refund was recorded.
    pub date: NaiveDate,
    /// Value date of the refund itself.
    pub refund_date: NaiveDate,
    pub amount_cents: i64,
    pub transaction_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Refund {
    pub fn new(
        purchase_id: String,
        date: NaiveDate,
        refund_date: NaiveDate,
        amount_cents: i64,
        transaction_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            purchase_id,
            date,
            refund_date,
            amount_cents,
            transaction_id,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
