use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response envelope shared with the HTTP layer: `success` plus either the
/// operation's data or an error message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Purchase fields the status aggregator accepts as sort keys. Anything
/// else degrades to [`SortKey::Date`] rather than failing the read path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Id,
    #[default]
    Date,
    Order,
    Description,
    Amount,
}

impl SortKey {
    pub fn parse(key: &str) -> Self {
        match key {
            "id" => Self::Id,
            "date" => Self::Date,
            "order" => Self::Order,
            "description" => Self::Description,
            "amount" => Self::Amount,
            _ => Self::Date,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Date => "date",
            Self::Order => "order",
            Self::Description => "description",
            Self::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(order: &str) -> Self {
        match order {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => Self::Desc,
        }
    }
}

/// Pagination parameters. A fresh value is constructed per call; values
/// below 1 are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.max(1),
        }
    }
}

/// Pagination metadata reported alongside every result page, computed
/// against the pre-pagination row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    pub total_count: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub next_page: Option<u32>,
    pub previous_page: Option<u32>,
}

impl PageInfo {
    pub fn new(total_count: usize, request: PageRequest) -> Self {
        let PageRequest { page, limit } = request.clamped();
        let total_pages = (total_count as u64).div_ceil(u64::from(limit)) as u32;
        let has_next_page = page < total_pages;
        let has_previous_page = page > 1;
        Self {
            total_count: total_count as u64,
            total_pages,
            current_page: page,
            has_next_page,
            has_previous_page,
            next_page: has_next_page.then(|| page + 1),
            previous_page: has_previous_page.then(|| page - 1),
        }
    }
}

/// One page of results plus its metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page_info: PageInfo,
}

/// Composite per-purchase view: the purchase joined with the presence of
/// its feedback, publication and refund records. `has_refund` implies
/// `refunded`; `has_publication` implies `has_feedback` by the creation
/// sequence of the write path.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseStatus {
    pub id: String,
    pub date: NaiveDate,
    pub order: String,
    pub description: String,
    pub amount_cents: i64,
    pub screenshot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_summary: Option<String>,
    pub refunded: bool,
    pub has_feedback: bool,
    pub has_publication: bool,
    pub has_refund: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// A ready-for-refund row: the purchase enriched with its feedback text
/// and publication proof.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseWithFeedback {
    pub id: String,
    pub date: NaiveDate,
    pub order: String,
    pub description: String,
    pub amount_cents: i64,
    pub screenshot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_summary: Option<String>,
    pub feedback: String,
    pub feedback_date: NaiveDate,
    pub publication_screenshot: String,
    pub publication_date: NaiveDate,
}

/// Aggregate counts and sums over one tester's purchase set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PurchaseStatistics {
    pub nb_refunded: u64,
    pub nb_not_refunded: u64,
    pub nb_ready_for_refund: u64,
    pub nb_total: u64,
    pub total_refunded_amount_cents: i64,
    pub total_not_refunded_amount_cents: i64,
    pub total_purchase_amount_cents: i64,
}

/// Optional bound on the purchase set feeding balance and delay reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum BalanceLimit {
    /// Purchases dated within the last `n` days.
    Days(u32),
    /// The `n` most recent purchases by date.
    Purchases(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LimitKind {
    Days,
    Purchases,
    Default,
}

/// The window actually applied to a report, echoed back so the UI can
/// disclose which purchase set produced the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct LimitStrategy {
    #[serde(rename = "type")]
    pub kind: LimitKind,
    pub value: u32,
}

impl LimitStrategy {
    pub fn from_limit(limit: Option<BalanceLimit>) -> Self {
        match limit {
            Some(BalanceLimit::Days(value)) => Self {
                kind: LimitKind::Days,
                value,
            },
            Some(BalanceLimit::Purchases(value)) => Self {
                kind: LimitKind::Purchases,
                value,
            },
            None => Self {
                kind: LimitKind::Default,
                value: 0,
            },
        }
    }
}

/// Refund balance over an optionally windowed purchase set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RefundBalance {
    pub purchased_amount_cents: i64,
    pub refunded_amount_cents: i64,
    pub balance_cents: i64,
    pub limit: LimitStrategy,
}

/// One row per refund, for reporting. A refund dated before its purchase
/// yields a negative delay, reported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RefundDelay {
    pub purchase_amount_cents: i64,
    pub refund_amount_cents: i64,
    pub delay_in_days: i64,
    pub purchase_date: NaiveDate,
    pub refund_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefundDelayReport {
    pub delays: Vec<RefundDelay>,
    pub average_delay_in_days: f64,
    pub limit: LimitStrategy,
}
