//! Purchase query and aggregation engine for Feedback Flow.
//!
//! Computes per-tester purchase status (feedback / publication / refund
//! flags) with pagination and sorting, fuzzy text search over purchase
//! records, and derived statistics (refund balance, refund delay,
//! aggregate totals).
//!
//! The engine is a library: route handlers own transport and
//! authentication, and storage backends implement the read-only [`store`]
//! traits ([`memory::MemoryStore`] is the bundled reference backend).
//! Every operation takes the caller's already-resolved tester id and only
//! ever returns that tester's data.

pub mod error;
pub mod fuzzy;
pub mod memory;
pub mod model;
pub mod query;
pub mod store;
pub mod types;

pub use error::{AppError, AppResult};
pub use memory::MemoryStore;
pub use query::search::{
    search_purchases, search_purchases_in, SearchField, DEFAULT_SEARCH_FIELDS,
    DEFAULT_SEARCH_LIMIT,
};
pub use query::statistics::{
    not_refunded_amount, purchase_statistics, refund_balance, refund_balance_at, refund_delays,
    refund_delays_at, refunded_amount,
};
pub use query::status::{purchase_status, ready_for_refund, StatusQuery};
pub use store::{
    FeedbackStore, PublicationStore, PurchaseStore, RefundStore, Store, StoreError, StoreResult,
};
pub use types::{
    ApiResponse, BalanceLimit, LimitKind, LimitStrategy, Page, PageInfo, PageRequest,
    PurchaseStatistics, PurchaseStatus, PurchaseWithFeedback, RefundBalance, RefundDelay,
    RefundDelayReport, SortKey, SortOrder,
};
