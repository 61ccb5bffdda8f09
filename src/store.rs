use crate::model::{Feedback, Publication, Purchase, Refund};
use async_trait::async_trait;

/// Errors surfaced by a storage backend. Reads are idempotent and retry
/// policy belongs to the transport layer, so the engine propagates these
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("storage read failed: {0}")]
    Read(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to purchase records, scoped by owning tester.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// All purchases owned by `tester_uuid`, in the backend's stable
    /// iteration order. That order is the tie-break for sorts and the
    /// result order for search, so it must be deterministic across calls.
    async fn purchases_for_tester(&self, tester_uuid: &str) -> StoreResult<Vec<Purchase>>;
}

/// Read access to feedback records.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn feedbacks_for_purchases(&self, purchase_ids: &[String]) -> StoreResult<Vec<Feedback>>;
}

/// Read access to publication records.
#[async_trait]
pub trait PublicationStore: Send + Sync {
    async fn publications_for_purchases(
        &self,
        purchase_ids: &[String],
    ) -> StoreResult<Vec<Publication>>;
}

/// Read access to refund records.
#[async_trait]
pub trait RefundStore: Send + Sync {
    async fn refunds_for_purchases(&self, purchase_ids: &[String]) -> StoreResult<Vec<Refund>>;
}

/// The full read surface the query engine needs from a storage backend.
pub trait Store: PurchaseStore + FeedbackStore + PublicationStore + RefundStore {}

impl<T: PurchaseStore + FeedbackStore + PublicationStore + RefundStore> Store for T {}
