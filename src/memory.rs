use crate::model::{Feedback, Publication, Purchase, Refund};
use crate::store::{FeedbackStore, PublicationStore, PurchaseStore, RefundStore, StoreResult};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory storage backend: the reference implementation used by the
/// integration tests and by hosts running without a real datastore.
/// Iteration order is insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    purchases: Vec<Purchase>,
    feedbacks: Vec<Feedback>,
    publications: Vec<Publication>,
    refunds: Vec<Refund>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_purchase(&self, purchase: Purchase) {
        self.tables.write().await.purchases.push(purchase);
    }

    pub async fn insert_feedback(&self, feedback: Feedback) {
        self.tables.write().await.feedbacks.push(feedback);
    }

    pub async fn insert_publication(&self, publication: Publication) {
        self.tables.write().await.publications.push(publication);
    }

    pub async fn insert_refund(&self, refund: Refund) {
        self.tables.write().await.refunds.push(refund);
    }

    /// Flip a purchase's `refunded` flag, as the write path does when a
    /// refund is recorded.
    pub async fn mark_refunded(&self, purchase_id: &str) {
        let mut tables = self.tables.write().await;
        if let Some(purchase) = tables.purchases.iter_mut().find(|p| p.id == purchase_id) {
            purchase.refunded = true;
        }
    }
}

#[async_trait]
impl PurchaseStore for MemoryStore {
    async fn purchases_for_tester(&self, tester_uuid: &str) -> StoreResult<Vec<Purchase>> {
        let tables = self.tables.read().await;
        Ok(tables
            .purchases
            .iter()
            .filter(|p| p.tester_uuid == tester_uuid)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn feedbacks_for_purchases(&self, purchase_ids: &[String]) -> StoreResult<Vec<Feedback>> {
        let tables = self.tables.read().await;
        Ok(tables
            .feedbacks
            .iter()
            .filter(|f| purchase_ids.contains(&f.purchase_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PublicationStore for MemoryStore {
    async fn publications_for_purchases(
        &self,
        purchase_ids: &[String],
    ) -> StoreResult<Vec<Publication>> {
        let tables = self.tables.read().await;
        Ok(tables
            .publications
            .iter()
            .filter(|p| purchase_ids.contains(&p.purchase_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RefundStore for MemoryStore {
    async fn refunds_for_purchases(&self, purchase_ids: &[String]) -> StoreResult<Vec<Refund>> {
        let tables = self.tables.read().await;
        Ok(tables
            .refunds
            .iter()
            .filter(|r| purchase_ids.contains(&r.purchase_id))
            .cloned()
            .collect())
    }
}
