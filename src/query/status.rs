use std::collections::{HashMap, HashSet};

use crate::error::AppResult;
use crate::model::{Feedback, Publication, Refund};
use crate::store::Store;
use crate::types::{
    Page, PageInfo, PageRequest, PurchaseStatus, PurchaseWithFeedback, SortKey, SortOrder,
};

/// Parameters for [`purchase_status`]. Constructed fresh per call; the
/// defaults are the first page of ten, newest purchases first.
#[derive(Debug, Clone, Default)]
pub struct StatusQuery {
    pub only_not_refunded: bool,
    pub page: PageRequest,
    pub sort: SortKey,
    pub order: SortOrder,
}

/// Composite status rows for every purchase owned by `tester_uuid`,
/// sorted and paginated.
///
/// Joins each purchase against the presence of its feedback, publication
/// and refund records in application logic; the storage backend only
/// answers per-entity reads.
pub async fn purchase_status<S>(
    store: &S,
    tester_uuid: &str,
    query: &StatusQuery,
) -> AppResult<Page<PurchaseStatus>>
where
    S: Store + ?Sized,
{
    let mut purchases = store.purchases_for_tester(tester_uuid).await?;
    if query.only_not_refunded {
        purchases.retain(|purchase| !purchase.refunded);
    }

    let ids: Vec<String> = purchases.iter().map(|p| p.id.clone()).collect();
    let with_feedback: HashSet<String> = store
        .feedbacks_for_purchases(&ids)
        .await?
        .into_iter()
        .map(|f| f.purchase_id)
        .collect();
    let with_publication: HashSet<String> = store
        .publications_for_purchases(&ids)
        .await?
        .into_iter()
        .map(|p| p.purchase_id)
        .collect();
    let refunds: HashMap<String, Refund> = store
        .refunds_for_purchases(&ids)
        .await?
        .into_iter()
        .map(|r| (r.purchase_id.clone(), r))
        .collect();

    let mut rows: Vec<PurchaseStatus> = purchases
        .into_iter()
        .map(|purchase| {
            let refund = refunds.get(&purchase.id);
            PurchaseStatus {
                has_feedback: with_feedback.contains(&purchase.id),
                has_publication: with_publication.contains(&purchase.id),
                has_refund: refund.is_some(),
                transaction_id: refund.and_then(|r| r.transaction_id.clone()),
                id: purchase.id,
                date: purchase.date,
                order: purchase.order,
                description: purchase.description,
                amount_cents: purchase.amount_cents,
                screenshot: purchase.screenshot,
                screenshot_summary: purchase.screenshot_summary,
                refunded: purchase.refunded,
            }
        })
        .collect();

    sort_rows(&mut rows, query.sort, query.order);

    tracing::debug!(
        tester = %tester_uuid,
        total = rows.len(),
        sort = query.sort.as_str(),
        "computed purchase status rows"
    );

    Ok(paginate(rows, query.page))
}

/// Purchases awaiting a refund: not refunded, with feedback and
/// publication recorded. Rows carry the feedback text and publication
/// proof and come back oldest purchase first, so the longest-outstanding
/// items surface at the top of the refund queue.
pub async fn ready_for_refund<S>(
    store: &S,
    tester_uuid: &str,
    page: PageRequest,
) -> AppResult<Page<PurchaseWithFeedback>>
where
    S: Store + ?Sized,
{
    let mut purchases = store.purchases_for_tester(tester_uuid).await?;
    purchases.retain(|purchase| !purchase.refunded);

    let ids: Vec<String> = purchases.iter().map(|p| p.id.clone()).collect();
    let feedbacks: HashMap<String, Feedback> = store
        .feedbacks_for_purchases(&ids)
        .await?
        .into_iter()
        .map(|f| (f.purchase_id.clone(), f))
        .collect();
    let publications: HashMap<String, Publication> = store
        .publications_for_purchases(&ids)
        .await?
        .into_iter()
        .map(|p| (p.purchase_id.clone(), p))
        .collect();

    let mut rows: Vec<PurchaseWithFeedback> = purchases
        .into_iter()
        .filter_map(|purchase| {
            let feedback = feedbacks.get(&purchase.id)?;
            let publication = publications.get(&purchase.id)?;
            Some(PurchaseWithFeedback {
                feedback: feedback.feedback.clone(),
                feedback_date: feedback.date,
                publication_screenshot: publication.screenshot.clone(),
                publication_date: publication.date,
                id: purchase.id,
                date: purchase.date,
                order: purchase.order,
                description: purchase.description,
                amount_cents: purchase.amount_cents,
                screenshot: purchase.screenshot,
                screenshot_summary: purchase.screenshot_summary,
            })
        })
        .collect();

    rows.sort_by(|a, b| a.date.cmp(&b.date));

    tracing::debug!(tester = %tester_uuid, total = rows.len(), "computed ready-for-refund rows");

    Ok(paginate(rows, page))
}

fn sort_rows(rows: &mut [PurchaseStatus], key: SortKey, order: SortOrder) {
    // sort_by is stable: rows with equal keys keep the repository's
    // iteration order, which keeps pagination deterministic across pages.
    rows.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Order => a.order.cmp(&b.order),
            SortKey::Description => a.description.cmp(&b.description),
            SortKey::Amount => a.amount_cents.cmp(&b.amount_cents),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn paginate<T>(rows: Vec<T>, request: PageRequest) -> Page<T> {
    let request = request.clamped();
    let page_info = PageInfo::new(rows.len(), request);
    let start = (request.page as usize - 1) * request.limit as usize;
    let results = rows
        .into_iter()
        .skip(start)
        .take(request.limit as usize)
        .collect();
    Page { results, page_info }
}
