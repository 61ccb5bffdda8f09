use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate, Utc};

use crate::error::AppResult;
use crate::model::Purchase;
use crate::store::Store;
use crate::types::{
    BalanceLimit, LimitStrategy, PurchaseStatistics, RefundBalance, RefundDelay,
    RefundDelayReport,
};

/// Aggregate counts and sums over the tester's full purchase set, computed
/// in a single pass from current repository state. No snapshot is kept;
/// repeated calls may observe concurrent writes.
pub async fn purchase_statistics<S>(store: &S, tester_uuid: &str) -> AppResult<PurchaseStatistics>
where
    S: Store + ?Sized,
{
    let purchases = store.purchases_for_tester(tester_uuid).await?;
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

    let mut stats = PurchaseStatistics::default();
    for purchase in &purchases {
        stats.nb_total += 1;
        stats.total_purchase_amount_cents += purchase.amount_cents;
        if purchase.refunded {
            stats.nb_refunded += 1;
            stats.total_refunded_amount_cents += purchase.amount_cents;
        } else {
            stats.nb_not_refunded += 1;
            stats.total_not_refunded_amount_cents += purchase.amount_cents;
            // Same predicate as the ready-for-refund view.
            if with_feedback.contains(&purchase.id) && with_publication.contains(&purchase.id) {
                stats.nb_ready_for_refund += 1;
            }
        }
    }

    tracing::debug!(tester = %tester_uuid, total = stats.nb_total, "computed purchase statistics");

    Ok(stats)
}

/// Sum of purchase amounts already refunded.
pub async fn refunded_amount<S>(store: &S, tester_uuid: &str) -> AppResult<i64>
where
    S: Store + ?Sized,
{
    amount_where(store, tester_uuid, true).await
}

/// Sum of purchase amounts still outstanding.
pub async fn not_refunded_amount<S>(store: &S, tester_uuid: &str) -> AppResult<i64>
where
    S: Store + ?Sized,
{
    amount_where(store, tester_uuid, false).await
}

async fn amount_where<S>(store: &S, tester_uuid: &str, refunded: bool) -> AppResult<i64>
where
    S: Store + ?Sized,
{
    let purchases = store.purchases_for_tester(tester_uuid).await?;
    Ok(purchases
        .iter()
        .filter(|p| p.refunded == refunded)
        .map(|p| p.amount_cents)
        .sum())
}

/// Refund balance over the (optionally windowed) purchase set, relative to
/// the current UTC date.
pub async fn refund_balance<S>(
    store: &S,
    tester_uuid: &str,
    limit: Option<BalanceLimit>,
) -> AppResult<RefundBalance>
where
    S: Store + ?Sized,
{
    refund_balance_at(store, tester_uuid, limit, Utc::now().date_naive()).await
}

/// Same as [`refund_balance`] with an explicit reference date for the
/// day-window cutoff.
pub async fn refund_balance_at<S>(
    store: &S,
    tester_uuid: &str,
    limit: Option<BalanceLimit>,
    today: NaiveDate,
) -> AppResult<RefundBalance>
where
    S: Store + ?Sized,
{
    let purchases = store.purchases_for_tester(tester_uuid).await?;
    let (purchases, strategy) = window_purchases(purchases, limit, today);

    let ids: Vec<String> = purchases.iter().map(|p| p.id.clone()).collect();
    let refunds = store.refunds_for_purchases(&ids).await?;

    let purchased_amount_cents: i64 = purchases.iter().map(|p| p.amount_cents).sum();
    let refunded_amount_cents: i64 = refunds.iter().map(|r| r.amount_cents).sum();

    Ok(RefundBalance {
        purchased_amount_cents,
        refunded_amount_cents,
        balance_cents: purchased_amount_cents - refunded_amount_cents,
        limit: strategy,
    })
}

/// Refund delay report over the (optionally windowed) purchase set,
/// relative to the current UTC date.
pub async fn refund_delays<S>(
    store: &S,
    tester_uuid: &str,
    limit: Option<BalanceLimit>,
) -> AppResult<RefundDelayReport>
where
    S: Store + ?Sized,
{
    refund_delays_at(store, tester_uuid, limit, Utc::now().date_naive()).await
}

/// One row per refund of a windowed purchase. The delay is the signed
/// whole-day difference between purchase date and refund date; a refund
/// dated before its purchase comes through negative, unmodified.
pub async fn refund_delays_at<S>(
    store: &S,
    tester_uuid: &str,
    limit: Option<BalanceLimit>,
    today: NaiveDate,
) -> AppResult<RefundDelayReport>
where
    S: Store + ?Sized,
{
    let purchases = store.purchases_for_tester(tester_uuid).await?;
    let (purchases, strategy) = window_purchases(purchases, limit, today);

    let by_id: HashMap<&str, &Purchase> = purchases.iter().map(|p| (p.id.as_str(), p)).collect();
    let ids: Vec<String> = purchases.iter().map(|p| p.id.clone()).collect();
    let refunds = store.refunds_for_purchases(&ids).await?;

    let delays: Vec<RefundDelay> = refunds
        .iter()
        .filter_map(|refund| {
            let purchase = by_id.get(refund.purchase_id.as_str())?;
            Some(RefundDelay {
                purchase_amount_cents: purchase.amount_cents,
                refund_amount_cents: refund.amount_cents,
                delay_in_days: (refund.refund_date - purchase.date).num_days(),
                purchase_date: purchase.date,
                refund_date: refund.refund_date,
            })
        })
        .collect();

    let average_delay_in_days = if delays.is_empty() {
        0.0
    } else {
        delays.iter().map(|d| d.delay_in_days as f64).sum::<f64>() / delays.len() as f64
    };

    Ok(RefundDelayReport {
        delays,
        average_delay_in_days,
        limit: strategy,
    })
}

/// Apply the optional window to the purchase set and describe what was
/// applied so callers can echo it back.
fn window_purchases(
    mut purchases: Vec<Purchase>,
    limit: Option<BalanceLimit>,
    today: NaiveDate,
) -> (Vec<Purchase>, LimitStrategy) {
    let strategy = LimitStrategy::from_limit(limit);
    match limit {
        Some(BalanceLimit::Days(days)) => {
            let cutoff = today - Days::new(u64::from(days));
            purchases.retain(|purchase| purchase.date >= cutoff);
        }
        Some(BalanceLimit::Purchases(count)) => {
            purchases.sort_by(|a, b| b.date.cmp(&a.date));
            purchases.truncate(count as usize);
        }
        None => {}
    }
    (purchases, strategy)
}
