mod common;

use common::{date, purchase};
use feedback_flow::model::{Feedback, Publication, Refund};
use feedback_flow::{
    purchase_status, ready_for_refund, MemoryStore, PageRequest, SortKey, SortOrder, StatusQuery,
};

const TESTER: &str = "7ad20be5-0f1b-4b6e-9c67-10f30a3f0c85";

#[tokio::test]
async fn pages_concatenate_to_the_full_sorted_set() {
    let store = MemoryStore::new();
    let mut expected = Vec::new();
    for day in 1..=5 {
        let p = purchase(
            TESTER,
            date(2026, 3, day),
            &format!("ORDER-{day}"),
            "monthly test item",
            1000 + i64::from(day),
        );
        expected.push(p.id.clone());
        store.insert_purchase(p).await;
    }

    let mut seen = Vec::new();
    for page in 1..=3 {
        let result = purchase_status(
            &store,
            TESTER,
            &StatusQuery {
                page: PageRequest::new(page, 2),
                sort: SortKey::Date,
                order: SortOrder::Asc,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(result.page_info.total_count, 5);
        assert_eq!(result.page_info.total_pages, 3);
        assert_eq!(result.page_info.current_page, page);
        assert_eq!(result.page_info.has_next_page, page < 3);
        assert_eq!(result.page_info.has_previous_page, page > 1);
        seen.extend(result.results.into_iter().map(|row| row.id));
    }

    // Every row exactly once, in sorted order.
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn sorts_by_date_ascending_and_amount_descending() {
    let store = MemoryStore::new();
    for (day, amount) in [(12, 5999), (3, 1099), (27, 2099), (3, 4500)] {
        store
            .insert_purchase(purchase(
                TESTER,
                date(2026, 1, day),
                &format!("ORDER-{day}-{amount}"),
                "sort fixture",
                amount,
            ))
            .await;
    }

    let by_date = purchase_status(
        &store,
        TESTER,
        &StatusQuery {
            sort: SortKey::Date,
            order: SortOrder::Asc,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let dates: Vec<_> = by_date.results.iter().map(|row| row.date).collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));

    let by_amount = purchase_status(
        &store,
        TESTER,
        &StatusQuery {
            sort: SortKey::Amount,
            order: SortOrder::Desc,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let amounts: Vec<_> = by_amount.results.iter().map(|row| row.amount_cents).collect();
    assert!(amounts.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn status_flags_follow_the_joined_records() {
    let store = MemoryStore::new();

    let refunded = purchase(TESTER, date(2026, 2, 1), "ORDER-A", "full workflow", 1099);
    let refunded_id = refunded.id.clone();
    store.insert_purchase(refunded).await;
    store
        .insert_feedback(Feedback::new(
            refunded_id.clone(),
            date(2026, 2, 3),
            "works great".to_string(),
        ))
        .await;
    store
        .insert_publication(Publication::new(
            refunded_id.clone(),
            date(2026, 2, 4),
            "proofs/a.webp".to_string(),
        ))
        .await;
    store
        .insert_refund(Refund::new(
            refunded_id.clone(),
            date(2026, 2, 10),
            date(2026, 2, 10),
            1099,
            Some("TX-0042".to_string()),
        ))
        .await;
    store.mark_refunded(&refunded_id).await;

    let pending = purchase(TESTER, date(2026, 2, 5), "ORDER-B", "feedback only", 2099);
    let pending_id = pending.id.clone();
    store.insert_purchase(pending).await;
    store
        .insert_feedback(Feedback::new(
            pending_id.clone(),
            date(2026, 2, 6),
            "still waiting".to_string(),
        ))
        .await;

    let result = purchase_status(&store, TESTER, &StatusQuery::default())
        .await
        .unwrap();
    assert_eq!(result.page_info.total_count, 2);

    for row in &result.results {
        if row.has_refund {
            assert!(row.refunded);
        }
        if row.has_publication {
            assert!(row.has_feedback);
        }
    }

    let full = result.results.iter().find(|r| r.id == refunded_id).unwrap();
    assert!(full.has_feedback && full.has_publication && full.has_refund);
    assert_eq!(full.transaction_id.as_deref(), Some("TX-0042"));

    let partial = result.results.iter().find(|r| r.id == pending_id).unwrap();
    assert!(partial.has_feedback);
    assert!(!partial.has_publication && !partial.has_refund);
    assert_eq!(partial.transaction_id, None);
}

#[tokio::test]
async fn only_not_refunded_filters_out_refunded_purchases() {
    let store = MemoryStore::new();
    let done = purchase(TESTER, date(2026, 4, 1), "ORDER-DONE", "refunded", 500);
    let done_id = done.id.clone();
    store.insert_purchase(done).await;
    store.mark_refunded(&done_id).await;
    store
        .insert_purchase(purchase(TESTER, date(2026, 4, 2), "ORDER-OPEN", "open", 700))
        .await;

    let result = purchase_status(
        &store,
        TESTER,
        &StatusQuery {
            only_not_refunded: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(result.page_info.total_count, 1);
    assert_eq!(result.results[0].order, "ORDER-OPEN");
}

#[tokio::test]
async fn ready_for_refund_returns_enriched_rows_oldest_first() {
    let store = MemoryStore::new();

    // Eligible, newer.
    let newer = purchase(TESTER, date(2026, 5, 20), "ORDER-NEW", "eligible new", 2000);
    let newer_id = newer.id.clone();
    store.insert_purchase(newer).await;
    store
        .insert_feedback(Feedback::new(
            newer_id.clone(),
            date(2026, 5, 21),
            "solid".to_string(),
        ))
        .await;
    store
        .insert_publication(Publication::new(
            newer_id.clone(),
            date(2026, 5, 22),
            "proofs/new.webp".to_string(),
        ))
        .await;

    // Eligible, older: must come first.
    let older = purchase(TESTER, date(2026, 5, 1), "ORDER-OLD", "eligible old", 3000);
    let older_id = older.id.clone();
    store.insert_purchase(older).await;
    store
        .insert_feedback(Feedback::new(
            older_id.clone(),
            date(2026, 5, 2),
            "fine product".to_string(),
        ))
        .await;
    store
        .insert_publication(Publication::new(
            older_id.clone(),
            date(2026, 5, 3),
            "proofs/old.webp".to_string(),
        ))
        .await;

    // Feedback but no publication: not eligible.
    let unpublished = purchase(TESTER, date(2026, 5, 5), "ORDER-NOPUB", "no proof", 1500);
    let unpublished_id = unpublished.id.clone();
    store.insert_purchase(unpublished).await;
    store
        .insert_feedback(Feedback::new(
            unpublished_id,
            date(2026, 5, 6),
            "unpublished".to_string(),
        ))
        .await;

    // Already refunded: not eligible even with feedback and publication.
    let refunded = purchase(TESTER, date(2026, 5, 2), "ORDER-PAID", "already paid", 900);
    let refunded_id = refunded.id.clone();
    store.insert_purchase(refunded).await;
    store
        .insert_feedback(Feedback::new(
            refunded_id.clone(),
            date(2026, 5, 3),
            "refunded already".to_string(),
        ))
        .await;
    store
        .insert_publication(Publication::new(
            refunded_id.clone(),
            date(2026, 5, 4),
            "proofs/paid.webp".to_string(),
        ))
        .await;
    store.mark_refunded(&refunded_id).await;

    let result = ready_for_refund(&store, TESTER, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(result.page_info.total_count, 2);
    assert_eq!(result.results[0].id, older_id);
    assert_eq!(result.results[1].id, newer_id);

    let first = &result.results[0];
    assert_eq!(first.feedback, "fine product");
    assert_eq!(first.feedback_date, date(2026, 5, 2));
    assert_eq!(first.publication_screenshot, "proofs/old.webp");
    assert_eq!(first.publication_date, date(2026, 5, 3));
}

#[tokio::test]
async fn unknown_tester_yields_an_empty_page() {
    let store = MemoryStore::new();
    let result = purchase_status(&store, "nobody", &StatusQuery::default())
        .await
        .unwrap();
    assert!(result.results.is_empty());
    assert_eq!(result.page_info.total_count, 0);
    assert_eq!(result.page_info.total_pages, 0);
}

#[tokio::test]
async fn out_of_range_pagination_is_clamped_not_rejected() {
    let store = MemoryStore::new();
    for day in 1..=3 {
        store
            .insert_purchase(purchase(
                TESTER,
                date(2026, 6, day),
                &format!("ORDER-{day}"),
                "clamp fixture",
                100,
            ))
            .await;
    }

    let result = purchase_status(
        &store,
        TESTER,
        &StatusQuery {
            page: PageRequest::new(0, 0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(result.page_info.current_page, 1);
    assert_eq!(result.results.len(), 1);
    assert_eq!(result.page_info.total_pages, 3);
}

#[tokio::test]
async fn page_past_the_end_is_empty_with_accurate_totals() {
    let store = MemoryStore::new();
    store
        .insert_purchase(purchase(TESTER, date(2026, 6, 1), "ORDER-1", "lonely", 100))
        .await;

    let result = purchase_status(
        &store,
        TESTER,
        &StatusQuery {
            page: PageRequest::new(10, 10),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(result.results.is_empty());
    assert_eq!(result.page_info.total_count, 1);
    assert!(!result.page_info.has_next_page);
    assert!(result.page_info.has_previous_page);
}

#[tokio::test]
async fn never_returns_another_testers_purchases() {
    let store = MemoryStore::new();
    store
        .insert_purchase(purchase(TESTER, date(2026, 7, 1), "ORDER-MINE", "mine", 100))
        .await;
    store
        .insert_purchase(purchase(
            "f3b9d2c1-0000-4111-8222-333344445555",
            date(2026, 7, 2),
            "ORDER-THEIRS",
            "theirs",
            200,
        ))
        .await;

    let result = purchase_status(&store, TESTER, &StatusQuery::default())
        .await
        .unwrap();
    assert_eq!(result.page_info.total_count, 1);
    assert_eq!(result.results[0].order, "ORDER-MINE");
}
