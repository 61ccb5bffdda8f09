use crate::error::AppResult;
use crate::fuzzy::{fuzzy_search_fields, DEFAULT_MATCH_THRESHOLD};
use crate::model::Purchase;
use crate::store::Store;

/// Default cap on returned purchase ids.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Purchase fields a query is matched against. Which set is active is host
/// configuration; [`DEFAULT_SEARCH_FIELDS`] covers the text a tester
/// actually typed or can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Order,
    Description,
    ScreenshotSummary,
}

pub const DEFAULT_SEARCH_FIELDS: &[SearchField] = &[
    SearchField::Order,
    SearchField::Description,
    SearchField::ScreenshotSummary,
];

impl SearchField {
    fn value<'a>(&self, purchase: &'a Purchase) -> Option<&'a str> {
        match self {
            SearchField::Order => Some(&purchase.order),
            SearchField::Description => Some(&purchase.description),
            SearchField::ScreenshotSummary => purchase.screenshot_summary.as_deref(),
        }
    }
}

/// Ids of the tester's purchases matching `query` against the default
/// field set, in repository order, truncated at `limit`.
pub async fn search_purchases<S>(
    store: &S,
    tester_uuid: &str,
    query: &str,
    limit: usize,
) -> AppResult<Vec<String>>
where
    S: Store + ?Sized,
{
    search_purchases_in(store, tester_uuid, query, DEFAULT_SEARCH_FIELDS, limit).await
}

/// Like [`search_purchases`] with an explicit field set.
///
/// An empty or blank query is "no search" and returns no ids; deciding
/// whether to search at all (e.g. a minimum query length) is the caller's
/// concern. Results are not relevance-ranked.
pub async fn search_purchases_in<S>(
    store: &S,
    tester_uuid: &str,
    query: &str,
    fields: &[SearchField],
    limit: usize,
) -> AppResult<Vec<String>>
where
    S: Store + ?Sized,
{
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let purchases = store.purchases_for_tester(tester_uuid).await?;

    let mut matches = Vec::new();
    for purchase in purchases {
        if matches.len() >= limit {
            break;
        }
        let candidates = fields.iter().filter_map(|field| field.value(&purchase));
        if fuzzy_search_fields(query, candidates, DEFAULT_MATCH_THRESHOLD) {
            matches.push(purchase.id);
        }
    }

    tracing::debug!(tester = %tester_uuid, hits = matches.len(), "purchase search completed");

    Ok(matches)
}
