//! Hansard search with history refresh.

use ps_types::{SearchHistoryItem, SearchResult};

use crate::api::{ApiError, ParliaScopeApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    /// Recent queries, fetched after the search so it includes this one.
    /// `None` if the history request failed.
    pub history: Option<Vec<SearchHistoryItem>>,
}

/// Run a search, then refresh the recent-query history.
///
/// Blank queries are not sent and yield `Ok(None)`. A failed history fetch
/// does not fail the search.
///
/// # Errors
/// Failures of the search request itself.
pub async fn search_with_history<A>(
    api: &A,
    query: &str,
    speaker_id: Option<i64>,
) -> Result<Option<SearchOutcome>, ApiError>
where
    A: ParliaScopeApi + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }

    let results = api.search(query, speaker_id).await?;

    let history = match api.search_history().await {
        Ok(history) => Some(history),
        Err(err) => {
            tracing::warn!(error = %err, "search history refresh failed");
            None
        }
    };

    Ok(Some(SearchOutcome { results, history }))
}
