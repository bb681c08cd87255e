//! Cursor pagination shared by the provider item fetchers.

use std::future::Future;

use log::*;
use serde_json::Value;

use crate::error::Error;
use crate::integration_item::IntegrationItem;

/// One page of raw provider objects.
#[derive(Debug, Default)]
pub struct Page {
    pub results: Vec<Value>,
    /// Cursor of the following page. `None` or empty means this was the last page.
    pub next_cursor: Option<String>,
}

/// Walk every page of a listing, normalizing each object as it arrives.
///
/// Pages are requested strictly one after another, starting with no cursor. The first
/// failure, whether fetching or normalizing, aborts the walk and nothing collected so
/// far is returned.
pub async fn collect_items<F, Fut, N>(
    mut fetch_page: F,
    normalize: N,
) -> Result<Vec<IntegrationItem>, Error>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page, Error>>,
    N: Fn(&Value) -> Result<IntegrationItem, Error>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch_page(cursor.take()).await?;
        trace!("Fetched page with {} results", page.results.len());

        for raw in &page.results {
            items.push(normalize(raw)?);
        }

        match page.next_cursor {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => break,
        }
    }

    Ok(items)
}
