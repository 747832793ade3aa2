//! Sequential page-by-page retrieval with per-page rate-limit retries.

use tracing::{debug, info, instrument, warn};

use super::backoff::{BackoffPolicy, RetryDecision, classify_status};
use super::{PAGE_LIMIT, Page, PageError, PageFetcher};

/// Fetches every item from a paged endpoint.
///
/// Pages are requested strictly one after another starting at offset 0 with a
/// fixed limit of [`PAGE_LIMIT`]. The offset advances by the number of items
/// actually received, so short pages are handled. Fetching continues while the
/// server-reported `total` exceeds the number of items collected.
///
/// Rate-limited pages (HTTP 429) are retried up to `max_retries` attempts per
/// page; the budget resets for every new page. Any other error, or a rate
/// limit that outlasts the budget, is returned unchanged and the partially
/// collected items are dropped.
///
/// A page without `items` ends pagination early with whatever was collected;
/// this is logged, not reported as an error.
///
/// # Errors
///
/// Returns the fetcher's own error for fatal failures.
#[instrument(skip(fetcher))]
pub async fn fetch_all_pages<T, F>(fetcher: &F, max_retries: u32) -> Result<Vec<T>, F::Error>
where
    T: Send,
    F: PageFetcher<T> + ?Sized,
{
    fetch_all_pages_with_policy(fetcher, &BackoffPolicy::with_max_attempts(max_retries)).await
}

/// Same as [`fetch_all_pages`] with an explicit [`BackoffPolicy`].
///
/// # Errors
///
/// Returns the fetcher's own error for fatal failures.
#[instrument(skip_all, fields(max_attempts = policy.max_attempts()))]
pub async fn fetch_all_pages_with_policy<T, F>(
    fetcher: &F,
    policy: &BackoffPolicy,
) -> Result<Vec<T>, F::Error>
where
    T: Send,
    F: PageFetcher<T> + ?Sized,
{
    let mut items: Vec<T> = Vec::new();
    let mut offset: u32 = 0;
    let mut page_number: u32 = 0;

    loop {
        page_number += 1;
        let page = fetch_page_with_retry(fetcher, policy, offset, page_number).await?;

        let Page {
            items: page_items,
            total,
        } = page;
        let Some(page_items) = page_items else {
            warn!(
                page = page_number,
                offset, "page response has no items; stopping pagination early"
            );
            break;
        };

        let received = page_items.len();
        items.extend(page_items);
        offset = offset.saturating_add(u32::try_from(received).unwrap_or(u32::MAX));

        if let Some(total) = total {
            let total = total as usize;
            if items.len() > total {
                warn!(
                    total,
                    collected = items.len(),
                    "server returned more items than its reported total; truncating"
                );
                items.truncate(total);
            }
        }

        debug!(
            page = page_number,
            received,
            collected = items.len(),
            ?total,
            "page fetched"
        );

        let more_remaining = total.is_some_and(|total| total as usize > items.len());
        if !more_remaining {
            break;
        }
        if received == 0 {
            warn!(
                page = page_number,
                offset, "empty page while items remain; stopping pagination early"
            );
            break;
        }
    }

    info!(items = items.len(), pages = page_number, "pagination finished");
    Ok(items)
}

async fn fetch_page_with_retry<T, F>(
    fetcher: &F,
    policy: &BackoffPolicy,
    offset: u32,
    page_number: u32,
) -> Result<Page<T>, F::Error>
where
    T: Send,
    F: PageFetcher<T> + ?Sized,
{
    let mut attempt: u32 = 0;

    loop {
        let error = match fetcher.fetch_page(offset, PAGE_LIMIT).await {
            Ok(page) => return Ok(page),
            Err(error) => error,
        };
        attempt += 1;

        let failure_type = classify_status(error.status());
        match policy.should_retry(failure_type, attempt, error.retry_after()) {
            RetryDecision::Retry { delay, source, .. } => {
                warn!(
                    page = page_number,
                    offset,
                    attempt,
                    max_attempts = policy.max_attempts(),
                    retry_after = ?error.retry_after(),
                    ?source,
                    delay_ms = delay.as_millis(),
                    "rate limited; retrying page"
                );
                tokio::time::sleep(delay).await;
            }
            RetryDecision::DoNotRetry { reason } => {
                warn!(
                    page = page_number,
                    offset,
                    attempt,
                    status = ?error.status(),
                    %reason,
                    error = %error,
                    "page fetch failed"
                );
                return Err(error);
            }
        }
    }
}
