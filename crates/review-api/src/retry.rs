//! Write-conflict retry policy
//!
//! A mutating request loses a race when another request saved the same
//! review first. The whole load-mutate-save cycle is re-run on a fresh
//! copy; any other failure is returned as is.

use std::future::Future;
use std::time::Duration;

use review_service::ServiceResult;
use tracing::warn;

/// Delay unit between attempts, scaled linearly by attempt number
const BASE_BACKOFF: Duration = Duration::from_millis(2);

/// Run `op`, re-running it up to `retries` extra times while it fails with a
/// concurrency conflict. The last conflict is returned unchanged (409).
pub async fn retry_on_conflict<T, F, Fut>(retries: u32, mut op: F) -> ServiceResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ServiceResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(e) if e.is_concurrency_conflict() && attempt < retries => {
                attempt += 1;
                warn!(attempt, retries, error = %e, "Retrying after write conflict");
                tokio::time::sleep(BASE_BACKOFF * attempt).await;
            }
            result => return result,
        }
    }
}
