//! Clock and sleep helpers that work on both wasm and native targets.

use std::future::Future;
use std::time::Duration;

use futures::future::{select, Either};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Current UTC time as RFC 3339.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| OffsetDateTime::UNIX_EPOCH.to_string())
}

pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// Race `fut` against a timer. `None` means the timer won.
pub async fn with_timeout<F>(limit: Duration, fut: F) -> Option<F::Output>
where
    F: Future,
{
    let fut = Box::pin(fut);
    let timer = Box::pin(sleep_ms(limit.as_millis() as u64));
    match select(fut, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}
