// ABOUTME: Shared HTTP plumbing - proxied client construction and bounded
// ABOUTME: retry for transient failures.

use std::time::Duration;

use tracing::warn;

/// Default timeout for tool and transport requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_ATTEMPTS: u32 = 3;
const RETRY_STATUS: [u16; 4] = [500, 502, 503, 504];

/// Build a `reqwest::Client` honoring the configured proxy.
///
/// An empty proxy URL means direct connections.
pub fn build_client(
    proxy_url: Option<&str>,
    timeout: Duration,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("mediq/", env!("CARGO_PKG_VERSION")));

    if let Some(url) = proxy_url.filter(|u| !u.is_empty()) {
        builder = builder.proxy(reqwest::Proxy::all(url)?);
    }

    builder.build()
}

/// Send a request, retrying up to three times with linear backoff.
///
/// Only connect/timeout errors and gateway-class statuses (500, 502, 503,
/// 504) are retried; everything else returns immediately. A request whose
/// body cannot be cloned is sent once.
pub async fn send_with_retry(
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, reqwest::Error> {
    let mut attempt = 1u32;
    loop {
        let Some(this_try) = request.try_clone() else {
            return request.send().await;
        };

        match this_try.send().await {
            Ok(response)
                if attempt < MAX_ATTEMPTS
                    && RETRY_STATUS.contains(&response.status().as_u16()) =>
            {
                warn!(
                    status = response.status().as_u16(),
                    attempt, "retrying after server error"
                );
            }
            Ok(response) => return Ok(response),
            Err(e) if attempt < MAX_ATTEMPTS && (e.is_connect() || e.is_timeout()) => {
                warn!(error = %e, attempt, "retrying after transport error");
            }
            Err(e) => return Err(e),
        }

        tokio::time::sleep(Duration::from_secs(u64::from(attempt))).await;
        attempt += 1;
    }
}
