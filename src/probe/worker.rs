use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::AppResult;
use crate::metrics::Sample;
use crate::shutdown::ShutdownSender;
use crate::target::TargetConfig;

/// Upper bound on a single probe; reqwest applies no total timeout by
/// default, which would let one dead connection wedge a worker forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared HTTP client cloned into every worker.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialized.
pub fn build_client() -> AppResult<Client> {
    Ok(Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(DEFAULT_USER_AGENT)
        .build()?)
}

/// Spawn one probe task per configured concurrency slot.
///
/// Each worker loops forever: issue one GET, push exactly one [`Sample`] per
/// attempt, repeat. The channel is bounded, so a worker cannot start its next
/// request until its previous sample was accepted. Failures produce a sample
/// immediately, with no delay or retry. Workers exit only on shutdown.
#[must_use]
pub fn setup_probe_workers(
    target: &TargetConfig,
    shutdown_tx: &ShutdownSender,
    sample_tx: &mpsc::Sender<Sample>,
    client: &Client,
) -> Vec<JoinHandle<()>> {
    (0..target.concurrency.get())
        .map(|_| {
            let shutdown_tx = shutdown_tx.clone();
            let sample_tx = sample_tx.clone();
            let client = client.clone();
            let url = target.url.clone();
            let header = target.header.clone();

            tokio::spawn(async move {
                let mut shutdown_rx = shutdown_tx.subscribe();
                loop {
                    let sample = tokio::select! {
                        _ = shutdown_rx.recv() => break,
                        sample = issue_probe(&client, &url, &header) => sample,
                    };
                    tokio::select! {
                        _ = shutdown_rx.recv() => break,
                        sent = sample_tx.send(sample) => {
                            if sent.is_err() {
                                break;
                            }
                        }
                    }
                }
            })
        })
        .collect()
}

/// Issue one GET and classify the outcome.
///
/// The tracked header is read before the response is dropped; the body is
/// never read. Transport errors are logged at debug level only (the tally is
/// the user-facing record, failures show up there as the gap between total
/// and the bucket sums).
async fn issue_probe(client: &Client, url: &str, header: &str) -> Sample {
    match client.get(url).send().await {
        Ok(response) => {
            let header_value = response
                .headers()
                .get(header)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_owned();
            Sample::Success {
                status_line: status_line(response.status()),
                header_value,
            }
        }
        Err(err) => {
            debug!("probe failed: {}", err);
            Sample::Failure
        }
    }
}

/// Status line as shown on the dashboard, e.g. `200 OK` or bare `599` when
/// the code has no canonical reason phrase.
pub(crate) fn status_line(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(
        || status.as_str().to_owned(),
        |reason| format!("{} {}", status.as_str(), reason),
    )
}
