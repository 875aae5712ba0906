use tokio::sync::{mpsc, watch};
use tracing::info;

use crate::error::AppResult;
use crate::metrics::{Sample, Snapshot, setup_tally_collector};
use crate::probe::{build_client, setup_probe_workers};
use crate::shutdown_handlers::{
    setup_keyboard_shutdown_handler, setup_signal_shutdown_handler, shutdown_channel,
};
use crate::target::TargetConfig;
use crate::ui::setup_render_ui;

/// Wire up every task and run until a quit signal arrives.
///
/// Channels: a bounded sample channel sized to the worker count (a worker
/// cannot start its next request until its previous sample was accepted) and
/// a watch channel carrying the latest snapshot to the renderer.
///
/// # Errors
///
/// Returns an error when the HTTP client or the terminal cannot be set up,
/// or when a task panics.
pub async fn run_monitor(target: TargetConfig) -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let (sample_tx, sample_rx) = mpsc::channel::<Sample>(target.concurrency.get());
    let (snapshot_tx, _) = watch::channel(Snapshot::default());

    let client = build_client()?;

    // Terminal setup happens inside and is fatal on failure, before any
    // worker starts hitting the target.
    let render_handle = setup_render_ui(&target, &shutdown_tx, &snapshot_tx)?;

    let worker_handles = setup_probe_workers(&target, &shutdown_tx, &sample_tx, &client);
    drop(sample_tx);

    let keyboard_handle = setup_keyboard_shutdown_handler(&shutdown_tx);
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let collector_handle = setup_tally_collector(&shutdown_tx, sample_rx, &snapshot_tx);

    let (keyboard_result, signal_result, render_result, collector_result) = tokio::join!(
        keyboard_handle,
        signal_handle,
        render_handle,
        collector_handle
    );
    for handle in worker_handles {
        handle.await?;
    }
    keyboard_result?;
    signal_result?;
    render_result?;
    let tally = collector_result?;

    info!(
        total = tally.total,
        responses = tally.statuses.sum(),
        "monitor stopped"
    );
    Ok(())
}
