use std::time::Duration;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::shutdown::ShutdownSender;

use super::{Sample, Snapshot, Tally};

/// How often a fresh snapshot is published to the renderer.
pub const SNAPSHOT_INTERVAL: Duration = Duration::from_secs(1);

/// Spawn the tally collector.
///
/// The collector is the only writer of [`Tally`]: it drains samples from the
/// bounded channel one at a time and folds them in, which is what makes the
/// map mutation safe with N concurrent producers. On every snapshot tick it
/// publishes an immutable [`Snapshot`] over the watch channel. The task exits
/// on shutdown or when all probe workers have dropped their senders, and
/// returns the final tally.
#[must_use]
pub fn setup_tally_collector(
    shutdown_tx: &ShutdownSender,
    mut sample_rx: mpsc::Receiver<Sample>,
    snapshot_tx: &watch::Sender<Snapshot>,
) -> JoinHandle<Tally> {
    let shutdown_tx = shutdown_tx.clone();
    let snapshot_tx = snapshot_tx.clone();

    tokio::spawn(async move {
        let mut tally = Tally::default();
        let mut shutdown_rx = shutdown_tx.subscribe();
        let mut snapshot_interval = tokio::time::interval(SNAPSHOT_INTERVAL);
        snapshot_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                sample = sample_rx.recv() => match sample {
                    Some(sample) => tally.record(&sample),
                    None => break,
                },
                _ = snapshot_interval.tick() => {
                    drop(snapshot_tx.send(tally.snapshot()));
                }
            }
        }

        // Final publish so the last render matches what was counted.
        drop(snapshot_tx.send(tally.snapshot()));
        tally
    })
}
