use std::future::Future;

use tokio::sync::{mpsc, watch};

use super::{Sample, Snapshot, Tally, TallyMap, setup_tally_collector};
use crate::error::{AppError, AppResult};
use crate::shutdown::ShutdownSender;

fn success(status: &str, header: &str) -> Sample {
    Sample::Success {
        status_line: status.to_owned(),
        header_value: header.to_owned(),
    }
}

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

#[test]
fn tally_map_preserves_insertion_order() {
    let mut map = TallyMap::default();
    map.increment("b");
    map.increment("a");
    map.increment("b");
    let keys: Vec<&str> = map.entries().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["b", "a"]);
    assert_eq!(map.sum(), 3);
}

#[test]
fn total_counts_successes_and_failures() {
    let mut tally = Tally::default();
    tally.record(&success("200 OK", "nginx"));
    tally.record(&success("200 OK", "apache"));
    tally.record(&Sample::Failure);
    tally.record(&success("503 Service Unavailable", ""));

    assert_eq!(tally.total, 4);
    assert_eq!(tally.statuses.sum(), 3);
    assert_eq!(tally.header_values.sum(), 3);
    // The deficit between total and either bucket sum is the failure count.
    assert_eq!(tally.total - tally.statuses.sum(), 1);
}

#[test]
fn failures_touch_no_bucket() {
    let mut tally = Tally::default();
    tally.record(&Sample::Failure);
    tally.record(&Sample::Failure);

    assert_eq!(tally.total, 2);
    assert!(tally.statuses.is_empty());
    assert!(tally.header_values.is_empty());
}

#[test]
fn absent_header_is_bucketed_as_empty_string() {
    let mut tally = Tally::default();
    tally.record(&success("200 OK", ""));
    tally.record(&success("200 OK", ""));

    assert_eq!(tally.header_values.entries(), [(String::new(), 2)]);
}

#[test]
fn snapshot_copies_all_fields_at_once() {
    let mut tally = Tally::default();
    tally.record(&success("200 OK", "nginx"));
    tally.record(&Sample::Failure);

    let snapshot = tally.snapshot();
    assert_eq!(snapshot.total, tally.total);
    assert_eq!(snapshot.statuses, tally.statuses);
    assert_eq!(snapshot.header_values, tally.header_values);

    // Later mutation must not leak into the snapshot.
    tally.record(&success("200 OK", "nginx"));
    assert_eq!(snapshot.total, 2);
}

#[test]
fn collector_loses_no_samples_under_concurrent_producers() -> AppResult<()> {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: u64 = 250;

    run_async_test(async {
        let (shutdown_tx, _shutdown_rx): (ShutdownSender, _) =
            tokio::sync::broadcast::channel(1);
        let (sample_tx, sample_rx) = mpsc::channel::<Sample>(PRODUCERS);
        let (snapshot_tx, _snapshot_rx) = watch::channel(Snapshot::default());

        let collector = setup_tally_collector(&shutdown_tx, sample_rx, &snapshot_tx);

        let mut producers = Vec::with_capacity(PRODUCERS);
        for id in 0..PRODUCERS {
            let sample_tx = sample_tx.clone();
            producers.push(tokio::spawn(async move {
                for seq in 0..PER_PRODUCER {
                    let sample = if seq % 5 == 0 {
                        Sample::Failure
                    } else {
                        Sample::Success {
                            status_line: "200 OK".to_owned(),
                            header_value: format!("backend-{}", id % 3),
                        }
                    };
                    if sample_tx.send(sample).await.is_err() {
                        break;
                    }
                }
            }));
        }
        drop(sample_tx);

        for producer in producers {
            producer.await?;
        }
        let tally = collector.await?;

        let expected_total = (PRODUCERS as u64) * PER_PRODUCER;
        let expected_failures = (PRODUCERS as u64) * PER_PRODUCER.div_ceil(5);
        assert_eq!(tally.total, expected_total);
        assert_eq!(tally.statuses.sum(), expected_total - expected_failures);
        assert_eq!(tally.header_values.sum(), expected_total - expected_failures);
        Ok(())
    })
}

#[test]
fn collector_publishes_final_snapshot_on_channel_close() -> AppResult<()> {
    run_async_test(async {
        let (shutdown_tx, _shutdown_rx): (ShutdownSender, _) =
            tokio::sync::broadcast::channel(1);
        let (sample_tx, sample_rx) = mpsc::channel::<Sample>(1);
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());

        let collector = setup_tally_collector(&shutdown_tx, sample_rx, &snapshot_tx);

        sample_tx
            .send(success("200 OK", "nginx"))
            .await
            .map_err(|err| AppError::validation(format!("send failed: {}", err)))?;
        sample_tx
            .send(Sample::Failure)
            .await
            .map_err(|err| AppError::validation(format!("send failed: {}", err)))?;
        drop(sample_tx);

        let tally = collector.await?;
        assert_eq!(tally.total, 2);

        let snapshot = snapshot_rx.borrow().clone();
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.statuses.entries(), [("200 OK".to_owned(), 1)]);
        Ok(())
    })
}
