//! Sample types, tally state, and the collector task that owns them.
mod collector;
mod types;

#[cfg(test)]
mod tests;

pub use collector::{SNAPSHOT_INTERVAL, setup_tally_collector};
pub use types::{Sample, Snapshot, Tally, TallyMap};
