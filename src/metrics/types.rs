/// Outcome of one completed probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample {
    Success {
        /// Status line of the response, e.g. `200 OK`.
        status_line: String,
        /// Value of the tracked header; empty when the header was absent.
        header_value: String,
    },
    Failure,
}

/// Insertion-ordered string-to-count map.
///
/// Tallies hold a handful of distinct keys at most, so a flat pair list wins
/// over a hash map and keeps the iteration order deterministic. That order is
/// what breaks ties when the dashboard sorts buckets by count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyMap {
    entries: Vec<(String, u64)>,
}

impl TallyMap {
    pub fn increment(&mut self, key: &str) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            *count = count.saturating_add(1);
        } else {
            self.entries.push((key.to_owned(), 1));
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    #[must_use]
    pub fn sum(&self) -> u64 {
        self.entries
            .iter()
            .fold(0, |acc, (_, count)| acc.saturating_add(*count))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregated request tallies. Owned exclusively by the collector task; the
/// rest of the program only ever sees immutable [`Snapshot`]s of it.
#[derive(Debug, Default)]
pub struct Tally {
    /// All observed attempts, successes and failures combined.
    pub total: u64,
    pub statuses: TallyMap,
    pub header_values: TallyMap,
}

impl Tally {
    /// Fold one sample into the tallies.
    ///
    /// Failures only bump `total`; they are deliberately not bucketed so the
    /// percentage columns reflect observed responses only. The gap between
    /// `total` and a bucket sum is the failure count.
    pub fn record(&mut self, sample: &Sample) {
        self.total = self.total.saturating_add(1);
        if let Sample::Success {
            status_line,
            header_value,
        } = sample
        {
            self.statuses.increment(status_line);
            self.header_values.increment(header_value);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            total: self.total,
            statuses: self.statuses.clone(),
            header_values: self.header_values.clone(),
        }
    }
}

/// Point-in-time copy of the tallies, consistent by construction: it is only
/// ever built by the single task that mutates [`Tally`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub total: u64,
    pub statuses: TallyMap,
    pub header_values: TallyMap,
}
