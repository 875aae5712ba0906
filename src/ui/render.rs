use std::io::{self, Write};

use crossterm::{
    cursor, execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use tokio::sync::watch;

use crate::error::AppResult;
use crate::metrics::Snapshot;
use crate::shutdown::ShutdownSender;
use crate::target::TargetConfig;

pub struct DashboardTerminal {
    stdout: io::Stdout,
}

impl DashboardTerminal {
    fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

/// The terminal capability the renderer needs: bring up/tear down a screen
/// region and overwrite it with a block of text. Keeping the backend behind
/// this trait keeps it swappable.
pub trait Dashboard {
    /// Initializes the terminal for dashboard rendering.
    ///
    /// # Errors
    ///
    /// Returns an error when terminal setup fails.
    fn setup_terminal() -> AppResult<DashboardTerminal>;
    fn cleanup();
    fn render(terminal: &mut DashboardTerminal, lines: &[String]);
}

pub struct Ui;

impl Dashboard for Ui {
    fn setup_terminal() -> AppResult<DashboardTerminal> {
        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(err.into());
        }

        Ok(DashboardTerminal::new())
    }

    fn cleanup() {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
    }

    fn render(terminal: &mut DashboardTerminal, lines: &[String]) {
        if execute!(terminal.stdout, cursor::MoveTo(0, 0), Clear(ClearType::All)).is_err() {
            eprintln!("Failed to clear dashboard terminal.");
            return;
        }

        // Raw mode disables output post-processing, so position each line
        // explicitly instead of relying on newline translation.
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            if execute!(terminal.stdout, cursor::MoveTo(0, row)).is_err()
                || write!(terminal.stdout, "{}", line).is_err()
            {
                eprintln!("Failed to render dashboard.");
                return;
            }
        }

        terminal.stdout.flush().ok();
    }
}

/// Format one snapshot into the full report, top to bottom.
///
/// Status buckets are sorted by count descending with a stable sort, so ties
/// keep the tally's insertion order. Header buckets are sorted by value
/// ascending (byte order, which puts the empty "header absent" bucket first)
/// and carry a 1-based sequence number. While no request has completed the
/// sections stay empty; percentages are never computed against a zero total.
pub(crate) fn format_report(target: &TargetConfig, snapshot: &Snapshot) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Target: {}", target.url));
    lines.push(format!("Header to check: {}", target.header));
    lines.push(format!("Concurrent requests: {}", target.concurrency.get()));
    lines.push(String::new());

    lines.push("=== Response status ===".to_owned());
    if snapshot.total > 0 {
        let mut buckets: Vec<&(String, u64)> = snapshot.statuses.entries().iter().collect();
        buckets.sort_by(|a, b| b.1.cmp(&a.1));
        for (status, count) in buckets {
            lines.push(format!(
                "{} {}",
                bucket_prefix(*count, snapshot.total),
                status
            ));
        }
    }
    lines.push(String::new());

    lines.push(format!("=== Response header {} ===", target.header));
    if snapshot.total > 0 {
        let mut buckets: Vec<&(String, u64)> = snapshot.header_values.entries().iter().collect();
        buckets.sort_by(|a, b| a.0.cmp(&b.0));
        for (seq, (value, count)) in buckets.into_iter().enumerate() {
            lines.push(format!(
                "{} {} {}",
                bucket_prefix(*count, snapshot.total),
                seq.saturating_add(1),
                value
            ));
        }
    }

    lines
}

/// `<pct>% [<count>/<total>]` with the percentage floored.
fn bucket_prefix(count: u64, total: u64) -> String {
    let percent = count.saturating_mul(100).checked_div(total).unwrap_or(0);
    format!("{}% [{}/{}]", percent, count, total)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        Ui::cleanup();
    }
}

/// Spawn the render task.
///
/// The terminal is initialized here, before the task starts, so a broken
/// display aborts startup instead of failing silently in the background.
///
/// # Errors
///
/// Returns an error when the terminal cannot enter raw mode or the alternate
/// screen.
pub fn setup_render_ui(
    target: &TargetConfig,
    shutdown_tx: &ShutdownSender,
    snapshot_tx: &watch::Sender<Snapshot>,
) -> AppResult<tokio::task::JoinHandle<()>> {
    let mut terminal = Ui::setup_terminal()?;
    let target = target.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();
    let mut snapshot_rx = snapshot_tx.subscribe();

    Ok(tokio::spawn(async move {
        let _guard = TerminalGuard;

        let initial = snapshot_rx.borrow_and_update().clone();
        Ui::render(&mut terminal, &format_report(&target, &initial));

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                changed = snapshot_rx.changed() => {
                    if changed.is_ok() {
                        let snapshot = snapshot_rx.borrow_and_update().clone();
                        Ui::render(&mut terminal, &format_report(&target, &snapshot));
                    } else {
                        break;
                    }
                }
            }
        }
    }))
}
