use clap::Parser;

use super::defaults::DEFAULT_TRACKED_HEADER;
use super::parsers::parse_positive_usize;
use super::types::PositiveUsize;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "A top-like terminal monitor for HTTP responses - continuously probes a target URL and tallies status lines and a chosen response header in a live dashboard."
)]
pub struct MonitorArgs {
    /// Target URL to monitor (http:// is prepended when no scheme is given)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Number of persistent concurrent probe workers
    #[arg(
        long,
        short = 'c',
        default_value = "10",
        value_parser = parse_positive_usize,
        env = "XTOP_CONCURRENCY"
    )]
    pub concurrency: PositiveUsize,

    /// Response header name to tally
    #[arg(
        long = "header",
        short = 'x',
        default_value = DEFAULT_TRACKED_HEADER,
        env = "XTOP_HEADER"
    )]
    pub header: String,

    /// Enable debug logging (also via XTOP_LOG / RUST_LOG)
    #[arg(long)]
    pub verbose: bool,
}
