use std::ffi::OsString;

use clap::{CommandFactory, FromArgMatches};

use crate::args::MonitorArgs;
use crate::error::AppResult;
use crate::target::TargetConfig;

/// Parse arguments, set up logging and the runtime, and run the monitor.
///
/// Invoked with no arguments at all, prints help and exits cleanly instead
/// of failing on the missing URL.
///
/// # Errors
///
/// Returns an error on invalid arguments, on runtime construction failure,
/// or when the monitor itself fails to start.
pub fn run() -> AppResult<()> {
    let args = match parse_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose);

    let target = TargetConfig::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(crate::app::run_monitor(target))
}

fn parse_args() -> AppResult<Option<MonitorArgs>> {
    let mut cmd = MonitorArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = MonitorArgs::from_arg_matches(&matches)?;

    Ok(Some(args))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--")
}
