//! The probe worker pool: N persistent tasks issuing GETs at the target.
mod worker;


pub use worker::{build_client, setup_probe_workers};

pub(crate) use worker::status_line;
