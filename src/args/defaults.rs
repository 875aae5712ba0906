pub(crate) const DEFAULT_USER_AGENT: &str = concat!("xtop/", env!("CARGO_PKG_VERSION"));

/// Response header tallied when `-x/--header` is not given.
pub(crate) const DEFAULT_TRACKED_HEADER: &str = "X-Server";
