use crate::args::MonitorArgs;
use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult, ValidationError};

/// Immutable description of what to probe, built once at startup.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub url: String,
    pub concurrency: PositiveUsize,
    pub header: String,
}

impl TargetConfig {
    /// Build the config from parsed CLI arguments, normalizing the URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the normalized URL does not parse.
    pub fn from_args(args: &MonitorArgs) -> AppResult<Self> {
        let url = normalize_url(&args.url);
        reqwest::Url::parse(&url).map_err(|source| {
            AppError::validation(ValidationError::InvalidUrl {
                url: url.clone(),
                source,
            })
        })?;
        Ok(Self {
            url,
            concurrency: args.concurrency,
            header: args.header.clone(),
        })
    }
}

/// Lower-case the URL and prepend `http://` when no scheme is present.
fn normalize_url(raw: &str) -> String {
    let url = raw.trim().to_lowercase();
    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("http://{}", url)
    }
}
