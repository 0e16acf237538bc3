use std::time::Duration;

/// Wayback Machine CDX index endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";

/// Total request timeout of the default transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_USER_AGENT: &str = concat!("waybackurls/", env!("CARGO_PKG_VERSION"));

/// Settings for an [`Archive`](crate::Archive) and its default transport.
///
/// `timeout`, `user_agent` and `proxy` only apply when the archive builds
/// its own client; a caller-supplied transport is used as is.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}
