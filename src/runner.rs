use anyhow::{Context, Result};
use log::{debug, info};
use tokio::time::Instant;

use crate::archive::Archive;
use crate::config::Config;
use crate::result::ArchiveResult;

/// Which subset of the fetched URLs to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Params,
    Extension(String),
}

impl Filter {
    pub fn apply(&self, result: &ArchiveResult) -> ArchiveResult {
        match self {
            Filter::All => result.clone(),
            Filter::Params => result.has_params(),
            Filter::Extension(ext) => result.filter_by_extension(ext),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    pub archive: Config,
    pub filter: Filter,
    pub json: bool,
    pub verbose: bool,
}

pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Runner { config }
    }

    /// Look up `domain` once and render the filtered URLs.
    ///
    /// Returns one line per URL, or a single JSON document when `json` is set.
    pub async fn run(&self, domain: &str) -> Result<Vec<String>> {
        let start = Instant::now();

        let archive = Archive::with_config(domain, &self.config.archive, None)
            .context("Failed to set up web archive client")?;
        debug!("Request URL: {}", archive.request_url());

        let result = archive
            .fetch_urls()
            .await
            .with_context(|| format!("Failed to fetch archived urls for {}", domain))?;
        let filtered = self.config.filter.apply(&result);

        if self.config.verbose {
            info!(
                "[+] {} archived urls, {} after filtering, in {:?}",
                result.len(),
                filtered.len(),
                start.elapsed()
            );
        }

        if self.config.json {
            let bytes = filtered
                .format_as_json()
                .context("Failed to encode urls as JSON")?;
            let json = String::from_utf8(bytes).context("JSON output is not UTF-8")?;
            Ok(vec![json])
        } else {
            Ok(filtered.iter().map(ToString::to_string).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_url::ParsedUrl;

    #[test]
    fn filters_dispatch_to_result() {
        let result: ArchiveResult = [
            "https://example.com/a.pdf?x=1",
            "https://example.com/b.pdf",
            "https://example.com/c?y=2",
        ]
        .iter()
        .filter_map(|u| ParsedUrl::parse(u))
        .collect();

        assert_eq!(Filter::All.apply(&result).len(), 3);
        assert_eq!(Filter::Params.apply(&result).len(), 2);
        assert_eq!(Filter::Extension(".pdf".to_string()).apply(&result).len(), 1);
    }
}
