use log::debug;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parsed_url::ParsedUrl;
use crate::result::ArchiveResult;

pub mod transport;

pub use self::transport::{create_client, Response, Transport};

/// Wayback Machine lookup for a single domain or URL prefix.
///
/// Holds only construction-time settings, so one instance can be shared
/// across tasks and every [`fetch_urls`](Archive::fetch_urls) call is
/// independent of the previous ones.
#[derive(Clone)]
pub struct Archive {
    query: String,
    endpoint: Url,
    transport: Arc<dyn Transport>,
}

impl Archive {
    /// Create an archive lookup against the public CDX endpoint.
    ///
    /// The query is passed through untouched. Without a transport a
    /// `reqwest` client with a 10 second timeout is built for this instance.
    pub fn new(query: impl Into<String>, transport: Option<Arc<dyn Transport>>) -> Result<Self> {
        Self::with_config(query, &Config::default(), transport)
    }

    pub fn with_config(
        query: impl Into<String>,
        config: &Config,
        transport: Option<Arc<dyn Transport>>,
    ) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|source| Error::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            source,
        })?;

        let transport = match transport {
            Some(transport) => transport,
            None => Arc::new(create_client(config)?),
        };

        Ok(Self {
            query: query.into(),
            endpoint,
            transport,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The exact index request issued by [`fetch_urls`](Archive::fetch_urls).
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("url", &format!("{}/*", self.query))
            .append_pair("output", "txt")
            .append_pair("collapse", "urlkey")
            .append_pair("fl", "original")
            .append_pair("page", "/");
        url
    }

    /// Fetch every archived URL under the query.
    ///
    /// Issues exactly one request. The body is parsed whatever the status
    /// code; an error page simply yields no valid lines.
    pub async fn fetch_urls(&self) -> Result<ArchiveResult> {
        let start_time = Instant::now();
        let url = self.request_url();

        debug!("Querying web archive for: {}", self.query);

        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            debug!(
                "Web archive returned status {} for {}, parsing body anyway",
                response.status, self.query
            );
        }

        let result = parse_body(&response.body);

        debug!(
            "Web archive finished: {} urls for {} in {:?}",
            result.len(),
            self.query,
            start_time.elapsed()
        );
        Ok(result)
    }
}

impl fmt::Debug for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archive")
            .field("query", &self.query)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

/// Parse a newline-delimited index body, keeping valid absolute URLs in order.
pub fn parse_body(body: &str) -> ArchiveResult {
    body.lines()
        .filter(|line| !line.is_empty())
        .filter_map(ParsedUrl::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Fixed(&'static str);

    #[async_trait]
    impl Transport for Fixed {
        async fn get(&self, _url: &Url) -> Result<Response> {
            Ok(Response {
                status: 200,
                body: self.0.to_string(),
            })
        }
    }

    fn archive(query: &str, body: &'static str) -> Archive {
        Archive::new(query, Some(Arc::new(Fixed(body)))).unwrap()
    }

    #[test]
    fn request_url_carries_fixed_parameters() {
        let url = archive("example.com", "").request_url();
        assert_eq!(url.host_str(), Some("web.archive.org"));
        assert_eq!(url.path(), "/cdx/search/cdx");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("url".to_string(), "example.com/*".to_string()),
                ("output".to_string(), "txt".to_string()),
                ("collapse".to_string(), "urlkey".to_string()),
                ("fl".to_string(), "original".to_string()),
                ("page".to_string(), "/".to_string()),
            ]
        );
    }

    #[test]
    fn empty_query_is_passed_through() {
        let archive = archive("", "");
        assert_eq!(archive.query(), "");
        let url = archive.request_url();
        assert!(url.query_pairs().any(|(k, v)| k == "url" && v == "/*"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let config = Config {
            endpoint: "not an endpoint".to_string(),
            ..Config::default()
        };
        let err = Archive::with_config("example.com", &config, Some(Arc::new(Fixed("")))).unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint { .. }));
    }

    #[test]
    fn parse_body_drops_invalid_lines() {
        let result = parse_body(
            "https://example.com/a\n\nnot a url\n/relative\r\nhttps://example.com/b?x=1\r\n",
        );
        let urls: Vec<String> = result.iter().map(ToString::to_string).collect();
        assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b?x=1"]);
    }

    #[test]
    fn parse_body_of_garbage_is_empty() {
        assert!(parse_body("").is_empty());
        assert!(parse_body("\n\n\n").is_empty());
        assert!(parse_body("<html>\n<body>503</body>\n</html>").is_empty());
    }

    #[tokio::test]
    async fn fetch_preserves_response_order() {
        let archive = archive(
            "example.com",
            "https://example.com/z\nhttps://example.com/a\nhttps://example.com/m\n",
        );
        let result = archive.fetch_urls().await.unwrap();
        let paths: Vec<&str> = result.iter().map(ParsedUrl::path).collect();
        assert_eq!(paths, vec!["/z", "/a", "/m"]);
    }
}
