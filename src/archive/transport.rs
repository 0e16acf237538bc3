use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

/// Status and fully drained body of an index response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes the single GET an archive lookup needs.
///
/// Implementations must be safe to share between tasks. Failures before
/// headers arrive map to [`Error::Request`], failures while reading the
/// body map to [`Error::BodyRead`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Response>;
}

#[async_trait]
impl Transport for Client {
    async fn get(&self, url: &Url) -> Result<Response> {
        let response = Client::get(self, url.clone())
            .header("Accept", "text/plain")
            .send()
            .await
            .map_err(|e| Error::Request(Box::new(e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::BodyRead(Box::new(e)))?;

        Ok(Response { status, body })
    }
}

/// Creates the HTTP client used when no transport is supplied.
pub fn create_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .use_rustls_tls();

    if let Some(proxy_url) = &config.proxy {
        debug!("Routing archive requests through proxy: {}", proxy_url);
        let proxy = reqwest::Proxy::all(proxy_url).map_err(Error::ClientBuild)?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(Error::ClientBuild)
}
