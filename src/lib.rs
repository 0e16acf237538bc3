//! Fetch the URLs the Wayback Machine has archived for a domain.
//!
//! An [`Archive`] issues one request to the CDX index, keeps every line that
//! parses as an absolute URL and returns them as an [`ArchiveResult`], which
//! can be filtered or encoded as JSON.
//!
//! ```no_run
//! # async fn run() -> waybackurls::Result<()> {
//! let archive = waybackurls::Archive::new("example.com", None)?;
//! let result = archive.fetch_urls().await?;
//! for url in result.filter_by_extension(".php").iter() {
//!     println!("{url}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod parsed_url;
pub mod result;
pub mod runner;

pub use archive::{create_client, parse_body, Archive, Response, Transport};
pub use config::Config;
pub use error::{BoxError, Error, Result};
pub use parsed_url::ParsedUrl;
pub use result::ArchiveResult;
