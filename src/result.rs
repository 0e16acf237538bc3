use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parsed_url::ParsedUrl;

/// URLs returned by one archive lookup, in index order.
///
/// Filters build new results and leave the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveResult {
    urls: Vec<ParsedUrl>,
}

impl ArchiveResult {
    pub fn new(urls: Vec<ParsedUrl>) -> Self {
        Self { urls }
    }

    pub fn urls(&self) -> &[ParsedUrl] {
        &self.urls
    }

    pub fn into_urls(self) -> Vec<ParsedUrl> {
        self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParsedUrl> {
        self.urls.iter()
    }

    /// URLs carrying a non-empty query string.
    ///
    /// Never fails, so the result is returned without a `Result` wrapper.
    pub fn has_params(&self) -> ArchiveResult {
        self.select(ParsedUrl::has_params)
    }

    /// URLs carrying a non-empty query string whose path ends in `ext`.
    ///
    /// `ext` includes the dot and is compared case-sensitively. URLs with a
    /// matching extension but no query string are excluded; this mirrors the
    /// established behaviour of the tool and is kept until the intended
    /// semantics are confirmed.
    ///
    /// `ext` is not validated: a value without a dot simply matches nothing.
    pub fn filter_by_extension(&self, ext: &str) -> ArchiveResult {
        self.select(|url| url.has_params() && url.extension() == ext)
    }

    /// Encode as `{"urls": [...]}` with one component object per URL.
    pub fn format_as_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn select(&self, keep: impl Fn(&ParsedUrl) -> bool) -> ArchiveResult {
        self.urls.iter().filter(|url| keep(url)).cloned().collect()
    }
}

impl From<Vec<ParsedUrl>> for ArchiveResult {
    fn from(urls: Vec<ParsedUrl>) -> Self {
        Self::new(urls)
    }
}

impl FromIterator<ParsedUrl> for ArchiveResult {
    fn from_iter<I: IntoIterator<Item = ParsedUrl>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ArchiveResult {
    type Item = ParsedUrl;
    type IntoIter = std::vec::IntoIter<ParsedUrl>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArchiveResult {
    type Item = &'a ParsedUrl;
    type IntoIter = std::slice::Iter<'a, ParsedUrl>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}
