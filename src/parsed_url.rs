use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use url::Url;

/// An absolute URL recovered from one line of index output.
///
/// Serializes as an object of its components rather than a string, so
/// consumers can read `host`, `path` or `raw_query` without reparsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "UrlParts", try_from = "UrlParts")]
pub struct ParsedUrl(Url);

impl ParsedUrl {
    /// Parse a single line as an absolute URL.
    ///
    /// Relative references and free text yield `None`; callers drop those
    /// lines without reporting them. Lines with leading whitespace or any
    /// ASCII control character are rejected rather than trimmed.
    pub fn parse(line: &str) -> Option<Self> {
        if line.starts_with(|c: char| c.is_ascii_whitespace())
            || line.bytes().any(|b| b.is_ascii_control())
        {
            return None;
        }
        Url::parse(line).ok().map(Self)
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Path as it appears in the URL, still percent-encoded.
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// Query string without the leading `?`. Empty when there is none.
    pub fn raw_query(&self) -> &str {
        self.0.query().unwrap_or("")
    }

    pub fn has_params(&self) -> bool {
        !self.raw_query().is_empty()
    }

    /// Extension of the last path segment including the dot (`".pdf"`),
    /// or an empty string. Matching is done on the percent-decoded path;
    /// bytes that are not UTF-8 after decoding become U+FFFD.
    pub fn extension(&self) -> String {
        let decoded = urlencoding::decode_binary(self.0.path().as_bytes());
        path_extension(&String::from_utf8_lossy(&decoded)).to_owned()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl From<Url> for ParsedUrl {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

fn path_extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rfind('.').map_or("", |idx| &name[idx..])
}

/// Wire shape of a [`ParsedUrl`].
///
/// `path`, `raw_query` and `fragment` carry the percent-encoded form, exactly
/// as serialized by the URL, so decoding never has to re-escape anything.
#[derive(Debug, Serialize, Deserialize)]
struct UrlParts {
    scheme: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    path: String,
    #[serde(default)]
    raw_query: String,
    #[serde(default)]
    fragment: Option<String>,
}

impl From<ParsedUrl> for UrlParts {
    fn from(parsed: ParsedUrl) -> Self {
        let url = parsed.0;
        Self {
            scheme: url.scheme().to_string(),
            username: url.username().to_string(),
            password: url.password().map(str::to_string),
            host: url.host_str().map(str::to_string),
            port: url.port(),
            path: url.path().to_string(),
            raw_query: url.query().unwrap_or("").to_string(),
            fragment: url.fragment().map(str::to_string),
        }
    }
}

impl TryFrom<UrlParts> for ParsedUrl {
    type Error = url::ParseError;

    fn try_from(parts: UrlParts) -> Result<Self, Self::Error> {
        let mut raw = format!("{}:", parts.scheme);
        if parts.host.is_some() || parts.path.starts_with('/') {
            raw.push_str("//");
            if !parts.username.is_empty() || parts.password.is_some() {
                raw.push_str(&parts.username);
                if let Some(password) = &parts.password {
                    raw.push(':');
                    raw.push_str(password);
                }
                raw.push('@');
            }
            if let Some(host) = &parts.host {
                raw.push_str(host);
            }
            if let Some(port) = parts.port {
                // Writing to a String cannot fail.
                let _ = write!(raw, ":{port}");
            }
        }
        raw.push_str(&parts.path);
        if !parts.raw_query.is_empty() {
            raw.push('?');
            raw.push_str(&parts.raw_query);
        }
        if let Some(fragment) = &parts.fragment {
            raw.push('#');
            raw.push_str(fragment);
        }
        Url::parse(&raw).map(Self)
    }
}
