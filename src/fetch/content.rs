//! Raw fetch output and source kind detection.

use url::Url;

/// How a source's body should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// JSON API endpoint.
    Structured,
    /// HTML product page.
    Text,
}

impl SourceKind {
    /// Classifies a source locator.
    ///
    /// A path with an `/api/` segment or a `.json` suffix marks a JSON
    /// endpoint; everything else is treated as an HTML page. Query strings and
    /// fragments are ignored.
    #[must_use]
    pub fn of(locator: &str) -> Self {
        let path = match Url::parse(locator) {
            Ok(url) => url.path().to_string(),
            Err(_) => locator
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        if path.contains("/api/") || path.ends_with("/api") || path.ends_with(".json") {
            Self::Structured
        } else {
            Self::Text
        }
    }
}

/// Body of a successful fetch, owned by the pipeline step that requested it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawContent {
    /// HTML (or other text) page body.
    Text(String),
    /// Decoded JSON body.
    Structured(serde_json::Value),
}

impl RawContent {
    /// Kind of source this content came from.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Text(_) => SourceKind::Text,
            Self::Structured(_) => SourceKind::Structured,
        }
    }

    /// True when there is nothing to parse.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(body) => body.trim().is_empty(),
            Self::Structured(value) => match value {
                serde_json::Value::Null => true,
                serde_json::Value::Object(map) => map.is_empty(),
                serde_json::Value::Array(items) => items.is_empty(),
                _ => false,
            },
        }
    }
}
