use serde::{Deserialize, Serialize};

/// Inclusive, 1-indexed line range into a documentation body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRange {
    pub start_line: usize,
    pub end_line: usize,
}

/// Response block pointer. Only the end line is needed for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<usize>,
    pub end_line: usize,
}

/// Where an endpoint lives inside its source's documentation body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub request: LineRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseRange>,
}

impl Location {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            request: LineRange {
                start_line,
                end_line,
            },
            response: None,
        }
    }

    pub fn with_response_end(mut self, end_line: usize) -> Self {
        self.response = Some(ResponseRange {
            start_line: None,
            end_line,
        });
        self
    }

    /// `(start, end)` of the documented block: the response end when present,
    /// otherwise the request end.
    pub fn span(&self) -> (usize, usize) {
        let end = self
            .response
            .map(|r| r.end_line)
            .unwrap_or(self.request.end_line);
        (self.request.start_line, end)
    }
}

/// One documented endpoint or webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable identifier. Filled with `endpoint_<index>` at load time when absent.
    #[serde(default)]
    pub id: String,
    /// Documentation partition (`native`, `custom`, ...). Also the directory name of
    /// the source's map and body.
    pub source: String,
    #[serde(default)]
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
        summary: impl Into<String>,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            category: category.into(),
            name: name.into(),
            summary: summary.into(),
            keywords,
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Keywords joined by a single space, as scored by the textual ranker.
    pub fn keywords_text(&self) -> String {
        self.keywords.join(" ")
    }
}

/// Catalog document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    #[serde(default)]
    pub total_entries: usize,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
