use serde::{Deserialize, Serialize};

/// Upper bound on rows returned for a single query.
pub const MAX_RESULTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Bookmarks,
    History,
}

/// Raw row as read from `moz_places`. `url` is optional here only so a
/// schema violation can be reported instead of panicking in the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRow {
    pub url: Option<String>,
    pub title: Option<String>,
    pub visit_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub title: String,
    pub url: String,
}

impl Place {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}
