use crate::model::SearchMode;

/// In-band token that switches a query from bookmarks to history.
pub const HISTORY_FLAG: &str = "-h";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub raw_term: String,
    pub history_flag: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    Top,
    Filtered(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIntent {
    pub mode: SearchMode,
    pub scope: SearchScope,
}

impl SearchRequest {
    pub fn mode(&self) -> SearchMode {
        if self.history_flag {
            SearchMode::History
        } else {
            SearchMode::Bookmarks
        }
    }

    pub fn intent(&self) -> SearchIntent {
        let term = self.raw_term.trim();
        let scope = if term.is_empty() {
            SearchScope::Top
        } else {
            SearchScope::Filtered(term.to_string())
        };
        SearchIntent {
            mode: self.mode(),
            scope,
        }
    }
}

/// Splits what the host handed over into a search term and the history flag.
///
/// `action_parameters` are the host's whitespace-split tokens of the typed
/// text after the plugin keyword; `raw_remainder` is that same text joined.
/// Only the first parameter is inspected for the flag.
pub fn classify(raw_remainder: &str, action_parameters: &[String]) -> SearchRequest {
    let history_flag = action_parameters
        .first()
        .is_some_and(|first| first.as_str() == HISTORY_FLAG);

    let working = raw_remainder.trim_start();
    let raw_term = if history_flag {
        working
            .strip_prefix(HISTORY_FLAG)
            .unwrap_or(working)
            .trim_start()
            .to_string()
    } else {
        working.to_string()
    };

    SearchRequest {
        raw_term,
        history_flag,
    }
}
