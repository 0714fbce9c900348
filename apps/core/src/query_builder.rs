use crate::model::SearchMode;
use crate::query_dsl::{SearchIntent, SearchRequest, SearchScope};

/// Name of the bound parameter carrying the user's search term.
pub const TERM_PARAM: &str = ":term";

// The term is only ever bound through TERM_PARAM. `instr(lower(..))` gives a
// literal, case-insensitive substring match without LIKE wildcard escaping.
const BOOKMARKS_TOP_SQL: &str = "SELECT p.url, p.title, p.visit_count
     FROM moz_places p
     WHERE p.id IN (SELECT bm.fk FROM moz_bookmarks bm WHERE bm.fk NOT NULL)
     ORDER BY p.visit_count DESC
     LIMIT 20";

const BOOKMARKS_FILTERED_SQL: &str = "SELECT p.url, p.title, p.visit_count
     FROM moz_places p
     WHERE p.id IN (SELECT bm.fk FROM moz_bookmarks bm WHERE bm.fk NOT NULL)
       AND (instr(lower(p.url), lower(:term)) > 0
            OR instr(lower(p.title), lower(:term)) > 0)
     ORDER BY p.visit_count DESC
     LIMIT 20";

const HISTORY_TOP_SQL: &str = "SELECT p.url, p.title, p.visit_count
     FROM moz_places p
     ORDER BY p.visit_count DESC
     LIMIT 20";

const HISTORY_FILTERED_SQL: &str = "SELECT p.url, p.title, p.visit_count
     FROM moz_places p
     WHERE instr(lower(p.url), lower(:term)) > 0
        OR instr(lower(p.title), lower(:term)) > 0
     ORDER BY p.visit_count DESC
     LIMIT 20";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTemplate {
    BookmarksTop,
    BookmarksFiltered,
    HistoryTop,
    HistoryFiltered,
}

impl QueryTemplate {
    pub fn sql(self) -> &'static str {
        match self {
            Self::BookmarksTop => BOOKMARKS_TOP_SQL,
            Self::BookmarksFiltered => BOOKMARKS_FILTERED_SQL,
            Self::HistoryTop => HISTORY_TOP_SQL,
            Self::HistoryFiltered => HISTORY_FILTERED_SQL,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::BookmarksTop => "bookmarks-top",
            Self::BookmarksFiltered => "bookmarks-filtered",
            Self::HistoryTop => "history-top",
            Self::HistoryFiltered => "history-filtered",
        }
    }

    pub fn is_filtered(self) -> bool {
        matches!(self, Self::BookmarksFiltered | Self::HistoryFiltered)
    }
}

/// A fixed template plus the value to bind for it. `term` is `Some` exactly
/// when the template is a filtered one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub template: QueryTemplate,
    pub term: Option<String>,
}

pub fn build_query(request: &SearchRequest) -> QuerySpec {
    from_intent(request.intent())
}

pub fn from_intent(intent: SearchIntent) -> QuerySpec {
    match (intent.mode, intent.scope) {
        (SearchMode::Bookmarks, SearchScope::Top) => QuerySpec {
            template: QueryTemplate::BookmarksTop,
            term: None,
        },
        (SearchMode::Bookmarks, SearchScope::Filtered(term)) => QuerySpec {
            template: QueryTemplate::BookmarksFiltered,
            term: Some(term),
        },
        (SearchMode::History, SearchScope::Top) => QuerySpec {
            template: QueryTemplate::HistoryTop,
            term: None,
        },
        (SearchMode::History, SearchScope::Filtered(term)) => QuerySpec {
            template: QueryTemplate::HistoryFiltered,
            term: Some(term),
        },
    }
}
