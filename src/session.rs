//! The search session value
//!
//! One session exists per application run. It is owned by the caller and
//! passed into every controller operation, then serialized wholesale by the
//! persistence bridge so a new run picks up where the last one stopped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Artwork, FilterSet};

/// Accumulated state of one search session: filters, pagination cursor,
/// loaded artworks, flags, and saved scroll offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSession {
    #[serde(default)]
    pub filters: FilterSet,
    /// 1-based page counter of the most recently fetched page.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Ordered, displayable, deduplicated artworks loaded so far.
    #[serde(default)]
    pub artworks: Vec<Artwork>,
    /// Sole mutual-exclusion flag between search and load_more.
    #[serde(default)]
    pub loading: bool,
    #[serde(default)]
    pub end_of_results: bool,
    /// Navigation key -> saved scroll offset, for restoring list position.
    #[serde(default)]
    pub scroll_positions: HashMap<String, f64>,
    /// Normalized filters of the last completed search; backs the
    /// "should this search fetch at all" guard.
    #[serde(default)]
    pub last_searched: Option<FilterSet>,
    /// Set by the session store on save.
    #[serde(default)]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_page() -> u32 {
    1
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            filters: FilterSet::default(),
            page: 1,
            artworks: Vec::new(),
            loading: false,
            end_of_results: false,
            scroll_positions: HashMap::new(),
            last_searched: None,
            saved_at: None,
        }
    }
}

impl SearchSession {
    /// Whether an artwork with this object number is already loaded.
    pub fn contains(&self, object_number: &str) -> bool {
        self.artworks
            .iter()
            .any(|artwork| artwork.object_number == object_number)
    }

    /// Drop accumulated results and rewind pagination; filters are untouched.
    pub fn clear_results(&mut self) {
        self.artworks.clear();
        self.page = 1;
        self.end_of_results = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_starts_at_page_one() {
        let session = SearchSession::default();
        assert_eq!(session.page, 1);
        assert!(session.artworks.is_empty());
        assert!(!session.loading);
        assert!(!session.end_of_results);
        assert!(session.last_searched.is_none());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        // Older persisted sessions may predate newer fields.
        let session: SearchSession = serde_json::from_str("{}").unwrap();
        assert_eq!(session.page, 1);
        assert!(session.scroll_positions.is_empty());
        assert!(session.saved_at.is_none());
    }

    #[test]
    fn clear_results_keeps_filters() {
        let mut session = SearchSession {
            filters: FilterSet {
                query: "vermeer".to_string(),
                ..FilterSet::default()
            },
            page: 4,
            end_of_results: true,
            artworks: vec![Artwork {
                object_number: "SK-A-2344".to_string(),
                ..Artwork::default()
            }],
            ..SearchSession::default()
        };
        session.clear_results();
        assert!(session.artworks.is_empty());
        assert_eq!(session.page, 1);
        assert!(!session.end_of_results);
        assert_eq!(session.filters.query, "vermeer");
    }
}
