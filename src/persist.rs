//! Persistence bridge for the search session
//!
//! One JSON file under the state directory holds the whole serialized
//! session. Loading tolerates absent or malformed data by reporting "no
//! saved state" instead of failing the caller.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::session::SearchSession;

/// Well-known file name of the persisted session slot.
pub const SESSION_FILE: &str = "session.json";

/// Directory under the home directory used when no override is given.
const DEFAULT_STATE_DIR: &str = ".rijks-search";

/// Reads and writes the persisted session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    state_dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `custom_state_dir`, or at
    /// `~/.rijks-search` when none is given. Creates the directory.
    pub fn new(custom_state_dir: Option<PathBuf>) -> Result<Self> {
        let state_dir = match custom_state_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or_else(|| {
                    Error::StateDir(io::Error::new(
                        io::ErrorKind::NotFound,
                        "home directory not found",
                    ))
                })?
                .join(DEFAULT_STATE_DIR),
        };

        fs::create_dir_all(&state_dir).map_err(Error::StateDir)?;
        Ok(Self { state_dir })
    }

    pub fn session_path(&self) -> PathBuf {
        self.state_dir.join(SESSION_FILE)
    }

    /// Serialize the session to the well-known slot. Writes a sibling temp
    /// file first and renames it over the slot so a crashed save never
    /// leaves a truncated session behind.
    pub fn save(&self, session: &SearchSession) -> Result<()> {
        let mut snapshot = session.clone();
        snapshot.saved_at = Some(chrono::Utc::now());

        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| Error::Persist(io::Error::other(e)))?;

        let temp_path = self.state_dir.join(format!("{SESSION_FILE}.tmp"));
        fs::write(&temp_path, json).map_err(Error::Persist)?;
        fs::rename(&temp_path, self.session_path()).map_err(Error::Persist)?;

        tracing::debug!("session persisted to {}", self.session_path().display());
        Ok(())
    }

    /// Strict load: absent slot is `Ok(None)`, unreadable or unparsable data
    /// is an error.
    pub fn try_load(&self) -> Result<Option<SearchSession>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(Error::Persist)?;
        let session = serde_json::from_str(&raw).map_err(Error::MalformedPersistedState)?;
        Ok(Some(session))
    }

    /// Lenient load used at startup: any failure counts as "no saved state".
    pub fn load(&self) -> Option<SearchSession> {
        match self.try_load() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("ignoring unusable persisted session: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterSet;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SessionStore {
        SessionStore::new(Some(dir.path().to_path_buf())).unwrap()
    }

    #[test]
    fn save_then_load_round_trips_the_session() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let mut session = SearchSession::default();
        session.filters = FilterSet {
            query: "rembrandt".to_string(),
            material: Some("canvas".to_string()),
            ..FilterSet::default()
        };
        session.page = 3;
        session.end_of_results = true;
        session.scroll_positions.insert("SK-C-5".to_string(), 420.0);

        store.save(&session).unwrap();
        let loaded = store.load().expect("saved session should load");

        assert_eq!(loaded.filters, session.filters);
        assert_eq!(loaded.page, 3);
        assert!(loaded.end_of_results);
        assert_eq!(loaded.scroll_positions.get("SK-C-5"), Some(&420.0));
        assert!(loaded.saved_at.is_some());
    }

    #[test]
    fn absent_slot_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.load().is_none());
        assert!(store.try_load().unwrap().is_none());
    }

    #[test]
    fn malformed_slot_is_treated_as_no_saved_state() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.session_path(), "{ not json at all").unwrap();

        assert!(store.load().is_none());
        let err = store.try_load().unwrap_err();
        assert!(matches!(err, Error::MalformedPersistedState(_)));
    }

    #[test]
    fn save_overwrites_previous_slot() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let mut session = SearchSession::default();
        session.page = 2;
        store.save(&session).unwrap();
        session.page = 5;
        store.save(&session).unwrap();

        assert_eq!(store.load().unwrap().page, 5);
    }
}
