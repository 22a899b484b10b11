use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::{PastEvent, Player, PlayerId};
use crate::services::store::{LeagueData, LeagueStore, StoreError};

/// Load a league document, treating a missing file as an empty league
pub fn read_league(path: &Path) -> Result<LeagueData, StoreError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("League file {} not found, using empty league", path.display());
            Ok(LeagueData::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// League store backed by a JSON file
///
/// The file holds `{ "players": [...], "events": [...] }`. A missing file
/// reads as an empty league. Every read loads a fresh snapshot; writes go
/// through a temporary file and a rename so readers never see a partial
/// document.
pub struct FileStore {
    path: PathBuf,
    default_handicap: f64,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P, default_handicap: f64) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            default_handicap,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<LeagueData, StoreError> {
        read_league(&self.path)
    }

    fn write(&self, data: &LeagueData) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LeagueStore for FileStore {
    fn fetch_players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, StoreError> {
        self.read()?.resolve_players(ids, self.default_handicap)
    }

    fn fetch_past_events(&self) -> Result<Vec<PastEvent>, StoreError> {
        Ok(self.read()?.events)
    }

    fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        self.read()?.all_players(self.default_handicap)
    }

    fn record_event(&self, event: PastEvent) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;

        let mut data = self.read()?;
        data.events.push(event);
        self.write(&data)?;

        tracing::debug!(
            "Recorded event in {} ({} total)",
            self.path.display(),
            data.events.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("league-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_is_empty_league() {
        let store = FileStore::new(temp_path(), 20.0);
        assert!(store.list_players().unwrap().is_empty());
        assert!(store.fetch_past_events().unwrap().is_empty());
    }

    #[test]
    fn test_reads_roster_and_records_events() {
        let path = temp_path();
        fs::write(
            &path,
            r#"{ "players": [ { "id": 1, "handicap": 3 }, { "id": 2 } ] }"#,
        )
        .unwrap();

        let store = FileStore::new(&path, 20.0);
        let players = store.fetch_players(&["2".into(), "1".into()]).unwrap();
        assert_eq!(players[0].handicap(), 20.0);
        assert_eq!(players[1].handicap(), 3.0);

        store
            .record_event(PastEvent::new(vec![vec!["1".into(), "2".into()]]))
            .unwrap();

        // A second store over the same file sees the persisted event
        let reopened = FileStore::new(&path, 20.0);
        assert_eq!(reopened.fetch_past_events().unwrap().len(), 1);
        assert_eq!(reopened.list_players().unwrap().len(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_recording_keeps_unmodelled_fields() {
        let path = temp_path();
        fs::write(
            &path,
            r#"{
                "players": [
                    { "id": "a1", "name": "John Smith", "email": "john@email.com", "handicap": 12, "totalEvents": 15 }
                ],
                "events": [
                    { "id": "e1", "date": "2024-06-01", "teeTime": "08:00", "signedUp": ["a1"], "teams": [] }
                ]
            }"#,
        )
        .unwrap();

        let store = FileStore::new(&path, 20.0);
        store
            .record_event(PastEvent::new(vec![vec!["a1".into()]]).stamped())
            .unwrap();

        let after: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(after["players"][0]["email"], "john@email.com");
        assert_eq!(after["players"][0]["totalEvents"], 15);
        assert_eq!(after["events"][0]["teeTime"], "08:00");
        assert_eq!(after["events"][0]["signedUp"][0], "a1");
        assert_eq!(after["events"][0]["date"], "2024-06-01");
        assert_eq!(after["events"].as_array().unwrap().len(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_league_missing_file() {
        let data = read_league(&temp_path()).unwrap();
        assert!(data.players.is_empty());
        assert!(data.events.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_path();
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path, 20.0);
        assert!(matches!(store.list_players(), Err(StoreError::Serialization(_))));

        fs::remove_file(&path).unwrap();
    }
}
