use std::sync::RwLock;

use crate::core::DEFAULT_HANDICAP;
use crate::models::{PastEvent, Player, PlayerId};
use crate::services::store::{LeagueData, LeagueStore, StoreError};

/// League store kept entirely in process memory
///
/// Used for tests, demos, and deployments where history does not need to
/// survive a restart.
pub struct MemoryStore {
    data: RwLock<LeagueData>,
    default_handicap: f64,
}

impl MemoryStore {
    pub fn new(data: LeagueData, default_handicap: f64) -> Self {
        Self {
            data: RwLock::new(data),
            default_handicap,
        }
    }

    pub fn empty() -> Self {
        Self::new(LeagueData::default(), DEFAULT_HANDICAP)
    }
}

impl LeagueStore for MemoryStore {
    fn fetch_players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        data.resolve_players(ids, self.default_handicap)
    }

    fn fetch_past_events(&self) -> Result<Vec<PastEvent>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.events.clone())
    }

    fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        data.all_players(self.default_handicap)
    }

    fn record_event(&self, event: PastEvent) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.events.push(event);
        tracing::debug!("Recorded event in memory store ({} total)", data.events.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RosterEntry;

    fn entry(id: &str, handicap: Option<f64>) -> RosterEntry {
        RosterEntry::new(id, handicap)
    }

    #[test]
    fn test_record_and_fetch_events() {
        let store = MemoryStore::empty();
        assert!(store.fetch_past_events().unwrap().is_empty());

        store
            .record_event(PastEvent::new(vec![vec!["1".into(), "2".into()]]))
            .unwrap();

        let events = store.fetch_past_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].teams[0], vec![PlayerId::from("1"), PlayerId::from("2")]);
    }

    #[test]
    fn test_default_handicap_applied() {
        let data = LeagueData {
            players: vec![entry("1", None), entry("2", Some(4.0))],
            ..LeagueData::default()
        };
        let store = MemoryStore::new(data, 14.0);

        let players = store.list_players().unwrap();
        assert_eq!(players[0].handicap(), 14.0);
        assert_eq!(players[1].handicap(), 4.0);
    }

    #[test]
    fn test_fetch_unknown_player_fails() {
        let store = MemoryStore::empty();
        assert!(matches!(
            store.fetch_players(&["x".into()]),
            Err(StoreError::UnknownPlayers(_))
        ));
    }
}
