use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::core::EngineError;
use crate::models::{PastEvent, Player, PlayerId, RosterEntry};

/// Errors that can occur when reading or writing league data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown player ids: {}", format_ids(.0))]
    UnknownPlayers(Vec<PlayerId>),

    #[error("Invalid roster record for {id}: {source}")]
    InvalidRecord {
        id: PlayerId,
        #[source]
        source: EngineError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

fn format_ids(ids: &[PlayerId]) -> String {
    ids.iter().map(PlayerId::as_str).collect::<Vec<_>>().join(", ")
}

/// Source of roster and event-history snapshots for pairing requests
///
/// Each call returns a consistent snapshot; nothing handed out is shared
/// with the store afterwards.
pub trait LeagueStore: Send + Sync {
    /// Players for the given ids, in request order
    ///
    /// Fails with [`StoreError::UnknownPlayers`] when any id is missing
    /// from the roster.
    fn fetch_players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, StoreError>;

    /// Every recorded grouping, oldest first
    fn fetch_past_events(&self) -> Result<Vec<PastEvent>, StoreError>;

    /// The whole roster
    fn list_players(&self) -> Result<Vec<Player>, StoreError>;

    /// Append a grouping to the event history
    fn record_event(&self, event: PastEvent) -> Result<(), StoreError>;
}

/// Serialized league state shared by the store adapters
///
/// Top-level keys other than `players` and `events` are kept in `extra`
/// and written back as read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueData {
    #[serde(default)]
    pub players: Vec<RosterEntry>,
    #[serde(default)]
    pub events: Vec<PastEvent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LeagueData {
    pub fn resolve_players(&self, ids: &[PlayerId], default_handicap: f64) -> Result<Vec<Player>, StoreError> {
        let by_id: HashMap<&PlayerId, &RosterEntry> =
            self.players.iter().map(|entry| (&entry.id, entry)).collect();

        let unknown: Vec<PlayerId> = ids
            .iter()
            .filter(|id| !by_id.contains_key(id))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(StoreError::UnknownPlayers(unknown));
        }

        ids.iter()
            .filter_map(|id| by_id.get(id))
            .map(|entry| to_player(entry, default_handicap))
            .collect()
    }

    pub fn all_players(&self, default_handicap: f64) -> Result<Vec<Player>, StoreError> {
        self.players
            .iter()
            .map(|entry| to_player(entry, default_handicap))
            .collect()
    }
}

fn to_player(entry: &RosterEntry, default_handicap: f64) -> Result<Player, StoreError> {
    entry
        .to_player(default_handicap)
        .map_err(|source| StoreError::InvalidRecord {
            id: entry.id.clone(),
            source,
        })
}
