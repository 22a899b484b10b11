use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::core::error::EngineError;
use crate::core::rank::classify;

/// Opaque player identifier
///
/// Rosters in the wild carry both numeric and string ids, so either is
/// accepted on input. Ids are always emitted as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawPlayerId", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<PlayerId> for String {
    fn from(value: PlayerId) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlayerId {
    Text(String),
    Number(i64),
}

impl From<RawPlayerId> for PlayerId {
    fn from(value: RawPlayerId) -> Self {
        match value {
            RawPlayerId::Text(s) => PlayerId(s),
            RawPlayerId::Number(n) => PlayerId(n.to_string()),
        }
    }
}

/// Coarse skill bucket, ordered from most to least skilled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

impl Tier {
    /// Dealing order used by the partitioner
    pub const ALL: [Tier; 4] = [Tier::A, Tier::B, Tier::C, Tier::D];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        };
        f.write_str(label)
    }
}

/// A player eligible for pairing
///
/// The tier is derived from the handicap when the player is built and
/// cannot drift from it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    id: PlayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    handicap: f64,
    tier: Tier,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, handicap: f64) -> Result<Self, EngineError> {
        let tier = classify(handicap)?;
        Ok(Self {
            id: id.into(),
            name: None,
            handicap,
            tier,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn handicap(&self) -> f64 {
        self.handicap
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }
}

/// One historical grouping outcome
///
/// Fields the pairing model does not use (event date, tee time, sign-up
/// list) are carried in `extra` so a store can write them back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PastEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub teams: Vec<Vec<PlayerId>>,
    #[serde(rename = "recordedAt", default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PastEvent {
    pub fn new(teams: Vec<Vec<PlayerId>>) -> Self {
        Self {
            id: None,
            teams,
            recorded_at: None,
            extra: Map::new(),
        }
    }

    /// Stamp the event with a fresh id and the current time
    pub fn stamped(mut self) -> Self {
        self.id = Some(uuid::Uuid::new_v4().to_string());
        self.recorded_at = Some(chrono::Utc::now());
        self
    }
}

/// Roster record as kept by a league store
///
/// Handicap is optional here; stores fill in their configured default
/// before building a [`Player`]. Contact details and other bookkeeping
/// fields live in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handicap: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RosterEntry {
    pub fn new(id: impl Into<PlayerId>, handicap: Option<f64>) -> Self {
        Self {
            id: id.into(),
            name: None,
            handicap,
            extra: Map::new(),
        }
    }

    /// Build the pairing view of this record
    pub fn to_player(&self, default_handicap: f64) -> Result<Player, EngineError> {
        let player = Player::new(self.id.clone(), self.handicap.unwrap_or(default_handicap))?;
        Ok(match &self.name {
            Some(name) => player.with_name(name.clone()),
            None => player,
        })
    }
}
