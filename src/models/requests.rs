use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::PlayerId;

/// Request to form teams for a pairing round
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PairingRequest {
    #[serde(alias = "player_ids", rename = "playerIds")]
    pub player_ids: Vec<PlayerId>,
    #[validate(range(min = 1, max = 16))]
    #[serde(alias = "team_size", rename = "teamSize", default)]
    pub team_size: Option<usize>,
    #[validate(range(min = 1, max = 10000))]
    #[serde(default)]
    pub iterations: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PairingRequest {
    /// Requested ids with duplicates collapsed, first occurrence wins
    pub fn unique_player_ids(&self) -> Vec<PlayerId> {
        let mut seen = std::collections::HashSet::new();
        self.player_ids
            .iter()
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }
}

/// Request to record a finished grouping into the event history
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordEventRequest {
    #[validate(length(min = 1))]
    pub teams: Vec<Vec<PlayerId>>,
}

impl RecordEventRequest {
    /// Every team must be non-empty and no player may appear twice
    pub fn check_teams(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for (index, team) in self.teams.iter().enumerate() {
            if team.is_empty() {
                return Err(format!("team {} is empty", index + 1));
            }
            if let Some(id) = team.iter().find(|id| !seen.insert(*id)) {
                return Err(format!("player {} appears more than once", id));
            }
        }
        Ok(())
    }

    /// Distinct ids across all teams
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut seen = std::collections::HashSet::new();
        self.teams
            .iter()
            .flatten()
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }
}
