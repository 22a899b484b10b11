use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::core::error::EngineError;
use crate::models::{PastEvent, Player, Tier};

/// Default number of players per team (a golf foursome)
pub const DEFAULT_TEAM_SIZE: usize = 4;

pub type Team = Vec<Player>;

/// Assignment of every eligible player to exactly one team
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Partition {
    teams: Vec<Team>,
}

impl Partition {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Slice an ordered player list into consecutive teams of the given sizes
    ///
    /// `sizes` must sum to `players.len()`.
    pub fn from_sizes(players: Vec<Player>, sizes: &[usize]) -> Self {
        debug_assert_eq!(sizes.iter().sum::<usize>(), players.len());

        let mut remaining = players.into_iter();
        let teams = sizes
            .iter()
            .map(|&size| remaining.by_ref().take(size).collect())
            .collect();

        Self { teams }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn into_teams(self) -> Vec<Team> {
        self.teams
    }

    pub fn team_sizes(&self) -> Vec<usize> {
        self.teams.iter().map(Vec::len).collect()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn player_count(&self) -> usize {
        self.teams.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Every player, team by team
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.teams.iter().flatten()
    }

    /// Record this grouping as an event for future history lookups
    pub fn to_past_event(&self) -> PastEvent {
        PastEvent::new(
            self.teams
                .iter()
                .map(|team| team.iter().map(|p| p.id().clone()).collect())
                .collect(),
        )
    }
}

/// Number of teams needed for `player_count` players at the target size
pub fn team_count_for(player_count: usize, team_size: usize) -> usize {
    if player_count == 0 {
        return 0;
    }
    player_count.div_ceil(team_size).max(1)
}

/// Builds the skill-balanced starting partition
///
/// Players are bucketed by tier, each bucket is shuffled independently,
/// and buckets are dealt A to D round-robin across the teams. The dealing
/// position carries over from one tier to the next so team sizes never
/// differ by more than one.
#[derive(Debug, Clone, Copy)]
pub struct TierStratifiedPartitioner {
    team_size: usize,
}

impl TierStratifiedPartitioner {
    pub fn new(team_size: usize) -> Result<Self, EngineError> {
        if team_size == 0 {
            return Err(EngineError::InvalidTeamSize(team_size));
        }
        Ok(Self { team_size })
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    pub fn initial_partition<R: Rng + ?Sized>(&self, players: Vec<Player>, rng: &mut R) -> Partition {
        let team_count = team_count_for(players.len(), self.team_size);
        if team_count == 0 {
            return Partition::default();
        }

        let mut by_tier: [Vec<Player>; 4] = Default::default();
        for player in players {
            by_tier[player.tier().index()].push(player);
        }

        let mut teams: Vec<Team> = vec![Vec::new(); team_count];
        let mut cursor = 0;

        for tier in Tier::ALL {
            let bucket = &mut by_tier[tier.index()];
            bucket.shuffle(rng);

            for player in bucket.drain(..) {
                teams[cursor % team_count].push(player);
                cursor += 1;
            }
        }

        tracing::debug!(
            "Initial partition: {} players into {} teams of target size {}",
            cursor,
            team_count,
            self.team_size
        );

        Partition { teams }
    }
}

impl Default for TierStratifiedPartitioner {
    fn default() -> Self {
        Self { team_size: DEFAULT_TEAM_SIZE }
    }
}
