use std::collections::HashMap;

use crate::models::{PastEvent, PlayerId};

/// Unordered pair of two distinct players
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    low: PlayerId,
    high: PlayerId,
}

impl PairKey {
    /// Build the canonical key for two players; `None` when they are the same
    pub fn new(a: &PlayerId, b: &PlayerId) -> Option<Self> {
        match a.cmp(b) {
            std::cmp::Ordering::Less => Some(Self { low: a.clone(), high: b.clone() }),
            std::cmp::Ordering::Greater => Some(Self { low: b.clone(), high: a.clone() }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// How often each pair of players has already shared a team
///
/// Built once per pairing request and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PairHistory {
    counts: HashMap<PairKey, u32>,
}

impl PairHistory {
    /// Co-occurrence count for two players, 0 when never grouped
    pub fn count(&self, a: &PlayerId, b: &PlayerId) -> u32 {
        PairKey::new(a, b)
            .and_then(|key| self.counts.get(&key).copied())
            .unwrap_or(0)
    }

    /// Number of distinct pairs with at least one co-occurrence
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, u32)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }
}

/// Count every within-team pair across all past events
pub fn build_history(past_events: &[PastEvent]) -> PairHistory {
    let mut counts: HashMap<PairKey, u32> = HashMap::new();

    for team in past_events.iter().flat_map(|event| event.teams.iter()) {
        for (i, a) in team.iter().enumerate() {
            for b in &team[i + 1..] {
                if let Some(key) = PairKey::new(a, b) {
                    *counts.entry(key).or_insert(0) += 1;
                }
            }
        }
    }

    tracing::debug!(
        "Built pair history from {} events ({} distinct pairs)",
        past_events.len(),
        counts.len()
    );

    PairHistory { counts }
}
