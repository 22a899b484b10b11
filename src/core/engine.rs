use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::error::EngineError;
use crate::core::history::build_history;
use crate::core::optimizer::{Optimized, PairingOptimizer, DEFAULT_ITERATIONS};
use crate::core::partition::TierStratifiedPartitioner;
use crate::models::{PastEvent, Player};

/// Main pairing orchestrator
///
/// # Pipeline Stages
/// 1. Pair history aggregation from past events
/// 2. Tier-stratified initial partition
/// 3. Repeat-pairing optimization
///
/// Players arrive already classified (a [`Player`] carries its tier). The
/// engine holds no state between calls and may be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct PairingEngine {
    partitioner: TierStratifiedPartitioner,
    optimizer: PairingOptimizer,
}

impl PairingEngine {
    pub fn new(team_size: usize, iterations: usize) -> Result<Self, EngineError> {
        Ok(Self {
            partitioner: TierStratifiedPartitioner::new(team_size)?,
            optimizer: PairingOptimizer::new(iterations),
        })
    }

    pub fn team_size(&self) -> usize {
        self.partitioner.team_size()
    }

    pub fn iterations(&self) -> usize {
        self.optimizer.iterations()
    }

    /// Form teams for `players`, avoiding pairings seen in `past_events`
    ///
    /// Every shuffle draws from `rng`, so a seeded generator reproduces the
    /// same teams for the same input.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        players: Vec<Player>,
        past_events: &[PastEvent],
        rng: &mut R,
    ) -> Optimized {
        let player_count = players.len();
        let history = build_history(past_events);
        let initial = self.partitioner.initial_partition(players, rng);
        let result = self.optimizer.optimize(initial, &history, rng);

        tracing::debug!(
            "Paired {} players into {} teams (score {}, initial {})",
            player_count,
            result.partition.team_count(),
            result.score,
            result.initial_score
        );

        result
    }

    /// Same as [`generate`](Self::generate) with a generator seeded from `seed`
    pub fn generate_seeded(&self, players: Vec<Player>, past_events: &[PastEvent], seed: u64) -> Optimized {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(players, past_events, &mut rng)
    }
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self {
            partitioner: TierStratifiedPartitioner::default(),
            optimizer: PairingOptimizer::new(DEFAULT_ITERATIONS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::optimizer::score;
    use crate::models::PlayerId;

    fn roster(handicaps: &[f64]) -> Vec<Player> {
        handicaps
            .iter()
            .enumerate()
            .map(|(i, h)| Player::new(format!("P{}", i + 1), *h).unwrap())
            .collect()
    }

    #[test]
    fn test_engine_rejects_zero_team_size() {
        assert!(PairingEngine::new(0, 100).is_err());
    }

    #[test]
    fn test_no_history_scores_zero() {
        let engine = PairingEngine::default();
        let players = roster(&[1.0, 2.0, 7.0, 8.0, 12.0, 13.0, 18.0, 25.0]);

        let result = engine.generate_seeded(players, &[], 17);
        assert_eq!(result.score, 0);
        assert_eq!(result.partition.team_sizes(), vec![4, 4]);
    }

    #[test]
    fn test_full_repeat_foursome_scores_six() {
        let engine = PairingEngine::default();
        let players = roster(&[3.0, 8.0, 12.0, 20.0]);
        let past = vec![PastEvent::new(vec![vec![
            PlayerId::from("P1"),
            PlayerId::from("P2"),
            PlayerId::from("P3"),
            PlayerId::from("P4"),
        ]])];

        let result = engine.generate_seeded(players, &past, 3);
        assert_eq!(result.partition.team_count(), 1);
        assert_eq!(result.score, 6);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let engine = PairingEngine::new(3, 50).unwrap();
        let players = roster(&[1.0, 4.0, 6.0, 9.0, 11.0, 14.0, 17.0, 22.0, 30.0, 2.0]);
        let past = vec![PastEvent::new(vec![
            vec!["P1".into(), "P2".into(), "P3".into()],
            vec!["P4".into(), "P5".into(), "P6".into()],
        ])];

        let a = engine.generate_seeded(players.clone(), &past, 2024);
        let b = engine.generate_seeded(players, &past, 2024);
        assert_eq!(a.partition, b.partition);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_reported_score_matches_partition() {
        let engine = PairingEngine::default();
        let players = roster(&[1.0, 4.0, 6.0, 9.0, 11.0, 14.0, 17.0, 22.0]);
        let past = vec![PastEvent::new(vec![
            vec!["P1".into(), "P2".into(), "P3".into(), "P4".into()],
            vec!["P5".into(), "P6".into(), "P7".into(), "P8".into()],
        ])];

        let result = engine.generate_seeded(players, &past, 8);
        let history = crate::core::history::build_history(&past);
        assert_eq!(result.score, score(&result.partition, &history));
        assert!(result.score <= result.initial_score);
    }
}
