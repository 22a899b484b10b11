use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::history::PairHistory;
use crate::core::partition::{Partition, Team};

/// Default number of reshuffles attempted per pairing request
pub const DEFAULT_ITERATIONS: usize = 100;

/// Historical repeat-pairing penalty of a single team
pub fn team_score(team: &Team, history: &PairHistory) -> u64 {
    let mut score = 0u64;
    for (i, a) in team.iter().enumerate() {
        for b in &team[i + 1..] {
            score += u64::from(history.count(a.id(), b.id()));
        }
    }
    score
}

/// Sum of repeat-pairing penalties over every team; lower is better
pub fn score(partition: &Partition, history: &PairHistory) -> u64 {
    partition
        .teams()
        .iter()
        .map(|team| team_score(team, history))
        .sum()
}

/// Best partition found by a search run
#[derive(Debug, Clone)]
pub struct Optimized {
    pub partition: Partition,
    pub score: u64,
    pub initial_score: u64,
    pub improvements: usize,
}

/// Randomized hill climb over team membership
///
/// Each iteration reshuffles every player into teams of the current sizes
/// and keeps the result only when it strictly lowers the score. Team sizes
/// never change and a worse or equal candidate is never accepted.
#[derive(Debug, Clone, Copy)]
pub struct PairingOptimizer {
    iterations: usize,
}

impl PairingOptimizer {
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn optimize<R: Rng + ?Sized>(
        &self,
        initial: Partition,
        history: &PairHistory,
        rng: &mut R,
    ) -> Optimized {
        let initial_score = score(&initial, history);
        let mut best = initial;
        let mut best_score = initial_score;
        let mut improvements = 0;

        // A single team (or none) has no alternative arrangement
        if best.team_count() < 2 {
            return Optimized {
                partition: best,
                score: best_score,
                initial_score,
                improvements,
            };
        }

        let sizes = best.team_sizes();

        for iteration in 0..self.iterations {
            if best_score == 0 {
                break;
            }

            let mut pool: Vec<_> = best.players().cloned().collect();
            pool.shuffle(rng);

            let candidate = Partition::from_sizes(pool, &sizes);
            let candidate_score = score(&candidate, history);

            if candidate_score < best_score {
                tracing::trace!(
                    "Iteration {}: score improved {} -> {}",
                    iteration,
                    best_score,
                    candidate_score
                );
                best = candidate;
                best_score = candidate_score;
                improvements += 1;
            }
        }

        tracing::debug!(
            "Optimizer finished: score {} -> {} after {} improvements",
            initial_score,
            best_score,
            improvements
        );

        Optimized {
            partition: best,
            score: best_score,
            initial_score,
            improvements,
        }
    }
}

impl Default for PairingOptimizer {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}
