// Core algorithm exports
pub mod engine;
pub mod error;
pub mod history;
pub mod optimizer;
pub mod partition;
pub mod rank;

pub use engine::PairingEngine;
pub use error::EngineError;
pub use history::{build_history, PairHistory, PairKey};
pub use optimizer::{score, Optimized, PairingOptimizer, DEFAULT_ITERATIONS};
pub use partition::{team_count_for, Partition, Team, TierStratifiedPartitioner, DEFAULT_TEAM_SIZE};
pub use rank::{classify, DEFAULT_HANDICAP};
