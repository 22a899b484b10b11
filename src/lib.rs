//! League Pairing - team formation service for golf league scrambles
//!
//! This library provides the pairing engine used to split a league's
//! players into teams. Skill tiers are spread evenly across teams and
//! players who have already shared a team are kept apart where possible.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_history, classify, PairingEngine, Partition, PairHistory};
pub use models::{PairingRequest, PairingResponse, PastEvent, Player, PlayerId, Tier};
pub use services::{FileStore, LeagueStore, MemoryStore};
