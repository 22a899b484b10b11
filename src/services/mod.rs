// Service exports
pub mod file;
pub mod memory;
pub mod store;

pub use file::{read_league, FileStore};
pub use memory::MemoryStore;
pub use store::{LeagueData, LeagueStore, StoreError};
