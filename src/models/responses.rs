use serde::{Deserialize, Serialize};
use crate::models::domain::Player;

/// Response for the pairings endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PairingResponse {
    pub teams: Vec<Vec<Player>>,
    pub score: u64,
    #[serde(rename = "initialScore")]
    pub initial_score: u64,
    pub improvements: usize,
    pub seed: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Record event response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEventResponse {
    pub success: bool,
    #[serde(rename = "eventId")]
    pub event_id: String,
}
