// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{PastEvent, Player, PlayerId, RosterEntry, Tier};
pub use requests::{PairingRequest, RecordEventRequest};
pub use responses::{ErrorResponse, HealthResponse, PairingResponse, RecordEventResponse};
