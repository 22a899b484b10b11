use thiserror::Error;

/// Errors raised while preparing pairing input
///
/// Once a pairing run starts it cannot fail; these only cover values
/// rejected before the pipeline is entered.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid handicap: {0} is not a finite number")]
    InvalidHandicap(f64),

    #[error("Invalid team size: {0}")]
    InvalidTeamSize(usize),
}
