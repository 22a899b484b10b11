use crate::core::error::EngineError;
use crate::models::Tier;

/// Upper handicap bound (inclusive) for each tier but the last
const TIER_A_MAX: f64 = 5.0;
const TIER_B_MAX: f64 = 10.0;
const TIER_C_MAX: f64 = 15.0;

/// Handicap assumed for players whose roster entry has none
pub const DEFAULT_HANDICAP: f64 = 20.0;

/// Map a handicap to its skill tier
///
/// Lower handicaps are stronger players. The caller must resolve missing
/// handicaps first; non-finite values are rejected.
#[inline]
pub fn classify(handicap: f64) -> Result<Tier, EngineError> {
    if !handicap.is_finite() {
        return Err(EngineError::InvalidHandicap(handicap));
    }

    let tier = if handicap <= TIER_A_MAX {
        Tier::A
    } else if handicap <= TIER_B_MAX {
        Tier::B
    } else if handicap <= TIER_C_MAX {
        Tier::C
    } else {
        Tier::D
    };

    Ok(tier)
}
