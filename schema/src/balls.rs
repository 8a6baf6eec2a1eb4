use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Multiplier value that marks a ball as a guaranteed capture. The master
/// ball carries this instead of a real multiplier; the capture formula
/// saturates to certainty long before the arithmetic matters.
pub const GUARANTEED_CAPTURE_MULTIPLIER: f64 = 255.0;

/// Capture device tiers, cheapest first. Wire names match the inventory
/// document keys ("pokeball", "greatball", ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BallKind {
    Pokeball,
    Greatball,
    Ultraball,
    Masterball,
}

impl BallKind {
    /// Capture-rate multiplier for this ball tier.
    pub fn multiplier(self) -> f64 {
        match self {
            BallKind::Pokeball => 1.0,
            BallKind::Greatball => 1.5,
            BallKind::Ultraball => 2.0,
            BallKind::Masterball => GUARANTEED_CAPTURE_MULTIPLIER,
        }
    }

    pub fn guarantees_capture(self) -> bool {
        matches!(self, BallKind::Masterball)
    }
}
