use crate::rng::EncounterRng;
use schema::BallKind;

/// Species capture constant substituted when the provider record carries
/// none. Matches the fixed average the original backend used.
pub const DEFAULT_CAPTURE_RATE: u8 = 45;

/// Capture success probability in [0, 1].
///
/// `(3*S - 2*hp) * base_rate * ball_multiplier / (3*S) / 255`, capped at 1,
/// where `S` is the species base-stat total and `hp = hp_fraction * S`.
/// The probability falls as the target's remaining HP rises; the master
/// ball's sentinel multiplier saturates the cap at any HP.
pub fn capture_probability(stats_total: u16, hp_fraction: f64, base_rate: u8, ball: BallKind) -> f64 {
    let total = 3.0 * stats_total as f64;
    let hp = hp_fraction.clamp(0.0, 1.0) * stats_total as f64;
    let value = (total - 2.0 * hp) * base_rate as f64 * ball.multiplier() / total;
    (value / 255.0).min(1.0)
}

/// Roll for capture success against the calculated probability.
///
/// A probability at the cap succeeds without drawing from the RNG, so a
/// guaranteed capture never loses to an unlucky byte.
pub fn roll_capture_success(probability: f64, rng: &mut EncounterRng) -> bool {
    if probability >= 1.0 {
        return true;
    }
    let roll = rng.next_outcome("capture roll") as f64;
    roll < probability * 255.0
}
