use crate::errors::{CaptureResult, SpeciesError};
use crate::rng::EncounterRng;
use crate::species::SpeciesProvider;
use schema::SpeciesId;
use serde::{Deserialize, Serialize};

/// Shiny odds: one roll in 4096.
pub const SHINY_DENOMINATOR: u16 = 4096;

/// How far a wild creature's level may stray from the character's.
pub const WILD_LEVEL_SPREAD: u8 = 5;

/// Snapshot of a wild creature offered for capture.
///
/// `hp_fraction` is the target's remaining HP as a share of its maximum;
/// `stats_total` is the species base-stat total the capture formula runs
/// against. Both are frozen here so capture resolution needs no second
/// provider round trip for the math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WildEncounter {
    pub species: SpeciesId,
    pub level: u8,
    pub is_shiny: bool,
    pub hp_fraction: f64,
    pub stats_total: u16,
}

/// Roll a wild encounter for a character of the given level.
///
/// The species comes uniformly from the caller-supplied pool (the host owns
/// the location tables), the level lands within `WILD_LEVEL_SPREAD` of the
/// character's, clamped to 1..=100, and the creature starts at full HP.
pub fn generate_wild_encounter(
    provider: &dyn SpeciesProvider,
    rng: &mut EncounterRng,
    pool: &[SpeciesId],
    character_level: u8,
) -> CaptureResult<WildEncounter> {
    if pool.is_empty() {
        return Err(SpeciesError::MalformedData("empty encounter species pool".to_string()).into());
    }

    let pick = rng.next_outcome("wild species") as usize % pool.len();
    let species = provider.get_species(pool[pick])?;

    // Hold the window to the 1..=100 level invariant even for an
    // out-of-range character level.
    let character_level = character_level.clamp(1, 100);
    let min_level = character_level.saturating_sub(WILD_LEVEL_SPREAD).max(1);
    let max_level = character_level.saturating_add(WILD_LEVEL_SPREAD).min(100);
    let span = (max_level - min_level + 1) as u16;
    let level = min_level + (rng.next_outcome("wild level") as u16 % span) as u8;

    let shiny_roll = u16::from_be_bytes([
        rng.next_outcome("shiny roll high"),
        rng.next_outcome("shiny roll low"),
    ]);
    let is_shiny = shiny_roll % SHINY_DENOMINATOR == 0;

    Ok(WildEncounter {
        species: species.id,
        level,
        is_shiny,
        hp_fraction: 1.0,
        stats_total: species.stats_total(),
    })
}
