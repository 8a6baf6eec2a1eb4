use crate::capture::calculation::{capture_probability, roll_capture_success, DEFAULT_CAPTURE_RATE};
use crate::capture::encounter::WildEncounter;
use crate::capture::validation::{can_attempt_capture, resolve_species};
use crate::character::{CharacterDelta, CharacterId};
use crate::creature::{CaptureRecord, CreatureId, OwnedCreature};
use crate::errors::{CaptureError, CaptureResult};
use crate::rng::EncounterRng;
use crate::species::SpeciesProvider;
use crate::store::GameStore;
use chrono::{DateTime, Utc};
use schema::{BallKind, Gender, GenderRatio, Nature, SpeciesData, SpeciesId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the capture audit trail. Recorded for every resolved
/// attempt, success or not, and reviewed by the anti-fraud rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureAttempt {
    pub id: Uuid,
    pub character_id: CharacterId,
    pub species: SpeciesId,
    pub ball: BallKind,
    pub success: bool,
    pub is_shiny: bool,
    pub creature_id: Option<CreatureId>,
    pub ivs: Option<[u8; 6]>,
    pub attempted_at: DateTime<Utc>,
}

/// What a resolved capture attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    pub success: bool,
    pub probability: f64,
    pub creature: Option<OwnedCreature>,
    pub attempt: CaptureAttempt,
}

/// Resolve one capture attempt against a wild encounter.
///
/// Preconditions are checked before anything is spent: the character must
/// hold a ball of the chosen kind and the species must resolve against the
/// provider. Past that point the ball is consumed whether or not the
/// throw lands. A success rolls the new creature's genetics, persists it,
/// and bumps the character's capture counters in one delta batch. Every
/// resolved attempt, either way, leaves one audit row behind.
pub fn attempt_capture(
    store: &dyn GameStore,
    provider: &dyn SpeciesProvider,
    rng: &mut EncounterRng,
    character_id: CharacterId,
    encounter: &WildEncounter,
    ball: BallKind,
    now: DateTime<Utc>,
) -> CaptureResult<CaptureOutcome> {
    let character = store.character(character_id)?;
    can_attempt_capture(&character, ball)?;
    let species = resolve_species(provider, encounter.species)?;

    let base_rate = species.base_capture_rate.unwrap_or(DEFAULT_CAPTURE_RATE);
    let probability =
        capture_probability(encounter.stats_total, encounter.hp_fraction, base_rate, ball);

    // Conditional decrement; a concurrent attempt that drained the last
    // ball between the read above and here shows up as false.
    if !store.consume_ball(character_id, ball)? {
        return Err(CaptureError::NoBallsLeft { ball });
    }

    let success = roll_capture_success(probability, rng);
    let creature = if success {
        let creature = materialize_creature(rng, character_id, &species, encounter, ball, now);
        store.insert_creature(creature.clone())?;

        let delta = CharacterDelta {
            pokemon_caught: 1,
            shiny_found: if encounter.is_shiny { 1 } else { 0 },
            ..Default::default()
        };
        store.apply_character_deltas(&[(character_id, delta)])?;
        Some(creature)
    } else {
        None
    };

    let attempt = CaptureAttempt {
        id: Uuid::new_v4(),
        character_id,
        species: species.id,
        ball,
        success,
        is_shiny: encounter.is_shiny,
        creature_id: creature.as_ref().map(|c| c.id),
        ivs: creature.as_ref().map(|c| c.ivs()),
        attempted_at: now,
    };
    store.record_capture_attempt(attempt.clone())?;

    tracing::info!(
        character = %character_id,
        species = %species.id,
        ball = %ball,
        success,
        "capture attempt resolved"
    );

    Ok(CaptureOutcome {
        success,
        probability,
        creature,
        attempt,
    })
}

/// Roll genetics for the freshly caught creature and build its record.
/// Consumes, in order: six IV bytes, one nature byte, one ability byte,
/// and one gender byte (skipped for genderless species).
fn materialize_creature(
    rng: &mut EncounterRng,
    character_id: CharacterId,
    species: &SpeciesData,
    encounter: &WildEncounter,
    ball: BallKind,
    now: DateTime<Utc>,
) -> OwnedCreature {
    let mut ivs = [0u8; 6];
    for (i, iv) in ivs.iter_mut().enumerate() {
        *iv = rng.next_outcome(&format!("iv {}", i)) % 32;
    }

    let nature = Nature::from_index(rng.next_outcome("nature"));

    let ability = if species.abilities.is_empty() {
        String::new()
    } else {
        let pick = rng.next_outcome("ability") as usize % species.abilities.len();
        species.abilities[pick].clone()
    };

    let gender = match species.gender_ratio {
        GenderRatio::Genderless => None,
        GenderRatio::FemaleEighths(female_eighths) => {
            let roll = rng.next_outcome("gender") % 8;
            if roll < female_eighths {
                Some(Gender::Female)
            } else {
                Some(Gender::Male)
            }
        }
    };

    let caught = CaptureRecord {
        caught_at: now,
        ball,
        caught_level: encounter.level,
        location: Some("Wild Area".to_string()),
    };

    OwnedCreature::new(
        character_id,
        species,
        encounter.level,
        ivs,
        nature,
        gender,
        ability,
        encounter.is_shiny,
        caught,
    )
}
