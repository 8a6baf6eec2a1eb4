use crate::character::Character;
use crate::errors::{CaptureError, CaptureResult, SpeciesResult};
use crate::species::SpeciesProvider;
use schema::{BallKind, SpeciesData, SpeciesId};

/// Check that the character can pay for the attempt. Runs before anything
/// is consumed or recorded; a character with zero balls of the chosen kind
/// is rejected with their inventory untouched.
pub fn can_attempt_capture(character: &Character, ball: BallKind) -> CaptureResult<()> {
    if !character.has_ball(ball) {
        return Err(CaptureError::NoBallsLeft { ball });
    }
    Ok(())
}

/// Resolve the encounter's species against the provider. An unknown id
/// rejects the attempt before any mutation.
pub fn resolve_species(
    provider: &dyn SpeciesProvider,
    species: SpeciesId,
) -> SpeciesResult<SpeciesData> {
    provider.get_species(species)
}
