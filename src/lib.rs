//! EloDex Simulation Core
//!
//! The authoritative server-side logic for the EloDex trainer game:
//! matchmaking, battle-session lifecycle and settlement, capture
//! resolution, stat derivation, and capture-fraud review. All state lives
//! behind the [`store::GameStore`] trait; the core itself is a set of
//! plain call/return operations invoked by external request and event
//! handlers.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod capture;
pub mod character;
pub mod creature;
pub mod errors;
pub mod fraud;
pub mod matchmaking;
pub mod rng;
pub mod species;
pub mod stats;
pub mod store;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BallKind, BaseStats, Gender, GenderRatio, Nature, SpeciesData, SpeciesId, StatKind, StatSet,
};

// --- From this crate's modules (`src/`) ---

// Stat derivation.
pub use stats::{derive_hp, derive_stat, derive_stats, nature_multiplier};

// Capture resolution and wild encounters.
pub use capture::{
    attempt_capture, capture_probability, generate_wild_encounter, CaptureAttempt, CaptureOutcome,
    WildEncounter,
};

// Matchmaking queue and pairing pass.
pub use matchmaking::{dequeue, enqueue, run_matching_pass, MatchRules, MatchTicket};

// Battle-session lifecycle and settlement.
pub use battle::{
    cancel_session, create_challenge, finish_session, join_session, BattleHistoryEntry,
    BattleRules, BattleSession, Participant, RewardSummary, SessionId, SessionOutcome,
    SessionStatus,
};

// Fraud review.
pub use fraud::{review_capture, FraudReport, FraudRule, FraudRules};

// Records and identifiers.
pub use character::{Character, CharacterDelta, CharacterId, RosterId, TrainerStats};
pub use creature::{CreatureId, OwnedCreature, Placement};

// Persistence boundary and species data access.
pub use species::{SpeciesProvider, StaticSpeciesProvider};
pub use store::{GameStore, MemoryStore};

// Injected randomness.
pub use rng::EncounterRng;

// Crate-specific error and result types.
pub use errors::{
    CaptureError, CoreError, CoreResult, ErrorKind, MatchmakingError, SessionError, SpeciesError,
    StoreError,
};
