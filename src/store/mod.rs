//! Persistence boundary for the simulation core.
//!
//! Every operation talks to a [`GameStore`] instead of a concrete
//! database. Each trait method is one atomic unit: the guarantees the
//! rest of the crate leans on (ticket claims, the finish
//! compare-and-swap, all-or-nothing reward deltas) hold per call, never
//! across calls.

mod memory;

pub use memory::MemoryStore;

use crate::battle::{BattleHistoryEntry, BattleSession, Participant, SessionId, SessionOutcome};
use crate::capture::CaptureAttempt;
use crate::character::{Character, CharacterDelta, CharacterId};
use crate::creature::{CreatureId, OwnedCreature};
use crate::errors::{MatchmakingError, SessionError, StoreResult};
use crate::fraud::FraudReport;
use crate::matchmaking::MatchTicket;
use chrono::{DateTime, Utc};
use schema::BallKind;

pub trait GameStore: Send + Sync {
    fn insert_character(&self, character: Character) -> StoreResult<()>;

    fn character(&self, id: CharacterId) -> StoreResult<Character>;

    /// Apply every delta or none of them. Fails without mutating anything
    /// if any referenced character is missing.
    fn apply_character_deltas(
        &self,
        deltas: &[(CharacterId, CharacterDelta)],
    ) -> StoreResult<()>;

    /// Decrement one ball of the given kind. Returns false when the
    /// character has none left; the check and the decrement are a single
    /// atomic step.
    fn consume_ball(&self, id: CharacterId, ball: BallKind) -> StoreResult<bool>;

    fn insert_creature(&self, creature: OwnedCreature) -> StoreResult<()>;

    fn creature(&self, id: CreatureId) -> StoreResult<OwnedCreature>;

    /// Insert a matchmaking ticket, rejecting a trainer who already holds
    /// one.
    fn create_ticket(&self, ticket: MatchTicket) -> Result<(), MatchmakingError>;

    /// Remove a trainer's ticket. Idempotent; returns whether one existed.
    fn remove_ticket(&self, trainer: CharacterId) -> StoreResult<bool>;

    /// All outstanding tickets in arrival order.
    fn waiting_tickets(&self) -> StoreResult<Vec<MatchTicket>>;

    /// Atomically remove both tickets and insert the session. Returns
    /// false, changing nothing, if either ticket is already gone.
    fn claim_ticket_pair(
        &self,
        first: CharacterId,
        second: CharacterId,
        session: BattleSession,
    ) -> StoreResult<bool>;

    fn insert_session(&self, session: BattleSession) -> StoreResult<()>;

    fn session(&self, id: SessionId) -> StoreResult<BattleSession>;

    /// Seat the second participant while holding the write lock. Returns
    /// the updated session.
    fn join_session(
        &self,
        id: SessionId,
        joiner: Participant,
        now: DateTime<Utc>,
    ) -> Result<BattleSession, SessionError>;

    /// Compare-and-swap `active` to `finished` and record the outcome.
    /// Exactly one of two racing calls succeeds; the other sees
    /// `AlreadyFinished`.
    fn finish_session(
        &self,
        id: SessionId,
        outcome: &SessionOutcome,
        now: DateTime<Utc>,
    ) -> Result<BattleSession, SessionError>;

    fn cancel_session(
        &self,
        id: SessionId,
        reason: String,
        now: DateTime<Utc>,
    ) -> Result<BattleSession, SessionError>;

    /// Append one capture attempt to the audit log.
    fn record_capture_attempt(&self, attempt: CaptureAttempt) -> StoreResult<()>;

    /// Count a character's capture attempts at or after `since`,
    /// successful or not.
    fn capture_attempts_since(
        &self,
        character: CharacterId,
        since: DateTime<Utc>,
    ) -> StoreResult<u32>;

    fn append_history(&self, entry: BattleHistoryEntry) -> StoreResult<()>;

    fn append_fraud_report(&self, report: FraudReport) -> StoreResult<()>;
}
