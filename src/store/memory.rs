use super::GameStore;
use crate::battle::{BattleHistoryEntry, BattleSession, Participant, SessionId, SessionOutcome};
use crate::capture::CaptureAttempt;
use crate::character::{Character, CharacterDelta, CharacterId};
use crate::creature::{CreatureId, OwnedCreature};
use crate::errors::{MatchmakingError, SessionError, StoreError, StoreResult};
use crate::fraud::FraudReport;
use crate::matchmaking::MatchTicket;
use chrono::{DateTime, Utc};
use schema::BallKind;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct StoreInner {
    characters: HashMap<CharacterId, Character>,
    creatures: HashMap<CreatureId, OwnedCreature>,
    tickets: Vec<MatchTicket>,
    sessions: HashMap<SessionId, BattleSession>,
    attempts: Vec<CaptureAttempt>,
    history: Vec<BattleHistoryEntry>,
    reports: Vec<FraudReport>,
}

/// In-memory [`GameStore`] backed by a single `RwLock`.
///
/// Holding the write lock for the whole of each mutating method is what
/// makes the per-call atomicity guarantees hold. Tickets live in a `Vec`
/// so arrival order falls out of insertion order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// The ticket a trainer currently holds, if any.
    pub fn ticket(&self, trainer: CharacterId) -> StoreResult<Option<MatchTicket>> {
        let inner = self.read()?;
        Ok(inner
            .tickets
            .iter()
            .find(|t| t.character_id == trainer)
            .copied())
    }

    /// Snapshot of the battle history log.
    pub fn history(&self) -> StoreResult<Vec<BattleHistoryEntry>> {
        Ok(self.read()?.history.clone())
    }

    /// Snapshot of the capture audit log.
    pub fn capture_attempts(&self) -> StoreResult<Vec<CaptureAttempt>> {
        Ok(self.read()?.attempts.clone())
    }

    /// Snapshot of pending fraud reports, for the triage side.
    pub fn fraud_reports(&self) -> StoreResult<Vec<FraudReport>> {
        Ok(self.read()?.reports.clone())
    }
}

impl GameStore for MemoryStore {
    fn insert_character(&self, character: Character) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.characters.insert(character.id, character);
        Ok(())
    }

    fn character(&self, id: CharacterId) -> StoreResult<Character> {
        let inner = self.read()?;
        inner
            .characters
            .get(&id)
            .cloned()
            .ok_or(StoreError::CharacterNotFound(id))
    }

    fn apply_character_deltas(
        &self,
        deltas: &[(CharacterId, CharacterDelta)],
    ) -> StoreResult<()> {
        let mut inner = self.write()?;
        for (id, _) in deltas {
            if !inner.characters.contains_key(id) {
                return Err(StoreError::CharacterNotFound(*id));
            }
        }
        for (id, delta) in deltas {
            if let Some(character) = inner.characters.get_mut(id) {
                character.apply_delta(delta);
            }
        }
        Ok(())
    }

    fn consume_ball(&self, id: CharacterId, ball: BallKind) -> StoreResult<bool> {
        let mut inner = self.write()?;
        let character = inner
            .characters
            .get_mut(&id)
            .ok_or(StoreError::CharacterNotFound(id))?;
        match character.pokeballs.get_mut(&ball) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn insert_creature(&self, creature: OwnedCreature) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.creatures.insert(creature.id, creature);
        Ok(())
    }

    fn creature(&self, id: CreatureId) -> StoreResult<OwnedCreature> {
        let inner = self.read()?;
        inner
            .creatures
            .get(&id)
            .cloned()
            .ok_or(StoreError::CreatureNotFound(id))
    }

    fn create_ticket(&self, ticket: MatchTicket) -> Result<(), MatchmakingError> {
        let mut inner = self.write()?;
        if inner
            .tickets
            .iter()
            .any(|t| t.character_id == ticket.character_id)
        {
            return Err(MatchmakingError::AlreadyQueued {
                trainer: ticket.character_id,
            });
        }
        inner.tickets.push(ticket);
        Ok(())
    }

    fn remove_ticket(&self, trainer: CharacterId) -> StoreResult<bool> {
        let mut inner = self.write()?;
        let before = inner.tickets.len();
        inner.tickets.retain(|t| t.character_id != trainer);
        Ok(inner.tickets.len() != before)
    }

    fn waiting_tickets(&self) -> StoreResult<Vec<MatchTicket>> {
        Ok(self.read()?.tickets.clone())
    }

    fn claim_ticket_pair(
        &self,
        first: CharacterId,
        second: CharacterId,
        session: BattleSession,
    ) -> StoreResult<bool> {
        let mut inner = self.write()?;
        let has_first = inner.tickets.iter().any(|t| t.character_id == first);
        let has_second = inner.tickets.iter().any(|t| t.character_id == second);
        if !has_first || !has_second {
            return Ok(false);
        }
        inner
            .tickets
            .retain(|t| t.character_id != first && t.character_id != second);
        inner.sessions.insert(session.id, session);
        Ok(true)
    }

    fn insert_session(&self, session: BattleSession) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.sessions.insert(session.id, session);
        Ok(())
    }

    fn session(&self, id: SessionId) -> StoreResult<BattleSession> {
        let inner = self.read()?;
        inner
            .sessions
            .get(&id)
            .cloned()
            .ok_or(StoreError::SessionNotFound(id))
    }

    fn join_session(
        &self,
        id: SessionId,
        joiner: Participant,
        now: DateTime<Utc>,
    ) -> Result<BattleSession, SessionError> {
        let mut inner = self.write()?;
        let session = inner
            .sessions
            .get_mut(&id)
            .ok_or(StoreError::SessionNotFound(id))?;
        session.join(joiner, now)?;
        Ok(session.clone())
    }

    fn finish_session(
        &self,
        id: SessionId,
        outcome: &SessionOutcome,
        now: DateTime<Utc>,
    ) -> Result<BattleSession, SessionError> {
        let mut inner = self.write()?;
        let session = inner
            .sessions
            .get_mut(&id)
            .ok_or(StoreError::SessionNotFound(id))?;
        session.finish(outcome, now)?;
        Ok(session.clone())
    }

    fn cancel_session(
        &self,
        id: SessionId,
        reason: String,
        now: DateTime<Utc>,
    ) -> Result<BattleSession, SessionError> {
        let mut inner = self.write()?;
        let session = inner
            .sessions
            .get_mut(&id)
            .ok_or(StoreError::SessionNotFound(id))?;
        session.cancel(reason, now)?;
        Ok(session.clone())
    }

    fn record_capture_attempt(&self, attempt: CaptureAttempt) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.attempts.push(attempt);
        Ok(())
    }

    fn capture_attempts_since(
        &self,
        character: CharacterId,
        since: DateTime<Utc>,
    ) -> StoreResult<u32> {
        let inner = self.read()?;
        let count = inner
            .attempts
            .iter()
            .filter(|a| a.character_id == character && a.attempted_at >= since)
            .count();
        Ok(count as u32)
    }

    fn append_history(&self, entry: BattleHistoryEntry) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.history.push(entry);
        Ok(())
    }

    fn append_fraud_report(&self, report: FraudReport) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.reports.push(report);
        Ok(())
    }
}
