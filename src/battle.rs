use crate::character::{CharacterDelta, CharacterId, RosterId};
use crate::errors::{SessionError, SessionResult};
use crate::store::GameStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const WINNER_EXPERIENCE: u32 = 100;
pub const WINNER_COINS: u32 = 50;
pub const LOSER_EXPERIENCE: u32 = 25;
pub const LOSER_COINS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session lifecycle. `Finished` and `Cancelled` are sinks; nothing
/// transitions out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Waiting,
    Active,
    Finished,
    Cancelled,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Finished | SessionStatus::Cancelled)
    }
}

/// One side of a battle: the trainer and the roster they entered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub character_id: CharacterId,
    pub roster_id: RosterId,
}

impl Participant {
    pub fn new(character_id: CharacterId, roster_id: RosterId) -> Self {
        Self {
            character_id,
            roster_id,
        }
    }
}

/// Rule set attached to a session at creation. `time_limit_secs` is
/// advisory; nothing in the core enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRules {
    pub max_level: u8,
    pub items_allowed: bool,
    pub legendaries_allowed: bool,
    pub time_limit_secs: u32,
    pub max_team_size: u8,
}

impl Default for BattleRules {
    fn default() -> Self {
        BattleRules {
            max_level: 100,
            items_allowed: true,
            legendaries_allowed: false,
            time_limit_secs: 300,
            max_team_size: 6,
        }
    }
}

/// Per-side settlement amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRewards {
    pub experience: u32,
    pub coins: u32,
}

/// The full reward payload recorded on a finished session. Both sides
/// earn something; losing is cheaper, not free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardSummary {
    pub winner: BattleRewards,
    pub loser: BattleRewards,
}

impl RewardSummary {
    pub fn standard() -> Self {
        RewardSummary {
            winner: BattleRewards {
                experience: WINNER_EXPERIENCE,
                coins: WINNER_COINS,
            },
            loser: BattleRewards {
                experience: LOSER_EXPERIENCE,
                coins: LOSER_COINS,
            },
        }
    }
}

impl Default for RewardSummary {
    fn default() -> Self {
        Self::standard()
    }
}

/// Declared result of a battle, supplied by the caller of `finish`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutcome {
    pub winner: CharacterId,
    pub loser: CharacterId,
    pub end_reason: String,
}

/// A battle session as persisted in the `battles` collection.
///
/// All lifecycle transitions go through the methods below so that every
/// path enforces the same state machine. The store applies them while
/// holding its write lock, which is what makes `finish` a real
/// compare-and-swap rather than read-then-write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSession {
    pub id: SessionId,
    pub status: SessionStatus,
    pub player1: Participant,
    pub player2: Option<Participant>,
    pub rules: BattleRules,
    pub winner: Option<CharacterId>,
    pub loser: Option<CharacterId>,
    pub end_reason: Option<String>,
    pub rewards: Option<RewardSummary>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl BattleSession {
    /// Open a challenge with only one side present. Stays `waiting` until
    /// an opponent joins.
    pub fn new_challenge(player1: Participant, rules: BattleRules, now: DateTime<Utc>) -> Self {
        BattleSession {
            id: SessionId::new(),
            status: SessionStatus::Waiting,
            player1,
            player2: None,
            rules,
            winner: None,
            loser: None,
            end_reason: None,
            rewards: None,
            created_at: now,
            started_at: None,
            ended_at: None,
        }
    }

    /// Create a session with both sides already present, as the matching
    /// pass does. Starts `active` with the clock running.
    pub fn new_matched(player1: Participant, player2: Participant, now: DateTime<Utc>) -> Self {
        BattleSession {
            id: SessionId::new(),
            status: SessionStatus::Active,
            player1,
            player2: Some(player2),
            rules: BattleRules::default(),
            winner: None,
            loser: None,
            end_reason: None,
            rewards: None,
            created_at: now,
            started_at: Some(now),
            ended_at: None,
        }
    }

    /// Seat the second participant. Valid only from `waiting`.
    pub fn join(&mut self, joiner: Participant, now: DateTime<Utc>) -> SessionResult<()> {
        match self.status {
            SessionStatus::Waiting => {
                self.player2 = Some(joiner);
                self.status = SessionStatus::Active;
                self.started_at = Some(now);
                Ok(())
            }
            status => Err(SessionError::NotJoinable {
                session: self.id,
                status,
            }),
        }
    }

    /// Record the outcome and move to `finished`. Valid only from
    /// `active`; a repeat call reports `AlreadyFinished` and changes
    /// nothing. The outcome must name this session's two participants as
    /// winner and loser; anything else is rejected before the status
    /// flips, so the session stays settleable.
    pub fn finish(&mut self, outcome: &SessionOutcome, now: DateTime<Utc>) -> SessionResult<()> {
        match self.status {
            SessionStatus::Active => {
                if !self.outcome_names_participants(outcome) {
                    return Err(SessionError::InvalidOutcome { session: self.id });
                }
                self.status = SessionStatus::Finished;
                self.winner = Some(outcome.winner);
                self.loser = Some(outcome.loser);
                self.end_reason = Some(outcome.end_reason.clone());
                self.rewards = Some(RewardSummary::standard());
                self.ended_at = Some(now);
                Ok(())
            }
            SessionStatus::Finished => Err(SessionError::AlreadyFinished { session: self.id }),
            status => Err(SessionError::NotActive {
                session: self.id,
                status,
            }),
        }
    }

    /// Abort without settlement. Valid from `waiting` or `active`.
    pub fn cancel(&mut self, reason: String, now: DateTime<Utc>) -> SessionResult<()> {
        match self.status {
            SessionStatus::Waiting | SessionStatus::Active => {
                self.status = SessionStatus::Cancelled;
                self.end_reason = Some(reason);
                self.ended_at = Some(now);
                Ok(())
            }
            status => Err(SessionError::AlreadyTerminal {
                session: self.id,
                status,
            }),
        }
    }

    fn outcome_names_participants(&self, outcome: &SessionOutcome) -> bool {
        let Some(opponent) = self.player2 else {
            return false;
        };
        let a = self.player1.character_id;
        let b = opponent.character_id;
        outcome.winner != outcome.loser
            && (outcome.winner == a || outcome.winner == b)
            && (outcome.loser == a || outcome.loser == b)
    }

    pub fn duration_secs(&self) -> Option<i64> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        }
    }
}

/// One immutable row in the `battle_history` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleHistoryEntry {
    pub id: Uuid,
    pub session_id: SessionId,
    pub player1: CharacterId,
    pub player2: CharacterId,
    pub winner: CharacterId,
    pub loser: CharacterId,
    pub end_reason: String,
    pub rewards: RewardSummary,
    pub duration_secs: Option<i64>,
    pub finished_at: DateTime<Utc>,
}

/// Open a waiting challenge session for a single trainer. The challenger
/// must exist; the opponent arrives later through `join_session`.
pub fn create_challenge(
    store: &dyn GameStore,
    challenger: Participant,
    rules: BattleRules,
    now: DateTime<Utc>,
) -> SessionResult<BattleSession> {
    store.character(challenger.character_id)?;

    let session = BattleSession::new_challenge(challenger, rules, now);
    store.insert_session(session.clone())?;
    tracing::info!(
        session = %session.id,
        challenger = %challenger.character_id,
        "challenge session created"
    );
    Ok(session)
}

/// Seat `joiner` as the second participant and start the battle. Any
/// matchmaking ticket the joiner still holds is removed.
pub fn join_session(
    store: &dyn GameStore,
    session_id: SessionId,
    joiner: Participant,
    now: DateTime<Utc>,
) -> SessionResult<BattleSession> {
    store.character(joiner.character_id)?;

    let session = store.join_session(session_id, joiner, now)?;
    store.remove_ticket(joiner.character_id)?;
    tracing::info!(
        session = %session_id,
        joiner = %joiner.character_id,
        "session joined, battle active"
    );
    Ok(session)
}

/// Settle a battle: flip the session to `finished`, pay out rewards to
/// both characters in one unit, append the history row, and clear any
/// leftover matchmaking tickets.
///
/// The status flip happens first and is atomic; when two finish calls
/// race, exactly one gets past it and performs settlement.
pub fn finish_session(
    store: &dyn GameStore,
    session_id: SessionId,
    outcome: SessionOutcome,
    now: DateTime<Utc>,
) -> SessionResult<BattleSession> {
    let session = store.finish_session(session_id, &outcome, now)?;

    let Some(opponent) = session.player2 else {
        return Err(SessionError::NotActive {
            session: session_id,
            status: session.status,
        });
    };
    let rewards = session.rewards.unwrap_or_default();

    let deltas = [
        (
            outcome.winner,
            CharacterDelta {
                experience: rewards.winner.experience,
                coins: rewards.winner.coins,
                total_battles: 1,
                battles_won: 1,
                ..Default::default()
            },
        ),
        (
            outcome.loser,
            CharacterDelta {
                experience: rewards.loser.experience,
                coins: rewards.loser.coins,
                total_battles: 1,
                battles_lost: 1,
                ..Default::default()
            },
        ),
    ];
    store.apply_character_deltas(&deltas)?;

    let entry = BattleHistoryEntry {
        id: Uuid::new_v4(),
        session_id,
        player1: session.player1.character_id,
        player2: opponent.character_id,
        winner: outcome.winner,
        loser: outcome.loser,
        end_reason: outcome.end_reason.clone(),
        rewards,
        duration_secs: session.duration_secs(),
        finished_at: now,
    };
    store.append_history(entry)?;

    store.remove_ticket(session.player1.character_id)?;
    store.remove_ticket(opponent.character_id)?;

    tracing::info!(
        session = %session_id,
        winner = %outcome.winner,
        loser = %outcome.loser,
        reason = %outcome.end_reason,
        "battle settled"
    );
    Ok(session)
}

/// Abort a waiting or active session. No rewards, no history row.
pub fn cancel_session(
    store: &dyn GameStore,
    session_id: SessionId,
    reason: impl Into<String>,
    now: DateTime<Utc>,
) -> SessionResult<BattleSession> {
    let session = store.cancel_session(session_id, reason.into(), now)?;
    tracing::info!(session = %session_id, "session cancelled");
    Ok(session)
}
