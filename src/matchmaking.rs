use crate::battle::{BattleSession, Participant};
use crate::character::{CharacterId, RosterId};
use crate::errors::{MatchmakingResult, StoreError};
use crate::store::GameStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A queued request to be matched, one per trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTicket {
    pub character_id: CharacterId,
    pub roster_id: RosterId,
    pub enqueued_at: DateTime<Utc>,
}

impl MatchTicket {
    pub fn new(character_id: CharacterId, roster_id: RosterId, now: DateTime<Utc>) -> Self {
        MatchTicket {
            character_id,
            roster_id,
            enqueued_at: now,
        }
    }

    pub fn waited_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.enqueued_at).num_seconds()
    }
}

/// Tuning knobs for a matching pass. The defaults mirror the scheduler
/// cadence: a ticket must sit out one full interval before it is
/// considered, and each pass works a slice of at most `max_pairs * 2`
/// candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRules {
    pub min_wait_secs: u32,
    pub max_pairs: usize,
    pub max_level_gap: u8,
}

impl Default for MatchRules {
    fn default() -> Self {
        MatchRules {
            min_wait_secs: 30,
            max_pairs: 5,
            max_level_gap: 10,
        }
    }
}

/// Queue a trainer for matching. Fails with `AlreadyQueued` if they
/// already hold a ticket.
pub fn enqueue(
    store: &dyn GameStore,
    character_id: CharacterId,
    roster_id: RosterId,
    now: DateTime<Utc>,
) -> MatchmakingResult<MatchTicket> {
    let ticket = MatchTicket::new(character_id, roster_id, now);
    store.create_ticket(ticket)?;
    tracing::info!(trainer = %character_id, "matchmaking ticket created");
    Ok(ticket)
}

/// Remove a trainer's ticket if they hold one. Idempotent; returns
/// whether a ticket was actually removed.
pub fn dequeue(store: &dyn GameStore, character_id: CharacterId) -> MatchmakingResult<bool> {
    let removed = store.remove_ticket(character_id)?;
    if removed {
        tracing::info!(trainer = %character_id, "matchmaking ticket removed");
    }
    Ok(removed)
}

/// Run one matching pass over the queue.
///
/// Tickets that have waited longer than `min_wait_secs` are taken in
/// arrival order, at most `max_pairs * 2` of them, and paired in fixed
/// adjacent slots. A pair whose character levels differ by more than
/// `max_level_gap` stays queued for a later pass, as does an odd ticket
/// at the end of the slice. Each successful pair claims both tickets and
/// inserts the new active session in one atomic store step, so a
/// concurrent pass cannot double-pair a ticket.
///
/// If either character of a pair no longer exists, both tickets are
/// dropped outright rather than requeued.
pub fn run_matching_pass(
    store: &dyn GameStore,
    rules: &MatchRules,
    now: DateTime<Utc>,
) -> MatchmakingResult<Vec<BattleSession>> {
    let candidates: Vec<MatchTicket> = store
        .waiting_tickets()?
        .into_iter()
        .filter(|ticket| ticket.waited_secs(now) > rules.min_wait_secs as i64)
        .take(rules.max_pairs * 2)
        .collect();

    let mut sessions = Vec::new();
    for pair in candidates.chunks(2) {
        let [first, second] = pair else {
            break;
        };

        let (char_a, char_b) = match (
            store.character(first.character_id),
            store.character(second.character_id),
        ) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(StoreError::CharacterNotFound(id)), _)
            | (_, Err(StoreError::CharacterNotFound(id))) => {
                store.remove_ticket(first.character_id)?;
                store.remove_ticket(second.character_id)?;
                tracing::warn!(
                    character = %id,
                    "character missing during pairing, dropping both tickets"
                );
                continue;
            }
            (Err(err), _) | (_, Err(err)) => return Err(err.into()),
        };

        if char_a.level.abs_diff(char_b.level) > rules.max_level_gap {
            continue;
        }

        let session = BattleSession::new_matched(
            Participant::new(first.character_id, first.roster_id),
            Participant::new(second.character_id, second.roster_id),
            now,
        );
        if store.claim_ticket_pair(first.character_id, second.character_id, session.clone())? {
            tracing::info!(
                session = %session.id,
                player1 = %first.character_id,
                player2 = %second.character_id,
                "matched pair into active session"
            );
            sessions.push(session);
        }
    }

    if !sessions.is_empty() {
        tracing::debug!(matched = sessions.len(), "matching pass complete");
    }
    Ok(sessions)
}
