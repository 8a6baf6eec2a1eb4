use crate::battle::SessionStatus;
use crate::character::RosterId;
use crate::errors::MatchmakingError;
use crate::matchmaking::{dequeue, enqueue, run_matching_pass, MatchRules};
use crate::store::GameStore;
use crate::tests::common::{enqueue_waited, seeded_store, TestCharacterBuilder};
use chrono::Utc;
use pretty_assertions::assert_eq;

#[test]
fn test_second_ticket_for_same_trainer_is_rejected() {
    let ash = TestCharacterBuilder::new("Ash").build();
    let store = seeded_store(&[ash.clone()]);
    let now = Utc::now();

    enqueue(&store, ash.id, RosterId::new(), now).unwrap();
    let err = enqueue(&store, ash.id, RosterId::new(), now).unwrap_err();
    assert_eq!(err, MatchmakingError::AlreadyQueued { trainer: ash.id });
    assert_eq!(store.waiting_tickets().unwrap().len(), 1);
}

#[test]
fn test_dequeue_is_idempotent() {
    let ash = TestCharacterBuilder::new("Ash").build();
    let store = seeded_store(&[ash.clone()]);

    enqueue(&store, ash.id, RosterId::new(), Utc::now()).unwrap();
    assert!(dequeue(&store, ash.id).unwrap());
    assert!(!dequeue(&store, ash.id).unwrap());
    assert!(store.waiting_tickets().unwrap().is_empty());
}

#[test]
fn test_pass_pairs_compatible_neighbors() {
    let ash = TestCharacterBuilder::new("Ash").with_level(20).build();
    let gary = TestCharacterBuilder::new("Gary").with_level(25).build();
    let store = seeded_store(&[ash.clone(), gary.clone()]);
    let now = Utc::now();

    enqueue_waited(&store, &ash, 60, now).unwrap();
    enqueue_waited(&store, &gary, 45, now).unwrap();

    let sessions = run_matching_pass(&store, &MatchRules::default(), now).unwrap();
    assert_eq!(sessions.len(), 1);
    let session = &sessions[0];
    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.player1.character_id, ash.id);
    assert_eq!(session.player2.unwrap().character_id, gary.id);
    assert!(session.started_at.is_some());

    // both tickets claimed by the pairing step
    assert!(store.waiting_tickets().unwrap().is_empty());
    // the session is persisted, not just returned
    assert_eq!(store.session(session.id).unwrap().status, SessionStatus::Active);
}

#[test]
fn test_wide_level_gap_leaves_tickets_queued() {
    let rookie = TestCharacterBuilder::new("Rookie").with_level(10).build();
    let veteran = TestCharacterBuilder::new("Veteran").with_level(50).build();
    let store = seeded_store(&[rookie.clone(), veteran.clone()]);
    let now = Utc::now();

    enqueue_waited(&store, &rookie, 60, now).unwrap();
    enqueue_waited(&store, &veteran, 60, now).unwrap();

    let sessions = run_matching_pass(&store, &MatchRules::default(), now).unwrap();
    assert!(sessions.is_empty());
    assert_eq!(store.waiting_tickets().unwrap().len(), 2);
}

#[test]
fn test_odd_queue_leaves_exactly_one_ticket() {
    let characters: Vec<_> = (0..5)
        .map(|i| {
            TestCharacterBuilder::new(&format!("Trainer{}", i))
                .with_level(20)
                .build()
        })
        .collect();
    let store = seeded_store(&characters);
    let now = Utc::now();
    for character in &characters {
        enqueue_waited(&store, character, 60, now).unwrap();
    }

    let sessions = run_matching_pass(&store, &MatchRules::default(), now).unwrap();
    assert_eq!(sessions.len(), 2);
    let leftovers = store.waiting_tickets().unwrap();
    assert_eq!(leftovers.len(), 1);
    // arrival order pairing leaves the last arrival waiting
    assert_eq!(leftovers[0].character_id, characters[4].id);
}

#[test]
fn test_no_trainer_appears_in_two_sessions_from_one_pass() {
    let characters: Vec<_> = (0..4)
        .map(|i| {
            TestCharacterBuilder::new(&format!("Trainer{}", i))
                .with_level(30)
                .build()
        })
        .collect();
    let store = seeded_store(&characters);
    let now = Utc::now();
    for character in &characters {
        enqueue_waited(&store, character, 60, now).unwrap();
    }

    let sessions = run_matching_pass(&store, &MatchRules::default(), now).unwrap();
    assert_eq!(sessions.len(), 2);

    let mut seen = Vec::new();
    for session in &sessions {
        seen.push(session.player1.character_id);
        seen.push(session.player2.unwrap().character_id);
    }
    let before = seen.len();
    seen.sort_by_key(|id| id.0);
    seen.dedup();
    assert_eq!(seen.len(), before);
}

#[test]
fn test_fresh_tickets_sit_out_the_pass() {
    let ash = TestCharacterBuilder::new("Ash").with_level(20).build();
    let gary = TestCharacterBuilder::new("Gary").with_level(20).build();
    let store = seeded_store(&[ash.clone(), gary.clone()]);
    let now = Utc::now();

    // neither has waited out the 30-second minimum
    enqueue_waited(&store, &ash, 5, now).unwrap();
    enqueue_waited(&store, &gary, 2, now).unwrap();

    let sessions = run_matching_pass(&store, &MatchRules::default(), now).unwrap();
    assert!(sessions.is_empty());
    assert_eq!(store.waiting_tickets().unwrap().len(), 2);
}

#[test]
fn test_missing_character_drops_both_tickets() {
    let ash = TestCharacterBuilder::new("Ash").with_level(20).build();
    // Gary queued but his character record was deleted
    let gary = TestCharacterBuilder::new("Gary").with_level(20).build();
    let store = seeded_store(&[ash.clone()]);
    let now = Utc::now();

    enqueue_waited(&store, &ash, 60, now).unwrap();
    enqueue_waited(&store, &gary, 60, now).unwrap();

    let sessions = run_matching_pass(&store, &MatchRules::default(), now).unwrap();
    assert!(sessions.is_empty());
    // documented behavior: the pair is abandoned and neither is requeued
    assert!(store.waiting_tickets().unwrap().is_empty());
}

#[test]
fn test_pass_respects_the_pair_budget() {
    let characters: Vec<_> = (0..6)
        .map(|i| {
            TestCharacterBuilder::new(&format!("Trainer{}", i))
                .with_level(15)
                .build()
        })
        .collect();
    let store = seeded_store(&characters);
    let now = Utc::now();
    for character in &characters {
        enqueue_waited(&store, character, 60, now).unwrap();
    }

    let rules = MatchRules {
        max_pairs: 1,
        ..MatchRules::default()
    };
    let sessions = run_matching_pass(&store, &rules, now).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(store.waiting_tickets().unwrap().len(), 4);

    // the next pass works the remainder of the queue
    let sessions = run_matching_pass(&store, &rules, now).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(store.waiting_tickets().unwrap().len(), 2);
}
