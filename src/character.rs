use crate::creature::CreatureId;
use schema::BallKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Coins granted to every newly created character.
pub const STARTING_COINS: u32 = 1000;

/// Maximum creatures on the active team.
pub const TEAM_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies the team/roster a trainer queued with. Sessions and tickets
/// carry it opaquely; this crate never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterId(pub Uuid);

impl RosterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RosterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RosterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifetime counters shown on the trainer card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerStats {
    pub total_battles: u32,
    pub battles_won: u32,
    pub battles_lost: u32,
    pub pokemon_caught: u32,
    pub shiny_found: u32,
}

/// A playable trainer character owned by a user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub user_id: String,
    pub name: String,
    pub level: u8,
    pub experience: u32,
    pub coins: u32,
    pub pokeballs: HashMap<BallKind, u32>,
    pub team: Vec<CreatureId>,
    pub stats: TrainerStats,
    pub is_active: bool,
}

impl Character {
    /// Create a level-1 character with the standard starting inventory.
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut pokeballs = HashMap::new();
        pokeballs.insert(BallKind::Pokeball, 10);
        pokeballs.insert(BallKind::Greatball, 5);
        pokeballs.insert(BallKind::Ultraball, 1);

        Character {
            id: CharacterId::new(),
            user_id: user_id.into(),
            name: name.into(),
            level: 1,
            experience: 0,
            coins: STARTING_COINS,
            pokeballs,
            team: Vec::new(),
            stats: TrainerStats::default(),
            is_active: true,
        }
    }

    pub fn ball_count(&self, ball: BallKind) -> u32 {
        self.pokeballs.get(&ball).copied().unwrap_or(0)
    }

    pub fn has_ball(&self, ball: BallKind) -> bool {
        self.ball_count(ball) > 0
    }

    /// Add a creature to the active team. Returns false when the team is
    /// already full.
    pub fn add_to_team(&mut self, creature: CreatureId) -> bool {
        if self.team.len() >= TEAM_SIZE {
            return false;
        }
        self.team.push(creature);
        true
    }

    /// Fold a settlement delta into this character. All fields are additive
    /// so deltas commute and can be replayed.
    pub fn apply_delta(&mut self, delta: &CharacterDelta) {
        self.experience += delta.experience;
        self.coins += delta.coins;
        self.stats.total_battles += delta.total_battles;
        self.stats.battles_won += delta.battles_won;
        self.stats.battles_lost += delta.battles_lost;
        self.stats.pokemon_caught += delta.pokemon_caught;
        self.stats.shiny_found += delta.shiny_found;
    }
}

/// Additive update applied to a character as one unit. Battle settlement
/// and capture bookkeeping both go through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharacterDelta {
    pub experience: u32,
    pub coins: u32,
    pub total_battles: u32,
    pub battles_won: u32,
    pub battles_lost: u32,
    pub pokemon_caught: u32,
    pub shiny_found: u32,
}
