use crate::character::{Character, RosterId};
use crate::errors::MatchmakingResult;
use crate::matchmaking::{self, MatchTicket};
use crate::species::StaticSpeciesProvider;
use crate::store::{GameStore, MemoryStore};
use chrono::{DateTime, Duration, Utc};
use schema::{BaseStats, GenderRatio, SpeciesData, SpeciesId};

/// A builder for test characters with common defaults.
///
/// # Example
/// ```
/// let character = TestCharacterBuilder::new("Ash")
///     .with_level(20)
///     .with_coins(0)
///     .build();
/// ```
pub struct TestCharacterBuilder {
    name: String,
    level: u8,
    coins: Option<u32>,
}

impl TestCharacterBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 1,
            coins: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_coins(mut self, coins: u32) -> Self {
        self.coins = Some(coins);
        self
    }

    pub fn build(self) -> Character {
        let mut character = Character::new(format!("user-{}", self.name), self.name);
        character.level = self.level;
        if let Some(coins) = self.coins {
            character.coins = coins;
        }
        character
    }
}

/// A store pre-loaded with the given characters.
pub fn seeded_store(characters: &[Character]) -> MemoryStore {
    let store = MemoryStore::new();
    for character in characters {
        store.insert_character(character.clone()).unwrap();
    }
    store
}

/// Enqueue a character with a back-dated ticket, as if they had already
/// waited `waited_secs` by the time the pass runs at `now`.
pub fn enqueue_waited(
    store: &dyn GameStore,
    character: &Character,
    waited_secs: i64,
    now: DateTime<Utc>,
) -> MatchmakingResult<MatchTicket> {
    matchmaking::enqueue(
        store,
        character.id,
        RosterId::new(),
        now - Duration::seconds(waited_secs),
    )
}

/// The small species catalog the flow tests run against.
pub fn species_catalog() -> StaticSpeciesProvider {
    StaticSpeciesProvider::with_species(vec![
        SpeciesData {
            id: SpeciesId(25),
            name: "Pikachu".to_string(),
            base_stats: BaseStats {
                hp: 35,
                attack: 55,
                defense: 40,
                sp_attack: 50,
                sp_defense: 50,
                speed: 90,
            },
            abilities: vec!["static".to_string(), "lightning-rod".to_string()],
            gender_ratio: GenderRatio::EVEN,
            base_capture_rate: Some(190),
        },
        SpeciesData {
            id: SpeciesId(133),
            name: "Eevee".to_string(),
            base_stats: BaseStats {
                hp: 55,
                attack: 55,
                defense: 50,
                sp_attack: 45,
                sp_defense: 65,
                speed: 55,
            },
            abilities: vec!["run-away".to_string(), "adaptability".to_string()],
            gender_ratio: GenderRatio::FemaleEighths(1),
            base_capture_rate: Some(45),
        },
        // no capture rate on record; the resolver falls back to the default
        SpeciesData {
            id: SpeciesId(150),
            name: "Mewtwo".to_string(),
            base_stats: BaseStats {
                hp: 106,
                attack: 110,
                defense: 90,
                sp_attack: 154,
                sp_defense: 90,
                speed: 130,
            },
            abilities: vec!["pressure".to_string()],
            gender_ratio: GenderRatio::Genderless,
            base_capture_rate: None,
        },
    ])
}
