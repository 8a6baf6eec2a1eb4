use crate::character::CharacterId;
use crate::stats;
use chrono::{DateTime, Utc};
use schema::{BallKind, Gender, Nature, SpeciesData, SpeciesId, StatKind, StatSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default friendship value for a freshly caught creature.
pub const BASE_FRIENDSHIP: u8 = 70;

/// Per-stat EV ceiling.
pub const EV_STAT_CAP: u8 = 255;

/// Ceiling on the sum of all six EVs.
pub const EV_TOTAL_CAP: u16 = 510;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(pub Uuid);

impl CreatureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a creature lives: an active team slot (1-6) or a storage box.
/// A creature is always in exactly one of the two, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    Team { slot: u8 },
    Boxed { box_number: u8, slot: u8 },
}

impl Placement {
    /// Fresh captures land in the first storage box; box-management flows
    /// re-slot them later.
    pub fn default_box() -> Self {
        Placement::Boxed {
            box_number: 1,
            slot: 0,
        }
    }

    pub fn is_on_team(&self) -> bool {
        matches!(self, Placement::Team { .. })
    }
}

/// Immutable record of how a creature was caught.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRecord {
    pub caught_at: DateTime<Utc>,
    pub ball: BallKind,
    pub caught_level: u8,
    pub location: Option<String>,
}

/// An owned creature as persisted in the `captured_pokemon` collection.
///
/// IVs are rolled once at capture and never change afterwards; EVs only
/// grow, clamped per stat and against the 510 total. Both are private so
/// every mutation path goes through this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedCreature {
    pub id: CreatureId,
    pub character_id: CharacterId,
    pub species: SpeciesId,
    pub nickname: Option<String>,
    pub level: u8,
    pub experience: u32,
    pub is_shiny: bool,
    pub gender: Option<Gender>,
    pub nature: Nature,
    pub ability: String,
    pub friendship: u8,
    ivs: [u8; 6],
    evs: [u8; 6],
    pub current_hp: u16,
    pub max_hp: u16,
    pub placement: Placement,
    pub caught: CaptureRecord,
}

impl OwnedCreature {
    /// Materialize a newly captured creature. Stats derive from the species
    /// base stats at the given level with zero EVs; HP starts full.
    pub fn new(
        character_id: CharacterId,
        species: &SpeciesData,
        level: u8,
        ivs: [u8; 6],
        nature: Nature,
        gender: Option<Gender>,
        ability: String,
        is_shiny: bool,
        caught: CaptureRecord,
    ) -> Self {
        let level = level.clamp(1, 100);
        let evs = [0; 6];
        let derived = stats::derive_stats(&species.base_stats, level, &ivs, &evs, nature);
        let max_hp = derived.hp();

        OwnedCreature {
            id: CreatureId::new(),
            character_id,
            species: species.id,
            nickname: None,
            level,
            experience: 0,
            is_shiny,
            gender,
            nature,
            ability,
            friendship: BASE_FRIENDSHIP,
            ivs,
            evs,
            current_hp: max_hp,
            max_hp,
            placement: Placement::default_box(),
            caught,
        }
    }

    /// The genetic values, fixed at capture. Returns a copy; the stored
    /// values cannot be altered through it.
    pub fn ivs(&self) -> [u8; 6] {
        self.ivs
    }

    pub fn iv(&self, stat: StatKind) -> u8 {
        self.ivs[stat.index()]
    }

    pub fn evs(&self) -> [u8; 6] {
        self.evs
    }

    pub fn ev_total(&self) -> u16 {
        self.evs.iter().map(|&ev| ev as u16).sum()
    }

    /// Apply trained-value gains, clamping each stat at 255 and the total
    /// at 510. Gains that would breach a cap are cut, never carried over.
    pub fn apply_ev_gains(&mut self, gains: &[u8; 6]) {
        let mut total = self.ev_total();
        for i in 0..6 {
            let total_headroom = EV_TOTAL_CAP.saturating_sub(total);
            if total_headroom == 0 {
                break;
            }
            let stat_headroom = (EV_STAT_CAP - self.evs[i]) as u16;
            let grant = (gains[i] as u16).min(stat_headroom).min(total_headroom);
            self.evs[i] += grant as u8;
            total += grant;
        }
    }

    /// Recompute the full effective stat set against current level/EVs.
    pub fn derived_stats(&self, species: &SpeciesData) -> StatSet {
        stats::derive_stats(&species.base_stats, self.level, &self.ivs, &self.evs, self.nature)
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{BaseStats, GenderRatio};

    fn test_species() -> SpeciesData {
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
            abilities: vec!["run-away".to_string()],
            gender_ratio: GenderRatio::FemaleEighths(1),
            base_capture_rate: Some(45),
        }
    }

    fn catch_record() -> CaptureRecord {
        CaptureRecord {
            caught_at: Utc::now(),
            ball: BallKind::Pokeball,
            caught_level: 12,
            location: Some("Wild Area".to_string()),
        }
    }

    fn new_creature(ivs: [u8; 6]) -> OwnedCreature {
        OwnedCreature::new(
            CharacterId::new(),
            &test_species(),
            12,
            ivs,
            Nature::Hardy,
            Some(Gender::Female),
            "run-away".to_string(),
            false,
            catch_record(),
        )
    }

    #[test]
    fn test_new_creature_starts_at_full_hp() {
        let creature = new_creature([31; 6]);
        assert_eq!(creature.current_hp, creature.max_hp);
        // floor((110 + 31) * 12 / 100) + 12 + 10 = 16 + 22
        assert_eq!(creature.max_hp, 38);
        assert_eq!(creature.friendship, BASE_FRIENDSHIP);
        assert!(!creature.placement.is_on_team());
    }

    #[test]
    fn test_iv_copies_do_not_leak_mutations() {
        let creature = new_creature([31, 0, 15, 7, 22, 3]);
        let mut copy = creature.ivs();
        copy[0] = 0;
        copy[1] = 31;
        assert_eq!(copy, [0, 31, 15, 7, 22, 3]);
        assert_eq!(creature.ivs(), [31, 0, 15, 7, 22, 3]);
    }

    #[test]
    fn test_level_is_clamped_to_valid_range() {
        let species = test_species();
        let low = OwnedCreature::new(
            CharacterId::new(),
            &species,
            0,
            [0; 6],
            Nature::Hardy,
            None,
            "run-away".to_string(),
            false,
            catch_record(),
        );
        assert_eq!(low.level, 1);
    }

    #[test]
    fn test_ev_gains_respect_per_stat_cap() {
        let mut creature = new_creature([0; 6]);
        creature.apply_ev_gains(&[200, 0, 0, 0, 0, 0]);
        creature.apply_ev_gains(&[200, 0, 0, 0, 0, 0]);
        // 200 + 200 would breach 255; the second grant is cut to 55
        assert_eq!(creature.evs()[0], 255);
        assert_eq!(creature.ev_total(), 255);
    }

    #[test]
    fn test_ev_gains_respect_total_cap() {
        let mut creature = new_creature([0; 6]);
        creature.apply_ev_gains(&[252, 252, 100, 0, 0, 0]);
        // 252 + 252 = 504, leaving 6 of headroom for the third stat
        assert_eq!(creature.evs(), [252, 252, 6, 0, 0, 0]);
        assert_eq!(creature.ev_total(), EV_TOTAL_CAP);

        // Any further gain is fully clamped away
        creature.apply_ev_gains(&[10, 10, 10, 10, 10, 10]);
        assert_eq!(creature.ev_total(), EV_TOTAL_CAP);
    }

    #[test]
    fn test_ev_gains_raise_derived_stats() {
        let species = test_species();
        let mut creature = new_creature([31; 6]);
        let before = creature.derived_stats(&species).get(StatKind::Attack);
        creature.apply_ev_gains(&[0, 252, 0, 0, 0, 0]);
        let after = creature.derived_stats(&species).get(StatKind::Attack);
        assert!(after > before);
    }
}
