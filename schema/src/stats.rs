use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// The six combat stats, in the canonical order used for every
/// six-element stat array in the core (IVs, EVs, derived stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Hp,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpAttack,
        StatKind::SpDefense,
        StatKind::Speed,
    ];

    pub fn index(self) -> usize {
        match self {
            StatKind::Hp => 0,
            StatKind::Attack => 1,
            StatKind::Defense => 2,
            StatKind::SpAttack => 3,
            StatKind::SpDefense => 4,
            StatKind::Speed => 5,
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Species base stats as published by the species-data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn get(&self, stat: StatKind) -> u8 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpAttack => self.sp_attack,
            StatKind::SpDefense => self.sp_defense,
            StatKind::Speed => self.speed,
        }
    }

    /// Sum of all six base stats. Drives the capture formula.
    pub fn total(&self) -> u16 {
        self.hp as u16
            + self.attack as u16
            + self.defense as u16
            + self.sp_attack as u16
            + self.sp_defense as u16
            + self.speed as u16
    }
}

/// A full set of derived combat stats (values can exceed 255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatSet(pub [u16; 6]);

impl StatSet {
    pub fn get(&self, stat: StatKind) -> u16 {
        self.0[stat.index()]
    }

    pub fn hp(&self) -> u16 {
        self.0[0]
    }
}

impl Index<StatKind> for StatSet {
    type Output = u16;

    fn index(&self, stat: StatKind) -> &u16 {
        &self.0[stat.index()]
    }
}

impl IndexMut<StatKind> for StatSet {
    fn index_mut(&mut self, stat: StatKind) -> &mut u16 {
        &mut self.0[stat.index()]
    }
}
