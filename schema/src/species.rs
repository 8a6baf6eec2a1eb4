use crate::stats::BaseStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// National-dex style numeric species identifier, as used by the external
/// species-data provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SpeciesId(pub u16);

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03}", self.0)
    }
}

/// Creature gender. Wire values match the stored documents ("M"/"F").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// Per-species gender distribution, measured in female eighths
/// (0 = always male, 8 = always female, 4 = even split).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderRatio {
    Genderless,
    FemaleEighths(u8),
}

impl GenderRatio {
    /// The even 50/50 split used when the provider has no ratio on record.
    pub const EVEN: GenderRatio = GenderRatio::FemaleEighths(4);
}

impl Default for GenderRatio {
    fn default() -> Self {
        GenderRatio::EVEN
    }
}

/// Static species record returned by the species-data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: SpeciesId,
    pub name: String,
    pub base_stats: BaseStats,
    pub abilities: Vec<String>,
    #[serde(default)]
    pub gender_ratio: GenderRatio,
    /// Species capture constant, 0-255. Absent for provider records that
    /// predate the capture system; callers substitute the default rate.
    #[serde(default)]
    pub base_capture_rate: Option<u8>,
}

impl SpeciesData {
    pub fn stats_total(&self) -> u16 {
        self.base_stats.total()
    }
}
