use crate::stats::StatKind;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The 25 personality natures. Twenty boost one stat by 10% and cut another
/// by 10%; Hardy, Docile, Serious, Bashful, and Quirky are neutral.
///
/// Declaration order matches the canonical table, so a uniform index in
/// 0..25 maps to a uniform nature pick.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    pub const COUNT: u8 = 25;

    /// Map a table index in 0..25 back to a nature. Indices outside the
    /// table wrap, so any byte value yields a valid nature.
    pub fn from_index(index: u8) -> Nature {
        use Nature::*;
        match index % Self::COUNT {
            0 => Hardy,
            1 => Lonely,
            2 => Brave,
            3 => Adamant,
            4 => Naughty,
            5 => Bold,
            6 => Docile,
            7 => Relaxed,
            8 => Impish,
            9 => Lax,
            10 => Timid,
            11 => Hasty,
            12 => Serious,
            13 => Jolly,
            14 => Naive,
            15 => Modest,
            16 => Mild,
            17 => Quiet,
            18 => Bashful,
            19 => Rash,
            20 => Calm,
            21 => Gentle,
            22 => Sassy,
            23 => Careful,
            _ => Quirky,
        }
    }

    /// The stat this nature boosts by 10%, if any.
    pub fn boosted(self) -> Option<StatKind> {
        use Nature::*;
        match self {
            Lonely | Brave | Adamant | Naughty => Some(StatKind::Attack),
            Bold | Relaxed | Impish | Lax => Some(StatKind::Defense),
            Timid | Hasty | Jolly | Naive => Some(StatKind::Speed),
            Modest | Mild | Quiet | Rash => Some(StatKind::SpAttack),
            Calm | Gentle | Sassy | Careful => Some(StatKind::SpDefense),
            Hardy | Docile | Serious | Bashful | Quirky => None,
        }
    }

    /// The stat this nature cuts by 10%, if any.
    pub fn reduced(self) -> Option<StatKind> {
        use Nature::*;
        match self {
            Bold | Timid | Modest | Calm => Some(StatKind::Attack),
            Lonely | Hasty | Mild | Gentle => Some(StatKind::Defense),
            Brave | Relaxed | Quiet | Sassy => Some(StatKind::Speed),
            Adamant | Impish | Jolly | Careful => Some(StatKind::SpAttack),
            Naughty | Lax | Naive | Rash => Some(StatKind::SpDefense),
            Hardy | Docile | Serious | Bashful | Quirky => None,
        }
    }

    pub fn is_neutral(self) -> bool {
        self.boosted().is_none()
    }
}
