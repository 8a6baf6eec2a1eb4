use schema::{BaseStats, Nature, StatKind, StatSet};

/// Multiplier a nature applies to a non-HP stat: 1.1 boosted, 0.9 reduced,
/// 1.0 otherwise. HP is never nature-modified.
pub fn nature_multiplier(nature: Nature, stat: StatKind) -> f64 {
    if nature.boosted() == Some(stat) {
        1.1
    } else if nature.reduced() == Some(stat) {
        0.9
    } else {
        1.0
    }
}

/// Derived HP:
/// floor((2*base + iv + floor(ev/4)) * level / 100) + level + 10
pub fn derive_hp(base: u8, level: u8, iv: u8, ev: u8) -> u16 {
    let core = stat_core(base, level, iv, ev);
    core + level as u16 + 10
}

/// Derived non-HP stat:
/// floor((floor((2*base + iv + floor(ev/4)) * level / 100) + 5) * multiplier)
pub fn derive_stat(base: u8, level: u8, iv: u8, ev: u8, multiplier: f64) -> u16 {
    let core = stat_core(base, level, iv, ev);
    ((core + 5) as f64 * multiplier).floor() as u16
}

/// Shared inner term: floor((2*base + iv + floor(ev/4)) * level / 100).
/// Max value is (510 + 31 + 63) * 100 / 100 = 604, well inside u16.
fn stat_core(base: u8, level: u8, iv: u8, ev: u8) -> u16 {
    let genetic = 2 * base as u16 + iv as u16 + ev as u16 / 4;
    genetic * level as u16 / 100
}

/// Derive the full effective stat set for a creature. Pure and
/// deterministic; callers guarantee IV/EV/level ranges.
pub fn derive_stats(
    base: &BaseStats,
    level: u8,
    ivs: &[u8; 6],
    evs: &[u8; 6],
    nature: Nature,
) -> StatSet {
    let mut stats = StatSet::default();
    for stat in StatKind::ALL {
        let i = stat.index();
        stats[stat] = match stat {
            StatKind::Hp => derive_hp(base.hp, level, ivs[i], evs[i]),
            _ => derive_stat(
                base.get(stat),
                level,
                ivs[i],
                evs[i],
                nature_multiplier(nature, stat),
            ),
        };
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn flat_base(value: u8) -> BaseStats {
        BaseStats {
            hp: value,
            attack: value,
            defense: value,
            sp_attack: value,
            sp_defense: value,
            speed: value,
        }
    }

    #[test]
    fn test_neutral_attack_reference_value() {
        // floor((floor((200 + 31 + 63) * 50 / 100) + 5) * 1.0)
        //   = floor((147 + 5) * 1.0) = 152
        assert_eq!(derive_stat(100, 50, 31, 252, 1.0), 152);
    }

    #[test]
    fn test_hp_reference_value() {
        // floor((200 + 31 + 0) * 50 / 100) + 50 + 10 = 115 + 60 = 175
        assert_eq!(derive_hp(100, 50, 31, 0), 175);
    }

    #[test]
    fn test_nature_boost_and_cut() {
        // Adamant: +10% Attack, -10% Sp. Attack
        let base = flat_base(100);
        let stats = derive_stats(&base, 50, &[31; 6], &[252; 6], Nature::Adamant);

        // floor(152 * 1.1) = 167, floor(152 * 0.9) = 136
        assert_eq!(stats.get(StatKind::Attack), 167);
        assert_eq!(stats.get(StatKind::SpAttack), 136);
        // Untouched stats keep the neutral value
        assert_eq!(stats.get(StatKind::Defense), 152);
        assert_eq!(stats.get(StatKind::Speed), 152);
    }

    #[test]
    fn test_hp_ignores_nature() {
        let base = flat_base(100);
        let adamant = derive_stats(&base, 50, &[31; 6], &[0; 6], Nature::Adamant);
        let modest = derive_stats(&base, 50, &[31; 6], &[0; 6], Nature::Modest);
        assert_eq!(adamant.hp(), modest.hp());
        assert_eq!(adamant.hp(), 175);
    }

    #[rstest]
    #[case(Nature::Hardy)]
    #[case(Nature::Docile)]
    #[case(Nature::Serious)]
    #[case(Nature::Bashful)]
    #[case(Nature::Quirky)]
    fn test_neutral_natures_are_identity(#[case] nature: Nature) {
        let base = flat_base(80);
        let neutral = derive_stats(&base, 42, &[20; 6], &[100; 6], nature);
        let reference = derive_stats(&base, 42, &[20; 6], &[100; 6], Nature::Hardy);
        assert_eq!(neutral, reference);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let base = BaseStats {
            hp: 78,
            attack: 84,
            defense: 78,
            sp_attack: 109,
            sp_defense: 85,
            speed: 100,
        };
        let first = derive_stats(&base, 36, &[7, 14, 21, 28, 3, 31], &[0, 4, 8, 12, 16, 20], Nature::Timid);
        let second = derive_stats(&base, 36, &[7, 14, 21, 28, 3, 31], &[0, 4, 8, 12, 16, 20], Nature::Timid);
        assert_eq!(first, second);
    }

    #[test]
    fn test_level_one_floor_behavior() {
        // At level 1 the scaled term almost vanishes: floor(294 * 1 / 100) = 2
        assert_eq!(derive_stat(100, 1, 31, 252, 1.0), 7);
        assert_eq!(derive_hp(100, 1, 31, 252), 2 + 1 + 10);
    }
}
