//! Bestiary table.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{
    ecs::{Size, Stats},
    AiTier, DamageType, Dice, StatusKind, Weapon,
};

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Species {
    #[default]
    None,
    Human,
    GiantRat,
    Bat,
    GiantSpider,
    Orc,
    Skeleton,
    Troll,
    Ettin,
    Headless,
    Jelly,
}

use Species::*;

/// Static description of a creature type.
#[derive(Copy, Clone, Debug)]
pub struct SpeciesData {
    pub name: &'static str,
    pub glyph: char,
    pub stats: Stats,
    pub hit_points: i32,
    pub protection: i32,
    pub size: Size,
    pub attack_name: &'static str,
    pub attack: Weapon,
    pub tier: AiTier,
    pub enemies: &'static [Species],
}

const fn stats(
    strength: i32,
    dexterity: i32,
    toughness: i32,
    perception: i32,
    speed: i32,
) -> Stats {
    Stats {
        strength,
        dexterity,
        intelligence: 5,
        toughness,
        perception,
        speed,
    }
}

const fn attack(
    damage: Dice,
    to_hit: Dice,
    damage_type: DamageType,
    criticals: &'static [StatusKind],
) -> Weapon {
    Weapon::new(damage, to_hit, damage_type, criticals)
}

const fn d(multiplier: i32, sides: i32, additional: i32) -> Dice {
    Dice::new(multiplier, sides, additional)
}

const MONSTERS: &[Species] = &[
    GiantRat,
    Bat,
    GiantSpider,
    Orc,
    Skeleton,
    Troll,
    Ettin,
    Headless,
    Jelly,
];

impl Species {
    pub fn data(self) -> SpeciesData {
        use DamageType::*;
        use StatusKind::*;

        let fists = attack(d(1, 2, 0), d(1, 4, 0), Punch, &[]);

        match self {
            None => SpeciesData {
                name: "thing",
                glyph: '?',
                stats: stats(0, 0, 0, 0, 0),
                hit_points: 1,
                protection: 0,
                size: Size::Medium,
                attack_name: "nothing",
                attack: fists,
                tier: AiTier::Basic,
                enemies: &[],
            },
            Human => SpeciesData {
                name: "human",
                glyph: '@',
                stats: {
                    let mut s = stats(10, 10, 10, 8, 10);
                    s.intelligence = 10;
                    s
                },
                hit_points: 20,
                protection: 0,
                size: Size::Medium,
                attack_name: "fists",
                attack: fists,
                tier: AiTier::Humanoid,
                enemies: MONSTERS,
            },
            GiantRat => SpeciesData {
                name: "giant rat",
                glyph: 'r',
                stats: stats(4, 12, 4, 6, 12),
                hit_points: 6,
                protection: 0,
                size: Size::Small,
                attack_name: "teeth",
                attack: attack(d(1, 3, 0), d(1, 4, 0), Bite, &[]),
                tier: AiTier::Animal,
                enemies: &[Human, Orc],
            },
            Bat => SpeciesData {
                name: "bat",
                glyph: 'b',
                stats: stats(2, 14, 2, 6, 15),
                hit_points: 4,
                protection: 0,
                size: Size::Tiny,
                attack_name: "teeth",
                attack: attack(d(1, 2, 0), d(1, 4, 0), Bite, &[]),
                tier: AiTier::Animal,
                enemies: &[Human],
            },
            GiantSpider => SpeciesData {
                name: "giant spider",
                glyph: 's',
                stats: stats(6, 12, 6, 7, 11),
                hit_points: 10,
                protection: 1,
                size: Size::Small,
                attack_name: "fangs",
                attack: attack(d(1, 4, 0), d(1, 6, 0), Bite, &[]),
                tier: AiTier::Animal,
                enemies: &[Human, GiantRat],
            },
            Orc => SpeciesData {
                name: "orc",
                glyph: 'o',
                stats: stats(12, 8, 10, 7, 9),
                hit_points: 15,
                protection: 1,
                size: Size::Medium,
                attack_name: "fists",
                attack: fists,
                tier: AiTier::Humanoid,
                enemies: &[Human],
            },
            Skeleton => SpeciesData {
                name: "skeleton",
                glyph: 'S',
                stats: stats(10, 9, 8, 7, 9),
                hit_points: 12,
                protection: 1,
                size: Size::Medium,
                attack_name: "bony claws",
                attack: attack(d(1, 4, 0), d(1, 4, 0), Claw, &[]),
                tier: AiTier::Humanoid,
                enemies: &[Human],
            },
            Troll => SpeciesData {
                name: "troll",
                glyph: 'T',
                stats: stats(16, 7, 16, 6, 8),
                hit_points: 30,
                protection: 2,
                size: Size::Large,
                attack_name: "claws",
                attack: attack(d(1, 6, 2), d(1, 4, 0), Claw, &[Bleeding]),
                tier: AiTier::Humanoid,
                enemies: &[Human, Orc],
            },
            Ettin => SpeciesData {
                name: "ettin",
                glyph: 'E',
                stats: stats(18, 6, 18, 7, 7),
                hit_points: 40,
                protection: 2,
                size: Size::Huge,
                attack_name: "fists",
                attack: attack(d(2, 4, 0), d(1, 4, 0), Punch, &[Stunned]),
                tier: AiTier::Humanoid,
                enemies: &[Human],
            },
            Headless => SpeciesData {
                name: "headless",
                glyph: 'h',
                stats: stats(11, 9, 10, 5, 10),
                hit_points: 14,
                protection: 0,
                size: Size::Medium,
                attack_name: "claws",
                attack: attack(d(1, 4, 0), d(1, 4, 0), Claw, &[]),
                tier: AiTier::Humanoid,
                enemies: &[Human],
            },
            Jelly => SpeciesData {
                name: "jelly",
                glyph: 'j',
                stats: stats(6, 2, 12, 3, 5),
                hit_points: 10,
                protection: 0,
                size: Size::Medium,
                attack_name: "pseudopod",
                attack: attack(d(1, 3, 0), d(1, 4, 0), Blunt, &[]),
                tier: AiTier::Basic,
                enemies: &[Human],
            },
        }
    }

    pub fn glyph(self) -> char {
        self.data().glyph
    }

    /// Species drawn with the glyph on ASCII maps. The player glyph is
    /// handled separately.
    pub fn from_glyph(c: char) -> Option<Species> {
        Species::iter()
            .filter(|s| !matches!(s, None | Human))
            .find(|s| s.glyph() == c)
    }

    pub fn ai_tier(self) -> AiTier {
        self.data().tier
    }

    /// Hostility is one-directional, a rat attacking orcs doesn't make orcs
    /// attack rats.
    pub fn is_hostile_to(self, other: Species) -> bool {
        self.data().enemies.contains(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bestiary() {
        for s in Species::iter().filter(|s| !matches!(s, None | Human)) {
            assert_eq!(Species::from_glyph(s.glyph()), Some(s));
            let data = s.data();
            assert!(data.hit_points > 0);
            assert!(data.stats.speed > 0);
            assert!(Human.is_hostile_to(s));
        }
        assert_eq!(Species::from_glyph('@'), Option::None);
        assert_eq!("giant-rat".parse::<Species>(), Ok(GiantRat));
    }

    #[test]
    fn tiers() {
        for s in [GiantRat, Bat, GiantSpider] {
            assert_eq!(s.ai_tier(), AiTier::Animal);
        }
        for s in [Orc, Skeleton, Troll, Ettin, Headless] {
            assert_eq!(s.ai_tier(), AiTier::Humanoid);
        }
        assert_eq!(Jelly.ai_tier(), AiTier::Basic);
    }

    #[test]
    fn hostility_is_one_way() {
        assert!(GiantRat.is_hostile_to(Orc));
        assert!(!Orc.is_hostile_to(GiantRat));
        assert!(Orc.is_hostile_to(Human));
    }
}
