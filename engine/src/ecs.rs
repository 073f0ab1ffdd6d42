//! Component types stored in the entity component system.

use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{prelude::*, Dice, Status, StatusKind, Weapon};

/// Entity component system. Stores all the data of game entities.
#[derive(Default, Deref, DerefMut)]
pub(crate) struct Ecs(pub(crate) hecs::World);

impl Ecs {
    pub(crate) fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        (&self.0).into_iter().map(|he| Entity(he.entity()))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Name(pub String);

/// Sprite key for the view layer.
#[derive(Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Sprite(pub String);

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct IsMob(pub bool);

/// Names of the base attributes.
#[derive(
    Copy,
    Clone,
    Debug,
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
pub enum Stat {
    Strength,
    Dexterity,
    Intelligence,
    Toughness,
    Perception,
    Speed,
}

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct Stats {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub toughness: i32,
    /// Sight radius.
    pub perception: i32,
    /// Energy gained per scheduler tick.
    pub speed: i32,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Dexterity => self.dexterity,
            Stat::Intelligence => self.intelligence,
            Stat::Toughness => self.toughness,
            Stat::Perception => self.perception,
            Stat::Speed => self.speed,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Dexterity => &mut self.dexterity,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Toughness => &mut self.toughness,
            Stat::Perception => &mut self.perception,
            Stat::Speed => &mut self.speed,
        }
    }
}

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub hit_points: i32,
    pub max_hit_points: i32,
}

/// Natural armor of a creature.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct Protection(pub i32);

/// Body size, affects how hard the creature is to hit.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Size {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

impl Size {
    /// Defense modifier, small things are harder to hit.
    pub fn dice(self) -> Dice {
        match self {
            Size::Tiny => Dice::new(1, 6, 0),
            Size::Small => Dice::new(1, 4, 0),
            Size::Medium => Dice::new(0, 0, 0),
            Size::Large => Dice::new(-1, 4, 0),
            Size::Huge => Dice::new(-1, 6, 0),
        }
    }
}

/// Attack a creature makes without a wielded weapon.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct NaturalWeapon {
    pub name: &'static str,
    pub weapon: Weapon,
}

/// Timed change to a base attribute.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub stat: Stat,
    pub amount: i32,
    /// Owner turns until the modifier wears off.
    pub remaining: i32,
    /// Status whose duration the modifier follows.
    pub tied_to: Option<StatusKind>,
}

#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    Default,
    Deref,
    DerefMut,
    Serialize,
    Deserialize,
)]
pub struct Modifiers(pub Vec<Modifier>);

/// Active status effects, at most one of each kind.
#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    Default,
    Deref,
    DerefMut,
    Serialize,
    Deserialize,
)]
pub struct Statuses(pub Vec<Status>);

/// Where a wandering monster is headed when it has nothing better to do.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct IdleTarget(pub Option<Location>);

/// Location the entity stood on before its last step.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct LastLocation(pub Option<Location>);

/// Cells the entity currently sees, in scan order.
#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    Default,
    Deref,
    Serialize,
    Deserialize,
)]
pub struct Vision(pub Vec<Location>);

/// Scheduler accumulator, the entity acts when this fills up.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct Energy(pub i32);

/// Protection granted by a worn armour item.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
pub struct Armour(pub i32);
