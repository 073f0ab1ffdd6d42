//! Terrain of individual map cells.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Dice, Error, Location};

/// Specific terrain in a single level map cell.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CellKind {
    #[default]
    Wall,
    Floor,
    Grass,
    Bush,
    DoorClosed,
    DoorOpen,
    DeepWater,
    Lava,
    StairsDown,
    StairsUp,
}

use CellKind::*;

/// Something that happens to a creature entering a cell.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum WalkEffect {
    /// Fire damage, the text is the message template for getting hurt.
    Burn(Dice, &'static str),
    /// Flavor message template.
    Message(&'static str),
}

impl CellKind {
    pub fn blocks_movement(self) -> bool {
        matches!(self, Wall | DoorClosed)
    }

    pub fn blocks_los(self) -> bool {
        matches!(self, Wall | DoorClosed | Bush)
    }

    /// Whether the player must confirm stepping into the cell.
    pub fn confirm_movement(self) -> bool {
        matches!(self, DeepWater | Lava)
    }

    pub fn confirm_prompt(self) -> Option<&'static str> {
        match self {
            Lava => Some("Really step into the lava?"),
            DeepWater => Some("Really wade into the deep water?"),
            _ => None,
        }
    }

    pub fn walk_effect(self) -> Option<WalkEffect> {
        match self {
            Lava => Some(WalkEffect::Burn(
                Dice::new(1, 6, 2),
                "[One] [is] burned by the lava!",
            )),
            DeepWater => {
                Some(WalkEffect::Message("[One] wade[s] through deep water."))
            }
            Bush => Some(WalkEffect::Message("[One] push[es] through the bush.")),
            _ => None,
        }
    }

    pub fn is_door(self) -> bool {
        matches!(self, DoorClosed | DoorOpen)
    }

    /// Sprite keys the view layer can draw the terrain with.
    pub fn sprites(self) -> &'static [&'static str] {
        match self {
            Wall => &["wall-1", "wall-2", "wall-3"],
            Floor => &["floor-1", "floor-2", "floor-3", "floor-4"],
            Grass => &["grass-1", "grass-2"],
            Bush => &["bush"],
            DoorClosed => &["door-closed"],
            DoorOpen => &["door-open"],
            DeepWater => &["deep-water-1", "deep-water-2"],
            Lava => &["lava-1", "lava-2"],
            StairsDown => &["stairs-down"],
            StairsUp => &["stairs-up"],
        }
    }

    pub fn glyph(self) -> char {
        // NB. This must match the TryFrom inputs below.
        match self {
            Wall => '#',
            Floor => '.',
            Grass => ',',
            Bush => '%',
            DoorClosed => '+',
            DoorOpen => '\'',
            DeepWater => '~',
            Lava => '&',
            StairsDown => '>',
            StairsUp => '<',
        }
    }
}

impl TryFrom<char> for CellKind {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '#' => Ok(Wall),
            '.' => Ok(Floor),
            ',' => Ok(Grass),
            '%' => Ok(Bush),
            '+' => Ok(DoorClosed),
            '\'' => Ok(DoorOpen),
            '~' => Ok(DeepWater),
            '&' => Ok(Lava),
            '>' => Ok(StairsDown),
            '<' => Ok(StairsUp),
            c => Err(Error::UnknownCellType(c.to_string())),
        }
    }
}

/// State of a single map cell.
///
/// Creatures and items in the cell are tracked by the runtime's placement
/// index, not the cell.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    display: String,
    discovered: bool,
    bloodied: bool,
}

impl Cell {
    /// Make a new cell, picking a sprite variant seeded by the location.
    pub fn new(kind: CellKind, loc: Location) -> Self {
        Cell {
            kind,
            display: Self::pick_sprite(kind, loc),
            discovered: false,
            bloodied: false,
        }
    }

    pub(crate) fn restore(
        kind: CellKind,
        display: String,
        discovered: bool,
        bloodied: bool,
    ) -> Self {
        Cell {
            kind,
            display,
            discovered,
            bloodied,
        }
    }

    fn pick_sprite(kind: CellKind, loc: Location) -> String {
        kind.sprites()
            .choose(&mut util::srng(&loc))
            .copied()
            .unwrap_or_default()
            .to_string()
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    pub fn is_bloodied(&self) -> bool {
        self.bloodied
    }

    /// Change the terrain type, the sprite is reselected only if the type
    /// actually changes.
    pub(crate) fn set_kind(&mut self, kind: CellKind, loc: Location) {
        if kind != self.kind {
            self.kind = kind;
            self.display = Self::pick_sprite(kind, loc);
        }
    }

    /// Discovery is permanent.
    pub(crate) fn discover(&mut self) {
        self.discovered = true;
    }

    pub(crate) fn bloody(&mut self) {
        self.bloodied = true;
    }

    pub fn blocks_movement(&self) -> bool {
        self.kind.blocks_movement()
    }

    pub fn blocks_los(&self) -> bool {
        self.kind.blocks_los()
    }

    pub fn confirm_movement(&self) -> bool {
        self.kind.confirm_movement()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::LevelId;

    #[test]
    fn glyphs_round_trip() {
        for kind in CellKind::iter() {
            assert_eq!(CellKind::try_from(kind.glyph()).unwrap(), kind);
            assert!(!kind.sprites().is_empty());
        }
        assert!(matches!(
            CellKind::try_from('Q'),
            Err(Error::UnknownCellType(_))
        ));
    }

    #[test]
    fn terrain_flags() {
        assert!(Wall.blocks_movement() && Wall.blocks_los());
        assert!(Bush.blocks_los() && !Bush.blocks_movement());
        assert!(Lava.confirm_movement() && !Lava.blocks_movement());
        assert!(!DoorOpen.blocks_los() && DoorClosed.blocks_los());
        assert!(DoorOpen.is_door() && DoorClosed.is_door() && !Wall.is_door());
        assert!(matches!(Lava.walk_effect(), Some(WalkEffect::Burn(..))));
        assert_eq!(Floor.walk_effect(), None);
    }

    #[test]
    fn sprite_is_stable() {
        let loc = Location::new(LevelId(0), 7, 3);
        let mut cell = Cell::new(Floor, loc);
        let sprite = cell.display().to_string();
        assert_eq!(Cell::new(Floor, loc).display(), sprite);
        assert!(Floor.sprites().contains(&sprite.as_str()));

        // Setting same kind keeps the sprite.
        cell.set_kind(Floor, loc);
        assert_eq!(cell.display(), sprite);

        cell.set_kind(DoorOpen, loc);
        assert_eq!(cell.display(), "door-open");
    }

    #[test]
    fn names() {
        assert_eq!(DeepWater.to_string(), "deep-water");
        assert_eq!("door-closed".parse::<CellKind>().unwrap(), DoorClosed);
    }
}
