use std::fmt;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use util::{Noun, Sentence, StrExt, VecExt, DIR_8};

use crate::{prelude::*, Cell, CellKind};

/// Identifier of a dungeon level.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Display,
    Serialize,
    Deserialize,
)]
pub struct LevelId(pub u32);

/// Position of a single cell in the dungeon.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Serialize,
    Deserialize,
)]
pub struct Location {
    pub level: LevelId,
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn new(level: LevelId, x: i32, y: i32) -> Self {
        Location { level, x, y }
    }

    pub fn pos(&self) -> IVec2 {
        ivec2(self.x, self.y)
    }

    /// Vector from this location to other if they're on the same level.
    pub fn vec_towards(&self, other: &Location) -> Option<IVec2> {
        (self.level == other.level).then(|| other.pos() - self.pos())
    }

    /// Number of king's moves to other location on the same level.
    pub fn chess_distance(&self, other: &Location) -> Option<i32> {
        self.vec_towards(other).map(|v| v.chess_len())
    }

    pub fn is_adjacent(&self, other: &Location) -> bool {
        self.chess_distance(other) == Some(1)
    }

    pub fn neighbors_8(self) -> impl Iterator<Item = Location> {
        DIR_8.into_iter().map(move |d| self + d)
    }

    pub fn cell<'a>(&self, r: &'a impl AsRef<Runtime>) -> Option<&'a Cell> {
        r.as_ref().levels.get(&self.level)?.get(self.pos())
    }

    pub(crate) fn cell_mut<'a>(
        &self,
        r: &'a mut impl AsMut<Runtime>,
    ) -> Option<&'a mut Cell> {
        r.as_mut().levels.get_mut(&self.level)?.get_mut(self.pos())
    }

    /// Terrain at location, `None` if the location is off the map.
    pub fn kind(&self, r: &impl AsRef<Runtime>) -> Option<CellKind> {
        self.cell(r).map(|c| c.kind())
    }

    pub fn is_on_map(&self, r: &impl AsRef<Runtime>) -> bool {
        self.cell(r).is_some()
    }

    /// Off-map locations block everything.
    pub fn blocks_movement(&self, r: &impl AsRef<Runtime>) -> bool {
        self.kind(r).map_or(true, |k| k.blocks_movement())
    }

    pub fn blocks_sight(&self, r: &impl AsRef<Runtime>) -> bool {
        self.kind(r).map_or(true, |k| k.blocks_los())
    }

    pub fn is_walkable(&self, r: &impl AsRef<Runtime>) -> bool {
        !self.blocks_movement(r)
    }

    /// Stepping here should be confirmed by the player first.
    pub fn needs_confirmation(&self, r: &impl AsRef<Runtime>) -> bool {
        self.kind(r).is_some_and(|k| k.confirm_movement())
    }

    pub fn is_explored(&self, r: &impl AsRef<Runtime>) -> bool {
        self.cell(r).is_some_and(|c| c.is_discovered())
    }

    pub fn entities_at<'a>(
        &self,
        r: &'a impl AsRef<Runtime>,
    ) -> impl Iterator<Item = Entity> + 'a {
        let r = r.as_ref();
        r.placement.entities_at(*self)
    }

    /// The living creature standing here, if any.
    ///
    /// Corpses linger until the end of the tick but no longer occupy their
    /// cell.
    pub fn mob_at(&self, r: &impl AsRef<Runtime>) -> Option<Entity> {
        self.entities_at(r).find(|e| e.is_mob(r) && e.is_alive(r))
    }

    /// Items lying on the ground here, in the order they were dropped.
    pub fn items_at(&self, r: &impl AsRef<Runtime>) -> Vec<Entity> {
        self.entities_at(r).filter(|e| e.is_item(r)).collect()
    }

    /// Printable description of what lies on the ground here.
    pub fn describe_items(
        &self,
        r: &impl AsRef<Runtime>,
        viewer: &Entity,
    ) -> Option<String> {
        let items = self.items_at(r);
        let first = items.first()?;
        let subject = viewer.noun(r);
        let object = if items.len() > 1 {
            Noun::Plural(format!("{} items", items.len()))
        } else {
            first.noun(r)
        };
        "[One] see[s] [a thing] here."
            .templatize(|t| Sentence::new(&subject, &object).convert(t))
            .ok()
    }
}

impl std::ops::Add<IVec2> for Location {
    type Output = Location;

    fn add(self, rhs: IVec2) -> Self::Output {
        Location::new(self.level, self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}", self.level, self.x, self.y)
    }
}
