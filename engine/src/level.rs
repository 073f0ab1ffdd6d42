//! Rectangular cell grids for single dungeon levels.

use serde::{Deserialize, Serialize};
use util::StrExt;

use crate::{prelude::*, Cell, CellKind, ItemType, Species};

/// What to put in a cell when a level is loaded.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Spawn {
    Player,
    Monster(Species),
    Item(ItemType),
}

impl Spawn {
    fn from_glyph(c: char) -> Option<Spawn> {
        if c == '@' {
            Some(Spawn::Player)
        } else if let Some(species) = Species::from_glyph(c) {
            Some(Spawn::Monster(species))
        } else {
            ItemType::from_glyph(c).map(Spawn::Item)
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Level {
    id: LevelId,
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Level {
    /// Create a level filled with a single type of terrain.
    pub fn new(id: LevelId, width: i32, height: i32, fill: CellKind) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| Cell::new(fill, Location::new(id, x, y)))
            .collect();
        Level {
            id,
            width,
            height,
            cells,
        }
    }

    /// Build a level from an ASCII map.
    ///
    /// Terrain glyphs map to cells directly. Creature and item glyphs stand
    /// on a floor cell and are returned as a spawn list. Blank positions
    /// inside the map's bounding box become walls.
    pub fn parse(id: LevelId, map: &str) -> Result<(Level, Vec<(Location, Spawn)>)> {
        let grid: Vec<(IVec2, char)> = map.char_grid().collect();
        let width = grid.iter().map(|(p, _)| p.x + 1).max().unwrap_or(0);
        let height = grid.iter().map(|(p, _)| p.y + 1).max().unwrap_or(0);

        let mut level = Level::new(id, width, height, CellKind::Wall);
        let mut spawns = Vec::new();

        for (pos, c) in grid {
            let loc = Location::new(id, pos.x, pos.y);
            let kind = if let Some(spawn) = Spawn::from_glyph(c) {
                spawns.push((loc, spawn));
                CellKind::Floor
            } else {
                CellKind::try_from(c)?
            };
            level.set_kind(pos, kind);
        }

        Ok((level, spawns))
    }

    /// Reassemble a level from stored cells.
    pub(crate) fn from_cells(
        id: LevelId,
        width: i32,
        height: i32,
        cells: impl IntoIterator<Item = (IVec2, Cell)>,
    ) -> Self {
        let mut level = Level::new(id, width, height, CellKind::Wall);
        for (pos, cell) in cells {
            if let Some(c) = level.get_mut(pos) {
                *c = cell;
            }
        }
        level
    }

    pub fn id(&self) -> LevelId {
        self.id
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.x + pos.y * self.width) as usize)
    }

    pub fn get(&self, pos: IVec2) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub(crate) fn get_mut(&mut self, pos: IVec2) -> Option<&mut Cell> {
        self.index(pos).map(|i| &mut self.cells[i])
    }

    pub(crate) fn set_kind(&mut self, pos: IVec2, kind: CellKind) {
        let loc = Location::new(self.id, pos.x, pos.y);
        if let Some(c) = self.get_mut(pos) {
            c.set_kind(kind, loc);
        }
    }

    /// All cells of the level in row order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, &Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| {
            let i = i as i32;
            (Location::new(self.id, i % self.width, i / self.width), c)
        })
    }

    /// Render the terrain as an ASCII map.
    pub fn to_ascii(&self) -> String {
        let mut ret = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(c) = self.get(ivec2(x, y)) {
                    ret.push(c.kind().glyph());
                }
            }
            ret.push('\n');
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_map() {
        let (level, spawns) = Level::parse(
            LevelId(3),
            "
            #####
            #@.r#
            #(~&#
            ####",
        )
        .unwrap();

        assert_eq!(level.width(), 5);
        assert_eq!(level.height(), 4);
        assert_eq!(level.get(ivec2(2, 2)).unwrap().kind(), CellKind::DeepWater);
        // Spawn glyphs leave floor behind.
        assert_eq!(level.get(ivec2(1, 1)).unwrap().kind(), CellKind::Floor);
        // Short last row is padded with wall.
        assert_eq!(level.get(ivec2(4, 3)).unwrap().kind(), CellKind::Wall);
        assert!(level.get(ivec2(5, 0)).is_none());
        assert!(level.get(ivec2(-1, 0)).is_none());

        let at = |x, y| Location::new(LevelId(3), x, y);
        assert_eq!(
            spawns,
            vec![
                (at(1, 1), Spawn::Player),
                (at(3, 1), Spawn::Monster(Species::GiantRat)),
                (at(1, 2), Spawn::Item(ItemType::Dagger)),
            ]
        );

        assert_eq!(
            level.to_ascii(),
            "#####\n#...#\n#.~&#\n#####\n"
        );
    }

    #[test]
    fn unknown_glyph() {
        assert!(matches!(
            Level::parse(LevelId(0), "#?#"),
            Err(Error::UnknownCellType(c)) if c == "?"
        ));
    }
}
