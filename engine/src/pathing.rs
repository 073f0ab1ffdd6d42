use pathfinding::prelude::*;
use util::{dijkstra_map, within_range};

use crate::prelude::*;

impl Runtime {
    /// Shortest 8-connected path from start to goal, both included.
    ///
    /// The goal only needs to be walkable, intermediate steps must also be
    /// free of creatures. Returns an empty path if there's no way through.
    pub fn find_path(&self, start: Location, goal: Location) -> Vec<Location> {
        if start == goal {
            return vec![start];
        }
        if start.level != goal.level || goal.blocks_movement(self) {
            return Vec::new();
        }

        astar(
            &start,
            |loc| {
                loc.neighbors_8()
                    .filter(|n| {
                        *n == goal
                            || (n.is_walkable(self) && n.mob_at(self).is_none())
                    })
                    .map(|n| (n, 1))
                    .collect::<Vec<_>>()
            },
            |loc| loc.chess_distance(&goal).unwrap_or(i32::MAX),
            |loc| *loc == goal,
        )
        .map(|(path, _)| path)
        .unwrap_or_default()
    }

    /// Closest walkable unoccupied location to `loc` within `range` steps.
    pub fn open_spot_near(
        &self,
        loc: Location,
        range: usize,
    ) -> Option<Location> {
        dijkstra_map(
            |l: &Location| {
                l.neighbors_8()
                    .filter(|n| n.is_walkable(self))
                    .collect::<Vec<_>>()
            },
            [loc],
        )
        .take_while(within_range(range + 1))
        .map(|(l, _)| l)
        .find(|l| l.is_walkable(self) && l.mob_at(self).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "
        #######
        #@....#
        #.###.#
        #.#r..#
        #######";

    #[test]
    fn trivial_paths() {
        let r = Runtime::from_ascii(MAP).unwrap();
        let start = r.player().unwrap().loc(&r).unwrap();
        assert_eq!(r.find_path(start, start), vec![start]);

        let wall = start + ivec2(2, 1);
        assert!(wall.blocks_movement(&r));
        assert!(r.find_path(start, wall).is_empty());

        let other_level = Location::new(LevelId(9), 1, 1);
        assert!(r.find_path(start, other_level).is_empty());
    }

    #[test]
    fn paths_avoid_mobs() {
        let r = Runtime::from_ascii(MAP).unwrap();
        let start = r.player().unwrap().loc(&r).unwrap();
        let goal = start + ivec2(0, 2);
        let rat = start + ivec2(2, 2);
        assert!(rat.mob_at(&r).is_some());

        let path = r.find_path(start, goal);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len(), 3);
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(&w[1]));
        }

        // The left side is walled off and the rat sits in the bottom
        // corridor, only the long way around the top gets there.
        let far = start + ivec2(3, 2);
        let path = r.find_path(start, far);
        assert!(!path.is_empty());
        for loc in &path[1..path.len() - 1] {
            assert!(loc.mob_at(&r).is_none());
        }
        assert!(!path.contains(&rat));

        // An occupied goal is still a valid destination.
        let path = r.find_path(start, rat);
        assert_eq!(path.last(), Some(&rat));
    }

    #[test]
    fn open_spots() {
        let r = Runtime::from_ascii(MAP).unwrap();
        let start = r.player().unwrap().loc(&r).unwrap();
        let spot = r.open_spot_near(start, 3).unwrap();
        assert!(spot.is_adjacent(&start));
        assert!(r.open_spot_near(start, 0).is_none());
    }
}
