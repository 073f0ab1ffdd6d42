//! Field of view from creatures and revealing unexplored terrain.

use crate::{ecs::Vision, prelude::*};

impl Runtime {
    /// Cells visible from `loc` closer than `radius`, origin first.
    ///
    /// Opaque cells that are seen are included, they just hide what is
    /// behind them. Each location is listed once.
    pub fn fov_from(
        &self,
        loc: Location,
        radius: i32,
    ) -> impl Iterator<Item = Location> + '_ {
        #[derive(Copy, Clone)]
        struct FovState<'a> {
            origin: Location,
            r: &'a Runtime,
            radius: i32,
            is_edge: bool,
        }

        impl PartialEq for FovState<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.origin == other.origin
                    && self.radius == other.radius
                    && self.is_edge == other.is_edge
            }
        }

        impl Eq for FovState<'_> {}

        impl fov::State for FovState<'_> {
            type Vector = IVec2;

            fn advance(&self, offset: Self::Vector) -> Option<Self> {
                if self.is_edge {
                    return None;
                }

                if offset.length2() >= self.radius * self.radius {
                    return None;
                }

                let loc = self.origin + offset;
                let is_edge = loc.blocks_sight(self.r);

                Some(FovState { is_edge, ..*self })
            }
        }

        let origin = FovState {
            origin: loc,
            r: self,
            radius,
            is_edge: false,
        };

        let mut seen = HashSet::default();
        let scan = (radius > 0)
            .then(|| fov::Square::<_, IVec2>::new(origin))
            .into_iter()
            .flatten()
            .map(move |(v, _)| loc + v);

        // The origin is visible whatever it's made of.
        std::iter::once(loc)
            .chain(scan)
            .filter(move |loc| loc.is_on_map(self) && seen.insert(*loc))
    }
}

impl Entity {
    /// Locations the entity sees, in scan order.
    pub fn vision(&self, r: &impl AsRef<Runtime>) -> Vec<Location> {
        self.get::<Vision>(r).0
    }

    pub fn can_see(&self, r: &impl AsRef<Runtime>, loc: &Location) -> bool {
        self.with::<Vision, _>(r, |v| v.contains(loc))
    }

    /// Recompute what the entity sees and mark it explored.
    ///
    /// Opaque cells get discovered but are left out of the vision set, only
    /// the entity's own cell is kept regardless of what it is.
    pub fn compute_fov(&self, r: &mut impl AsMut<Runtime>) -> Vec<Location> {
        let r = r.as_mut();
        let Some(origin) = self.loc(r) else {
            self.set(r, Vision::default());
            return Vec::new();
        };

        let reached: Vec<Location> =
            r.fov_from(origin, self.sight_radius(r)).collect();

        let mut visible = Vec::with_capacity(reached.len());
        for loc in reached {
            if let Some(cell) = loc.cell_mut(r) {
                cell.discover();
            }
            if loc == origin || !loc.blocks_sight(r) {
                visible.push(loc);
            }
        }

        self.set(r, Vision(visible.clone()));
        visible
    }
}
