use std::collections::BTreeMap;

use crate::prelude::*;

/// Where an entity is held: inside another entity or on a map cell.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Place {
    In(Entity),
    At(Location),
}

use Place::*;

impl From<Entity> for Place {
    fn from(e: Entity) -> Self {
        In(e)
    }
}

impl From<Location> for Place {
    fn from(loc: Location) -> Self {
        At(loc)
    }
}

/// Spatial index, used for efficiently finding locations of entities and
/// entities at locations.
///
/// Every entity has at most one place, so moving an item between holders is
/// a single index update.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Placement {
    places: BTreeMap<Entity, Place>,
    entities: IndexMap<Place, IndexSet<Entity>>,
}

impl Placement {
    pub fn entities_at(
        &self,
        loc: Location,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.entities
            .get(&At(loc))
            .into_iter()
            .flatten()
            .copied()
    }

    pub fn entities_in(
        &self,
        container: &Entity,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.entities
            .get(&In(*container))
            .into_iter()
            .flatten()
            .copied()
    }

    /// Entities placed directly on the given level.
    pub fn entities_on(
        &self,
        level: LevelId,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.places.iter().filter_map(move |(e, p)| match p {
            At(loc) if loc.level == level => Some(*e),
            _ => None,
        })
    }

    pub fn get(&self, e: &Entity) -> Option<Place> {
        self.places.get(e).copied()
    }

    pub fn entity_pos(&self, e: &Entity) -> Option<Location> {
        match self.places.get(e) {
            None => None,
            Some(At(loc)) => Some(*loc),
            Some(In(e)) => self.entity_pos(e),
        }
    }

    pub fn remove(&mut self, e: &Entity) {
        if let Some(place) = self.places.remove(e) {
            if let Some(set) = self.entities.get_mut(&place) {
                // Keep the order of the remaining entities, cell inventories
                // are listed in drop order.
                set.shift_remove(e);
                if set.is_empty() {
                    self.entities.swap_remove(&place);
                }
            }
        }
    }

    pub fn contains(&self, container: &Entity, e: &Entity) -> bool {
        for i in self.entities_in(container) {
            if e == &i {
                return true;
            }
            if self.contains(&i, e) {
                return true;
            }
        }
        false
    }

    pub fn insert_at(&mut self, loc: Location, e: Entity) {
        self.insert(loc.into(), e);
    }

    pub fn insert_in(&mut self, container: &Entity, e: Entity) {
        assert!(
            *container != e && !self.contains(&e, container),
            "Placement::insert_in: Containment loop"
        );
        self.insert((*container).into(), e);
    }

    fn insert(&mut self, place: Place, e: Entity) {
        self.remove(&e);
        self.places.insert(e, place);
        self.entities.entry(place).or_default().insert(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ent(n: u32) -> Entity {
        Entity(hecs::Entity::from_bits(u64::from(n) | (1 << 32)).unwrap())
    }

    #[test]
    fn single_holder() {
        let mut p = Placement::default();
        let loc = Location::new(LevelId(0), 2, 3);
        let (mob, sword, ring) = (ent(1), ent(2), ent(3));

        p.insert_at(loc, mob);
        p.insert_at(loc, sword);
        p.insert_at(loc, ring);
        assert_eq!(p.entities_at(loc).collect::<Vec<_>>(), vec![mob, sword, ring]);

        p.insert_in(&mob, sword);
        assert_eq!(p.entities_at(loc).collect::<Vec<_>>(), vec![mob, ring]);
        assert_eq!(p.entities_in(&mob).collect::<Vec<_>>(), vec![sword]);
        assert_eq!(p.entity_pos(&sword), Some(loc));
        assert!(p.contains(&mob, &sword));

        p.remove(&mob);
        assert_eq!(p.entity_pos(&mob), None);
        assert_eq!(p.get(&sword), Some(In(mob)));
        assert_eq!(p.entities_on(LevelId(0)).collect::<Vec<_>>(), vec![ring]);
    }

    #[test]
    fn empty_places_are_dropped() {
        let mut p = Placement::default();
        let (mob, sword) = (ent(1), ent(2));

        for x in 0..100 {
            p.insert_at(Location::new(LevelId(0), x, 0), mob);
        }
        p.insert_in(&mob, sword);
        assert_eq!(p.entities.len(), 2);

        p.remove(&sword);
        p.remove(&mob);
        assert_eq!(p, Placement::default());
    }

    #[test]
    #[should_panic]
    fn no_containment_loops() {
        let mut p = Placement::default();
        let (a, b) = (ent(1), ent(2));
        p.insert_in(&a, b);
        p.insert_in(&b, a);
    }
}
