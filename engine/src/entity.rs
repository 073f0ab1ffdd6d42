//! Generic entity logic.
use std::{fmt, str::FromStr};

use derive_more::Deref;
use hecs::Component;
use util::Noun;

use crate::{ecs::*, placement::Place, prelude::*};

// Dummy wrapper so we can write impls for it directly instead of deriving a
// trait for hecs::Entity and writing every fn signature twice.
/// Game entity identifier datatype. All the actual contents live in the ECS.
#[derive(
    Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug, Deref,
)]
pub struct Entity(pub(crate) hecs::Entity);

impl Entity {
    pub(crate) fn get<T>(&self, r: &impl AsRef<Runtime>) -> T
    where
        T: Component + Clone + Default,
    {
        let r = r.as_ref();
        r.ecs
            .get::<&T>(**self)
            .map(|c| (*c).clone())
            .unwrap_or_default()
    }

    pub(crate) fn set<T>(&self, r: &mut impl AsMut<Runtime>, val: T)
    where
        T: Component + Default + PartialEq,
    {
        let r = r.as_mut();
        if val == T::default() {
            // Remove default values, abstraction layer assumes components are
            // always present but defaulted.
            //
            // Will give an error if the component wasn't there to begin with,
            // just ignore that.
            let _ = r.ecs.remove_one::<T>(**self);
        } else if r.ecs.insert_one(**self, val).is_err() {
            log::warn!("Entity::set: {self} no longer exists");
        }
    }

    /// Access a component using a closure.
    ///
    /// Use for complex components that aren't just atomic values.
    pub(crate) fn with<T: Component + Default, U>(
        &self,
        r: &impl AsRef<Runtime>,
        f: impl Fn(&T) -> U,
    ) -> U {
        let r = r.as_ref();
        let scratch = T::default();
        if let Ok(c) = r.ecs.get::<&T>(**self) {
            f(&*c)
        } else {
            f(&scratch)
        }
    }

    /// Access and mutate a component using a closure.
    ///
    /// Use for complex components that aren't just atomic values.
    pub(crate) fn with_mut<T: Component + Default + Eq, U>(
        &self,
        r: &mut impl AsMut<Runtime>,
        mut f: impl FnMut(&mut T) -> U,
    ) -> U {
        let r = r.as_mut();
        let mut delete = false;
        let mut insert = false;
        let ret;

        let mut scratch = T::default();
        if let Ok(query) = r.ecs.query_one_mut::<&mut T>(**self) {
            ret = f(&mut *query);
            if *query == scratch {
                delete = true;
            }
        } else {
            ret = f(&mut scratch);
            if scratch != T::default() {
                insert = true;
            }
        }

        if delete {
            let _ = r.ecs.remove_one::<T>(**self);
        } else if insert && r.ecs.insert_one(**self, scratch).is_err() {
            log::warn!("Entity::with_mut: {self} no longer exists");
        }

        ret
    }

    /// Numeric id, stable for the lifetime of the entity.
    pub fn id(&self) -> u64 {
        self.0.to_bits().get()
    }

    /// Entity still has its components in the ECS.
    pub fn exists(&self, r: &impl AsRef<Runtime>) -> bool {
        r.as_ref().ecs.contains(**self)
    }

    pub fn loc(&self, r: &impl AsRef<Runtime>) -> Option<Location> {
        let r = r.as_ref();
        r.placement.entity_pos(self)
    }

    /// Where the entity is held, on the ground or in a container.
    pub fn place_of(&self, r: &impl AsRef<Runtime>) -> Option<Place> {
        r.as_ref().placement.get(self)
    }

    pub fn place(&self, r: &mut impl AsMut<Runtime>, place: impl Into<Place>) {
        let r = r.as_mut();
        match place.into() {
            Place::At(loc) => r.placement.insert_at(loc, *self),
            Place::In(container) => r.placement.insert_in(&container, *self),
        }
    }

    pub fn name(&self, r: &impl AsRef<Runtime>) -> String {
        self.get::<Name>(r).0
    }

    /// Sprite key for the view layer.
    pub fn display(&self, r: &impl AsRef<Runtime>) -> String {
        self.get::<Sprite>(r).0
    }

    /// Get the noun for this entity that is used in grammar templating.
    pub fn noun(&self, r: &impl AsRef<Runtime>) -> Noun {
        if self.is_player(r) {
            Noun::You
        } else {
            Noun::It(self.name(r))
        }
    }

    /// Living mobs have positive health, items are alive while they're
    /// somewhere in the world.
    pub fn is_alive(&self, r: &impl AsRef<Runtime>) -> bool {
        if !self.exists(r) {
            return false;
        }
        if self.is_mob(r) {
            self.hit_points(r) > 0
        } else {
            self.place_of(r).is_some()
        }
    }

    pub fn can_enter(&self, r: &impl AsRef<Runtime>, loc: Location) -> bool {
        let r = r.as_ref();

        if !loc.is_walkable(r) {
            return false;
        }
        if self.is_mob(r) && loc.mob_at(r).is_some_and(|m| m != *self) {
            return false;
        }

        true
    }

    /// Remove entity from the world.
    pub fn destroy(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        for e in self.contents(r).collect::<Vec<_>>() {
            e.destroy(r);
        }
        r.placement.remove(self);
        let _ = r.ecs.despawn(**self);
    }

    pub fn contents<'a>(
        &self,
        r: &'a impl AsRef<Runtime>,
    ) -> impl Iterator<Item = Entity> + 'a {
        let r = r.as_ref();
        r.placement.entities_in(self)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id())
    }
}

impl FromStr for Entity {
    type Err = &'static str;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some(n) = s.strip_prefix('#') else {
            return Err("bad entity");
        };
        let n: u64 = n.parse().map_err(|_| "bad entity")?;
        Ok(Entity(hecs::Entity::from_bits(n).ok_or("bad entity")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemType;

    #[test]
    fn id_strings() {
        let mut r = Runtime::default();
        let e = r.spawn_item(ItemType::Dagger);
        let s = e.to_string();
        assert!(s.starts_with('#'));
        assert_eq!(s.parse::<Entity>(), Ok(e));
        assert!("12".parse::<Entity>().is_err());
        assert!("#x".parse::<Entity>().is_err());
    }

    #[test]
    fn default_components_are_removed() {
        let mut r = Runtime::default();
        let e = r.spawn_item(ItemType::Dagger);
        e.set(&mut r, Energy(5));
        assert_eq!(e.get::<Energy>(&r), Energy(5));
        e.set(&mut r, Energy(0));
        assert!(r.ecs.get::<&Energy>(e.0).is_err());

        e.with_mut::<Modifiers, _>(&mut r, |m| {
            m.push(Modifier {
                stat: Stat::Strength,
                amount: -1,
                remaining: 2,
                tied_to: None,
            })
        });
        assert_eq!(e.with::<Modifiers, _>(&r, |m| m.len()), 1);
        e.with_mut::<Modifiers, _>(&mut r, |m| m.clear());
        assert!(r.ecs.get::<&Modifiers>(e.0).is_err());
    }
}
