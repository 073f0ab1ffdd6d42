//! Mobs figuring out what to do on their own.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    compare_items,
    ecs::{Armour, IdleTarget},
    prelude::*,
    Action, EquipSlot, ItemKind, Preference, Weapon,
};

/// How smart a creature's decisions are.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AiTier {
    /// Stumbles around randomly.
    #[default]
    Basic,
    /// Hunts down enemies it can see.
    Animal,
    /// Hunts enemies and looks after its gear.
    Humanoid,
}

/// Something the creature wants to grab or put on, and how badly.
#[derive(Copy, Clone, Debug)]
struct ItemNeed {
    priority: i32,
    item: Entity,
    /// Where it lies, `None` if already carried.
    at: Option<Location>,
}

/// Rough worth of an item, the same measure `compare_items` uses.
fn gear_value(r: &Runtime, item: &Entity) -> i32 {
    match item.item_kind(r) {
        ItemKind::Weapon => item.get::<Weapon>(r).damage.max(),
        ItemKind::Armour => item.get::<Armour>(r).0,
        _ => 0,
    }
}

impl Entity {
    /// Decide what to do next.
    pub fn decide(&self, r: &mut impl AsMut<Runtime>) -> Action {
        let r = r.as_mut();
        if !self.is_alive(r) || self.loc(r).is_none() {
            return Action::Pass;
        }

        let tier = self.ai_tier(r);
        if tier == AiTier::Basic {
            return self.random_step(r);
        }

        if let Some((target, path)) = self.hostiles_by_distance(r).first() {
            // Path includes the start, two cells means the target is
            // adjacent.
            self.set(r, IdleTarget(None));
            return if path.len() <= 2 {
                Action::Attack(*target)
            } else {
                Action::Step(path[1])
            };
        }

        if tier == AiTier::Humanoid {
            if r.settings.gear_seeking {
                if let Some(action) = self.seek_equipment(r) {
                    return action;
                }
            } else if let Some(need) = self.item_needs(r).first() {
                log::debug!(
                    "{} ({self}) wants {} but gear seeking is off",
                    self.name(r),
                    need.item.name(r)
                );
            }
        }

        self.wander(r)
    }

    /// Decide and act on the decision.
    pub fn perform_next_move(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        let action = self.decide(r);
        log::debug!("{} ({self}) decides {action:?}", self.name(r));
        self.execute(r, action);
    }

    /// Visible enemies that can be reached, nearest first.
    ///
    /// Enemies at the same distance stay in the order they were seen.
    pub fn hostiles_by_distance(
        &self,
        r: &impl AsRef<Runtime>,
    ) -> Vec<(Entity, Vec<Location>)> {
        let r = r.as_ref();
        let Some(loc) = self.loc(r) else {
            return Vec::new();
        };

        let mut ret: Vec<(Entity, Vec<Location>)> = self
            .vision(r)
            .into_iter()
            .filter_map(|l| l.mob_at(r))
            .filter(|e| e.is_alive(r) && self.is_hostile_to(r, e))
            .filter_map(|e| {
                let path = r.find_path(loc, e.loc(r)?);
                (!path.is_empty()).then_some((e, path))
            })
            .collect();

        ret.sort_by_key(|(_, path)| path.len());
        ret
    }

    /// Step to a random free neighboring cell.
    fn random_step(&self, r: &mut Runtime) -> Action {
        let Some(loc) = self.loc(r) else {
            return Action::Pass;
        };
        let options: Vec<Location> = loc
            .neighbors_8()
            .filter(|n| self.can_enter(r, *n) && !n.needs_confirmation(r))
            .collect();

        match options.choose(&mut r.rng) {
            Some(&n) => Action::Step(n),
            None => Action::Pass,
        }
    }

    /// Walk towards an idle target, picking a new one when needed.
    fn wander(&self, r: &mut Runtime) -> Action {
        let Some(loc) = self.loc(r) else {
            return Action::Pass;
        };

        if let IdleTarget(Some(target)) = self.get::<IdleTarget>(r) {
            if let Some(step) = self.next_step_towards(r, loc, target) {
                return Action::Step(step);
            }
            // Reached or blocked.
            self.set(r, IdleTarget(None));
        }

        let options: Vec<Location> = self
            .vision(r)
            .into_iter()
            .filter(|l| {
                *l != loc
                    && l.is_walkable(r)
                    && l.mob_at(r).is_none()
                    && !l.needs_confirmation(r)
            })
            .collect();

        if let Some(&target) = options.choose(&mut r.rng) {
            if let Some(step) = self.next_step_towards(r, loc, target) {
                self.set(r, IdleTarget(Some(target)));
                return Action::Step(step);
            }
        }

        self.random_step(r)
    }

    fn next_step_towards(
        &self,
        r: &Runtime,
        loc: Location,
        target: Location,
    ) -> Option<Location> {
        if target == loc {
            return None;
        }
        let path = r.find_path(loc, target);
        let step = *path.get(1)?;
        (self.can_enter(r, step) && !step.needs_confirmation(r)).then_some(step)
    }

    /// Things in the backpack or in sight that would improve the creature's
    /// gear.
    fn item_needs(&self, r: &Runtime) -> Vec<ItemNeed> {
        let mut ret = Vec::new();

        let empty = |slot: EquipSlot| self.equipped(r, slot).is_none();

        for item in self.backpack(r) {
            let kind = item.item_kind(r);
            let slot = kind.slot();
            if slot == EquipSlot::None {
                continue;
            }
            let priority = if empty(slot) {
                if kind == ItemKind::Weapon {
                    5
                } else {
                    3
                }
            } else if self.equipped(r, slot).is_some_and(|current| {
                compare_items(r, &current, &item) == Preference::Second
            }) {
                2
            } else {
                continue;
            };
            ret.push(ItemNeed {
                priority,
                item,
                at: None,
            });
        }

        for loc in self.vision(r) {
            for item in loc.items_at(r) {
                let kind = item.item_kind(r);
                let slot = kind.slot();
                if slot == EquipSlot::None || !empty(slot) {
                    continue;
                }
                let priority = if kind == ItemKind::Weapon { 4 } else { 3 };
                ret.push(ItemNeed {
                    priority,
                    item,
                    at: Some(loc),
                });
            }
        }

        ret
    }

    fn seek_equipment(&self, r: &mut Runtime) -> Option<Action> {
        let loc = self.loc(r)?;

        let mut needs = self.item_needs(r);
        // Most wanted first, better items first among equals.
        needs.sort_by_key(|n| {
            (
                std::cmp::Reverse(n.priority),
                std::cmp::Reverse(gear_value(r, &n.item)),
            )
        });

        for need in needs {
            match need.at {
                None => return Some(Action::Equip(need.item)),
                Some(at) if at == loc => return Some(Action::PickUp(need.item)),
                Some(at) => {
                    if let Some(step) = self.next_step_towards(r, loc, at) {
                        return Some(Action::Step(step));
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ecs::Health, ItemType, Species};

    fn setup(map: &str) -> Runtime {
        let mut r = Runtime::from_ascii(map).unwrap();
        r.settings.gear_seeking = true;
        for e in r.mobs().collect::<Vec<_>>() {
            e.compute_fov(&mut r);
        }
        r
    }

    fn find(r: &Runtime, species: Species) -> Entity {
        r.mobs().find(|e| e.species(r) == species).unwrap()
    }

    #[test]
    fn animal_hunts_nearest() {
        let mut r = setup(
            "
            #########
            #r....@.#
            #...o...#
            #########",
        );
        let rat = find(&r, Species::GiantRat);
        let orc = find(&r, Species::Orc);

        let hostiles = rat.hostiles_by_distance(&r);
        assert_eq!(hostiles.len(), 2);
        assert_eq!(hostiles[0].0, orc);
        for w in hostiles.windows(2) {
            assert!(w[0].1.len() <= w[1].1.len());
        }

        let Action::Step(step) = rat.decide(&mut r) else {
            panic!("rat should be moving");
        };
        assert_eq!(step, hostiles[0].1[1]);
    }

    #[test]
    fn adjacent_means_attack() {
        let mut r = setup(
            "
            #####
            #@r.#
            #####",
        );
        let rat = find(&r, Species::GiantRat);
        let player = r.player().unwrap();
        assert_eq!(rat.decide(&mut r), Action::Attack(player));
    }

    #[test]
    fn hostility_is_not_mutual() {
        let mut r = setup(
            "
            #######
            #o...r#
            #######",
        );
        let orc = find(&r, Species::Orc);
        let rat = find(&r, Species::GiantRat);
        assert!(orc.hostiles_by_distance(&r).is_empty());
        assert_eq!(rat.hostiles_by_distance(&r)[0].0, orc);
        assert!(matches!(orc.decide(&mut r), Action::Step(_) | Action::Pass));
    }

    #[test]
    fn basic_wanders() {
        let mut r = setup(
            "
            ###
            #j#
            #.#
            ###",
        );
        let jelly = find(&r, Species::Jelly);
        let below = jelly.loc(&r).unwrap() + ivec2(0, 1);
        assert_eq!(jelly.decide(&mut r), Action::Step(below));

        let mut r = setup(
            "
            ###
            #j#
            ###",
        );
        let jelly = find(&r, Species::Jelly);
        assert_eq!(jelly.decide(&mut r), Action::Pass);
    }

    #[test]
    fn humanoid_gears_up() {
        let mut r = setup(
            "
            #######
            #o.(..#
            #######",
        );
        let orc = find(&r, Species::Orc);
        let dagger = r
            .entities()
            .find(|e| e.item_type(&r) == ItemType::Dagger)
            .unwrap();
        let dagger_loc = dagger.loc(&r).unwrap();

        // Walk to the dagger, pick it up, wield it.
        for _ in 0..10 {
            orc.perform_next_move(&mut r);
            if orc.wielded(&r).is_some() {
                break;
            }
        }
        assert_eq!(orc.wielded(&r), Some(dagger));
        assert_eq!(orc.loc(&r), Some(dagger_loc));

        // A carried upgrade gets swapped in.
        let axe = r.spawn_item(ItemType::Axe);
        axe.place(&mut r, orc);
        assert_eq!(orc.decide(&mut r), Action::Equip(axe));
    }

    #[test]
    fn carried_weapon_beats_ground_weapon() {
        let mut r = setup(
            "
            ######
            #o.|.#
            ######",
        );
        let orc = find(&r, Species::Orc);
        let club = r.spawn_item(ItemType::Club);
        club.place(&mut r, orc);
        assert_eq!(orc.decide(&mut r), Action::Equip(club));
    }

    #[test]
    fn gear_is_ignored_unless_enabled() {
        let mut r = setup(
            "
            ######
            #o.|.#
            ######",
        );
        r.settings.gear_seeking = false;
        let orc = find(&r, Species::Orc);
        let club = r.spawn_item(ItemType::Club);
        club.place(&mut r, orc);
        assert_ne!(orc.decide(&mut r), Action::Equip(club));
        assert!(orc.wielded(&r).is_none());
    }

    #[test]
    fn dead_do_nothing() {
        let mut r = setup(
            "
            #####
            #@r.#
            #####",
        );
        let rat = find(&r, Species::GiantRat);
        rat.set(
            &mut r,
            Health {
                hit_points: 0,
                max_hit_points: 6,
            },
        );
        assert_eq!(rat.decide(&mut r), Action::Pass);
    }
}
