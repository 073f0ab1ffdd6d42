//! Attack resolution.

use rand::Rng;
use util::{Noun, RngExt, Sentence, StrExt};

use crate::{
    ecs::{Size, Stats},
    phrase::{self, pick_phrase},
    prelude::*,
    Weapon,
};

/// Snapshot of everything about a creature that matters in a fight.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Combatant {
    pub noun: Noun,
    pub stats: Stats,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub protection: i32,
    pub size: Size,
    pub weapon: Weapon,
    pub weapon_name: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Hit and hurt the target.
    Hit,
    Miss,
    /// Hit but the damage didn't get past the target's protection.
    Fail,
    /// Hit and the damage was lethal.
    Dead,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttackResult {
    pub outcome: Outcome,
    pub damage: i32,
    pub message: String,
}

impl AttackResult {
    pub fn damage_dealt(&self) -> bool {
        self.damage > 0
    }
}

/// How hard the defender is to hit after the attacker's skill is counted.
pub fn defense_rate(
    rng: &mut (impl Rng + ?Sized),
    attacker: &Combatant,
    defender: &Combatant,
) -> i32 {
    let mut defense = defender.stats.dexterity
        + defender.stats.speed.div_euclid(2)
        + defender.size.dice().roll(rng);
    let bonus =
        attacker.weapon.to_hit.roll(rng) + attacker.stats.dexterity.div_euclid(4);

    if 2 * defense > bonus {
        defense -= bonus.div_euclid(2);
    }
    defense
}

/// Split a defense rate into d20 checks that each have to be passed.
pub fn defense_thresholds(mut rate: i32) -> Vec<i32> {
    let mut ret = Vec::new();
    while rate > 15 {
        ret.push(15);
        rate -= 15;
    }
    ret.push(rate);
    ret
}

/// Roll a d20 against each threshold, the attack hits if no roll falls
/// below its threshold.
///
/// Every check gets rolled even after one fails so the number of draws
/// only depends on the number of thresholds.
pub fn roll_thresholds(
    rng: &mut (impl Rng + ?Sized),
    thresholds: &[i32],
) -> bool {
    let mut is_hit = true;
    for &t in thresholds {
        if rng.d(20) < t {
            is_hit = false;
        }
    }
    is_hit
}

/// Wound adjective for the fraction of health left.
pub fn severity(hit_points: i32, max_hit_points: i32) -> &'static str {
    let max = max_hit_points.max(1) as f64;
    match hit_points as f64 / max {
        x if x > 0.8 => "lightly",
        x if x > 0.6 => "barely",
        x if x > 0.4 => "heavily",
        x if x > 0.2 => "critically",
        _ => "mortally",
    }
}

/// Work out what happens when attacker strikes defender.
///
/// Nothing is changed here, applying the damage is up to the caller.
pub fn resolve_attack(
    rng: &mut (impl Rng + ?Sized),
    attacker: &Combatant,
    defender: &Combatant,
) -> AttackResult {
    let thresholds = defense_thresholds(defense_rate(rng, attacker, defender));
    let is_hit = roll_thresholds(rng, &thresholds);

    let (outcome, damage) = if is_hit {
        let damage = attacker.weapon.damage.roll(rng) - defender.protection;
        if damage <= 0 {
            (Outcome::Fail, 0)
        } else if defender.hit_points - damage <= 0 {
            (Outcome::Dead, damage)
        } else {
            (Outcome::Hit, damage)
        }
    } else {
        (Outcome::Miss, 0)
    };

    let message = describe(rng, attacker, defender, outcome, damage);

    AttackResult {
        outcome,
        damage,
        message,
    }
}

fn describe(
    rng: &mut (impl Rng + ?Sized),
    attacker: &Combatant,
    defender: &Combatant,
    outcome: Outcome,
    damage: i32,
) -> String {
    let mut fragments = Vec::new();
    match outcome {
        Outcome::Miss => fragments.push(pick_phrase(rng, phrase::MISS)),
        _ => {
            fragments.push(pick_phrase(rng, phrase::attack(attacker.weapon.damage_type)));
            fragments.push(pick_phrase(
                rng,
                match outcome {
                    Outcome::Fail => phrase::FAIL,
                    Outcome::Dead => phrase::DEAD,
                    _ => phrase::HIT,
                },
            ));
        }
    }

    let severity =
        severity(defender.hit_points - damage, defender.max_hit_points);
    let weapon = format!("[one's] {}", attacker.weapon_name);
    let sentence = Sentence::new(&attacker.noun, &defender.noun);

    let mut ret = String::new();
    for f in fragments {
        let f = f.replace("[weapon]", &weapon).replace("[severity]", severity);
        let f = match f.templatize(|t| sentence.convert(t)) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("bad combat phrase {f:?}: {e}");
                f
            }
        };
        if !ret.is_empty() {
            ret.push(' ');
        }
        ret.push_str(&f.capitalize());
        ret.push('.');
    }
    ret
}

impl Entity {
    pub fn combatant(&self, r: &impl AsRef<Runtime>) -> Combatant {
        Combatant {
            noun: self.noun(r),
            stats: self.stats(r),
            hit_points: self.hit_points(r),
            max_hit_points: self.max_hit_points(r),
            protection: self.protection(r),
            size: self.get::<Size>(r),
            weapon: self.weapon(r),
            weapon_name: self.weapon_name(r),
        }
    }
}
