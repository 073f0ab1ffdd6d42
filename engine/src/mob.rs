//! Entity logic for active creatures.

use crate::{
    ecs::{Health, IsMob, Modifiers, Stat, Stats},
    prelude::*,
    AiTier, Species,
};

impl Entity {
    pub fn is_player(&self, r: &impl AsRef<Runtime>) -> bool {
        let r = r.as_ref();
        r.player == Some(*self)
    }

    pub fn is_mob(&self, r: &impl AsRef<Runtime>) -> bool {
        self.get::<IsMob>(r).0
    }

    pub fn species(&self, r: &impl AsRef<Runtime>) -> Species {
        self.get::<Species>(r)
    }

    /// Stats without timed modifiers.
    pub fn base_stats(&self, r: &impl AsRef<Runtime>) -> Stats {
        self.get::<Stats>(r)
    }

    /// Stats with the active timed modifiers applied.
    pub fn stats(&self, r: &impl AsRef<Runtime>) -> Stats {
        let mut ret = self.base_stats(r);
        for m in self.get::<Modifiers>(r).iter() {
            *ret.get_mut(m.stat) += m.amount;
        }
        ret
    }

    pub fn stat(&self, r: &impl AsRef<Runtime>, stat: Stat) -> i32 {
        self.stats(r).get(stat)
    }

    /// Energy gained per scheduler tick, always at least one for living
    /// mobs so heavy penalties can't freeze them.
    pub fn speed(&self, r: &impl AsRef<Runtime>) -> i32 {
        self.stat(r, Stat::Speed).max(1)
    }

    pub fn sight_radius(&self, r: &impl AsRef<Runtime>) -> i32 {
        self.stat(r, Stat::Perception).max(0)
    }

    pub fn hit_points(&self, r: &impl AsRef<Runtime>) -> i32 {
        self.get::<Health>(r).hit_points
    }

    pub fn max_hit_points(&self, r: &impl AsRef<Runtime>) -> i32 {
        self.get::<Health>(r).max_hit_points
    }

    /// Restore health, never past the maximum.
    pub fn heal(&self, r: &mut impl AsMut<Runtime>, amount: i32) {
        let r = r.as_mut();
        let mut health = self.get::<Health>(r);
        health.hit_points =
            (health.hit_points + amount.max(0)).min(health.max_hit_points);
        self.set(r, health);
    }

    /// Lose health. Returns true if this killed the entity.
    ///
    /// The dead entity stays in the world until the end of the tick so
    /// others can react to the death.
    pub fn damage(&self, r: &mut impl AsMut<Runtime>, amount: i32) -> bool {
        let r = r.as_mut();
        if amount <= 0 || !self.is_alive(r) {
            return false;
        }

        let mut health = self.get::<Health>(r);
        health.hit_points -= amount;
        self.set(r, health);

        if health.hit_points <= 0 {
            log::debug!("{} ({self}) died", self.name(r));
            if let Some(location) = self.loc(r) {
                r.send_msg(Msg::Death {
                    entity: *self,
                    location,
                });
            }
            true
        } else {
            false
        }
    }

    /// Decision procedure used when the mob acts on its own.
    pub fn ai_tier(&self, r: &impl AsRef<Runtime>) -> AiTier {
        self.species(r).ai_tier()
    }

    pub fn is_hostile_to(&self, r: &impl AsRef<Runtime>, other: &Entity) -> bool {
        self != other
            && other.is_mob(r)
            && self.species(r).is_hostile_to(other.species(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Modifier;

    #[test]
    fn health_bounds() {
        let mut r = Runtime::from_ascii(
            "
            ####
            #@r#
            ####",
        )
        .unwrap();
        let rat = r.mobs().find(|e| !e.is_player(&r)).unwrap();
        let max = rat.max_hit_points(&r);

        assert!(!rat.damage(&mut r, 1));
        rat.heal(&mut r, 100);
        assert_eq!(rat.hit_points(&r), max);

        assert!(rat.damage(&mut r, max));
        assert!(!rat.is_alive(&r));
        assert!(r
            .drain_msgs()
            .any(|m| matches!(m, Msg::Death { entity, .. } if entity == rat)));

        // Already dead, no second death.
        assert!(!rat.damage(&mut r, 1));
    }

    #[test]
    fn modifiers_apply() {
        let mut r = Runtime::from_ascii("@").unwrap();
        let player = r.player().unwrap();
        let base = player.base_stats(&r);
        player.set(
            &mut r,
            Modifiers(vec![Modifier {
                stat: Stat::Strength,
                amount: -3,
                remaining: 5,
                tied_to: None,
            }]),
        );
        assert_eq!(player.stats(&r).strength, base.strength - 3);
        assert_eq!(player.stats(&r).dexterity, base.dexterity);
    }
}
