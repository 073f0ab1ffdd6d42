use serde::{Deserialize, Serialize};

use crate::{ecs::Modifier, ecs::Stat, prelude::*};

/// An opaque representation of a time instant.
///
/// The unit of time is one scheduler tick.
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
pub struct Instant(pub(crate) i64);

impl Instant {
    /// Return number of ticks elapsed since this instant.
    pub fn elapsed(&self, r: &impl AsRef<Runtime>) -> i64 {
        r.as_ref().now() - *self
    }
}

impl std::ops::Add<i64> for Instant {
    type Output = Self;

    fn add(self, rhs: i64) -> Self::Output {
        Instant(self.0 + rhs)
    }
}

impl std::ops::AddAssign<i64> for Instant {
    fn add_assign(&mut self, rhs: i64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub<Instant> for Instant {
    type Output = i64;

    fn sub(self, rhs: Instant) -> Self::Output {
        self.0 - rhs.0
    }
}

/// Delayed effect that isn't driven by any single creature's turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DungeonEvent {
    /// Lingering strength loss after a wound.
    Weakness {
        target: Entity,
        amount: i32,
        duration: i32,
    },
}

impl DungeonEvent {
    pub fn target(&self) -> Entity {
        match self {
            DungeonEvent::Weakness { target, .. } => *target,
        }
    }

    pub fn act(&self, r: &mut impl AsMut<Runtime>) -> Result<()> {
        let r = r.as_mut();
        let target = self.target();
        if !target.exists(r) {
            return Err(Error::MissingEntityController(target));
        }

        match *self {
            DungeonEvent::Weakness {
                amount, duration, ..
            } => {
                if !target.is_alive(r) {
                    return Ok(());
                }
                target.add_modifier(
                    r,
                    Modifier {
                        stat: Stat::Strength,
                        amount,
                        remaining: duration,
                        tied_to: None,
                    },
                );
                msg!(r, "[One] feel[s] weak."; target.noun(r));
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScheduledEvent {
    pub at: Instant,
    pub event: DungeonEvent,
}

impl Runtime {
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn schedule(&mut self, at: Instant, event: DungeonEvent) {
        self.events.push(ScheduledEvent { at, event });
    }

    /// Run and remove every event that is due.
    pub(crate) fn fire_events(&mut self) -> Result<()> {
        let now = self.now;
        let (due, pending): (Vec<_>, Vec<_>) =
            self.events.drain(..).partition(|e| e.at <= now);
        self.events = pending;

        for e in due {
            e.event.act(self)?;
        }
        Ok(())
    }

    /// Forget events about entities that are gone.
    pub(crate) fn purge_events(&mut self, dead: &Entity) {
        self.events.retain(|e| e.event.target() != *dead);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_for_missing_entity_fails() {
        let mut r = Runtime::from_ascii("@r").unwrap();
        let rat = r.mobs().find(|e| !e.is_player(&r)).unwrap();
        rat.destroy(&mut r);

        let event = DungeonEvent::Weakness {
            target: rat,
            amount: -1,
            duration: 10,
        };
        assert!(matches!(
            event.act(&mut r),
            Err(Error::MissingEntityController(e)) if e == rat
        ));
    }

    #[test]
    fn events_fire_when_due() {
        let mut r = Runtime::from_ascii("@").unwrap();
        let player = r.player().unwrap();
        r.schedule(
            r.now() + 2,
            DungeonEvent::Weakness {
                target: player,
                amount: -2,
                duration: 5,
            },
        );

        r.fire_events().unwrap();
        assert_eq!(player.modifiers(&r).len(), 0);
        r.now += 2;
        r.fire_events().unwrap();
        assert_eq!(player.modifiers(&r).len(), 1);
        assert!(r.events.is_empty());
        assert_eq!(Instant::default().elapsed(&r), 2);
    }
}
