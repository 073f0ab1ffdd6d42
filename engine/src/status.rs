//! Timed status effects on creatures.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    ecs::{Modifier, Modifiers, Stat, Statuses},
    prelude::*,
    DungeonEvent,
};

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StatusKind {
    Bleeding,
    Stunned,
}

impl StatusKind {
    fn roll_duration(self, rng: &mut impl Rng) -> i32 {
        match self {
            StatusKind::Bleeding => rng.gen_range(3..=12),
            StatusKind::Stunned => rng.gen_range(3..=4),
        }
    }
}

/// Active status effect instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub kind: StatusKind,
    /// Owner turns the status has been active.
    pub turn_count: i32,
    /// Turn count at which the status expires.
    pub duration: i32,
}

impl Status {
    pub fn remaining(&self) -> i32 {
        (self.duration - self.turn_count).max(0)
    }

    pub fn is_expired(&self) -> bool {
        self.turn_count >= self.duration
    }
}

/// Penalties a fresh stun applies, as fractions of the base stat.
const STUN_PENALTIES: [(Stat, f64); 3] = [
    (Stat::Strength, 0.25),
    (Stat::Dexterity, 0.5),
    (Stat::Speed, 0.2),
];

/// Game turns between the start of bleeding and the weakness it causes.
const WEAKNESS_DELAY: std::ops::RangeInclusive<i64> = 10..=15;

const WEAKNESS_DURATION: std::ops::RangeInclusive<i32> = 50..=80;

impl Entity {
    pub fn statuses(&self, r: &impl AsRef<Runtime>) -> Vec<Status> {
        self.get::<Statuses>(r).0
    }

    pub fn status(
        &self,
        r: &impl AsRef<Runtime>,
        kind: StatusKind,
    ) -> Option<Status> {
        self.with::<Statuses, _>(r, |s| s.iter().find(|s| s.kind == kind).copied())
    }

    pub fn modifiers(&self, r: &impl AsRef<Runtime>) -> Vec<Modifier> {
        self.get::<Modifiers>(r).0
    }

    /// Add a timed stat change.
    pub fn add_modifier(
        &self,
        r: &mut impl AsMut<Runtime>,
        modifier: Modifier,
    ) {
        if modifier.amount == 0 || modifier.remaining <= 0 {
            return;
        }
        self.with_mut::<Modifiers, _>(r, |m| m.push(modifier.clone()));
    }

    /// Apply a status, merging into an existing one of the same kind.
    pub fn apply_status(&self, r: &mut impl AsMut<Runtime>, kind: StatusKind) {
        let r = r.as_mut();
        if !self.is_alive(r) {
            return;
        }
        let duration = kind.roll_duration(&mut r.rng);

        if self.status(r, kind).is_some() {
            self.with_mut::<Statuses, _>(r, |s| {
                for s in s.iter_mut().filter(|s| s.kind == kind) {
                    s.duration += duration;
                }
            });
            // Modifiers that follow the status last as long as it does.
            self.with_mut::<Modifiers, _>(r, |m| {
                for m in m.iter_mut().filter(|m| m.tied_to == Some(kind)) {
                    m.remaining += duration;
                }
            });
            log::debug!("{self} {kind} extended by {duration}");
            return;
        }

        self.with_mut::<Statuses, _>(r, |s| {
            s.push(Status {
                kind,
                turn_count: 0,
                duration,
            })
        });

        match kind {
            StatusKind::Bleeding => {
                let delay = r.rng.gen_range(WEAKNESS_DELAY);
                let weakness = r.rng.gen_range(WEAKNESS_DURATION);
                let at = r.now() + delay;
                r.schedule(
                    at,
                    DungeonEvent::Weakness {
                        target: *self,
                        amount: -1,
                        duration: weakness,
                    },
                );
                msg!(r, "[One] start[s] bleeding."; self.noun(r));
            }
            StatusKind::Stunned => {
                let base = self.base_stats(r);
                for (stat, fraction) in STUN_PENALTIES {
                    let amount = -(base.get(stat) as f64 * fraction).round() as i32;
                    self.add_modifier(
                        r,
                        Modifier {
                            stat,
                            amount,
                            remaining: duration,
                            tied_to: Some(kind),
                        },
                    );
                }
                msg!(r, "[One] [is] stunned."; self.noun(r));
            }
        }
    }

    /// Run the per-turn logic of every active status.
    pub(crate) fn update_statuses(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();

        for kind in self.statuses(r).iter().map(|s| s.kind) {
            if !self.is_alive(r) {
                return;
            }

            let mut expired = false;
            self.with_mut::<Statuses, _>(r, |s| {
                for s in s.iter_mut().filter(|s| s.kind == kind) {
                    s.turn_count += 1;
                    expired = s.is_expired();
                }
            });

            if kind == StatusKind::Bleeding {
                if let Some(loc) = self.loc(r) {
                    if let Some(cell) = loc.cell_mut(r) {
                        cell.bloody();
                    }
                }
                self.damage(r, 1);
            }

            if expired {
                self.with_mut::<Statuses, _>(r, |s| s.retain(|s| s.kind != kind));
                self.with_mut::<Modifiers, _>(r, |m| {
                    m.retain(|m| m.tied_to != Some(kind))
                });
                match kind {
                    StatusKind::Bleeding => {
                        msg!(r, "[One] stop[s] bleeding."; self.noun(r));
                    }
                    StatusKind::Stunned => {
                        msg!(r, "[One] [is] no longer stunned."; self.noun(r));
                    }
                }
            }
        }
    }

    /// Count down timed modifiers, dropping the ones that ran out.
    pub(crate) fn update_modifiers(&self, r: &mut impl AsMut<Runtime>) {
        self.with_mut::<Modifiers, _>(r, |m| {
            for m in m.iter_mut() {
                m.remaining -= 1;
            }
            m.retain(|m| m.remaining > 0);
        });
    }
}
