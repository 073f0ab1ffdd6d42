//! Entities doing things

use util::RngExt;

use crate::{
    cell::WalkEffect,
    combat::{resolve_attack, AttackResult, Outcome},
    ecs::LastLocation,
    prelude::*,
    CellKind,
};

/// Things a creature can do on its turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Pass,
    /// Walk to an adjacent location.
    Step(Location),
    Attack(Entity),
    PickUp(Entity),
    Equip(Entity),
}

/// Final outcome of a move request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveResult {
    Moved,
    /// There was a creature in the way and it got attacked.
    Attacked(AttackResult),
    Blocked(String),
    Declined(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveRequest {
    Resolved(MoveResult),
    /// Player must answer with `confirm_move` or `decline_move` using the
    /// id before the move happens.
    NeedsConfirmation { id: u64, prompt: String },
}

/// Move waiting for the player's answer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct PendingMove {
    pub entity: Entity,
    pub to: Location,
}

impl Runtime {
    /// Try to move an entity to an adjacent location.
    ///
    /// Moving into a creature attacks it. Moving the player into dangerous
    /// terrain does nothing until the returned request is confirmed.
    pub fn request_move(
        &mut self,
        e: Entity,
        to: Location,
    ) -> Result<MoveRequest> {
        if !e.exists(self) {
            return Err(Error::MissingEntityController(e));
        }
        if !to.is_on_map(self) {
            return Err(Error::InvalidMoveTarget(to));
        }
        if self.pending_moves.values().any(|p| p.entity == e) {
            return Err(Error::MovePending(e));
        }

        if let Some(res) = self.check_move(e, to) {
            return Ok(MoveRequest::Resolved(res));
        }

        if let Some(mob) = to.mob_at(self) {
            let res = e.attack(self, &mob);
            return Ok(MoveRequest::Resolved(MoveResult::Attacked(res)));
        }

        if e.is_player(self) && to.needs_confirmation(self) {
            let id = self.next_request;
            self.next_request += 1;
            self.pending_moves.insert(id, PendingMove { entity: e, to });
            let prompt = to
                .kind(self)
                .and_then(|k| k.confirm_prompt())
                .unwrap_or("Really step there?")
                .to_string();
            return Ok(MoveRequest::NeedsConfirmation { id, prompt });
        }

        e.step_to(self, to);
        Ok(MoveRequest::Resolved(MoveResult::Moved))
    }

    /// Carry out a move that was waiting for confirmation.
    pub fn confirm_move(&mut self, id: u64) -> Result<MoveResult> {
        let Some(PendingMove { entity, to }) = self.pending_moves.remove(&id)
        else {
            return Err(Error::UnknownMoveRequest(id));
        };
        if !entity.exists(self) {
            return Err(Error::MissingEntityController(entity));
        }

        // The world may have changed while waiting.
        if let Some(res) = self.check_move(entity, to) {
            return Ok(res);
        }
        if to.mob_at(self).is_some() {
            return Ok(self.blocked(entity, "Something is in the way."));
        }

        entity.step_to(self, to);
        Ok(MoveResult::Moved)
    }

    pub fn decline_move(&mut self, id: u64) -> Result<MoveResult> {
        if self.pending_moves.remove(&id).is_none() {
            return Err(Error::UnknownMoveRequest(id));
        }
        Ok(MoveResult::Declined("You stay where you are.".into()))
    }

    /// Common rejections for a move, `None` if it may go ahead.
    fn check_move(&mut self, e: Entity, to: Location) -> Option<MoveResult> {
        if !e.is_alive(self) {
            return Some(self.blocked(e, "[One] can't move."));
        }
        let Some(from) = e.loc(self) else {
            return Some(self.blocked(e, "[One] can't move."));
        };
        if !from.is_adjacent(&to) {
            return Some(self.blocked(e, "That is too far away."));
        }
        if to.mob_at(self).is_none() && to.blocks_movement(self) {
            let text = match to.kind(self) {
                Some(CellKind::DoorClosed) => "The door is closed.",
                _ => "[One] can't go that way.",
            };
            return Some(self.blocked(e, text));
        }
        None
    }

    fn blocked(&mut self, e: Entity, template: &str) -> MoveResult {
        let text = Grammatize::format(&(e.noun(self),), template);
        if e.is_player(self) {
            self.send_msg(Msg::Message(text.clone()));
        }
        MoveResult::Blocked(text)
    }

    /// Open or close an adjacent door. Returns whether anything happened.
    pub fn activate(&mut self, e: Entity, loc: Location) -> Result<bool> {
        if !e.exists(self) {
            return Err(Error::MissingEntityController(e));
        }
        if !loc.is_on_map(self) {
            return Err(Error::InvalidMoveTarget(loc));
        }
        if !e.loc(self).is_some_and(|l| l.is_adjacent(&loc)) {
            return Ok(false);
        }
        let Some(door) = loc.kind(self).filter(|k| k.is_door()) else {
            return Ok(false);
        };

        match door {
            CellKind::DoorClosed => {
                if let Some(c) = loc.cell_mut(self) {
                    c.set_kind(CellKind::DoorOpen, loc);
                }
                msg!(self, "[One] open[s] the door."; e.noun(self));
                self.send_msg(Msg::DoorOpened(loc));
            }
            _ => {
                if loc.entities_at(self).next().is_some() {
                    msg!(self, "Something is in the way.");
                    return Ok(false);
                }
                if let Some(c) = loc.cell_mut(self) {
                    c.set_kind(CellKind::DoorClosed, loc);
                }
                msg!(self, "[One] close[s] the door."; e.noun(self));
                self.send_msg(Msg::DoorClosed(loc));
            }
        }

        e.compute_fov(self);
        Ok(true)
    }
}

impl Entity {
    /// Move to location and deal with whatever is there.
    pub(crate) fn step_to(&self, r: &mut impl AsMut<Runtime>, to: Location) {
        let r = r.as_mut();
        let Some(from) = self.loc(r) else { return };

        self.place(r, to);
        self.set(r, LastLocation(Some(from)));
        self.compute_fov(r);
        r.send_msg(Msg::Moved {
            entity: *self,
            from,
            to,
        });

        match to.kind(r).and_then(|k| k.walk_effect()) {
            Some(WalkEffect::Burn(dice, text)) => {
                let damage = dice.roll(&mut r.rng);
                msg!(r, "{text}"; self.noun(r));
                self.damage(r, damage);
            }
            Some(WalkEffect::Message(text)) => {
                if self.is_player(r) {
                    msg!(r, "{text}"; self.noun(r));
                }
            }
            None => {}
        }

        if self.is_player(r) {
            if let Some(text) = to.describe_items(r, self) {
                r.send_msg(Msg::Message(text));
            }
        }
    }

    /// Strike another creature and apply the results.
    pub fn attack(
        &self,
        r: &mut impl AsMut<Runtime>,
        target: &Entity,
    ) -> AttackResult {
        let r = r.as_mut();
        let weapon = self.weapon(r);
        let (a, b) = (self.combatant(r), target.combatant(r));
        let res = resolve_attack(&mut r.rng, &a, &b);

        match res.outcome {
            Outcome::Miss => r.send_msg(Msg::Miss(*target)),
            Outcome::Hit | Outcome::Dead => r.send_msg(Msg::Hit {
                attacker: *self,
                target: *target,
                damage: res.damage,
            }),
            Outcome::Fail => {}
        }
        r.send_msg(Msg::Message(res.message.clone()));

        if res.damage_dealt() {
            let died = target.damage(r, res.damage);
            if !died {
                let chance = r.settings.critical_chance;
                for &kind in weapon.criticals {
                    if r.rng.one_chance_in(chance) {
                        target.apply_status(r, kind);
                    }
                }
            }
        }

        res
    }

    /// Carry out an action, doing nothing if it's no longer possible.
    pub fn execute(&self, r: &mut impl AsMut<Runtime>, action: Action) {
        use Action::*;
        let r = r.as_mut();

        let Some(loc) = self.loc(r) else { return };

        match action {
            Pass => {}
            Step(to) => {
                if loc.is_adjacent(&to)
                    && self.can_enter(r, to)
                    && !to.needs_confirmation(r)
                {
                    self.step_to(r, to);
                }
            }
            Attack(target) => {
                if target.is_alive(r)
                    && target.loc(r).is_some_and(|l| l.is_adjacent(&loc))
                {
                    self.attack(r, &target);
                }
            }
            PickUp(item) => {
                self.pick_up(r, &item);
            }
            Equip(item) => {
                self.equip(r, &item);
            }
        }
    }
}
