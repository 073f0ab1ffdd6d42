use std::collections::{BTreeMap, VecDeque};

use util::{GameRng, Logos};

use crate::{
    action::PendingMove,
    ecs::*,
    level::Spawn,
    prelude::*,
    time::ScheduledEvent,
    EquipSlot, ItemType, Placement, Settings, Species,
};

/// Energy a mob spends on one action.
pub const ACTION_COST: i32 = 10;

/// Whether the game is still going.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScenarioStatus {
    Ongoing,
    Lost,
}

/// Main data container for game engine runtime.
pub struct Runtime {
    pub(crate) now: Instant,
    pub(crate) settings: Settings,
    pub(crate) player: Option<Entity>,
    pub(crate) levels: BTreeMap<LevelId, Level>,
    pub(crate) ecs: Ecs,
    pub(crate) placement: Placement,
    pub(crate) rng: GameRng,
    pub(crate) msgs: VecDeque<Msg>,
    pub(crate) pending_moves: BTreeMap<u64, PendingMove>,
    pub(crate) next_request: u64,
    pub(crate) events: Vec<ScheduledEvent>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(Settings::default(), &Logos::default())
    }
}

impl AsRef<Runtime> for Runtime {
    fn as_ref(&self) -> &Runtime {
        self
    }
}

impl AsMut<Runtime> for Runtime {
    fn as_mut(&mut self) -> &mut Runtime {
        self
    }
}

impl Runtime {
    /// Empty runtime with no levels loaded.
    pub fn new(settings: Settings, seed: &Logos) -> Self {
        Runtime {
            now: Default::default(),
            settings,
            player: None,
            levels: Default::default(),
            ecs: Default::default(),
            placement: Default::default(),
            rng: seed.rng(),
            msgs: Default::default(),
            pending_moves: Default::default(),
            next_request: 1,
            events: Default::default(),
        }
    }

    /// Runtime with a single level 0 built from an ASCII map.
    pub fn from_ascii(map: &str) -> Result<Self> {
        let mut ret = Runtime::default();
        ret.load_ascii_level(LevelId(0), map)?;
        Ok(ret)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Every entity in the ECS.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.ecs.iter()
    }

    /// Living creatures.
    pub fn mobs(&self) -> impl Iterator<Item = Entity> + '_ {
        self.ecs
            .iter()
            .filter(|e| e.is_mob(self) && e.is_alive(self))
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(&id)
    }

    pub fn load_level(&mut self, level: Level) -> Result<()> {
        let id = level.id();
        if self.levels.contains_key(&id) {
            return Err(Error::LevelAlreadyLoaded(id));
        }
        log::info!(
            "loading level {id} ({}x{})",
            level.width(),
            level.height()
        );
        self.levels.insert(id, level);
        Ok(())
    }

    /// Load a level from an ASCII map and populate it.
    pub fn load_ascii_level(&mut self, id: LevelId, map: &str) -> Result<()> {
        let (level, spawns) = Level::parse(id, map)?;
        self.load_level(level)?;

        for (loc, spawn) in spawns {
            match spawn {
                Spawn::Player => {
                    self.spawn_player(loc)?;
                }
                Spawn::Monster(species) => {
                    self.spawn_monster(species, loc)?;
                }
                Spawn::Item(item_type) => {
                    let item = self.spawn_item(item_type);
                    item.place(self, loc);
                }
            }
        }
        Ok(())
    }

    /// Remove a level and everything on it.
    pub fn unload_level(&mut self, id: LevelId) -> Result<Level> {
        let Some(level) = self.levels.remove(&id) else {
            return Err(Error::UnknownLevel(id));
        };

        let residents: Vec<Entity> = self.placement.entities_on(id).collect();
        log::info!("unloading level {id}, {} entities", residents.len());
        for e in residents {
            self.forget(&e);
            e.destroy(self);
        }
        Ok(level)
    }

    fn spawn_species(&mut self, species: Species) -> Entity {
        let data = species.data();
        Entity(self.ecs.spawn((
            Name(data.name.into()),
            Sprite(species.to_string()),
            IsMob(true),
            species,
            data.stats,
            Health {
                hit_points: data.hit_points,
                max_hit_points: data.hit_points,
            },
            Protection(data.protection),
            data.size,
            NaturalWeapon {
                name: data.attack_name,
                weapon: data.attack,
            },
        )))
    }

    /// Spawn the player, or move the existing player to `loc`.
    pub fn spawn_player(&mut self, loc: Location) -> Result<Entity> {
        if !loc.is_on_map(self) {
            return Err(Error::InvalidMoveTarget(loc));
        }
        if let Some(player) = self.player {
            log::warn!("spawn_player: player already exists, moving it");
            player.place(self, loc);
            player.compute_fov(self);
            return Ok(player);
        }

        let player = self.spawn_species(Species::Human);
        let name = self.settings.player_name.clone();
        player.set(self, Name(name));
        player.set(self, Sprite("player".into()));
        self.player = Some(player);
        player.place(self, loc);
        player.compute_fov(self);
        Ok(player)
    }

    pub fn spawn_monster(
        &mut self,
        species: Species,
        loc: Location,
    ) -> Result<Entity> {
        if !loc.is_on_map(self) {
            return Err(Error::InvalidMoveTarget(loc));
        }
        let e = self.spawn_species(species);
        e.place(self, loc);
        e.compute_fov(self);
        Ok(e)
    }

    /// Spawn a monster by its type name.
    pub fn spawn_monster_named(
        &mut self,
        name: &str,
        loc: Location,
    ) -> Result<Entity> {
        match name.parse::<Species>() {
            Ok(species) if species != Species::None => {
                self.spawn_monster(species, loc)
            }
            _ => Err(Error::UnknownMonsterType(name.into())),
        }
    }

    /// Spawn an item that isn't anywhere yet.
    pub fn spawn_item(&mut self, item_type: ItemType) -> Entity {
        let e = Entity(self.ecs.spawn((
            Name(item_type.name().into()),
            Sprite(item_type.sprite()),
            item_type,
            item_type.kind(),
        )));
        if let Some(weapon) = item_type.weapon() {
            e.set(self, weapon);
        }
        e.set(self, Armour(item_type.armour()));
        e
    }

    /// Spawn an item by its type name.
    pub fn spawn_item_named(&mut self, name: &str) -> Result<Entity> {
        match name.parse::<ItemType>() {
            Ok(item_type) if item_type != ItemType::None => {
                Ok(self.spawn_item(item_type))
            }
            _ => Err(Error::UnknownItemType(name.into())),
        }
    }

    /// Update the game state by one tick.
    ///
    /// Every living mob gains energy by its speed and acts once for each
    /// full action's worth of energy. The player only acts here when
    /// autopilot is on, otherwise it moves through `request_move`.
    pub fn tick(&mut self) -> Result<()> {
        self.fire_events()?;

        let mobs: Vec<Entity> = self.mobs().collect();
        for e in mobs {
            if !e.is_alive(self) {
                continue;
            }

            if e.is_player(self) && !self.settings.autopilot {
                e.upkeep(self);
                continue;
            }

            let mut energy = e.get::<Energy>(self).0 + e.speed(self);
            while energy >= ACTION_COST && e.is_alive(self) {
                energy -= ACTION_COST;
                e.act(self)?;
            }
            e.set(self, Energy(energy));
        }

        self.now += 1;
        self.gc();
        Ok(())
    }

    /// Remove dead mobs from the world, leaving their gear on the ground.
    pub(crate) fn gc(&mut self) {
        let kill_list: Vec<Entity> = self
            .ecs
            .iter()
            .filter(|e| e.is_mob(self) && !e.is_alive(self))
            .collect();

        for e in kill_list {
            if let Some(loc) = e.loc(self) {
                for item in e.inventory(self) {
                    item.set(self, EquipSlot::None);
                    item.place(self, loc);
                }
            }
            self.forget(&e);
            e.destroy(self);
        }
    }

    /// Drop runtime bookkeeping that refers to an entity about to go away.
    fn forget(&mut self, e: &Entity) {
        self.purge_events(e);
        self.pending_moves.retain(|_, m| m.entity != *e);
        if self.player == Some(*e) {
            log::info!("player is gone");
            self.player = None;
        }
    }

    pub fn scenario_status(&self) -> ScenarioStatus {
        match self.player {
            Some(p) if p.is_alive(self) => ScenarioStatus::Ongoing,
            _ => ScenarioStatus::Lost,
        }
    }
}

impl Entity {
    /// Take one turn: tick statuses and modifiers, then do something if
    /// still alive.
    pub fn act(&self, r: &mut impl AsMut<Runtime>) -> Result<()> {
        let r = r.as_mut();
        if !self.exists(r) {
            return Err(Error::MissingEntityController(*self));
        }

        self.upkeep(r);
        if self.is_alive(r) {
            self.perform_next_move(r);
        }
        Ok(())
    }

    fn upkeep(&self, r: &mut Runtime) {
        self.update_statuses(r);
        self.update_modifiers(r);
    }
}
