//! Turn-based dungeon simulation core.
//!
//! Everything lives in a [`Runtime`]. Creatures and items are [`Entity`]
//! handles into it, the view layer reads state through them and drains
//! [`Msg`] notifications from the runtime after each update.

mod action;
pub use action::{Action, MoveRequest, MoveResult};

mod ai;
pub use ai::AiTier;

mod cell;
pub use cell::{Cell, CellKind, WalkEffect};

mod combat;
pub use combat::{
    defense_rate, defense_thresholds, resolve_attack, roll_thresholds,
    severity, AttackResult, Combatant, Outcome,
};

mod config;
pub use config::Settings;

mod dice;
pub use dice::Dice;

pub mod ecs;

mod entity;
pub use entity::Entity;

mod error;
pub use error::{Error, Result};

mod fov;

mod item;
pub use item::{
    compare_items, ActionReport, DamageType, EquipSlot, ItemKind, ItemType,
    Preference, Weapon,
};

mod level;
pub use level::{Level, Spawn};

mod location;
pub use location::{LevelId, Location};

mod mob;

pub mod msg;
pub use msg::{Grammatize, Msg};

mod pathing;

mod phrase;
pub use phrase::pick_phrase;

mod placement;
pub use placement::{Place, Placement};

pub mod prelude;

mod record;
pub use record::{CellRecord, EntityRecord, ItemRecord, StatusRecord};

mod runtime;
pub use runtime::{Runtime, ScenarioStatus, ACTION_COST};

mod species;
pub use species::{Species, SpeciesData};

mod status;
pub use status::{Status, StatusKind};

mod time;
pub use time::{DungeonEvent, Instant, ScheduledEvent};
