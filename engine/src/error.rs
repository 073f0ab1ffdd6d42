use thiserror::Error;

use crate::{Entity, LevelId, Location};

/// Failures that abort the current operation.
///
/// Ordinary gameplay outcomes like a blocked step or a missed attack are not
/// errors, they come back as regular result values.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed dice spec {0:?}")]
    MalformedDiceSpec(String),
    #[error("unknown cell type {0:?}")]
    UnknownCellType(String),
    #[error("unknown item type {0:?}")]
    UnknownItemType(String),
    #[error("unknown monster type {0:?}")]
    UnknownMonsterType(String),
    #[error("move target {0} is outside the level")]
    InvalidMoveTarget(Location),
    #[error("entity {0} does not exist")]
    MissingEntityController(Entity),
    #[error("level {0} is not loaded")]
    UnknownLevel(LevelId),
    #[error("level {0} is already loaded")]
    LevelAlreadyLoaded(LevelId),
    #[error("no pending move request {0}")]
    UnknownMoveRequest(u64),
    #[error("entity {0} already has a move awaiting confirmation")]
    MovePending(Entity),
    #[error("map has no player entry point")]
    NoPlayer,
    #[error("status record of entity {found} attached to entity {expected}")]
    StatusOwnerMismatch { expected: u64, found: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
