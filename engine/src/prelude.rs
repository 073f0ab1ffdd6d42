pub use crate::{
    msg, Action, Entity, Error, Grammatize, Instant, Level, LevelId, Location,
    Msg, Result, Runtime,
};
pub use glam::{ivec2, IVec2};
pub use util::{HashMap, HashSet, IndexMap, IndexSet, VecExt, DIR_8};
