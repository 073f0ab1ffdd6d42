//! Plain data snapshots of game objects.
//!
//! Records name their types with the same strings the factories take, so
//! restoring one goes through the factories and fails on unknown types.
//! Entity ids are not preserved over a restore.

use serde::{Deserialize, Serialize};

use crate::{
    ecs::{Health, Modifier, Modifiers, Protection, Size, Stats, Statuses},
    prelude::*,
    Cell, CellKind, Dice, EquipSlot, ItemType, Species, Status, StatusKind,
    Weapon,
};

/// How far from the requested spot a restored creature may end up.
const RESTORE_RANGE: usize = 8;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub display: String,
    #[serde(default)]
    pub player: bool,
    #[serde(flatten)]
    pub stats: Stats,
    pub hit_points: i32,
    pub max_hit_points: i32,
    /// Natural protection, worn armour is counted from the inventory.
    pub protection: i32,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub inventory: Vec<ItemRecord>,
    #[serde(default)]
    pub statuses: Vec<StatusRecord>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub display: String,
    #[serde(default)]
    pub slot: EquipSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<Dice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_hit: Option<Dice>,
    #[serde(default)]
    pub protection: i32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    /// Id of the entity the status belongs to.
    pub entity_model_id: u64,
    #[serde(rename = "type")]
    pub kind: StatusKind,
    pub turn_count: i32,
    pub duration: i32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub display: String,
    pub discovered: bool,
    #[serde(default)]
    pub bloodied: bool,
}

impl Entity {
    /// Snapshot of a creature and everything it carries.
    pub fn record(&self, r: &impl AsRef<Runtime>) -> EntityRecord {
        let r = r.as_ref();
        let id = self.id();
        EntityRecord {
            id,
            kind: self.species(r).to_string(),
            name: self.name(r),
            display: self.display(r),
            player: self.is_player(r),
            stats: self.base_stats(r),
            hit_points: self.hit_points(r),
            max_hit_points: self.max_hit_points(r),
            protection: self.get::<Protection>(r).0,
            size: self.get::<Size>(r),
            location: self.loc(r),
            inventory: self
                .inventory(r)
                .iter()
                .map(|e| e.item_record(r))
                .collect(),
            statuses: self
                .statuses(r)
                .into_iter()
                .map(|s| StatusRecord {
                    entity_model_id: id,
                    kind: s.kind,
                    turn_count: s.turn_count,
                    duration: s.duration,
                })
                .collect(),
            modifiers: self.modifiers(r),
        }
    }

    pub fn item_record(&self, r: &impl AsRef<Runtime>) -> ItemRecord {
        let weapon = self.item_type(r).weapon().map(|_| self.get::<Weapon>(r));
        ItemRecord {
            id: self.id(),
            kind: self.item_type(r).to_string(),
            display: self.display(r),
            slot: self.equipped_at(r),
            damage: weapon.map(|w| w.damage),
            to_hit: weapon.map(|w| w.to_hit),
            protection: self.get::<crate::ecs::Armour>(r).0,
        }
    }
}

fn parse_item_type(name: &str) -> Result<ItemType> {
    match name.parse::<ItemType>() {
        Ok(t) if t != ItemType::None => Ok(t),
        _ => Err(Error::UnknownItemType(name.into())),
    }
}

impl Runtime {
    /// Rebuild a creature from a record, placing it at or near `loc`.
    ///
    /// The record is validated before anything is spawned, a failed restore
    /// leaves the runtime untouched.
    pub fn restore_entity(
        &mut self,
        rec: &EntityRecord,
        loc: Location,
    ) -> Result<Entity> {
        if !loc.is_on_map(self) {
            return Err(Error::InvalidMoveTarget(loc));
        }
        match rec.kind.parse::<Species>() {
            Ok(s) if s != Species::None => {}
            _ => return Err(Error::UnknownMonsterType(rec.kind.clone())),
        }
        for item in &rec.inventory {
            parse_item_type(&item.kind)?;
        }
        for s in &rec.statuses {
            if s.entity_model_id != rec.id {
                return Err(Error::StatusOwnerMismatch {
                    expected: rec.id,
                    found: s.entity_model_id,
                });
            }
        }

        let spot = self.open_spot_near(loc, RESTORE_RANGE).unwrap_or_else(|| {
            log::warn!("restore_entity: no room near {loc}, crowding in");
            loc
        });
        let e = self.spawn_monster_named(&rec.kind, spot)?;

        e.set(self, crate::ecs::Name(rec.name.clone()));
        e.set(self, crate::ecs::Sprite(rec.display.clone()));
        e.set(self, rec.stats);
        e.set(
            self,
            Health {
                hit_points: rec.hit_points,
                max_hit_points: rec.max_hit_points,
            },
        );
        e.set(self, Protection(rec.protection));
        e.set(self, rec.size);
        e.set(
            self,
            Statuses(
                rec.statuses
                    .iter()
                    .map(|s| Status {
                        kind: s.kind,
                        turn_count: s.turn_count,
                        duration: s.duration,
                    })
                    .collect(),
            ),
        );
        e.set(self, Modifiers(rec.modifiers.clone()));

        for item_rec in &rec.inventory {
            let item = self.spawn_item(parse_item_type(&item_rec.kind)?);
            if let (Some(damage), Some(to_hit)) =
                (item_rec.damage, item_rec.to_hit)
            {
                let mut weapon = item.get::<Weapon>(self);
                weapon.damage = damage;
                weapon.to_hit = to_hit;
                item.set(self, weapon);
            }
            item.set(self, crate::ecs::Armour(item_rec.protection));
            item.set(self, crate::ecs::Sprite(item_rec.display.clone()));
            item.place(self, e);
            item.set(self, item_rec.slot);
        }

        if rec.player && self.player.is_none() {
            self.player = Some(e);
        }
        e.compute_fov(self);
        Ok(e)
    }
}

impl Level {
    /// Cell records in row order.
    pub fn records(&self) -> Vec<CellRecord> {
        self.iter()
            .map(|(loc, cell)| CellRecord {
                x: loc.x,
                y: loc.y,
                kind: cell.kind().to_string(),
                display: cell.display().to_string(),
                discovered: cell.is_discovered(),
                bloodied: cell.is_bloodied(),
            })
            .collect()
    }

    /// Rebuild a level from cell records. Cells missing from the records
    /// are wall.
    pub fn from_records(id: LevelId, records: &[CellRecord]) -> Result<Level> {
        let width = records.iter().map(|c| c.x + 1).max().unwrap_or(0);
        let height = records.iter().map(|c| c.y + 1).max().unwrap_or(0);

        let mut cells = Vec::with_capacity(records.len());
        for c in records {
            let kind = c
                .kind
                .parse::<CellKind>()
                .map_err(|_| Error::UnknownCellType(c.kind.clone()))?;
            cells.push((
                ivec2(c.x, c.y),
                Cell::restore(kind, c.display.clone(), c.discovered, c.bloodied),
            ));
        }

        Ok(Level::from_cells(id, width, height, cells))
    }
}
