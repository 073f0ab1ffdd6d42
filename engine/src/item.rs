//! Items, the armory table and inventory handling.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use util::{Noun, Sentence, StrExt};

use crate::{ecs::*, placement::Place, prelude::*, Dice, StatusKind};

/// Broad item category, items of different kinds are never compared.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ItemKind {
    #[default]
    None,
    Weapon,
    Armour,
    Ring,
    Amulet,
}

impl ItemKind {
    /// Equipment slot items of this kind go to.
    pub fn slot(self) -> EquipSlot {
        match self {
            ItemKind::None => EquipSlot::None,
            ItemKind::Weapon => EquipSlot::Weapon,
            ItemKind::Armour => EquipSlot::Body,
            ItemKind::Ring => EquipSlot::Ring,
            ItemKind::Amulet => EquipSlot::Amulet,
        }
    }
}

/// Equipment slot. As a component on an item, where the item is worn.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
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
pub enum EquipSlot {
    #[default]
    None,
    Weapon,
    Body,
    Ring,
    Amulet,
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
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
pub enum DamageType {
    Slash,
    Pierce,
    Blunt,
    Bite,
    Claw,
    #[default]
    Punch,
}

/// Attack profile of a wielded item or a creature's natural attack.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Weapon {
    pub damage: Dice,
    pub to_hit: Dice,
    pub damage_type: DamageType,
    /// Statuses a penetrating hit may inflict.
    pub criticals: &'static [StatusKind],
}

impl Weapon {
    pub const fn new(
        damage: Dice,
        to_hit: Dice,
        damage_type: DamageType,
        criticals: &'static [StatusKind],
    ) -> Self {
        Weapon {
            damage,
            to_hit,
            damage_type,
            criticals,
        }
    }
}

/// Item types the armory knows how to build.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
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
pub enum ItemType {
    #[default]
    None,
    Dagger,
    ShortSword,
    LongSword,
    Axe,
    Mace,
    Club,
    LeatherArmour,
    ChainMail,
    IronRing,
    BoneAmulet,
}

use ItemType::*;

const fn d(multiplier: i32, sides: i32, additional: i32) -> Dice {
    Dice::new(multiplier, sides, additional)
}

impl ItemType {
    pub fn kind(self) -> ItemKind {
        match self {
            None => ItemKind::None,
            Dagger | ShortSword | LongSword | Axe | Mace | Club => {
                ItemKind::Weapon
            }
            LeatherArmour | ChainMail => ItemKind::Armour,
            IronRing => ItemKind::Ring,
            BoneAmulet => ItemKind::Amulet,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            None => "nothing",
            Dagger => "dagger",
            ShortSword => "short sword",
            LongSword => "long sword",
            Axe => "axe",
            Mace => "mace",
            Club => "club",
            LeatherArmour => "leather armour",
            ChainMail => "chain mail",
            IronRing => "iron ring",
            BoneAmulet => "bone amulet",
        }
    }

    pub fn weapon(self) -> Option<Weapon> {
        use DamageType::*;
        use StatusKind::*;

        let ret = match self {
            Dagger => Weapon::new(d(1, 4, 0), d(1, 8, 0), Pierce, &[Bleeding]),
            ShortSword => Weapon::new(d(1, 6, 0), d(1, 6, 0), Slash, &[Bleeding]),
            LongSword => Weapon::new(d(1, 8, 0), d(1, 6, 0), Slash, &[Bleeding]),
            Axe => Weapon::new(d(1, 8, 1), d(1, 4, 0), Slash, &[]),
            Mace => Weapon::new(d(1, 6, 1), d(1, 4, 0), Blunt, &[Stunned]),
            Club => Weapon::new(d(1, 6, 0), d(1, 4, 0), Blunt, &[]),
            _ => return Option::None,
        };
        Some(ret)
    }

    /// Protection from wearing the item.
    pub fn armour(self) -> i32 {
        match self {
            LeatherArmour => 1,
            ChainMail => 3,
            _ => 0,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            None => '?',
            Dagger => '(',
            ShortSword => ')',
            LongSword => '|',
            Axe => '/',
            Mace => '\\',
            Club => '!',
            LeatherArmour => '[',
            ChainMail => ']',
            IronRing => '=',
            BoneAmulet => '"',
        }
    }

    pub fn from_glyph(c: char) -> Option<ItemType> {
        ItemType::iter().find(|t| *t != None && t.glyph() == c)
    }

    pub fn sprite(self) -> String {
        self.to_string()
    }
}

/// Outcome of comparing two items for equipping.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Preference {
    First,
    Second,
    Incomparable,
}

/// Choose the better one of two items of the same kind.
///
/// Ties go to the first item, so pass the currently equipped item first.
pub fn compare_items(
    r: &impl AsRef<Runtime>,
    a: &Entity,
    b: &Entity,
) -> Preference {
    let r = r.as_ref();
    let kind = a.item_kind(r);
    if kind == ItemKind::None || kind != b.item_kind(r) {
        return Preference::Incomparable;
    }

    let (x, y) = match kind {
        ItemKind::Weapon => (
            a.get::<Weapon>(r).damage.max(),
            b.get::<Weapon>(r).damage.max(),
        ),
        ItemKind::Armour => (a.get::<Armour>(r).0, b.get::<Armour>(r).0),
        // Ring and amulet effects are not weighed yet.
        _ => return Preference::First,
    };

    if y > x {
        Preference::Second
    } else {
        Preference::First
    }
}

/// Result of an inventory action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActionReport {
    Done(String),
    Disallowed(String),
}

impl ActionReport {
    pub fn is_done(&self) -> bool {
        matches!(self, ActionReport::Done(_))
    }

    pub fn message(&self) -> &str {
        match self {
            ActionReport::Done(s) | ActionReport::Disallowed(s) => s,
        }
    }
}

fn sentence(subject: &Noun, object: &Noun, template: &str) -> String {
    match template.templatize(|t| Sentence::new(subject, object).convert(t)) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("bad message template {template:?}: {e}");
            template.to_string()
        }
    }
}

impl Entity {
    pub fn is_item(&self, r: &impl AsRef<Runtime>) -> bool {
        self.item_type(r) != ItemType::None
    }

    pub fn item_type(&self, r: &impl AsRef<Runtime>) -> ItemType {
        self.get::<ItemType>(r)
    }

    pub fn item_kind(&self, r: &impl AsRef<Runtime>) -> ItemKind {
        self.get::<ItemKind>(r)
    }

    /// Slot the item is currently worn in.
    pub fn equipped_at(&self, r: &impl AsRef<Runtime>) -> EquipSlot {
        self.get::<EquipSlot>(r)
    }

    /// Items carried by a mob, worn ones included.
    pub fn inventory(&self, r: &impl AsRef<Runtime>) -> Vec<Entity> {
        self.contents(r).filter(|e| e.is_item(r)).collect()
    }

    /// Carried items that are not worn.
    pub fn backpack(&self, r: &impl AsRef<Runtime>) -> Vec<Entity> {
        self.contents(r)
            .filter(|e| e.is_item(r) && e.equipped_at(r) == EquipSlot::None)
            .collect()
    }

    pub fn equipment(&self, r: &impl AsRef<Runtime>) -> Vec<Entity> {
        self.contents(r)
            .filter(|e| e.equipped_at(r) != EquipSlot::None)
            .collect()
    }

    pub fn equipped(
        &self,
        r: &impl AsRef<Runtime>,
        slot: EquipSlot,
    ) -> Option<Entity> {
        if slot == EquipSlot::None {
            return Option::None;
        }
        self.contents(r).find(|e| e.equipped_at(r) == slot)
    }

    pub fn wielded(&self, r: &impl AsRef<Runtime>) -> Option<Entity> {
        self.equipped(r, EquipSlot::Weapon)
    }

    /// Attack profile, the wielded weapon or the natural attack.
    pub fn weapon(&self, r: &impl AsRef<Runtime>) -> Weapon {
        match self.wielded(r) {
            Some(w) => w.get::<Weapon>(r),
            Option::None => self.get::<NaturalWeapon>(r).weapon,
        }
    }

    /// Description of the current attack for combat messages.
    pub fn weapon_name(&self, r: &impl AsRef<Runtime>) -> String {
        match self.wielded(r) {
            Some(w) => w.name(r),
            Option::None => self.get::<NaturalWeapon>(r).name.to_string(),
        }
    }

    /// Total protection from natural armour and worn items.
    pub fn protection(&self, r: &impl AsRef<Runtime>) -> i32 {
        self.get::<Protection>(r).0
            + self
                .equipment(r)
                .iter()
                .map(|e| e.get::<Armour>(r).0)
                .sum::<i32>()
    }

    fn is_carrying(&self, r: &impl AsRef<Runtime>, item: &Entity) -> bool {
        item.place_of(r) == Some(Place::In(*self))
    }

    pub fn pick_up(
        &self,
        r: &mut impl AsMut<Runtime>,
        item: &Entity,
    ) -> ActionReport {
        let r = r.as_mut();
        let (subject, object) = (self.noun(r), item.noun(r));

        let Some(loc) = self.loc(r) else {
            return ActionReport::Disallowed("Nobody to pick it up.".into());
        };
        if !item.is_item(r) || item.place_of(r) != Some(Place::At(loc)) {
            return ActionReport::Disallowed(sentence(
                &subject,
                &object,
                "[One] can't reach [another].",
            ));
        }

        item.place(r, *self);
        r.send_msg(Msg::ItemPickedUp {
            mob: *self,
            item: *item,
        });
        let text = sentence(&subject, &object, "[One] pick[s] up [another].");
        r.send_msg(Msg::Message(text.clone()));
        ActionReport::Done(text)
    }

    pub fn drop(
        &self,
        r: &mut impl AsMut<Runtime>,
        item: &Entity,
    ) -> ActionReport {
        let r = r.as_mut();
        let (subject, object) = (self.noun(r), item.noun(r));

        let Some(loc) = self.loc(r) else {
            return ActionReport::Disallowed("Nowhere to drop it.".into());
        };
        if !self.is_carrying(r, item) {
            return ActionReport::Disallowed(sentence(
                &subject,
                &object,
                "[One] [is] not carrying [another].",
            ));
        }

        item.set(r, EquipSlot::None);
        item.place(r, loc);
        r.send_msg(Msg::ItemDropped {
            mob: *self,
            item: *item,
        });
        let text = sentence(&subject, &object, "[One] drop[s] [another].");
        r.send_msg(Msg::Message(text.clone()));
        ActionReport::Done(text)
    }

    /// Wear or wield a carried item, swapping out whatever was in its slot.
    pub fn equip(
        &self,
        r: &mut impl AsMut<Runtime>,
        item: &Entity,
    ) -> ActionReport {
        let r = r.as_mut();
        let (subject, object) = (self.noun(r), item.noun(r));

        if !self.is_carrying(r, item) {
            return ActionReport::Disallowed(sentence(
                &subject,
                &object,
                "[One] [is] not carrying [another].",
            ));
        }
        let slot = item.item_kind(r).slot();
        if slot == EquipSlot::None {
            return ActionReport::Disallowed(sentence(
                &subject,
                &object,
                "[One] can't equip [another].",
            ));
        }
        if item.equipped_at(r) == slot {
            return ActionReport::Disallowed(sentence(
                &subject,
                &object,
                "[One] already [have] [another] on.",
            ));
        }

        if let Some(old) = self.equipped(r, slot) {
            old.set(r, EquipSlot::None);
        }
        item.set(r, slot);

        let template = if slot == EquipSlot::Weapon {
            "[One] wield[s] [another]."
        } else {
            "[One] put[s] on [another]."
        };
        let text = sentence(&subject, &object, template);
        r.send_msg(Msg::Message(text.clone()));
        ActionReport::Done(text)
    }

    pub fn unequip(
        &self,
        r: &mut impl AsMut<Runtime>,
        item: &Entity,
    ) -> ActionReport {
        let r = r.as_mut();
        let (subject, object) = (self.noun(r), item.noun(r));

        if !self.is_carrying(r, item)
            || item.equipped_at(r) == EquipSlot::None
        {
            return ActionReport::Disallowed(sentence(
                &subject,
                &object,
                "[One] [is] not wearing [another].",
            ));
        }

        item.set(r, EquipSlot::None);
        let text = sentence(&subject, &object, "[One] take[s] off [another].");
        r.send_msg(Msg::Message(text.clone()));
        ActionReport::Done(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs() {
        for t in ItemType::iter().filter(|t| *t != None) {
            assert_eq!(ItemType::from_glyph(t.glyph()), Some(t));
            assert_ne!(t.kind(), ItemKind::None);
        }
        assert_eq!(ItemType::from_glyph('?'), Option::None);
        assert_eq!("long-sword".parse::<ItemType>(), Ok(LongSword));
    }

    #[test]
    fn comparisons() {
        let mut r = Runtime::default();
        let dagger = r.spawn_item(Dagger);
        let axe = r.spawn_item(Axe);
        let axe2 = r.spawn_item(Axe);
        let leather = r.spawn_item(LeatherArmour);
        let mail = r.spawn_item(ChainMail);
        let ring = r.spawn_item(IronRing);
        let ring2 = r.spawn_item(IronRing);

        assert_eq!(compare_items(&r, &dagger, &axe), Preference::Second);
        assert_eq!(compare_items(&r, &axe, &dagger), Preference::First);
        assert_eq!(compare_items(&r, &axe, &axe2), Preference::First);
        assert_eq!(compare_items(&r, &leather, &mail), Preference::Second);
        assert_eq!(compare_items(&r, &ring2, &ring), Preference::First);
        assert_eq!(compare_items(&r, &axe, &mail), Preference::Incomparable);
    }

    #[test]
    fn drop_and_pick_up_are_inverse() {
        let mut r = Runtime::from_ascii(
            "
            #####
            #@..#
            #####",
        )
        .unwrap();
        let player = r.player().unwrap();
        let loc = player.loc(&r).unwrap();
        let sword = r.spawn_item(ShortSword);
        let other = r.spawn_item(Club);
        sword.place(&mut r, player);
        other.place(&mut r, loc);

        let (inv, ground) = (player.inventory(&r).len(), loc.items_at(&r).len());

        assert!(player.drop(&mut r, &sword).is_done());
        assert_eq!(player.inventory(&r).len(), inv - 1);
        assert_eq!(loc.items_at(&r), vec![other, sword]);

        assert!(player.pick_up(&mut r, &sword).is_done());
        assert_eq!(player.inventory(&r), vec![sword]);
        assert_eq!(loc.items_at(&r).len(), ground);
        assert_eq!(loc.items_at(&r), vec![other]);

        // Can't drop what you don't have.
        assert!(!player.drop(&mut r, &other).is_done());
    }

    #[test]
    fn equip_swaps_slot() {
        let mut r = Runtime::from_ascii(
            "
            ###
            #@#
            ###",
        )
        .unwrap();
        let player = r.player().unwrap();
        let club = r.spawn_item(Club);
        let axe = r.spawn_item(Axe);
        let mail = r.spawn_item(ChainMail);
        for e in [club, axe, mail] {
            e.place(&mut r, player);
        }

        let base = player.protection(&r);
        assert!(player.equip(&mut r, &club).is_done());
        assert_eq!(player.wielded(&r), Some(club));
        assert!(player.equip(&mut r, &axe).is_done());
        assert_eq!(player.wielded(&r), Some(axe));
        assert_eq!(club.equipped_at(&r), EquipSlot::None);
        assert_eq!(player.weapon(&r).damage, d(1, 8, 1));

        assert!(player.equip(&mut r, &mail).is_done());
        assert_eq!(player.protection(&r), base + 3);
        assert!(player.unequip(&mut r, &mail).is_done());
        assert_eq!(player.protection(&r), base);
        assert_eq!(player.equipment(&r), vec![axe]);
        assert_eq!(player.backpack(&r), vec![club, mail]);
    }
}
