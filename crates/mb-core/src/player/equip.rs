//! Worn equipment

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use crate::object::Object;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum EquipSlot {
    Weapon,
    Bow,
    LeftRing,
    RightRing,
    Neck,
    Light,
    Body,
    Outer,
    Arm,
    Head,
    Hands,
    Feet,
}

impl EquipSlot {
    /// Slots that acid can eat into
    pub const ARMOUR: [EquipSlot; 6] = [
        EquipSlot::Body,
        EquipSlot::Arm,
        EquipSlot::Outer,
        EquipSlot::Hands,
        EquipSlot::Head,
        EquipSlot::Feet,
    ];

    /// Slots a disenchantment attack can pick
    pub const DISENCHANTABLE: [EquipSlot; 8] = [
        EquipSlot::Weapon,
        EquipSlot::Bow,
        EquipSlot::Body,
        EquipSlot::Outer,
        EquipSlot::Arm,
        EquipSlot::Head,
        EquipSlot::Hands,
        EquipSlot::Feet,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    slots: [Option<Object>; EquipSlot::COUNT],
}

impl Equipment {
    pub fn get(&self, slot: EquipSlot) -> Option<&Object> {
        self.slots[slot as usize].as_ref()
    }

    pub fn get_mut(&mut self, slot: EquipSlot) -> Option<&mut Object> {
        self.slots[slot as usize].as_mut()
    }

    /// Wear an item, returning whatever was there before
    pub fn wear(&mut self, slot: EquipSlot, obj: Object) -> Option<Object> {
        self.slots[slot as usize].replace(obj)
    }

    pub fn take_off(&mut self, slot: EquipSlot) -> Option<Object> {
        self.slots[slot as usize].take()
    }

    /// Total armour class from worn items
    pub fn armour_class(&self) -> i32 {
        self.slots.iter().flatten().map(|o| o.ac + o.to_a).sum()
    }
}
