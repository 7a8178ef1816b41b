//! Object categories and elemental vulnerability

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::ObjectFlags;

/// Broad object category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum ObjectKind {
    Skeleton,
    Bottle,
    #[default]
    Junk,
    Spike,
    Chest,
    Shot,
    Arrow,
    Bolt,
    Bow,
    Digging,
    Hafted,
    Polearm,
    Sword,
    Boots,
    Gloves,
    Helm,
    Crown,
    Shield,
    Cloak,
    SoftArmor,
    HardArmor,
    DragonArmor,
    Lite,
    Amulet,
    Ring,
    Staff,
    Wand,
    Rod,
    Scroll,
    Potion,
    Flask,
    Food,
    MagicBook,
    PrayerBook,
    Gold,
}

impl ObjectKind {
    pub const fn hates_acid(&self) -> bool {
        matches!(
            self,
            ObjectKind::Arrow
                | ObjectKind::Bolt
                | ObjectKind::Bow
                | ObjectKind::Sword
                | ObjectKind::Hafted
                | ObjectKind::Polearm
                | ObjectKind::Helm
                | ObjectKind::Crown
                | ObjectKind::Shield
                | ObjectKind::Boots
                | ObjectKind::Gloves
                | ObjectKind::Cloak
                | ObjectKind::SoftArmor
                | ObjectKind::HardArmor
                | ObjectKind::DragonArmor
                | ObjectKind::Staff
                | ObjectKind::Scroll
                | ObjectKind::Chest
                | ObjectKind::Skeleton
                | ObjectKind::Bottle
                | ObjectKind::Junk
        )
    }

    pub const fn hates_elec(&self) -> bool {
        matches!(self, ObjectKind::Ring | ObjectKind::Wand)
    }

    pub const fn hates_fire(&self) -> bool {
        matches!(
            self,
            ObjectKind::Lite
                | ObjectKind::Arrow
                | ObjectKind::Bow
                | ObjectKind::Hafted
                | ObjectKind::Polearm
                | ObjectKind::Boots
                | ObjectKind::Gloves
                | ObjectKind::Cloak
                | ObjectKind::SoftArmor
                | ObjectKind::MagicBook
                | ObjectKind::PrayerBook
                | ObjectKind::Chest
                | ObjectKind::Staff
                | ObjectKind::Scroll
        )
    }

    pub const fn hates_cold(&self) -> bool {
        matches!(
            self,
            ObjectKind::Potion | ObjectKind::Flask | ObjectKind::Bottle
        )
    }

    /// Melee weapon or launcher
    pub const fn is_weapon(&self) -> bool {
        matches!(
            self,
            ObjectKind::Sword
                | ObjectKind::Hafted
                | ObjectKind::Polearm
                | ObjectKind::Digging
                | ObjectKind::Bow
        )
    }

    pub const fn is_armour(&self) -> bool {
        matches!(
            self,
            ObjectKind::Boots
                | ObjectKind::Gloves
                | ObjectKind::Helm
                | ObjectKind::Crown
                | ObjectKind::Shield
                | ObjectKind::Cloak
                | ObjectKind::SoftArmor
                | ObjectKind::HardArmor
                | ObjectKind::DragonArmor
        )
    }

    /// Map glyph for a lying object
    pub const fn symbol(&self) -> char {
        match self {
            ObjectKind::Skeleton => '~',
            ObjectKind::Bottle | ObjectKind::Junk | ObjectKind::Spike => '~',
            ObjectKind::Chest => '~',
            ObjectKind::Shot | ObjectKind::Arrow | ObjectKind::Bolt => '{',
            ObjectKind::Bow => '}',
            ObjectKind::Digging => '\\',
            ObjectKind::Hafted => '\\',
            ObjectKind::Polearm => '/',
            ObjectKind::Sword => '|',
            ObjectKind::Boots
            | ObjectKind::Gloves
            | ObjectKind::SoftArmor
            | ObjectKind::HardArmor
            | ObjectKind::DragonArmor => '[',
            ObjectKind::Helm | ObjectKind::Crown => ']',
            ObjectKind::Shield => ')',
            ObjectKind::Cloak => '(',
            ObjectKind::Lite => '~',
            ObjectKind::Amulet => '"',
            ObjectKind::Ring => '=',
            ObjectKind::Staff => '_',
            ObjectKind::Wand | ObjectKind::Rod => '-',
            ObjectKind::Scroll => '?',
            ObjectKind::Potion | ObjectKind::Flask => '!',
            ObjectKind::Food => ',',
            ObjectKind::MagicBook | ObjectKind::PrayerBook => '?',
            ObjectKind::Gold => '$',
        }
    }
}

/// The four destructive elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Element {
    Acid,
    Elec,
    Fire,
    Cold,
}

impl Element {
    /// Whether objects of this kind are harmed by the element
    pub const fn harms(&self, kind: ObjectKind) -> bool {
        match self {
            Element::Acid => kind.hates_acid(),
            Element::Elec => kind.hates_elec(),
            Element::Fire => kind.hates_fire(),
            Element::Cold => kind.hates_cold(),
        }
    }

    /// Object flag that grants immunity to this element
    pub const fn ignore_flag(&self) -> ObjectFlags {
        match self {
            Element::Acid => ObjectFlags::IGNORE_ACID,
            Element::Elec => ObjectFlags::IGNORE_ELEC,
            Element::Fire => ObjectFlags::IGNORE_FIRE,
            Element::Cold => ObjectFlags::IGNORE_COLD,
        }
    }

    /// Verb used when an item is destroyed by this element
    pub const fn destroy_verb(&self) -> (&'static str, &'static str) {
        match self {
            Element::Acid => ("melts", "melt"),
            Element::Elec => ("is destroyed", "are destroyed"),
            Element::Fire => ("burns up", "burn up"),
            Element::Cold => ("shatters", "shatter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_cold_only_breaks_containers() {
        let cold: Vec<_> = ObjectKind::iter().filter(|k| k.hates_cold()).collect();
        assert_eq!(
            cold,
            vec![ObjectKind::Bottle, ObjectKind::Potion, ObjectKind::Flask]
        );
    }

    #[test]
    fn test_gold_is_indestructible() {
        for element in Element::iter() {
            assert!(!element.harms(ObjectKind::Gold));
        }
    }

    #[test]
    fn test_books_burn() {
        assert!(Element::Fire.harms(ObjectKind::MagicBook));
        assert!(!Element::Acid.harms(ObjectKind::MagicBook));
    }
}
