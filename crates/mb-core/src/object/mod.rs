//! Objects lying on the floor or carried by players

mod kind;

pub use kind::{Element, ObjectKind};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-object flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ObjectFlags: u16 {
        const IGNORE_ACID = 0x0001;
        const IGNORE_ELEC = 0x0002;
        const IGNORE_FIRE = 0x0004;
        const IGNORE_COLD = 0x0008;
        /// Unique named item
        const ARTIFACT = 0x0010;
        const CURSED = 0x0020;
        /// Player has identified the item
        const KNOWN = 0x0040;
    }
}

/// A stack of identical items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub kind: ObjectKind,
    pub name: String,
    pub number: u16,
    /// Kind-specific value: gold amount, chest trap/lock state, ...
    pub pval: i32,
    pub to_h: i32,
    pub to_d: i32,
    pub to_a: i32,
    pub ac: i32,
    pub flags: ObjectFlags,
}

impl Object {
    pub fn new(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            number: 1,
            pval: 0,
            to_h: 0,
            to_d: 0,
            to_a: 0,
            ac: 0,
            flags: ObjectFlags::empty(),
        }
    }

    /// A pile of gold
    pub fn gold(amount: i32) -> Self {
        Self {
            pval: amount,
            ..Self::new(ObjectKind::Gold, "gold")
        }
    }

    pub fn with_number(mut self, number: u16) -> Self {
        self.number = number;
        self
    }

    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_pval(mut self, pval: i32) -> Self {
        self.pval = pval;
        self
    }

    pub fn with_bonuses(mut self, to_h: i32, to_d: i32, to_a: i32) -> Self {
        self.to_h = to_h;
        self.to_d = to_d;
        self.to_a = to_a;
        self
    }

    pub fn is_artifact(&self) -> bool {
        self.flags.contains(ObjectFlags::ARTIFACT)
    }

    pub fn is_cursed(&self) -> bool {
        self.flags.contains(ObjectFlags::CURSED)
    }

    /// Harmed by the element and not protected against it
    pub fn vulnerable_to(&self, element: Element) -> bool {
        element.harms(self.kind) && !self.flags.contains(element.ignore_flag())
    }

    /// Short description such as "3 Flasks of oil" or "the Phial"
    pub fn describe(&self) -> String {
        if self.is_artifact() {
            format!("the {}", self.name)
        } else if self.number > 1 {
            format!("{} {}", self.number, self.plural_name())
        } else {
            self.name.clone()
        }
    }

    /// The name with its head noun pluralised: "Scroll of Light" becomes
    /// "Scrolls of Light", "Dagger" becomes "Daggers"
    pub fn plural_name(&self) -> String {
        let (head, tail) = match self.name.find(" of ") {
            Some(at) => self.name.split_at(at),
            None => (self.name.as_str(), ""),
        };
        format!("{}{}", pluralize(head), tail)
    }

    /// Pick the singular or plural verb form for this stack
    pub fn verb<'a>(&self, singular: &'a str, plural: &'a str) -> &'a str {
        if self.number > 1 { plural } else { singular }
    }
}

fn pluralize(noun: &str) -> String {
    let lower = noun.to_ascii_lowercase();
    if ["s", "x", "z", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
        format!("{noun}es")
    } else if let Some(stem) = noun.strip_suffix(['y', 'Y'])
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        format!("{stem}ies")
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_flag_blocks_vulnerability() {
        let cloak = Object::new(ObjectKind::Cloak, "Cloak");
        assert!(cloak.vulnerable_to(Element::Fire));
        let cloak = cloak.with_flags(ObjectFlags::IGNORE_FIRE);
        assert!(!cloak.vulnerable_to(Element::Fire));
        assert!(cloak.vulnerable_to(Element::Acid));
    }

    #[test]
    fn test_describe() {
        let flasks = Object::new(ObjectKind::Flask, "Flask of oil").with_number(3);
        assert_eq!(flasks.describe(), "3 Flasks of oil");
        assert_eq!(flasks.verb("shatters", "shatter"), "shatter");
        let phial = Object::new(ObjectKind::Lite, "Phial").with_flags(ObjectFlags::ARTIFACT);
        assert_eq!(phial.describe(), "the Phial");
        assert_eq!(Object::new(ObjectKind::Potion, "Potion of Cure Light Wounds").describe(), "Potion of Cure Light Wounds");
    }

    #[test]
    fn test_plural_name() {
        let stack = |name: &str| Object::new(ObjectKind::Food, name).with_number(2).plural_name();
        assert_eq!(stack("Scroll of Light"), "Scrolls of Light");
        assert_eq!(stack("Dagger"), "Daggers");
        assert_eq!(stack("Small wooden chest"), "Small wooden chests");
        assert_eq!(stack("Torch"), "Torches");
        assert_eq!(stack("Berry of Healing"), "Berries of Healing");
        assert_eq!(stack("Whisky"), "Whiskies");
        assert_eq!(stack("Key"), "Keys");
    }
}
