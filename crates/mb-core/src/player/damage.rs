//! Damage, healing, and equipment harm applied to a player

use super::{EquipSlot, Player, PlayerFlags, TimedEffect};
use crate::GameRng;
use crate::consts::INVULN_THRESHOLD;
use crate::object::{Element, ObjectFlags};

/// Reduce hit points, marking the player dead when they drop below zero
///
/// Does nothing once the player is already dead.
pub fn take_hit(player: &mut Player, damage: i32, cause: &str) {
    if player.death {
        return;
    }

    player.disturb();

    if player.timed.active(TimedEffect::Invuln) && damage < INVULN_THRESHOLD {
        return;
    }

    player.chp -= damage;
    if player.chp < 0 {
        player.death = true;
        player.died_from = cause.to_string();
        tracing::debug!(player = %player.id, cause, "player killed");
    } else if damage > 0 && player.chp < player.mhp / 10 {
        player.msg("*** LOW HITPOINT WARNING! ***");
    }
}

/// Heal the player; returns whether anything was restored
pub fn hp_player(player: &mut Player, amount: i32) -> bool {
    if player.chp >= player.mhp || amount <= 0 {
        return false;
    }
    player.chp = (player.chp + amount).min(player.mhp);

    let text = match amount {
        ..5 => "You feel a little better.",
        5..15 => "You feel better.",
        15..35 => "You feel much better.",
        _ => "You feel very good.",
    };
    player.msg(text);
    true
}

/// Destroy carried items vulnerable to `element`
///
/// Each unit in a stack is rolled separately against `perc`.
/// Returns the number of units destroyed.
pub fn inven_damage(player: &mut Player, element: Element, perc: i32, rng: &mut GameRng) -> i32 {
    let mut total = 0;
    let mut notes = Vec::new();

    player.inventory.retain_mut(|obj| {
        if obj.is_artifact() || !obj.vulnerable_to(element) {
            return true;
        }
        let lost = (0..obj.number).filter(|_| rng.randint0(100) < perc).count() as u16;
        if lost == 0 {
            return true;
        }

        let text = if lost == obj.number && lost > 1 {
            format!("All of your {} were destroyed!", obj.plural_name())
        } else if lost > 1 {
            format!("Some of your {} were destroyed!", obj.plural_name())
        } else if obj.number > 1 {
            format!("One of your {} was destroyed!", obj.plural_name())
        } else {
            format!("Your {} was destroyed!", obj.name)
        };
        notes.push(text);

        total += lost as i32;
        obj.number -= lost;
        obj.number > 0
    });

    for note in notes {
        player.msg(note);
    }
    total
}

/// Acid eats into a random piece of worn armour
///
/// Returns true when the armour absorbed the blow, whether or not it
/// was actually damaged.
pub fn minus_ac(player: &mut Player, rng: &mut GameRng) -> bool {
    let Some(&slot) = rng.choose(&EquipSlot::ARMOUR) else {
        return false;
    };
    let Some(obj) = player.equipment.get_mut(slot) else {
        return false;
    };
    if obj.ac + obj.to_a <= 0 {
        return false;
    }

    let text = if obj.flags.contains(ObjectFlags::IGNORE_ACID) {
        format!("Your {} is unaffected!", obj.name)
    } else {
        obj.to_a -= 1;
        format!("Your {} is damaged!", obj.name)
    };
    player.msg(text);
    true
}

/// Damage from one of the four base elements
///
/// Immunity cancels it outright; permanent resistance and temporary
/// opposition each cut it to a third. Anything short of immunity still
/// puts carried items at risk.
pub fn elemental_dam(player: &mut Player, element: Element, damage: i32, cause: &str, rng: &mut GameRng) {
    let (immune, resist, oppose) = match element {
        Element::Acid => (PlayerFlags::IM_ACID, PlayerFlags::RES_ACID, TimedEffect::OpposeAcid),
        Element::Elec => (PlayerFlags::IM_ELEC, PlayerFlags::RES_ELEC, TimedEffect::OpposeElec),
        Element::Fire => (PlayerFlags::IM_FIRE, PlayerFlags::RES_FIRE, TimedEffect::OpposeFire),
        Element::Cold => (PlayerFlags::IM_COLD, PlayerFlags::RES_COLD, TimedEffect::OpposeCold),
    };

    let inv = if damage < 30 {
        1
    } else if damage < 60 {
        2
    } else {
        3
    };

    if player.has(immune) || damage <= 0 {
        return;
    }

    let resists = player.has(resist);
    let opposed = player.timed.active(oppose);

    let mut damage = damage;
    if resists {
        damage = (damage + 2) / 3;
    }
    if opposed {
        damage = (damage + 2) / 3;
    }

    if element == Element::Acid && minus_ac(player, rng) {
        damage = (damage + 1) / 2;
    }

    take_hit(player, damage, cause);
    inven_damage(player, element, inv, rng);
}

pub fn acid_dam(player: &mut Player, damage: i32, cause: &str, rng: &mut GameRng) {
    elemental_dam(player, Element::Acid, damage, cause, rng);
}

pub fn elec_dam(player: &mut Player, damage: i32, cause: &str, rng: &mut GameRng) {
    elemental_dam(player, Element::Elec, damage, cause, rng);
}

pub fn fire_dam(player: &mut Player, damage: i32, cause: &str, rng: &mut GameRng) {
    elemental_dam(player, Element::Fire, damage, cause, rng);
}

pub fn cold_dam(player: &mut Player, damage: i32, cause: &str, rng: &mut GameRng) {
    elemental_dam(player, Element::Cold, damage, cause, rng);
}

/// Strip enchantment from a random piece of equipment
pub fn apply_disenchant(player: &mut Player, rng: &mut GameRng) -> bool {
    let Some(&slot) = rng.choose(&EquipSlot::DISENCHANTABLE) else {
        return false;
    };
    let Some(obj) = player.equipment.get(slot) else {
        return false;
    };
    if obj.to_h <= 0 && obj.to_d <= 0 && obj.to_a <= 0 {
        return false;
    }

    let name = obj.name.clone();
    let verb = obj.verb("was", "were");
    if obj.is_artifact() && rng.percent(60) {
        player.msg(format!("Your {name} ({slot}) resisted disenchantment!"));
        return true;
    }

    let extra = |value: i32, rng: &mut GameRng| i32::from(value > 5 && rng.percent(20));

    let Some(obj) = player.equipment.get_mut(slot) else {
        return false;
    };
    if matches!(slot, EquipSlot::Weapon | EquipSlot::Bow) {
        if obj.to_h > 0 {
            obj.to_h -= 1 + extra(obj.to_h, rng);
        }
        if obj.to_d > 0 {
            obj.to_d -= 1 + extra(obj.to_d, rng);
        }
    } else if obj.to_a > 0 {
        obj.to_a -= 1 + extra(obj.to_a, rng);
    }

    player.msg(format!("Your {name} ({slot}) {verb} disenchanted!"));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Grid;
    use crate::object::{Object, ObjectKind};
    use crate::player::PlayerId;

    fn player() -> Player {
        Player::new(PlayerId(1), "Tester", 1, Grid::new(5, 5)).with_hp(100)
    }

    #[test]
    fn test_take_hit_kills_below_zero() {
        let mut p = player();
        take_hit(&mut p, 100, "a kobold");
        assert!(!p.death);
        assert_eq!(p.chp, 0);
        take_hit(&mut p, 1, "a kobold");
        assert!(p.death);
        assert_eq!(p.died_from, "a kobold");

        // Dead players take no further damage
        take_hit(&mut p, 50, "a jackal");
        assert_eq!(p.chp, -1);
        assert_eq!(p.died_from, "a kobold");
    }

    #[test]
    fn test_invulnerability() {
        let mut p = player();
        p.timed.set(TimedEffect::Invuln, 10);
        take_hit(&mut p, 500, "a dragon");
        assert_eq!(p.chp, 100);
        assert!(p.disturbed);
        take_hit(&mut p, INVULN_THRESHOLD, "a god");
        assert!(p.death);
    }

    #[test]
    fn test_hp_player_clamps() {
        let mut p = player();
        p.chp = 90;
        assert!(hp_player(&mut p, 50));
        assert_eq!(p.chp, 100);
        assert!(!hp_player(&mut p, 50));
    }

    #[test]
    fn test_fire_immunity_ignores_damage() {
        let mut rng = GameRng::new(42);
        let mut p = player().with_flags(PlayerFlags::IM_FIRE);
        fire_dam(&mut p, 80, "a fire bolt", &mut rng);
        assert_eq!(p.chp, 100);
        assert!(!p.disturbed);
    }

    #[test]
    fn test_double_resistance() {
        let mut rng = GameRng::new(42);
        let mut p = player().with_flags(PlayerFlags::RES_COLD);
        p.timed.set(TimedEffect::OpposeCold, 20);
        cold_dam(&mut p, 27, "a frost bolt", &mut rng);
        // 27 -> 9 -> 3
        assert_eq!(p.chp, 97);
    }

    #[test]
    fn test_double_resistance_still_risks_inventory() {
        let mut rng = GameRng::new(42);
        let mut p = player().with_flags(PlayerFlags::RES_FIRE);
        p.timed.set(TimedEffect::OpposeFire, 20);
        p.inventory.push(Object::new(ObjectKind::Scroll, "Scroll of Light").with_number(500));
        fire_dam(&mut p, 90, "a fire bolt", &mut rng);
        // 90 -> 30 -> 10, then 3% per scroll
        assert_eq!(p.chp, 90);
        assert!(p.inventory.first().map_or(0, |o| o.number) < 500);
        assert!(p.messages().any(|m| m.starts_with("Some of your Scrolls of Light")));
    }

    #[test]
    fn test_inven_damage_respects_ignore_and_artifacts() {
        let mut rng = GameRng::new(42);
        let mut p = player();
        p.inventory.push(Object::new(ObjectKind::Scroll, "Scroll of Light").with_number(5));
        p.inventory.push(
            Object::new(ObjectKind::Cloak, "Cloak").with_flags(ObjectFlags::IGNORE_FIRE),
        );
        p.inventory.push(
            Object::new(ObjectKind::MagicBook, "Necronomicon").with_flags(ObjectFlags::ARTIFACT),
        );
        let destroyed = inven_damage(&mut p, Element::Fire, 100, &mut rng);
        assert_eq!(destroyed, 5);
        assert_eq!(p.inventory.len(), 2);
        assert!(p.messages().any(|m| m.contains("All of your Scrolls of Light")));
    }

    #[test]
    fn test_acid_halved_by_armour() {
        let mut rng = GameRng::new(3);
        let mut p = player();
        for slot in EquipSlot::ARMOUR {
            let mut armour = Object::new(ObjectKind::SoftArmor, "Soft Leather Armour");
            armour.ac = 8;
            p.equipment.wear(slot, armour);
        }
        acid_dam(&mut p, 20, "an acid bolt", &mut rng);
        assert_eq!(p.chp, 90);
        assert!(p.messages().any(|m| m.contains("is damaged")));
    }

    #[test]
    fn test_disenchant_weapon() {
        let mut rng = GameRng::new(11);
        let mut p = player();
        for slot in EquipSlot::DISENCHANTABLE {
            p.equipment
                .wear(slot, Object::new(ObjectKind::Sword, "Dagger").with_bonuses(3, 3, 3));
        }
        assert!(apply_disenchant(&mut p, &mut rng));
        let total: i32 = EquipSlot::DISENCHANTABLE
            .iter()
            .filter_map(|s| p.equipment.get(*s))
            .map(|o| o.to_h + o.to_d + o.to_a)
            .sum();
        assert!(total < 8 * 9);
    }
}
