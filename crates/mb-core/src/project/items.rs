//! Projection effects on objects lying on the floor

use super::{GfType, Source, Witnesses};
use crate::World;
use crate::dungeon::{Depth, Grid};
use crate::object::{Element, Object, ObjectFlags, ObjectKind};
use crate::world::capitalize;

/// How an object reacts to a projection
#[derive(Debug, Default)]
struct Harm {
    kill: bool,
    ignore: bool,
    verb: (&'static str, &'static str),
}

impl Harm {
    /// Later elements override earlier ones, as with plasma and meteors
    fn element(&mut self, obj: &Object, element: Element) {
        if element.harms(obj.kind) {
            self.kill = true;
            self.verb = element.destroy_verb();
            self.ignore = obj.flags.contains(element.ignore_flag());
        }
    }
}

/// Apply a projection to the object on one cell
///
/// Returns whether the effect was obvious to the acting player.
pub fn affect_item(
    world: &mut World,
    source: Source,
    _r: i32,
    depth: Depth,
    grid: Grid,
    _dam: i32,
    typ: GfType,
) -> bool {
    let Some(obj) = world
        .level(depth)
        .and_then(|l| l.cell(grid))
        .and_then(|c| c.object.clone())
    else {
        return false;
    };
    let seen = Witnesses::of(world, source, depth, grid);
    let mut obvious = false;
    let mut harm = Harm::default();

    match typ {
        GfType::Acid => harm.element(&obj, Element::Acid),
        GfType::Elec => harm.element(&obj, Element::Elec),
        GfType::Fire => harm.element(&obj, Element::Fire),
        GfType::Cold => harm.element(&obj, Element::Cold),
        GfType::Plasma => {
            harm.element(&obj, Element::Fire);
            harm.element(&obj, Element::Elec);
        }
        GfType::Meteor => {
            harm.element(&obj, Element::Fire);
            harm.element(&obj, Element::Cold);
        }
        GfType::Ice | GfType::Shards | GfType::Force | GfType::Sound => {
            if obj.kind.hates_cold() {
                harm.kill = true;
                harm.verb = ("shatters", "shatter");
            }
        }
        GfType::Mana => {
            harm.kill = true;
            harm.verb = ("is destroyed", "are destroyed");
        }
        GfType::HolyOrb => {
            if obj.is_cursed() {
                harm.kill = true;
                harm.verb = ("is destroyed", "are destroyed");
            }
        }
        GfType::KillTrap | GfType::KillDoor => {
            if obj.kind == ObjectKind::Chest && obj.pval > 0 {
                if let Some(chest) = world
                    .level_mut(depth)
                    .and_then(|l| l.cell_mut(grid))
                    .and_then(|c| c.object.as_mut())
                {
                    chest.pval = -chest.pval;
                    chest.flags.insert(ObjectFlags::KNOWN);
                }
                if seen.obvious {
                    seen.tell(world, "Click!");
                    obvious = true;
                }
            }
        }
        _ => {}
    }

    if !harm.kill {
        return obvious;
    }

    let name = obj.describe();
    let subject = if obj.is_artifact() || obj.number > 1 {
        capitalize(&name)
    } else {
        format!("The {name}")
    };
    if obj.is_artifact() || harm.ignore {
        if seen.obvious {
            seen.tell(world, &format!("{} {} unaffected!", subject, obj.verb("is", "are")));
            obvious = true;
        }
        return obvious;
    }

    let (singular, plural) = harm.verb;
    if seen.obvious {
        seen.tell(world, &format!("{} {}!", subject, obj.verb(singular, plural)));
        obvious = true;
    }
    world.delete_object(depth, grid);
    tracing::trace!(%grid, object = %name, gf = %typ, "floor object destroyed");
    obvious
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Level;
    use crate::player::{Player, PlayerId};

    const ME: Source = Source::Player(PlayerId(1));

    fn world_with(obj: Object) -> (World, Grid) {
        let mut world = World::seeded(5);
        world.add_level(Level::new_open(1, 10, 10));
        world
            .place_player(Player::new(PlayerId(1), "Tester", 1, Grid::new(4, 3)))
            .unwrap();
        let g = Grid::new(4, 4);
        world.drop_object(1, g, obj).unwrap();
        (world, g)
    }

    #[test]
    fn test_fire_burns_scrolls() {
        let (mut world, g) = world_with(Object::new(ObjectKind::Scroll, "Scroll of Light").with_number(3));
        assert!(affect_item(&mut world, ME, 0, 1, g, 30, GfType::Fire));
        assert!(world.level(1).unwrap().cell(g).unwrap().object.is_none());
        let p = world.players.get(PlayerId(1)).unwrap();
        assert!(p.messages().any(|m| m == "3 Scrolls of Light burn up!"));
    }

    #[test]
    fn test_ignore_flag_protects() {
        let obj = Object::new(ObjectKind::Scroll, "Scroll of Light").with_flags(ObjectFlags::IGNORE_FIRE);
        let (mut world, g) = world_with(obj);
        affect_item(&mut world, ME, 0, 1, g, 30, GfType::Fire);
        assert!(world.level(1).unwrap().cell(g).unwrap().object.is_some());
    }

    #[test]
    fn test_artifacts_survive_mana() {
        let obj = Object::new(ObjectKind::Lite, "Phial").with_flags(ObjectFlags::ARTIFACT);
        let (mut world, g) = world_with(obj);
        assert!(affect_item(&mut world, ME, 0, 1, g, 30, GfType::Mana));
        assert!(world.level(1).unwrap().cell(g).unwrap().object.is_some());
        let p = world.players.get(PlayerId(1)).unwrap();
        assert!(p.messages().any(|m| m == "The Phial is unaffected!"));
    }

    #[test]
    fn test_single_item_takes_article() {
        let (mut world, g) = world_with(Object::new(ObjectKind::Potion, "Potion of Cure Light Wounds"));
        assert!(affect_item(&mut world, ME, 0, 1, g, 30, GfType::Cold));
        let p = world.players.get(PlayerId(1)).unwrap();
        assert!(p.messages().any(|m| m == "The Potion of Cure Light Wounds shatters!"));
    }

    #[test]
    fn test_disarm_chest() {
        let obj = Object::new(ObjectKind::Chest, "Small wooden chest").with_pval(5);
        let (mut world, g) = world_with(obj);
        assert!(affect_item(&mut world, ME, 0, 1, g, 0, GfType::KillTrap));
        let chest = world.level(1).unwrap().cell(g).unwrap().object.clone().unwrap();
        assert_eq!(chest.pval, -5);
    }

    #[test]
    fn test_holy_orb_spares_clean_items() {
        let (mut world, g) = world_with(Object::new(ObjectKind::Sword, "Dagger"));
        assert!(!affect_item(&mut world, ME, 0, 1, g, 30, GfType::HolyOrb));
        assert!(world.level(1).unwrap().cell(g).unwrap().object.is_some());
    }
}
