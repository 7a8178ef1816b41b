//! Projection effects on monsters

use super::{GfType, Source, Tally, Witnesses};
use crate::World;
use crate::consts::{
    MON_SLEEP_TURNS, MON_SPEED_MAX, MON_SPEED_MIN, MON_TIMER_CAP, RIFT_RESIST_TELEPORT,
};
use crate::dungeon::{Depth, Grid};
use crate::monster::{BreathFlags, MonsterId, MonsterRace, RaceFlags};
use crate::world::{
    capitalize, mon_take_hit, monster_death, multiply_monster, poly_r_idx, replace_monster,
    teleport_away,
};

/// Everything a damage type decides before it is applied
#[derive(Debug)]
struct Hit {
    dam: i32,
    note: Option<&'static str>,
    note_dies: &'static str,
    poly: bool,
    dist: i32,
    conf: i32,
    stun: i32,
    fear: i32,
    sleep: i32,
    obvious: bool,
    skipped: bool,
    learn: RaceFlags,
}

impl Hit {
    fn new(dam: i32, race: &MonsterRace, obvious: bool) -> Self {
        Self {
            dam,
            note: None,
            note_dies: if race.is_nonliving() { " is destroyed." } else { " dies." },
            poly: false,
            dist: 0,
            conf: 0,
            stun: 0,
            fear: 0,
            sleep: 0,
            obvious,
            skipped: false,
            learn: RaceFlags::empty(),
        }
    }

    /// Immunity to a basic element
    fn immune(&mut self, race: &MonsterRace, flag: RaceFlags) {
        if race.flags.contains(flag) {
            self.note = Some(" resists a lot.");
            self.dam /= 9;
            self.learn |= flag;
        }
    }

    /// Breath-based resistance: damage times `num` over 7..12
    fn resist(&mut self, world: &mut World, num: i32) {
        self.note = Some(" resists.");
        self.dam *= num;
        self.dam /= world.rng.randint1(6) + 6;
    }

    fn unaffected(&mut self) {
        self.note = Some(" is unaffected!");
        self.obvious = false;
    }

    /// Only hurts monsters matching `flag`
    fn only(&mut self, race: &MonsterRace, flag: RaceFlags) -> bool {
        if race.flags.contains(flag) {
            self.learn |= flag;
            true
        } else {
            self.skipped = true;
            self.obvious = false;
            false
        }
    }
}

/// Saving throw against a status effect of strength `dam`
fn saves(world: &mut World, race: &MonsterRace, dam: i32) -> bool {
    race.level > world.rng.randint1((dam - 10).max(1)) + 10
}

/// Apply a projection to the monster standing on one cell
///
/// The source never hurts itself. Damage is divided by the ring distance
/// plus one. Returns whether the effect was obvious to the acting player.
#[allow(clippy::too_many_arguments)]
pub fn affect_monster(
    world: &mut World,
    source: Source,
    r: i32,
    depth: Depth,
    grid: Grid,
    dam: i32,
    typ: GfType,
    tally: &mut Tally,
) -> bool {
    let Some(id) = world.level(depth).and_then(|l| l.occupant(grid).monster()) else {
        return false;
    };
    if source == Source::Monster(id) {
        return false;
    }
    let Some(race_id) = world.monsters.get(id).map(|m| m.race) else {
        return false;
    };
    let Some(race) = world.race(race_id).cloned() else {
        return false;
    };

    let div = r + 1;
    let seen = Witnesses::of(world, source, depth, grid);
    let name = capitalize(&world.monster_name(id));
    tally.hit(grid);

    let mut hit = Hit::new(dam / div, &race, seen.obvious);
    let rf = race.flags;
    let bf = race.breaths;

    match typ {
        GfType::Missile | GfType::Arrow | GfType::Mana | GfType::Meteor => {}

        GfType::Acid => hit.immune(&race, RaceFlags::IM_ACID),
        GfType::Elec => hit.immune(&race, RaceFlags::IM_ELEC),
        GfType::Fire => hit.immune(&race, RaceFlags::IM_FIRE),
        GfType::Cold => hit.immune(&race, RaceFlags::IM_COLD),
        GfType::Pois => hit.immune(&race, RaceFlags::IM_POIS),

        GfType::HolyOrb => {
            if rf.contains(RaceFlags::EVIL) {
                hit.dam *= 2;
                hit.note = Some(" is hit hard.");
                hit.learn |= RaceFlags::EVIL;
            }
        }

        GfType::Plasma => {
            if rf.contains(RaceFlags::RES_PLAS) || bf.contains(BreathFlags::PLAS) {
                hit.resist(world, 3);
                hit.learn |= rf & RaceFlags::RES_PLAS;
            }
        }

        GfType::Nether => {
            if rf.contains(RaceFlags::UNDEAD) {
                hit.note = Some(" is immune.");
                hit.dam = 0;
                hit.learn |= RaceFlags::UNDEAD;
            } else if rf.contains(RaceFlags::RES_NETH) || bf.contains(BreathFlags::NETH) {
                hit.resist(world, 3);
                hit.learn |= rf & RaceFlags::RES_NETH;
            } else if rf.contains(RaceFlags::EVIL) {
                hit.dam /= 2;
                hit.note = Some(" resists somewhat.");
                hit.learn |= RaceFlags::EVIL;
            }
        }

        GfType::Water => {
            if rf.contains(RaceFlags::IM_WATER) {
                hit.note = Some(" is immune.");
                hit.dam = 0;
                hit.learn |= RaceFlags::IM_WATER;
            }
        }

        GfType::Chaos => {
            hit.poly = true;
            hit.conf = (5 + world.rng.randint1(11)) / div;
            if bf.contains(BreathFlags::CHAO) {
                hit.resist(world, 3);
                hit.poly = false;
            }
        }

        GfType::Shards => {
            if bf.contains(BreathFlags::SHAR) {
                hit.resist(world, 3);
            }
        }

        GfType::Sound => {
            hit.stun = (10 + world.rng.randint1(15)) / div;
            if bf.contains(BreathFlags::SOUN) {
                hit.resist(world, 2);
            }
        }

        GfType::Confusion => {
            hit.conf = (10 + world.rng.randint1(15)) / div;
            if bf.contains(BreathFlags::CONF) {
                hit.resist(world, 2);
            } else if rf.contains(RaceFlags::NO_CONF) {
                hit.note = Some(" resists somewhat.");
                hit.dam /= 2;
                hit.learn |= RaceFlags::NO_CONF;
            }
        }

        GfType::Disenchant => {
            if rf.contains(RaceFlags::RES_DISE) || bf.contains(BreathFlags::DISE) {
                hit.resist(world, 3);
                hit.learn |= rf & RaceFlags::RES_DISE;
            }
        }

        GfType::Nexus => {
            if rf.contains(RaceFlags::RES_NEXU) || bf.contains(BreathFlags::NEXU) {
                hit.resist(world, 3);
                hit.learn |= rf & RaceFlags::RES_NEXU;
            }
        }

        GfType::Force => {
            hit.stun = world.rng.randint1(15) / div;
            if bf.contains(BreathFlags::WALL) {
                hit.resist(world, 3);
            }
        }

        GfType::Inertia => {
            if bf.contains(BreathFlags::INER) {
                hit.resist(world, 3);
            }
        }

        GfType::Time => {
            if bf.contains(BreathFlags::TIME) {
                hit.resist(world, 3);
            }
        }

        GfType::Gravity => {
            if world.rng.randint1(RIFT_RESIST_TELEPORT) > race.level {
                hit.dist = 10;
            }
            if bf.contains(BreathFlags::GRAV) {
                hit.resist(world, 3);
                hit.dist = 0;
            }
        }

        GfType::Ice => {
            hit.stun = world.rng.randint1(15) / div;
            hit.immune(&race, RaceFlags::IM_COLD);
        }

        GfType::OldDrain => {
            if race.is_nonliving() {
                hit.learn |= rf & (RaceFlags::UNDEAD | RaceFlags::DEMON);
                hit.unaffected();
                hit.dam = 0;
            }
        }

        GfType::OldPoly => {
            hit.poly = true;
            if race.is_unique() || saves(world, &race, hit.dam) {
                hit.unaffected();
                hit.poly = false;
            }
            hit.dam = 0;
        }

        GfType::OldClone => {
            if let Some(m) = world.monsters.get_mut(id) {
                m.hp = m.maxhp;
                if m.speed < MON_SPEED_MAX {
                    m.speed += 10;
                }
            }
            let gate = world.config.clone_level_gate;
            let allowed = match source {
                Source::Player(pid) => world.players.get(pid).is_some_and(|p| p.lev < gate),
                _ => true,
            };
            if depth != 0 && allowed && multiply_monster(world, id) {
                hit.note = Some(" spawns!");
            }
            hit.dam = 0;
        }

        GfType::OldHeal => {
            if let Some(m) = world.monsters.get_mut(id) {
                m.asleep = 0;
                m.hp = (m.hp + hit.dam).min(m.maxhp);
            }
            hit.note = Some(" looks healthier.");
            hit.dam = 0;
        }

        GfType::OldSpeed => {
            if let Some(m) = world.monsters.get_mut(id)
                && m.speed < MON_SPEED_MAX
            {
                m.speed += 10;
            }
            hit.note = Some(" starts moving faster.");
            hit.dam = 0;
        }

        GfType::OldSlow => {
            if race.is_unique() || saves(world, &race, hit.dam) {
                hit.unaffected();
            } else if let Some(m) = world.monsters.get_mut(id)
                && m.speed > MON_SPEED_MIN
            {
                m.speed -= 10;
                hit.note = Some(" starts moving slower.");
            }
            hit.dam = 0;
        }

        GfType::OldSleep => {
            if race.is_unique() || rf.contains(RaceFlags::NO_SLEEP) || saves(world, &race, hit.dam) {
                hit.learn |= rf & RaceFlags::NO_SLEEP;
                hit.unaffected();
            } else {
                hit.note = Some(" falls asleep!");
                hit.sleep = MON_SLEEP_TURNS;
            }
            hit.dam = 0;
        }

        GfType::OldConf => {
            hit.conf = world.rng.damroll(3, hit.dam / 2) + 1;
            if race.is_unique() || rf.contains(RaceFlags::NO_CONF) || saves(world, &race, hit.dam) {
                hit.learn |= rf & RaceFlags::NO_CONF;
                hit.unaffected();
                hit.conf = 0;
            }
            hit.dam = 0;
        }

        GfType::LiteWeak => {
            if rf.contains(RaceFlags::HURT_LITE) {
                hit.learn |= RaceFlags::HURT_LITE;
                hit.note = Some(" cringes from the light!");
                hit.note_dies = " shrivels away in the light!";
            } else {
                hit.obvious = false;
                hit.dam = 0;
            }
        }

        GfType::Lite => {
            if bf.contains(BreathFlags::LITE) {
                hit.resist(world, 2);
            } else if rf.contains(RaceFlags::HURT_LITE) {
                hit.learn |= RaceFlags::HURT_LITE;
                hit.note = Some(" cringes from the light!");
                hit.note_dies = " shrivels away in the light!";
                hit.dam *= 2;
            }
        }

        GfType::Dark => {
            if bf.contains(BreathFlags::DARK) {
                hit.resist(world, 2);
            }
        }

        GfType::KillWall => {
            if rf.contains(RaceFlags::HURT_ROCK) {
                hit.learn |= RaceFlags::HURT_ROCK;
                hit.note = Some(" loses some skin!");
                hit.note_dies = " dissolves!";
            } else {
                hit.obvious = false;
                hit.dam = 0;
            }
        }

        GfType::AwayUndead | GfType::AwayEvil | GfType::AwayAll => {
            let affected = match typ {
                GfType::AwayUndead => hit.only(&race, RaceFlags::UNDEAD),
                GfType::AwayEvil => hit.only(&race, RaceFlags::EVIL),
                _ => true,
            };
            if affected {
                hit.dist = hit.dam;
            }
            hit.dam = 0;
        }

        GfType::TurnUndead | GfType::TurnEvil | GfType::TurnAll => {
            let affected = match typ {
                GfType::TurnUndead => hit.only(&race, RaceFlags::UNDEAD),
                GfType::TurnEvil => hit.only(&race, RaceFlags::EVIL),
                _ => true,
            };
            if affected {
                hit.fear = world.rng.damroll(3, hit.dam / 2) + 1;
                let immune = typ == GfType::TurnAll
                    && (race.is_unique() || rf.contains(RaceFlags::NO_FEAR));
                if immune || saves(world, &race, hit.dam) {
                    hit.learn |= rf & RaceFlags::NO_FEAR;
                    hit.unaffected();
                    hit.fear = 0;
                }
            }
            hit.dam = 0;
        }

        GfType::DispUndead | GfType::DispEvil | GfType::DispAll => {
            let affected = match typ {
                GfType::DispUndead => hit.only(&race, RaceFlags::UNDEAD),
                GfType::DispEvil => hit.only(&race, RaceFlags::EVIL),
                _ => true,
            };
            if affected {
                hit.note = Some(" shudders.");
                hit.note_dies = " dissolves!";
            } else {
                hit.dam = 0;
            }
        }

        GfType::DarkWeak
        | GfType::KillDoor
        | GfType::KillTrap
        | GfType::MakeDoor
        | GfType::MakeTrap
        | GfType::HealPlayer
        | GfType::ProjectSpell
        | GfType::ProjectPrayer => {
            hit.skipped = true;
            hit.dam = 0;
        }
    }

    if hit.skipped {
        return false;
    }

    if race.is_unique() {
        hit.poly = false;
    }

    let Some(hp) = world.monsters.get(id).map(|m| m.hp) else {
        return hit.obvious;
    };

    // Only players may slay uniques
    if race.is_unique() && source.player().is_none() && hit.dam >= hp {
        hit.dam = (hp - 1).max(0);
    }

    let mut target = id;
    if hit.dam > hp {
        hit.note = Some(hit.note_dies);
    } else if hit.poly && world.rng.randint1(90) > race.level {
        let new_race = poly_r_idx(world, race_id);
        if new_race != race_id {
            hit.obvious |= seen.obvious;
            hit.note = Some(" changes!");
            hit.dam = 0;
            match replace_monster(world, id, new_race) {
                Some(new_id) => target = new_id,
                None => return hit.obvious,
            }
        } else {
            hit.note = Some(" is unaffected!");
        }
    } else if hit.dist > 0 {
        hit.obvious |= seen.obvious;
        hit.note = Some(" disappears!");
        teleport_away(world, id, hit.dist);
    } else if hit.stun > 0 && !bf.intersects(BreathFlags::SOUN | BreathFlags::WALL) {
        hit.obvious |= seen.obvious;
        if let Some(m) = world.monsters.get_mut(id) {
            let total = if m.stunned > 0 {
                hit.note = Some(" is more dazed.");
                m.stunned + hit.stun / 2
            } else {
                hit.note = Some(" is dazed.");
                hit.stun
            };
            m.stunned = total.min(MON_TIMER_CAP);
        }
    } else if hit.conf > 0
        && !rf.contains(RaceFlags::NO_CONF)
        && !bf.intersects(BreathFlags::CONF | BreathFlags::CHAO)
    {
        hit.obvious |= seen.obvious;
        if let Some(m) = world.monsters.get_mut(id) {
            let total = if m.confused > 0 {
                hit.note = Some(" looks more confused.");
                m.confused + hit.conf / 2
            } else {
                hit.note = Some(" looks confused.");
                hit.conf
            };
            m.confused = total.min(MON_TIMER_CAP);
        }
    }

    let killed = match source {
        Source::Player(pid) => mon_take_hit(world, pid, target, hit.dam, hit.note_dies),
        _ => hurt_by_monster(world, target, hit.dam),
    };

    if killed {
        if source.player().is_none() {
            seen.tell(world, &format!("{name}{}", hit.note_dies));
        }
    } else {
        if let Some(note) = hit.note
            && !seen.players.is_empty()
        {
            seen.tell(world, &format!("{name}{note}"));
        }
        if let Some(m) = world.monsters.get_mut(target) {
            if hit.fear > 0 {
                m.afraid = (m.afraid + hit.fear).min(MON_TIMER_CAP);
            }
            if hit.sleep > 0 {
                m.asleep = hit.sleep;
            }
        }
        if hit.fear > 0 && !seen.players.is_empty() {
            seen.tell(world, &format!("{name} flees in terror!"));
        }
    }

    if !hit.learn.is_empty() {
        for &pid in &seen.players {
            if let Some(p) = world.players.get_mut(pid) {
                p.learn(race_id, hit.learn);
            }
        }
    }

    tracing::trace!(monster = %id, gf = %typ, dam = hit.dam, killed, "monster hit");
    hit.obvious
}

/// Damage dealt by a monster or the environment; returns whether it died
fn hurt_by_monster(world: &mut World, id: MonsterId, dam: i32) -> bool {
    let Some(m) = world.monsters.get_mut(id) else {
        return false;
    };
    if dam > 0 {
        m.asleep = 0;
    }
    m.hp -= dam;
    if m.hp >= 0 {
        return false;
    }
    monster_death(world, None, id);
    world.delete_monster(id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Level;
    use crate::player::{Player, PlayerId};

    const ME: Source = Source::Player(PlayerId(1));

    fn world() -> World {
        let mut world = World::seeded(21);
        world.add_level(Level::new_open(1, 15, 15));
        world
            .place_player(Player::new(PlayerId(1), "Tester", 1, Grid::new(7, 3)))
            .unwrap();
        world
    }

    fn spawn(world: &mut World, race: &str, grid: Grid, hp: i32) -> MonsterId {
        let race = world.races.find_by_name(race).unwrap();
        let id = world.place_monster(race, 1, grid).unwrap();
        let m = world.monsters.get_mut(id).unwrap();
        m.hp = hp;
        m.maxhp = hp.max(m.maxhp);
        id
    }

    fn hit(world: &mut World, source: Source, r: i32, grid: Grid, dam: i32, typ: GfType) -> bool {
        let mut tally = Tally::default();
        affect_monster(world, source, r, 1, grid, dam, typ, &mut tally)
    }

    #[test]
    fn test_damage_falls_off_with_ring() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "cave bear", g, 100);
        hit(&mut world, Source::Env, 2, g, 30, GfType::Missile);
        assert_eq!(world.monsters.get(id).unwrap().hp, 90);
    }

    #[test]
    fn test_source_is_spared() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "cave bear", g, 100);
        assert!(!hit(&mut world, Source::Monster(id), 0, g, 30, GfType::Fire));
        assert_eq!(world.monsters.get(id).unwrap().hp, 100);
    }

    #[test]
    fn test_undead_immune_to_nether() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "poltergeist", g, 30);
        hit(&mut world, ME, 0, g, 50, GfType::Nether);
        assert_eq!(world.monsters.get(id).unwrap().hp, 30);
        let p = world.players.get(PlayerId(1)).unwrap();
        assert!(p.messages().any(|m| m == "The poltergeist is immune."));
    }

    #[test]
    fn test_holy_orb_doubles_against_evil() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "kobold", g, 100);
        hit(&mut world, Source::Env, 0, g, 10, GfType::HolyOrb);
        assert_eq!(world.monsters.get(id).unwrap().hp, 80);
    }

    #[test]
    fn test_monsters_cannot_slay_uniques() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "Grip, Farmer Maggot's Dog", g, 5);
        hit(&mut world, Source::Env, 0, g, 500, GfType::Fire);
        assert_eq!(world.monsters.get(id).unwrap().hp, 1);
    }

    #[test]
    fn test_players_can_slay_uniques() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "Grip, Farmer Maggot's Dog", g, 5);
        hit(&mut world, ME, 0, g, 500, GfType::Fire);
        assert!(!world.monsters.contains(id));
    }

    #[test]
    fn test_sleep_and_wake() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "jackal", g, 8);
        world.monsters.get_mut(id).unwrap().asleep = 0;
        hit(&mut world, ME, 0, g, 100, GfType::OldSleep);
        assert_eq!(world.monsters.get(id).unwrap().asleep, MON_SLEEP_TURNS);
    }

    #[test]
    fn test_stun_accumulates() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "cave bear", g, 500);
        hit(&mut world, Source::Env, 0, g, 1, GfType::Sound);
        let first = world.monsters.get(id).unwrap().stunned;
        assert!((11..=25).contains(&first));
        hit(&mut world, Source::Env, 0, g, 1, GfType::Sound);
        let second = world.monsters.get(id).unwrap().stunned;
        assert!(second > first);
        assert!(second <= MON_TIMER_CAP);
    }

    #[test]
    fn test_teleport_away_moves_monster() {
        let mut world = World::seeded(4);
        world.add_level(Level::new_open(1, 40, 60));
        let g = Grid::new(20, 30);
        let id = spawn(&mut world, "kobold", g, 10);
        hit(&mut world, Source::Env, 0, g, 20, GfType::AwayAll);
        assert_ne!(world.monsters.get(id).unwrap().grid, g);
    }

    #[test]
    fn test_evil_only_effects_skip_others() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "jackal", g, 8);
        assert!(!hit(&mut world, ME, 0, g, 50, GfType::DispEvil));
        assert_eq!(world.monsters.get(id).unwrap().hp, 8);
    }

    #[test]
    fn test_rock_remover_hurts_xorn() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "xorn", g, 100);
        hit(&mut world, Source::Env, 0, g, 40, GfType::KillWall);
        assert_eq!(world.monsters.get(id).unwrap().hp, 60);
    }

    #[test]
    fn test_unaffected_races_are_not_obvious() {
        let mut world = world();
        let g = Grid::new(7, 4);
        let id = spawn(&mut world, "jackal", g, 8);
        assert!(!hit(&mut world, ME, 0, g, 40, GfType::KillWall));
        assert!(!hit(&mut world, ME, 0, g, 40, GfType::LiteWeak));
        assert_eq!(world.monsters.get(id).unwrap().hp, 8);

        let xorn = Grid::new(6, 3);
        spawn(&mut world, "xorn", xorn, 100);
        assert!(hit(&mut world, ME, 0, xorn, 40, GfType::KillWall));
    }
}
