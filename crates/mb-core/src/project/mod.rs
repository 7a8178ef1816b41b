//! Area-effect projection
//!
//! A projection is traced from its source, expanded into rings of cells
//! around the point where it stops, and then resolved in four passes:
//! terrain, floor objects, monsters, and players. Damage falls off with
//! ring distance. Each pass reports whether anything noticeable happened.

mod flags;
mod gf;
mod items;
mod monster;
mod path;
mod player;
mod source;
mod terrain;
mod visual;

pub use flags::ProjectFlags;
pub use gf::{GfType, color};
pub use items::affect_item;
pub use monster::affect_monster;
pub use path::{PathLimits, Projection, trace};
pub use player::{affect_player, apply_morph, apply_nexus};
pub use source::Source;
pub use terrain::affect_terrain;
pub use visual::bolt_pict;

use serde::{Deserialize, Serialize};

use crate::World;
use crate::dungeon::{Depth, Grid, Occupant};
use crate::player::{PlayerId, TrackTarget};

/// A complete description of one area effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRequest {
    pub source: Source,
    pub radius: i32,
    pub depth: Depth,
    pub target: Grid,
    /// Damage, or a spell index for relay types
    pub damage: i32,
    pub gf: GfType,
    pub flags: ProjectFlags,
}

/// What a projection did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectOutcome {
    /// Some effect was visible to the acting player
    pub notice: bool,
    pub projection: Projection,
    pub monsters_hit: usize,
    pub players_hit: usize,
}

/// Actors touched during one pass
#[derive(Debug, Default)]
pub struct Tally {
    count: usize,
    last: Option<Grid>,
}

impl Tally {
    pub fn hit(&mut self, grid: Grid) {
        self.count += 1;
        self.last = Some(grid);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Cell of the most recent actor
    pub fn last(&self) -> Option<Grid> {
        self.last
    }
}

/// Players who see a cell, and whether the effect there is obvious
///
/// An effect is obvious when the acting player sees it, or, for monster
/// and environmental sources, when anyone does.
pub(crate) struct Witnesses {
    pub players: Vec<PlayerId>,
    pub obvious: bool,
}

impl Witnesses {
    pub(crate) fn of(world: &World, source: Source, depth: Depth, grid: Grid) -> Self {
        let players: Vec<PlayerId> = world
            .players_at(depth)
            .into_iter()
            .filter(|&pid| world.player_can_see(pid, depth, grid))
            .collect();
        let obvious = match source {
            Source::Player(pid) => players.contains(&pid),
            _ => !players.is_empty(),
        };
        Self { players, obvious }
    }

    pub(crate) fn tell(&self, world: &mut World, text: &str) {
        for &pid in &self.players {
            if let Some(p) = world.players.get_mut(pid) {
                p.msg(text);
            }
        }
    }
}

impl EffectRequest {
    pub fn new(source: Source, depth: Depth, target: Grid, gf: GfType, damage: i32) -> Self {
        Self {
            source,
            radius: 0,
            depth,
            target,
            damage,
            gf,
            flags: ProjectFlags::empty(),
        }
    }

    pub fn radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    pub fn flags(mut self, flags: ProjectFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Resolve the effect against the world
    pub fn fire(&self, world: &mut World) -> ProjectOutcome {
        let req = *self;
        let mut outcome = ProjectOutcome::default();

        let Some(level) = world.level(req.depth) else {
            tracing::warn!(depth = req.depth, "projection on a missing level");
            return outcome;
        };
        let start = match req.source {
            Source::Env => req.target,
            src => match src.position(world) {
                Some(g) => g,
                None => {
                    tracing::warn!(source = ?src, "projection from a missing actor");
                    return outcome;
                }
            },
        };

        let limits = PathLimits {
            max_range: world.config.max_range,
            max_grids: world.config.max_grids,
            max_radius: world.config.max_radius,
        };
        let stops_at = |g: Grid| match level.occupant(g) {
            Occupant::Empty => false,
            Occupant::Monster(_) => true,
            Occupant::Player(pid) => match req.source {
                Source::Player(src) if !req.gf.is_beneficial() => !world.same_party(src, pid),
                _ => true,
            },
        };
        let proj = trace(level, start, req.target, req.radius, req.flags, limits, stops_at);

        tracing::debug!(
            source = ?req.source,
            gf = %req.gf,
            dam = req.damage,
            rad = req.radius,
            epicenter = %proj.epicenter,
            cells = proj.grids.len(),
            "projection traced"
        );

        if !req.flags.contains(ProjectFlags::HIDE) {
            visual::draw(world, req.depth, &proj, req.gf, req.flags);
        }

        if proj.grids.is_empty() {
            outcome.projection = proj;
            return outcome;
        }

        if req.flags.contains(ProjectFlags::GRID) {
            for (d, g) in proj.cells() {
                if affect_terrain(world, req.source, d, req.depth, g, req.damage, req.gf) {
                    outcome.notice = true;
                }
            }
        }

        if req.flags.contains(ProjectFlags::ITEM) {
            for (d, g) in proj.cells() {
                if affect_item(world, req.source, d, req.depth, g, req.damage, req.gf) {
                    outcome.notice = true;
                }
            }
        }

        if req.flags.contains(ProjectFlags::KILL) {
            let mut tally = Tally::default();
            for (d, g) in proj.cells() {
                if !world.level(req.depth).is_some_and(|l| l.is_floor(g)) {
                    continue;
                }
                if affect_monster(world, req.source, d, req.depth, g, req.damage, req.gf, &mut tally) {
                    outcome.notice = true;
                }
            }
            outcome.monsters_hit = tally.count;
            self.track_single(world, &tally, |occ| occ.monster().map(TrackTarget::Monster));

            for pid in world.players_at(req.depth) {
                if let Some(p) = world.players.get_mut(pid) {
                    p.project_hurt = false;
                }
            }

            let mut tally = Tally::default();
            for (d, g) in proj.cells() {
                let Some(pid) = world.level(req.depth).and_then(|l| l.occupant(g).player()) else {
                    continue;
                };
                if affect_player(world, pid, req.source, d, req.depth, g, req.damage, req.gf, &mut tally) {
                    outcome.notice = true;
                }
            }
            outcome.players_hit = tally.count;
            self.track_single(world, &tally, |occ| occ.player().map(TrackTarget::Player));
        }

        outcome.projection = proj;
        outcome
    }

    /// Point the caster's health bar at the only actor a non-jump
    /// projection touched
    fn track_single(&self, world: &mut World, tally: &Tally, pick: impl Fn(Occupant) -> Option<TrackTarget>) {
        let Source::Player(caster) = self.source else {
            return;
        };
        if self.flags.contains(ProjectFlags::JUMP) || tally.count != 1 {
            return;
        }
        let Some(grid) = tally.last else {
            return;
        };
        if !world.player_can_see(caster, self.depth, grid) {
            return;
        }
        let Some(target) = world.level(self.depth).and_then(|l| pick(l.occupant(grid))) else {
            return;
        };
        if let Some(p) = world.players.get_mut(caster) {
            p.health_track = Some(target);
        }
    }
}

/// Launch a projection; returns whether anything noticeable happened
#[allow(clippy::too_many_arguments)]
pub fn project(
    world: &mut World,
    source: Source,
    rad: i32,
    depth: Depth,
    target: Grid,
    dam: i32,
    typ: GfType,
    flags: ProjectFlags,
) -> bool {
    EffectRequest {
        source,
        radius: rad,
        depth,
        target,
        damage: dam,
        gf: typ,
        flags,
    }
    .fire(world)
    .notice
}
