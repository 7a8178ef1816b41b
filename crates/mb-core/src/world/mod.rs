//! The world aggregate: every level, monster, and player
//!
//! All projection code takes `&mut World`; nothing lives in statics.

mod alloc;
mod lifecycle;
mod party;
mod teleport;

pub use alloc::{drop_near, place_gold, place_object, place_trap};
pub(crate) use lifecycle::capitalize;
pub use lifecycle::{mon_take_hit, monster_death, multiply_monster, poly_r_idx, replace_monster};
pub use teleport::{teleport_away, teleport_player, teleport_player_level, teleport_player_to};

use hashbrown::{HashMap, HashSet};

use crate::GameRng;
use crate::config::EngineConfig;
use crate::dungeon::{CellFlags, Depth, Grid, Level, Occupant, distance};
use crate::error::WorldError;
use crate::monster::{Monster, MonsterId, MonsterList, MonsterRace, RaceId, RaceTable};
use crate::object::Object;
use crate::player::{Player, PlayerId, PlayerList};

#[derive(Debug, Clone)]
pub struct World {
    pub config: EngineConfig,
    pub rng: GameRng,
    pub levels: HashMap<Depth, Level>,
    pub monsters: MonsterList,
    pub players: PlayerList,
    pub races: RaceTable,
    /// Ordered (attacker, target) pairs with declared hostility
    hostility: HashSet<(PlayerId, PlayerId)>,
}

impl World {
    pub fn new(config: EngineConfig, rng: GameRng) -> Self {
        Self {
            config: config.sanitized(),
            rng,
            levels: HashMap::new(),
            monsters: MonsterList::new(),
            players: PlayerList::new(),
            races: RaceTable::standard(),
            hostility: HashSet::new(),
        }
    }

    /// Default config and the standard bestiary, seeded
    pub fn seeded(seed: u64) -> Self {
        Self::new(EngineConfig::default(), GameRng::new(seed))
    }

    pub fn add_level(&mut self, level: Level) {
        self.levels.insert(level.depth, level);
    }

    pub fn level(&self, depth: Depth) -> Option<&Level> {
        self.levels.get(&depth)
    }

    pub fn level_mut(&mut self, depth: Depth) -> Option<&mut Level> {
        self.levels.get_mut(&depth)
    }

    fn level_checked(&mut self, depth: Depth, grid: Grid) -> Result<&mut Level, WorldError> {
        let level = self
            .levels
            .get_mut(&depth)
            .ok_or(WorldError::NoSuchLevel(depth))?;
        if !level.in_bounds(grid) {
            return Err(WorldError::OutOfBounds { depth, grid });
        }
        Ok(level)
    }

    // ========== Monsters ==========

    pub fn race(&self, id: RaceId) -> Option<&MonsterRace> {
        self.races.get(id)
    }

    /// Race of a live monster
    pub fn race_of(&self, id: MonsterId) -> Option<&MonsterRace> {
        self.monsters.get(id).and_then(|m| self.races.get(m.race))
    }

    /// "the kobold" or the unique's own name
    pub fn monster_name(&self, id: MonsterId) -> String {
        match self.race_of(id) {
            Some(race) if race.is_unique() => race.name.clone(),
            Some(race) => format!("the {}", race.name),
            None => "something".to_string(),
        }
    }

    /// Spawn a fresh monster of `race` on an empty floor cell
    pub fn place_monster(&mut self, race: RaceId, depth: Depth, grid: Grid) -> Result<MonsterId, WorldError> {
        let template = self.races.get(race).ok_or(WorldError::NoSuchRace(race))?.clone();
        let monster = Monster::new(race, &template, depth, grid, &mut self.rng);
        self.insert_monster(monster)
    }

    /// Put an existing monster record into the world at its own position
    pub fn insert_monster(&mut self, monster: Monster) -> Result<MonsterId, WorldError> {
        let (depth, grid) = (monster.depth, monster.grid);
        let level = self.level_checked(depth, grid)?;
        if !level.is_floor(grid) {
            return Err(WorldError::NotFloor { depth, grid });
        }
        if !level.occupant(grid).is_empty() {
            return Err(WorldError::Occupied { depth, grid });
        }

        let id = self.monsters.insert(monster);
        if let Some(cell) = self.level_mut(depth).and_then(|l| l.cell_mut(grid)) {
            cell.occupant = Occupant::Monster(id);
        }
        Ok(id)
    }

    /// Remove a monster from the list and its cell
    pub fn delete_monster(&mut self, id: MonsterId) -> Option<Monster> {
        let monster = self.monsters.remove(id)?;
        if let Some(cell) = self
            .level_mut(monster.depth)
            .and_then(|l| l.cell_mut(monster.grid))
            && cell.occupant == Occupant::Monster(id)
        {
            cell.occupant = Occupant::Empty;
        }
        Some(monster)
    }

    /// Move a monster to an empty cell on its level
    pub fn move_monster(&mut self, id: MonsterId, to: Grid) -> Result<(), WorldError> {
        let (depth, from) = {
            let m = self.monsters.get(id).ok_or(WorldError::NoSuchMonster(id))?;
            (m.depth, m.grid)
        };
        let level = self.level_checked(depth, to)?;
        if !level.occupant(to).is_empty() {
            return Err(WorldError::Occupied { depth, grid: to });
        }
        if let Some(cell) = level.cell_mut(from) {
            cell.occupant = Occupant::Empty;
        }
        if let Some(cell) = level.cell_mut(to) {
            cell.occupant = Occupant::Monster(id);
        }
        if let Some(m) = self.monsters.get_mut(id) {
            m.grid = to;
        }
        Ok(())
    }

    // ========== Players ==========

    /// Add a player to the world at their recorded position
    pub fn place_player(&mut self, player: Player) -> Result<(), WorldError> {
        let (depth, grid) = (player.depth, player.grid);
        let level = self.level_checked(depth, grid)?;
        if !level.occupant(grid).is_empty() {
            return Err(WorldError::Occupied { depth, grid });
        }
        if let Some(cell) = level.cell_mut(grid) {
            cell.occupant = Occupant::Player(player.id);
        }
        self.players.insert(player);
        Ok(())
    }

    /// Move a player to another cell on the same level
    pub fn move_player(&mut self, id: PlayerId, to: Grid) -> Result<(), WorldError> {
        let (depth, from) = {
            let p = self.players.get(id).ok_or(WorldError::NoSuchPlayer(id))?;
            (p.depth, p.grid)
        };
        let level = self.level_checked(depth, to)?;
        if !level.occupant(to).is_empty() {
            return Err(WorldError::Occupied { depth, grid: to });
        }
        if let Some(cell) = level.cell_mut(from)
            && cell.occupant == Occupant::Player(id)
        {
            cell.occupant = Occupant::Empty;
        }
        if let Some(cell) = level.cell_mut(to) {
            cell.occupant = Occupant::Player(id);
        }
        if let Some(p) = self.players.get_mut(id) {
            p.grid = to;
        }
        Ok(())
    }

    /// Take a player off the map (e.g. while changing level)
    pub fn unplace_player(&mut self, id: PlayerId) {
        let Some((depth, grid)) = self.players.get(id).map(|p| (p.depth, p.grid)) else {
            return;
        };
        if let Some(cell) = self.level_mut(depth).and_then(|l| l.cell_mut(grid))
            && cell.occupant == Occupant::Player(id)
        {
            cell.occupant = Occupant::Empty;
        }
    }

    /// Whether the player can currently see the given cell
    ///
    /// Needs line of sight, not being blind, and either a lit cell or one
    /// inside the player's own light radius.
    pub fn player_can_see(&self, id: PlayerId, depth: Depth, grid: Grid) -> bool {
        let Some(player) = self.players.get(id) else {
            return false;
        };
        if player.is_blind() || !self.player_has_los(id, depth, grid) {
            return false;
        }
        let d = distance(player.grid, grid);
        d <= player.light || self.level(depth).is_some_and(|l| l.is_glowing(grid))
    }

    /// Line of sight within sight range, ignoring light and blindness
    pub fn player_has_los(&self, id: PlayerId, depth: Depth, grid: Grid) -> bool {
        let Some(player) = self.players.get(id) else {
            return false;
        };
        if player.depth != depth || player.new_level {
            return false;
        }
        let Some(level) = self.level(depth) else {
            return false;
        };
        distance(player.grid, grid) <= self.config.max_sight && level.los(player.grid, grid)
    }

    pub fn monster_visible_to(&self, player: PlayerId, monster: MonsterId) -> bool {
        self.monsters
            .get(monster)
            .is_some_and(|m| self.player_can_see(player, m.depth, m.grid))
    }

    /// Players standing on the given level
    pub fn players_at(&self, depth: Depth) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.depth == depth && !p.new_level)
            .map(|p| p.id)
            .collect()
    }

    // ========== Objects and terrain ==========

    /// Put an object on a cell, replacing nothing
    pub fn drop_object(&mut self, depth: Depth, grid: Grid, obj: Object) -> Result<(), WorldError> {
        let level = self.level_checked(depth, grid)?;
        let Some(cell) = level.cell_mut(grid) else {
            return Err(WorldError::OutOfBounds { depth, grid });
        };
        if cell.object.is_some() || !cell.feat.is_projectable() {
            return Err(WorldError::Occupied { depth, grid });
        }
        cell.object = Some(obj);
        Ok(())
    }

    pub fn delete_object(&mut self, depth: Depth, grid: Grid) -> Option<Object> {
        self.level_mut(depth)?.cell_mut(grid)?.object.take()
    }

    /// Forget a cell for everyone
    pub fn forget_spot(&mut self, depth: Depth, grid: Grid) {
        if let Some(cell) = self.level_mut(depth).and_then(|l| l.cell_mut(grid)) {
            cell.info.remove(CellFlags::MARK);
        }
    }
}
