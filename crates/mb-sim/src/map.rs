//! ASCII map loading and dumping
//!
//! One line per row. The outermost ring of the map is always permanent
//! wall, whatever glyph it holds, so file coordinates match level
//! coordinates.

use mb_core::dungeon::{Depth, Feature, Grid, Level};
use mb_core::monster::{RaceId, RaceTable};
use mb_core::object::{Object, ObjectKind};
use mb_core::player::{Player, PlayerId};
use mb_core::{World, WorldError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("map is empty")]
    Empty,

    #[error("map must be at least 3x3, got {height}x{width}")]
    TooSmall { height: i32, width: i32 },

    #[error("line {line} is {found} cells wide, expected {expected}")]
    Ragged { line: usize, expected: usize, found: usize },

    #[error("unknown glyph '{glyph}' at ({y}, {x})")]
    UnknownGlyph { glyph: char, y: i32, x: i32 },

    #[error("more than one '@' on the map")]
    SecondPlayer,
}

/// A parsed map, ready to be loaded into a world
#[derive(Debug)]
pub struct Map {
    pub level: Level,
    pub player: Option<Grid>,
    pub monsters: Vec<(RaceId, Grid)>,
    pub objects: Vec<(Grid, Object)>,
}

/// Id given to the map's `@`
pub const HERO: PlayerId = PlayerId(1);

impl Map {
    /// Add the level and everything on it to the world
    pub fn install(self, world: &mut World) -> Result<Option<PlayerId>, WorldError> {
        let depth = self.level.depth;
        world.add_level(self.level);
        for (grid, obj) in self.objects {
            world.drop_object(depth, grid, obj)?;
        }
        for (race, grid) in self.monsters {
            world.place_monster(race, depth, grid)?;
        }
        match self.player {
            Some(grid) => {
                world.place_player(Player::new(HERO, "Hero", depth, grid))?;
                Ok(Some(HERO))
            }
            None => Ok(None),
        }
    }
}

pub fn parse_map(text: &str, depth: Depth, races: &RaceTable) -> Result<Map, MapError> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().collect())
        .collect();
    let Some(first) = rows.first() else {
        return Err(MapError::Empty);
    };
    let width = first.len();
    if let Some((line, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(MapError::Ragged {
            line: line + 1,
            expected: width,
            found: row.len(),
        });
    }

    let (height, width) = (rows.len() as i32, width as i32);
    if height < 3 || width < 3 {
        return Err(MapError::TooSmall { height, width });
    }

    let mut map = Map {
        level: Level::new_open(depth, height, width),
        player: None,
        monsters: Vec::new(),
        objects: Vec::new(),
    };

    for (y, row) in rows.iter().enumerate() {
        for (x, &glyph) in row.iter().enumerate() {
            let grid = Grid::new(y as i32, x as i32);
            if !map.level.in_bounds(grid) {
                continue;
            }
            let feat = match glyph {
                '#' => Feature::Granite,
                '%' => Feature::Magma,
                '*' => Feature::MagmaTreasure,
                ':' => Feature::Rubble,
                '+' => Feature::ClosedDoor,
                '\'' => Feature::OpenDoor,
                '^' => Feature::Trap(0),
                'T' => Feature::Tree,
                '"' => Feature::Grass,
                ',' => Feature::Crop(1),
                '.' => Feature::Floor,
                '@' => {
                    if map.player.replace(grid).is_some() {
                        return Err(MapError::SecondPlayer);
                    }
                    Feature::Floor
                }
                '!' => {
                    map.objects.push((grid, Object::new(ObjectKind::Potion, "Potion of Cure Light Wounds")));
                    Feature::Floor
                }
                '?' => {
                    map.objects.push((grid, Object::new(ObjectKind::Scroll, "Scroll of Light")));
                    Feature::Floor
                }
                c if c.is_ascii_alphabetic() => {
                    let race = races.find_by_glyph(c).ok_or(MapError::UnknownGlyph {
                        glyph: c,
                        y: grid.y,
                        x: grid.x,
                    })?;
                    map.monsters.push((race, grid));
                    Feature::Floor
                }
                c => {
                    return Err(MapError::UnknownGlyph {
                        glyph: c,
                        y: grid.y,
                        x: grid.x,
                    });
                }
            };
            map.level.set_feature(grid, feat);
        }
    }
    Ok(map)
}

/// Text dump of a level as it now stands
pub fn render(world: &World, depth: Depth) -> String {
    let Some(level) = world.level(depth) else {
        return String::new();
    };
    let glyph = |id| world.race_of(id).map_or('?', |race| race.glyph);
    let mut out = String::with_capacity(((level.width() + 1) * level.height()) as usize);
    for y in 0..level.height() {
        for x in 0..level.width() {
            let ch = level
                .cell(Grid::new(y, x))
                .map_or(' ', |cell| cell.symbol(glyph));
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
