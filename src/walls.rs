//! Wall rasterization
//!
//! Derives per-tile wall geometry from room occupancy. Each occupied tile
//! gets a 4-bit mask saying which of its sides face a tile outside its own
//! room; non-zero masks emit a wall at that tile. Adjacent rooms each
//! rasterize their own side of a shared boundary, so inter-room walls come
//! out double thick on purpose.

use std::collections::HashMap;

use crate::dungeon::Room;
use crate::graph::RoomId;
use crate::grid::{Direction, Position};

/// Pixel size of a wall template's drawing area
pub const TEMPLATE_SIZE: u32 = 32;
/// Pixel thickness of a wall strip
pub const WALL_THICKNESS: u32 = 4;

const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// A wall emitted at one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTile {
    pub position: Position,
    /// Bitwise OR of the exposed sides (North=1, East=2, South=4, West=8)
    pub mask: u8,
}

/// An axis-aligned strip inside a template's pixel area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallStrip {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Reusable wall geometry for one non-zero side mask. The renderer draws one
/// strip per exposed side, laid out in a `TEMPLATE_SIZE` square with y up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallTemplate {
    pub mask: u8,
    pub strips: Vec<WallStrip>,
}

impl WallTemplate {
    fn for_mask(mask: u8) -> Self {
        let mut strips = Vec::new();
        if mask & Direction::North.mask_bit() != 0 {
            strips.push(WallStrip {
                x: 0,
                y: TEMPLATE_SIZE - WALL_THICKNESS,
                width: TEMPLATE_SIZE,
                height: WALL_THICKNESS,
            });
        }
        if mask & Direction::South.mask_bit() != 0 {
            strips.push(WallStrip {
                x: 0,
                y: 0,
                width: TEMPLATE_SIZE,
                height: WALL_THICKNESS,
            });
        }
        if mask & Direction::West.mask_bit() != 0 {
            strips.push(WallStrip {
                x: 0,
                y: 0,
                width: WALL_THICKNESS,
                height: TEMPLATE_SIZE,
            });
        }
        if mask & Direction::East.mask_bit() != 0 {
            strips.push(WallStrip {
                x: TEMPLATE_SIZE - WALL_THICKNESS,
                y: 0,
                width: WALL_THICKNESS,
                height: TEMPLATE_SIZE,
            });
        }
        Self { mask, strips }
    }
}

/// Precompute the 15 templates, one per non-zero mask. `templates[0]` has
/// mask 1; the template for mask `m` is `templates[m as usize - 1]`.
pub fn wall_templates() -> Vec<WallTemplate> {
    (1..=15).map(WallTemplate::for_mask).collect()
}

/// Compute wall tiles for every room. A mask-0 tile is strictly interior and
/// emits nothing.
pub fn rasterize_walls(rooms: &[Room]) -> Vec<WallTile> {
    let owner = build_tile_owner_map(rooms);
    let mut walls = Vec::new();

    for room in rooms {
        for dx in 0..room.width {
            for dy in 0..room.height {
                let tile = Position::new(room.origin.x + dx, room.origin.y + dy);

                let mut mask = 0u8;
                for dir in DIRECTIONS {
                    if !is_same_room(&owner, tile.step(dir), room.id) {
                        mask |= dir.mask_bit();
                    }
                }

                if mask != 0 {
                    walls.push(WallTile { position: tile, mask });
                }
            }
        }
    }

    walls
}

fn is_same_room(owner: &HashMap<Position, RoomId>, pos: Position, room: RoomId) -> bool {
    owner.get(&pos) == Some(&room)
}

fn build_tile_owner_map(rooms: &[Room]) -> HashMap<Position, RoomId> {
    let mut map = HashMap::new();
    for room in rooms {
        for dx in 0..room.width {
            for dy in 0..room.height {
                map.insert(
                    Position::new(room.origin.x + dx, room.origin.y + dy),
                    room.id,
                );
            }
        }
    }
    map
}
