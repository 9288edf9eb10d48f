//! Door placement
//!
//! Derives doors from the shared edges of placed rooms, either from the
//! placement pairs recorded during layout or by scanning every room pair for
//! coincidental adjacency.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::DoorStrategy;
use crate::dungeon::Room;
use crate::graph::RoomId;
use crate::grid::Position;

/// Index into the dungeon's door list
pub type DoorId = usize;

/// A connection between two rooms. The tile coordinates are the tiles just
/// inside each room's boundary, Manhattan-adjacent across the shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Door {
    pub room_a: RoomId,
    pub room_b: RoomId,
    pub tile_a: Position,
    pub tile_b: Position,
}

impl Door {
    /// The room on the other side of this door
    pub fn other_room(&self, current: RoomId) -> RoomId {
        debug_assert!(current == self.room_a || current == self.room_b);
        if current == self.room_a {
            self.room_b
        } else {
            self.room_a
        }
    }

    /// This door's tile as seen from the given room
    pub fn tile_in(&self, room: RoomId) -> Position {
        debug_assert!(room == self.room_a || room == self.room_b);
        if room == self.room_a {
            self.tile_a
        } else {
            self.tile_b
        }
    }
}

/// Create doors for the room set and append each door to both rooms it joins
pub fn place_doors(
    rng: &mut StdRng,
    rooms: &mut [Room],
    pairs: &[(RoomId, RoomId)],
    strategy: DoorStrategy,
) -> Vec<Door> {
    let mut doors = Vec::new();

    match strategy {
        DoorStrategy::PlacementPairs => {
            for &(a, b) in pairs {
                match shared_edge_door(rng, &rooms[a], &rooms[b]) {
                    Some((tile_a, tile_b)) => {
                        push_door(&mut doors, rooms, a, b, tile_a, tile_b);
                    }
                    None => {
                        // Paired rooms can fail the edge test only if layout
                        // moved one of them through an alternate parent.
                        log::debug!("Placement pair ({}, {}) no longer adjacent", a, b);
                    }
                }
            }
        }
        DoorStrategy::AdjacencyScan => {
            for a in 0..rooms.len() {
                for b in a + 1..rooms.len() {
                    if let Some((tile_a, tile_b)) = shared_edge_door(rng, &rooms[a], &rooms[b]) {
                        push_door(&mut doors, rooms, a, b, tile_a, tile_b);
                    }
                }
            }
        }
    }

    doors
}

fn push_door(
    doors: &mut Vec<Door>,
    rooms: &mut [Room],
    a: RoomId,
    b: RoomId,
    tile_a: Position,
    tile_b: Position,
) {
    let id: DoorId = doors.len();
    doors.push(Door {
        room_a: a,
        room_b: b,
        tile_a,
        tile_b,
    });
    rooms[a].doors.push(id);
    rooms[b].doors.push(id);
}

/// Test whether two rooms share a qualifying edge and pick a door tile on it.
///
/// Returns the door tile inside `a` and the door tile inside `b`, or `None`
/// when the rectangles do not abut with at least one tile of edge overlap.
fn shared_edge_door(rng: &mut StdRng, a: &Room, b: &Room) -> Option<(Position, Position)> {
    let a_right = a.origin.x + a.width;
    let b_right = b.origin.x + b.width;
    let a_top = a.origin.y + a.height;
    let b_top = b.origin.y + b.height;

    // B directly east of A (shared vertical edge)
    if a_right == b.origin.x {
        let lo = a.origin.y.max(b.origin.y);
        let hi = a_top.min(b_top);
        if hi > lo {
            let y = rng.gen_range(lo..hi);
            return Some((Position::new(a_right - 1, y), Position::new(b.origin.x, y)));
        }
    }

    // B directly west of A
    if b_right == a.origin.x {
        let lo = a.origin.y.max(b.origin.y);
        let hi = a_top.min(b_top);
        if hi > lo {
            let y = rng.gen_range(lo..hi);
            return Some((Position::new(a.origin.x, y), Position::new(b_right - 1, y)));
        }
    }

    // B directly north of A (shared horizontal edge)
    if a_top == b.origin.y {
        let lo = a.origin.x.max(b.origin.x);
        let hi = a_right.min(b_right);
        if hi > lo {
            let x = rng.gen_range(lo..hi);
            return Some((Position::new(x, a_top - 1), Position::new(x, b.origin.y)));
        }
    }

    // B directly south of A
    if b_top == a.origin.y {
        let lo = a.origin.x.max(b.origin.x);
        let hi = a_right.min(b_right);
        if hi > lo {
            let x = rng.gen_range(lo..hi);
            return Some((Position::new(x, a.origin.y), Position::new(x, b_top - 1)));
        }
    }

    None
}
