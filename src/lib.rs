//! Barrowfall - procedural dungeon generation
//!
//! Builds a random connected graph of rooms, lays it out on an integer grid
//! with no overlaps, carves doors on shared edges, and rasterizes per-tile
//! wall masks. Deterministic for a given seed, template pool, and config.

pub mod config;
pub mod doors;
pub mod dungeon;
pub mod graph;
pub mod grid;
pub mod layout;
pub mod templates;
pub mod walls;

// Re-export commonly used types
pub use config::{DoorStrategy, GenerationConfig, GenerationError};
pub use doors::{Door, DoorId};
pub use dungeon::{generate, Dungeon, Room};
pub use graph::{NodeId, RoomId};
pub use grid::{Direction, Position};
pub use templates::{default_room_templates, load_room_templates, RoomTemplate};
pub use walls::{wall_templates, WallTemplate, WallTile};
