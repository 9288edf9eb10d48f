//! Generation configuration
//!
//! Parameters for a dungeon run, validated up front so a bad configuration
//! can never leave a half-generated dungeon behind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::templates::RoomTemplate;

/// How doors are derived from the placed rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorStrategy {
    /// One door per (parent, child) pair actually used during layout
    PlacementPairs,
    /// A door for every pair of rooms that ended up sharing an edge,
    /// including rooms that touch by coincidence
    AdjacencyScan,
}

/// Parameters for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of rooms to attempt to place
    pub room_count: usize,
    /// How likely new graph nodes attach to leaf nodes vs random nodes.
    /// Higher = longer branches.
    pub chain_bias: f64,
    /// How likely a room continues in the same direction as its parent.
    /// Higher = straighter runs of rooms.
    pub momentum_bias: f64,
    /// Seed for the run. `None` derives a fresh seed and reports it in the output.
    pub seed: Option<u64>,
    pub door_strategy: DoorStrategy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            room_count: 12,
            chain_bias: 0.6,
            momentum_bias: 0.5,
            seed: None,
            door_strategy: DoorStrategy::PlacementPairs,
        }
    }
}

impl GenerationConfig {
    /// Check the configuration against the template pool before any generation
    /// state is touched.
    pub fn validate(&self, templates: &[RoomTemplate]) -> Result<(), GenerationError> {
        if templates.is_empty() {
            return Err(GenerationError::EmptyTemplatePool);
        }
        for template in templates {
            if template.width < 1 || template.height < 1 {
                return Err(GenerationError::InvalidTemplateSize {
                    name: template.name.clone(),
                    width: template.width,
                    height: template.height,
                });
            }
        }
        if self.room_count == 0 {
            return Err(GenerationError::InvalidRoomCount);
        }
        if !(0.0..=1.0).contains(&self.chain_bias) {
            return Err(GenerationError::InvalidBias {
                name: "chain_bias",
                value: self.chain_bias,
            });
        }
        if !(0.0..=1.0).contains(&self.momentum_bias) {
            return Err(GenerationError::InvalidBias {
                name: "momentum_bias",
                value: self.momentum_bias,
            });
        }
        Ok(())
    }
}

/// Configuration errors, reported before any generation state is created.
/// Per-room placement failure is not an error; skipped rooms are simply
/// absent from the output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("room template pool is empty")]
    EmptyTemplatePool,
    #[error("room template '{name}' has degenerate size {width}x{height}")]
    InvalidTemplateSize {
        name: String,
        width: i32,
        height: i32,
    },
    #[error("room count must be greater than zero")]
    InvalidRoomCount,
    #[error("{name} must be in [0, 1], got {value}")]
    InvalidBias { name: &'static str, value: f64 },
}
