//! Barrowfall - Entry Point
//!
//! Small CLI wrapper around the generator: runs one dungeon and dumps the
//! layout as ASCII for inspection. Usage: barrowfall [room_count] [seed]

use std::collections::HashMap;
use std::env;
use std::path::Path;

use anyhow::{Context, Result};

use barrowfall::{generate, load_room_templates, GenerationConfig, Position};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let mut config = GenerationConfig::default();
    if let Some(count) = args.get(1) {
        config.room_count = count.parse().context("room count must be a number")?;
    }
    if let Some(seed) = args.get(2) {
        config.seed = Some(seed.parse().context("seed must be a number")?);
    }

    let templates = load_room_templates(Path::new("assets/data/rooms.ron"));
    let dungeon = generate(&templates, &config)?;

    println!(
        "seed {} | {} rooms | {} doors | {} wall tiles",
        dungeon.seed,
        dungeon.rooms.len(),
        dungeon.doors.len(),
        dungeon.walls.len()
    );
    print_layout(&dungeon);

    Ok(())
}

/// Dump the layout: one letter per room, '+' for door tiles
fn print_layout(dungeon: &barrowfall::Dungeon) {
    let mut glyphs: HashMap<Position, char> = HashMap::new();
    for room in &dungeon.rooms {
        let glyph = (b'a' + (room.id % 26) as u8) as char;
        for dx in 0..room.width {
            for dy in 0..room.height {
                glyphs.insert(
                    Position::new(room.origin.x + dx, room.origin.y + dy),
                    glyph,
                );
            }
        }
    }
    for door in &dungeon.doors {
        glyphs.insert(door.tile_a, '+');
        glyphs.insert(door.tile_b, '+');
    }

    if glyphs.is_empty() {
        return;
    }
    let min_x = glyphs.keys().map(|p| p.x).min().unwrap();
    let max_x = glyphs.keys().map(|p| p.x).max().unwrap();
    let min_y = glyphs.keys().map(|p| p.y).min().unwrap();
    let max_y = glyphs.keys().map(|p| p.y).max().unwrap();

    // North is +y, so print rows top-down
    for y in (min_y..=max_y).rev() {
        let row: String = (min_x..=max_x)
            .map(|x| *glyphs.get(&Position::new(x, y)).unwrap_or(&' '))
            .collect();
        println!("{}", row);
    }
}
