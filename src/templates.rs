//! Room templates
//!
//! Static room definitions supplied by the caller, with a RON loader and
//! hardcoded defaults as fallback.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Index into the template pool
pub type TemplateId = usize;

/// A static room definition. The engine reads these and never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTemplate {
    pub name: String,
    pub width: i32,
    pub height: i32,
    /// RGB tint used by the renderer for this room's floor
    pub color: [u8; 3],
    /// Connector rooms (hallways) want at least two door connections and are
    /// prioritized during layout until they have them.
    #[serde(default)]
    pub connector: bool,
    /// Flavor text shown when the party examines the room. Opaque to the engine.
    #[serde(default)]
    pub examine_options: Vec<String>,
    /// Actions offered to the party in this room. Opaque to the engine.
    #[serde(default)]
    pub action_options: Vec<String>,
}

impl RoomTemplate {
    pub fn new(name: &str, width: i32, height: i32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            color: [120, 110, 100],
            connector: false,
            examine_options: Vec::new(),
            action_options: Vec::new(),
        }
    }
}

/// Load room templates from a RON file, falling back to the built-in pool if
/// the file is missing or malformed.
pub fn load_room_templates(path: &Path) -> Vec<RoomTemplate> {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => match ron::from_str(&content) {
                Ok(templates) => return templates,
                Err(e) => log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e),
            },
            Err(e) => log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e),
        }
    }
    default_room_templates()
}

/// Built-in template pool used when no data file is available
pub fn default_room_templates() -> Vec<RoomTemplate> {
    vec![
        RoomTemplate {
            name: "Crypt Chamber".to_string(),
            width: 5,
            height: 4,
            color: [110, 95, 80],
            connector: false,
            examine_options: vec![
                "Broken sarcophagi line the walls.".to_string(),
                "The dust here has not been disturbed in centuries.".to_string(),
            ],
            action_options: vec!["Search the sarcophagi".to_string()],
        },
        RoomTemplate {
            name: "Great Hall".to_string(),
            width: 7,
            height: 6,
            color: [95, 85, 90],
            connector: false,
            examine_options: vec!["Collapsed pillars cast long shadows.".to_string()],
            action_options: vec!["Rest by the old hearth".to_string()],
        },
        RoomTemplate {
            name: "Narrow Hallway".to_string(),
            width: 5,
            height: 2,
            color: [80, 80, 85],
            connector: true,
            examine_options: vec!["A cramped passage, walls slick with damp.".to_string()],
            action_options: Vec::new(),
        },
        RoomTemplate {
            name: "Shrine Alcove".to_string(),
            width: 3,
            height: 3,
            color: [100, 90, 120],
            connector: false,
            examine_options: vec!["A defaced idol watches from its niche.".to_string()],
            action_options: vec!["Pray at the shrine".to_string()],
        },
        RoomTemplate {
            name: "Storeroom".to_string(),
            width: 4,
            height: 4,
            color: [105, 100, 75],
            connector: false,
            examine_options: vec!["Rotten crates and burst barrels.".to_string()],
            action_options: vec!["Rummage through the crates".to_string()],
        },
        RoomTemplate {
            name: "Stairwell Landing".to_string(),
            width: 2,
            height: 4,
            color: [85, 85, 85],
            connector: true,
            examine_options: vec!["Worn steps spiral into darkness.".to_string()],
            action_options: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_nonempty() {
        let templates = default_room_templates();
        assert!(!templates.is_empty());
        assert!(templates.iter().all(|t| t.width > 0 && t.height > 0));
    }

    #[test]
    fn test_default_pool_has_connectors() {
        let templates = default_room_templates();
        assert!(templates.iter().any(|t| t.connector));
    }

    #[test]
    fn test_parse_ron_template() {
        let source = r#"[
            (
                name: "Test Cell",
                width: 3,
                height: 3,
                color: (90, 90, 90),
                connector: false,
            ),
        ]"#;
        let templates: Vec<RoomTemplate> = ron::from_str(source).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Test Cell");
        assert!(templates[0].examine_options.is_empty()); // defaulted
    }

    #[test]
    fn test_missing_file_falls_back() {
        let templates = load_room_templates(Path::new("no/such/file.ron"));
        assert_eq!(templates.len(), default_room_templates().len());
    }
}
