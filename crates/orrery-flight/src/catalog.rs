use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::model::ShipSpec;

/// The ship models a pilot can fly. Loaded from TOML (`[[ship]]` tables) or
/// built in. Lookup by name is how saves reattach to a model, so an unknown
/// name is an `Option`, never a panic.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ShipCatalog {
    #[serde(default, rename = "ship")]
    pub ships: Vec<ShipSpec>,
}

impl ShipCatalog {
    pub fn find(&self, name: &str) -> Option<&ShipSpec> {
        self.ships.iter().find(|s| s.name == name)
    }

    /// The stock roster.
    pub fn builtin() -> Self {
        Self {
            ships: vec![
                ShipSpec {
                    name: "Gladius".into(),
                    accel: 400.0,
                    max_speed: 225.0,
                    drag: 0.0,
                    turn_rate: 52.0,
                },
                ShipSpec {
                    name: "Aurora".into(),
                    accel: 400.0,
                    max_speed: 200.0,
                    drag: 0.0,
                    turn_rate: 500.0,
                },
                ShipSpec {
                    name: "400i".into(),
                    accel: 250.0,
                    max_speed: 1225.0,
                    drag: 0.0,
                    turn_rate: 70.0,
                },
            ],
        }
    }
}

pub fn load_catalog_from_path(path: &Path) -> Result<ShipCatalog, Box<dyn Error>> {
    let txt = fs::read_to_string(path)?;
    let catalog: ShipCatalog = toml::from_str(&txt)?;
    Ok(catalog)
}
