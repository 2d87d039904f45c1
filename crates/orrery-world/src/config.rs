use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Generation tunables. Defaults reproduce the shipped galaxy; a TOML file
/// may override individual fields for experiments.
#[derive(Clone, Debug, Deserialize)]
pub struct GalaxyGenConfig {
    /// Edge length of a square chunk in world units.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: f32,
    /// Cap on resident chunks held by the streaming cache.
    #[serde(default = "default_max_loaded_chunks")]
    pub max_loaded_chunks: usize,
    /// Inclusive [min, max] star systems per chunk.
    #[serde(default = "default_systems_per_chunk")]
    pub systems_per_chunk: [u32; 2],
    /// Inclusive [min, max] planets per system.
    #[serde(default = "default_planets_per_system")]
    pub planets_per_system: [u32; 2],
    /// Inclusive [min, max] planet radius in world units.
    #[serde(default = "default_radius_range")]
    pub radius_range: [f32; 2],
    /// Lowest value any color channel may take (255 is always the ceiling).
    #[serde(default = "default_color_floor")]
    pub color_floor: u8,
    /// Probability of a numeric suffix on a generated planet name.
    #[serde(default = "default_name_suffix_chance")]
    pub name_suffix_chance: f32,
    /// Syllable pool for planet names.
    #[serde(default = "default_syllables")]
    pub syllables: Vec<String>,
}

impl Default for GalaxyGenConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            max_loaded_chunks: default_max_loaded_chunks(),
            systems_per_chunk: default_systems_per_chunk(),
            planets_per_system: default_planets_per_system(),
            radius_range: default_radius_range(),
            color_floor: default_color_floor(),
            name_suffix_chance: default_name_suffix_chance(),
            syllables: default_syllables(),
        }
    }
}

fn default_chunk_size() -> f32 {
    20_000.0
}

fn default_max_loaded_chunks() -> usize {
    25
}

fn default_systems_per_chunk() -> [u32; 2] {
    [0, 2]
}

fn default_planets_per_system() -> [u32; 2] {
    [3, 7]
}

fn default_radius_range() -> [f32; 2] {
    [100.0, 1500.0]
}

fn default_color_floor() -> u8 {
    60
}

fn default_name_suffix_chance() -> f32 {
    0.4
}

fn default_syllables() -> Vec<String> {
    [
        "ty", "no", "li", "ge", "goy", "ven", "tura", "ex", "treme", "dra", "cula", "zyr", "pha",
        "phyr", "mir", "slop", "ye", "xe", "cy", "ber",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

pub fn load_config_from_path(path: &Path) -> Result<GalaxyGenConfig, Box<dyn Error>> {
    let txt = fs::read_to_string(path)?;
    let cfg: GalaxyGenConfig = toml::from_str(&txt)?;
    Ok(cfg)
}
