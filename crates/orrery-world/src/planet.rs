use orrery_geom::Vec2;
use rand::Rng;

use crate::config::GalaxyGenConfig;

/// Visual/thematic classification of a star system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    Terran,
    Lava,
    Ice,
    GasGiant,
}

impl Biome {
    pub const ALL: [Biome; 4] = [Biome::Terran, Biome::Lava, Biome::Ice, Biome::GasGiant];

    pub fn label(self) -> &'static str {
        match self {
            Biome::Terran => "terran",
            Biome::Lava => "lava",
            Biome::Ice => "ice",
            Biome::GasGiant => "gasgiant",
        }
    }
}

/// Generation-time grouping of planets around a shared center. Systems are
/// flattened away before caching; only their planets survive.
#[derive(Clone, Debug, PartialEq)]
pub struct StarSystem {
    pub center: Vec2,
    pub biome: Biome,
    pub planets: Vec<Planet>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    pub pos: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
    pub name: String,
    /// Transient: observer currently close enough to interact. Not persisted.
    pub in_range: bool,
    /// Transient UI state, but captured by saves so an open overlay survives.
    pub show_overlay: bool,
}

impl Planet {
    pub fn new(pos: Vec2, radius: f32, color: [u8; 3], name: String) -> Self {
        Self {
            pos,
            radius,
            color,
            name,
            in_range: false,
            show_overlay: false,
        }
    }

    /// Circle containment with an interaction margin around the rim.
    #[inline]
    pub fn contains_point(&self, p: Vec2, margin: f32) -> bool {
        let r = self.radius + margin;
        (p - self.pos).length_squared() < r * r
    }
}

/// Two syllables, first capitalized, with an optional "-N" suffix.
pub(crate) fn generate_name<R: Rng>(rng: &mut R, cfg: &GalaxyGenConfig) -> String {
    let first = &cfg.syllables[rng.gen_range(0..cfg.syllables.len())];
    let second = &cfg.syllables[rng.gen_range(0..cfg.syllables.len())];
    let mut name = capitalize(first);
    name.push_str(second);
    if rng.gen_range(0.0..1.0f32) < cfg.name_suffix_chance {
        let n: u8 = rng.gen_range(1..=99);
        name.push('-');
        name.push_str(&n.to_string());
    }
    name
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
