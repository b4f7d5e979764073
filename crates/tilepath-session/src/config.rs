use tilepath_paths::SearchConfig;

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Grid width in tiles.
    pub width: i32,
    /// Grid height in tiles.
    pub height: i32,
    /// Side of a square tile in pixels, for pointer mapping.
    pub tile_size: f32,
    /// Chance that a generated cell is a wall.
    pub wall_probability: f64,
    /// Seed for grid generation. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Passed to every search the session runs.
    pub search: SearchConfig,
}

impl Default for SessionConfig {
    /// A 1280x720 window of 40 px tiles with one wall in five.
    fn default() -> Self {
        Self {
            width: 32,
            height: 18,
            tile_size: 40.0,
            wall_probability: 0.2,
            seed: None,
            search: SearchConfig::default(),
        }
    }
}
