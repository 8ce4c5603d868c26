use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Darkness factors applied when no explicit level is given.
pub const DEFAULT_LEVELS: [f32; 9] = [0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub partition: PartitionConfig,

    #[serde(default)]
    pub darken: DarkenConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PartitionConfig {
    /// Annotation collection to split (e.g. `instances_all.json`)
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Directory receiving `gender_men.json` and `gender_women.json`
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Write indented JSON instead of the compact form
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DarkenConfig {
    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    /// Base directory; one `darkness_<level>` subdirectory is created per level
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default = "default_levels")]
    pub levels: Vec<f32>,

    /// JPEG quality used when re-encoding `.jpg`/`.jpeg` sources (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Process the files of each level on a rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

fn default_levels() -> Vec<f32> {
    DEFAULT_LEVELS.to_vec()
}

fn default_jpeg_quality() -> u8 {
    95
}

impl Default for DarkenConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            output_dir: None,
            levels: default_levels(),
            jpeg_quality: default_jpeg_quality(),
            parallel: false,
        }
    }
}
