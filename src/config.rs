//! Configuration loading for the animator.

use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "wave_plot.toml";

/// File and rendering parameters. Every field has a default, so a config
/// file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AnimationConfig {
    /// Results file to read
    pub input_path: PathBuf,
    /// GIF file to write
    pub output_path: PathBuf,
    /// Multiplier applied to the largest displacement to get the y-axis limits
    pub amplification: f64,
    /// Delay between frames in milliseconds
    pub frame_delay_ms: u32,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("resultados.dat"),
            output_path: PathBuf::from("simulacao_onda_elastica.gif"),
            amplification: 10.0,
            frame_delay_ms: 25,
            width: 1000,
            height: 500,
            title: "Elastic Bar Wave Simulation".to_string(),
            x_label: "Position (x)".to_string(),
            y_label: "Displacement (u)".to_string(),
        }
    }
}

impl AnimationConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the TOML file
    ///
    /// # Returns
    /// * `Ok(AnimationConfig)` if the file was loaded, parsed and validated
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: Self = toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise use the defaults.
    ///
    /// An unreadable or invalid file is reported and the defaults are used.
    pub fn load_or_default(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }

        match Self::load(config_path) {
            Ok(config) => {
                info!("Using configuration from {}", config_path.display());
                config
            }
            Err(e) => {
                warn!("{}; falling back to defaults", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        if !self.amplification.is_finite() || self.amplification <= 0.0 {
            return Err(format!("Validation error: amplification must be positive, got {}", self.amplification));
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!("Validation error: invalid frame size {}x{}", self.width, self.height));
        }
        if self.frame_delay_ms == 0 {
            return Err("Validation error: frame-delay-ms must be non-zero".to_string());
        }
        Ok(())
    }
}
