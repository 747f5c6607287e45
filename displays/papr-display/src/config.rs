//! Render configuration
//!
//! Loaded from the optional `[render]` table of a TOML document:
//!
//! ```toml
//! [render]
//! flash_cycles = 2
//! flash_hold_ms = 180
//! arc_steps = 48
//! show_ready_banner = true
//! ```
//!
//! Missing keys take their defaults; other tables are ignored.

use serde::Deserialize;

use crate::geometry::DEFAULT_ARC_STEPS;
use crate::refresh::{DEFAULT_FLASH_CYCLES, DEFAULT_FLASH_HOLD_MS};

/// Longest accepted hold between flashes
pub const MAX_FLASH_HOLD_MS: u32 = 10_000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Not valid TOML, or a value of the wrong type
    Parse,
    /// A value outside its allowed range
    Invalid,
}

/// Renderer tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct RenderConfig {
    /// Black/white flash pairs before each full-scene replace
    pub flash_cycles: u8,
    /// Wait after each flash except the last, in milliseconds
    pub flash_hold_ms: u32,
    /// Segments per full turn when tessellating arcs
    pub arc_steps: u32,
    /// Draw `READY` on startup
    pub show_ready_banner: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            flash_cycles: DEFAULT_FLASH_CYCLES,
            flash_hold_ms: DEFAULT_FLASH_HOLD_MS,
            arc_steps: DEFAULT_ARC_STEPS,
            show_ready_banner: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    render: RenderConfig,
}

impl RenderConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(input).map_err(|_| {
            warn!("Config: TOML parse failed");
            ConfigError::Parse
        })?;
        file.render.validate()?;
        Ok(file.render)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flash_hold_ms > MAX_FLASH_HOLD_MS {
            warn!("Config: flash_hold_ms {} out of range", self.flash_hold_ms);
            return Err(ConfigError::Invalid);
        }
        if self.arc_steps == 0 {
            warn!("Config: arc_steps must be positive");
            return Err(ConfigError::Invalid);
        }
        Ok(())
    }
}
