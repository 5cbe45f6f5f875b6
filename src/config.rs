//! Site configuration
//!
//! `assets/site.ron` holds two halves: `settings` (scene and timing tuning)
//! and `portfolio` (content). Every field has a default so a partial file,
//! or no file at all, still produces a working site.

use crate::content::Portfolio;
use serde::{Serialize, Deserialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

pub const SITE_CONFIG_PATH: &str = "assets/site.ron";

/// Object names the navigation lookup depends on
pub const SECTION_NAMES: [&str; 3] = ["about", "projects", "contact"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Orbit-control tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub damping_factor: f32,
    /// Revolutions per minute around the target when auto-rotating
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians of orbit per pixel of drag
    pub drag_sensitivity: f32,
    /// Zoom factor per wheel notch
    pub zoom_step: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            auto_rotate_speed: 0.5,
            min_distance: 2.0,
            max_distance: 100.0,
            drag_sensitivity: 0.005,
            zoom_step: 0.95,
        }
    }
}

/// Durations and delays, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub navigation: f32,
    pub reveal_delay: f32,
    pub entry_fade_out: f32,
    pub interface_fade_in: f32,
    pub entry_camera: f32,
    pub entry_fallback: f32,
    pub hover_pulse: f32,
    pub resize_settle: f32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            navigation: 2.0,
            reveal_delay: 1.0,
            entry_fade_out: 1.5,
            interface_fade_in: 1.0,
            entry_camera: 3.0,
            entry_fallback: 3.5,
            hover_pulse: 0.3,
            resize_settle: 1.0,
        }
    }
}

/// Scene and behaviour tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base star count; the starfield holds twice this many particles
    pub star_count: usize,
    pub star_seed: u64,
    /// Half-extent of the starfield cube
    pub star_spread: f32,
    pub camera_start_z: f32,
    pub camera_home_z: f32,
    /// Home distance on viewports narrower than `compact_breakpoint`
    pub camera_home_z_compact: f32,
    pub compact_breakpoint: f32,
    pub fov_degrees: f32,
    /// Point hit tolerance for picking, in world units
    pub pick_threshold: f32,
    /// Latitude/longitude segments of each planet's particle sphere
    pub sphere_segments: u32,
    pub ring_segments: u32,
    pub fog_density: f32,
    /// When false the tween engine is unavailable and every transition snaps
    pub animations: bool,
    pub orbit: OrbitSettings,
    pub timing: TimingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            star_count: 5000,
            star_seed: 0x5747_4152,
            star_spread: 100.0,
            camera_start_z: 50.0,
            camera_home_z: 10.0,
            camera_home_z_compact: 20.0,
            compact_breakpoint: 768.0,
            fov_degrees: 75.0,
            pick_threshold: 0.5,
            sphere_segments: 64,
            ring_segments: 64,
            fog_density: 0.02,
            animations: true,
            orbit: OrbitSettings::default(),
            timing: TimingSettings::default(),
        }
    }
}

impl Settings {
    /// Home camera distance for a viewport of the given width (pixels)
    pub fn home_distance(&self, viewport_width: f32) -> f32 {
        if viewport_width >= self.compact_breakpoint {
            self.camera_home_z
        } else {
            self.camera_home_z_compact
        }
    }

    /// Number of particles in the starfield
    pub fn particle_count(&self) -> usize {
        self.star_count * 2
    }
}

/// The whole config file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub settings: Settings,
    pub portfolio: Portfolio,
}

impl SiteConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Load the config, falling back to the built-in site on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded site config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using built-in site config");
                Self::default()
            }
        }
    }

    /// Load the config through macroquad's file API (WASM fetches it over HTTP)
    #[cfg(target_arch = "wasm32")]
    pub async fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match macroquad::file::load_string(&path.to_string_lossy()).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "using built-in site config");
                return Self::default();
            }
        };
        Self::from_ron_str(&text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using built-in site config");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.settings;
        if s.star_count == 0 {
            return Err(ConfigError::Invalid("star_count must be positive".into()));
        }
        if s.sphere_segments < 3 || s.ring_segments < 3 {
            return Err(ConfigError::Invalid("sphere/ring segments must be at least 3".into()));
        }
        if !(s.fov_degrees > 0.0 && s.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!("fov_degrees out of range: {}", s.fov_degrees)));
        }
        if !(s.star_spread.is_finite() && s.star_spread > 0.0) {
            return Err(ConfigError::Invalid(format!("star_spread must be positive: {}", s.star_spread)));
        }
        if s.pick_threshold <= 0.0 {
            return Err(ConfigError::Invalid("pick_threshold must be positive".into()));
        }
        if s.orbit.min_distance <= 0.0 || s.orbit.min_distance > s.orbit.max_distance {
            return Err(ConfigError::Invalid("orbit distance limits are inverted".into()));
        }

        let mut names = HashSet::new();
        let all_names = self.portfolio.skills.iter().map(|p| p.name.as_str())
            .chain(self.portfolio.sections.iter().map(|p| p.name.as_str()));
        for name in all_names {
            if name.is_empty() {
                return Err(ConfigError::Invalid("planet names must be non-empty".into()));
            }
            if !names.insert(name) {
                return Err(ConfigError::Invalid(format!("duplicate planet name: {}", name)));
            }
        }
        for required in SECTION_NAMES {
            if self.portfolio.section(required).is_none() {
                return Err(ConfigError::Invalid(format!("missing section planet: {}", required)));
            }
        }
        Ok(())
    }
}
