use macroquad::prelude::Conf;
use serde::Deserialize;
use shared::{CurveKind, Point};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::simulation::{
    AGENT_SPEED, DEFAULT_AGENT_COUNT, DEFAULT_TICK_RATE, DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH,
    EvictionPolicy, FOOD_ARRIVAL_RADIUS, FOOD_INFLUENCE_RANGE, FOOD_STOCK, MARKER_MAX_LIFETIME,
    MARKER_MAX_RADIUS, MAX_FOCUS_ANGLE, MAX_RESAMPLE_ATTEMPTS, MIN_FOCUS_ANGLE, NEST_ARRIVAL_RADIUS,
    NEST_INFLUENCE_RANGE, PATH_HISTORY_LEN, PROXIMITY_WINDOW, STEER_RATE,
};

// Window constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Arrival and influence distances of a target.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub arrival_radius: f32,
    pub influence_range: f32,
    /// Fixed placement; picked at random on every reset when absent.
    #[serde(default)]
    pub position: Option<Point>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub tick_rate: u32,
    pub agent_count: u32,
    pub agent_speed: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    pub steer_rate: u32,
    pub marker_max_lifetime: i32,
    pub marker_max_radius: f32,
    pub proximity_window: f32,
    pub path_history_len: usize,
    pub max_resample_attempts: u32,
    pub food: TargetConfig,
    pub food_stock: u32,
    pub nest: TargetConfig,
    pub curve: CurveKind,
    pub eviction: EvictionPolicy,
    pub rng_seed: Option<u64>,
}

/// Presentation settings, never seen by the simulation.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub agent_size: f32,
    pub marker_draw_size: f32,
}

/// Configuration for the entire application
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub viewer: ViewerConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            tick_rate: DEFAULT_TICK_RATE,
            agent_count: DEFAULT_AGENT_COUNT,
            agent_speed: AGENT_SPEED,
            min_angle: MIN_FOCUS_ANGLE,
            max_angle: MAX_FOCUS_ANGLE,
            steer_rate: STEER_RATE,
            marker_max_lifetime: MARKER_MAX_LIFETIME,
            marker_max_radius: MARKER_MAX_RADIUS,
            proximity_window: PROXIMITY_WINDOW,
            path_history_len: PATH_HISTORY_LEN,
            max_resample_attempts: MAX_RESAMPLE_ATTEMPTS,
            food: TargetConfig {
                arrival_radius: FOOD_ARRIVAL_RADIUS,
                influence_range: FOOD_INFLUENCE_RANGE,
                position: None,
            },
            food_stock: FOOD_STOCK,
            nest: TargetConfig {
                arrival_radius: NEST_ARRIVAL_RADIUS,
                influence_range: NEST_INFLUENCE_RANGE,
                position: None,
            },
            curve: CurveKind::Linear,
            eviction: EvictionPolicy::FrontTruncate,
            rng_seed: None,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            agent_size: 5.0,
            marker_draw_size: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Distance an agent covers between two steering decisions.
    pub fn step_length(&self) -> f32 {
        self.agent_speed / self.steer_rate as f32
    }

    /// Number of ticks between two steering decisions.
    pub fn steer_interval(&self) -> u64 {
        u64::from(self.tick_rate / self.steer_rate.max(1)).max(1)
    }

    /// Duration of one logical tick in seconds.
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return invalid(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_height
            ));
        }
        if self.tick_rate == 0 || self.steer_rate == 0 {
            return invalid("tick_rate and steer_rate must be non-zero".to_string());
        }
        if self.tick_rate % self.steer_rate != 0 {
            return invalid(format!(
                "steer_rate ({}) must divide tick_rate ({})",
                self.steer_rate, self.tick_rate
            ));
        }
        if self.agent_count == 0 {
            return invalid("agent_count must be at least 1".to_string());
        }
        if !(self.agent_speed > 0.0) {
            return invalid(format!("agent_speed must be positive, got {}", self.agent_speed));
        }
        if !(0.0 <= self.min_angle && self.min_angle <= self.max_angle && self.max_angle <= 360.0) {
            return invalid(format!(
                "angles must satisfy 0 <= min_angle <= max_angle <= 360, got {} and {}",
                self.min_angle, self.max_angle
            ));
        }
        if self.marker_max_lifetime <= 0 {
            return invalid("marker_max_lifetime must be positive".to_string());
        }
        if self.marker_max_radius < 0.0 || self.proximity_window < 0.0 {
            return invalid(
                "marker_max_radius and proximity_window must not be negative".to_string(),
            );
        }
        if self.path_history_len < 2 {
            return invalid("path_history_len must hold at least two points".to_string());
        }
        for (name, target) in [("food", &self.food), ("nest", &self.nest)] {
            if target.arrival_radius < 0.0 || target.influence_range < 0.0 {
                return invalid(format!("{name} radii must not be negative"));
            }
            if let Some(pos) = target.position {
                if !shared::util::in_bounds(pos, self.world_width, self.world_height) {
                    return invalid(format!(
                        "{name} position ({}, {}) lies outside the world",
                        pos.x, pos.y
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Loads the configuration from a TOML file or uses defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let config: AppConfig = toml::from_str(&content)?;
            info!(path = %path.display(), "loaded config");
            config
        }
        None => {
            info!("no config file provided, using defaults");
            AppConfig::default()
        }
    };
    config.simulation.validate()?;
    Ok(config)
}

pub fn window_conf(viewer: &ViewerConfig) -> Conf {
    Conf {
        window_title: "Ants!".to_owned(),
        window_width: viewer.window_width as i32,
        window_height: viewer.window_height as i32,
        high_dpi: true,
        ..Default::default()
    }
}
