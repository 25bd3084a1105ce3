pub mod ant;
mod sim;
mod trail;
mod world;

// Re-export key types for easier imports
pub use ant::{Agent, Goal, TargetKind, focus_angle};
pub use sim::{Control, RunState, Simulation};
pub use trail::{EvictionPolicy, TrailMarker, TrailStore};
pub use world::{Target, World};

// World defaults
pub const DEFAULT_WORLD_WIDTH: f32 = 2560.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 1440.0;
pub const DEFAULT_TICK_RATE: u32 = 60; // Logical ticks per second

// Colony defaults
pub const DEFAULT_AGENT_COUNT: u32 = 20;
pub const AGENT_SPEED: f32 = 350.0; // World units per second
pub const MIN_FOCUS_ANGLE: f32 = 5.0; // Degrees, cone width right at the target
pub const MAX_FOCUS_ANGLE: f32 = 270.0; // Degrees, cone width when far away
pub const STEER_RATE: u32 = 5; // Direction changes (and marker drops) per second
pub const PATH_HISTORY_LEN: usize = 64;
pub const MAX_RESAMPLE_ATTEMPTS: u32 = 16;

// Trail marker defaults
pub const MARKER_MAX_LIFETIME: i32 = 30 * DEFAULT_TICK_RATE as i32; // 30 seconds worth of ticks
pub const MARKER_MAX_RADIUS: f32 = 500.0;
pub const PROXIMITY_WINDOW: f32 = 50.0; // Half-width of the square searched for markers

// Target defaults
pub const FOOD_ARRIVAL_RADIUS: f32 = 25.0;
pub const FOOD_INFLUENCE_RANGE: f32 = 250.0;
pub const FOOD_STOCK: u32 = 250;
pub const NEST_ARRIVAL_RADIUS: f32 = 10.0;
pub const NEST_INFLUENCE_RANGE: f32 = 500.0;
