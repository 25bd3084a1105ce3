mod camera;
mod rendering;

pub use camera::GameCamera;
pub use rendering::Renderer;

use macroquad::prelude::Color;

pub const FOOD_COLOR: Color = Color::new(0.82, 0.06, 0.22, 1.0);
pub const NEST_COLOR: Color = Color::new(0.25, 0.63, 0.17, 1.0);
pub const MARKER_COLOR: Color = Color::new(0.12, 0.4, 0.96, 0.25);
pub const TEXT_COLOR: Color = Color::new(0.8, 0.84, 0.96, 1.0);
pub const AGENT_COLORS: [Color; 14] = [
    Color::new(0.54, 0.71, 0.98, 1.0),
    Color::new(0.96, 0.88, 0.86, 1.0),
    Color::new(0.95, 0.8, 0.8, 1.0),
    Color::new(0.96, 0.76, 0.91, 1.0),
    Color::new(0.8, 0.65, 0.97, 1.0),
    Color::new(0.95, 0.55, 0.66, 1.0),
    Color::new(0.92, 0.63, 0.67, 1.0),
    Color::new(0.98, 0.7, 0.53, 1.0),
    Color::new(0.98, 0.89, 0.69, 1.0),
    Color::new(0.65, 0.89, 0.63, 1.0),
    Color::new(0.58, 0.89, 0.84, 1.0),
    Color::new(0.54, 0.86, 0.92, 1.0),
    Color::new(0.45, 0.78, 0.93, 1.0),
    Color::new(0.71, 0.75, 1.0, 1.0),
];
