use macroquad::prelude::*;

// Camera configuration constants
/// Minimum zoom level allowed (1.0 = whole world in view)
const MIN_ZOOM: f32 = 1.0;
/// Maximum zoom level allowed
const MAX_ZOOM: f32 = 20.0;
/// Speed multiplier for zoom operations
const ZOOM_SPEED: f32 = 0.1;

/// Zoomable, pannable view of the world rectangle.
pub struct GameCamera {
    /// Zoom level (minimum 1.0, higher values zoom in)
    zoom: f32,

    pub world_width: f32,
    pub world_height: f32,

    /// The actual macroquad camera object
    pub camera: Camera2D,
}

impl GameCamera {
    pub fn new(world_width: f32, world_height: f32) -> Self {
        let mut camera = Self {
            zoom: 1.0,
            world_width,
            world_height,
            camera: Camera2D {
                target: vec2(world_width / 2.0, world_height / 2.0),
                ..Default::default()
            },
        };
        camera.update_camera_zoom();
        camera
    }

    pub fn adjust_zoom(&mut self, wheel_movement: f32) {
        let old_zoom = self.zoom;

        // Keep the world point under the cursor fixed while zooming
        let mouse_screen_pos = Vec2::from(mouse_position());
        let mouse_world_pos = self.camera.screen_to_world(mouse_screen_pos);

        self.zoom = (self.zoom - wheel_movement * self.zoom * ZOOM_SPEED).clamp(MIN_ZOOM, MAX_ZOOM);

        if old_zoom != self.zoom {
            self.update_camera_zoom();
            let new_mouse_world_pos = self.camera.screen_to_world(mouse_screen_pos);
            self.move_by(mouse_world_pos - new_mouse_world_pos);
        }
    }

    pub fn move_by(&mut self, movement: Vec2) {
        self.camera.target += movement;
        self.adjust_camera_bounds();
    }

    /// Fits the world into the window without distortion.
    fn aspect_adjustment(&self) -> (f32, f32) {
        let world_ratio = self.world_width / self.world_height;
        let screen_ratio = screen_width() / screen_height();
        if world_ratio >= screen_ratio {
            (1.0, screen_ratio / world_ratio)
        } else {
            (world_ratio / screen_ratio, 1.0)
        }
    }

    fn update_camera_zoom(&mut self) {
        let (horizontal, vertical) = self.aspect_adjustment();
        self.camera.zoom = vec2(
            2.0 / self.world_width * self.zoom * horizontal,
            2.0 / self.world_height * self.zoom * vertical,
        );
    }

    // Keeps the view inside the world
    fn adjust_camera_bounds(&mut self) {
        let (horizontal, vertical) = self.aspect_adjustment();
        let horizontal_view = self.world_width / (self.zoom * horizontal);
        let vertical_view = self.world_height / (self.zoom * vertical);

        self.camera.target.x =
            Self::adjust_coordinate(self.camera.target.x, horizontal_view, self.world_width);
        self.camera.target.y =
            Self::adjust_coordinate(self.camera.target.y, vertical_view, self.world_height);
    }

    fn adjust_coordinate(value: f32, view_size: f32, world_size: f32) -> f32 {
        let min = view_size / 2.0;
        let max = world_size - min;

        if max < min {
            // View is larger than the world, center the camera
            world_size / 2.0
        } else {
            value.clamp(min, max)
        }
    }

    /// Resets the camera to its default position and zoom
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.camera.target = vec2(self.world_width / 2.0, self.world_height / 2.0);
        self.update_camera_zoom();
        self.adjust_camera_bounds();
    }

    /// Recomputes zoom and bounds after a window resize.
    pub fn handle_resize(&mut self) {
        self.update_camera_zoom();
        self.adjust_camera_bounds();
    }
}
