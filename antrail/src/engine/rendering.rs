use super::{AGENT_COLORS, FOOD_COLOR, GameCamera, MARKER_COLOR, NEST_COLOR, TEXT_COLOR};
use antrail::config::ViewerConfig;
use macroquad::prelude::*;
use shared::util::normalize;
use shared::{Point, Snapshot};

const HUD_FONT_SIZE: f32 = 16.0;

#[inline]
fn to_vec2(p: Point) -> Vec2 {
    vec2(p.x, p.y)
}

/// Draws snapshots of the world and owns all presentation state.
pub struct Renderer {
    /// The main game camera.
    pub game_camera: GameCamera,
    viewer: ViewerConfig,
    /// Per-agent colours, indexed by agent id.
    agent_colors: Vec<Color>,
    /// Flag indicating if the camera is currently being dragged.
    is_dragging: bool,
    /// World position where the camera drag started.
    drag_start_world_pos: Vec2,
    last_screen_size: (f32, f32),
}

impl Renderer {
    pub fn new(
        world_width: f32,
        world_height: f32,
        agent_count: usize,
        viewer: ViewerConfig,
    ) -> Self {
        Self {
            game_camera: GameCamera::new(world_width, world_height),
            viewer,
            agent_colors: Self::pick_colors(agent_count),
            is_dragging: false,
            drag_start_world_pos: Vec2::ZERO,
            last_screen_size: (screen_width(), screen_height()),
        }
    }

    fn pick_colors(count: usize) -> Vec<Color> {
        (0..count)
            .map(|_| AGENT_COLORS[macroquad::rand::gen_range(0, AGENT_COLORS.len())])
            .collect()
    }

    /// New colours and default view after the world was reset.
    pub fn reset(&mut self) {
        self.agent_colors = Self::pick_colors(self.agent_colors.len());
        self.game_camera.reset();
    }

    /// Processes mouse wheel input for zooming the camera.
    pub fn process_mouse_wheel_zoom(&mut self) {
        let wheel_movement = mouse_wheel().1;
        if wheel_movement != 0.0 {
            self.game_camera.adjust_zoom(-wheel_movement.signum());
        }
    }

    /// Processes mouse drag input for panning the camera.
    pub fn process_mouse_drag_pan(&mut self) {
        let current_mouse_pos = Vec2::from(mouse_position());

        if is_mouse_button_pressed(MouseButton::Left) {
            self.is_dragging = true;
            self.drag_start_world_pos = self.game_camera.camera.screen_to_world(current_mouse_pos);
        }

        if self.is_dragging {
            if is_mouse_button_down(MouseButton::Left) {
                let current_world_pos = self.game_camera.camera.screen_to_world(current_mouse_pos);
                let offset = current_world_pos - self.drag_start_world_pos;
                if offset.length_squared() > 0.01 {
                    self.game_camera.move_by(-offset);
                }
            }
            if is_mouse_button_released(MouseButton::Left) {
                self.is_dragging = false;
            }
        }
    }

    /// Draws the world with the game camera.
    pub fn render(&mut self, snapshot: &Snapshot) {
        let screen = (screen_width(), screen_height());
        if screen != self.last_screen_size {
            self.last_screen_size = screen;
            self.game_camera.handle_resize();
        }
        set_camera(&self.game_camera.camera);

        draw_rectangle_lines(0.0, 0.0, snapshot.width, snapshot.height, 2.0, TEXT_COLOR);
        self.draw_markers(snapshot);
        self.draw_targets(snapshot);
        self.draw_agents(snapshot);
    }

    /// Markers shrink with their influence radius.
    fn draw_markers(&self, snapshot: &Snapshot) {
        let max_radius = snapshot
            .markers
            .iter()
            .map(|m| m.influence_radius)
            .fold(0.0f32, f32::max);
        if max_radius <= 0.0 {
            return;
        }
        for marker in &snapshot.markers {
            let size = normalize(marker.influence_radius, 0.0, max_radius).max(0.0)
                * self.viewer.marker_draw_size;
            if size > 0.0 {
                let p = to_vec2(marker.position);
                draw_circle(p.x, p.y, size, MARKER_COLOR);
            }
        }
    }

    fn draw_targets(&self, snapshot: &Snapshot) {
        let food = &snapshot.food;
        let nest = &snapshot.nest;
        draw_circle(food.position.x, food.position.y, food.arrival_radius, FOOD_COLOR);
        draw_circle(nest.position.x, nest.position.y, nest.arrival_radius, NEST_COLOR);
        if let Some(stock) = food.stock {
            draw_text(
                &stock.to_string(),
                food.position.x,
                food.position.y,
                HUD_FONT_SIZE * 1.5,
                TEXT_COLOR,
            );
        }
    }

    fn draw_agents(&self, snapshot: &Snapshot) {
        for agent in &snapshot.agents {
            let color = self
                .agent_colors
                .get(agent.id.0 as usize)
                .copied()
                .unwrap_or(WHITE);
            let p = to_vec2(agent.position);
            draw_circle(p.x, p.y, self.viewer.agent_size, color);
            if agent.carrying_food {
                draw_circle(p.x, p.y, self.viewer.agent_size * 0.4, FOOD_COLOR);
            }
        }
    }

    /// Screen-space status line.
    pub fn draw_hud(&self, snapshot: &Snapshot, running: bool) {
        let status = if running { "" } else { "  [space] start" };
        let line = format!(
            "fps {} | tick {} | markers {} | carrying {}/{} | food {}{}",
            get_fps(),
            snapshot.tick,
            snapshot.markers.len(),
            snapshot.carrying_count(),
            snapshot.agents.len(),
            snapshot.food.stock.unwrap_or(0),
            status,
        );
        draw_text(&line, 10.0, screen_height() - 10.0, HUD_FONT_SIZE, TEXT_COLOR);
    }
}
