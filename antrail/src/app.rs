use crate::engine::Renderer;
use antrail::config::ViewerConfig;
use antrail::simulation::{Control, Simulation};
use macroquad::prelude::*;

/// Window front end: feeds frame time and key presses to the simulation and
/// draws what it reports.
pub struct AntApp {
    simulation: Simulation,
    renderer: Renderer,
}

impl AntApp {
    pub fn new(simulation: Simulation, viewer: ViewerConfig) -> Self {
        let config = simulation.world.config();
        let renderer = Renderer::new(
            config.world_width,
            config.world_height,
            config.agent_count as usize,
            viewer,
        );
        Self {
            simulation,
            renderer,
        }
    }

    /// Runs the main application loop until quit.
    pub async fn run(&mut self) {
        loop {
            if let Some(control) = Self::read_controls() {
                self.simulation.apply(control);
                if control == Control::Reset {
                    self.renderer.reset();
                }
            }
            if self.simulation.is_stopped() {
                break;
            }

            self.handle_camera_input();
            self.simulation.advance_frame(get_frame_time());

            self.render();

            // Yield back to Macroquad (swap buffers, poll events, vsync)
            next_frame().await;
        }
    }

    /// Maps the keyboard onto simulation controls.
    fn read_controls() -> Option<Control> {
        if is_key_pressed(KeyCode::Q) || is_key_pressed(KeyCode::Escape) {
            Some(Control::Quit)
        } else if is_key_pressed(KeyCode::R) {
            Some(Control::Reset)
        } else if is_key_pressed(KeyCode::Space) {
            Some(Control::Start)
        } else {
            None
        }
    }

    fn handle_camera_input(&mut self) {
        if mouse_wheel().1 != 0.0 {
            self.renderer.process_mouse_wheel_zoom();
        }
        self.renderer.process_mouse_drag_pan();
    }

    fn render(&mut self) {
        clear_background(Color::from_rgba(30, 30, 46, 255));
        let snapshot = self.simulation.snapshot();
        self.renderer.render(&snapshot);

        // Switch to default camera for the overlay
        set_default_camera();
        self.renderer.draw_hud(&snapshot, self.simulation.is_running());
    }
}
