use shared::Snapshot;
use tracing::info;

use super::world::World;
use crate::config::{ConfigError, SimulationConfig};

/// Signals the environment can send to a running simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Built but not started yet; ticks are ignored.
    Idle,
    Running,
    /// Quit was requested; nothing advances any more.
    Stopped,
}

pub struct Simulation {
    pub world: World,
    state: RunState,
    /// Frame time not yet spent on ticks, in units of ticks.
    pending_ticks: f32,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_world(World::new(config)))
    }

    pub fn from_world(world: World) -> Self {
        Self {
            world,
            state: RunState::Idle,
            pending_ticks: 0.0,
        }
    }

    /// Advances one tick of `dt` seconds if running. Returns whether it did.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.world.tick(dt);
        true
    }

    /// Spends `frame_time` seconds of real time on fixed-length ticks and
    /// carries the leftover into the next frame. Returns the ticks run.
    pub fn advance_frame(&mut self, frame_time: f32) -> u32 {
        if self.state != RunState::Running {
            return 0;
        }
        let config = self.world.config();
        let dt = config.tick_dt();
        self.pending_ticks += frame_time.max(0.0) * config.tick_rate as f32;

        let mut ran = 0;
        while self.pending_ticks >= 1.0 {
            self.world.tick(dt);
            self.pending_ticks -= 1.0;
            ran += 1;
        }
        ran
    }

    pub fn apply(&mut self, control: Control) {
        if self.state == RunState::Stopped {
            return;
        }
        match control {
            Control::Start => {
                if self.state == RunState::Idle {
                    info!("simulation started");
                    self.state = RunState::Running;
                }
            }
            Control::Reset => {
                info!(tick = self.world.tick_count(), "simulation reset");
                self.world.reset();
                self.pending_ticks = 0.0;
            }
            Control::Quit => {
                info!(tick = self.world.tick_count(), "simulation stopped");
                self.state = RunState::Stopped;
            }
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.state == RunState::Stopped
    }

    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }
}
