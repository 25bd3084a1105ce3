//! Read-only view of a simulation tick, handed to whoever draws it.

use crate::util::Point;

/// Stable identifier of an agent for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub id: AgentId,
    pub position: Point,
    pub carrying_food: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerView {
    pub position: Point,
    pub influence_radius: f32,
    pub remaining_life: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub position: Point,
    pub arrival_radius: f32,
    pub influence_range: f32,
    /// Remaining food; `None` for the nest.
    pub stock: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub agents: Vec<AgentView>,
    pub markers: Vec<MarkerView>,
    pub food: TargetView,
    pub nest: TargetView,
}

impl Snapshot {
    /// Number of agents currently carrying food.
    pub fn carrying_count(&self) -> usize {
        self.agents.iter().filter(|a| a.carrying_food).count()
    }
}
