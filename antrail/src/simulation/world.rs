use super::ant::{Agent, TargetKind};
use super::trail::TrailStore;
use crate::config::{SimulationConfig, TargetConfig};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shared::util::{clamp_to_bounds, scale};
use shared::{AgentId, InfluenceCurve, Point, Snapshot, TargetView};
use tracing::debug;

/// The food source or the nest.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub position: Point,
    /// Agents closer than this have arrived.
    pub arrival_radius: f32,
    /// Distance at which the target starts to narrow an agent's steering cone.
    pub influence_range: f32,
    /// Food left at the source; `None` for the nest.
    pub stock: Option<u32>,
}

impl Target {
    fn from_config(config: &TargetConfig, position: Point, stock: Option<u32>) -> Self {
        Self {
            position,
            arrival_radius: config.arrival_radius,
            influence_range: config.influence_range,
            stock,
        }
    }

    /// Takes one unit of food. Purely cosmetic, steering ignores it.
    pub fn deplete(&mut self) {
        if let Some(stock) = self.stock.as_mut() {
            *stock = stock.saturating_sub(1);
        }
    }

    pub fn view(&self) -> TargetView {
        TargetView {
            position: self.position,
            arrival_radius: self.arrival_radius,
            influence_range: self.influence_range,
            stock: self.stock,
        }
    }
}

/// Everything one colony run owns: targets, agents, trail and randomness.
pub struct World {
    config: SimulationConfig,
    tick: u64,
    food: Target,
    nest: Target,
    agents: Vec<Agent>,
    trails: TrailStore,
    curve: Box<dyn InfluenceCurve>,
    rng: ChaCha8Rng,
}

impl World {
    /// Builds a world seeded from `config.rng_seed`, or from entropy when unset.
    pub fn new(config: SimulationConfig) -> Self {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(config: SimulationConfig, mut rng: ChaCha8Rng) -> Self {
        let food_pos = config
            .food
            .position
            .unwrap_or_else(|| random_point(&mut rng, &config));
        let nest_pos = config
            .nest
            .position
            .unwrap_or_else(|| random_point(&mut rng, &config));

        let food = Target::from_config(&config.food, food_pos, Some(config.food_stock));
        let nest = Target::from_config(&config.nest, nest_pos, None);
        let agents = (0..config.agent_count)
            .map(|i| Agent::new(AgentId(i), nest.position))
            .collect();
        let trails = TrailStore::new(
            config.marker_max_lifetime,
            config.marker_max_radius,
            config.eviction,
        );
        let curve: Box<dyn InfluenceCurve> = Box::new(config.curve);

        debug!(
            food = ?food.position,
            nest = ?nest.position,
            agents = config.agent_count,
            "world initialised"
        );

        Self {
            config,
            tick: 0,
            food,
            nest,
            agents,
            trails,
            curve,
            rng,
        }
    }

    /// Replaces the configured influence curve.
    pub fn set_curve(&mut self, curve: impl InfluenceCurve + 'static) {
        self.curve = Box::new(curve);
    }

    /// Starts over with fresh target positions, every agent back at the nest
    /// and no trail. The random stream and curve carry over.
    pub fn reset(&mut self) {
        let curve = std::mem::replace(&mut self.curve, Box::new(self.config.curve));
        let fresh = World::with_rng(self.config.clone(), self.rng.clone());
        *self = World { curve, ..fresh };
    }

    /// Advances the world by one logical tick lasting `dt` seconds.
    ///
    /// Trail markers age first. Each agent then either arrives at its target,
    /// picks a new heading on steering ticks, or walks toward its pending
    /// position.
    pub fn tick(&mut self, dt: f32) {
        self.trails.tick(self.curve.as_ref());

        let steering = self.tick % self.config.steer_interval() == 0;
        for agent in &mut self.agents {
            let target = match agent.target {
                TargetKind::Food => &self.food,
                TargetKind::Nest => &self.nest,
            };

            if agent.has_arrived(target) {
                let reached = agent.arrive();
                if reached == TargetKind::Food {
                    self.food.deplete();
                }
                debug!(
                    agent = agent.id.0,
                    reached = ?reached,
                    carrying_food = agent.carrying_food,
                    "agent reached target"
                );
                continue;
            }

            if steering {
                agent.steer(
                    target,
                    &mut self.trails,
                    &self.config,
                    self.curve.as_ref(),
                    &mut self.rng,
                );
            } else {
                agent.advance(self.config.agent_speed, dt);
            }
        }

        self.tick += 1;
    }

    pub fn food(&self) -> &Target {
        &self.food
    }

    pub fn nest(&self) -> &Target {
        &self.nest
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn trails(&self) -> &TrailStore {
        &self.trails
    }

    pub fn trails_mut(&mut self) -> &mut TrailStore {
        &mut self.trails
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of ticks run since the last reset.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            width: self.config.world_width,
            height: self.config.world_height,
            agents: self.agents.iter().map(Agent::view).collect(),
            markers: self.trails.views(),
            food: self.food.view(),
            nest: self.nest.view(),
        }
    }
}

fn random_point(rng: &mut impl Rng, config: &SimulationConfig) -> Point {
    let (width, height) = (config.world_width, config.world_height);
    let p = Point::new(
        scale(rng.random::<f32>(), 0.0, width),
        scale(rng.random::<f32>(), 0.0, height),
    );
    // Rounding can land exactly on the far edge.
    clamp_to_bounds(p, width, height)
}
