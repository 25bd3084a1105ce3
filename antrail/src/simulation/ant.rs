use super::trail::TrailStore;
use super::world::Target;
use crate::config::SimulationConfig;

use rand::Rng;
use shared::util::{
    bearing, clamp_to_bounds, deg_to_rad, distance, extend, in_bounds, normalize, rad_to_deg,
    scale, step_towards,
};
use shared::{AgentId, AgentView, InfluenceCurve, Point};
use std::collections::VecDeque;

/// Which of the two targets an agent is heading for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Food,
    Nest,
}

impl TargetKind {
    pub fn other(self) -> Self {
        match self {
            TargetKind::Food => TargetKind::Nest,
            TargetKind::Nest => TargetKind::Food,
        }
    }
}

/// What an agent steers toward during one sub-tick: its real target, or a
/// trail marker standing in for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    pub position: Point,
    pub influence_range: f32,
}

impl From<&Target> for Goal {
    fn from(target: &Target) -> Self {
        Self {
            position: target.position,
            influence_range: target.influence_range,
        }
    }
}

/// Width in degrees of the steering cone at `dist` from a goal whose pull
/// starts at `influence_range`.
pub fn focus_angle(
    dist: f32,
    influence_range: f32,
    curve: &dyn InfluenceCurve,
    min_angle: f32,
    max_angle: f32,
) -> f32 {
    scale(
        curve.apply(normalize(dist, 0.0, influence_range)),
        min_angle,
        max_angle,
    )
}

/// State of a forager.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub position: Point,
    /// Where the agent is walking to until the next steering decision.
    pub pending_position: Point,
    /// Points visited while carrying food, oldest first.
    pub path_history: VecDeque<Point>,
    pub carrying_food: bool,
    pub target: TargetKind,
}

impl Agent {
    /// Create a new agent standing on the nest, looking for food.
    pub fn new(id: AgentId, nest: Point) -> Self {
        Self {
            id,
            position: nest,
            pending_position: nest,
            path_history: VecDeque::new(),
            carrying_food: false,
            target: TargetKind::Food,
        }
    }

    pub fn has_arrived(&self, target: &Target) -> bool {
        distance(self.position, target.position) <= target.arrival_radius
    }

    /// Picks up or drops food and turns around. Returns the target reached.
    pub fn arrive(&mut self) -> TargetKind {
        let reached = self.target;
        self.carrying_food = !self.carrying_food;
        self.target = reached.other();
        self.path_history.clear();
        reached
    }

    /// Walks toward the pending position for `dt` seconds.
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.position = step_towards(self.position, self.pending_position, speed * dt);
    }

    /// Chooses the goal for this sub-tick. An agent looking for food, still
    /// outside the pull of the food, follows the most mature nearby marker
    /// once a trail exists.
    pub fn choose_goal(
        &self,
        target: &Target,
        dist: f32,
        trails: &TrailStore,
        config: &SimulationConfig,
    ) -> Goal {
        if self.carrying_food || trails.len() <= 1 || dist <= target.influence_range {
            return Goal::from(target);
        }
        match trails.most_mature_near(self.position, config.proximity_window) {
            Some(marker) => Goal {
                position: marker.position,
                influence_range: 0.0,
            },
            None => Goal::from(target),
        }
    }

    /// Recomputes the pending position and, when carrying food, extends the
    /// trail behind the agent.
    pub fn steer(
        &mut self,
        target: &Target,
        trails: &mut TrailStore,
        config: &SimulationConfig,
        curve: &dyn InfluenceCurve,
        rng: &mut impl Rng,
    ) {
        let step = config.step_length();
        let dist = distance(target.position, self.position);
        if dist < step {
            self.pending_position = target.position;
            return;
        }

        let goal = self.choose_goal(target, dist, trails, config);
        let focus = focus_angle(
            dist,
            goal.influence_range,
            curve,
            config.min_angle,
            config.max_angle,
        );
        let heading = rad_to_deg(bearing(goal.position, self.position));
        let low = deg_to_rad(heading - focus / 2.0);
        let high = deg_to_rad(heading + focus / 2.0);

        self.pending_position = self.sample_step(low, high, step, config, rng);

        if self.carrying_food {
            self.record_path(self.position, config.path_history_len);
            let len = self.path_history.len();
            if len >= 2 {
                trails.lay(self.path_history[len - 2], self.id);
            }
        }
    }

    /// Draws headings inside `[low, high]` until one lands inside the world;
    /// gives up after the configured attempts and pulls the last try inside.
    fn sample_step(
        &self,
        low: f32,
        high: f32,
        step: f32,
        config: &SimulationConfig,
        rng: &mut impl Rng,
    ) -> Point {
        let (width, height) = (config.world_width, config.world_height);
        let mut candidate = self.position;
        for _ in 0..=config.max_resample_attempts {
            let angle = scale(rng.random::<f32>(), low, high);
            candidate = extend(self.position, angle, step);
            if in_bounds(candidate, width, height) {
                return candidate;
            }
        }
        clamp_to_bounds(candidate, width, height)
    }

    fn record_path(&mut self, point: Point, capacity: usize) {
        self.path_history.push_back(point);
        while self.path_history.len() > capacity {
            self.path_history.pop_front();
        }
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            id: self.id,
            position: self.position,
            carrying_food: self.carrying_food,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{EvictionPolicy, TrailMarker};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use shared::CurveKind;

    fn config() -> SimulationConfig {
        SimulationConfig {
            world_width: 1000.0,
            world_height: 1000.0,
            ..SimulationConfig::default()
        }
    }

    fn target_at(x: f32, y: f32, arrival_radius: f32, influence_range: f32) -> Target {
        Target {
            position: Point::new(x, y),
            arrival_radius,
            influence_range,
            stock: None,
        }
    }

    fn trails(config: &SimulationConfig) -> TrailStore {
        TrailStore::new(
            config.marker_max_lifetime,
            config.marker_max_radius,
            EvictionPolicy::FrontTruncate,
        )
    }

    fn aged_marker(x: f32, y: f32, life: i32) -> TrailMarker {
        TrailMarker {
            position: Point::new(x, y),
            remaining_life: life,
            influence_radius: 0.0,
            agent: AgentId(99),
        }
    }

    #[test]
    fn test_new_agent_starts_at_nest_seeking_food() {
        let agent = Agent::new(AgentId(3), Point::new(5.0, 6.0));
        assert_eq!(agent.position, Point::new(5.0, 6.0));
        assert_eq!(agent.pending_position, agent.position);
        assert!(!agent.carrying_food);
        assert_eq!(agent.target, TargetKind::Food);
        assert!(agent.path_history.is_empty());
    }

    #[test]
    fn test_focus_angle_scenario() {
        let curve = CurveKind::Linear;
        let expected = scale(normalize(100.0, 0.0, 250.0), 5.0, 270.0);
        assert_eq!(focus_angle(100.0, 250.0, &curve, 5.0, 270.0), expected);
        assert!((expected - 111.0).abs() < 1e-3);
    }

    #[test]
    fn test_focus_angle_narrows_while_approaching() {
        let curve = CurveKind::Linear;
        let target = Point::new(100.0, 0.0);
        let mut position = Point::new(0.0, 0.0);
        let mut previous = f32::INFINITY;
        while distance(position, target) > 5.0 {
            let focus = focus_angle(distance(target, position), 250.0, &curve, 5.0, 270.0);
            assert!(focus <= previous);
            previous = focus;
            position = step_towards(position, target, 7.0);
        }
    }

    #[test]
    fn test_zero_range_opens_cone_fully() {
        let curve = CurveKind::Linear;
        assert_eq!(focus_angle(30.0, 0.0, &curve, 5.0, 270.0), 270.0);
    }

    #[test]
    fn test_arrival_flips_state_once() {
        let mut agent = Agent::new(AgentId(0), Point::new(0.0, 0.0));
        agent.path_history.push_back(Point::new(1.0, 1.0));
        let food = target_at(3.0, 4.0, 5.0, 250.0);
        assert!(agent.has_arrived(&food));

        assert_eq!(agent.arrive(), TargetKind::Food);
        assert!(agent.carrying_food);
        assert_eq!(agent.target, TargetKind::Nest);
        assert!(agent.path_history.is_empty());

        assert_eq!(agent.arrive(), TargetKind::Nest);
        assert!(!agent.carrying_food);
        assert_eq!(agent.target, TargetKind::Food);
    }

    #[test]
    fn test_close_target_snaps_pending_position() {
        let config = config();
        let mut store = trails(&config);
        let mut agent = Agent::new(AgentId(0), Point::new(500.0, 500.0));
        let food = target_at(540.0, 500.0, 25.0, 250.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        agent.steer(&food, &mut store, &config, &CurveKind::Linear, &mut rng);
        assert_eq!(agent.pending_position, food.position);
        assert!(store.is_empty());
    }

    #[test]
    fn test_steer_moves_one_step_length() {
        let config = config();
        let mut store = trails(&config);
        let mut agent = Agent::new(AgentId(0), Point::new(500.0, 500.0));
        let food = target_at(900.0, 500.0, 25.0, 250.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        agent.steer(&food, &mut store, &config, &CurveKind::Linear, &mut rng);
        let moved = distance(agent.position, agent.pending_position);
        assert!((moved - config.step_length()).abs() < 1e-3);
        // Agents do not move during a steering decision.
        assert_eq!(agent.position, Point::new(500.0, 500.0));
    }

    #[test]
    fn test_carrying_agent_lays_marker_at_second_to_last_point() {
        let config = config();
        let mut store = trails(&config);
        let mut agent = Agent::new(AgentId(4), Point::new(100.0, 100.0));
        agent.carrying_food = true;
        agent.target = TargetKind::Nest;
        let nest = target_at(900.0, 900.0, 10.0, 500.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        agent.steer(&nest, &mut store, &config, &CurveKind::Linear, &mut rng);
        assert_eq!(agent.path_history.len(), 1);
        assert!(store.is_empty());

        let first = agent.position;
        agent.position = agent.pending_position;
        agent.steer(&nest, &mut store, &config, &CurveKind::Linear, &mut rng);
        assert_eq!(agent.path_history.len(), 2);
        assert_eq!(store.len(), 1);
        let marker = store.get(0).unwrap();
        assert_eq!(marker.position, first);
        assert_eq!(marker.agent, AgentId(4));
        assert_eq!(marker.remaining_life, config.marker_max_lifetime);
        assert_eq!(marker.influence_radius, config.marker_max_radius);
    }

    #[test]
    fn test_path_history_is_capped() {
        let config = SimulationConfig {
            path_history_len: 3,
            ..config()
        };
        let mut store = trails(&config);
        let mut agent = Agent::new(AgentId(0), Point::new(100.0, 100.0));
        agent.carrying_food = true;
        let nest = target_at(900.0, 900.0, 10.0, 500.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        for _ in 0..6 {
            agent.steer(&nest, &mut store, &config, &CurveKind::Linear, &mut rng);
            agent.position = agent.pending_position;
        }
        assert_eq!(agent.path_history.len(), 3);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_seeking_agent_follows_most_mature_marker() {
        let config = config();
        let mut store = trails(&config);
        store.append(aged_marker(120.0, 110.0, 900));
        store.append(aged_marker(90.0, 130.0, 200));
        store.append(aged_marker(400.0, 400.0, 10)); // too far away
        let agent = Agent::new(AgentId(0), Point::new(100.0, 100.0));
        let food = target_at(900.0, 900.0, 25.0, 250.0);
        let dist = distance(food.position, agent.position);

        let goal = agent.choose_goal(&food, dist, &store, &config);
        assert_eq!(
            goal,
            Goal {
                position: Point::new(90.0, 130.0),
                influence_range: 0.0,
            }
        );
    }

    #[test]
    fn test_no_marker_override_cases() {
        let config = config();
        let food = target_at(900.0, 900.0, 25.0, 250.0);
        let agent = Agent::new(AgentId(0), Point::new(100.0, 100.0));
        let dist = distance(food.position, agent.position);

        // Empty store.
        let mut store = trails(&config);
        assert_eq!(agent.choose_goal(&food, dist, &store, &config), Goal::from(&food));

        // A single marker is not a trail yet.
        store.append(aged_marker(110.0, 100.0, 5));
        assert_eq!(agent.choose_goal(&food, dist, &store, &config), Goal::from(&food));

        store.append(aged_marker(105.0, 100.0, 3));
        assert_ne!(agent.choose_goal(&food, dist, &store, &config), Goal::from(&food));

        // Carrying agents head straight home.
        let mut carrier = agent.clone();
        carrier.carrying_food = true;
        assert_eq!(carrier.choose_goal(&food, dist, &store, &config), Goal::from(&food));

        // Inside the influence range the target itself wins.
        let near = target_at(150.0, 150.0, 25.0, 250.0);
        let near_dist = distance(near.position, agent.position);
        assert_eq!(agent.choose_goal(&near, near_dist, &store, &config), Goal::from(&near));
    }

    #[test]
    fn test_cornered_agent_is_clamped_inside() {
        // A zero-width cone pointing out of the world never yields a valid sample.
        let config = SimulationConfig {
            min_angle: 0.0,
            max_angle: 0.0,
            ..config()
        };
        let mut store = trails(&config);
        let mut agent = Agent::new(AgentId(0), Point::new(1.0, 500.0));
        let goal = target_at(-500.0, 500.0, 5.0, 250.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        agent.steer(&goal, &mut store, &config, &CurveKind::Linear, &mut rng);
        assert!(in_bounds(agent.pending_position, config.world_width, config.world_height));
        assert_eq!(agent.pending_position.x, 0.0);
    }

    #[test]
    fn test_advance_does_not_overshoot() {
        let mut agent = Agent::new(AgentId(0), Point::new(0.0, 0.0));
        agent.pending_position = Point::new(10.0, 0.0);
        agent.advance(350.0, 1.0 / 60.0);
        assert!((agent.position.x - 350.0 / 60.0).abs() < 1e-4);
        agent.advance(350.0, 1.0 / 60.0);
        assert_eq!(agent.position, Point::new(10.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_focus_angle_monotonic_and_bounded(
            a in 0.0f32..=250.0,
            b in 0.0f32..=250.0,
        ) {
            let curve = CurveKind::Linear;
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            let f_near = focus_angle(near, 250.0, &curve, 5.0, 270.0);
            let f_far = focus_angle(far, 250.0, &curve, 5.0, 270.0);
            prop_assert!(f_near <= f_far);
            prop_assert!((5.0..=270.0).contains(&f_near));
            prop_assert!((5.0..=270.0).contains(&f_far));
        }

        #[test]
        fn prop_pending_position_in_bounds(
            x in 0.0f32..1000.0,
            y in 0.0f32..1000.0,
            tx in 0.0f32..1000.0,
            ty in 0.0f32..1000.0,
            seed in any::<u64>(),
            carrying in any::<bool>(),
        ) {
            let config = config();
            let mut store = trails(&config);
            let mut agent = Agent::new(AgentId(0), Point::new(x, y));
            agent.carrying_food = carrying;
            let target = target_at(tx, ty, 25.0, 250.0);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            agent.steer(&target, &mut store, &config, &CurveKind::Linear, &mut rng);
            let (w, h) = (config.world_width, config.world_height);
            prop_assert!(in_bounds(agent.pending_position, w, h));
        }
    }
}
