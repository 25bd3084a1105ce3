use antrail::config::SimulationConfig;
use antrail::simulation::{Control, EvictionPolicy, Simulation, TargetKind, World};
use shared::Point;
use shared::util::in_bounds;

fn colony_config(seed: u64) -> SimulationConfig {
    let mut config = SimulationConfig {
        rng_seed: Some(seed),
        ..SimulationConfig::default()
    };
    config.nest.position = Some(Point::new(800.0, 700.0));
    config.food.position = Some(Point::new(1100.0, 700.0));
    config
}

#[test]
fn pending_positions_stay_inside_the_world() {
    let mut world = World::new(SimulationConfig {
        rng_seed: Some(77),
        ..SimulationConfig::default()
    });
    let (w, h) = (world.config().world_width, world.config().world_height);
    for _ in 0..1200 {
        world.tick(1.0 / 60.0);
        for agent in world.agents() {
            assert!(
                in_bounds(agent.pending_position, w, h),
                "agent {:?} pending at {:?}",
                agent.id,
                agent.pending_position
            );
        }
    }
}

#[test]
fn colony_forages_and_lays_trail() {
    let mut world = World::new(colony_config(2024));
    let dt = world.config().tick_dt();

    let mut deliveries_started = 0;
    let mut max_markers = 0;
    let initial_stock = world.food().stock.unwrap();
    for _ in 0..3600 {
        let carrying_before = world.agents().iter().filter(|a| a.carrying_food).count();
        world.tick(dt);
        let carrying_after = world.agents().iter().filter(|a| a.carrying_food).count();
        if carrying_after > carrying_before {
            deliveries_started += carrying_after - carrying_before;
        }
        max_markers = max_markers.max(world.trails().len());
    }

    assert!(deliveries_started > 0, "no agent ever reached the food");
    assert!(max_markers > 0, "no trail was laid");
    assert!(world.food().stock.unwrap() < initial_stock);
    assert_eq!(world.agents().len(), 20);
}

#[test]
fn carrying_flag_matches_target() {
    let mut world = World::new(colony_config(5));
    for _ in 0..2400 {
        world.tick(1.0 / 60.0);
        for agent in world.agents() {
            let expected = if agent.carrying_food {
                TargetKind::Nest
            } else {
                TargetKind::Food
            };
            assert_eq!(agent.target, expected);
        }
    }
}

#[test]
fn strict_eviction_never_keeps_expired_markers() {
    let mut config = colony_config(99);
    config.eviction = EvictionPolicy::Strict;
    config.marker_max_lifetime = 120;
    let mut world = World::new(config);
    for _ in 0..3000 {
        world.tick(1.0 / 60.0);
        assert!(world.trails().iter().all(|m| m.remaining_life > 0));
    }
}

#[test]
fn driver_runs_only_while_started() {
    let mut sim = Simulation::new(colony_config(3)).unwrap();
    for _ in 0..10 {
        sim.update(1.0 / 60.0);
    }
    assert_eq!(sim.snapshot().tick, 0);

    sim.apply(Control::Start);
    for _ in 0..10 {
        sim.update(1.0 / 60.0);
    }
    assert_eq!(sim.snapshot().tick, 10);

    sim.apply(Control::Reset);
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.tick, 0);
    assert!(snapshot.markers.is_empty());
    // Fixed placements survive a reset.
    assert_eq!(snapshot.nest.position, Point::new(800.0, 700.0));
    assert!(snapshot.agents.iter().all(|a| a.position == snapshot.nest.position));

    sim.apply(Control::Quit);
    assert!(!sim.update(1.0 / 60.0));
}
