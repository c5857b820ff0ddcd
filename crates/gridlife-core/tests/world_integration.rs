use gridlife_core::{
    Agent, AgentKind, Barrier, Behavior, Bouncer, Coord, Grid, GridLifeConfig, Hazard, Heading,
    Lifecycle, Oscillator, ParityCell, Placement, Rgb, Scenario, Seeker, Tick, World,
};

fn parity_grid(size: i32, actives: &[(i32, i32)]) -> Grid {
    let mut grid = Grid::new(size as usize);
    for row in 0..size {
        for col in 0..size {
            let active = actives.contains(&(row, col));
            grid.set(row, col, ParityCell::new(active).into());
        }
    }
    grid
}

fn is_active_at(grid: &Grid, row: i32, col: i32) -> bool {
    grid.get(row, col).is_some_and(|agent| agent.is_active())
}

fn position_of(grid: &Grid, kind: AgentKind) -> Option<Coord> {
    grid.occupied()
        .find(|(_, agent)| agent.kind() == kind)
        .map(|(coord, _)| coord)
}

#[test]
fn lone_oscillator_stays_active_after_one_tick() {
    let mut grid = Grid::new(50);
    grid.set(2, 2, Oscillator::new(true).into());
    assert_eq!(grid.active_neighbor_count(2, 2), 0);

    grid.step();
    assert!(is_active_at(&grid, 2, 2));

    grid.step();
    assert!(!is_active_at(&grid, 2, 2), "odd step count stages inactive");
}

#[test]
fn parity_field_flips_on_block_parity() {
    let mut grid = parity_grid(50, &[(44, 5), (45, 4), (45, 5)]);
    assert!(!is_active_at(&grid, 44, 4));

    grid.step();
    assert!(is_active_at(&grid, 44, 4));
    assert!(is_active_at(&grid, 44, 5));
    assert!(is_active_at(&grid, 45, 4));
    assert!(is_active_at(&grid, 45, 5));

    grid.step();
    assert!(!is_active_at(&grid, 44, 4));
    assert!(is_active_at(&grid, 44, 5));
}

#[test]
fn parity_world_matches_hand_built_grid() {
    let mut world = World::new(GridLifeConfig {
        rng_seed: Some(1),
        scenario: Scenario::parity_field(),
        ..GridLifeConfig::default()
    })
    .expect("world");
    world.step();
    assert!(is_active_at(world.grid(), 44, 4));
    world.step();
    assert!(!is_active_at(world.grid(), 44, 4));
}

#[test]
fn seeker_steps_toward_centre() {
    let mut grid = Grid::new(50);
    grid.set(0, 0, Seeker::new(true).into());
    assert_eq!(grid.center(), Coord::new(25, 25));

    let report = grid.step();
    assert_eq!(report.moved, 1);
    assert!(grid.is_empty(0, 0));
    let seeker = grid.get(1, 1).expect("seeker moved to (1,1)");
    assert_eq!(seeker.kind(), AgentKind::Seeker);
    assert!(seeker.is_active());
}

#[test]
fn blocked_seeker_turns_inactive_in_place() {
    let mut grid = Grid::new(50);
    grid.set(0, 0, Seeker::new(true).into());
    grid.set(1, 1, Oscillator::new(true).into());
    assert_eq!(grid.get(0, 0).map(Behavior::color), Some(Rgb::ORANGE));

    grid.step();
    let seeker = grid.get(0, 0).expect("seeker did not move");
    assert_eq!(seeker.kind(), AgentKind::Seeker);
    assert_eq!(seeker.lifecycle(), Lifecycle::Inactive);
    assert_eq!(seeker.color(), Rgb::YELLOW);
    assert_eq!(grid.get(1, 1).map(Agent::kind), Some(AgentKind::Oscillator));
}

#[test]
fn seeker_shuttles_between_centre_and_origin() {
    let mut grid = Grid::new(10);
    grid.set(3, 3, Seeker::new(true).into());
    // (3,3) -> (4,4) -> (5,5) reaches the centre, then turns around.
    grid.step();
    grid.step();
    assert_eq!(position_of(&grid, AgentKind::Seeker), Some(Coord::new(5, 5)));
    grid.step();
    assert!(!is_active_at(&grid, 5, 5));
    grid.step();
    assert_eq!(position_of(&grid, AgentKind::Seeker), Some(Coord::new(4, 4)));
}

#[test]
fn bouncer_ringed_by_hazards_goes_inactive_for_every_heading() {
    for heading in Heading::ALL {
        let mut grid = Grid::new(50);
        grid.set(1, 1, Bouncer::new(true, heading).into());
        for coord in Coord::new(1, 1).moore() {
            grid.set(coord.row, coord.col, Hazard::new(0).into());
        }

        grid.step();
        let bouncer = grid.get(1, 1).expect("bouncer stays put");
        assert_eq!(bouncer.kind(), AgentKind::Bouncer);
        assert!(!bouncer.is_active(), "heading {heading:?}");
        assert_eq!(bouncer.color(), Rgb::GRAY);
    }
}

#[test]
fn bouncer_ringed_by_hazards_with_random_heading() {
    let mut world = World::new(GridLifeConfig {
        rng_seed: Some(0xC0FFEE),
        scenario: Scenario::Empty,
        ..GridLifeConfig::default()
    })
    .expect("world");
    assert!(world.spawn_bouncer(1, 1, true).is_placed());
    for coord in Coord::new(1, 1).moore() {
        world.spawn_hazard(coord.row, coord.col);
    }
    world.step();
    assert!(!is_active_at(world.grid(), 1, 1));
}

#[test]
fn movers_next_to_barrier_stick_forever() {
    let mut grid = Grid::new(50);
    grid.span_row(4, Barrier::new(4).into());
    grid.set(5, 10, Seeker::new(true).into());
    grid.set(3, 30, Bouncer::new(true, Heading::new(-1, 1).expect("heading")).into());

    let report = grid.step();
    assert_eq!(report.newly_stuck, 2);
    assert_eq!(report.moved, 0);

    for _ in 0..40 {
        grid.step();
    }
    let seeker = grid.get(5, 10).expect("seeker pinned");
    assert_eq!(seeker.kind(), AgentKind::Seeker);
    assert!(seeker.is_stuck());
    let bouncer = grid.get(3, 30).expect("bouncer pinned");
    assert_eq!(bouncer.kind(), AgentKind::Bouncer);
    assert!(bouncer.is_stuck());
    assert_eq!(grid.census().cells(), 2);
}

#[test]
fn placing_onto_a_barrier_is_rejected() {
    let mut world = World::new(GridLifeConfig {
        rng_seed: Some(2),
        scenario: Scenario::Empty,
        ..GridLifeConfig::default()
    })
    .expect("world");
    assert_eq!(world.span_barrier(7), 50);
    let placement = world.place(7, 7, Seeker::new(true).into());
    assert!(matches!(placement, Placement::Blocked(Agent::Seeker(_))));
    assert!(world.grid().get(7, 7).is_some_and(Agent::is_barrier));
}

#[test]
fn bouncer_falls_into_sink() {
    let mut world = World::new(GridLifeConfig {
        rng_seed: Some(3),
        scenario: Scenario::Empty,
        ..GridLifeConfig::default()
    })
    .expect("world");
    assert_eq!(world.span_sink(10), 50);
    let down = Heading::new(1, 0).expect("heading");
    world.place(8, 3, Bouncer::new(true, down).into());

    let first = world.step();
    assert_eq!(first.report.moved, 1);
    assert!(world.grid().get(9, 3).is_some());

    let second = world.step();
    assert_eq!(second.report.consumed, 1);
    assert_eq!(second.census.bouncers, 0);
    assert_eq!(second.census.sinks, 50);
    assert!(world.grid().get(9, 3).is_none());

    assert_eq!(
        world.place(10, 4, Oscillator::new(true).into()),
        Placement::Consumed
    );
}

#[test]
fn earlier_mover_wins_a_contested_cell() {
    let mut grid = Grid::new(20);
    let right = Heading::new(0, 1).expect("heading");
    let left = Heading::new(0, -1).expect("heading");
    grid.set(6, 4, Bouncer::new(true, right).into());
    grid.set(6, 6, Bouncer::new(true, left).into());

    let report = grid.step();
    assert_eq!(report.moved, 1);
    assert_eq!(report.conflicts, 1);
    assert!(grid.is_empty(6, 4));
    assert!(grid.get(6, 5).is_some());
    assert!(grid.get(6, 6).is_some());
    assert_eq!(grid.population(), 2);
}

#[test]
fn showcase_conserves_cells_without_sinks() {
    let mut world = World::new(GridLifeConfig {
        rng_seed: Some(0xDEADBEEF),
        ..GridLifeConfig::default()
    })
    .expect("world");
    let initial = world.grid().census();
    for _ in 0..200 {
        let summary = world.step();
        assert_eq!(summary.census.cells(), initial.cells());
        assert_eq!(summary.census.total(), initial.total());
        assert_eq!(summary.census.barriers, initial.barriers);
        assert_eq!(summary.report.consumed, 0);
    }
    assert_eq!(world.tick(), Tick(200));
}

#[test]
fn seeded_worlds_advance_deterministically() {
    let config = GridLifeConfig {
        rng_seed: Some(0x5EED),
        ..GridLifeConfig::default()
    };
    let mut world_a = World::new(config.clone()).expect("world_a");
    let mut world_b = World::new(config).expect("world_b");
    assert_eq!(world_a.grid().snapshot(), world_b.grid().snapshot());

    for _ in 0..64 {
        let a = world_a.step();
        let b = world_b.step();
        assert_eq!(a, b);
    }
    assert_eq!(world_a.grid(), world_b.grid());
    assert_eq!(world_a.grid().snapshot(), world_b.grid().snapshot());
}

#[test]
fn snapshots_serialize_for_renderers() {
    let mut grid = Grid::new(4);
    grid.set(1, 2, Seeker::new(false).into());
    let json = serde_json::to_value(grid.snapshot()).expect("serialize snapshot");
    assert_eq!(json[0]["kind"], "seeker");
    assert_eq!(json[0]["coord"]["row"], 1);
    assert_eq!(json[0]["lifecycle"], "Inactive");
}
