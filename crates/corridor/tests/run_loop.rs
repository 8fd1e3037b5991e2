//! End-to-end frame loop test
//!
//! Drives every system against one registry for a whole run, the same way
//! the binary does, and checks that the run settles and the registry
//! bookkeeping stays consistent.

use rand::rngs::StdRng;
use rand::SeedableRng;
use runner_engine::prelude::*;

use corridor::config::GameConfig;
use corridor::game::{GameState, Outcome};
use corridor::stage::Stage;
use corridor::systems::{
    DoorSystem, EnemySystem, FireballSystem, ObstacleSystem, PlayerSystem, PowerUpSystem,
};

struct FinishedRun {
    outcome: Outcome,
    frames: u64,
    registry_len: usize,
    live_entities: usize,
}

fn run_to_completion(seed: u64) -> FinishedRun {
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);

    let stage = Stage::from_config(&config.stage);
    let mut registry = CollisionRegistry::new();
    let mut game = GameState::new(&config.rules);

    let mut player = PlayerSystem::new(&mut registry, &stage, &config.player);
    let mut enemies = EnemySystem::new(config.enemies.clone());
    enemies.spawn(&mut registry, &stage, &mut rng);
    let mut obstacles = ObstacleSystem::new(config.obstacles.clone());
    obstacles.spawn(&mut registry, &stage, &mut rng);
    let mut powerups = PowerUpSystem::new(config.powerups.clone());
    powerups.spawn(&mut registry, &stage, &obstacles, &mut rng);
    let mut fireballs = FireballSystem::new(config.fireballs.clone());
    let mut doors = DoorSystem::new(config.door.clone());
    doors.spawn(&mut registry, &stage);

    let dt = config.sim.timestep;
    let mut frames = 0u64;
    while game.is_running() && frames < config.sim.max_frames {
        game.tick(dt);
        player.advance(&mut registry, dt);
        enemies.update(&mut registry, &mut game, &stage, dt);
        obstacles.update(&registry, &mut game);
        powerups.update(&mut registry, &mut game, &mut fireballs);
        fireballs.update(&mut registry, &stage, &mut enemies, dt);
        doors.update(&registry, &mut game);
        frames += 1;
    }

    // player + door + everything still alive in the arenas
    let live_entities =
        2 + enemies.len() + obstacles.len() + powerups.len() + fireballs.len();

    FinishedRun {
        outcome: game.outcome(),
        frames,
        registry_len: registry.len(),
        live_entities,
    }
}

#[test]
fn test_runs_settle_before_the_frame_cap() {
    for seed in [1, 7, 42] {
        let run = run_to_completion(seed);
        // The match clock guarantees an outcome well before the cap
        assert_ne!(run.outcome, Outcome::Running, "seed {seed}");
        assert!(run.frames < GameConfig::default().sim.max_frames, "seed {seed}");
    }
}

#[test]
fn test_registry_tracks_exactly_the_live_entities() {
    for seed in [1, 7, 42] {
        let run = run_to_completion(seed);
        assert_eq!(run.registry_len, run.live_entities, "seed {seed}");
    }
}

#[test]
fn test_same_seed_same_outcome() {
    let first = run_to_completion(9);
    let second = run_to_completion(9);
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.frames, second.frames);
    assert_eq!(first.registry_len, second.registry_len);
}
