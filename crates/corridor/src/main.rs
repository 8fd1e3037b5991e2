//! Corridor runner simulation binary
//!
//! Builds the registry, stage, and systems from configuration, then runs
//! the cooperative frame loop at a fixed timestep until the run ends.
//! Rendering is a host concern; the render pass here gathers the instance
//! matrices a renderer would draw and logs the totals.

use rand::rngs::StdRng;
use rand::SeedableRng;
use runner_engine::prelude::*;

use corridor::config::GameConfig;
use corridor::game::{GameState, Outcome};
use corridor::stage::Stage;
use corridor::systems::{
    DoorSystem, EnemySystem, FireballSystem, ObstacleSystem, PlayerSystem, PowerUpSystem,
};

/// How often the render pass logs its instance totals, in frames
const DRAW_LOG_INTERVAL: u64 = 600;

fn main() {
    env_logger::init();

    let config = GameConfig::load_or_default();
    let mut rng = match config.sim.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

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

    log::info!(
        "run started: {} colliders, corridor spawn range ends at x = {:.0}",
        registry.len(),
        stage.max_x
    );

    let dt = config.sim.timestep;
    let mut timer = Timer::new();
    let mut frames = 0u64;

    while game.is_running() && frames < config.sim.max_frames {
        timer.update();
        game.tick(dt);

        // Move and collide, one pass per system in the original order
        player.advance(&mut registry, dt);
        enemies.update(&mut registry, &mut game, &stage, dt);
        obstacles.update(&registry, &mut game);
        powerups.update(&mut registry, &mut game, &mut fireballs);
        fireballs.update(&mut registry, &stage, &mut enemies, dt);
        doors.update(&registry, &mut game);

        // Render pass: gather what the host renderer would draw this frame
        let (harmless, deadly) = obstacles.matrices();
        let mut instances: Vec<Mat4> = vec![player.matrix()];
        instances.extend(enemies.matrices());
        instances.extend(harmless);
        instances.extend(deadly);
        instances.extend(powerups.matrices().into_iter().map(|(_, matrix)| matrix));
        instances.extend(fireballs.matrices());
        instances.extend(doors.matrix(&registry));
        if frames % DRAW_LOG_INTERVAL == 0 {
            log::debug!("frame {}: {} instances to draw", frames, instances.len());
        }

        frames += 1;
    }

    match game.outcome() {
        Outcome::Won => log::info!("run won in {} frames", frames),
        Outcome::Lost(reason) => log::info!("run lost after {} frames: {:?}", frames, reason),
        Outcome::Running => log::warn!("frame cap hit after {} frames", frames),
    }
    log::info!(
        "final state: health {}, {:.0}s on the clock, player at x = {:.1}, {} enemies and {} power-ups left ({:.2}s wall time)",
        game.health(),
        game.time_remaining(),
        player.position().x,
        enemies.len(),
        powerups.len(),
        timer.total_time()
    );
}
