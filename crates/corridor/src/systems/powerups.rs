//! Power-up system
//!
//! Pickups scattered one per corridor section, kept clear of obstacles.
//! Touching one applies its effect and consumes it.

use rand::Rng;
use runner_engine::prelude::*;
use slotmap::{new_key_type, SlotMap};

use crate::config::PowerUpConfig;
use crate::game::GameState;
use crate::stage::Stage;
use crate::systems::fireballs::FireballSystem;
use crate::systems::obstacles::ObstacleSystem;

new_key_type! {
    /// Stable key into the power-up arena
    pub struct PowerUpKey;
}

/// What picking up a power-up does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Restore one health
    Health,
    /// Temporary damage immunity
    Invincibility,
    /// Launch a fireball down the corridor
    Fireball,
}

struct PowerUp {
    position: Vec3,
    yaw: f32,
    kind: PowerUpKind,
    collider: ColliderHandle,
}

/// Arena of pickups
pub struct PowerUpSystem {
    powerups: SlotMap<PowerUpKey, PowerUp>,
    config: PowerUpConfig,
}

impl PowerUpSystem {
    /// Create an empty system
    pub fn new(config: PowerUpConfig) -> Self {
        Self {
            powerups: SlotMap::with_key(),
            config,
        }
    }

    /// Spawn up to one power-up per corridor section, clear of obstacles
    ///
    /// Each section gets a bounded number of placement attempts; a section
    /// that never clears the obstacles is skipped.
    pub fn spawn(
        &mut self,
        registry: &mut CollisionRegistry,
        stage: &Stage,
        obstacles: &ObstacleSystem,
        rng: &mut impl Rng,
    ) {
        let clearance = self.config.size * self.config.clearance_factor;
        for section in 0..self.config.count {
            let (start, end) =
                stage.section_span(section, self.config.count, self.config.spawn_padding);

            let mut placed = None;
            for _ in 0..self.config.max_attempts {
                let x = if end > start { rng.gen_range(start..end) } else { start };
                let candidate = Vec3::new(x, stage.ground_y + self.config.height, stage.lane_z);
                if obstacles.is_position_clear(candidate, clearance) {
                    placed = Some(candidate);
                    break;
                }
            }
            let Some(position) = placed else { continue };

            let kind = match rng.gen_range(0..3) {
                0 => PowerUpKind::Health,
                1 => PowerUpKind::Invincibility,
                _ => PowerUpKind::Fireball,
            };
            let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
            self.spawn_at(registry, position, yaw, kind);
        }
        log::info!(
            "spawned {} power-ups (attempted {})",
            self.powerups.len(),
            self.config.count
        );
    }

    /// Insert a single power-up at an explicit position
    pub fn spawn_at(
        &mut self,
        registry: &mut CollisionRegistry,
        position: Vec3,
        yaw: f32,
        kind: PowerUpKind,
    ) -> PowerUpKey {
        let size = Vec3::new(self.config.size, self.config.size, self.config.size);
        let collider = registry.register(position, size, false);
        self.powerups.insert(PowerUp {
            position,
            yaw,
            kind,
            collider,
        })
    }

    /// One frame: sphere pickup test against the player
    pub fn update(
        &mut self,
        registry: &mut CollisionRegistry,
        game: &mut GameState,
        fireballs: &mut FireballSystem,
    ) {
        if !game.is_running() {
            return;
        }
        let Some(player) = registry.player().and_then(|handle| registry.bounds(handle)) else {
            return;
        };
        let player_sphere = BoundingSphere::new(
            player.center,
            player.size.x.max(player.size.y).max(player.size.z) * 0.5,
        );

        let picked: Vec<(PowerUpKey, PowerUpKind)> = self
            .powerups
            .iter()
            .filter(|(_, powerup)| {
                BoundingSphere::new(powerup.position, self.config.size).intersects(&player_sphere)
            })
            .map(|(key, powerup)| (key, powerup.kind))
            .collect();

        for (key, kind) in picked {
            if let Some(powerup) = self.powerups.remove(key) {
                registry.remove(powerup.collider);
            }
            log::info!("picked up {:?}", kind);
            match kind {
                PowerUpKind::Health => game.heal(1),
                PowerUpKind::Invincibility => game.grant_invincibility(),
                PowerUpKind::Fireball => {
                    // Launch just ahead of the player, flying down the corridor
                    let origin = player.center + Vec3::new(1.0, 0.0, 0.0);
                    fireballs.spawn(registry, origin, Vec3::new(1.0, 0.0, 0.0));
                }
            }
        }
    }

    /// Number of live power-ups
    pub fn len(&self) -> usize {
        self.powerups.len()
    }

    /// Render seam: world matrices grouped by kind
    pub fn matrices(&self) -> Vec<(PowerUpKind, Mat4)> {
        self.powerups
            .values()
            .map(|powerup| {
                let transform = Transform {
                    position: powerup.position,
                    rotation: Quat::from_axis_angle(&Vec3::y_axis(), powerup.yaw),
                    scale: Vec3::new(1.0, 1.0, 1.0),
                };
                (powerup.kind, transform.to_matrix())
            })
            .collect()
    }
}
