//! Enemy system
//!
//! Enemies patrol a random leg of the corridor, bouncing between their
//! anchor and `anchor + distance * direction`. Contact with the player
//! deals damage on a cooldown; fireballs destroy enemies outright.

use rand::Rng;
use runner_engine::foundation::math::move_towards;
use runner_engine::prelude::*;
use slotmap::{new_key_type, SlotMap};

use crate::config::EnemyConfig;
use crate::game::GameState;
use crate::stage::Stage;

/// Enemies spawn at least this far ahead of the player's start
const SPAWN_AHEAD_OF_PLAYER: f32 = 5.0;

/// Placement attempts before a spawn slot is abandoned
const MAX_SPAWN_ATTEMPTS: usize = 50;

new_key_type! {
    /// Stable key into the enemy arena
    pub struct EnemyKey;
}

/// One patrolling enemy
struct Enemy {
    position: Vec3,
    anchor_x: f32,
    direction: f32,
    patrol_distance: f32,
    collider: ColliderHandle,
}

/// Arena of enemies plus the shared contact cooldown
pub struct EnemySystem {
    enemies: SlotMap<EnemyKey, Enemy>,
    config: EnemyConfig,
    contact_cooldown: f32,
}

impl EnemySystem {
    /// Create an empty system
    pub fn new(config: EnemyConfig) -> Self {
        Self {
            enemies: SlotMap::with_key(),
            config,
            contact_cooldown: 0.0,
        }
    }

    /// Spawn the configured number of enemies ahead of the player
    ///
    /// Positions are rejection-sampled so no two enemies start within
    /// twice the spawn padding of each other; a slot that never clears is
    /// skipped rather than forced.
    pub fn spawn(
        &mut self,
        registry: &mut CollisionRegistry,
        stage: &Stage,
        rng: &mut impl Rng,
    ) {
        let min_x = SPAWN_AHEAD_OF_PLAYER;
        let max_x = stage.max_x - self.config.spawn_padding;
        if min_x >= max_x {
            log::warn!("corridor too short for enemies, none spawned");
            return;
        }

        for _ in 0..self.config.count {
            let mut placed = None;
            for _ in 0..MAX_SPAWN_ATTEMPTS {
                let candidate = Vec3::new(
                    rng.gen_range(min_x..max_x),
                    stage.ground_y + self.config.height,
                    stage.lane_z,
                );
                let too_close = self.enemies.values().any(|enemy| {
                    (candidate - enemy.position).magnitude() < self.config.spawn_padding * 2.0
                });
                if !too_close {
                    placed = Some(candidate);
                    break;
                }
            }
            let Some(position) = placed else { continue };

            let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let patrol_distance = if self.config.max_move_distance > self.config.min_move_distance {
                rng.gen_range(self.config.min_move_distance..self.config.max_move_distance)
            } else {
                self.config.min_move_distance
            };
            self.spawn_at(registry, position, direction, patrol_distance);
        }
        log::info!(
            "spawned {} enemies (attempted {})",
            self.enemies.len(),
            self.config.count
        );
    }

    /// Insert a single enemy with explicit patrol parameters
    pub fn spawn_at(
        &mut self,
        registry: &mut CollisionRegistry,
        position: Vec3,
        direction: f32,
        patrol_distance: f32,
    ) -> EnemyKey {
        let collider = registry.register(position, self.collider_size(), false);
        self.enemies.insert(Enemy {
            position,
            anchor_x: position.x,
            direction,
            patrol_distance,
            collider,
        })
    }

    /// One frame: patrol movement, then player contact
    pub fn update(
        &mut self,
        registry: &mut CollisionRegistry,
        game: &mut GameState,
        stage: &Stage,
        dt: f32,
    ) {
        self.patrol(registry, stage, dt);
        self.check_player_contact(registry, game, dt);
    }

    fn patrol(&mut self, registry: &mut CollisionRegistry, stage: &Stage, dt: f32) {
        let size = self.collider_size();
        for enemy in self.enemies.values_mut() {
            let target_x = enemy.anchor_x + enemy.patrol_distance * enemy.direction;
            let new_x = move_towards(enemy.position.x, target_x, self.config.move_speed * dt);
            if (new_x - target_x).abs() < f32::EPSILON {
                // Leg complete: turn around and re-anchor where we stand
                enemy.direction = -enemy.direction;
                enemy.anchor_x = enemy.position.x;
            }
            enemy.position.x = new_x;
            enemy.position.y = stage.ground_y + self.config.height;
            registry.update(enemy.collider, enemy.position, size);
        }
    }

    fn check_player_contact(
        &mut self,
        registry: &CollisionRegistry,
        game: &mut GameState,
        dt: f32,
    ) {
        self.contact_cooldown = (self.contact_cooldown - dt).max(0.0);
        if self.contact_cooldown > 0.0 || game.is_invincible() || !game.is_running() {
            return;
        }
        let Some(player) = registry.player().and_then(|handle| registry.bounds(handle)) else {
            return;
        };
        let player_sphere = BoundingSphere::new(
            player.center,
            player.size.x.max(player.size.y).max(player.size.z) * 0.5,
        );

        let hit = self.enemies.values().any(|enemy| {
            BoundingSphere::new(enemy.position, self.config.size).intersects(&player_sphere)
        });
        if hit {
            game.take_damage(self.config.damage);
            self.contact_cooldown = self.config.damage_cooldown;
            log::debug!(
                "enemy contact, next damage possible in {:.1}s",
                self.config.damage_cooldown
            );
        }
    }

    /// Destroy the first enemy overlapping the given sphere, if any
    ///
    /// Returns true when something was hit; the caller despawns its own
    /// projectile in that case.
    pub fn take_fireball_hit(
        &mut self,
        registry: &mut CollisionRegistry,
        center: Vec3,
        radius: f32,
    ) -> bool {
        let sphere = BoundingSphere::new(center, radius);
        let hit = self
            .enemies
            .iter()
            .find(|(_, enemy)| {
                BoundingSphere::new(enemy.position, self.config.size).intersects(&sphere)
            })
            .map(|(key, _)| key);

        if let Some(key) = hit {
            if let Some(enemy) = self.enemies.remove(key) {
                registry.remove(enemy.collider);
                log::info!("enemy destroyed by fireball, {} left", self.enemies.len());
                return true;
            }
        }
        false
    }

    /// Number of live enemies
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Whether all enemies are gone
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Render seam: world matrices for every live enemy
    pub fn matrices(&self) -> Vec<Mat4> {
        self.enemies
            .values()
            .map(|enemy| {
                Transform::from_position_uniform_scale(enemy.position, self.config.size)
                    .to_matrix()
            })
            .collect()
    }

    fn collider_size(&self) -> Vec3 {
        Vec3::new(self.config.size, self.config.height, self.config.size)
    }
}
