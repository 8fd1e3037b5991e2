//! Fireball system
//!
//! Short-lived projectiles launched by the fireball power-up. A fireball
//! flies in a straight line until it burns out, leaves the stage, or hits
//! an enemy.

use runner_engine::prelude::*;
use slotmap::{new_key_type, SlotMap};

use crate::config::FireballConfig;
use crate::stage::Stage;
use crate::systems::enemies::EnemySystem;

new_key_type! {
    /// Stable key into the fireball arena
    pub struct FireballKey;
}

struct Fireball {
    position: Vec3,
    direction: Vec3,
    time_remaining: f32,
    collider: ColliderHandle,
}

/// Arena of in-flight fireballs
pub struct FireballSystem {
    fireballs: SlotMap<FireballKey, Fireball>,
    config: FireballConfig,
}

impl FireballSystem {
    /// Create an empty system
    pub fn new(config: FireballConfig) -> Self {
        Self {
            fireballs: SlotMap::with_key(),
            config,
        }
    }

    /// Launch a fireball from `origin` along `direction`
    ///
    /// The spawn point is lifted by the configured height offset and the
    /// direction is normalized.
    pub fn spawn(
        &mut self,
        registry: &mut CollisionRegistry,
        origin: Vec3,
        direction: Vec3,
    ) -> FireballKey {
        let position = origin + Vec3::new(0.0, self.config.spawn_height, 0.0);
        let size = Vec3::new(self.config.size, self.config.size, self.config.size);
        let collider = registry.register(position, size, false);
        log::debug!("fireball launched from ({:.2}, {:.2}, {:.2})", position.x, position.y, position.z);
        self.fireballs.insert(Fireball {
            position,
            direction: direction.normalize(),
            time_remaining: self.config.lifetime,
            collider,
        })
    }

    /// One frame: flight, stage-bounds culling, enemy hits, burn-out
    pub fn update(
        &mut self,
        registry: &mut CollisionRegistry,
        stage: &Stage,
        enemies: &mut EnemySystem,
        dt: f32,
    ) {
        let size = Vec3::new(self.config.size, self.config.size, self.config.size);
        let mut expired = Vec::new();

        for (key, fireball) in &mut self.fireballs {
            fireball.position += fireball.direction * self.config.speed * dt;
            fireball.time_remaining -= dt;
            registry.update(fireball.collider, fireball.position, size);

            let out_of_stage = fireball.position.x > stage.max_x + self.config.cull_margin
                || fireball.position.x < -self.config.cull_margin;
            if out_of_stage || fireball.time_remaining <= 0.0 {
                expired.push(key);
            }
        }

        // Enemy hits, handled after flight so the contact uses this frame's position
        let hits: Vec<FireballKey> = self
            .fireballs
            .iter()
            .filter(|(key, fireball)| {
                !expired.contains(key)
                    && enemies.take_fireball_hit(registry, fireball.position, self.config.size)
            })
            .map(|(key, _)| key)
            .collect();

        for key in expired.into_iter().chain(hits) {
            if let Some(fireball) = self.fireballs.remove(key) {
                registry.remove(fireball.collider);
            }
        }
    }

    /// Number of in-flight fireballs
    pub fn len(&self) -> usize {
        self.fireballs.len()
    }

    /// Whether no fireballs are in flight
    pub fn is_empty(&self) -> bool {
        self.fireballs.is_empty()
    }

    /// Render seam: world matrices for every in-flight fireball
    pub fn matrices(&self) -> Vec<Mat4> {
        self.fireballs
            .values()
            .map(|fireball| {
                Transform::from_position_uniform_scale(fireball.position, self.config.size)
                    .to_matrix()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyConfig;
    use approx::assert_relative_eq;

    fn stage() -> Stage {
        Stage {
            ground_y: 0.0,
            max_x: 100.0,
            lane_z: 0.0,
        }
    }

    #[test]
    fn test_spawn_lifts_and_normalizes() {
        let mut registry = CollisionRegistry::new();
        let mut system = FireballSystem::new(FireballConfig::default());

        let key = system.spawn(&mut registry, Vec3::new(5.0, 1.0, 0.0), Vec3::new(2.0, 0.0, 0.0));

        let fireball = &system.fireballs[key];
        assert_relative_eq!(fireball.position.y, 2.5); // 1.0 + default 1.5 offset
        assert_relative_eq!(fireball.direction.magnitude(), 1.0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_flight_advances_position_and_registry() {
        let mut registry = CollisionRegistry::new();
        let mut system = FireballSystem::new(FireballConfig::default());
        let mut enemies = EnemySystem::new(EnemyConfig::default());
        let key = system.spawn(&mut registry, Vec3::new(5.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        system.update(&mut registry, &stage(), &mut enemies, 0.5);

        let fireball = &system.fireballs[key];
        assert_relative_eq!(fireball.position.x, 10.0); // 5 + 10 units/s * 0.5s
        let bounds = registry.bounds(fireball.collider).unwrap();
        assert_relative_eq!(bounds.center.x, 10.0);
    }

    #[test]
    fn test_lifetime_expiry_despawns() {
        let mut registry = CollisionRegistry::new();
        let mut system = FireballSystem::new(FireballConfig {
            speed: 0.0,
            ..FireballConfig::default()
        });
        let mut enemies = EnemySystem::new(EnemyConfig::default());
        system.spawn(&mut registry, Vec3::new(5.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        for _ in 0..7 {
            system.update(&mut registry, &stage(), &mut enemies, 0.5);
        }

        assert!(system.is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_leaving_the_stage_despawns_before_lifetime() {
        let mut registry = CollisionRegistry::new();
        let mut system = FireballSystem::new(FireballConfig {
            speed: 1000.0,
            ..FireballConfig::default()
        });
        let mut enemies = EnemySystem::new(EnemyConfig::default());
        system.spawn(&mut registry, Vec3::new(5.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        system.update(&mut registry, &stage(), &mut enemies, 0.5);

        assert!(system.is_empty());
    }

    #[test]
    fn test_enemy_hit_destroys_both() {
        let mut registry = CollisionRegistry::new();
        let mut system = FireballSystem::new(FireballConfig::default());
        let mut enemies = EnemySystem::new(EnemyConfig::default());
        enemies.spawn_at(&mut registry, Vec3::new(11.0, 2.5, 0.0), 1.0, 3.0);
        // Spawns at y = 2.5, flying straight at the enemy
        system.spawn(&mut registry, Vec3::new(10.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        system.update(&mut registry, &stage(), &mut enemies, 0.05);

        assert!(system.is_empty());
        assert!(enemies.is_empty());
        assert!(registry.is_empty());
    }
}
