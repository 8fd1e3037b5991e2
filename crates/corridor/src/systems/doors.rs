//! Exit door system
//!
//! A single door spawned past the farthest registered object; reaching it
//! wins the run.

use runner_engine::prelude::*;

use crate::config::DoorConfig;
use crate::game::GameState;
use crate::stage::Stage;

struct Door {
    position: Vec3,
    collider: ColliderHandle,
}

/// The one exit door, once spawned
pub struct DoorSystem {
    door: Option<Door>,
    config: DoorConfig,
}

impl DoorSystem {
    /// Create the system with no door spawned yet
    pub fn new(config: DoorConfig) -> Self {
        Self { door: None, config }
    }

    /// Spawn the door past the farthest live collider
    ///
    /// Call after every other system has spawned so the door ends up at
    /// the far end of the populated corridor. Repeat calls are no-ops.
    pub fn spawn(&mut self, registry: &mut CollisionRegistry, stage: &Stage) {
        if self.door.is_some() {
            return;
        }
        let farthest_x = registry
            .iter()
            .map(|(_, collider)| collider.center.x)
            .fold(0.0_f32, f32::max);

        let position = Vec3::new(
            farthest_x + self.config.spawn_distance,
            stage.ground_y + self.config.size * 0.5,
            stage.lane_z,
        );
        let size = Vec3::new(self.config.size, self.config.size, self.config.size);
        let collider = registry.register(position, size, false);
        log::info!("exit door spawned at x = {:.1}", position.x);
        self.door = Some(Door { position, collider });
    }

    /// One frame: padded AABB test of the door against the player
    pub fn update(&self, registry: &CollisionRegistry, game: &mut GameState) {
        let Some(door) = &self.door else { return };
        if !game.is_running() {
            return;
        }
        let Some(player) = registry.player().and_then(|handle| registry.bounds(handle)) else {
            return;
        };

        let padding = Vec3::new(self.config.collision_padding, self.config.collision_padding, 0.0);
        let bounds = Aabb::new(
            door.position,
            Vec3::new(self.config.size, self.config.size, self.config.size),
        )
        .expanded(padding);

        if player.intersects(&bounds) {
            game.reach_exit();
        }
    }

    /// X position of the door, if spawned
    pub fn door_x(&self) -> Option<f32> {
        self.door.as_ref().map(|door| door.position.x)
    }

    /// Render seam: the door's world matrix, if spawned
    pub fn matrix(&self, registry: &CollisionRegistry) -> Option<Mat4> {
        self.door.as_ref().and_then(|door| registry.matrix(door.collider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use approx::assert_relative_eq;

    fn stage() -> Stage {
        Stage {
            ground_y: 0.0,
            max_x: 100.0,
            lane_z: 0.0,
        }
    }

    #[test]
    fn test_door_spawns_past_the_farthest_object() {
        let mut registry = CollisionRegistry::new();
        registry.register(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 2.0, 1.0), true);
        registry.register(Vec3::new(42.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0), false);
        registry.register(Vec3::new(17.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0), false);

        let mut system = DoorSystem::new(DoorConfig::default());
        system.spawn(&mut registry, &stage());

        assert_relative_eq!(system.door_x().unwrap(), 52.0);
        // Resting on the ground
        assert!(system.matrix(&registry).is_some());

        // Second spawn call changes nothing
        system.spawn(&mut registry, &stage());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_reaching_the_door_wins() {
        let mut registry = CollisionRegistry::new();
        let player = registry.register(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 2.0, 1.0), true);
        let mut system = DoorSystem::new(DoorConfig::default());
        system.spawn(&mut registry, &stage());
        let mut game = GameState::new(&RulesConfig::default());

        // Not there yet
        system.update(&registry, &mut game);
        assert!(game.is_running());

        // Walk the player onto the door
        let door_x = system.door_x().unwrap();
        registry.update(player, Vec3::new(door_x, 1.0, 0.0), Vec3::new(1.0, 2.0, 1.0));
        system.update(&registry, &mut game);
        assert_eq!(game.outcome(), crate::game::Outcome::Won);
    }
}
