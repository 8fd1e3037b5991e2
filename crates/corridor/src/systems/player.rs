//! Player system
//!
//! Owns the single player collider. Movement here is the auto-runner
//! baseline: the player advances along +X every frame; input layers are a
//! host concern. Other systems never touch this struct — they find the
//! player through [`CollisionRegistry::player`] and its bounds accessor.

use runner_engine::prelude::*;

use crate::config::PlayerConfig;
use crate::stage::Stage;

/// The player's collider, pose, and run speed
pub struct PlayerSystem {
    handle: ColliderHandle,
    position: Vec3,
    size: Vec3,
    run_speed: f32,
}

impl PlayerSystem {
    /// Register the player at the start of the corridor
    pub fn new(registry: &mut CollisionRegistry, stage: &Stage, config: &PlayerConfig) -> Self {
        let size = Vec3::from(config.size);
        let position = Vec3::new(0.0, stage.ground_y + size.y * 0.5, stage.lane_z);
        let handle = registry.register(position, size, true);
        Self {
            handle,
            position,
            size,
            run_speed: config.run_speed,
        }
    }

    /// Run forward along the corridor
    ///
    /// `max_x` bounds spawning, not movement: the exit door sits past the
    /// farthest spawned object, so the player must be able to run beyond
    /// the spawn range to reach it.
    pub fn advance(&mut self, registry: &mut CollisionRegistry, dt: f32) {
        self.position.x += self.run_speed * dt;
        registry.update(self.handle, self.position, self.size);
    }

    /// The player's registry handle
    pub fn handle(&self) -> ColliderHandle {
        self.handle
    }

    /// Current collider center
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Render seam: the player's world matrix
    pub fn matrix(&self) -> Mat4 {
        Transform {
            position: self.position,
            scale: self.size,
            ..Transform::identity()
        }
        .to_matrix()
    }
}
