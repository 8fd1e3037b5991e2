//! Obstacle system
//!
//! Static cubes scattered one per corridor section at random heights.
//! Roughly a third are deadly: touching one drains all remaining health.
//! Harmless obstacles are scenery the player can brush against.

use rand::Rng;
use runner_engine::prelude::*;
use slotmap::{new_key_type, SlotMap};

use crate::config::ObstacleConfig;
use crate::game::GameState;
use crate::stage::Stage;

new_key_type! {
    /// Stable key into the obstacle arena
    pub struct ObstacleKey;
}

struct Obstacle {
    position: Vec3,
    deadly: bool,
    collider: ColliderHandle,
}

/// Arena of static obstacles
pub struct ObstacleSystem {
    obstacles: SlotMap<ObstacleKey, Obstacle>,
    config: ObstacleConfig,
}

impl ObstacleSystem {
    /// Create an empty system
    pub fn new(config: ObstacleConfig) -> Self {
        Self {
            obstacles: SlotMap::with_key(),
            config,
        }
    }

    /// Spawn one obstacle per corridor section at a random height
    pub fn spawn(
        &mut self,
        registry: &mut CollisionRegistry,
        stage: &Stage,
        rng: &mut impl Rng,
    ) {
        for section in 0..self.config.count {
            let (start, end) =
                stage.section_span(section, self.config.count, self.config.spawn_padding);
            let x = if end > start {
                rng.gen_range(start..end)
            } else {
                start
            };
            let height = if self.config.max_height > self.config.min_height {
                rng.gen_range(self.config.min_height..self.config.max_height)
            } else {
                self.config.min_height
            };
            let position = Vec3::new(x, stage.ground_y + height, stage.lane_z);
            let deadly = rng.gen_bool(self.config.deadly_chance);
            self.spawn_at(registry, position, deadly);
        }
        log::info!("spawned {} obstacles", self.obstacles.len());
    }

    /// Insert a single obstacle at an explicit position
    pub fn spawn_at(
        &mut self,
        registry: &mut CollisionRegistry,
        position: Vec3,
        deadly: bool,
    ) -> ObstacleKey {
        let size = Vec3::new(self.config.size, self.config.size, self.config.size);
        let collider = registry.register(position, size, false);
        self.obstacles.insert(Obstacle {
            position,
            deadly,
            collider,
        })
    }

    /// One frame: padded AABB test of every obstacle against the player
    ///
    /// Deadly overlap drains all remaining health (instant kill, still
    /// gated by invincibility); harmless overlap does nothing.
    pub fn update(&self, registry: &CollisionRegistry, game: &mut GameState) {
        if !game.is_running() {
            return;
        }
        let Some(player) = registry.player().and_then(|handle| registry.bounds(handle)) else {
            return;
        };
        let padding = Vec3::new(self.config.collision_padding, self.config.collision_padding, 0.0);
        let player = player.expanded(padding);

        for obstacle in self.obstacles.values() {
            if !obstacle.deadly {
                continue;
            }
            let bounds = Aabb::new(
                obstacle.position,
                Vec3::new(self.config.size, self.config.size, self.config.size),
            )
            .expanded(padding);
            if player.intersects(&bounds) {
                let remaining = game.health();
                game.take_damage(remaining);
                break;
            }
        }
    }

    /// Sphere clearance query used when placing power-ups
    pub fn is_position_clear(&self, position: Vec3, radius: f32) -> bool {
        let probe = BoundingSphere::new(position, radius);
        !self.obstacles.values().any(|obstacle| {
            BoundingSphere::new(obstacle.position, self.config.size).intersects(&probe)
        })
    }

    /// Number of live obstacles
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Render seam: world matrices split into (harmless, deadly) batches
    pub fn matrices(&self) -> (Vec<Mat4>, Vec<Mat4>) {
        let mut harmless = Vec::new();
        let mut deadly = Vec::new();
        for obstacle in self.obstacles.values() {
            let matrix = Transform::from_position_uniform_scale(obstacle.position, self.config.size)
                .to_matrix();
            if obstacle.deadly {
                deadly.push(matrix);
            } else {
                harmless.push(matrix);
            }
        }
        (harmless, deadly)
    }
}
