//! Per-entity-type gameplay systems
//!
//! One system per entity type, each owning an arena of per-entity structs
//! with stable keys plus the registry handles for their colliders. Every
//! system runs a move → collide pass once per frame and exposes the
//! transform matrices a host renderer would draw.

pub mod doors;
pub mod enemies;
pub mod fireballs;
pub mod obstacles;
pub mod player;
pub mod powerups;

pub use doors::DoorSystem;
pub use enemies::EnemySystem;
pub use fireballs::FireballSystem;
pub use obstacles::ObstacleSystem;
pub use player::PlayerSystem;
pub use powerups::PowerUpSystem;
