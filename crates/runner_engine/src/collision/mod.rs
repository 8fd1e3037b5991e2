//! Collision detection core
//!
//! The registry owns every collider in the game; the bounds module holds
//! the one shared pair of overlap tests (AABB and sphere) that all
//! gameplay systems go through.

pub mod bounds;
pub mod registry;

pub use bounds::{Aabb, BoundingSphere};
pub use registry::{Collider, ColliderHandle, CollisionRegistry};
