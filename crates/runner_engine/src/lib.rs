//! # Runner Engine
//!
//! The reusable core under the corridor-runner game: math and frame-timing
//! foundations plus a handle-based collision registry with shared AABB and
//! sphere overlap tests.
//!
//! The registry is an explicit context object. The owning loop creates one
//! and passes it to each gameplay system; systems hold [`ColliderHandle`]s
//! and never touch collider state directly.
//!
//! ```rust
//! use runner_engine::prelude::*;
//!
//! let mut registry = CollisionRegistry::new();
//! let player = registry.register(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 2.0, 1.0), true);
//! let crate_box = registry.register(Vec3::new(0.5, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0), false);
//!
//! let a = registry.bounds(player).unwrap();
//! let b = registry.bounds(crate_box).unwrap();
//! assert!(a.intersects(&b));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod collision;
pub mod foundation;

pub use collision::bounds::{Aabb, BoundingSphere};
pub use collision::registry::{Collider, ColliderHandle, CollisionRegistry};

/// Common imports for engine users
pub mod prelude {
    pub use crate::collision::bounds::{Aabb, BoundingSphere};
    pub use crate::collision::registry::{Collider, ColliderHandle, CollisionRegistry};
    pub use crate::foundation::{
        math::{Mat4, Quat, Transform, Vec3},
        time::Timer,
    };
}
