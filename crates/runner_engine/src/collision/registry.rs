//! Handle-based collision registry
//!
//! Process-wide table mapping opaque handles to axis-aligned box colliders.
//! The registry is the sole owner of collider state: gameplay systems keep
//! [`ColliderHandle`]s and go through the accessors here for every read and
//! write. Unlike a global singleton, the registry is an explicit context
//! object owned by the frame loop and passed to each system.
//!
//! Lookups on a removed handle are deliberately lenient: entities are
//! destroyed between frames by other systems, so `update` on a stale
//! handle is a silent no-op and the read accessors return `None` rather
//! than a sentinel pose.

use slotmap::{new_key_type, SlotMap};

use crate::collision::bounds::Aabb;
use crate::foundation::math::{Mat4, Vec3};

new_key_type! {
    /// Opaque identifier for one registered collider
    ///
    /// Versioned key: unique while live, and never resurrected after
    /// removal, so a stale handle can never alias a newer collider.
    pub struct ColliderHandle;
}

/// One registered axis-aligned box collider
///
/// Owned exclusively by the registry and mutated only through
/// [`CollisionRegistry::update`].
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    /// Center of the box in world space
    pub center: Vec3,
    /// Full extent along each axis
    pub size: Vec3,
    /// Whether this collider belongs to the player
    pub is_player: bool,
}

/// Table of live colliders keyed by [`ColliderHandle`]
#[derive(Default)]
pub struct CollisionRegistry {
    colliders: SlotMap<ColliderHandle, Collider>,
    player: Option<ColliderHandle>,
}

impl CollisionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new box collider and return its handle
    ///
    /// At most one player collider is tracked at a time; registering a
    /// second one with `is_player` takes over the player slot.
    pub fn register(&mut self, center: Vec3, size: Vec3, is_player: bool) -> ColliderHandle {
        let handle = self.colliders.insert(Collider {
            center,
            size,
            is_player,
        });
        if is_player {
            self.player = Some(handle);
        }
        log::debug!(
            "registered collider at ({:.2}, {:.2}, {:.2}), {} live",
            center.x,
            center.y,
            center.z,
            self.colliders.len()
        );
        handle
    }

    /// Replace the stored box for `handle`
    ///
    /// Silent no-op if the handle is stale; the entity may have been
    /// removed by another system earlier in the frame.
    pub fn update(&mut self, handle: ColliderHandle, center: Vec3, size: Vec3) {
        if let Some(collider) = self.colliders.get_mut(handle) {
            collider.center = center;
            collider.size = size;
        }
    }

    /// Remove a collider
    ///
    /// Subsequent `update`/`matrix`/`bounds` calls on the handle are safe
    /// no-ops. Removing the handle twice is also a no-op.
    pub fn remove(&mut self, handle: ColliderHandle) {
        if self.player == Some(handle) {
            self.player = None;
        }
        self.colliders.remove(handle);
    }

    /// The stored collider, if the handle is live
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Stored pose for `handle` as a translation × scale matrix
    ///
    /// Returns `None` for a stale handle. There is no sentinel pose: a
    /// collider legitimately sitting at the origin with unit size is fully
    /// distinguishable from "not found".
    pub fn matrix(&self, handle: ColliderHandle) -> Option<Mat4> {
        self.colliders.get(handle).map(|collider| {
            Mat4::new_translation(&collider.center) * Mat4::new_nonuniform_scaling(&collider.size)
        })
    }

    /// Current bounds for `handle`, tagged with the source handle
    pub fn bounds(&self, handle: ColliderHandle) -> Option<Aabb> {
        self.colliders
            .get(handle)
            .map(|collider| Aabb::from_collider(collider.center, collider.size, handle))
    }

    /// Handle of the live player collider, if one is registered
    pub fn player(&self) -> Option<ColliderHandle> {
        self.player
    }

    /// Iterate over every live collider
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter()
    }

    /// Whether `handle` refers to a live collider
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains_key(handle)
    }

    /// Number of live colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the registry holds no colliders
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_register_then_matrix_returns_registered_pose() {
        let mut registry = CollisionRegistry::new();
        let handle = registry.register(Vec3::new(3.0, 1.0, -2.0), Vec3::new(1.0, 2.0, 1.0), false);

        let matrix = registry.matrix(handle).unwrap();
        let expected = Mat4::new_translation(&Vec3::new(3.0, 1.0, -2.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 2.0, 1.0));
        assert_relative_eq!(matrix, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_remove_then_lookups_return_none() {
        let mut registry = CollisionRegistry::new();
        let handle = registry.register(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), false);

        registry.remove(handle);

        assert!(registry.matrix(handle).is_none());
        assert!(registry.bounds(handle).is_none());
        assert!(!registry.contains(handle));
        // Double remove is safe
        registry.remove(handle);
    }

    #[test]
    fn test_update_on_removed_handle_is_noop() {
        let mut registry = CollisionRegistry::new();
        let stale = registry.register(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), false);
        let kept = registry.register(Vec3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0), false);
        registry.remove(stale);

        registry.update(stale, Vec3::new(9.0, 9.0, 9.0), Vec3::new(2.0, 2.0, 2.0));

        assert_eq!(registry.len(), 1);
        assert!(registry.matrix(stale).is_none());
        assert_relative_eq!(registry.get(kept).unwrap().center.x, 5.0);
    }

    #[test]
    fn test_update_replaces_box_in_place() {
        let mut registry = CollisionRegistry::new();
        let handle = registry.register(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), false);

        registry.update(handle, Vec3::new(2.0, 3.0, 4.0), Vec3::new(0.5, 0.5, 0.5));

        let bounds = registry.bounds(handle).unwrap();
        assert_relative_eq!(bounds.center, Vec3::new(2.0, 3.0, 4.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.size, Vec3::new(0.5, 0.5, 0.5), epsilon = 1e-6);
        assert_eq!(bounds.source, Some(handle));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registering_n_boxes_yields_n_distinct_handles() {
        let mut registry = CollisionRegistry::new();
        let handles: Vec<_> = (0..32)
            .map(|i| registry.register(Vec3::new(i as f32, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0), false))
            .collect();

        for (i, a) in handles.iter().enumerate() {
            for b in &handles[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(registry.len(), 32);
    }

    #[test]
    fn test_handles_are_not_resurrected_after_removal() {
        let mut registry = CollisionRegistry::new();
        let old = registry.register(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), false);
        registry.remove(old);

        let new = registry.register(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0), false);

        // The slot may be reused, but the versioned handle never matches
        assert_ne!(old, new);
        assert!(registry.matrix(old).is_none());
        assert!(registry.matrix(new).is_some());
    }

    #[test]
    fn test_player_handle_tracking() {
        let mut registry = CollisionRegistry::new();
        assert!(registry.player().is_none());

        let _scenery = registry.register(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), false);
        let player = registry.register(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 2.0, 1.0), true);
        assert_eq!(registry.player(), Some(player));

        registry.remove(player);
        assert!(registry.player().is_none());
    }
}
