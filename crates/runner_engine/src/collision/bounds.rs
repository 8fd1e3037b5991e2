//! Bounding volumes and intersection tests
//!
//! An [`Aabb`] is a derived, ephemeral value: computed on demand from a
//! collider's current pose for one overlap test, never stored. The
//! intersection policy is closed-interval on every axis, so boxes that
//! merely touch faces count as overlapping.

use crate::collision::registry::ColliderHandle;
use crate::foundation::math::Vec3;

/// Axis-aligned bounding box described by center and full size
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Center of the box in world space
    pub center: Vec3,
    /// Full extent along each axis (not half extents)
    pub size: Vec3,
    /// Registry handle this box was derived from, if any
    pub source: Option<ColliderHandle>,
}

impl Aabb {
    /// Create a free-standing box not derived from any registered collider
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            size,
            source: None,
        }
    }

    /// Create a box derived from a registered collider
    pub fn from_collider(center: Vec3, size: Vec3, source: ColliderHandle) -> Self {
        Self {
            center,
            size,
            source: Some(source),
        }
    }

    /// Minimum corner of the box
    pub fn min(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    /// Maximum corner of the box
    pub fn max(&self) -> Vec3 {
        self.center + self.size * 0.5
    }

    /// Check if this box overlaps another
    ///
    /// Closed-interval test: the per-axis intervals
    /// `[center - size/2, center + size/2]` must overlap on all three axes,
    /// and exact face contact (`a_max == b_min`) counts as overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        a_max.x >= b_min.x && a_min.x <= b_max.x
            && a_max.y >= b_min.y && a_min.y <= b_max.y
            && a_max.z >= b_min.z && a_min.z <= b_max.z
    }

    /// A copy of this box grown by `padding` along each axis
    ///
    /// Collision checks that want a margin of error pad X and Y but leave
    /// the corridor depth axis alone, so the padding is per-axis.
    pub fn expanded(&self, padding: Vec3) -> Self {
        Self {
            center: self.center,
            size: self.size + padding,
            source: self.source,
        }
    }
}

/// A bounding sphere for distance-based contact tests
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }
}
