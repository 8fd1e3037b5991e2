//! The corridor the run takes place in
//!
//! A flat strip along +X at a fixed Z lane. Spawners divide the strip into
//! equal sections so entities spread along the whole run.

use crate::config::StageConfig;

/// Corridor geometry shared by every spawner
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    /// Y coordinate of the ground plane
    pub ground_y: f32,
    /// Far end of the corridor along X
    pub max_x: f32,
    /// The fixed Z lane every entity lives on
    pub lane_z: f32,
}

impl Stage {
    /// Build from configuration
    pub fn from_config(config: &StageConfig) -> Self {
        Self {
            ground_y: config.ground_y,
            max_x: config.max_x,
            lane_z: config.lane_z,
        }
    }

    /// X range of section `index` out of `count`, inset by `padding`
    ///
    /// Degenerate sections (padding eating the whole span) collapse to
    /// their midpoint so callers can still place something.
    pub fn section_span(&self, index: usize, count: usize, padding: f32) -> (f32, f32) {
        let length = self.max_x / count as f32;
        let start = index as f32 * length;
        let end = start + length;
        if start + padding < end - padding {
            (start + padding, end - padding)
        } else {
            let mid = (start + end) * 0.5;
            (mid, mid)
        }
    }
}
