//! Responsive sphere placement
//!
//! The sphere is sized from the visible world extent at the camera distance so
//! that the same fraction of it shows on every aspect ratio. Everything here
//! is a closed-form function of the viewport; nothing is cached.

use glam::Vec3;

use crate::constants::*;
use crate::population::PopulationKind;

/// World-space sphere size and anchor for one viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub world_height: f32,
    pub world_width: f32,
    /// Radius of the back sphere
    pub radius: f32,
    /// X coordinate shared by every layer
    pub left_x: f32,
}

/// Compute the back-sphere placement for a viewport.
///
/// `aspect` must be positive and finite; callers keep the last good aspect
/// when the window reports a degenerate size.
pub fn compute_placement(
    aspect: f32,
    fov_degrees: f32,
    camera_distance: f32,
    visible_fraction: f32,
) -> Placement {
    let world_height = 2.0 * (fov_degrees.to_radians() / 2.0).tan() * camera_distance;
    let world_width = world_height * aspect;

    // `visible_fraction` of the diameter should span the desired width.
    let desired_visible_width = world_width * visible_fraction;
    let diameter = desired_visible_width / visible_fraction;
    let radius = diameter / 2.0;

    // Push the left edge slightly past the screen edge.
    let left_x = -world_width * 0.5 + radius * LEFT_EDGE_OVERHANG;

    Placement {
        world_height,
        world_width,
        radius,
        left_x,
    }
}

/// Scale ratio and depth of a layer relative to the back sphere
pub fn layer_anchor(kind: PopulationKind) -> (f32, f32) {
    match kind {
        PopulationKind::SphereBack => (BACK_SCALE_RATIO, BACK_DEPTH),
        PopulationKind::SphereFront => (FRONT_SCALE_RATIO, FRONT_DEPTH),
        PopulationKind::Trail => (TRAIL_SCALE_RATIO, TRAIL_DEPTH),
        PopulationKind::Ambient => (AMBIENT_SCALE_RATIO, AMBIENT_DEPTH),
    }
}

impl Placement {
    /// Uniform scale of a layer, including the scroll zoom multiplier
    pub fn layer_scale(&self, kind: PopulationKind, zoom: f32) -> f32 {
        let (ratio, _) = layer_anchor(kind);
        self.radius * ratio * zoom
    }

    /// World position of a layer; all layers lock to `left_x`
    pub fn layer_position(&self, kind: PopulationKind) -> Vec3 {
        let (_, depth) = layer_anchor(kind);
        Vec3::new(self.left_x, 0.0, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(aspect: f32) -> Placement {
        compute_placement(aspect, 60.0, 4.0, 0.65)
    }

    #[test]
    fn test_full_hd_closed_form() {
        let p = place(1920.0 / 1080.0);

        let world_height = 2.0 * 30.0_f32.to_radians().tan() * 4.0;
        let world_width = world_height * 16.0 / 9.0;
        let radius = (world_width * 0.65) / 0.65 / 2.0;

        assert!((p.world_height - 4.618802).abs() < 1e-4);
        assert!((p.world_width - world_width).abs() < 1e-4);
        assert!((p.world_width - 8.211204).abs() < 1e-4);
        assert!((p.radius - radius).abs() < 1e-4);
        assert!((p.radius - 4.105602).abs() < 1e-4);
        assert!((p.left_x - (-world_width / 2.0 + radius * 0.1)).abs() < 1e-4);
    }

    #[test]
    fn test_radius_positive_for_any_aspect() {
        for aspect in [1e-3, 0.25, 0.5625, 1.0, 1.7778, 3.0, 21.0 / 9.0, 50.0] {
            assert!(place(aspect).radius > 0.0, "aspect {}", aspect);
        }
    }

    #[test]
    fn test_placement_is_continuous() {
        let mut aspect = 0.3;
        while aspect < 4.0 {
            let a = place(aspect);
            let b = place(aspect + 1e-3);
            assert!((a.radius - b.radius).abs() < 1e-2);
            assert!((a.left_x - b.left_x).abs() < 1e-2);
            aspect += 0.01;
        }
    }

    #[test]
    fn test_layer_ratios_and_anchor() {
        let p = place(1.5);

        assert_eq!(p.layer_scale(PopulationKind::SphereBack, 1.0), p.radius);
        assert!((p.layer_scale(PopulationKind::SphereFront, 1.0) - p.radius * 0.92).abs() < 1e-6);
        assert_eq!(p.layer_scale(PopulationKind::Trail, 1.0), p.radius);
        assert!((p.layer_scale(PopulationKind::Ambient, 1.4) - p.radius * 0.8 * 1.4).abs() < 1e-5);

        for kind in PopulationKind::ALL {
            assert_eq!(p.layer_position(kind).x, p.left_x);
        }
        assert_eq!(p.layer_position(PopulationKind::Ambient).z, -3.0);
    }
}
