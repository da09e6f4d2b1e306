//! Point populations and their procedural generation
//!
//! Populations are generated once, uploaded once, and never touched again on
//! the host. All apparent motion (including the "respawn" of trail and ambient
//! points) comes from the shaders looping over elapsed time, so the point
//! count of a population is fixed for the whole session.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::PopulationCounts;
use crate::constants::SPHERE_RADIUS_JITTER;

/// The four layers of the backdrop
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopulationKind {
    /// Main dot sphere, behind the page content
    SphereBack = 0,
    /// Fainter, smaller sphere layer spinning the other way
    SphereFront = 1,
    /// Emitters streaming out of the lower-right of the sphere
    Trail = 2,
    /// Sparse floaters drifting around the sphere
    Ambient = 3,
}

impl PopulationKind {
    /// Every kind, in draw order (farthest layer first)
    pub const ALL: [PopulationKind; 4] = [
        PopulationKind::Ambient,
        PopulationKind::SphereFront,
        PopulationKind::Trail,
        PopulationKind::SphereBack,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PopulationKind::SphereBack => "sphere-back",
            PopulationKind::SphereFront => "sphere-front",
            PopulationKind::Trail => "trail",
            PopulationKind::Ambient => "ambient",
        }
    }

    pub fn is_sphere(self) -> bool {
        matches!(self, PopulationKind::SphereBack | PopulationKind::SphereFront)
    }
}

/// GPU-compatible point record
/// Aligned for the WGSL `Point` storage struct (32 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointRecord {
    /// Base position in the layer's local space
    pub position: [f32; 3],
    /// Time offset seed; shifts where in its loop the point starts
    pub phase: f32,
    /// Drift per unit of shader "life" (zero for sphere points)
    pub velocity: [f32; 3],
    pub _padding: f32,
}

impl PointRecord {
    pub fn fixed(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            phase: 0.0,
            velocity: [0.0; 3],
            _padding: 0.0,
        }
    }

    pub fn moving(position: Vec3, velocity: Vec3, phase: f32) -> Self {
        Self {
            position: position.to_array(),
            phase,
            velocity: velocity.to_array(),
            _padding: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn velocity(&self) -> Vec3 {
        Vec3::from_array(self.velocity)
    }
}

/// A fixed-size set of points sharing one shader program and buffer layout
#[derive(Clone, Debug)]
pub struct PointPopulation {
    kind: PopulationKind,
    points: Vec<PointRecord>,
}

impl PointPopulation {
    pub fn kind(&self) -> PopulationKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    /// Same points, relabelled as another layer
    fn relabel(&self, kind: PopulationKind) -> Self {
        Self {
            kind,
            points: self.points.clone(),
        }
    }
}

/// Generate `count` points for the given layer
pub fn generate<R: Rng + ?Sized>(
    kind: PopulationKind,
    count: usize,
    rng: &mut R,
) -> PointPopulation {
    let points = match kind {
        PopulationKind::SphereBack | PopulationKind::SphereFront => {
            (0..count).map(|_| sphere_point(rng)).collect()
        }
        PopulationKind::Trail => (0..count).map(|_| trail_point(rng)).collect(),
        PopulationKind::Ambient => (0..count).map(|_| ambient_point(rng)).collect(),
    };

    PointPopulation { kind, points }
}

/// Uniform point on the unit sphere with a small radial jitter.
///
/// `theta = acos(2u - 1)` keeps the density uniform in `z`; sampling theta
/// directly would pile points up at the poles.
fn sphere_point<R: Rng + ?Sized>(rng: &mut R) -> PointRecord {
    let theta = (2.0 * rng.random::<f32>() - 1.0).acos();
    let phi = TAU * rng.random::<f32>();
    let r = 1.0 + (rng.random::<f32>() - 0.5) * SPHERE_RADIUS_JITTER;

    PointRecord::fixed(Vec3::new(
        r * theta.sin() * phi.cos(),
        r * theta.sin() * phi.sin(),
        r * theta.cos(),
    ))
}

/// Emitter at the lower-right of the sphere, flowing right and slightly down
fn trail_point<R: Rng + ?Sized>(rng: &mut R) -> PointRecord {
    let radius = 0.9 + rng.random::<f32>() * 0.2;

    let position = Vec3::new(
        radius * 0.7,
        radius * -0.5,
        (rng.random::<f32>() - 0.5) * 0.3,
    );
    let velocity = Vec3::new(
        0.008 + rng.random::<f32>() * 0.004,
        -0.002 - rng.random::<f32>() * 0.002,
        (rng.random::<f32>() - 0.5) * 0.001,
    );
    let phase = rng.random::<f32>() * 400.0;

    PointRecord::moving(position, velocity, phase)
}

/// Floater scattered around a ring 2-5 units out
fn ambient_point<R: Rng + ?Sized>(rng: &mut R) -> PointRecord {
    let angle = rng.random::<f32>() * TAU;
    let radius = 2.0 + rng.random::<f32>() * 3.0;

    let position = Vec3::new(
        angle.cos() * radius + (rng.random::<f32>() - 0.5) * 4.0,
        (rng.random::<f32>() - 0.5) * 4.0,
        angle.sin() * radius + (rng.random::<f32>() - 0.5) * 2.0,
    );
    let velocity = Vec3::new(
        (rng.random::<f32>() - 0.5) * 0.002,
        (rng.random::<f32>() - 0.5) * 0.002,
        (rng.random::<f32>() - 0.5) * 0.001,
    );
    let phase = rng.random::<f32>() * 1000.0;

    PointRecord::moving(position, velocity, phase)
}

/// The four populations of one backdrop
#[derive(Clone, Debug)]
pub struct PopulationSet {
    pub sphere_back: PointPopulation,
    pub sphere_front: PointPopulation,
    pub trail: PointPopulation,
    pub ambient: PointPopulation,
}

impl PopulationSet {
    /// Generate all layers. The front sphere reuses the back sphere's points;
    /// the two layers only differ in transform, rotation and styling.
    pub fn generate<R: Rng + ?Sized>(counts: &PopulationCounts, rng: &mut R) -> Self {
        let sphere_back = generate(PopulationKind::SphereBack, counts.sphere, rng);
        let sphere_front = sphere_back.relabel(PopulationKind::SphereFront);
        let trail = generate(PopulationKind::Trail, counts.trail, rng);
        let ambient = generate(PopulationKind::Ambient, counts.ambient, rng);

        log::info!(
            "✓ Generated populations: {} sphere, {} trail, {} ambient points",
            sphere_back.len(),
            trail.len(),
            ambient.len()
        );

        Self {
            sphere_back,
            sphere_front,
            trail,
            ambient,
        }
    }

    pub fn get(&self, kind: PopulationKind) -> &PointPopulation {
        match kind {
            PopulationKind::SphereBack => &self.sphere_back,
            PopulationKind::SphereFront => &self.sphere_front,
            PopulationKind::Trail => &self.trail,
            PopulationKind::Ambient => &self.ambient,
        }
    }

    pub fn total_points(&self) -> usize {
        PopulationKind::ALL.iter().map(|&k| self.get(k).len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_point_record_layout() {
        assert_eq!(std::mem::size_of::<PointRecord>(), 32);
    }

    #[test]
    fn test_counts_match_request() {
        let mut rng = rng();
        for kind in PopulationKind::ALL {
            for count in [0, 1, 257] {
                let population = generate(kind, count, &mut rng);
                assert_eq!(population.len(), count);
                assert_eq!(population.kind(), kind);
            }
        }
    }

    #[test]
    fn test_sphere_radius_within_jitter_band() {
        let population = generate(PopulationKind::SphereBack, 20_000, &mut rng());

        for point in population.points() {
            let r = point.position().length();
            assert!(
                (0.925 - 1e-5..=1.075 + 1e-5).contains(&r),
                "radius {} outside jitter band",
                r
            );
        }
    }

    #[test]
    fn test_sphere_z_is_uniform() {
        // For a uniform distribution on the sphere, z/r is uniform in [-1, 1].
        const BINS: usize = 10;
        const N: usize = 50_000;

        let population = generate(PopulationKind::SphereBack, N, &mut rng());
        let mut histogram = [0usize; BINS];
        for point in population.points() {
            let p = point.position();
            let z = (p.z / p.length()).clamp(-1.0, 1.0 - f32::EPSILON);
            let bin = (((z + 1.0) * 0.5) * BINS as f32) as usize;
            histogram[bin.min(BINS - 1)] += 1;
        }

        let expected = N as f32 / BINS as f32;
        for (i, &count) in histogram.iter().enumerate() {
            let deviation = (count as f32 - expected).abs() / expected;
            assert!(
                deviation < 0.08,
                "bin {} has {} points, expected ~{}",
                i,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_trail_starts_lower_right_and_flows_right() {
        let population = generate(PopulationKind::Trail, 2_000, &mut rng());

        for point in population.points() {
            let p = point.position();
            let v = point.velocity();
            assert!(p.x > 0.6 && p.x < 0.78);
            assert!(p.y < -0.44 && p.y > -0.56);
            assert!(p.z.abs() <= 0.15);
            assert!(v.x >= 0.008 && v.x <= 0.012);
            assert!(v.y <= -0.002 && v.y >= -0.004);
            assert!((0.0..400.0).contains(&point.phase));
        }
    }

    #[test]
    fn test_ambient_ring_bounds() {
        let population = generate(PopulationKind::Ambient, 2_000, &mut rng());

        for point in population.points() {
            let p = point.position();
            assert!(p.x.abs() <= 7.0);
            assert!(p.y.abs() <= 2.0);
            assert!(p.z.abs() <= 6.0);
            assert!(point.velocity().abs().max_element() <= 0.001);
            assert!((0.0..1000.0).contains(&point.phase));
        }
    }

    #[test]
    fn test_front_sphere_shares_back_points() {
        let counts = PopulationCounts {
            sphere: 500,
            trail: 100,
            ambient: 50,
        };
        let set = PopulationSet::generate(&counts, &mut rng());

        assert_eq!(set.sphere_front.kind(), PopulationKind::SphereFront);
        assert_eq!(set.sphere_front.points(), set.sphere_back.points());
        assert_eq!(set.total_points(), 500 + 500 + 100 + 50);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate(PopulationKind::Ambient, 64, &mut StdRng::seed_from_u64(3));
        let b = generate(PopulationKind::Ambient, 64, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.points(), b.points());
    }
}
