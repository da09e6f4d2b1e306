//! Layer styling and a host-side model of the point shaders
//!
//! The functions here evaluate the same formulas as `shaders/points.wgsl` in
//! the renderer crate. They pin down the numeric contract of the shaders
//! (sizes never negative, alpha saturated, round footprint) without a GPU.
//! Keep the two in sync.

use glam::{Vec2, Vec3};

use crate::color::Color;
use crate::constants::*;
use crate::population::{PointRecord, PopulationKind};

/// Theme colors of one layer. The alpha channel of `dark` and `light` is the
/// alpha scale applied in that theme; the alpha of `glow_tint` is how far the
/// dark color moves toward the tint at full glow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerStyle {
    pub dark: Color,
    pub light: Color,
    pub glow_tint: Color,
}

impl LayerStyle {
    pub fn for_kind(kind: PopulationKind) -> Self {
        let no_tint = Color::transparent();
        match kind {
            PopulationKind::SphereBack => Self {
                dark: Color::new(1.0, 1.0, 1.0, 0.9),
                light: Color::new(0.0, 0.0, 0.0, 2.5),
                glow_tint: Color::new(0.8, 0.9, 1.0, 0.3),
            },
            // Only the dark-theme alpha is reduced for the front layer.
            PopulationKind::SphereFront => Self {
                dark: Color::new(1.0, 1.0, 1.0, 0.15),
                light: Color::new(0.0, 0.0, 0.0, 2.5),
                glow_tint: Color::new(0.8, 0.9, 1.0, 0.3),
            },
            PopulationKind::Trail => Self {
                dark: Color::new(1.0, 1.0, 1.0, 0.3),
                light: Color::new(0.2, 0.2, 0.2, 0.25),
                glow_tint: no_tint,
            },
            PopulationKind::Ambient => Self {
                dark: Color::new(1.0, 1.0, 1.0, 0.15),
                light: Color::new(0.3, 0.3, 0.3, 0.1),
                glow_tint: no_tint,
            },
        }
    }

    /// Fragment color for a theme branch; alpha is the theme alpha scale
    pub fn color_for(&self, is_dark: bool, glow: f32) -> Color {
        if is_dark {
            let tinted = self.dark.mix(self.glow_tint, glow * self.glow_tint.a);
            tinted.with_alpha(self.dark.a)
        } else {
            self.light
        }
    }
}

/// Vertex stage output
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexOut {
    /// Animated position in the layer's local space
    pub position: Vec3,
    /// Point diameter in logical pixels
    pub size: f32,
    /// Alpha factor from the animation pattern
    pub intensity: f32,
    pub glow: f32,
}

/// GLSL-style `mod`, always non-negative for positive `m`
fn wrap(x: f32, m: f32) -> f32 {
    x.rem_euclid(m)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Dot sphere: breathing radius, wave pattern and glow pulsation
pub fn sphere_vertex(base: Vec3, time: f32) -> VertexOut {
    let wave1 = (time * 0.5 + base.x * 3.0 + base.y * 2.0).sin() * 0.5 + 0.5;
    let wave2 = (time * 0.3 + base.z * 4.0 + base.truncate().length() * 2.0).sin() * 0.5 + 0.5;
    let pattern = wave1 * wave2;

    let radius = base.length();
    let glow = (time * 0.8 + radius * 2.0).sin() * 0.3 + 0.7;
    let breathing = 1.0 + 0.01 * (time * 0.4 + radius * 2.0).sin();

    VertexOut {
        position: base * breathing,
        size: ((2.5 + pattern * 2.0) * glow).max(0.0),
        intensity: (0.4 + pattern * 0.6) * glow,
        glow,
    }
}

/// Trail emitter: loops every `TRAIL_CYCLE` units of life with a fade at both ends
pub fn trail_vertex(point: &PointRecord, time: f32) -> VertexOut {
    let life = wrap(time * TRAIL_TIME_SCALE + point.phase, TRAIL_CYCLE);
    let progress = life / TRAIL_CYCLE;

    let mut position = point.position() + point.velocity() * life;
    position.y -= 0.0001 * life * life;
    position.x += (time * 0.2 + point.phase).sin() * 0.005;

    let fade = if progress < 0.2 {
        progress / 0.2
    } else if progress > 0.8 {
        (1.0 - progress) / 0.2
    } else {
        1.0
    };
    let alpha = fade.clamp(0.0, 1.0);

    VertexOut {
        position,
        size: (1.5 + alpha * 1.5).max(0.0),
        intensity: alpha,
        glow: 0.0,
    }
}

/// Ambient floater: drifts, is pulled toward the sphere, fades with age and
/// distance
pub fn ambient_vertex(point: &PointRecord, time: f32, sphere_center: Vec3) -> VertexOut {
    let life = wrap(time * AMBIENT_TIME_SCALE + point.phase, AMBIENT_CYCLE);

    let mut position = point.position() + point.velocity() * life;

    let to_sphere = sphere_center - position;
    let distance = to_sphere.length();
    let attraction = to_sphere.normalize_or_zero() * (1.0 / (distance + 1.0)) * 0.0008;
    position += attraction * life;

    position.y += (time * 0.2 + point.phase).sin() * 0.01;
    position.x += (time * 0.15 + point.phase).cos() * 0.008;

    let age_fade = 1.0 - life / AMBIENT_CYCLE;
    let distance_fade = 1.0 - smoothstep(2.0, 5.0, distance);
    let alpha = (age_fade * distance_fade).clamp(0.0, 1.0);

    VertexOut {
        position,
        size: (1.0 + alpha * 1.5).max(0.0),
        intensity: alpha,
        glow: 0.0,
    }
}

/// Fragment stage. `offset` is the fragment position relative to the point
/// center, in units of the point diameter. Returns `None` for discarded
/// fragments.
pub fn shade_fragment(
    offset: Vec2,
    vertex: &VertexOut,
    style: &LayerStyle,
    is_dark: bool,
    opacity: f32,
) -> Option<Color> {
    let dist = offset.length();
    if dist > 0.5 {
        return None;
    }

    let color = style.color_for(is_dark, vertex.glow);
    let alpha = ((1.0 - dist * 2.0) * vertex.intensity * opacity * color.a).clamp(0.0, 1.0);
    Some(color.with_alpha(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::generate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TIMES: [f32; 6] = [0.0, 0.003, 1.7, 42.0, 333.3, 10_000.0];

    fn footprint() -> impl Iterator<Item = Vec2> {
        (0..=20).flat_map(|i| {
            (0..=20).map(move |j| Vec2::new(i as f32 / 20.0 - 0.5, j as f32 / 20.0 - 0.5))
        })
    }

    #[test]
    fn test_sizes_never_negative() {
        let mut rng = StdRng::seed_from_u64(5);
        let sphere = generate(PopulationKind::SphereBack, 200, &mut rng);
        let trail = generate(PopulationKind::Trail, 200, &mut rng);
        let ambient = generate(PopulationKind::Ambient, 200, &mut rng);

        for t in TIMES {
            for p in sphere.points() {
                let v = sphere_vertex(p.position(), t);
                assert!(v.size >= 0.0 && v.intensity >= 0.0);
            }
            for p in trail.points() {
                let v = trail_vertex(p, t);
                assert!(v.size >= 1.5 && v.size <= 3.0);
            }
            for p in ambient.points() {
                let v = ambient_vertex(p, t, Vec3::new(-3.7, 0.0, -1.0));
                assert!(v.size >= 1.0 && v.size <= 2.5);
            }
        }
    }

    #[test]
    fn test_fragments_round_and_saturated() {
        let vertex = sphere_vertex(Vec3::new(0.0, 0.0, 1.0), 0.0);
        for kind in PopulationKind::ALL {
            let style = LayerStyle::for_kind(kind);
            for is_dark in [false, true] {
                for offset in footprint() {
                    let shaded = shade_fragment(offset, &vertex, &style, is_dark, 1.0);
                    if offset.length() > 0.5 {
                        assert!(shaded.is_none(), "corner {:?} not discarded", offset);
                    } else {
                        let color = shaded.expect("inside the footprint");
                        assert!((0.0..=1.0).contains(&color.a));
                    }
                }
            }
        }
    }

    #[test]
    fn test_light_sphere_alpha_saturates() {
        // 2.5x alpha scale in light mode would exceed 1.0 near the center.
        let vertex = VertexOut {
            position: Vec3::ZERO,
            size: 4.0,
            intensity: 1.0,
            glow: 1.0,
        };
        let style = LayerStyle::for_kind(PopulationKind::SphereBack);
        let color = shade_fragment(Vec2::ZERO, &vertex, &style, false, 1.0).expect("center");
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_theme_branch_selects_colors() {
        let style = LayerStyle::for_kind(PopulationKind::Trail);
        assert_eq!(style.color_for(true, 0.5), Color::new(1.0, 1.0, 1.0, 0.3));
        assert_eq!(style.color_for(false, 0.5), Color::new(0.2, 0.2, 0.2, 0.25));

        let sphere = LayerStyle::for_kind(PopulationKind::SphereBack);
        let tinted = sphere.color_for(true, 1.0);
        assert!(tinted.r < 1.0 && tinted.b == 1.0);
        assert_eq!(tinted.a, 0.9);
    }

    #[test]
    fn test_front_layer_only_differs_in_dark_alpha() {
        let back = LayerStyle::for_kind(PopulationKind::SphereBack);
        let front = LayerStyle::for_kind(PopulationKind::SphereFront);
        assert_eq!(back.light, front.light);
        assert!(front.dark.a < back.dark.a);
    }

    #[test]
    fn test_trail_loops_instead_of_respawning() {
        let point =
            PointRecord::moving(Vec3::new(0.7, -0.5, 0.0), Vec3::new(0.01, -0.003, 0.0), 0.0);

        let start = trail_vertex(&point, 0.0);
        let looped = trail_vertex(&point, TRAIL_CYCLE / TRAIL_TIME_SCALE);

        assert!((start.position - looped.position).length() < 0.01);
        assert_eq!(start.intensity, 0.0);
        assert!(trail_vertex(&point, 5.0).intensity > 0.99);
    }
}
