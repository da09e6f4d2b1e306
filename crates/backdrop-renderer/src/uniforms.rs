//! Per-layer uniform block shared by every point shader

use backdrop_core::{FrameState, LayerFrame, LayerStyle};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Layer uniform for GPU (matches `Layer` in shaders/points.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LayerUniform {
    pub model: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    /// rgb + dark-theme alpha scale
    pub dark_color: [f32; 4],
    /// rgb + light-theme alpha scale
    pub light_color: [f32; 4],
    /// rgb + tint amount at full glow
    pub glow_tint: [f32; 4],
    /// Back sphere position, xyz (w unused)
    pub sphere_center: [f32; 4],
    /// Surface size in physical pixels
    pub viewport: [f32; 2],
    pub time: f32,
    /// 1.0 for dark theme, 0.0 for light
    pub is_dark: f32,
    pub opacity: f32,
    /// Physical pixels per logical pixel, scales point sizes
    pub point_scale: f32,
    pub _padding: [f32; 2],
}

impl LayerUniform {
    pub fn new(
        layer: &LayerFrame,
        style: &LayerStyle,
        frame: &FrameState,
        view_proj: Mat4,
    ) -> Self {
        let center = frame.sphere_center();

        Self {
            model: layer.model_matrix().to_cols_array_2d(),
            view_proj: view_proj.to_cols_array_2d(),
            dark_color: style.dark.to_array(),
            light_color: style.light.to_array(),
            glow_tint: style.glow_tint.to_array(),
            sphere_center: [center.x, center.y, center.z, 0.0],
            viewport: [frame.viewport.width as f32, frame.viewport.height as f32],
            time: frame.elapsed_time,
            is_dark: if frame.is_dark() { 1.0 } else { 0.0 },
            opacity: layer.opacity.clamp(0.0, 1.0),
            point_scale: frame.viewport.scale_factor,
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::{
        BackdropConfig, FrameClock, PopulationKind, ReactorState, Theme, ThemePreference,
        ThemeState, Viewport,
    };

    fn uniform_for(reactors: &ReactorState, kind: PopulationKind) -> LayerUniform {
        let config = BackdropConfig::default();
        let frame = FrameState::compose(&FrameClock::default(), reactors, &config);
        LayerUniform::new(
            frame.layer(kind),
            &LayerStyle::for_kind(kind),
            &frame,
            Mat4::IDENTITY,
        )
    }

    #[test]
    fn test_uniform_size_is_wgsl_aligned() {
        assert_eq!(std::mem::size_of::<LayerUniform>(), 224);
        assert_eq!(std::mem::size_of::<LayerUniform>() % 16, 0);
    }

    #[test]
    fn test_theme_round_trip_restores_uniform() {
        let mut reactors = ReactorState::new(
            Viewport::new(1600, 900, 1.0),
            ThemeState::new(ThemePreference::Light, Theme::Light),
        );
        let original = uniform_for(&reactors, PopulationKind::SphereBack);
        assert_eq!(original.is_dark, 0.0);

        reactors.theme_mut().set(Theme::Dark);
        let dark_once = uniform_for(&reactors, PopulationKind::SphereBack);
        reactors.theme_mut().set(Theme::Dark);
        let dark_twice = uniform_for(&reactors, PopulationKind::SphereBack);
        assert_eq!(dark_once, dark_twice);
        assert_eq!(dark_once.is_dark, 1.0);

        reactors.theme_mut().set(Theme::Light);
        assert_eq!(uniform_for(&reactors, PopulationKind::SphereBack), original);
    }

    #[test]
    fn test_ambient_sees_back_sphere_center() {
        let reactors = ReactorState::new(
            Viewport::new(1920, 1080, 2.0),
            ThemeState::new(ThemePreference::Dark, Theme::Dark),
        );
        let uniform = uniform_for(&reactors, PopulationKind::Ambient);

        assert!(uniform.sphere_center[0] < 0.0);
        assert_eq!(uniform.sphere_center[2], -1.0);
        assert_eq!(uniform.point_scale, 2.0);
        assert_eq!(uniform.viewport, [1920.0, 1080.0]);
        assert!((uniform.opacity - 0.3).abs() < 1e-6);
    }
}
