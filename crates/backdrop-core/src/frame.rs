//! Reactor state and the immutable per-frame state built from it
//!
//! Reactors write into [`ReactorState`] as events arrive (last write wins).
//! Once per animation tick the driver merges that with its own clock into a
//! [`FrameState`], which is handed by value to the renderer. Placement and
//! opacity are therefore recomputed at most once per frame no matter how many
//! scroll or resize events arrived in between.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::config::BackdropConfig;
use crate::placement::{compute_placement, Placement};
use crate::population::PopulationKind;
use crate::reactors::{
    opacity_multiplier, scroll_opacity, scroll_zoom, PageScroll, ScrollInput, Theme, ThemeState,
};

/// Drawable size of the mount surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Physical pixels
    pub width: u32,
    pub height: u32,
    /// Physical pixels per logical pixel
    pub scale_factor: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f32) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Height in logical pixels, the unit scroll offsets are measured in
    pub fn logical_height(&self) -> f32 {
        self.height as f32 / self.scale_factor.max(f32::EPSILON)
    }
}

/// Latest outputs of the resize, scroll and theme reactors
#[derive(Clone, Debug)]
pub struct ReactorState {
    viewport: Viewport,
    page: PageScroll,
    theme: ThemeState,
}

impl ReactorState {
    pub fn new(viewport: Viewport, theme: ThemeState) -> Self {
        Self {
            viewport,
            page: PageScroll::new(),
            theme,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f32 {
        self.page.offset()
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeState {
        &mut self.theme
    }

    /// Record a new surface size. Zero-sized viewports (minimised windows)
    /// are ignored so the aspect ratio stays valid. Returns whether the size
    /// was accepted.
    pub fn on_resize(&mut self, width: u32, height: u32, config: &BackdropConfig) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.viewport.width = width;
        self.viewport.height = height;
        self.page.reclamp(self.viewport.logical_height(), &config.scroll);
        true
    }

    /// A new scale factor changes the logical page height, so the scroll
    /// offset is clamped again.
    pub fn on_scale_factor(&mut self, scale_factor: f32, config: &BackdropConfig) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.viewport.scale_factor = scale_factor;
            self.page.reclamp(self.viewport.logical_height(), &config.scroll);
        }
    }

    pub fn on_scroll(&mut self, input: ScrollInput, config: &BackdropConfig) -> f32 {
        self.page.apply(input, self.viewport.logical_height(), &config.scroll)
    }
}

/// Per-layer transform and opacity for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerFrame {
    pub kind: PopulationKind,
    pub position: Vec3,
    pub scale: f32,
    /// Euler rotation about X then Y, radians
    pub rotation: Vec2,
    pub opacity: f32,
}

impl LayerFrame {
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

/// Driver-owned animation clock
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    pub elapsed_time: f32,
    pub back_rotation: Vec2,
    pub front_rotation: Vec2,
    pub ticks: u64,
}

/// Everything the renderer needs for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    pub elapsed_time: f32,
    pub theme: Theme,
    pub viewport: Viewport,
    pub placement: Placement,
    pub scroll_opacity: f32,
    pub zoom: f32,
    layers: [LayerFrame; 4],
}

impl FrameState {
    pub fn compose(clock: &FrameClock, reactors: &ReactorState, config: &BackdropConfig) -> Self {
        let viewport = reactors.viewport();
        let placement = compute_placement(
            viewport.aspect(),
            config.camera.fov_degrees,
            config.camera.distance,
            config.layout.visible_fraction,
        );

        let scroll_y = reactors.scroll_offset();
        let opacity = scroll_opacity(scroll_y, viewport.logical_height(), &config.scroll);
        let zoom = scroll_zoom(scroll_y, &config.scroll);

        let layer = |kind: PopulationKind| LayerFrame {
            kind,
            position: placement.layer_position(kind),
            scale: placement.layer_scale(kind, zoom),
            rotation: match kind {
                PopulationKind::SphereBack => clock.back_rotation,
                PopulationKind::SphereFront => clock.front_rotation,
                PopulationKind::Trail | PopulationKind::Ambient => Vec2::ZERO,
            },
            opacity: opacity * opacity_multiplier(kind),
        };

        Self {
            elapsed_time: clock.elapsed_time,
            theme: reactors.theme().resolved(),
            viewport,
            placement,
            scroll_opacity: opacity,
            zoom,
            layers: [
                layer(PopulationKind::SphereBack),
                layer(PopulationKind::SphereFront),
                layer(PopulationKind::Trail),
                layer(PopulationKind::Ambient),
            ],
        }
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn layer(&self, kind: PopulationKind) -> &LayerFrame {
        &self.layers[kind as usize]
    }

    /// World position the ambient floaters are pulled toward
    pub fn sphere_center(&self) -> Vec3 {
        self.layer(PopulationKind::SphereBack).position
    }
}
