//! Backdrop parameters, grouped by the component that reads them

use crate::constants::*;
use crate::reactors::ThemePreference;

/// Perspective camera setup
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin along +Z
    pub distance: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            distance: CAMERA_DISTANCE,
        }
    }
}

/// Number of points generated per population
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopulationCounts {
    /// Shared by the back and front sphere layers
    pub sphere: usize,
    pub trail: usize,
    pub ambient: usize,
}

impl Default for PopulationCounts {
    fn default() -> Self {
        Self {
            sphere: SPHERE_POINT_COUNT,
            trail: TRAIL_POINT_COUNT,
            ambient: AMBIENT_POINT_COUNT,
        }
    }
}

/// Responsive sphere placement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Fraction of the sphere diameter kept on screen
    pub visible_fraction: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            visible_fraction: VISIBLE_WIDTH_FRACTION,
        }
    }
}

/// Scroll fade and zoom mapping, plus the virtual page the scroll runs over
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollParams {
    pub fade_start_fraction: f32,
    pub fade_end_fraction: f32,
    pub min_opacity: f32,
    pub max_zoom_scroll: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub pixels_per_line: f32,
    pub page_height_viewports: f32,
}

impl Default for ScrollParams {
    fn default() -> Self {
        Self {
            fade_start_fraction: FADE_START_FRACTION,
            fade_end_fraction: FADE_END_FRACTION,
            min_opacity: MIN_SCROLL_OPACITY,
            max_zoom_scroll: MAX_ZOOM_SCROLL,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            pixels_per_line: PIXELS_PER_SCROLL_LINE,
            page_height_viewports: PAGE_HEIGHT_VIEWPORTS,
        }
    }
}

/// Everything the backdrop needs at mount time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropConfig {
    pub camera: CameraParams,
    pub counts: PopulationCounts,
    pub layout: LayoutParams,
    pub scroll: ScrollParams,
    /// Elapsed-time increment per animation tick
    pub time_step: f32,
    pub theme: ThemePreference,
    /// Fixed seed for point generation; random when `None`
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            camera: CameraParams::default(),
            counts: PopulationCounts::default(),
            layout: LayoutParams::default(),
            scroll: ScrollParams::default(),
            time_step: TIME_STEP,
            theme: ThemePreference::default(),
            seed: None,
        }
    }
}

impl BackdropConfig {
    /// Defaults with `BACKDROP_THEME` and `BACKDROP_SEED` applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var("BACKDROP_THEME").ok().as_deref(),
            std::env::var("BACKDROP_SEED").ok().as_deref(),
        )
    }

    /// Apply string overrides. Unparseable values are logged and ignored.
    pub fn with_overrides(mut self, theme: Option<&str>, seed: Option<&str>) -> Self {
        if let Some(raw) = theme {
            match ThemePreference::parse(raw) {
                Some(preference) => self.theme = preference,
                None => log::warn!("Ignoring unknown BACKDROP_THEME value {:?}", raw),
            }
        }

        if let Some(raw) = seed {
            match raw.trim().parse::<u64>() {
                Ok(value) => self.seed = Some(value),
                Err(e) => log::warn!("Ignoring BACKDROP_SEED {:?}: {}", raw, e),
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = BackdropConfig::default();

        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.distance, 4.0);
        assert_eq!(config.layout.visible_fraction, 0.65);
        assert_eq!(config.counts.sphere, 18_000);
        assert_eq!(config.time_step, 0.003);
        assert_eq!(config.theme, ThemePreference::Dark);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_overrides_apply() {
        let config = BackdropConfig::default().with_overrides(Some("light"), Some(" 42 "));

        assert_eq!(config.theme, ThemePreference::Light);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let config = BackdropConfig::default().with_overrides(Some("sepia"), Some("-3"));

        assert_eq!(config, BackdropConfig::default());
    }
}
