//! Scroll and theme reactors
//!
//! Reactors only translate page inputs into values. They never render and
//! never touch GPU state; the frame composer reads their latest outputs.

use crate::config::ScrollParams;
use crate::constants::*;
use crate::population::PopulationKind;

/// Opacity of the main layer for a scroll offset.
///
/// Stays at 1.0 until `fade_start_fraction` of the viewport height has been
/// scrolled, then falls linearly to `min_opacity` at `fade_end_fraction`.
pub fn scroll_opacity(scroll_y: f32, viewport_height: f32, params: &ScrollParams) -> f32 {
    let scroll_y = scroll_y.max(0.0);
    let fade_start = viewport_height * params.fade_start_fraction;
    let fade_end = viewport_height * params.fade_end_fraction;

    if scroll_y <= fade_start {
        return 1.0;
    }
    if scroll_y >= fade_end {
        return params.min_opacity;
    }

    let progress = (scroll_y - fade_start) / (fade_end - fade_start);
    (1.0 - progress * (1.0 - params.min_opacity)).clamp(params.min_opacity, 1.0)
}

/// Scale multiplier applied on top of the responsive base scale
pub fn scroll_zoom(scroll_y: f32, params: &ScrollParams) -> f32 {
    let progress = if params.max_zoom_scroll > 0.0 {
        (scroll_y.max(0.0) / params.max_zoom_scroll).min(1.0)
    } else {
        1.0
    };
    params.min_zoom + (params.max_zoom - params.min_zoom) * progress
}

/// How much of the scroll opacity each layer keeps
pub fn opacity_multiplier(kind: PopulationKind) -> f32 {
    match kind {
        PopulationKind::SphereBack => BACK_OPACITY_MULTIPLIER,
        PopulationKind::SphereFront => FRONT_OPACITY_MULTIPLIER,
        PopulationKind::Trail => TRAIL_OPACITY_MULTIPLIER,
        PopulationKind::Ambient => AMBIENT_OPACITY_MULTIPLIER,
    }
}

/// Input that moves the virtual page
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollInput {
    /// Mouse wheel lines; positive scrolls up
    Lines(f32),
    /// Touchpad pixels; positive scrolls up
    Pixels(f32),
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Scroll position over a page several viewports tall
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageScroll {
    offset: f32,
}

impl Default for PageScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl PageScroll {
    pub fn new() -> Self {
        Self { offset: 0.0 }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    fn max_offset(viewport_height: f32, params: &ScrollParams) -> f32 {
        (viewport_height * (params.page_height_viewports - 1.0)).max(0.0)
    }

    /// Apply an input and return the new offset
    pub fn apply(
        &mut self,
        input: ScrollInput,
        viewport_height: f32,
        params: &ScrollParams,
    ) -> f32 {
        let max = Self::max_offset(viewport_height, params);
        let target = match input {
            ScrollInput::Lines(lines) => self.offset - lines * params.pixels_per_line,
            ScrollInput::Pixels(pixels) => self.offset - pixels,
            ScrollInput::PageUp => self.offset - viewport_height,
            ScrollInput::PageDown => self.offset + viewport_height,
            ScrollInput::Top => 0.0,
            ScrollInput::Bottom => max,
        };

        self.offset = if target.is_finite() {
            target.clamp(0.0, max)
        } else {
            self.offset
        };
        self.offset
    }

    /// Re-clamp after the viewport changed size
    pub fn reclamp(&mut self, viewport_height: f32, params: &ScrollParams) {
        self.offset = self.offset.clamp(0.0, Self::max_offset(viewport_height, params));
    }
}

/// Resolved theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// What the user asked for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
    /// Follow the operating system
    System,
}

impl ThemePreference {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" | "auto" => Some(ThemePreference::System),
            _ => None,
        }
    }
}

/// Theme collaborator: an explicit preference plus the last OS theme seen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeState {
    preference: ThemePreference,
    system: Theme,
}

impl ThemeState {
    pub fn new(preference: ThemePreference, system: Theme) -> Self {
        Self { preference, system }
    }

    pub fn resolved(&self) -> Theme {
        match self.preference {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::System => self.system,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.resolved().is_dark()
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Pin an explicit theme. Setting the same theme again is a no-op.
    pub fn set(&mut self, theme: Theme) {
        self.preference = match theme {
            Theme::Light => ThemePreference::Light,
            Theme::Dark => ThemePreference::Dark,
        };
    }

    /// Flip whatever is currently shown
    pub fn toggle(&mut self) -> Theme {
        let next = self.resolved().flipped();
        self.set(next);
        next
    }

    /// Record an OS theme change; only visible while following the system
    pub fn set_system(&mut self, theme: Theme) {
        self.system = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ScrollParams {
        ScrollParams::default()
    }

    #[test]
    fn test_opacity_band() {
        let p = params();
        let h = 1000.0;

        assert_eq!(scroll_opacity(0.0, h, &p), 1.0);
        assert_eq!(scroll_opacity(300.0, h, &p), 1.0);
        assert!((scroll_opacity(550.0, h, &p) - 0.825).abs() < 1e-5);
        assert_eq!(scroll_opacity(800.0, h, &p), 0.65);
        assert_eq!(scroll_opacity(5000.0, h, &p), 0.65);
    }

    #[test]
    fn test_opacity_monotonic_and_clamped() {
        let p = params();
        let h = 1080.0;
        let mut last = scroll_opacity(0.0, h, &p);
        let mut s = 0.0;
        while s < 3000.0 {
            let o = scroll_opacity(s, h, &p);
            assert!(o <= last + 1e-6, "opacity rose at {}", s);
            assert!((0.65..=1.0).contains(&o));
            last = o;
            s += 3.7;
        }
    }

    #[test]
    fn test_opacity_degenerate_viewport() {
        let p = params();
        assert_eq!(scroll_opacity(0.0, 0.0, &p), 1.0);
        assert_eq!(scroll_opacity(10.0, 0.0, &p), 0.65);
        assert_eq!(scroll_opacity(-50.0, 800.0, &p), 1.0);
    }

    #[test]
    fn test_zoom_range() {
        let p = params();
        assert_eq!(scroll_zoom(0.0, &p), 1.0);
        assert!((scroll_zoom(500.0, &p) - 1.2).abs() < 1e-6);
        assert!((scroll_zoom(1000.0, &p) - 1.4).abs() < 1e-6);
        assert!((scroll_zoom(9000.0, &p) - 1.4).abs() < 1e-6);
        assert_eq!(scroll_zoom(-10.0, &p), 1.0);
    }

    #[test]
    fn test_layer_multipliers() {
        assert_eq!(opacity_multiplier(PopulationKind::SphereBack), 1.0);
        assert_eq!(opacity_multiplier(PopulationKind::SphereFront), 0.5);
        assert_eq!(opacity_multiplier(PopulationKind::Trail), 0.7);
        assert_eq!(opacity_multiplier(PopulationKind::Ambient), 0.3);
    }

    #[test]
    fn test_page_scroll_clamps() {
        let p = params();
        let mut page = PageScroll::new();

        assert_eq!(page.apply(ScrollInput::Lines(3.0), 800.0, &p), 0.0);
        assert_eq!(page.apply(ScrollInput::Lines(-2.0), 800.0, &p), 80.0);
        assert_eq!(page.apply(ScrollInput::Pixels(-20.0), 800.0, &p), 100.0);
        assert_eq!(page.apply(ScrollInput::PageDown, 800.0, &p), 900.0);
        assert_eq!(page.apply(ScrollInput::Bottom, 800.0, &p), 3200.0);
        assert_eq!(page.apply(ScrollInput::PageDown, 800.0, &p), 3200.0);
        assert_eq!(page.apply(ScrollInput::Pixels(f32::NAN), 800.0, &p), 3200.0);

        page.reclamp(400.0, &p);
        assert_eq!(page.offset(), 1600.0);

        assert_eq!(page.apply(ScrollInput::Top, 400.0, &p), 0.0);
    }

    #[test]
    fn test_set_dark_is_idempotent() {
        let mut once = ThemeState::new(ThemePreference::Light, Theme::Light);
        once.set(Theme::Dark);
        let mut twice = once;
        twice.set(Theme::Dark);

        assert_eq!(once, twice);
        assert!(twice.is_dark());
    }

    #[test]
    fn test_dark_then_light_restores_light() {
        let original = ThemeState::new(ThemePreference::Light, Theme::Dark);
        let mut state = original;
        state.set(Theme::Dark);
        state.set(Theme::Light);

        assert_eq!(state, original);
        assert_eq!(state.resolved(), Theme::Light);
    }

    #[test]
    fn test_toggle_and_system() {
        let mut state = ThemeState::new(ThemePreference::System, Theme::Light);
        assert!(!state.is_dark());

        state.set_system(Theme::Dark);
        assert!(state.is_dark());

        assert_eq!(state.toggle(), Theme::Light);
        assert_eq!(state.preference(), ThemePreference::Light);

        // Pinned now, so OS changes no longer show through.
        state.set_system(Theme::Light);
        state.set_system(Theme::Dark);
        assert!(!state.is_dark());
    }

    #[test]
    fn test_parse_preference() {
        assert_eq!(ThemePreference::parse(" Dark "), Some(ThemePreference::Dark));
        assert_eq!(ThemePreference::parse("auto"), Some(ThemePreference::System));
        assert_eq!(ThemePreference::parse("sepia"), None);
    }
}
