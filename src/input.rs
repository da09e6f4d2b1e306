//! Mapping of window input onto the backdrop reactors

use backdrop_core::{ScrollInput, Theme};
use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

/// Paging keys scroll the virtual page like a browser would
pub fn scroll_for_key(key: KeyCode) -> Option<ScrollInput> {
    match key {
        KeyCode::ArrowUp => Some(ScrollInput::Lines(1.0)),
        KeyCode::ArrowDown => Some(ScrollInput::Lines(-1.0)),
        KeyCode::PageUp => Some(ScrollInput::PageUp),
        KeyCode::PageDown | KeyCode::Space => Some(ScrollInput::PageDown),
        KeyCode::Home => Some(ScrollInput::Top),
        KeyCode::End => Some(ScrollInput::Bottom),
        _ => None,
    }
}

/// Wheel deltas; pixel deltas arrive in physical pixels
pub fn scroll_for_wheel(delta: MouseScrollDelta, scale_factor: f64) -> ScrollInput {
    match delta {
        MouseScrollDelta::LineDelta(_x, y) => ScrollInput::Lines(y),
        MouseScrollDelta::PixelDelta(pos) => {
            ScrollInput::Pixels((pos.y / scale_factor.max(f64::EPSILON)) as f32)
        }
    }
}

/// Unknown OS theme falls back to dark, the page default
pub fn theme_from_window(theme: Option<winit::window::Theme>) -> Theme {
    match theme {
        Some(winit::window::Theme::Light) => Theme::Light,
        Some(winit::window::Theme::Dark) | None => Theme::Dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_paging_keys() {
        assert_eq!(scroll_for_key(KeyCode::PageDown), Some(ScrollInput::PageDown));
        assert_eq!(scroll_for_key(KeyCode::Home), Some(ScrollInput::Top));
        assert_eq!(scroll_for_key(KeyCode::End), Some(ScrollInput::Bottom));
        assert_eq!(scroll_for_key(KeyCode::ArrowDown), Some(ScrollInput::Lines(-1.0)));
        assert_eq!(scroll_for_key(KeyCode::KeyT), None);
    }

    #[test]
    fn test_pixel_wheel_is_logical() {
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -120.0));
        assert_eq!(scroll_for_wheel(delta, 2.0), ScrollInput::Pixels(-60.0));

        let lines = MouseScrollDelta::LineDelta(0.0, 3.0);
        assert_eq!(scroll_for_wheel(lines, 2.0), ScrollInput::Lines(3.0));
    }

    #[test]
    fn test_unknown_os_theme_is_dark() {
        assert_eq!(theme_from_window(None), Theme::Dark);
        assert_eq!(theme_from_window(Some(winit::window::Theme::Light)), Theme::Light);
    }
}
