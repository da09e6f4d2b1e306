//! Particle Backdrop
//!
//! Animated point-cloud background: a rotating dotted sphere pair, trailing
//! emitters and ambient floaters drawn into a transparent window.

mod backdrop;
mod input;

use std::sync::Arc;

use backdrop::{Backdrop, FrameOutcome};
use backdrop_core::BackdropConfig;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Lifecycle of the backdrop layer
enum Layer {
    /// No window yet
    Unmounted,
    Active(Box<Backdrop>),
    /// Setup failed or the GPU was lost; never retried
    Inactive,
}

struct App {
    config: BackdropConfig,
    window: Option<Arc<Window>>,
    layer: Layer,
}

impl App {
    fn new(config: BackdropConfig) -> Self {
        Self {
            config,
            window: None,
            layer: Layer::Unmounted,
        }
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) {
        let window_attributes = Window::default_attributes()
            .with_title("Particle Backdrop")
            .with_transparent(true)
            .with_inner_size(winit::dpi::LogicalSize::new(1920, 1080));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                self.layer = Layer::Inactive;
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        self.layer = match Backdrop::new(window, &self.config) {
            Ok(backdrop) => Layer::Active(Box::new(backdrop)),
            Err(e) => {
                log::warn!("Particle backdrop disabled: {}", e);
                Layer::Inactive
            }
        };
    }

    /// Cancel the animation and release the layer's GPU resources
    fn teardown(&mut self) {
        if let Layer::Active(backdrop) = &mut self.layer {
            backdrop.teardown();
        }
        self.layer = Layer::Inactive;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() && matches!(self.layer, Layer::Unmounted) {
            self.mount(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.teardown();
                event_loop.exit();
                return;
            }
            _ => {}
        }

        // Events before setup, or after the layer went inactive, have nothing to update
        let Layer::Active(backdrop) = &mut self.layer else {
            return;
        };
        let config = &self.config;

        match event {
            WindowEvent::Resized(size) => {
                backdrop
                    .reactors_mut()
                    .on_resize(size.width, size.height, config);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                backdrop
                    .reactors_mut()
                    .on_scale_factor(scale_factor as f32, config);
            }

            WindowEvent::ThemeChanged(theme) => {
                let theme = input::theme_from_window(Some(theme));
                log::debug!("System theme changed to {:?}", theme);
                backdrop.reactors_mut().theme_mut().set_system(theme);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scale = backdrop.reactors().viewport().scale_factor as f64;
                backdrop
                    .reactors_mut()
                    .on_scroll(input::scroll_for_wheel(delta, scale), config);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat,
                        ..
                    },
                ..
            } => {
                if key_code == KeyCode::KeyT && !repeat {
                    let theme = backdrop.reactors_mut().theme_mut().toggle();
                    log::info!("Theme: {:?}", theme);
                } else if let Some(scroll) = input::scroll_for_key(key_code) {
                    let offset = backdrop.reactors_mut().on_scroll(scroll, config);
                    log::debug!("Scroll offset: {:.0}", offset);
                }
            }

            WindowEvent::RedrawRequested => {
                if backdrop.frame(config) == FrameOutcome::Disabled {
                    log::warn!("GPU context lost, particle backdrop disabled");
                    self.teardown();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting particle backdrop...");

    let config = BackdropConfig::from_env();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
