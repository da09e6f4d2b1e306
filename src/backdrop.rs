//! The mounted backdrop layer: GPU context, renderer, driver and reactors

use std::sync::Arc;

use backdrop_core::{
    AnimationDriver, BackdropConfig, FrameScheduler, PopulationSet, ReactorState, ThemeState,
    Viewport,
};
use backdrop_renderer::{BackdropError, BackdropRenderer, Camera, GpuContext};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::window::Window;

use crate::input::theme_from_window;

/// Schedules frames through the window's redraw request
pub struct RedrawScheduler(pub Arc<Window>);

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// What happened to one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    Skipped,
    /// The GPU is gone; the layer must be torn down and stays off
    Disabled,
}

pub struct Backdrop {
    context: GpuContext,
    renderer: BackdropRenderer,
    camera: Camera,
    driver: AnimationDriver<RedrawScheduler>,
    reactors: ReactorState,
}

impl Backdrop {
    pub fn new(window: Arc<Window>, config: &BackdropConfig) -> Result<Self, BackdropError> {
        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height, window.scale_factor() as f32);
        let theme = ThemeState::new(config.theme, theme_from_window(window.theme()));
        let reactors = ReactorState::new(viewport, theme);

        let context = pollster::block_on(GpuContext::new(
            window.clone(),
            size.width,
            size.height,
        ))?;

        let mut rng = match config.seed {
            Some(seed) => {
                log::info!("Using point seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        let populations = PopulationSet::generate(&config.counts, &mut rng);

        let renderer = BackdropRenderer::new(&context, &populations);
        let camera = Camera::new(size.width, size.height, &config.camera);

        let mut driver = AnimationDriver::new(RedrawScheduler(window), config.time_step);
        driver.start();

        log::info!(
            "✓ Backdrop mounted ({:?} theme)",
            reactors.theme().resolved()
        );

        Ok(Self {
            context,
            renderer,
            camera,
            driver,
            reactors,
        })
    }

    pub fn reactors(&self) -> &ReactorState {
        &self.reactors
    }

    pub fn reactors_mut(&mut self) -> &mut ReactorState {
        &mut self.reactors
    }

    /// Advance one tick and draw it
    pub fn frame(&mut self, config: &BackdropConfig) -> FrameOutcome {
        if self.context.is_lost() {
            return FrameOutcome::Disabled;
        }

        let Some(frame) = self.driver.tick(&self.reactors, config) else {
            return FrameOutcome::Skipped;
        };

        // Resizes are applied here, once per frame
        let viewport = frame.viewport;
        if self.context.size() != (viewport.width, viewport.height) {
            self.context.resize(viewport.width, viewport.height);
            self.camera.resize(viewport.width, viewport.height);
        }

        match self.renderer.render(&self.context, &self.camera, &frame) {
            Ok(()) => FrameOutcome::Drawn,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface stale, reconfiguring");
                self.context.reconfigure();
                FrameOutcome::Skipped
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("Surface timeout, skipping frame");
                FrameOutcome::Skipped
            }
            Err(e) => {
                log::error!("Render error: {:?}", e);
                FrameOutcome::Disabled
            }
        }
    }

    /// Stop the driver and release GPU resources. Repeat calls do nothing.
    pub fn teardown(&mut self) {
        if self.driver.is_cancelled() {
            return;
        }
        self.driver.cancel();
        self.renderer.dispose();
        log::info!(
            "Backdrop torn down after {} frames",
            self.driver.clock().ticks
        );
    }
}
