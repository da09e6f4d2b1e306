//! GPU context bound to the mount surface

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use backdrop_core::{page, Color, Theme};

use crate::error::BackdropError;

/// How the surface is composited with whatever sits behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// The surface keeps its alpha; we clear to fully transparent
    Transparent,
    /// Alpha is ignored by the compositor; we clear to the page color
    Opaque,
}

/// Surface size clamped to what the device can allocate. Zero sides become 1.
pub fn surface_extent(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max_dimension = max_dimension.max(1);
    (width.clamp(1, max_dimension), height.clamp(1, max_dimension))
}

impl Composite {
    fn from_alpha_mode(mode: wgpu::CompositeAlphaMode) -> Self {
        match mode {
            wgpu::CompositeAlphaMode::PreMultiplied | wgpu::CompositeAlphaMode::PostMultiplied => {
                Composite::Transparent
            }
            _ => Composite::Opaque,
        }
    }
}

pub struct GpuContext {
    surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    composite: Composite,
    max_dimension: u32,
    lost: Arc<AtomicBool>,
}

impl GpuContext {
    pub async fn new<T>(target: T, width: u32, height: u32) -> Result<Self, BackdropError>
    where
        T: Into<wgpu::SurfaceTarget<'static>>,
    {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .map_err(|e| BackdropError::CreateSurface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| BackdropError::NoAdapter(e.to_string()))?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Backdrop Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| BackdropError::RequestDevice(e.to_string()))?;

        let lost = Arc::new(AtomicBool::new(false));
        {
            let lost = lost.clone();
            device.set_device_lost_callback(move |reason, message| {
                if !matches!(reason, wgpu::DeviceLostReason::Destroyed) {
                    log::warn!("GPU device lost ({:?}): {}", reason, message);
                    lost.store(true, Ordering::SeqCst);
                }
            });
        }
        {
            // Replaces the default handler, which panics
            let lost = lost.clone();
            device.on_uncaptured_error(Arc::new(move |error: wgpu::Error| {
                log::error!("GPU error: {}", error);
                lost.store(true, Ordering::SeqCst);
            }));
        }
        let max_dimension = device.limits().max_texture_dimension_2d;

        let surface_caps = surface.get_capabilities(&adapter);
        // Colors are authored as display values, so prefer a non-sRGB target.
        let format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(BackdropError::UnsupportedSurface)?;

        let alpha_mode = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ]
        .into_iter()
        .find(|mode| surface_caps.alpha_modes.contains(mode))
        .or_else(|| surface_caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let composite = Composite::from_alpha_mode(alpha_mode);

        let (width, height) = surface_extent(width, height, max_dimension);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::info!(
            "✓ Surface configured: {:?}, {}x{}, {:?} composite",
            format,
            config.width,
            config.height,
            composite
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            composite,
            max_dimension,
            lost,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn composite(&self) -> Composite {
        self.composite
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Set once the device reports it was lost or raised an uncaptured
    /// error; never cleared
    pub fn is_lost(&self) -> bool {
        self.lost.load(Ordering::SeqCst)
    }

    /// Reconfigure the surface. Zero sizes are ignored; sizes beyond the
    /// device limit are clamped to it.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let (width, height) = surface_extent(width, height, self.max_dimension);
        if (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigure at the current size after the surface went stale
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn acquire(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Clear color for the current composite mode
    pub fn clear_color(&self, theme: Theme) -> wgpu::Color {
        let color = match self.composite {
            Composite::Transparent => Color::transparent(),
            Composite::Opaque => {
                let base = match theme {
                    Theme::Dark => page::dark(),
                    Theme::Light => page::light(),
                };
                if self.config.format.is_srgb() {
                    base.to_linear()
                } else {
                    base
                }
            }
        };

        wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: color.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_extent_clamps_to_device_limit() {
        assert_eq!(surface_extent(11520, 2160, 8192), (8192, 2160));
        assert_eq!(surface_extent(1920, 1080, 8192), (1920, 1080));
        assert_eq!(surface_extent(0, 0, 8192), (1, 1));
    }

    #[test]
    fn test_alpha_modes() {
        assert_eq!(
            Composite::from_alpha_mode(wgpu::CompositeAlphaMode::PreMultiplied),
            Composite::Transparent
        );
        assert_eq!(
            Composite::from_alpha_mode(wgpu::CompositeAlphaMode::Opaque),
            Composite::Opaque
        );
    }
}
