//! Draws the four point layers into the mount surface

use backdrop_core::{dispose_all, FrameState, LayerStyle, PopulationKind, PopulationSet};

use crate::camera::Camera;
use crate::context::{Composite, GpuContext};
use crate::layer::GpuLayer;
use crate::uniforms::LayerUniform;

/// Vertex entry point in shaders/points.wgsl for a population kind
pub fn vertex_entry_point(kind: PopulationKind) -> &'static str {
    match kind {
        PopulationKind::SphereBack | PopulationKind::SphereFront => "vs_sphere",
        PopulationKind::Trail => "vs_trail",
        PopulationKind::Ambient => "vs_ambient",
    }
}

/// Additive on a transparent surface, plain alpha-over on an opaque one
/// (additive light points vanish on a white page).
pub fn blend_state(composite: Composite) -> wgpu::BlendState {
    match composite {
        Composite::Transparent => wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        },
        Composite::Opaque => wgpu::BlendState::ALPHA_BLENDING,
    }
}

struct PointPipelines {
    sphere: wgpu::RenderPipeline,
    trail: wgpu::RenderPipeline,
    ambient: wgpu::RenderPipeline,
}

impl PointPipelines {
    fn get(&self, kind: PopulationKind) -> &wgpu::RenderPipeline {
        match kind {
            PopulationKind::SphereBack | PopulationKind::SphereFront => &self.sphere,
            PopulationKind::Trail => &self.trail,
            PopulationKind::Ambient => &self.ambient,
        }
    }
}

pub struct BackdropRenderer {
    pipelines: PointPipelines,
    /// Indexed by `PopulationKind as usize`
    layers: Vec<GpuLayer>,
    styles: [LayerStyle; 4],
    disposed: bool,
}

impl BackdropRenderer {
    pub fn new(ctx: &GpuContext, populations: &PopulationSet) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Backdrop Point Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/points.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Point Layer Bind Group Layout"),
            entries: &[
                // Layer (Uniform) - Binding 0
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Points (Storage) - Binding 1
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let blend = blend_state(ctx.composite());
        let build = |kind: PopulationKind| {
            Self::create_pipeline(device, &pipeline_layout, &shader, ctx.format(), blend, kind)
        };
        let pipelines = PointPipelines {
            sphere: build(PopulationKind::SphereBack),
            trail: build(PopulationKind::Trail),
            ambient: build(PopulationKind::Ambient),
        };

        // Built in discriminant order so `layers[kind as usize]` holds
        let layers = [
            PopulationKind::SphereBack,
            PopulationKind::SphereFront,
            PopulationKind::Trail,
            PopulationKind::Ambient,
        ]
        .into_iter()
        .map(|kind| GpuLayer::new(device, &bind_group_layout, populations.get(kind)))
        .collect();

        let styles = [
            LayerStyle::for_kind(PopulationKind::SphereBack),
            LayerStyle::for_kind(PopulationKind::SphereFront),
            LayerStyle::for_kind(PopulationKind::Trail),
            LayerStyle::for_kind(PopulationKind::Ambient),
        ];

        log::info!(
            "✓ Backdrop renderer ready: {} points in 4 layers",
            populations.total_points()
        );

        Self {
            pipelines,
            layers,
            styles,
            disposed: false,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        blend: wgpu::BlendState,
        kind: PopulationKind,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Pipeline", vertex_entry_point(kind))),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vertex_entry_point(kind)),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_points"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            // Blending is order independent, no depth buffer
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Draw one frame. Does nothing once disposed.
    pub fn render(
        &self,
        ctx: &GpuContext,
        camera: &Camera,
        frame: &FrameState,
    ) -> Result<(), wgpu::SurfaceError> {
        if self.disposed {
            return Ok(());
        }

        let view_proj = camera.build_view_projection_matrix();
        for layer in &self.layers {
            let kind = layer.kind();
            let uniform = LayerUniform::new(
                frame.layer(kind),
                &self.styles[kind as usize],
                frame,
                view_proj,
            );
            layer.write_uniform(&ctx.queue, &uniform);
        }

        let output = ctx.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_color(frame.theme)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for kind in PopulationKind::ALL {
                let layer = &self.layers[kind as usize];
                if layer.count() == 0 || layer.is_disposed() {
                    continue;
                }
                render_pass.set_pipeline(self.pipelines.get(kind));
                render_pass.set_bind_group(0, layer.bind_group(), &[]);
                render_pass.draw(0..6, 0..layer.count());
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Release every layer's buffers. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let released = dispose_all(self.layers.iter_mut().map(GpuLayer::buffers_mut));
        log::info!("Backdrop renderer disposed ({} layers released)", released);
    }
}
