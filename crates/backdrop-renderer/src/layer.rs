//! GPU resources of one point layer

use backdrop_core::{Disposable, Owned, PointPopulation, PointRecord, PopulationKind};
use wgpu::util::DeviceExt;

use crate::uniforms::LayerUniform;

/// Point storage plus the layer's uniform block
pub struct LayerBuffers {
    pub points: wgpu::Buffer,
    pub uniform: wgpu::Buffer,
}

impl Disposable for LayerBuffers {
    fn dispose(&mut self) {
        self.points.destroy();
        self.uniform.destroy();
    }
}

pub struct GpuLayer {
    kind: PopulationKind,
    count: u32,
    buffers: Owned<LayerBuffers>,
    bind_group: wgpu::BindGroup,
}

impl GpuLayer {
    /// Upload a population. Each layer owns its own point buffer, so the front
    /// sphere gets a copy of the back sphere's points rather than an alias.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        population: &PointPopulation,
    ) -> Self {
        let kind = population.kind();
        let label = kind.label();

        // Storage bindings must not be empty
        let zeroed = [PointRecord::fixed(glam::Vec3::ZERO)];
        let records = if population.is_empty() {
            &zeroed[..]
        } else {
            population.points()
        };

        let points = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Points", label)),
            contents: bytemuck::cast_slice(records),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Uniform", label)),
            size: std::mem::size_of::<LayerUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", label)),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: points.as_entire_binding(),
                },
            ],
        });

        log::debug!("Uploaded {} layer: {} points", label, population.len());

        Self {
            kind,
            count: population.len() as u32,
            buffers: Owned::new(label, LayerBuffers { points, uniform }),
            bind_group,
        }
    }

    pub fn kind(&self) -> PopulationKind {
        self.kind
    }

    /// Instances drawn per frame (zero for an empty population)
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn is_disposed(&self) -> bool {
        self.buffers.is_disposed()
    }

    /// Write this frame's uniform. No-op once disposed.
    pub fn write_uniform(&self, queue: &wgpu::Queue, uniform: &LayerUniform) {
        if let Some(buffers) = self.buffers.get() {
            queue.write_buffer(&buffers.uniform, 0, bytemuck::cast_slice(&[*uniform]));
        }
    }

    /// Release guard for this layer's buffers
    pub fn buffers_mut(&mut self) -> &mut Owned<LayerBuffers> {
        &mut self.buffers
    }
}
