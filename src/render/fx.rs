//! Additive effects: ambient particles, the engine glow and jump streaks.

use super::helpers;
use super::targets::{DEPTH_FORMAT, HDR_FORMAT};
use crate::constants::{PARTICLE_COLOR, PARTICLE_SIZE, STREAK_COLOR};
use folio_core::constants::AMBIENT_PARTICLE_COUNT;
use folio_core::{ambient_particles, FrameOutput};
use glam::{Mat3, Vec3};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadInstance {
    center_size: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LineVertex {
    position: [f32; 3],
    color: [f32; 4],
}

pub(crate) struct FxPass {
    quad_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    particles: Vec<Vec3>,
    quad_buffer: wgpu::Buffer,
    quad_count: u32,
    line_buffer: wgpu::Buffer,
    line_capacity: usize,
    line_count: u32,
    quad_staging: Vec<QuadInstance>,
    line_staging: Vec<LineVertex>,
}

impl FxPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        frame_bgl: &wgpu::BindGroupLayout,
        streak_count: usize,
        seed: u64,
    ) -> Self {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_fx"),
            bind_group_layouts: &[frame_bgl],
            push_constant_ranges: &[],
        });
        let target = [Some(wgpu::ColorTargetState {
            format: HDR_FORMAT,
            blend: Some(helpers::ADDITIVE),
            write_mask: wgpu::ColorWrites::ALL,
        })];
        let quad_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fx_quads"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_quad"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(helpers::depth_read_only(DEPTH_FORMAT)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_quad"),
                targets: &target,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fx_streaks"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_line"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(helpers::depth_read_only(DEPTH_FORMAT)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_line"),
                targets: &target,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let particles = ambient_particles(AMBIENT_PARTICLE_COUNT, seed);
        // Particles plus the single glow sprite.
        let quad_capacity = particles.len() + 1;
        let quad_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fx_quad_instances"),
            size: (quad_capacity * std::mem::size_of::<QuadInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let line_capacity = (streak_count * 2).max(2);
        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fx_streak_vertices"),
            size: (line_capacity * std::mem::size_of::<LineVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            quad_pipeline,
            line_pipeline,
            quad_staging: Vec::with_capacity(quad_capacity),
            particles,
            quad_buffer,
            quad_count: 0,
            line_buffer,
            line_capacity,
            line_count: 0,
            line_staging: Vec::with_capacity(line_capacity),
        }
    }

    pub(crate) fn prepare(&mut self, queue: &wgpu::Queue, out: &FrameOutput) {
        let spin = Mat3::from_rotation_z(out.particle_rotation);
        self.quad_staging.clear();
        self.quad_staging.extend(self.particles.iter().map(|p| {
            let p = spin * *p;
            QuadInstance {
                center_size: [p.x, p.y, p.z, PARTICLE_SIZE],
                color: PARTICLE_COLOR,
            }
        }));
        if let Some(glow) = out.glow.filter(|g| g.opacity > 0.0) {
            let c = glow.color;
            self.quad_staging.push(QuadInstance {
                center_size: [glow.position.x, glow.position.y, glow.position.z, glow.size],
                color: [
                    c[0] * glow.intensity,
                    c[1] * glow.intensity,
                    c[2] * glow.intensity,
                    glow.opacity,
                ],
            });
        }
        self.quad_count = self.quad_staging.len() as u32;
        queue.write_buffer(&self.quad_buffer, 0, bytemuck::cast_slice(&self.quad_staging));

        self.line_staging.clear();
        if out.streak_opacity > 0.0 {
            let [r, g, b] = STREAK_COLOR;
            for [inner, outer] in out.streaks.iter().take(self.line_capacity / 2) {
                self.line_staging.push(LineVertex {
                    position: inner.to_array(),
                    color: [r, g, b, out.streak_opacity],
                });
                self.line_staging.push(LineVertex {
                    position: outer.to_array(),
                    color: [r, g, b, 0.0],
                });
            }
        }
        self.line_count = self.line_staging.len() as u32;
        if self.line_count > 0 {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&self.line_staging));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.quad_count > 0 {
            rpass.set_pipeline(&self.quad_pipeline);
            rpass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            rpass.draw(0..6, 0..self.quad_count);
        }
        if self.line_count > 0 {
            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, self.line_buffer.slice(..));
            rpass.draw(0..self.line_count, 0..1);
        }
    }
}
