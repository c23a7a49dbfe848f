use super::helpers;
use super::targets::{DEPTH_FORMAT, HDR_FORMAT};
use folio_core::{ModelData, ModelVertex, ObjectFrame, SurfaceMaterial};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DrawUniforms {
    model: [[f32; 4]; 4],
    base_color: [f32; 4],
    /// rgb emissive, w = object opacity
    emissive: [f32; 4],
}

struct GpuPrimitive {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    material: SurfaceMaterial,
}

/// Lit, fadeable ship hull. Empty until the asset arrives.
pub(crate) struct MeshPass {
    pipeline: wgpu::RenderPipeline,
    draw_bgl: wgpu::BindGroupLayout,
    primitives: Vec<GpuPrimitive>,
    visible: bool,
}

impl MeshPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        frame_bgl: &wgpu::BindGroupLayout,
    ) -> Self {
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_draw_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_mesh"),
            bind_group_layouts: &[frame_bgl, &draw_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_mesh"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ModelVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_mesh"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        Self {
            pipeline,
            draw_bgl,
            primitives: Vec::new(),
            visible: false,
        }
    }

    pub(crate) fn upload(&mut self, device: &wgpu::Device, model: &ModelData) {
        self.release();
        for (i, prim) in model.primitives.iter().enumerate() {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("ship_vertices"),
                contents: bytemuck::cast_slice(&prim.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("ship_indices"),
                contents: bytemuck::cast_slice(&prim.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            let uniform_buffer =
                helpers::uniform_buffer(device, "ship_draw", std::mem::size_of::<DrawUniforms>());
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("ship_draw_bg"),
                layout: &self.draw_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            let material = model.materials.get(prim.material).copied().unwrap_or_default();
            log::debug!(
                "[gpu] primitive {} verts={} tris={}",
                i,
                prim.vertices.len(),
                prim.indices.len() / 3
            );
            self.primitives.push(GpuPrimitive {
                vertex_buffer,
                index_buffer,
                index_count: prim.indices.len() as u32,
                uniform_buffer,
                bind_group,
                material,
            });
        }
        log::info!("[gpu] ship uploaded ({} primitives)", self.primitives.len());
    }

    pub(crate) fn prepare(&mut self, queue: &wgpu::Queue, object: Option<&ObjectFrame>) {
        let Some(object) = object else {
            self.visible = false;
            return;
        };
        self.visible = !self.primitives.is_empty();
        let model = object.transform.to_cols_array_2d();
        for prim in &self.primitives {
            let e = prim.material.emissive;
            let u = DrawUniforms {
                model,
                base_color: prim.material.base_color,
                emissive: [e[0], e[1], e[2], object.material_opacity],
            };
            queue.write_buffer(&prim.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if !self.visible {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        for prim in &self.primitives {
            rpass.set_bind_group(1, &prim.bind_group, &[]);
            rpass.set_vertex_buffer(0, prim.vertex_buffer.slice(..));
            rpass.set_index_buffer(prim.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..prim.index_count, 0, 0..1);
        }
    }

    pub(crate) fn release(&mut self) {
        for prim in self.primitives.drain(..) {
            prim.vertex_buffer.destroy();
            prim.index_buffer.destroy();
            prim.uniform_buffer.destroy();
        }
        self.visible = false;
    }
}
