//! Mesh-Renderer für Modellgeometrie und Hover-Einfärbungen.

use super::geometry::{highlight_vertices, model_vertices, visible_indices};
use super::types::{uniform_binding, ColorVertex, RenderContext, Uniforms, DEPTH_FORMAT, SAMPLE_COUNT};
use crate::core::GeometryHandle;
use crate::shared::{HighlightDraw, MeshDraw};
use eframe::wgpu::util::DeviceExt;
use eframe::{egui_wgpu, wgpu};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

/// GPU-Puffer eines Modell-Meshes.
struct GpuModel {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
    /// Ausblend-Menge, mit der die Indizes erzeugt wurden
    hidden: Arc<BTreeSet<u32>>,
}

/// GPU-Puffer einer Hover-Einfärbung.
struct GpuHighlight {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// Renderer für Modell-Meshes (opak, Tiefentest) und Hover-Overlays (transparent).
pub struct MeshRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    highlight_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    models: HashMap<GeometryHandle, GpuModel>,
    highlights: HashMap<GeometryHandle, GpuHighlight>,
}

impl MeshRenderer {
    /// Erstellt einen neuen Mesh-Renderer.
    pub fn new(render_state: &egui_wgpu::RenderState, shader: &wgpu::ShaderModule) -> Self {
        let device = &render_state.device;
        let (uniform_buffer, bind_group_layout, bind_group) = uniform_binding(device, "Mesh");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = create_pipeline(
            device,
            render_state.target_format,
            &pipeline_layout,
            shader,
            PipelineKind::Opaque,
        );
        let highlight_pipeline = create_pipeline(
            device,
            render_state.target_format,
            &pipeline_layout,
            shader,
            PipelineKind::Overlay,
        );

        Self {
            mesh_pipeline,
            highlight_pipeline,
            uniform_buffer,
            bind_group,
            models: HashMap::new(),
            highlights: HashMap::new(),
        }
    }

    /// Rendert alle Modell-Meshes.
    pub fn render_models(
        &mut self,
        ctx: &RenderContext,
        render_pass: &mut wgpu::RenderPass<'static>,
        draws: &[MeshDraw],
    ) {
        if draws.is_empty() {
            return;
        }
        ctx.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[Uniforms::new(ctx.view_projection)]),
        );

        for draw in draws {
            self.upload_model(ctx, draw);
        }

        render_pass.set_pipeline(&self.mesh_pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        for draw in draws {
            let Some(gpu) = self.models.get(&draw.geometry) else {
                continue;
            };
            let Some(index_buffer) = gpu.index_buffer.as_ref() else {
                continue;
            };
            render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..gpu.index_count, 0, 0..1);
        }
    }

    /// Rendert Hover-Einfärbungen über den Modellen.
    pub fn render_highlights(
        &mut self,
        ctx: &RenderContext,
        render_pass: &mut wgpu::RenderPass<'static>,
        draws: &[HighlightDraw],
    ) {
        if draws.is_empty() {
            return;
        }
        for draw in draws {
            if !self.highlights.contains_key(&draw.geometry) {
                let vertices = highlight_vertices(&draw.mesh, draw.element, draw.color);
                if vertices.is_empty() {
                    continue;
                }
                let vertex_buffer = ctx
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Highlight Vertex Buffer"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
                self.highlights.insert(
                    draw.geometry,
                    GpuHighlight {
                        vertex_buffer,
                        vertex_count: vertices.len() as u32,
                    },
                );
            }
        }

        render_pass.set_pipeline(&self.highlight_pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        for draw in draws {
            if let Some(gpu) = self.highlights.get(&draw.geometry) {
                render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                render_pass.draw(0..gpu.vertex_count, 0..1);
            }
        }
    }

    fn upload_model(&mut self, ctx: &RenderContext, draw: &MeshDraw) {
        match self.models.get_mut(&draw.geometry) {
            Some(gpu) if gpu.hidden == draw.hidden => {}
            Some(gpu) => {
                // Nur die Indizes hängen von der Ausblend-Menge ab
                let indices = visible_indices(&draw.mesh, &draw.hidden);
                gpu.index_buffer = create_index_buffer(ctx.device, &indices);
                gpu.index_count = indices.len() as u32;
                gpu.hidden = draw.hidden.clone();
            }
            None => {
                let vertices: Vec<ColorVertex> = model_vertices(&draw.mesh);
                let vertex_buffer = ctx
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Model Vertex Buffer"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
                let indices = visible_indices(&draw.mesh, &draw.hidden);
                log::debug!(
                    "Modell-Geometrie {} hochgeladen: {} Vertices, {} Indizes",
                    draw.geometry.raw(),
                    vertices.len(),
                    indices.len()
                );
                self.models.insert(
                    draw.geometry,
                    GpuModel {
                        vertex_buffer,
                        index_buffer: create_index_buffer(ctx.device, &indices),
                        index_count: indices.len() as u32,
                        hidden: draw.hidden.clone(),
                    },
                );
            }
        }
    }

    /// Gibt GPU-Puffer frei, deren Geometrie nicht mehr gezeichnet wird.
    pub fn retain(&mut self, live: &HashSet<GeometryHandle>) {
        let before = self.models.len() + self.highlights.len();
        self.models.retain(|handle, _| live.contains(handle));
        self.highlights.retain(|handle, _| live.contains(handle));
        let released = before - self.models.len() - self.highlights.len();
        if released > 0 {
            log::debug!("{} Mesh-Puffer freigegeben", released);
        }
    }
}

#[derive(Clone, Copy)]
enum PipelineKind {
    Opaque,
    Overlay,
}

fn create_index_buffer(device: &wgpu::Device, indices: &[u32]) -> Option<wgpu::Buffer> {
    if indices.is_empty() {
        return None;
    }
    Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Model Index Buffer"),
        contents: bytemuck::cast_slice(indices),
        usage: wgpu::BufferUsages::INDEX,
    }))
}

fn create_pipeline(
    device: &wgpu::Device,
    target_format: wgpu::TextureFormat,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    kind: PipelineKind,
) -> wgpu::RenderPipeline {
    let (label, fragment_entry, blend, depth_write, depth_compare) = match kind {
        PipelineKind::Opaque => (
            "Mesh Pipeline",
            "fs_mesh",
            wgpu::BlendState::REPLACE,
            true,
            wgpu::CompareFunction::Less,
        ),
        PipelineKind::Overlay => (
            "Highlight Pipeline",
            "fs_flat",
            wgpu::BlendState::ALPHA_BLENDING,
            false,
            wgpu::CompareFunction::LessEqual,
        ),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[ColorVertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: target_format,
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
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: SAMPLE_COUNT,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}
