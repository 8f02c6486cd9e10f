//! Linien-Renderer für Selektionsbox und Mittellinie.

use super::geometry::line_vertices;
use super::types::{uniform_binding, ColorVertex, RenderContext, Uniforms, DEPTH_FORMAT, SAMPLE_COUNT};
use crate::core::GeometryHandle;
use crate::shared::LineDraw;
use eframe::wgpu::util::DeviceExt;
use eframe::{egui_wgpu, wgpu};
use std::collections::{HashMap, HashSet};

struct GpuLines {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// Renderer für Liniensegmente (immer über der Modellgeometrie).
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    buffers: HashMap<GeometryHandle, GpuLines>,
}

impl LineRenderer {
    /// Erstellt einen neuen Linien-Renderer.
    pub fn new(render_state: &egui_wgpu::RenderState, shader: &wgpu::ShaderModule) -> Self {
        let device = &render_state.device;
        let (uniform_buffer, bind_group_layout, bind_group) = uniform_binding(device, "Line");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[ColorVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_flat"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: render_state.target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
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
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            buffers: HashMap::new(),
        }
    }

    /// Rendert alle Liniensegmente.
    pub fn render(
        &mut self,
        ctx: &RenderContext,
        render_pass: &mut wgpu::RenderPass<'static>,
        draws: &[LineDraw],
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
            if self.buffers.contains_key(&draw.geometry) {
                continue;
            }
            let vertices = line_vertices(&draw.segments, draw.color);
            if vertices.is_empty() {
                continue;
            }
            let vertex_buffer = ctx
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Line Vertex Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            self.buffers.insert(
                draw.geometry,
                GpuLines {
                    vertex_buffer,
                    vertex_count: vertices.len() as u32,
                },
            );
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        for draw in draws {
            if let Some(gpu) = self.buffers.get(&draw.geometry) {
                render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                render_pass.draw(0..gpu.vertex_count, 0..1);
            }
        }
    }

    /// Gibt Puffer nicht mehr gezeichneter Geometrien frei.
    pub fn retain(&mut self, live: &HashSet<GeometryHandle>) {
        self.buffers.retain(|handle, _| live.contains(handle));
    }
}
