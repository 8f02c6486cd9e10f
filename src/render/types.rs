//! Rendering-Typen und Konfiguration.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Format des Tiefenpuffers (muss zu `NativeOptions::depth_buffer` passen).
pub const DEPTH_FORMAT: eframe::wgpu::TextureFormat = eframe::wgpu::TextureFormat::Depth24Plus;
/// MSAA-Samples (muss zu `NativeOptions::multisampling` passen).
pub const SAMPLE_COUNT: u32 = 4;

/// Gemeinsamer Kontext für alle Sub-Renderer.
///
/// Bündelt die GPU-Ressourcen und View-Parameter, die jeder
/// Sub-Renderer bei jedem Frame benötigt.
pub(crate) struct RenderContext<'a> {
    /// wgpu Device für Buffer-Allokation
    pub device: &'a eframe::wgpu::Device,
    /// wgpu Queue für Buffer-Uploads
    pub queue: &'a eframe::wgpu::Queue,
    /// Projektion × View
    pub view_projection: Mat4,
    /// Viewport-Größe in Pixeln [width, height]
    pub viewport_size: [f32; 2],
}

/// Vertex für Modell-, Highlight- und Liniengeometrie.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ColorVertex {
    /// Position im 3D-Raum
    pub position: [f32; 3],
    /// RGBA-Farbe
    pub color: [f32; 4],
}

impl ColorVertex {
    /// Erstellt einen neuen ColorVertex.
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    /// Beschreibt das Vertex-Layout für wgpu.
    pub const fn desc() -> eframe::wgpu::VertexBufferLayout<'static> {
        eframe::wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as eframe::wgpu::BufferAddress,
            step_mode: eframe::wgpu::VertexStepMode::Vertex,
            attributes: &[
                eframe::wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: eframe::wgpu::VertexFormat::Float32x3,
                },
                eframe::wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as eframe::wgpu::BufferAddress,
                    shader_location: 1,
                    format: eframe::wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Uniform-Buffer für View-Projektion und Beleuchtung
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    /// View-Projection-Matrix (4x4)
    pub view_proj: [[f32; 4]; 4],
    /// Richtung zum Licht (xyz), w = Ambient-Anteil
    pub light: [f32; 4],
}

impl Uniforms {
    /// Fest eingestelltes Richtungslicht von schräg oben.
    pub fn new(view_projection: Mat4) -> Self {
        let dir = Vec3::new(0.4, 1.0, 0.6).normalize();
        Self {
            view_proj: view_projection.to_cols_array_2d(),
            light: [dir.x, dir.y, dir.z, 0.35],
        }
    }
}

/// Hilfsfunktion: Pipeline-Layout mit einer Uniform-Bindung.
pub(crate) fn uniform_binding(
    device: &eframe::wgpu::Device,
    label: &str,
) -> (
    eframe::wgpu::Buffer,
    eframe::wgpu::BindGroupLayout,
    eframe::wgpu::BindGroup,
) {
    use eframe::wgpu;

    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{label} Uniform Buffer")),
        size: std::mem::size_of::<Uniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{label} Bind Group Layout")),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} Bind Group")),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    (uniform_buffer, bind_group_layout, bind_group)
}
