//! GPU-Rendering mit wgpu.

mod callback;
mod geometry;
mod line_renderer;
mod mesh_renderer;
mod types;

pub use crate::shared::RenderScene;
pub use callback::ViewportPaint;
pub(crate) use line_renderer::LineRenderer;
pub(crate) use mesh_renderer::MeshRenderer;
pub use types::{DEPTH_FORMAT, SAMPLE_COUNT};
use types::RenderContext;

use eframe::egui_wgpu;
use std::collections::HashSet;

/// Haupt-Renderer für BIM-Modelle und Overlays.
///
/// Hält GPU-Puffer pro Geometrie-Handle des Szenengraphs. Sobald ein
/// Handle nicht mehr in der Szene vorkommt, wird der Puffer freigegeben.
pub struct Renderer {
    mesh_renderer: MeshRenderer,
    line_renderer: LineRenderer,
    /// Zuletzt gezeichnete Szenen-Revision (für das Freigeben von Puffern)
    last_revision: Option<u64>,
}

impl Renderer {
    /// Erstellt einen neuen Renderer
    pub fn new(render_state: &egui_wgpu::RenderState) -> Self {
        let device = &render_state.device;

        // Shader einmalig laden, alle Sub-Renderer teilen dasselbe ShaderModule
        let shader = device.create_shader_module(eframe::wgpu::ShaderModuleDescriptor {
            label: Some("BIM Viewer Shader"),
            source: eframe::wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
        });

        Self {
            mesh_renderer: MeshRenderer::new(render_state, &shader),
            line_renderer: LineRenderer::new(render_state, &shader),
            last_revision: None,
        }
    }

    /// Rendert die komplette Szene
    pub fn render_scene(
        &mut self,
        device: &eframe::wgpu::Device,
        queue: &eframe::wgpu::Queue,
        render_pass: &mut eframe::wgpu::RenderPass<'static>,
        scene: &RenderScene,
    ) {
        if self.last_revision != Some(scene.revision) {
            let live: HashSet<_> = scene.geometries().collect();
            self.mesh_renderer.retain(&live);
            self.line_renderer.retain(&live);
            self.last_revision = Some(scene.revision);
        }

        let ctx = RenderContext {
            device,
            queue,
            view_projection: scene.view_projection,
            viewport_size: scene.viewport_size,
        };
        if !(ctx.viewport_size[0] > 0.0 && ctx.viewport_size[1] > 0.0) {
            return;
        }

        // 1. Modelle (opak, schreiben Tiefe)
        self.mesh_renderer
            .render_models(&ctx, render_pass, &scene.meshes);
        // 2. Hover-Einfärbung (transparent darüber)
        self.mesh_renderer
            .render_highlights(&ctx, render_pass, &scene.highlights);
        // 3. Selektionslinien (zuoberst)
        self.line_renderer.render(&ctx, render_pass, &scene.lines);
    }
}
