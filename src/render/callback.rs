//! Paint-Callback, über den egui den 3D-Viewport zeichnet.

use super::Renderer;
use crate::shared::RenderScene;
use std::sync::{Arc, Mutex, PoisonError};

/// Zeichenauftrag für den Viewport eines Frames.
///
/// Trägt einen Schnappschuss der Szene, damit der Renderer nicht auf den
/// `AppState` zugreifen muss.
pub struct ViewportPaint {
    renderer: Arc<Mutex<Renderer>>,
    scene: RenderScene,
    device: eframe::wgpu::Device,
    queue: eframe::wgpu::Queue,
}

impl ViewportPaint {
    pub fn new(
        renderer: Arc<Mutex<Renderer>>,
        scene: RenderScene,
        device: eframe::wgpu::Device,
        queue: eframe::wgpu::Queue,
    ) -> Self {
        Self {
            renderer,
            scene,
            device,
            queue,
        }
    }
}

/// Ein Viewport ohne Pixelfläche (minimiertes Fenster) wird nicht gezeichnet.
fn is_drawable(width_px: i32, height_px: i32) -> bool {
    width_px > 0 && height_px > 0
}

impl eframe::egui_wgpu::CallbackTrait for ViewportPaint {
    fn prepare(
        &self,
        _device: &eframe::wgpu::Device,
        _queue: &eframe::wgpu::Queue,
        _screen_descriptor: &eframe::egui_wgpu::ScreenDescriptor,
        _egui_encoder: &mut eframe::wgpu::CommandEncoder,
        _callback_resources: &mut eframe::egui_wgpu::CallbackResources,
    ) -> Vec<eframe::wgpu::CommandBuffer> {
        Vec::new()
    }

    fn paint<'b>(
        &'b self,
        info: egui::PaintCallbackInfo,
        render_pass: &mut eframe::wgpu::RenderPass<'static>,
        _callback_resources: &'b eframe::egui_wgpu::CallbackResources,
    ) {
        let viewport = info.viewport_in_pixels();
        if !is_drawable(viewport.width_px, viewport.height_px) {
            return;
        }

        // Nach einem Panic in einem früheren Frame weiterzeichnen
        let mut renderer = self.renderer.lock().unwrap_or_else(|poisoned| {
            log::warn!("Renderer-Lock vergiftet, setze mit letztem Zustand fort");
            PoisonError::into_inner(poisoned)
        });
        log::trace!(
            "Viewport {}x{} px, Szenen-Revision {}, Modell: {}",
            viewport.width_px,
            viewport.height_px,
            self.scene.revision,
            self.scene.has_model()
        );
        renderer.render_scene(&self.device, &self.queue, render_pass, &self.scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_viewport_is_skipped() {
        assert!(!is_drawable(0, 600));
        assert!(!is_drawable(800, 0));
        assert!(!is_drawable(-1, 600));
        assert!(is_drawable(1, 1));
    }
}
