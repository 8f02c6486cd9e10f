use approx::assert_relative_eq;
use bim_viewer::app::state::{CursorHint, MetadataContent};
use bim_viewer::core::{NodeKind, PresetSlot};
use bim_viewer::{
    AppCommand, AppController, AppIntent, AppState, CameraViewpoint, ElementId, ExecutionMode,
    MemoryBackend, MeshBuilder, ServiceError, Services, SlotIndex,
};
use glam::{Vec2, Vec3};
use std::sync::Arc;
use std::time::{Duration, Instant};

const VIEWPORT: [f32; 2] = [800.0, 600.0];

fn center() -> Vec2 {
    Vec2::new(VIEWPORT[0] / 2.0, VIEWPORT[1] / 2.0)
}

/// Weit außerhalb jedes Test-Modells.
fn corner() -> Vec2 {
    Vec2::new(5.0, 5.0)
}

fn id(raw: u32) -> ElementId {
    ElementId::new(raw).expect("gültiger Identifier")
}

fn slot(index: usize) -> SlotIndex {
    SlotIndex::new(index).expect("gültiger Slot")
}

/// Würfel 42 um den Ursprung.
fn cube_42() -> MeshBuilder {
    MeshBuilder::new().add_box(42, Vec3::splat(-1.0), Vec3::splat(1.0), [0.8; 4])
}

/// Quader 7 mit Oberkante-Mitte (1, 5, 3).
fn box_7() -> MeshBuilder {
    MeshBuilder::new().add_box(7, Vec3::new(0.0, 4.0, 2.0), Vec3::new(2.0, 5.0, 4.0), [0.8; 4])
}

fn backend(models: Vec<(&str, MeshBuilder)>) -> Arc<MemoryBackend> {
    let backend = MemoryBackend::new();
    for (key, builder) in models {
        backend.insert_model(key, builder.into_asset());
    }
    Arc::new(backend)
}

/// Test-Umgebung mit deterministischer Uhr.
struct Harness {
    controller: AppController,
    state: AppState,
    now: Instant,
}

impl Harness {
    fn new(backend: &Arc<MemoryBackend>) -> Self {
        let state = AppState::new();
        let controller = AppController::new(
            Services::in_memory(backend.clone()),
            ExecutionMode::Inline,
        );
        Self {
            controller,
            state,
            now: Instant::now(),
        }
    }

    /// Start mit Viewport, Blacklist und Standardmodell, alle Ketten abgeschlossen.
    fn booted(backend: &Arc<MemoryBackend>) -> Self {
        let mut h = Self::new(backend);
        h.intent(AppIntent::ViewportResized { size: VIEWPORT });
        h.intent(AppIntent::StartupRequested);
        h.settle();
        h
    }

    fn intent(&mut self, intent: AppIntent) {
        self.controller
            .handle_intent(&mut self.state, intent)
            .expect("Intent sollte ohne Fehler durchlaufen");
    }

    fn command(&mut self, command: AppCommand) {
        self.controller
            .handle_command(&mut self.state, command)
            .expect("Command sollte ohne Fehler durchlaufen");
    }

    fn tick(&mut self, step: Duration) {
        self.now += step;
        self.controller.update(&mut self.state, self.now);
    }

    /// Arbeitet Jobs, Timer und Animationen ab.
    fn settle(&mut self) {
        self.tick(Duration::ZERO);
        self.tick(Duration::from_secs(1));
        self.tick(Duration::from_secs(1));
    }

    fn hover_highlights(&self) -> usize {
        self.state
            .scene
            .nodes()
            .filter(|node| matches!(node.kind, NodeKind::HoverHighlight { .. }))
            .count()
    }

    fn selection_boxes(&self) -> Vec<ElementId> {
        self.state
            .scene
            .nodes()
            .filter_map(|node| match &node.kind {
                NodeKind::SelectionBox { element, .. } => Some(*element),
                _ => None,
            })
            .collect()
    }
}

fn preset(index: usize, label: &str, position: Vec3, target: Vec3) -> PresetSlot {
    PresetSlot {
        index: slot(index),
        label: label.to_string(),
        viewpoint: CameraViewpoint::new(position, target, 1.0),
        created_at: None,
        updated_at: None,
    }
}

// ── Modell laden ────────────────────────────────────────────────

#[test]
fn test_startup_loads_model_and_unlocks_interaction() {
    let backend = backend(vec![("ground", cube_42())]);
    let h = Harness::booted(&backend);

    assert!(h.state.model.loaded);
    assert!(h.state.ignore.loaded);
    assert!(h.state.interaction_ready());
    assert!(h.state.model.progress.is_none(), "Ladeanzeige ausgeblendet");
    assert_eq!(backend.calls().model_fetches, 1);
}

#[test]
fn test_failed_model_load_reports_and_keeps_interaction_locked() {
    let backend = backend(vec![]);
    let mut h = Harness::new(&backend);
    h.intent(AppIntent::StartupRequested);
    h.tick(Duration::ZERO);

    assert!(!h.state.model.loaded);
    assert!(h.state.model.progress.as_ref().is_some_and(|p| p.failed()));
    assert!(h.state.ui.status_message.is_some());

    h.tick(Duration::from_secs(3));
    assert!(h.state.model.progress.is_none());
    assert!(!h.state.interaction_ready());
}

#[test]
fn test_stale_model_result_is_discarded() {
    let backend = backend(vec![("ground", cube_42()), ("main", box_7())]);
    let mut h = Harness::new(&backend);
    h.intent(AppIntent::ViewportResized { size: VIEWPORT });
    h.intent(AppIntent::StartupRequested);
    // Wechsel, bevor das Ergebnis für "ground" abgeholt wurde
    h.intent(AppIntent::ModelSelected { key: "main".into() });
    h.settle();

    assert_eq!(h.state.model.active_key.as_deref(), Some("main"));
    let mesh = h.state.model.mesh.as_ref().expect("Mesh geladen");
    assert!(mesh.contains_element(id(7)));
    assert!(!mesh.contains_element(id(42)));
    assert!(!h.state.model.cache.contains("ground"));
}

#[test]
fn test_model_switch_clears_selection_hover_and_overlays() {
    let backend = backend(vec![("ground", cube_42()), ("main", box_7())]);
    let mut record = serde_json::Map::new();
    record.insert("Material".into(), serde_json::json!("Beton"));
    backend.insert_metadata("ground", 42, record);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::SelectElementRequested { element: id(42) });
    h.tick(Duration::from_millis(100));
    h.intent(AppIntent::PointerMoved {
        screen_pos: center(),
    });
    assert_eq!(h.selection_boxes(), vec![id(42)]);
    assert_eq!(h.hover_highlights(), 1);
    assert!(matches!(
        h.state.metadata.content,
        MetadataContent::Loaded { .. }
    ));

    h.intent(AppIntent::ModelSelected { key: "main".into() });

    assert_eq!(h.state.selection.selected(), None);
    assert_eq!(h.state.hover.element, None);
    assert_eq!(h.state.ui.cursor, CursorHint::Default);
    assert!(h.selection_boxes().is_empty());
    assert_eq!(h.hover_highlights(), 0);
    assert_eq!(h.state.metadata.content, MetadataContent::Empty);

    h.settle();
    assert!(h.selection_boxes().is_empty());
    assert_eq!(h.state.effects.visualized(), None);
}

#[test]
fn test_cached_model_is_not_fetched_again() {
    let backend = backend(vec![("ground", cube_42()), ("main", box_7())]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::ModelSelected { key: "main".into() });
    h.settle();
    assert_eq!(backend.calls().model_fetches, 2);

    h.intent(AppIntent::ModelSelected {
        key: "ground".into(),
    });
    h.settle();
    assert_eq!(backend.calls().model_fetches, 2, "aus dem Cache");
    assert!(h.state.model.loaded);
    assert_eq!(h.state.model.active_key.as_deref(), Some("ground"));

    // Erneute Auswahl des aktiven Modells ist ein No-op
    h.intent(AppIntent::ModelSelected {
        key: "ground".into(),
    });
    assert!(h.state.model.loaded);
}

// ── Picking & Selektion ─────────────────────────────────────────

#[test]
fn test_hover_reports_element_and_cursor() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::PointerMoved {
        screen_pos: center(),
    });
    assert_eq!(h.state.hover.element, Some(id(42)));
    assert_eq!(h.state.ui.cursor, CursorHint::Interactive);
    assert_eq!(h.hover_highlights(), 1);

    h.intent(AppIntent::PointerMoved {
        screen_pos: corner(),
    });
    assert_eq!(h.state.hover.element, None);
    assert_eq!(h.state.ui.cursor, CursorHint::Default);
    assert_eq!(h.hover_highlights(), 0);
}

#[test]
fn test_confirm_selects_and_empty_confirm_runs_default_chain() {
    let backend = backend(vec![("ground", box_7())]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::ConfirmRequested {
        screen_pos: center(),
    });
    assert_eq!(h.state.selection.selected(), Some(id(7)));
    let anchor = h.state.selection.anchor.expect("Anker gesetzt");
    assert_relative_eq!(anchor.x, 1.0, epsilon = 1e-5);
    assert_relative_eq!(anchor.y, 5.0, epsilon = 1e-5);
    assert_relative_eq!(anchor.z, 3.0, epsilon = 1e-5);
    assert!(h.state.view.is_animating(), "Fokus-Animation läuft");

    h.settle();
    assert_eq!(h.selection_boxes(), vec![id(7)]);

    h.intent(AppIntent::ConfirmRequested {
        screen_pos: corner(),
    });
    assert_eq!(h.state.selection.selected(), None);
    h.settle();

    // Keine Presets: Zentrierung mit festem Offset auf das Modellzentrum
    assert!(h.selection_boxes().is_empty());
    let position = h.state.view.camera.position;
    assert_relative_eq!(position.x, 31.0, epsilon = 1e-3);
    assert_relative_eq!(position.y, 34.5, epsilon = 1e-3);
    assert_relative_eq!(position.z, 33.0, epsilon = 1e-3);
}

#[test]
fn test_rapid_selection_changes_build_one_overlay() {
    let backend = backend(vec![(
        "ground",
        cube_42().add_box(43, Vec3::new(3.0, -1.0, -1.0), Vec3::new(5.0, 1.0, 1.0), [0.8; 4]),
    )]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::SelectElementRequested { element: id(42) });
    h.intent(AppIntent::SelectElementRequested { element: id(43) });
    assert!(h.selection_boxes().is_empty(), "Overlay erst nach Entprellung");

    h.tick(Duration::from_millis(100));
    assert_eq!(h.selection_boxes(), vec![id(43)]);
    assert_eq!(h.state.effects.visualized(), Some(id(43)));
}

#[test]
fn test_metadata_follows_selection() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut record = serde_json::Map::new();
    record.insert("Material".into(), serde_json::json!("Beton"));
    backend.insert_metadata("ground", 42, record.clone());
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::SelectElementRequested { element: id(42) });
    h.tick(Duration::ZERO);

    assert_eq!(
        h.state.metadata.content,
        MetadataContent::Loaded {
            element: id(42),
            record,
        }
    );

    h.intent(AppIntent::UnselectRequested);
    assert_eq!(h.state.metadata.content, MetadataContent::Empty);
}

#[test]
fn test_metadata_not_found_and_stale_selection_is_dropped() {
    let backend = backend(vec![(
        "ground",
        cube_42().add_box(43, Vec3::new(3.0, -1.0, -1.0), Vec3::new(5.0, 1.0, 1.0), [0.8; 4]),
    )]);
    let mut record = serde_json::Map::new();
    record.insert("Material".into(), serde_json::json!("Beton"));
    backend.insert_metadata("ground", 42, record);
    let mut h = Harness::booted(&backend);

    // Ergebnis für 42 trifft erst nach der Auswahl von 43 ein
    h.intent(AppIntent::SelectElementRequested { element: id(42) });
    h.intent(AppIntent::SelectElementRequested { element: id(43) });
    assert_eq!(
        h.state.metadata.content,
        MetadataContent::Loading { element: id(43) }
    );
    h.tick(Duration::ZERO);

    assert_eq!(
        h.state.metadata.content,
        MetadataContent::NotFound { element: id(43) }
    );
}

#[test]
fn test_metadata_server_error_keeps_http_status() {
    let backend = backend(vec![("ground", cube_42())]);
    backend.fail_metadata(Some(ServiceError::Status {
        status: 500,
        message: "Internal Server Error".into(),
    }));
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::SelectElementRequested { element: id(42) });
    h.tick(Duration::ZERO);

    match &h.state.metadata.content {
        MetadataContent::Error {
            element, status, ..
        } => {
            assert_eq!(*element, id(42));
            assert_eq!(*status, Some(500));
        }
        other => panic!("Fehlerzustand erwartet, erhalten: {:?}", other),
    }
    assert_eq!(h.state.selection.selected(), Some(id(42)), "Selektion bleibt");
}

// ── Ignore-Liste ────────────────────────────────────────────────

#[test]
fn test_interaction_locked_until_blacklist_loaded() {
    let backend = backend(vec![("ground", cube_42())]);
    backend.fail_blacklist(Some(ServiceError::Network("offline".into())));
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::PointerMoved {
        screen_pos: center(),
    });
    h.intent(AppIntent::ConfirmRequested {
        screen_pos: center(),
    });
    assert_eq!(h.state.hover.element, None);
    assert_eq!(h.state.selection.selected(), None);

    backend.fail_blacklist(None);
    h.intent(AppIntent::BlacklistReloadRequested);
    h.tick(Duration::ZERO);
    h.intent(AppIntent::PointerMoved {
        screen_pos: center(),
    });
    assert_eq!(h.state.hover.element, Some(id(42)));
}

#[test]
fn test_blacklist_is_idempotent_and_blocks_picking() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::ContextRequested {
        screen_pos: center(),
    });
    assert_eq!(h.state.context_menu.as_ref().map(|m| m.element), Some(id(42)));
    h.intent(AppIntent::ContextBlacklistRequested);
    assert!(h.state.context_menu.is_none());
    h.command(AppCommand::BlacklistElement {
        element: id(42),
        name: "Würfel".into(),
    });
    h.tick(Duration::ZERO);

    assert_eq!(backend.blacklist_entries_for(42), 1);
    assert_eq!(h.state.ignore.stats().blacklisted, 1);

    h.intent(AppIntent::PointerMoved {
        screen_pos: center(),
    });
    assert_eq!(h.state.hover.element, None);
    h.intent(AppIntent::SelectElementRequested { element: id(42) });
    assert_eq!(h.state.selection.selected(), None);
}

#[test]
fn test_hidden_element_is_transparent_to_picking() {
    // 42 vorne, 43 direkt dahinter auf der Sichtachse
    let backend = backend(vec![(
        "ground",
        cube_42().add_box(43, Vec3::splat(-4.0), Vec3::splat(-2.0), [0.8; 4]),
    )]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::SelectElementRequested { element: id(42) });
    h.intent(AppIntent::ContextRequested {
        screen_pos: center(),
    });
    h.intent(AppIntent::ContextHideRequested);
    assert_eq!(h.state.selection.selected(), None);
    assert_eq!(h.state.ignore.stats().hidden, 1);

    h.intent(AppIntent::PointerMoved {
        screen_pos: center(),
    });
    assert_eq!(h.state.hover.element, Some(id(43)));

    h.intent(AppIntent::ShowAllHiddenRequested);
    h.intent(AppIntent::PointerLeft);
    h.intent(AppIntent::PointerMoved {
        screen_pos: center(),
    });
    assert_eq!(h.state.hover.element, Some(id(42)));
}

// ── Kamera ──────────────────────────────────────────────────────

#[test]
fn test_zoom_round_trip() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::SetZoomRequested {
        factor: 2.0,
        animate: false,
    });
    let current = h.controller.current_camera_state(&h.state);
    assert_relative_eq!(current.zoom, 2.0, epsilon = 1e-4);

    let stored = current;
    h.intent(AppIntent::ResetCameraRequested);
    h.intent(AppIntent::SetCameraStateRequested {
        viewpoint: stored,
        animate: false,
    });
    let restored = h.controller.current_camera_state(&h.state);
    assert_relative_eq!(restored.position.x, stored.position.x, epsilon = 1e-4);
    assert_relative_eq!(restored.position.y, stored.position.y, epsilon = 1e-4);
    assert_relative_eq!(restored.position.z, stored.position.z, epsilon = 1e-4);
}

#[test]
fn test_preset_restores_absolute_pose_after_rebaseline() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::SetZoomRequested {
        factor: 2.0,
        animate: false,
    });
    let stored = h.controller.current_camera_state(&h.state);
    h.intent(AppIntent::PresetSaveRequested {
        slot: 3,
        label: "Nah".into(),
    });
    h.settle();
    let saved = backend.preset("ground", slot(3)).expect("Slot 3 belegt");
    assert_relative_eq!(saved.viewpoint.zoom, 2.0, epsilon = 1e-4);

    // Neue Baseline durch Zurücksetzen der Kamera
    h.intent(AppIntent::ResetCameraRequested);
    h.intent(AppIntent::PresetLoadRequested { slot: 3 });
    h.settle();

    let position = h.state.view.camera.position;
    assert_relative_eq!(position.x, stored.position.x, epsilon = 1e-3);
    assert_relative_eq!(position.y, stored.position.y, epsilon = 1e-3);
    assert_relative_eq!(position.z, stored.position.z, epsilon = 1e-3);
}

#[test]
fn test_manual_navigation_cancels_animation() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::SelectElementRequested { element: id(42) });
    assert!(h.state.view.is_animating());
    h.intent(AppIntent::OrbitDragged {
        delta: Vec2::new(10.0, 0.0),
    });
    assert!(!h.state.view.is_animating());
}

#[test]
fn test_selection_focus_supersedes_pending_default_viewpoint() {
    let backend = backend(vec![("ground", box_7())]);
    let mut h = Harness::booted(&backend);

    // Slot 0 ist noch unterwegs, während der Nutzer ein Element fokussiert
    h.intent(AppIntent::DefaultViewpointRequested);
    h.intent(AppIntent::SelectElementRequested { element: id(7) });
    h.settle();

    let target = h.state.view.camera.target;
    let position = h.state.view.camera.position;
    assert_relative_eq!(target.x, 1.0, epsilon = 1e-3);
    assert_relative_eq!(target.y, 4.5, epsilon = 1e-3);
    assert_relative_eq!(target.z, 3.0, epsilon = 1e-3);
    assert_relative_eq!(position.x, 11.0, epsilon = 1e-3);
    assert_relative_eq!(position.y, 14.5, epsilon = 1e-3);
    assert_relative_eq!(position.z, 13.0, epsilon = 1e-3);
}

#[test]
fn test_manual_navigation_supersedes_pending_preset() {
    let backend = backend(vec![("ground", cube_42())]);
    backend.insert_preset(
        "ground",
        preset(4, "Detail", Vec3::new(3.0, 3.0, 3.0), Vec3::ZERO),
    );
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::PresetLoadRequested { slot: 4 });
    h.intent(AppIntent::DollyScrolled { scroll: 40.0 });
    let navigated = h.state.view.camera.position;
    h.settle();

    assert!(!h.state.view.is_animating());
    let position = h.state.view.camera.position;
    assert_relative_eq!(position.x, navigated.x, epsilon = 1e-4);
    assert_relative_eq!(position.y, navigated.y, epsilon = 1e-4);
    assert_relative_eq!(position.z, navigated.z, epsilon = 1e-4);
}

// ── Presets ─────────────────────────────────────────────────────

#[test]
fn test_default_viewpoint_uses_slot_zero() {
    let backend = backend(vec![("ground", cube_42())]);
    backend.insert_preset(
        "ground",
        preset(0, "Übersicht", Vec3::splat(10.0), Vec3::ZERO),
    );
    let mut h = Harness::booted(&backend);

    let position = h.state.view.camera.position;
    assert_relative_eq!(position.x, 10.0, epsilon = 1e-3);
    assert_relative_eq!(position.y, 10.0, epsilon = 1e-3);
    assert_relative_eq!(position.z, 10.0, epsilon = 1e-3);
    assert_eq!(h.state.presets.count, Some(1));

    // Explizites Laden nach manueller Navigation
    h.intent(AppIntent::OrbitDragged {
        delta: Vec2::new(120.0, 40.0),
    });
    h.intent(AppIntent::PresetLoadRequested { slot: 0 });
    h.settle();
    let position = h.state.view.camera.position;
    let target = h.state.view.camera.target;
    assert_relative_eq!(position.x, 10.0, epsilon = 1e-3);
    assert_relative_eq!(position.y, 10.0, epsilon = 1e-3);
    assert_relative_eq!(position.z, 10.0, epsilon = 1e-3);
    assert_relative_eq!(target.length(), 0.0, epsilon = 1e-3);
}

#[test]
fn test_default_chain_falls_through_to_first_occupied_slot() {
    let backend = backend(vec![("ground", cube_42())]);
    backend.insert_preset(
        "ground",
        preset(2, "Eingang", Vec3::new(5.0, 6.0, 7.0), Vec3::ZERO),
    );
    let h = Harness::booted(&backend);

    let position = h.state.view.camera.position;
    assert_relative_eq!(position.x, 5.0, epsilon = 1e-3);
    assert_relative_eq!(position.y, 6.0, epsilon = 1e-3);
    assert_relative_eq!(position.z, 7.0, epsilon = 1e-3);
    assert_eq!(backend.calls().preset_gets, 3);
}

#[test]
fn test_preset_slots_keep_identity_after_delete() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut h = Harness::booted(&backend);

    h.intent(AppIntent::PresetSaveRequested {
        slot: 2,
        label: "Eingang".into(),
    });
    h.intent(AppIntent::PresetSaveRequested {
        slot: 5,
        label: "Dach".into(),
    });
    h.settle();
    assert_eq!(h.state.presets.count, Some(2));

    h.intent(AppIntent::PresetDeleteRequested { slot: 2 });
    h.settle();

    assert!(h.state.presets.slots.get(slot(2)).is_none());
    assert_eq!(
        h.state.presets.slots.get(slot(5)).map(|s| s.label.as_str()),
        Some("Dach")
    );
    assert_eq!(h.state.presets.count, Some(1));
    assert!(backend.preset("ground", slot(5)).is_some());
}

#[test]
fn test_preset_list_is_served_from_cache() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut h = Harness::booted(&backend);
    let lists = backend.calls().preset_lists;
    assert_eq!(lists, 1);

    h.intent(AppIntent::PresetListRequested);
    h.settle();
    assert_eq!(backend.calls().preset_lists, lists);

    h.intent(AppIntent::ClearPresetCacheRequested);
    h.intent(AppIntent::PresetListRequested);
    h.settle();
    assert_eq!(backend.calls().preset_lists, lists + 1);
}

#[test]
fn test_invalid_preset_requests_are_rejected() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut h = Harness::booted(&backend);
    let before = backend.calls().preset_mutations;

    let out_of_range = h
        .controller
        .handle_intent(&mut h.state, AppIntent::PresetSaveRequested {
            slot: 20,
            label: "x".into(),
        });
    assert!(out_of_range.is_err());

    let too_long = h.controller.handle_intent(
        &mut h.state,
        AppIntent::PresetRenameRequested {
            slot: 0,
            label: "x".repeat(101),
        },
    );
    assert!(too_long.is_err());
    assert_eq!(backend.calls().preset_mutations, before);
}

// ── Lebenszyklus ────────────────────────────────────────────────

#[test]
fn test_shutdown_releases_scene_and_logs_command() {
    let backend = backend(vec![("ground", cube_42())]);
    let mut h = Harness::booted(&backend);
    h.intent(AppIntent::SelectElementRequested { element: id(42) });
    h.tick(Duration::from_millis(100));

    h.intent(AppIntent::ShutdownRequested);

    assert!(h.state.should_exit);
    assert_eq!(h.state.scene.len(), 0);
    assert!(h.state.scheduler.is_empty());
    let last = h
        .state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");
    assert!(matches!(last, AppCommand::Shutdown));
}
