//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Verkleinerungsfaktor pro Mausrad-Raster bei Zoom-Geschwindigkeit 1.
const DOLLY_STEP: f32 = 0.95;
/// Scroll-Delta (Punkte) eines Mausrad-Rasters.
const SCROLL_PER_STEP: f32 = 50.0;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::StartupRequested => vec![
            AppCommand::LoadBlacklist,
            AppCommand::LoadModel {
                key: state.options.default_model.clone(),
            },
        ],
        AppIntent::ShutdownRequested => vec![AppCommand::Shutdown],
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],

        AppIntent::PointerMoved { screen_pos } => vec![AppCommand::UpdateHover { screen_pos }],
        AppIntent::PointerLeft => vec![AppCommand::ClearHover],
        AppIntent::ConfirmRequested { screen_pos } => {
            vec![AppCommand::CloseContextMenu, AppCommand::ConfirmPick { screen_pos }]
        }
        AppIntent::ContextRequested { screen_pos } => {
            vec![AppCommand::OpenContextMenu { screen_pos }]
        }

        AppIntent::ContextMenuDismissed => vec![AppCommand::CloseContextMenu],
        AppIntent::ContextUnselectRequested => {
            vec![AppCommand::CloseContextMenu, AppCommand::ClearSelection]
        }
        AppIntent::ContextHideRequested => match &state.context_menu {
            Some(menu) => vec![
                AppCommand::CloseContextMenu,
                AppCommand::HideElement {
                    element: menu.element,
                },
            ],
            None => Vec::new(),
        },
        AppIntent::ContextBlacklistRequested => match &state.context_menu {
            Some(menu) => vec![
                AppCommand::CloseContextMenu,
                AppCommand::BlacklistElement {
                    element: menu.element,
                    name: menu.name.clone(),
                },
            ],
            None => Vec::new(),
        },

        AppIntent::UnselectRequested => vec![AppCommand::ClearSelection],
        AppIntent::SelectElementRequested { element } => {
            vec![AppCommand::SelectElement { element }]
        }
        AppIntent::ShowHiddenRequested { element } => vec![AppCommand::ShowElement { element }],
        AppIntent::ShowAllHiddenRequested => vec![AppCommand::ShowAllHidden],
        AppIntent::BlacklistReloadRequested => vec![AppCommand::LoadBlacklist],

        AppIntent::OrbitDragged { delta } => vec![AppCommand::OrbitCamera { delta }],
        AppIntent::PanDragged { delta } => vec![AppCommand::PanCamera { delta }],
        AppIntent::DollyScrolled { scroll } => {
            if scroll == 0.0 || !scroll.is_finite() {
                return Vec::new();
            }
            let steps = scroll / SCROLL_PER_STEP;
            let factor = DOLLY_STEP.powf(state.options.zoom_speed * steps);
            vec![AppCommand::DollyCamera { factor }]
        }

        AppIntent::ModelSelected { key } => vec![AppCommand::LoadModel { key }],

        AppIntent::PresetSaveRequested { slot, label } => {
            vec![AppCommand::SavePreset { slot, label }]
        }
        AppIntent::PresetLoadRequested { slot } => vec![AppCommand::LoadPreset { slot }],
        AppIntent::PresetDeleteRequested { slot } => vec![AppCommand::DeletePreset { slot }],
        AppIntent::PresetRenameRequested { slot, label } => {
            vec![AppCommand::RenamePreset { slot, label }]
        }
        AppIntent::PresetListRequested => vec![AppCommand::RequestPresetList],
        AppIntent::PresetCountRequested => vec![AppCommand::RefreshPresetCount],
        AppIntent::DefaultViewpointRequested => vec![AppCommand::LoadDefaultViewpoint],
        AppIntent::ClearPresetCacheRequested => vec![AppCommand::ClearPresetCache],

        AppIntent::SetCameraStateRequested { viewpoint, animate } => {
            vec![AppCommand::SetCameraState { viewpoint, animate }]
        }
        AppIntent::SetZoomRequested { factor, animate } => {
            vec![AppCommand::SetZoom { factor, animate }]
        }
        AppIntent::ResetCameraRequested => vec![AppCommand::ResetCamera],

        AppIntent::MetadataPanelToggled => vec![AppCommand::ToggleMetadataPanel],
        AppIntent::PresetPanelToggled => vec![AppCommand::TogglePresetPanel],
        AppIntent::HiddenListToggled => vec![AppCommand::ToggleHiddenList],
    }
}
