//! HTTP-Anbindung an das Viewer-Backend (JSON über ureq).
//!
//! Endpunkte relativ zur Basis-URL:
//! - `GET  models/{key}.json`
//! - `POST bim` `{model, expressID}`
//! - `GET|POST blacklist`
//! - `GET presets/{model}`, `GET presets/{model}/count`
//! - `GET|PUT|DELETE|PATCH presets/{model}/{slot}`

use super::files::read_with_progress;
use super::{
    BlacklistEntry, BlacklistStore, DownloadProgress, MetadataLookup, MetadataStore, ModelSource,
    PresetStore, SaveOutcome, ServiceError,
};
use crate::core::{CameraViewpoint, ElementId, ModelMesh, PresetSlot, SlotIndex};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Verbindungs-Timeout für alle Anfragen.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(CONNECT_TIMEOUT)
        .build()
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Übersetzt ureq-Fehler in `ServiceError`.
fn map_error(err: ureq::Error) -> ServiceError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response
                .into_string()
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| format!("Status {status}"));
            ServiceError::Status { status, message }
        }
        ureq::Error::Transport(transport) => ServiceError::Network(transport.to_string()),
    }
}

/// Führt eine Anfrage aus; 404 wird zu `Ok(None)`.
fn optional(result: Result<ureq::Response, ureq::Error>) -> Result<Option<ureq::Response>, ServiceError> {
    match result {
        Ok(response) => Ok(Some(response)),
        Err(ureq::Error::Status(404, _)) => Ok(None),
        Err(err) => Err(map_error(err)),
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: ureq::Response) -> Result<T, ServiceError> {
    response
        .into_json::<T>()
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

// ── Modelle ─────────────────────────────────────────────────────────

/// Lädt Mesh-Assets per HTTP.
pub struct HttpModelSource {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpModelSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            agent: agent(),
        }
    }
}

impl ModelSource for HttpModelSource {
    fn fetch_model(
        &self,
        key: &str,
        progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<ModelMesh, ServiceError> {
        let url = join(&self.base_url, &format!("models/{key}.json"));
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| match map_error(e) {
                ServiceError::Status { status, message } => {
                    ServiceError::Asset(format!("{url}: HTTP {status} {message}"))
                }
                other => other,
            })?;
        let total = response
            .header("Content-Length")
            .and_then(|v| v.parse::<u64>().ok());
        let mut reader = response.into_reader();
        let bytes = read_with_progress(&mut reader, total, progress)
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        ModelMesh::from_json_slice(&bytes).map_err(|e| ServiceError::Asset(format!("{url}: {e}")))
    }
}

// ── Zeilenformate ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MetadataRequest<'a> {
    model: &'a str,
    #[serde(rename = "expressID")]
    express_id: u32,
}

#[derive(Debug, Deserialize)]
struct BlacklistRow {
    expressid: u32,
    modelname: String,
    #[serde(default)]
    subobject_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct BlacklistInsert<'a> {
    #[serde(rename = "expressID")]
    express_id: u32,
    modelname: &'a str,
    subobject_name: &'a str,
}

/// Preset-Zeile, wie sie das Backend liefert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PresetRow {
    pub preset_index: usize,
    pub label: String,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub target_z: f32,
    pub zoom: f32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl PresetRow {
    /// Zeilen mit ungültigem Index werden verworfen.
    pub(crate) fn into_slot(self) -> Option<PresetSlot> {
        let index = SlotIndex::new(self.preset_index).ok()?;
        Some(PresetSlot {
            index,
            label: self.label,
            viewpoint: CameraViewpoint::new(
                Vec3::new(self.position_x, self.position_y, self.position_z),
                Vec3::new(self.target_x, self.target_y, self.target_z),
                self.zoom,
            ),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
struct PresetUpsert<'a> {
    label: &'a str,
    position_x: f32,
    position_y: f32,
    position_z: f32,
    target_x: f32,
    target_y: f32,
    target_z: f32,
    zoom: f32,
}

#[derive(Debug, Serialize)]
struct LabelPatch<'a> {
    label: &'a str,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: usize,
}

// ── Backend ─────────────────────────────────────────────────────────

/// JSON-Backend für Metadaten, Blacklist und Presets.
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            agent: agent(),
        }
    }

    fn url(&self, path: &str) -> String {
        join(&self.base_url, path)
    }

    fn preset_url(&self, model: &str, slot: SlotIndex) -> String {
        self.url(&format!("presets/{}/{}", model, slot.get()))
    }
}

impl MetadataStore for HttpBackend {
    fn lookup(&self, model: &str, element: ElementId) -> Result<MetadataLookup, ServiceError> {
        let body = MetadataRequest {
            model,
            express_id: element.get(),
        };
        let result = self.agent.post(&self.url("bim")).send_json(&body);
        match optional(result)? {
            Some(response) => Ok(MetadataLookup::Found(decode(response)?)),
            None => Ok(MetadataLookup::NotFound),
        }
    }
}

impl BlacklistStore for HttpBackend {
    fn load_all(&self) -> Result<Vec<BlacklistEntry>, ServiceError> {
        let response = self
            .agent
            .get(&self.url("blacklist"))
            .call()
            .map_err(map_error)?;
        let rows: Vec<BlacklistRow> = decode(response)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                Some(BlacklistEntry {
                    element: ElementId::new(row.expressid)?,
                    model: row.modelname,
                    subobject_name: row.subobject_name.unwrap_or_default(),
                })
            })
            .collect())
    }

    fn add(&self, entry: &BlacklistEntry) -> Result<(), ServiceError> {
        let body = BlacklistInsert {
            express_id: entry.element.get(),
            modelname: &entry.model,
            subobject_name: &entry.subobject_name,
        };
        self.agent
            .post(&self.url("blacklist"))
            .send_json(&body)
            .map_err(map_error)?;
        Ok(())
    }
}

impl PresetStore for HttpBackend {
    fn list(&self, model: &str) -> Result<Vec<PresetSlot>, ServiceError> {
        let response = self
            .agent
            .get(&self.url(&format!("presets/{model}")))
            .call()
            .map_err(map_error)?;
        let rows: Vec<PresetRow> = decode(response)?;
        Ok(rows.into_iter().filter_map(PresetRow::into_slot).collect())
    }

    fn get(&self, model: &str, slot: SlotIndex) -> Result<Option<PresetSlot>, ServiceError> {
        let result = self.agent.get(&self.preset_url(model, slot)).call();
        match optional(result)? {
            Some(response) => {
                let row: PresetRow = decode(response)?;
                Ok(row.into_slot())
            }
            None => Ok(None),
        }
    }

    fn upsert(
        &self,
        model: &str,
        slot: SlotIndex,
        label: &str,
        viewpoint: CameraViewpoint,
    ) -> Result<SaveOutcome, ServiceError> {
        let body = PresetUpsert {
            label,
            position_x: viewpoint.position.x,
            position_y: viewpoint.position.y,
            position_z: viewpoint.position.z,
            target_x: viewpoint.target.x,
            target_y: viewpoint.target.y,
            target_z: viewpoint.target.z,
            zoom: viewpoint.zoom,
        };
        let response = self
            .agent
            .put(&self.preset_url(model, slot))
            .send_json(&body)
            .map_err(map_error)?;
        decode(response)
    }

    fn delete(&self, model: &str, slot: SlotIndex) -> Result<bool, ServiceError> {
        let result = self.agent.delete(&self.preset_url(model, slot)).call();
        Ok(optional(result)?.is_some())
    }

    fn rename(&self, model: &str, slot: SlotIndex, label: &str) -> Result<bool, ServiceError> {
        let result = self
            .agent
            .request("PATCH", &self.preset_url(model, slot))
            .send_json(&LabelPatch { label });
        Ok(optional(result)?.is_some())
    }

    fn count(&self, model: &str) -> Result<usize, ServiceError> {
        let response = self
            .agent
            .get(&self.url(&format!("presets/{model}/count")))
            .call()
            .map_err(map_error)?;
        let body: CountResponse = decode(response)?;
        Ok(body.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_row_maps_into_slot() {
        let row: PresetRow = serde_json::from_str(
            r#"{"preset_index":0,"label":"Entrance","position_x":10,"position_y":10,"position_z":10,
                "target_x":0,"target_y":0,"target_z":0,"zoom":1.0,"created_at":"2024-01-01T00:00:00Z"}"#,
        )
        .expect("gültige Zeile");
        let slot = row.into_slot().expect("gültiger Index");
        assert_eq!(slot.index.get(), 0);
        assert_eq!(slot.viewpoint.position, Vec3::splat(10.0));
        assert_eq!(slot.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert!(slot.updated_at.is_none());
    }

    #[test]
    fn preset_row_with_invalid_index_is_dropped() {
        let row = PresetRow {
            preset_index: 42,
            label: "x".into(),
            position_x: 0.0,
            position_y: 0.0,
            position_z: 0.0,
            target_x: 0.0,
            target_y: 0.0,
            target_z: 0.0,
            zoom: 1.0,
            created_at: None,
            updated_at: None,
        };
        assert!(row.into_slot().is_none());
    }

    #[test]
    fn url_join_tolerates_trailing_slash() {
        assert_eq!(join("http://localhost:3000/api/", "bim"), "http://localhost:3000/api/bim");
        assert_eq!(join("http://localhost:3000/api", "bim"), "http://localhost:3000/api/bim");
    }

    #[test]
    fn metadata_request_uses_backend_field_names() {
        let body = serde_json::to_value(MetadataRequest {
            model: "ground",
            express_id: 7,
        })
        .expect("serialisierbar");
        assert_eq!(body, serde_json::json!({"model": "ground", "expressID": 7}));
    }
}
