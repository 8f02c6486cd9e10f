//! Modellquelle aus einem lokalen Verzeichnis (`{dir}/{key}.json`).

use super::{DownloadProgress, ModelSource, ServiceError};
use crate::core::ModelMesh;
use std::io::Read;
use std::path::PathBuf;

/// Blockgröße beim Einlesen (für Fortschrittsmeldungen).
const READ_CHUNK: usize = 256 * 1024;

/// Obergrenze der Vorab-Reservierung; die Größenangabe stammt vom Server.
const MAX_PREALLOC: u64 = READ_CHUNK as u64 * 64;

/// Lädt Mesh-Assets als JSON-Dateien von der Platte.
#[derive(Debug, Clone)]
pub struct FileModelSource {
    dir: PathBuf,
}

impl FileModelSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Pfad des Assets zu einem Modellschlüssel.
    pub fn asset_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ModelSource for FileModelSource {
    fn fetch_model(
        &self,
        key: &str,
        progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<ModelMesh, ServiceError> {
        let path = self.asset_path(key);
        let mut file = std::fs::File::open(&path)
            .map_err(|e| ServiceError::Asset(format!("{}: {}", path.display(), e)))?;
        let total = file.metadata().ok().map(|m| m.len());

        let bytes = read_with_progress(&mut file, total, progress)
            .map_err(|e| ServiceError::Asset(format!("{}: {}", path.display(), e)))?;

        ModelMesh::from_json_slice(&bytes)
            .map_err(|e| ServiceError::Asset(format!("{}: {}", path.display(), e)))
    }
}

/// Liest einen Stream vollständig und meldet den Fortschritt pro Block.
pub(crate) fn read_with_progress(
    reader: &mut dyn Read,
    total: Option<u64>,
    progress: &mut dyn FnMut(DownloadProgress),
) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(total.map_or(0, |t| t.min(MAX_PREALLOC)) as usize);
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        progress(DownloadProgress {
            loaded: bytes.len() as u64,
            total,
        });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MeshBuilder;
    use glam::Vec3;

    #[test]
    fn loads_asset_from_directory_and_reports_progress() {
        let dir = std::env::temp_dir().join(format!("bim_viewer_files_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("Temp-Verzeichnis");
        let asset = MeshBuilder::new()
            .add_box(3, Vec3::ZERO, Vec3::ONE, [1.0; 4])
            .into_asset();
        std::fs::write(
            dir.join("ground.json"),
            serde_json::to_vec(&asset).expect("serialisierbar"),
        )
        .expect("Datei schreiben");

        let source = FileModelSource::new(&dir);
        let mut reports = Vec::new();
        let mesh = source
            .fetch_model("ground", &mut |p| reports.push(p))
            .expect("Asset lesbar");

        assert_eq!(mesh.triangle_count(), 12);
        let last = reports.last().expect("Fortschritt gemeldet");
        assert_eq!(Some(last.loaded), last.total);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn oversized_length_header_does_not_reserve_upfront() {
        let mut reader: &[u8] = b"{}";
        let total = Some(u64::MAX / 2);
        let mut reports = Vec::new();

        let bytes = read_with_progress(&mut reader, total, &mut |p| reports.push(p))
            .expect("Stream lesbar");

        assert_eq!(bytes, b"{}");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].loaded, 2);
        assert_eq!(reports[0].total, total);
    }

    #[test]
    fn missing_asset_is_an_asset_error() {
        let source = FileModelSource::new("/nonexistent/bim_viewer");
        let err = source
            .fetch_model("ground", &mut |_| {})
            .expect_err("Datei fehlt");
        assert!(matches!(err, ServiceError::Asset(_)));
    }
}
