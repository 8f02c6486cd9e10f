//! Fehlertypen an der Netzwerk- bzw. Dienstgrenze.

use thiserror::Error;

/// Fehler eines externen Dienstes (Modellquelle, Metadaten, Blacklist, Presets).
///
/// "Nicht gefunden" ist kein Fehler; die Dienste liefern dafür eigene
/// Ergebniswerte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Verbindung fehlgeschlagen, Timeout o.ä.
    #[error("Netzwerkfehler: {0}")]
    Network(String),
    /// Antwort mit Nicht-2xx-Status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// Antwort konnte nicht dekodiert werden
    #[error("Antwort nicht lesbar: {0}")]
    Decode(String),
    /// Modell-Asset fehlt oder ist fehlerhaft
    #[error("Modell-Asset fehlerhaft: {0}")]
    Asset(String),
    /// Dienst intern nicht verfügbar
    #[error("Dienst nicht verfügbar: {0}")]
    Unavailable(String),
}

impl ServiceError {
    /// HTTP-Status, falls vorhanden.
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Handlungsempfehlung für die Anzeige.
    pub fn remedy(&self) -> &'static str {
        match self {
            ServiceError::Network(_) | ServiceError::Unavailable(_) => {
                "Verbindung prüfen und erneut versuchen."
            }
            ServiceError::Status { status, .. } if *status >= 500 => {
                "Serverfehler, später erneut versuchen."
            }
            ServiceError::Status { .. } => "Anfrage prüfen und erneut versuchen.",
            ServiceError::Decode(_) => "Serverantwort unerwartet, Backend-Version prüfen.",
            ServiceError::Asset(_) => "Anderes Modell wählen oder Laden wiederholen.",
        }
    }

    /// Kurzbeschreibung samt Empfehlung.
    pub fn user_message(&self) -> String {
        format!("{} {}", self, self.remedy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_diagnostics() {
        let err = ServiceError::Status {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(err.user_message().contains("503"));
        assert!(err.remedy().contains("später"));
        assert_eq!(ServiceError::Network("timeout".into()).status(), None);
    }
}
