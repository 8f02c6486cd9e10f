//! Element-Identifier und Element-Eigenschaften aus dem IFC-Export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Stabiler Identifier eines Bauteils innerhalb eines Modells.
///
/// Der Rohwert 0 ist reserviert ("kein Element") und lässt sich nicht
/// als `ElementId` darstellen. Gleiche Werte in verschiedenen Modellen
/// bezeichnen unabhängige Bauteile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(NonZeroU32);

impl ElementId {
    /// Erstellt einen Identifier aus einem Rohwert. `0` ergibt `None`.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Rohwert für Backend-Aufrufe und Anzeige.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platzhalter, wenn kein Anzeigename ermittelt werden kann.
pub const UNKNOWN_ELEMENT_NAME: &str = "-";

/// IFC-Attribute eines Bauteils, so wie sie im Mesh-Asset mitgeliefert werden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementProperties {
    #[serde(rename = "Name", default, alias = "name")]
    pub name: Option<String>,
    #[serde(rename = "LongName", default)]
    pub long_name: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "GlobalId", default)]
    pub global_id: Option<String>,
    #[serde(rename = "Tag", default)]
    pub tag: Option<String>,
    #[serde(rename = "ObjectType", default, alias = "objectType")]
    pub object_type: Option<String>,
    #[serde(rename = "PredefinedType", default, alias = "PredefType")]
    pub predefined_type: Option<String>,
}

impl ElementProperties {
    /// Primärer Anzeigename: Name → LongName → Description → GlobalId → Tag → "-".
    pub fn primary_name(&self) -> String {
        first_filled(&[
            &self.name,
            &self.long_name,
            &self.description,
            &self.global_id,
            &self.tag,
        ])
        .unwrap_or(UNKNOWN_ELEMENT_NAME)
        .to_string()
    }

    /// Sekundärer Name (Typ): ObjectType → PredefinedType → leer.
    pub fn secondary_name(&self) -> String {
        first_filled(&[&self.object_type, &self.predefined_type])
            .unwrap_or_default()
            .to_string()
    }
}

fn first_filled<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_an_element() {
        assert!(ElementId::new(0).is_none());
        assert_eq!(ElementId::new(42).map(ElementId::get), Some(42));
    }

    #[test]
    fn primary_name_follows_fallback_chain() {
        let mut props = ElementProperties {
            global_id: Some("2O2Fr$t4X7Zf8NOew3FLOH".into()),
            tag: Some("T-1".into()),
            ..Default::default()
        };
        assert_eq!(props.primary_name(), "2O2Fr$t4X7Zf8NOew3FLOH");

        props.description = Some("  ".into());
        assert_eq!(props.primary_name(), "2O2Fr$t4X7Zf8NOew3FLOH");

        props.name = Some("Wand EG".into());
        assert_eq!(props.primary_name(), "Wand EG");
    }

    #[test]
    fn missing_properties_fall_back_to_placeholder() {
        let props = ElementProperties::default();
        assert_eq!(props.primary_name(), UNKNOWN_ELEMENT_NAME);
        assert_eq!(props.secondary_name(), "");
    }

    #[test]
    fn secondary_name_prefers_object_type() {
        let props: ElementProperties =
            serde_json::from_str(r#"{"PredefinedType":"SOLIDWALL","ObjectType":"Basic Wall"}"#)
                .expect("gültiges JSON");
        assert_eq!(props.secondary_name(), "Basic Wall");
    }
}
