//! Blacklist und ausgeblendete Elemente.

use super::ElementId;
use std::collections::BTreeSet;

/// Zwei unabhängige Mengen ignorierter Elemente.
///
/// Die Blacklist ist persistent und kann in der Sitzung nicht zurückgenommen
/// werden, die Hidden-Menge ist sitzungslokal und umkehrbar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IgnoreSet {
    blacklist: BTreeSet<ElementId>,
    hidden: BTreeSet<ElementId>,
}

/// Kennzahlen für die Anzeige.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreStats {
    pub blacklisted: usize,
    pub hidden: usize,
    pub total_ignored: usize,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Einziges Prädikat für Picking und Selektion.
    pub fn should_ignore(&self, id: ElementId) -> bool {
        self.blacklist.contains(&id) || self.hidden.contains(&id)
    }

    /// Nimmt ein Element in die Blacklist auf. `false`, wenn bereits enthalten.
    pub fn blacklist(&mut self, id: ElementId) -> bool {
        self.blacklist.insert(id)
    }

    /// Ersetzt die Blacklist (Initial-Load).
    pub fn replace_blacklist(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.blacklist = ids.into_iter().collect();
    }

    pub fn is_blacklisted(&self, id: ElementId) -> bool {
        self.blacklist.contains(&id)
    }

    /// Blendet ein Element aus. `false`, wenn bereits ausgeblendet.
    pub fn hide(&mut self, id: ElementId) -> bool {
        self.hidden.insert(id)
    }

    /// Blendet ein Element wieder ein. `false`, wenn es nicht ausgeblendet war.
    pub fn show(&mut self, id: ElementId) -> bool {
        self.hidden.remove(&id)
    }

    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.hidden.contains(&id)
    }

    /// Leert die Hidden-Menge und liefert die zuvor ausgeblendeten Elemente.
    pub fn clear_hidden(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.hidden).into_iter().collect()
    }

    pub fn hidden(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.hidden.iter().copied()
    }

    pub fn blacklisted(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.blacklist.iter().copied()
    }

    pub fn stats(&self) -> IgnoreStats {
        IgnoreStats {
            blacklisted: self.blacklist.len(),
            hidden: self.hidden.len(),
            total_ignored: self.blacklist.union(&self.hidden).count(),
        }
    }
}
