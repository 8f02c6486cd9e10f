//! Handler für Blacklist und ausgeblendete Elemente.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::ElementId;

pub fn load_blacklist(state: &mut AppState) {
    use_cases::ignore_list::load_blacklist(state);
}

/// Blendet ein Element für die laufende Sitzung aus.
pub fn hide(state: &mut AppState, element: ElementId) {
    use_cases::ignore_list::hide(state, element);
}

/// Persistiert ein Element in der Blacklist des aktiven Modells.
pub fn blacklist(state: &mut AppState, element: ElementId, name: String) -> anyhow::Result<()> {
    use_cases::ignore_list::blacklist(state, element, name)
}

pub fn show(state: &mut AppState, element: ElementId) {
    use_cases::ignore_list::show(state, element);
}

pub fn show_all(state: &mut AppState) {
    use_cases::ignore_list::show_all(state);
}
