//! Formatter defaults applied when items are generated.
//!
//! # Invariants
//! - Defaults only affect newly generated items; edits made afterwards win.

use crate::model::record::ItemType;

/// Section title pre-filled for a fresh session.
pub const DEFAULT_SECTION_TITLE: &str = "Inspection List";

/// Defaults used by the transformer and the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterDefaults {
    /// Type assigned to every generated item.
    pub item_type: ItemType,
    /// Mandatory flag assigned to every generated item.
    pub is_mandatory: bool,
    /// Initial section title for new sessions.
    pub section_title: String,
}

impl Default for FormatterDefaults {
    fn default() -> Self {
        Self {
            item_type: ItemType::NumberType2,
            is_mandatory: false,
            section_title: DEFAULT_SECTION_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FormatterDefaults, DEFAULT_SECTION_TITLE};
    use crate::model::record::ItemType;

    #[test]
    fn defaults_match_form_initial_state() {
        let defaults = FormatterDefaults::default();
        assert_eq!(defaults.item_type, ItemType::NumberType2);
        assert!(!defaults.is_mandatory);
        assert_eq!(defaults.section_title, DEFAULT_SECTION_TITLE);
    }
}
