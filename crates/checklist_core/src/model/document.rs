//! Document and section wrappers around output items.
//!
//! # Responsibility
//! - Hold session-stable identifiers for the document and its section.
//! - Assemble the two-level export structure.
//!
//! # Invariants
//! - `id` values come from [`SessionIds`] and never change within a session.
//! - `uuid` values are regenerated every time a document is assembled.

use crate::model::record::OutputRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the short section identifier.
pub const SECTION_ID_LEN: usize = 10;

/// Identifiers generated once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIds {
    /// Full hyphenated UUID v4 string.
    pub document_id: String,
    /// First [`SECTION_ID_LEN`] characters of a UUID v4 string.
    pub section_id: String,
}

impl SessionIds {
    pub fn generate() -> Self {
        let mut section_id = Uuid::new_v4().to_string();
        section_id.truncate(SECTION_ID_LEN);
        Self {
            document_id: Uuid::new_v4().to_string(),
            section_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub text: String,
    pub id: String,
    pub uuid: Uuid,
    pub children: Vec<OutputRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub uuid: Uuid,
    pub children: Vec<Section>,
}

impl Document {
    /// Wraps `records` into one section under one document.
    ///
    /// Document and section `uuid` values are freshly generated on each call.
    pub fn assemble(
        ids: &SessionIds,
        document_title: &str,
        section_title: &str,
        records: &[OutputRecord],
    ) -> Self {
        let section = Section {
            text: section_title.to_string(),
            id: ids.section_id.clone(),
            uuid: Uuid::new_v4(),
            children: records.to_vec(),
        };
        Self {
            id: ids.document_id.clone(),
            text: document_title.to_string(),
            uuid: Uuid::new_v4(),
            children: vec![section],
        }
    }
}
