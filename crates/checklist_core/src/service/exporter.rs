//! Export of output items as the downstream JSON document.
//!
//! # Responsibility
//! - Wrap live output items into document → section → items.
//! - Serialize with two-space indentation and hand text to a clipboard.
//!
//! # Invariants
//! - Export text is recomputed on every call; nothing is cached.
//! - Copy refuses when there are no items.

use crate::clipboard::{Clipboard, ClipboardError};
use crate::model::document::{Document, SessionIds};
use crate::model::record::OutputRecord;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ExportError {
    /// Copy requested before any items were generated.
    NothingToCopy,
    Serialize(serde_json::Error),
    Clipboard(ClipboardError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingToCopy => {
                write!(f, "no data to copy; please process some data first")
            }
            Self::Serialize(err) => write!(f, "failed to serialize document: {err}"),
            Self::Clipboard(err) => write!(f, "failed to copy to clipboard: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NothingToCopy => None,
            Self::Serialize(err) => Some(err),
            Self::Clipboard(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<ClipboardError> for ExportError {
    fn from(value: ClipboardError) -> Self {
        Self::Clipboard(value)
    }
}

/// Builds the one-element document array expected downstream.
pub fn build_documents(
    ids: &SessionIds,
    document_title: &str,
    section_title: &str,
    records: &[OutputRecord],
) -> Vec<Document> {
    vec![Document::assemble(
        ids,
        document_title,
        section_title,
        records,
    )]
}

/// Serializes the document array as indented JSON text.
pub fn to_json(documents: &[Document]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(documents)?)
}

/// Writes export text to `clipboard` when there is something to copy.
///
/// # Errors
/// - [`ExportError::NothingToCopy`] when `records` is empty.
/// - [`ExportError::Clipboard`] when the clipboard write fails.
pub fn copy_export(
    clipboard: &mut dyn Clipboard,
    ids: &SessionIds,
    document_title: &str,
    section_title: &str,
    records: &[OutputRecord],
) -> Result<(), ExportError> {
    if records.is_empty() {
        warn!("event=copy_refused module=exporter status=error reason=empty");
        return Err(ExportError::NothingToCopy);
    }

    let text = to_json(&build_documents(
        ids,
        document_title,
        section_title,
        records,
    ))?;
    clipboard.write_text(&text).inspect_err(|_| {
        warn!("event=copy_done module=exporter status=error");
    })?;

    info!(
        "event=copy_done module=exporter status=ok items={} bytes={}",
        records.len(),
        text.len()
    );
    Ok(())
}
