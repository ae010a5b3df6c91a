//! Input-to-output item transformation.
//!
//! # Responsibility
//! - Validate that there is something to process and both titles are set.
//! - Produce one output item per input pair, in order.
//!
//! # Invariants
//! - Output length equals input length; order is preserved.
//! - Every produced item gets a freshly generated `uuid`.

use crate::config::FormatterDefaults;
use crate::model::record::{InputRecord, OutputRecord};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for refused transform requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    /// No input records are held.
    NoInput,
    /// Document title is empty or whitespace.
    BlankDocumentTitle,
    /// Section title is empty or whitespace.
    BlankSectionTitle,
}

impl Display for ProcessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoInput => write!(f, "please paste valid JSON input first"),
            Self::BlankDocumentTitle => write!(f, "please enter a document title"),
            Self::BlankSectionTitle => write!(f, "please enter a section title"),
        }
    }
}

impl Error for ProcessError {}

/// Checks transform preconditions in user-facing order.
pub fn validate_request(
    records: &[InputRecord],
    document_title: &str,
    section_title: &str,
) -> Result<(), ProcessError> {
    if records.is_empty() {
        return Err(ProcessError::NoInput);
    }
    if document_title.trim().is_empty() {
        return Err(ProcessError::BlankDocumentTitle);
    }
    if section_title.trim().is_empty() {
        return Err(ProcessError::BlankSectionTitle);
    }
    Ok(())
}

/// Transforms input pairs into output items using `defaults`.
///
/// # Errors
/// Returns [`ProcessError`] when there is no input or a title is blank.
pub fn transform(
    records: &[InputRecord],
    document_title: &str,
    section_title: &str,
    defaults: &FormatterDefaults,
) -> Result<Vec<OutputRecord>, ProcessError> {
    validate_request(records, document_title, section_title).inspect_err(|err| {
        warn!("event=transform_refused module=transformer status=error reason={err:?}");
    })?;

    let items = records
        .iter()
        .map(|input| OutputRecord::from_input(input, defaults.item_type, defaults.is_mandatory))
        .collect::<Vec<_>>();

    info!(
        "event=transform_done module=transformer status=ok count={} default_type={}",
        items.len(),
        defaults.item_type
    );
    Ok(items)
}
