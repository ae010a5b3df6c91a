//! Formatter session: the single owner of form state.
//!
//! # Responsibility
//! - Hold pasted text, titles, parsed input pairs and generated items.
//! - Route each user action (paste, process, edit, export, copy) to services.
//!
//! # Invariants
//! - A rejected paste leaves held input pairs and generated items unchanged.
//! - A refused process leaves generated items unchanged.
//! - Edits touch exactly one item.
//! - Export always reflects live item state.

use crate::clipboard::Clipboard;
use crate::config::FormatterDefaults;
use crate::model::document::{Document, SessionIds};
use crate::model::record::{InputRecord, ItemId, ItemType, OutputRecord, UnknownItemType};
use crate::service::exporter::{self, ExportError};
use crate::service::input_parser::{parse_input, InputError, ParsedInput};
use crate::service::table_view::render_table;
use crate::service::transformer::{transform, ProcessError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for point edits on generated items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    IndexOutOfRange { index: usize, len: usize },
    UnknownType(UnknownItemType),
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "item index {index} out of range (have {len} items)")
            }
            Self::UnknownType(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownType(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<UnknownItemType> for EditError {
    fn from(value: UnknownItemType) -> Self {
        Self::UnknownType(value)
    }
}

/// Umbrella error for callers driving a whole session flow.
#[derive(Debug)]
pub enum SessionError {
    Input(InputError),
    Process(ProcessError),
    Edit(EditError),
    Export(ExportError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Process(err) => write!(f, "{err}"),
            Self::Edit(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Process(err) => Some(err),
            Self::Edit(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<InputError> for SessionError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<ProcessError> for SessionError {
    fn from(value: ProcessError) -> Self {
        Self::Process(value)
    }
}

impl From<EditError> for SessionError {
    fn from(value: EditError) -> Self {
        Self::Edit(value)
    }
}

impl From<ExportError> for SessionError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Result of accepting pasted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Text was blank; held input pairs were dropped.
    Cleared,
    /// Text parsed; held input pairs were replaced with `count` pairs.
    Loaded { count: usize },
}

/// In-memory form session.
#[derive(Debug, Clone)]
pub struct FormatterSession {
    defaults: FormatterDefaults,
    ids: SessionIds,
    input_text: String,
    document_title: String,
    section_title: String,
    inputs: Vec<InputRecord>,
    records: Vec<OutputRecord>,
}

impl Default for FormatterSession {
    fn default() -> Self {
        Self::new(FormatterDefaults::default())
    }
}

impl FormatterSession {
    /// Starts a session with fresh session ids and an empty document title.
    pub fn new(defaults: FormatterDefaults) -> Self {
        Self::with_ids(defaults, SessionIds::generate())
    }

    /// Starts a session with caller-provided session ids.
    pub fn with_ids(defaults: FormatterDefaults, ids: SessionIds) -> Self {
        let section_title = defaults.section_title.clone();
        info!("event=session_start module=session status=ok");
        Self {
            defaults,
            ids,
            input_text: String::new(),
            document_title: String::new(),
            section_title,
            inputs: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn ids(&self) -> &SessionIds {
        &self.ids
    }

    pub fn defaults(&self) -> &FormatterDefaults {
        &self.defaults
    }

    pub fn document_title(&self) -> &str {
        &self.document_title
    }

    pub fn set_document_title(&mut self, title: impl Into<String>) {
        self.document_title = title.into();
    }

    pub fn section_title(&self) -> &str {
        &self.section_title
    }

    pub fn set_section_title(&mut self, title: impl Into<String>) {
        self.section_title = title.into();
    }

    /// Last pasted text, whether or not it parsed.
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Input pairs from the last successful paste.
    pub fn inputs(&self) -> &[InputRecord] {
        &self.inputs
    }

    /// Generated items with any edits applied.
    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    /// Accepts pasted text.
    ///
    /// # Errors
    /// Returns [`InputError`] for malformed text; held state is unchanged.
    pub fn paste(&mut self, text: impl Into<String>) -> Result<PasteOutcome, InputError> {
        self.input_text = text.into();
        match parse_input(&self.input_text)? {
            ParsedInput::Cleared => {
                self.inputs.clear();
                Ok(PasteOutcome::Cleared)
            }
            ParsedInput::Records(records) => {
                let count = records.len();
                self.inputs = records;
                Ok(PasteOutcome::Loaded { count })
            }
        }
    }

    /// Generates items from held input pairs, replacing previous items.
    ///
    /// Returns the number of generated items.
    pub fn process(&mut self) -> Result<usize, ProcessError> {
        self.records = transform(
            &self.inputs,
            &self.document_title,
            &self.section_title,
            &self.defaults,
        )?;
        Ok(self.records.len())
    }

    /// Sets the type of item `index` (0-based).
    pub fn set_type(&mut self, index: usize, kind: ItemType) -> Result<(), EditError> {
        let record = self.record_mut(index)?;
        record.kind = kind;
        debug!("event=item_edit module=session status=ok field=type index={index} value={kind}");
        Ok(())
    }

    /// Sets the type of item `index` from its wire name.
    pub fn set_type_str(&mut self, index: usize, kind: &str) -> Result<(), EditError> {
        let kind = kind.parse::<ItemType>()?;
        self.set_type(index, kind)
    }

    /// Sets the mandatory flag of item `index` (0-based).
    pub fn set_mandatory(&mut self, index: usize, is_mandatory: bool) -> Result<(), EditError> {
        let record = self.record_mut(index)?;
        record.is_mandatory = is_mandatory;
        debug!(
            "event=item_edit module=session status=ok field=is_mandatory index={index} value={is_mandatory}"
        );
        Ok(())
    }

    /// Flips the mandatory flag of item `index` and returns the new value.
    pub fn toggle_mandatory(&mut self, index: usize) -> Result<bool, EditError> {
        let next = !self.record_mut(index)?.is_mandatory;
        self.set_mandatory(index, next)?;
        Ok(next)
    }

    /// Finds the position of the item carrying `uuid`.
    pub fn index_of(&self, uuid: ItemId) -> Option<usize> {
        self.records.iter().position(|record| record.uuid == uuid)
    }

    /// Assembles the export structure from live state.
    pub fn documents(&self) -> Vec<Document> {
        exporter::build_documents(
            &self.ids,
            &self.document_title,
            &self.section_title,
            &self.records,
        )
    }

    /// Serializes the export structure as indented JSON.
    pub fn export_json(&self) -> Result<String, ExportError> {
        exporter::to_json(&self.documents())
    }

    /// Copies the export JSON to `clipboard`.
    ///
    /// # Errors
    /// - [`ExportError::NothingToCopy`] when no items have been generated.
    /// - [`ExportError::Clipboard`] when the write fails; session state is kept.
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) -> Result<(), ExportError> {
        exporter::copy_export(
            clipboard,
            &self.ids,
            &self.document_title,
            &self.section_title,
            &self.records,
        )
    }

    /// Renders generated items as a text table.
    pub fn table(&self) -> String {
        render_table(&self.records)
    }

    fn record_mut(&mut self, index: usize) -> Result<&mut OutputRecord, EditError> {
        let len = self.records.len();
        self.records
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange { index, len })
    }
}
