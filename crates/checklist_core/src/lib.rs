//! Core logic for the checklist formatter.
//! This crate owns parsing, item generation, edits and export shape.

pub mod clipboard;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;

pub use clipboard::{Clipboard, ClipboardError, ClipboardTool, MemoryClipboard, SystemClipboard};
pub use config::{FormatterDefaults, DEFAULT_SECTION_TITLE};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::document::{Document, Section, SessionIds, SECTION_ID_LEN};
pub use model::record::{title_markup, InputRecord, ItemId, ItemType, OutputRecord, UnknownItemType};
pub use service::exporter::ExportError;
pub use service::input_parser::{parse_input, InputError, ParsedInput};
pub use service::session::{EditError, FormatterSession, PasteOutcome, SessionError};
pub use service::table_view::render_table;
pub use service::transformer::{transform, ProcessError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
