//! Formatter use-case services.
//!
//! # Responsibility
//! - Parse pasted text, transform pairs into items, and export documents.
//! - Keep CLI layers decoupled from model assembly details.

pub mod exporter;
pub mod input_parser;
pub mod session;
pub mod table_view;
pub mod transformer;
