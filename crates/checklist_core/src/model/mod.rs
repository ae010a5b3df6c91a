//! Domain model for checklist formatting.
//!
//! # Responsibility
//! - Define the input pair shape accepted from pasted text.
//! - Define the export shape (document → section → items) expected downstream.
//!
//! # Invariants
//! - Every output item carries its own `uuid`, never shared with another item.
//! - Document and section `id` values are stable for one session.

pub mod document;
pub mod record;
