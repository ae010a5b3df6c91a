//! Input and output record models.
//!
//! # Responsibility
//! - Define the minimal `{line, name}` input pair.
//! - Define the enriched output item and its closed type classification.
//!
//! # Invariants
//! - `title` is always `<p>{name}</p>`.
//! - `expanded` is `true` at creation and has no mutator.
//! - `children` is always empty for generated items.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Identifier assigned to every generated output item.
pub type ItemId = Uuid;

/// Minimal record supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub line: String,
    pub name: String,
}

impl InputRecord {
    pub fn new(line: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            name: name.into(),
        }
    }
}

/// Closed set of item classifications understood by the downstream system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemType {
    /// Numeric reading.
    #[default]
    #[serde(rename = "number_type2")]
    NumberType2,
    #[serde(rename = "passfail")]
    PassFail,
    /// Pass/fail with an explicit "declined" answer.
    #[serde(rename = "passfail_decline")]
    PassFailDecline,
    /// Free text answer.
    #[serde(rename = "text_type2")]
    TextType2,
}

impl ItemType {
    /// All selectable types, in the order they are offered to the user.
    pub const ALL: [ItemType; 4] = [
        ItemType::NumberType2,
        ItemType::PassFail,
        ItemType::PassFailDecline,
        ItemType::TextType2,
    ];

    /// Returns the wire string used in exported JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NumberType2 => "number_type2",
            Self::PassFail => "passfail",
            Self::PassFailDecline => "passfail_decline",
            Self::TextType2 => "text_type2",
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known item types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownItemType(pub String);

impl Display for UnknownItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let expected = ItemType::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join("|");
        write!(f, "unknown item type `{}`; expected {expected}", self.0)
    }
}

impl Error for UnknownItemType {}

impl FromStr for ItemType {
    type Err = UnknownItemType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        ItemType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownItemType(normalized.to_string()))
    }
}

/// Wraps an item name into the display title markup.
pub fn title_markup(name: &str) -> String {
    format!("<p>{name}</p>")
}

/// Enriched item ready for export.
///
/// Field declaration order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub line: String,
    /// Generated once per transform, unique within an export.
    pub uuid: ItemId,
    pub name: String,
    /// Derived from `name`; see [`title_markup`].
    pub title: String,
    /// Serialized as `type` to match the downstream schema.
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub expanded: bool,
    pub is_mandatory: bool,
    /// Nesting is allowed by the schema but never populated.
    pub children: Vec<OutputRecord>,
}

impl OutputRecord {
    /// Builds an output item from an input pair with a fresh `uuid`.
    pub fn from_input(input: &InputRecord, kind: ItemType, is_mandatory: bool) -> Self {
        Self::with_id(Uuid::new_v4(), input, kind, is_mandatory)
    }

    /// Builds an output item with a caller-provided `uuid`.
    pub fn with_id(uuid: ItemId, input: &InputRecord, kind: ItemType, is_mandatory: bool) -> Self {
        Self {
            line: input.line.clone(),
            uuid,
            name: input.name.clone(),
            title: title_markup(&input.name),
            kind,
            expanded: true,
            is_mandatory,
            children: Vec::new(),
        }
    }
}
