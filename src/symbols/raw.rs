//! Raw symbol records as emitted by the discovery layer.
//!
//! Field names follow the language-server document-symbol shape that Serena
//! forwards (`selectionRange`, `range.start`/`range.end`, `character`). Every
//! field is optional here; [`Symbol::from_raw`](super::Symbol::from_raw)
//! decides which absences are fatal.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosition {
    pub line: u32,
    pub character: u32,
}

impl RawPosition {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<RawPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<RawPosition>,
}

/// `path` and Serena's `relativePath` may both be present; `path` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(
        default,
        rename = "relativePath",
        skip_serializing_if = "Option::is_none"
    )]
    pub relative_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RawRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSymbolRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<RawLocation>,
    #[serde(
        default,
        rename = "selectionRange",
        skip_serializing_if = "Option::is_none"
    )]
    pub selection_range: Option<RawRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<RawSymbolRecord>,
}

impl RawLocation {
    pub fn new(path: impl Into<String>, range: Option<RawRange>) -> Self {
        Self {
            path: Some(path.into()),
            relative_path: None,
            range,
        }
    }

    pub fn file_path(&self) -> Option<&str> {
        self.path.as_deref().or(self.relative_path.as_deref())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawSymbolRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawSymbolRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawSymbolRecord {
    pub(crate) fn path(&self) -> Option<&str> {
        self.location.as_ref()?.file_path()
    }

    pub(crate) fn range_end(&self) -> Option<RawPosition> {
        self.location.as_ref()?.range.as_ref()?.end
    }

    pub(crate) fn selection_start(&self) -> Option<RawPosition> {
        self.selection_range.as_ref()?.start
    }
}
