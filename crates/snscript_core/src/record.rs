//! Script Include record extraction.
//!
//! A CI/CD export wraps the table record in one of a few known envelopes.
//! [`RecordShape::ALL`] lists the recognized envelopes in priority order and
//! [`locate_record`] returns the record from the first shape that matches.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::xml::{self, XmlNode};

/// Table name of Script Include records
pub const SCRIPT_INCLUDE_TABLE: &str = "sys_script_include";

/// Root element of an update-set record envelope
pub const RECORD_UPDATE: &str = "record_update";

/// Default for the `active` field when the export omits it
pub const DEFAULT_ACTIVE: &str = "true";

/// Recognized XML envelope shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordShape {
    /// `<record_update><sys_script_include>...</sys_script_include></record_update>`
    UpdateSetEnvelope,
    /// `<sys_script_include>...</sys_script_include>` as the document root
    DirectExport,
}

impl RecordShape {
    /// All shapes, in the order they are tried
    pub const ALL: [RecordShape; 2] = [RecordShape::UpdateSetEnvelope, RecordShape::DirectExport];

    /// Return the Script Include record if `root` has this shape
    pub fn locate(self, root: &XmlNode) -> Option<&XmlNode> {
        match self {
            RecordShape::UpdateSetEnvelope if root.name == RECORD_UPDATE => {
                root.child(SCRIPT_INCLUDE_TABLE)
            }
            RecordShape::DirectExport if root.name == SCRIPT_INCLUDE_TABLE => Some(root),
            _ => None,
        }
    }
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordShape::UpdateSetEnvelope => write!(f, "update-set envelope"),
            RecordShape::DirectExport => write!(f, "direct export"),
        }
    }
}

/// Find the Script Include record in a parsed document
pub fn locate_record(root: &XmlNode) -> Option<(RecordShape, &XmlNode)> {
    RecordShape::ALL
        .into_iter()
        .find_map(|shape| shape.locate(root).map(|record| (shape, record)))
}

/// The fields of a Script Include that end up in the output file.
///
/// Defaults for optional fields are applied once, when the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptInclude {
    /// Record name, used as the output file stem
    pub name: String,
    /// Script body as exported, untrimmed
    pub script: String,
    /// Scoped API name, empty when absent
    pub api_name: String,
    /// Active flag as exported, "true" when absent
    pub active: String,
}

impl ScriptInclude {
    /// Build from a located record element.
    ///
    /// Returns `None` when `name` or `script` is missing or empty.
    /// Whitespace-only values count as present.
    pub fn from_node(record: &XmlNode) -> Option<Self> {
        let name = non_empty(record.child_text("name"))?;
        let script = non_empty(record.child_text("script"))?;

        Some(Self {
            name: name.to_string(),
            script: script.to_string(),
            api_name: non_empty(record.child_text("api_name"))
                .unwrap_or_default()
                .to_string(),
            active: non_empty(record.child_text("active"))
                .unwrap_or(DEFAULT_ACTIVE)
                .to_string(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Outcome of extracting a Script Include from one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// No recognized envelope in the document
    NotFound,
    /// A record was found but lacks `name` or `script`
    Incomplete(RecordShape),
    /// A complete record
    Found(RecordShape, ScriptInclude),
}

impl Extraction {
    /// The extracted record, if complete
    pub fn into_record(self) -> Option<ScriptInclude> {
        match self {
            Extraction::Found(_, record) => Some(record),
            _ => None,
        }
    }
}

/// Parse an XML document and extract its Script Include record
pub fn extract(xml: &str) -> Result<Extraction> {
    let root = xml::parse_document(xml)?;

    let extraction = match locate_record(&root) {
        None => Extraction::NotFound,
        Some((shape, record)) => match ScriptInclude::from_node(record) {
            Some(script_include) => Extraction::Found(shape, script_include),
            None => Extraction::Incomplete(shape),
        },
    };
    Ok(extraction)
}
