//! Per-player Cobblemon save documents
//!
//! Only the parts of the document that feed the leaderboard are modeled. The
//! discovery table keeps its species nodes as raw JSON so that one malformed
//! species or leaf does not invalidate a whole player's save.
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Key of the Pokédex discovery table inside `extraData`.
pub const DISCOVERY_TABLE_KEY: &str = "cobbledex_discovery";

/// Species identifier → raw `{ form identifier → leaf }` node.
pub type Registers = BTreeMap<String, Value>;

/// Reads `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSaveRecord {
    pub uuid: String,
    #[serde(rename = "extraData", default, deserialize_with = "null_as_default")]
    pub extra_data: ExtraData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraData {
    #[serde(rename = "cobbledex_discovery", default)]
    pub discovery: Option<DiscoveryTable>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryTable {
    #[serde(default, deserialize_with = "null_as_default")]
    pub registers: Registers,
}

#[derive(Debug, Error)]
#[error("save document is not a player record: {0}")]
pub struct SaveRecordError(#[from] serde_json::Error);

impl PlayerSaveRecord {
    /// Parse a save document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or has no string `uuid`.
    pub fn from_json(json: &str) -> Result<Self, SaveRecordError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn registers(&self) -> Option<&Registers> {
        self.extra_data
            .discovery
            .as_ref()
            .map(|table| &table.registers)
    }
}

/// Capture state recorded for one species form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscoveryStatus {
    Caught,
    Encountered,
    Other(String),
}

impl From<&str> for DiscoveryStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "CAUGHT" => Self::Caught,
            "ENCOUNTERED" => Self::Encountered,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Validated leaf of the discovery table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryEntry {
    pub status: DiscoveryStatus,
    pub is_shiny: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeafError {
    #[error("leaf is not an object")]
    NotAnObject,
    #[error("leaf has no string `status`")]
    MissingStatus,
    #[error("leaf `isShiny` is not a boolean")]
    ShinyNotBoolean,
}

impl DiscoveryEntry {
    /// Validate a raw leaf.
    ///
    /// A missing `isShiny` reads as not shiny.
    ///
    /// # Errors
    ///
    /// Returns an error if the leaf does not have the `{ status, isShiny }` shape.
    pub fn from_value(value: &Value) -> Result<Self, LeafError> {
        let fields = value.as_object().ok_or(LeafError::NotAnObject)?;
        let status = fields
            .get("status")
            .and_then(Value::as_str)
            .ok_or(LeafError::MissingStatus)?;
        let is_shiny = match fields.get("isShiny") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => return Err(LeafError::ShinyNotBoolean),
        };
        Ok(Self {
            status: DiscoveryStatus::from(status),
            is_shiny,
        })
    }

    #[must_use]
    pub fn is_caught(&self) -> bool {
        self.status == DiscoveryStatus::Caught
    }
}
