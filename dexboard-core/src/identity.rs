//! Player identities: the server's name cache and the remote profile lookup
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One record of the server's `usercache.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub name: String,
    pub uuid: String,
}

#[derive(Debug, Error)]
#[error("identity cache is not a valid list of {{name, uuid}} records: {0}")]
pub struct IdentityCacheError(#[from] serde_json::Error);

/// Parse the identity cache document.
///
/// Extra keys such as `expiresOn` are ignored.
///
/// # Errors
///
/// Returns an error if the JSON is not an array of `{ name, uuid }` records.
pub fn parse_identity_cache(json: &str) -> Result<Vec<IdentityRecord>, IdentityCacheError> {
    Ok(serde_json::from_str(json)?)
}

/// Profile returned by the remote identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Remote source of display names keyed by player identifier.
///
/// The resolver awaits one lookup at a time; implementations don't need to
/// be reentrant.
#[async_trait]
pub trait IdentityLookup {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve the current profile of `uuid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body carries no usable name.
    async fn lookup(&self, uuid: &str) -> Result<Profile, Self::Error>;
}
