//! Display names that never appear on the leaderboard
use serde::{Deserialize, Serialize};

/// Name that the server's administration account plays under.
pub const DEFAULT_EXCLUDED_NAME: &str = "ImShogeki";

/// Single predicate shared by the roster loader and the identity resolver.
///
/// Matching is exact and case-sensitive, the same way player names are
/// stored in the identity cache and returned by the profile service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExclusionPolicy {
    names: Vec<String>,
}

impl ExclusionPolicy {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut policy = Self { names: Vec::new() };
        for name in names {
            policy.insert(name);
        }
        policy
    }

    /// Policy that lets every player through.
    #[must_use]
    pub const fn none() -> Self {
        Self { names: Vec::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() && !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    #[must_use]
    pub fn is_excluded(&self, display_name: &str) -> bool {
        self.names.iter().any(|name| name == display_name)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for ExclusionPolicy {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<ExclusionPolicy> for Vec<String> {
    fn from(policy: ExclusionPolicy) -> Self {
        policy.names
    }
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new([DEFAULT_EXCLUDED_NAME])
    }
}
