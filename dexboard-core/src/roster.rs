//! The leaderboard roster
//!
//! The roster is the only mutable state of a run. It is owned by the caller
//! and handed to each stage by `&mut`, so there is a single writer at any
//! point of the pipeline.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::exclusion::ExclusionPolicy;
use crate::identity::IdentityRecord;
use crate::tally::DexTally;

/// One leaderboard line, serialized as the `users.json` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub username: String,
    pub uuid: String,
    pub caught: u32,
    pub shiny: u32,
}

impl RosterEntry {
    #[must_use]
    pub fn new(username: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            uuid: uuid.into(),
            caught: 0,
            shiny: 0,
        }
    }
}

/// Ordered, identifier-unique list of entries.
///
/// Order is insertion order: identity cache first, then players discovered
/// through the profile lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    excluded_ids: BTreeSet<String>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the starting roster from the identity cache.
    ///
    /// Excluded names are dropped and their identifiers remembered. When the
    /// cache lists an identifier twice, the first record wins.
    #[must_use]
    pub fn from_identity_cache(records: &[IdentityRecord], policy: &ExclusionPolicy) -> Self {
        let mut roster = Self::new();
        for record in records {
            if policy.is_excluded(&record.name) {
                log::debug!("Excluding cached identity {} ({})", record.name, record.uuid);
                roster.mark_excluded(&record.uuid);
                continue;
            }
            if !roster.insert(RosterEntry::new(&record.name, &record.uuid)) {
                log::warn!(
                    "Identity cache lists {} more than once, keeping the first name",
                    record.uuid
                );
            }
        }
        roster
    }

    #[must_use]
    pub fn get(&self, uuid: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|entry| entry.uuid == uuid)
    }

    #[must_use]
    pub fn contains(&self, uuid: &str) -> bool {
        self.get(uuid).is_some()
    }

    /// Append an entry unless its identifier is already present.
    ///
    /// Returns `false` and leaves the roster untouched on a duplicate.
    pub fn insert(&mut self, entry: RosterEntry) -> bool {
        if self.contains(&entry.uuid) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn mark_excluded(&mut self, uuid: &str) {
        self.excluded_ids.insert(uuid.to_string());
    }

    /// Whether `uuid` is known to belong to an excluded identity.
    #[must_use]
    pub fn is_excluded_id(&self, uuid: &str) -> bool {
        self.excluded_ids.contains(uuid)
    }

    /// Replace the counts of the entry matching `uuid` with `tally`.
    ///
    /// Counts are never added up: applying the same tally twice leaves the
    /// roster unchanged. Returns `false` when no entry matches.
    pub fn apply_tally(&mut self, uuid: &str, tally: &DexTally) -> bool {
        match self.entries.iter_mut().find(|entry| entry.uuid == uuid) {
            Some(entry) => {
                entry.caught = tally.caught;
                entry.shiny = tally.shiny;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<RosterEntry> {
        self.entries
    }
}
