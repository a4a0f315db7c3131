//! Folding save records into the roster
//!
//! Unknown identifiers are resolved through an [`IdentityLookup`]. A lookup
//! that fails skips the player for this run; nothing is retried.
use serde::{Deserialize, Serialize};

use crate::exclusion::ExclusionPolicy;
use crate::identity::IdentityLookup;
use crate::roster::{Roster, RosterEntry};
use crate::save::PlayerSaveRecord;
use crate::tally::{DexTally, tally_discoveries};

/// How an identifier was matched to a roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Entry already on the roster.
    Known { username: String },
    /// Entry created from the profile service.
    Appended { username: String },
    /// Identity is on the exclusion list.
    Excluded { username: Option<String> },
    /// Profile service could not name the player.
    Failed { reason: String },
}

/// What happened to one save record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum IngestOutcome {
    Updated {
        uuid: String,
        username: String,
        tally: DexTally,
    },
    Appended {
        uuid: String,
        username: String,
        tally: DexTally,
    },
    Excluded {
        uuid: String,
        username: Option<String>,
    },
    LookupFailed {
        uuid: String,
        reason: String,
    },
}

impl IngestOutcome {
    #[must_use]
    pub fn uuid(&self) -> &str {
        match self {
            Self::Updated { uuid, .. }
            | Self::Appended { uuid, .. }
            | Self::Excluded { uuid, .. }
            | Self::LookupFailed { uuid, .. } => uuid,
        }
    }
}

/// Pipeline stage that matches save records to roster entries.
pub struct Resolver<'a, L> {
    lookup: &'a L,
    policy: &'a ExclusionPolicy,
}

impl<'a, L> Resolver<'a, L>
where
    L: IdentityLookup,
{
    pub const fn new(lookup: &'a L, policy: &'a ExclusionPolicy) -> Self {
        Self { lookup, policy }
    }

    /// Find or create the roster entry for `uuid`.
    ///
    /// The lookup is only consulted for identifiers that are neither on the
    /// roster nor already known to be excluded.
    pub async fn resolve(&self, roster: &mut Roster, uuid: &str) -> Resolution {
        if let Some(entry) = roster.get(uuid) {
            return Resolution::Known {
                username: entry.username.clone(),
            };
        }
        if roster.is_excluded_id(uuid) {
            return Resolution::Excluded { username: None };
        }

        log::info!("User not found for {uuid}, fetching profile");
        let profile = match self.lookup.lookup(uuid).await {
            Ok(profile) => profile,
            Err(err) => {
                log::error!("Profile lookup for {uuid} failed: {err}");
                return Resolution::Failed {
                    reason: err.to_string(),
                };
            }
        };
        log::debug!("Profile for {uuid}: {profile:?}");

        if self.policy.is_excluded(&profile.name) {
            log::info!("Skipping excluded player {}", profile.name);
            roster.mark_excluded(uuid);
            return Resolution::Excluded {
                username: Some(profile.name),
            };
        }

        roster.insert(RosterEntry::new(&profile.name, uuid));
        Resolution::Appended {
            username: profile.name,
        }
    }

    /// Resolve the record's player and replace their counts.
    pub async fn ingest(&self, roster: &mut Roster, record: &PlayerSaveRecord) -> IngestOutcome {
        let uuid = record.uuid.clone();
        let (username, appended) = match self.resolve(roster, &uuid).await {
            Resolution::Known { username } => (username, false),
            Resolution::Appended { username } => (username, true),
            Resolution::Excluded { username } => {
                return IngestOutcome::Excluded { uuid, username };
            }
            Resolution::Failed { reason } => {
                return IngestOutcome::LookupFailed { uuid, reason };
            }
        };

        log::info!("Processing {username}");
        let tally = tally_discoveries(record);
        roster.apply_tally(&uuid, &tally);
        log::info!(
            "Processed {username}: {} caught, {} shiny",
            tally.caught,
            tally.shiny
        );

        if appended {
            IngestOutcome::Appended {
                uuid,
                username,
                tally,
            }
        } else {
            IngestOutcome::Updated {
                uuid,
                username,
                tally,
            }
        }
    }
}
