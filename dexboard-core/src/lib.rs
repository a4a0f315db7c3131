//! Dexboard Core
//!
//! Platform-agnostic roster logic for the Cobblemon Pokédex leaderboard.
//! This crate folds per-player save documents into a deduplicated roster and
//! orders it for display, without touching the filesystem or the network.

pub mod exclusion;
pub mod identity;
pub mod ranking;
pub mod resolver;
pub mod roster;
pub mod save;
pub mod tally;

// Re-export commonly used types
pub use exclusion::{DEFAULT_EXCLUDED_NAME, ExclusionPolicy};
pub use identity::{
    IdentityCacheError, IdentityLookup, IdentityRecord, Profile, parse_identity_cache,
};
pub use ranking::{Podium, rank_by_caught, split_columns};
pub use resolver::{IngestOutcome, Resolution, Resolver};
pub use roster::{Roster, RosterEntry};
pub use save::{
    DISCOVERY_TABLE_KEY, DiscoveryEntry, DiscoveryStatus, LeafError, PlayerSaveRecord,
    SaveRecordError,
};
pub use tally::{DexTally, tally_discoveries};
