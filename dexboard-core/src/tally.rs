//! Counting one player's Pokédex snapshot
use serde::{Deserialize, Serialize};

use crate::save::{DiscoveryEntry, PlayerSaveRecord};

/// Counts computed from a single save snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexTally {
    /// Leaves whose status is exactly `CAUGHT`.
    pub caught: u32,
    /// Leaves flagged shiny.
    pub shiny: u32,
    /// Every leaf seen, malformed ones included.
    pub leaves: u32,
    /// Leaves skipped because they did not have the `{ status, isShiny }` shape.
    /// A species node that is not an object counts as one.
    pub malformed: u32,
}

impl DexTally {
    fn record(&mut self, entry: &DiscoveryEntry) {
        if entry.is_caught() {
            self.caught = self.caught.saturating_add(1);
        }
        if entry.is_shiny {
            self.shiny = self.shiny.saturating_add(1);
        }
    }
}

/// Count caught and shiny forms across every species of a save.
///
/// A save without a discovery table tallies to zero. A species node that is
/// not an object is counted as a single malformed leaf.
#[must_use]
pub fn tally_discoveries(record: &PlayerSaveRecord) -> DexTally {
    let mut tally = DexTally::default();
    let Some(registers) = record.registers() else {
        log::warn!(
            "Save for {} has no {} table, counting zero",
            record.uuid,
            crate::save::DISCOVERY_TABLE_KEY
        );
        return tally;
    };

    for (species, node) in registers {
        let Some(forms) = node.as_object() else {
            tally.leaves = tally.leaves.saturating_add(1);
            tally.malformed = tally.malformed.saturating_add(1);
            log::debug!("Skipping {species} for {}: species is not an object", record.uuid);
            continue;
        };
        for (form, leaf) in forms {
            tally.leaves = tally.leaves.saturating_add(1);
            match DiscoveryEntry::from_value(leaf) {
                Ok(entry) => tally.record(&entry),
                Err(err) => {
                    tally.malformed = tally.malformed.saturating_add(1);
                    log::debug!("Skipping {species}/{form} for {}: {err}", record.uuid);
                }
            }
        }
    }

    tally
}
