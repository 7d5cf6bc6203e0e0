use std::collections::BTreeSet;

use crate::abi::{fingerprint, AbiEntry, AbiError, EntryKind, Fingerprint};
use crate::config::MalformedPolicy;

use super::table::IndicatorTable;

/// ABI entry skipped because its fingerprint could not be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    /// Position of the entry in the ABI.
    pub index: usize,
    /// Entry kind.
    pub kind: EntryKind,
    /// Entry name, if any.
    pub name: Option<String>,
    /// Canonicalisation failure.
    pub error: AbiError,
}

/// Result of matching one contract ABI against an [`IndicatorTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Indicator names hit by function selectors.
    pub selectors: BTreeSet<String>,
    /// Indicator names hit by event topics.
    pub events: BTreeSet<String>,
    /// Entries that were skipped.
    pub malformed: Vec<MalformedEntry>,
}

impl MatchOutcome {
    /// Union of selector and event hits.
    pub fn matched(&self) -> BTreeSet<String> {
        self.selectors.union(&self.events).cloned().collect()
    }

    /// Returns `true` when at least one indicator matched.
    pub fn is_match(&self) -> bool {
        !self.selectors.is_empty() || !self.events.is_empty()
    }
}

/// Derives every entry's fingerprint and collects the indicator names whose
/// expected bytes it equals. Malformed entries are recorded and skipped.
pub fn scan_entries(
    entries: &[AbiEntry],
    table: &IndicatorTable,
    policy: MalformedPolicy,
) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();
    for (index, entry) in entries.iter().enumerate() {
        let derived = match fingerprint(entry) {
            Ok(Some(derived)) => derived,
            Ok(None) => continue,
            Err(error) => {
                let label = entry.name.as_deref().unwrap_or("<unnamed>");
                match policy {
                    MalformedPolicy::Warn => {
                        log::warn!("skipping malformed {} `{label}` (#{index}): {error}", entry.kind)
                    }
                    MalformedPolicy::Skip => {
                        log::debug!("skipping malformed {} `{label}` (#{index}): {error}", entry.kind)
                    }
                }
                outcome.malformed.push(MalformedEntry {
                    index,
                    kind: entry.kind,
                    name: entry.name.clone(),
                    error,
                });
                continue;
            }
        };

        let hits = match derived {
            Fingerprint::Selector(_) => &mut outcome.selectors,
            Fingerprint::Topic(_) => &mut outcome.events,
        };
        hits.extend(table.lookup(&derived).iter().cloned());
    }
    outcome
}

/// Names of all indicators present in `entries`, deduplicated.
pub fn match_indicators(entries: &[AbiEntry], table: &IndicatorTable) -> BTreeSet<String> {
    scan_entries(entries, table, MalformedPolicy::Warn).matched()
}
