//! Trial directory discovery
//!
//! Enumerates the immediate subdirectories of a `cases` folder and keys them
//! by the trial number embedded in their name. Folder names vary in practice
//! (`trial001`, `trial001_half`, `t12-restart`), so the number is whatever
//! digits the name contains, in their original order.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, warn};

use crate::error::Result;

/// One numbered trial folder under `cases`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialDirectory {
    pub id: u64,
    pub path: PathBuf,
}

/// Inclusive range of trial numbers to operate on.
#[derive(Debug, Clone, Copy)]
pub struct TrialRange {
    pub low: u64,
    pub high: u64,
}

impl TrialRange {
    pub fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    /// Membership test, inclusive on both ends.
    pub fn contains(&self, id: u64) -> bool {
        self.low <= id && id <= self.high
    }
}

/// Extract the trial number from a folder basename.
///
/// All non-digit characters are removed and the remaining digits are parsed
/// as a base-10 integer: `trial007` -> 7, `trial2_half` -> 2. Names with no
/// digits yield `None`.
pub fn extract_trial_id(name: &str) -> Option<u64> {
    let digits: String = name.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Find the trial directories under `cases_path` whose id falls in `range`.
///
/// Non-directory entries and folders without a digit in their name are
/// skipped. The returned map iterates in ascending id order. Two misnamed
/// folders can resolve to the same id; the one enumerated later wins, with a
/// warning, so the hazard is at least visible.
pub async fn find_trials(
    cases_path: &std::path::Path,
    range: &TrialRange,
) -> Result<BTreeMap<u64, TrialDirectory>> {
    let mut trials = BTreeMap::new();
    let mut entries = fs::read_dir(cases_path).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let Some(id) = extract_trial_id(&name.to_string_lossy()) else {
            debug!("skipping {}: no trial number in name", path.display());
            continue;
        };

        if !range.contains(id) {
            continue;
        }

        if let Some(previous) = trials.insert(id, TrialDirectory { id, path }) {
            warn!(
                "two folders resolve to trial {}: {} replaces {}",
                id,
                trials[&id].path.display(),
                previous.path.display()
            );
        }
    }

    Ok(trials)
}
