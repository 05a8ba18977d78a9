//! Cleanup engine for trial directories
//!
//! Each trial moves through `Discovered -> Staged -> Cleaned`: kept items are
//! first moved into a staging subdirectory inside the trial, then every
//! remaining direct child is removed. The two steps are deliberately not
//! transactional; an interrupted run leaves the trial in `Staged` state,
//! which a re-run picks up safely (staging creation is idempotent and a move
//! whose source is already gone is tolerated).

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, warn};

use crate::retention::{RetentionRuleSet, STAGING_DIR_NAME};
use crate::size::directory_size;

/// Options for a cleanup run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupOptions {
    /// Report what would be kept and removed without making changes
    pub dry_run: bool,
}

/// Statistics from cleaning one or more trials.
#[derive(Debug, Clone, Default)]
pub struct CleanupStats {
    /// Items moved into the staging directory
    pub items_kept: usize,
    /// Items removed from the trial
    pub items_removed: usize,
    /// Bytes reclaimed by removal
    pub bytes_reclaimed: u64,
    /// Per-path errors encountered; these never halt a trial
    pub errors: Vec<String>,
}

impl CleanupStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another stats instance into this one.
    pub fn merge(&mut self, other: &CleanupStats) {
        self.items_kept += other.items_kept;
        self.items_removed += other.items_removed;
        self.bytes_reclaimed += other.bytes_reclaimed;
        self.errors.extend(other.errors.iter().cloned());
    }
}

/// The keep/remainder partition of a trial's direct children.
#[derive(Debug, Clone)]
pub struct CleanupPlan {
    /// Staging subdirectory inside the trial that receives kept items
    pub staging_path: PathBuf,
    /// Children matching the retention rules, to be moved into staging
    pub keep_paths: Vec<PathBuf>,
    /// Everything else, to be removed
    pub remainder_paths: Vec<PathBuf>,
}

/// Applies a retention rule set to trial directories.
pub struct CleanupEngine {
    rules: RetentionRuleSet,
    options: CleanupOptions,
}

impl CleanupEngine {
    pub fn new(rules: RetentionRuleSet, options: CleanupOptions) -> Self {
        Self { rules, options }
    }

    /// Partition the direct children of `trial_path` into keep and remainder.
    ///
    /// The staging subdirectory itself is excluded from both sets even when a
    /// prior interrupted run left one behind. Each child is classified
    /// exactly once, so overlapping patterns cannot produce duplicate moves.
    pub async fn classify(&self, trial_path: &Path) -> Result<CleanupPlan> {
        let staging_path = trial_path.join(STAGING_DIR_NAME);
        let mut keep_paths = Vec::new();
        let mut remainder_paths = Vec::new();

        let mut entries = fs::read_dir(trial_path)
            .await
            .with_context(|| format!("failed to read trial directory {}", trial_path.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path == staging_path {
                continue;
            }

            let name = entry.file_name();
            if self.rules.matches(&name.to_string_lossy()) {
                keep_paths.push(path);
            } else {
                remainder_paths.push(path);
            }
        }

        keep_paths.sort();
        remainder_paths.sort();

        Ok(CleanupPlan {
            staging_path,
            keep_paths,
            remainder_paths,
        })
    }

    /// Clean one trial: stage kept items, then remove the remainder.
    ///
    /// Per-path failures are recorded in the returned stats and do not halt
    /// the trial. Nothing is rolled back. In dry-run mode the plan is
    /// computed and reported but the filesystem is untouched.
    pub async fn clean_trial(&self, trial_path: &Path) -> Result<CleanupStats> {
        let mut stats = CleanupStats::new();
        let plan = self.classify(trial_path).await?;

        if self.options.dry_run {
            for path in &plan.keep_paths {
                println!("\t\tWould keep: {}", path.display());
            }
            for path in &plan.remainder_paths {
                println!("\t\tWould remove: {}", path.display());
                stats.bytes_reclaimed += entry_size(path).await;
            }
            stats.items_kept = plan.keep_paths.len();
            stats.items_removed = plan.remainder_paths.len();
            return Ok(stats);
        }

        // Discovered -> Staged. create_dir_all reuses a staging directory
        // left behind by an interrupted run.
        fs::create_dir_all(&plan.staging_path)
            .await
            .with_context(|| {
                format!(
                    "failed to create staging directory {}",
                    plan.staging_path.display()
                )
            })?;

        for path in &plan.keep_paths {
            match move_into(path, &plan.staging_path).await {
                Ok(()) => stats.items_kept += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // already staged by a previous interrupted run
                    debug!("{} is already gone, skipping", path.display());
                }
                Err(e) => {
                    warn!("failed to move {}: {}", path.display(), e);
                    stats
                        .errors
                        .push(format!("failed to move {}: {}", path.display(), e));
                }
            }
        }

        // Staged -> Cleaned. Enumerate again: the remainder is whatever is
        // still in the trial besides the staging directory.
        let mut entries = fs::read_dir(trial_path)
            .await
            .with_context(|| format!("failed to read trial directory {}", trial_path.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path == plan.staging_path {
                continue;
            }

            let size = entry_size(&path).await;
            match remove_path(&path).await {
                Ok(()) => {
                    stats.items_removed += 1;
                    stats.bytes_reclaimed += size;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!("failed to remove {}: {}", path.display(), e);
                    stats
                        .errors
                        .push(format!("failed to remove {}: {}", path.display(), e));
                }
            }
        }

        Ok(stats)
    }
}

/// Move a file or directory into `dest_dir`, keeping its basename.
async fn move_into(src: &Path, dest_dir: &Path) -> io::Result<()> {
    let name = src.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no basename", src.display()),
        )
    })?;
    fs::rename(src, dest_dir.join(name)).await
}

/// Remove a file or directory recursively.
async fn remove_path(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path).await?;
    if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    }
}

/// Size of a single child entry, file or directory.
async fn entry_size(path: &Path) -> u64 {
    match fs::symlink_metadata(path).await {
        Ok(m) if m.is_dir() => directory_size(path).await,
        Ok(m) if m.is_symlink() => 0,
        Ok(m) => m.len(),
        Err(_) => 0,
    }
}
