//! Pattern-based retention rules
//!
//! A trial folder mixes artifacts worth keeping (setup, configuration,
//! exported results, logs, plots) with bulk solver output that only wastes
//! disk. The rule set names what survives cleanup; everything else is fair
//! game for removal.

use glob::Pattern;

use crate::error::{Error, Result};

/// Directory name for the in-trial staging area that receives kept items.
pub const STAGING_DIR_NAME: &str = "tempKeep";

/// Ordered list of names and shell-style wildcards identifying items to keep.
///
/// Passed explicitly into the cleanup engine so tests can supply alternate
/// rule sets.
#[derive(Debug, Clone)]
pub struct RetentionRuleSet {
    patterns: Vec<Pattern>,
}

impl RetentionRuleSet {
    /// Compile a rule set from literal names and wildcard patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|source| Error::Pattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The standard rule set: case setup and mesh/constant data, exported
    /// results, post-processing output, and log/data/image files.
    pub fn default_keep() -> Self {
        // all literals and wildcards below are valid patterns
        Self::new(&[
            "caseSetup",
            "system",
            "constant",
            "EnSight",
            "postProcessing",
            "log.*",
            "*.csv",
            "*.dat",
            "*.png",
            "*.out",
        ])
        .expect("default retention patterns are valid")
    }

    /// Whether a direct child with this basename should be kept.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }
}
