//! CLI argument structures
//!
//! Defines the command-line interface consumed by the main entry point. The
//! tool has a single implicit command, so everything hangs off the top-level
//! parser.

use clap::Parser;

/// Clean up simulation trial folders within a job's `cases` directory
#[derive(Parser, Debug)]
#[command(name = "casesweep")]
#[command(
    about = "casesweep - Clean up trial folders, keeping setup and result artifacts",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Inclusive range of trial numbers to clean, e.g. `--trial 1 20`
    #[arg(short, long, num_args = 2, value_names = ["LOW", "HIGH"], required = true)]
    pub trial: Vec<u64>,

    /// Move the cleaned cases to the archive drive afterwards
    #[arg(short, long)]
    pub archive: bool,

    /// Preview what would be kept and removed without touching anything
    #[arg(long, help = "Preview the cleanup without modifying any files")]
    pub dry_run: bool,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_range_parses_two_values() {
        let cli = Cli::parse_from(["casesweep", "--trial", "3", "17"]);
        assert_eq!(cli.trial, vec![3, 17]);
        assert!(!cli.archive);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_trial_is_required() {
        assert!(Cli::try_parse_from(["casesweep"]).is_err());
    }

    #[test]
    fn test_trial_rejects_single_value() {
        assert!(Cli::try_parse_from(["casesweep", "--trial", "3"]).is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["casesweep", "--trial", "1", "2", "--archive", "--dry-run"]);
        assert!(cli.archive);
        assert!(cli.dry_run);
    }
}
