use std::io;

use clap::Parser;
use tracing::{debug, error};

use casesweep::cleanup::{CleanupEngine, CleanupOptions, CleanupStats};
use casesweep::confirm::ConfirmationGate;
use casesweep::context::JobContext;
use casesweep::discovery::{find_trials, TrialRange};
use casesweep::retention::RetentionRuleSet;
use casesweep::size::{directory_size, format_bytes};
use casesweep::{cli::Cli, Error};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("casesweep started with args: {:?}", cli);

    if let Err(e) = run(cli).await {
        if matches!(e.downcast_ref::<Error>(), Some(Error::Aborted)) {
            eprintln!("EXITING!");
        } else {
            error!("Fatal error: {}", e);
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = JobContext::from_current_dir()?;
    debug!(
        "job {} at {}, cases at {}",
        ctx.job_id,
        ctx.job_path.display(),
        ctx.cases_path.display()
    );

    let range = TrialRange::new(cli.trial[0], cli.trial[1]);
    println!("Checking for trial folders to archive...");
    let trials = find_trials(&ctx.cases_path, &range).await?;

    if cli.archive {
        println!("Selected cases will be archived to the archive drive after clean up process.");
    }

    println!("\tFound {} trial folders to archive.", trials.len());
    for (id, trial) in &trials {
        let size = directory_size(&trial.path).await;
        println!("\t\t{}: {} : {}", id, trial.path.display(), format_bytes(size));
    }

    if trials.is_empty() {
        return Ok(());
    }

    if cli.dry_run {
        println!("\nDry run: nothing will be moved or deleted.");
    } else {
        let stdin = io::stdin();
        let mut gate = ConfirmationGate::new(stdin.lock(), io::stdout());
        if !gate.confirm_cleanup()? {
            return Err(Error::Aborted.into());
        }
        println!("\nPROCEEDING WITH CLEAN UP!");
        println!("-----------------------------------");
    }

    let engine = CleanupEngine::new(
        RetentionRuleSet::default_keep(),
        CleanupOptions {
            dry_run: cli.dry_run,
        },
    );

    println!("Cleaning up:");
    let mut totals = CleanupStats::new();
    for (id, trial) in &trials {
        println!("\t{}: {}", id, trial.path.display());
        let stats = engine.clean_trial(&trial.path).await?;
        totals.merge(&stats);
    }

    println!();
    if cli.dry_run {
        println!("=== Dry Run Results ===");
        println!(
            "Would keep {} items and remove {} items across {} trials",
            totals.items_kept,
            totals.items_removed,
            trials.len()
        );
        println!("Would reclaim: {}", format_bytes(totals.bytes_reclaimed));
    } else {
        println!("=== Cleanup Results ===");
        println!(
            "Kept {} items and removed {} items across {} trials",
            totals.items_kept,
            totals.items_removed,
            trials.len()
        );
        println!("Space reclaimed: {}", format_bytes(totals.bytes_reclaimed));
    }

    if !totals.errors.is_empty() {
        println!();
        println!("Errors encountered:");
        for error in &totals.errors {
            println!("  - {}", error);
        }
    }

    Ok(())
}
