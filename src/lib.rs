//! # Casesweep
//!
//! A CLI tool that cleans up numbered simulation trial directories under a
//! job's `cases` folder: solver output and scratch data are removed while
//! configuration, setup, and result artifacts are kept.
//!
//! ## Usage
//!
//! ```bash
//! casesweep --trial 1 20 [--archive] [--dry-run]
//! ```
//!
//! ## Modules
//!
//! - `cli` - Command-line argument structures
//! - `context` - Job/cases working-directory resolution and validation
//! - `discovery` - Trial directory enumeration and numeric-ID range filtering
//! - `size` - Recursive directory size accounting
//! - `retention` - Pattern-based keep/remainder classification rules
//! - `cleanup` - Staging and removal engine for a trial's contents
//! - `confirm` - Interactive double-confirmation gate
//! - `error` - Error taxonomy for fatal and recoverable failures

pub mod cleanup;
pub mod cli;
pub mod confirm;
pub mod context;
pub mod discovery;
pub mod error;
pub mod retention;
pub mod size;

pub use error::{Error, Result};
