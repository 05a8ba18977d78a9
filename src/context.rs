//! Job/cases working-directory resolution
//!
//! The tool is only meaningful when invoked from inside a job's `cases`
//! folder; everything else keys off that location.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resolved paths for the job the tool was invoked in.
///
/// Created once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct JobContext {
    /// The `cases` directory the tool was invoked from
    pub cases_path: PathBuf,
    /// Parent of `cases_path`, i.e. the job directory
    pub job_path: PathBuf,
    /// Basename of the job directory, e.g. `100001`
    pub job_id: String,
}

impl JobContext {
    /// Build a context from the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        Self::from_dir(env::current_dir()?)
    }

    /// Build a context from an explicit directory.
    ///
    /// Fails with [`Error::WrongLocation`] unless the final path segment is
    /// literally named `cases` (case-insensitive).
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let cases_path = dir.into();

        if !is_cases_dir(&cases_path) {
            return Err(Error::WrongLocation(cases_path));
        }

        let job_path = cases_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cases_path.clone());
        let job_id = job_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            cases_path,
            job_path,
            job_id,
        })
    }
}

fn is_cases_dir(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().eq_ignore_ascii_case("cases"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_cases_dir() {
        let ctx = JobContext::from_dir("/scratch/100001/cases").unwrap();
        assert_eq!(ctx.cases_path, PathBuf::from("/scratch/100001/cases"));
        assert_eq!(ctx.job_path, PathBuf::from("/scratch/100001"));
        assert_eq!(ctx.job_id, "100001");
    }

    #[test]
    fn test_cases_check_is_case_insensitive() {
        assert!(JobContext::from_dir("/scratch/100001/CASES").is_ok());
        assert!(JobContext::from_dir("/scratch/100001/Cases").is_ok());
    }

    #[test]
    fn test_rejects_other_dirs() {
        let err = JobContext::from_dir("/scratch/100001/results").unwrap_err();
        assert!(matches!(err, Error::WrongLocation(_)));
    }

    #[test]
    fn test_rejects_partial_match() {
        assert!(JobContext::from_dir("/scratch/100001/cases_old").is_err());
    }
}
