use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("this tool must be run from within the `cases` folder of a job directory (currently in {})", .0.display())]
    WrongLocation(PathBuf),

    #[error("aborted by user")]
    Aborted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid retention pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
