//! Error type shared by the loader, the sequence frame and the engine.
//!
//! Every variant is fatal for the whole run. [`LcsError::exit_code`] gives the
//! process status the binary terminates with.

use std::path::PathBuf;

use thiserror::Error;

pub mod exit_codes {
    pub const OPEN: i32 = 2;
    pub const HEADER: i32 = 3;
    pub const TOO_LARGE: i32 = 4;
    pub const SEQUENCE: i32 = 5;
    pub const CORRUPT: i32 = 6;
    pub const THREAD_POOL: i32 = 7;
}

/// Which of the two input sequences an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Which {
    First,
    Second,
}

impl std::fmt::Display for Which {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Which::First => f.write_str("first"),
            Which::Second => f.write_str("second"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LcsError {
    #[error("error opening file \"{}\": {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read height and width: {0}")]
    Header(String),

    #[error("table for sequences of length {dominant_len} and {secondary_len} does not fit in memory")]
    TooLarge {
        dominant_len: usize,
        secondary_len: usize,
    },

    #[error("{which} sequence line is missing")]
    Truncated { which: Which },

    #[error("{which} sequence has {actual} characters, header declares {declared}")]
    LengthMismatch {
        which: Which,
        declared: usize,
        actual: usize,
    },

    #[error("sequence frame is corrupt: {0}")]
    Corrupt(String),

    #[cfg(feature = "parallel")]
    #[error("failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl LcsError {
    pub fn exit_code(&self) -> i32 {
        match self {
            LcsError::Open { .. } => exit_codes::OPEN,
            LcsError::Header(_) => exit_codes::HEADER,
            LcsError::TooLarge { .. } => exit_codes::TOO_LARGE,
            LcsError::Truncated { .. } | LcsError::LengthMismatch { .. } => exit_codes::SEQUENCE,
            LcsError::Corrupt(_) => exit_codes::CORRUPT,
            #[cfg(feature = "parallel")]
            LcsError::ThreadPool(_) => exit_codes::THREAD_POOL,
        }
    }
}
