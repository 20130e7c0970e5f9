//! Error definitions.
//!
//! This module defines the error types reported by the prefetch engine. It provides:
//! 1. **Trace Errors:** Failure to read the prediction file as a whole.
//! 2. **Parse Errors:** Per-line reasons a trace line was rejected.
//! 3. **Configuration Errors:** Invalid or unreadable engine configuration.
//! 4. **Engine Errors:** An umbrella type for one-shot construction from a config.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a prediction trace.
///
/// The engine treats this as recoverable: it logs the error and runs with an
/// empty prediction sequence. The error is still returned so the host can
/// decide whether a missing trace should abort its run.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The prediction file could not be opened or read.
    #[error("could not read prediction file '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Reason a single trace line was rejected.
///
/// Rejected lines are logged and counted, never recorded with placeholder
/// values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `<tick>:` prefix.
    #[error("missing tick")]
    MissingTick,

    /// The tick field is not a decimal number.
    #[error("invalid tick '{text}': {reason}")]
    InvalidTick {
        /// Text found in the tick position.
        text: String,
        /// Integer parse failure.
        reason: ParseIntError,
    },

    /// No `<component>:` field after the tick.
    #[error("missing component field")]
    MissingComponent,

    /// No `<status> for <type>` clause.
    #[error("missing status clause")]
    MissingStatus,

    /// No bracketed `[lo:hi]` address range.
    #[error("missing address range")]
    MissingAddress,

    /// The lower bound of the address range is not hexadecimal.
    #[error("invalid address '{text}': {reason}")]
    InvalidAddress {
        /// Text found in the address position.
        text: String,
        /// Integer parse failure.
        reason: ParseIntError,
    },
}

/// Invalid engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Block size is zero or not a power of two.
    #[error("block size must be a non-zero power of two, got {0}")]
    InvalidBlockSize(usize),

    /// The configuration document is not valid JSON for `OracleConfig`.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("could not read configuration '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Errors from building and initializing an engine in one step.
#[derive(Debug, Error)]
pub enum PrefetchError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The prediction trace could not be loaded.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
