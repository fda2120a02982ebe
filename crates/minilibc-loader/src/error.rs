//! Errors raised while building or loading a candidate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{unit}: source not found at {}", path.display())]
    MissingSource { unit: String, path: PathBuf },
    #[error("failed to spawn C compiler `{compiler}`: {source}")]
    CompilerSpawn {
        compiler: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{unit}: compilation failed ({status}): {stderr}")]
    Build {
        unit: String,
        status: String,
        stderr: String,
    },
    #[error("{unit}: failed to load {}: {source}", path.display())]
    Open {
        unit: String,
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("{unit}: missing symbol `{symbol}`: {source}")]
    MissingSymbol {
        unit: String,
        symbol: String,
        #[source]
        source: libloading::Error,
    },
    #[error("{unit}: `{symbol}` is not defined by the candidate (resolved in {owner})")]
    ForeignSymbol {
        unit: String,
        symbol: String,
        owner: String,
    },
    #[error("{unit}: cannot tell which object defines `{symbol}`: {reason}")]
    UnverifiedSymbol {
        unit: String,
        symbol: String,
        reason: &'static str,
    },
    #[error("{unit}: `__errno_location` returned a null pointer")]
    NullErrnoLocation { unit: String },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// True for failures that happen before anything is loaded: missing
    /// sources, compiler problems, build directory setup.
    #[must_use]
    pub fn is_build_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingSource { .. } | Self::CompilerSpawn { .. } | Self::Build { .. } | Self::Io(_)
        )
    }
}
