//! On-demand compilation of candidate C units.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::LoadError;

/// Compiler used when none is configured.
pub const DEFAULT_COMPILER: &str = "cc";

/// Compiles candidate sources into shared objects under a private build
/// directory. The directory and everything in it is removed when the builder
/// is dropped, whether the suite passed, failed or panicked.
pub struct CandidateBuilder {
    compiler: OsString,
    flags: Vec<OsString>,
    build_dir: TempDir,
}

impl CandidateBuilder {
    /// Create a builder with a fresh build directory.
    pub fn new(compiler: impl Into<OsString>) -> Result<Self, LoadError> {
        let build_dir = tempfile::Builder::new()
            .prefix("minilibc-build-")
            .tempdir()?;
        Ok(Self {
            compiler: compiler.into(),
            flags: Vec::new(),
            build_dir,
        })
    }

    /// Extra flags passed to every compiler invocation, before the source.
    #[must_use]
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn build_dir(&self) -> &Path {
        self.build_dir.path()
    }

    /// Path the shared object for `unit` is written to.
    #[must_use]
    pub fn artifact_path(&self, unit: &str) -> PathBuf {
        self.build_dir
            .path()
            .join(format!("{unit}.{}", std::env::consts::DLL_EXTENSION))
    }

    /// Compile `source` into a position-independent shared object for `unit`.
    pub fn build(&self, unit: &str, source: &Path) -> Result<PathBuf, LoadError> {
        if !source.is_file() {
            return Err(LoadError::MissingSource {
                unit: unit.to_string(),
                path: source.to_path_buf(),
            });
        }

        let artifact = self.artifact_path(unit);
        let output = Command::new(&self.compiler)
            .arg("-shared")
            .arg("-fPIC")
            .args(&self.flags)
            .arg("-o")
            .arg(&artifact)
            .arg(source)
            .output()
            .map_err(|source| LoadError::CompilerSpawn {
                compiler: self.compiler.to_string_lossy().into_owned(),
                source,
            })?;

        if !output.status.success() {
            return Err(LoadError::Build {
                unit: unit.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(artifact)
    }

    /// Remove the build directory now, reporting any cleanup error instead of
    /// swallowing it as `Drop` would.
    pub fn close(self) -> Result<(), LoadError> {
        self.build_dir.close()?;
        Ok(())
    }
}
