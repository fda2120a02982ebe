//! Where candidate modules come from.

use std::path::{Path, PathBuf};

use crate::compile::CandidateBuilder;
use crate::error::LoadError;
use crate::module::CandidateModule;
use crate::unit::Unit;

/// Supplies one loaded module per unit under test.
pub trait CandidateProvider {
    /// Human-readable origin, for reports.
    fn describe(&self) -> String;

    /// Build (if needed) and load the module for `unit`.
    fn provide(&self, unit: Unit) -> Result<CandidateModule, LoadError>;
}

/// A source tree laid out as `<root>/ctype/<unit>.c` and
/// `<root>/errno/errno.c`; each unit is compiled into its own module.
pub struct SourceTree {
    root: PathBuf,
    builder: CandidateBuilder,
}

impl SourceTree {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, builder: CandidateBuilder) -> Self {
        Self {
            root: root.into(),
            builder,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn builder(&self) -> &CandidateBuilder {
        &self.builder
    }

    /// Remove build artifacts now, surfacing cleanup errors.
    pub fn close(self) -> Result<(), LoadError> {
        self.builder.close()
    }
}

impl CandidateProvider for SourceTree {
    fn describe(&self) -> String {
        format!("sources:{}", self.root.display())
    }

    fn provide(&self, unit: Unit) -> Result<CandidateModule, LoadError> {
        let source = self.root.join(unit.source_path());
        let artifact = self.builder.build(unit.name(), &source)?;
        CandidateModule::open(unit.name(), &artifact)
    }
}

/// One prebuilt shared object exporting every unit's symbol, such as the
/// release build of `minilibc-abi`.
pub struct Prebuilt {
    path: PathBuf,
}

impl Prebuilt {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CandidateProvider for Prebuilt {
    fn describe(&self) -> String {
        format!("library:{}", self.path.display())
    }

    fn provide(&self, unit: Unit) -> Result<CandidateModule, LoadError> {
        CandidateModule::open(unit.name(), &self.path)
    }
}
