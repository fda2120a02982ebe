//! Harness configuration.
//!
//! Resolved from environment variables, then overridden by CLI flags:
//! - `MINILIBC_CC`: C compiler used to build candidates (default `cc`).
//! - `MINILIBC_CFLAGS`: extra whitespace-separated compiler flags.
//! - `MINILIBC_SOURCE_ROOT`: candidate source tree (default `candidates/src`).
//! - `MINILIBC_LIBRARY`: prebuilt shared object exporting every unit; when
//!   set, sources are not compiled.
//! - `MINILIBC_RANGE`: ctype code range as `START..END` (default `-10..300`).

use std::path::PathBuf;

use minilibc_loader::{
    CandidateBuilder, CandidateProvider, DEFAULT_COMPILER, Prebuilt, SourceTree, Unit,
};

use crate::conformance::CodeRange;
use crate::error::HarnessError;

pub const ENV_CC: &str = "MINILIBC_CC";
pub const ENV_CFLAGS: &str = "MINILIBC_CFLAGS";
pub const ENV_SOURCE_ROOT: &str = "MINILIBC_SOURCE_ROOT";
pub const ENV_LIBRARY: &str = "MINILIBC_LIBRARY";
pub const ENV_RANGE: &str = "MINILIBC_RANGE";

pub const DEFAULT_SOURCE_ROOT: &str = "candidates/src";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub compiler: String,
    pub cflags: Vec<String>,
    pub source_root: PathBuf,
    pub library: Option<PathBuf>,
    pub range: CodeRange,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            cflags: Vec::new(),
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            library: None,
            range: CodeRange::default(),
        }
    }
}

impl HarnessConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HarnessError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(cc) = get(ENV_CC) {
            config.compiler = cc.trim().to_string();
        }
        if let Some(flags) = get(ENV_CFLAGS) {
            config.cflags = flags.split_whitespace().map(String::from).collect();
        }
        if let Some(root) = get(ENV_SOURCE_ROOT) {
            config.source_root = PathBuf::from(root);
        }
        config.library = get(ENV_LIBRARY).map(PathBuf::from);
        if let Some(range) = get(ENV_RANGE) {
            config.range = range
                .parse()
                .map_err(|e| HarnessError::Config(format!("{ENV_RANGE}: {e}")))?;
        }
        Ok(config)
    }

    /// Candidate provider for this configuration: the prebuilt library when
    /// one is set, otherwise the source tree compiled unit by unit.
    ///
    /// The library path is made absolute so the loader opens that file and
    /// never searches the system library path for a bare file name.
    pub fn provider(&self) -> Result<Box<dyn CandidateProvider>, HarnessError> {
        if let Some(library) = &self.library {
            let resolved = std::fs::canonicalize(library).map_err(|e| {
                HarnessError::Config(format!("library not found: {}: {e}", library.display()))
            })?;
            if !resolved.is_file() {
                return Err(HarnessError::Config(format!(
                    "library is not a file: {}",
                    resolved.display()
                )));
            }
            return Ok(Box::new(Prebuilt::new(resolved)));
        }

        if !self.source_root.is_dir() {
            return Err(HarnessError::Config(format!(
                "source root not found: {}",
                self.source_root.display()
            )));
        }
        let builder = CandidateBuilder::new(&self.compiler)?.with_flags(&self.cflags);
        Ok(Box::new(SourceTree::new(&self.source_root, builder)))
    }
}

/// Resolve unit names in the order given, dropping repeats. No names
/// selects every unit.
pub fn parse_units<S: AsRef<str>>(names: &[S]) -> Result<Vec<Unit>, HarnessError> {
    if names.is_empty() {
        return Ok(Unit::all());
    }
    let mut units = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let unit = Unit::from_name(name).ok_or_else(|| {
            let known: Vec<_> = Unit::all().iter().map(|u| u.name()).collect();
            HarnessError::Config(format!(
                "Unknown unit '{name}', expected one of {}",
                known.join("|")
            ))
        })?;
        if !units.contains(&unit) {
            units.push(unit);
        }
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = HarnessConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.compiler, "cc");
        assert_eq!(config.source_root, PathBuf::from("candidates/src"));
        assert_eq!(config.range, CodeRange::MINIMUM);
    }

    #[test]
    fn env_values_override_defaults() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (ENV_CC, "clang"),
            (ENV_CFLAGS, "-O2  -Wall"),
            (ENV_SOURCE_ROOT, "/tmp/src"),
            (ENV_LIBRARY, "/tmp/libminilibc_abi.so"),
            (ENV_RANGE, "-128..512"),
        ]))
        .unwrap();
        assert_eq!(config.compiler, "clang");
        assert_eq!(config.cflags, vec!["-O2", "-Wall"]);
        assert_eq!(config.source_root, PathBuf::from("/tmp/src"));
        assert_eq!(config.library, Some(PathBuf::from("/tmp/libminilibc_abi.so")));
        assert_eq!(config.range, CodeRange::new(-128, 512).unwrap());
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = HarnessConfig::from_lookup(lookup(&[(ENV_CC, "  "), (ENV_LIBRARY, "")])).unwrap();
        assert_eq!(config.compiler, "cc");
        assert_eq!(config.library, None);
    }

    #[test]
    fn narrow_range_is_rejected() {
        let err = HarnessConfig::from_lookup(lookup(&[(ENV_RANGE, "0..128")])).unwrap_err();
        assert!(err.to_string().contains(ENV_RANGE), "{err}");
    }

    #[test]
    fn missing_inputs_are_config_errors() {
        let config = HarnessConfig {
            source_root: PathBuf::from("/nonexistent/candidates"),
            ..HarnessConfig::default()
        };
        assert!(matches!(config.provider(), Err(HarnessError::Config(_))));

        let config = HarnessConfig {
            library: Some(PathBuf::from("/nonexistent/lib.so")),
            ..HarnessConfig::default()
        };
        assert!(matches!(config.provider(), Err(HarnessError::Config(_))));
    }

    #[test]
    fn relative_library_resolves_against_cwd() {
        // Test binaries run from the package directory.
        let config = HarnessConfig {
            library: Some(PathBuf::from("Cargo.toml")),
            ..HarnessConfig::default()
        };
        let described = config.provider().unwrap().describe();
        let path = PathBuf::from(described.strip_prefix("library:").unwrap());
        assert!(path.is_absolute(), "{described}");
        assert!(path.ends_with("minilibc-harness/Cargo.toml"), "{described}");
    }

    #[test]
    fn library_directory_is_rejected() {
        let config = HarnessConfig {
            library: Some(PathBuf::from("src")),
            ..HarnessConfig::default()
        };
        let err = config.provider().err().unwrap();
        assert!(err.to_string().contains("not a file"), "{err}");
    }

    #[test]
    fn units_keep_order_and_drop_repeats() {
        use minilibc_core::ctype::CharClass;

        let units = parse_units(&["isdigit", "errno", "isdigit", "errno"]).unwrap();
        assert_eq!(units, vec![Unit::Class(CharClass::Digit), Unit::Errno]);
        assert_eq!(parse_units::<&str>(&[]).unwrap(), Unit::all());

        let err = parse_units(&["isdigit", "isfoo"]).unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
        assert!(err.to_string().contains("Unknown unit 'isfoo'"), "{err}");
    }
}
