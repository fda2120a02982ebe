//! Units under test: one symbol per independently built module.

use std::fmt;
use std::path::PathBuf;

use minilibc_core::ctype::{CaseMap, CharClass};

/// Symbol exported by the errno unit.
pub const ERRNO_LOCATION_SYMBOL: &str = "__errno_location";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Class(CharClass),
    Case(CaseMap),
    Errno,
}

impl Unit {
    /// Every unit, classifiers first, then transforms, then errno.
    #[must_use]
    pub fn all() -> Vec<Unit> {
        CharClass::ALL
            .into_iter()
            .map(Unit::Class)
            .chain(CaseMap::ALL.into_iter().map(Unit::Case))
            .chain(std::iter::once(Unit::Errno))
            .collect()
    }

    /// Unit name; also the source file stem.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Class(class) => class.symbol(),
            Self::Case(map) => map.symbol(),
            Self::Errno => "errno",
        }
    }

    /// Symbol the built module must export.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Errno => ERRNO_LOCATION_SYMBOL,
            other => other.name(),
        }
    }

    /// Source path relative to a candidate source root.
    #[must_use]
    pub fn source_path(self) -> PathBuf {
        match self {
            Self::Errno => PathBuf::from("errno").join("errno.c"),
            other => PathBuf::from("ctype").join(format!("{}.c", other.name())),
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Unit> {
        if name == "errno" || name == ERRNO_LOCATION_SYMBOL {
            return Some(Self::Errno);
        }
        CharClass::from_symbol(name)
            .map(Self::Class)
            .or_else(|| CaseMap::from_symbol(name).map(Self::Case))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
