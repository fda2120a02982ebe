// Every export takes a plain `int` and touches no caller memory, so per-function
// safety docs would be boilerplate.
#![allow(clippy::missing_safety_doc)]
//! # minilibc-abi
//!
//! `extern "C"` boundary for the minilibc units. Built as a `cdylib`, this
//! crate is a candidate the conformance harness can load in place of the C
//! sources: it exports the twelve `is*` predicates, `toupper`/`tolower`, and
//! `__errno_location`, all delegating to `minilibc-core`.
//!
//! Symbols are only unmangled in release builds. Debug and test builds keep
//! them mangled so the test binary does not interpose the host libc; build
//! with `--release` before handing the library to the harness.

pub mod ctype_abi;
pub mod errno_abi;
