//! Candidate loading seam for the minilibc harness.
//!
//! This crate owns every `unsafe` operation the harness needs, so the harness
//! itself can stay `forbid(unsafe_code)`:
//! - [`CandidateBuilder`]: compile one C unit into a shared object inside a
//!   scoped build directory that is removed on drop.
//! - [`CandidateModule`]: a loaded shared object with typed symbol binding
//!   ([`CharFn`] for `int(int)`, [`ErrnoCell`] for `__errno_location`).
//! - [`CandidateProvider`]: where modules come from, either a source tree
//!   compiled per unit or one prebuilt library exporting everything.

pub mod compile;
pub mod error;
pub mod module;
pub mod provider;
pub mod unit;

pub use compile::{CandidateBuilder, DEFAULT_COMPILER};
pub use error::LoadError;
pub use module::{CandidateModule, CharFn, CharFnPtr, ErrnoCell, ErrnoLocationFn};
pub use provider::{CandidateProvider, Prebuilt, SourceTree};
pub use unit::Unit;
