//! # minilibc-core
//!
//! Safe Rust reference semantics for the minilibc units under test.
//!
//! The `ctype` module is the oracle the conformance harness checks candidates
//! against, and the implementation the `minilibc-abi` crate exports. No
//! `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod ctype;
pub mod errno;
