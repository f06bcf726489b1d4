//! Core library for the basis-directory-export command line application.
//!
//! The library exposes the pieces that power the command-line interface as
//! well as the integration tests. HTTP access and file adapters live under
//! [`basis::directory::io`], the API payload types inside
//! [`basis::directory::model`], the row flattening logic in
//! [`basis::directory::flatten`], and the run orchestration under
//! [`basis::directory::export`].

pub mod basis;

pub use basis::directory::{Result, ToolError, config, error, export, flatten, io, model};
