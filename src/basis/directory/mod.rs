pub mod config;
pub mod error;
pub mod export;
pub mod flatten;
pub mod io;
pub mod model;

pub use error::{Result, ToolError};
