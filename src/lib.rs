//! Static import extraction and file-level dependency resolution for Python, Ruby, Rust,
//! and TypeScript/JavaScript projects.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod metrics;
pub mod output;
pub mod parse;
pub mod walk;

pub use analyzer::{DependencyAnalyzer, DependencyListing};
pub use config::Config;
pub use errors::{DeptrailError, Result};
