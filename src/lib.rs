//! depinject - fetch, cache and inject Maven artifacts
//!
//! Resolves `group:artifact:version` coordinates against a Maven-layout
//! repository, keeps a local copy of each archive, and appends that copy to
//! the code search path of a live execution context.
//!
//! ```rust,no_run
//! use depinject::context::{AppendToSearchPath, SearchPath};
//! use depinject::Pipeline;
//!
//! # fn main() -> depinject::DepinjectResult<()> {
//! let pipeline = Pipeline::builder(AppendToSearchPath).build()?;
//! let search_path = SearchPath::new();
//! pipeline.inject_shorthand("com.google.code.gson:gson:2.10.1", &search_path)?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod coordinate;
pub mod error;
pub mod fetch;
pub mod inject;
pub mod pipeline;
pub mod repository;
pub mod resolve;
pub mod ui;

pub use coordinate::Coordinate;
pub use error::{DepinjectError, DepinjectResult, ErrorKind};
pub use pipeline::{Cached, Pipeline, PipelineBuilder};
pub use repository::{Repository, RepositoryCatalog};
