//! Injection targets
//!
//! Live execution contexts that can accept extra code search path entries,
//! each paired with the capability that extends it:
//!
//! | Target | Capability | Effect |
//! |--------|------------|--------|
//! | [`SearchPath`] | [`AppendToSearchPath`] | Shared in-process path list consulted by a host |
//! | [`ProcessEnvironment`] | [`EnvPathVar`] | PATH-style variable of this process, inherited by children |

pub mod env;
pub mod search_path;

pub use env::{EnvPathVar, ProcessEnvironment, DEFAULT_PATH_VAR};
pub use search_path::{AppendToSearchPath, SearchPath};
