//! Local artifact cache
//!
//! Archives live under a cache root at a path derived only from the
//! coordinate: `root/group/segments/artifact/version/artifact-version.jar`.
//! Every process using the same root computes the same path.
//!
//! # Consistency Model
//!
//! - Presence is validity: entries are never checksummed, expired or evicted
//! - Archives only appear through an atomic rename of a fully written file,
//!   so an existing path always holds a complete archive
//! - Fetches for one path are serialized in-process ([`CoordinateLocks`])
//!   and across processes ([`FileLock`])
//!
//! # Entry States
//!
//! | State | On disk | Description |
//! |-------|---------|-------------|
//! | Miss | nothing, or only `.part`/`.lock` files | Needs a fetch |
//! | Hit | `artifact-version.jar` | Complete, used as is |

pub mod lock;
pub mod store;

pub use lock::{CoordinateLocks, FileLock};
pub use store::{ArtifactCache, CacheState, DEFAULT_CACHE_ROOT};
