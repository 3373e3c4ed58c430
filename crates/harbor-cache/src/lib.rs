//! Bounded structure cache for Harbor.
//!
//! This crate provides the storage half of a gateway client:
//!
//! - **Structures**: domain entities with a stable id and in-place patching
//! - **DataStore**: a capacity-limited, insertion-ordered store with FIFO
//!   eviction and id/structure resolution

mod error;
pub mod store;
pub mod structure;

pub use error::StructureError;
pub use store::{Added, DataStore};
pub use structure::{
    Factory, Origin, Resolvable, ShardId, Structure, StructureKind, raw_id, require_id,
};
