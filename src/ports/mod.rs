//! Port traits defining external boundaries.
//!
//! The filesystem is the only external system this crate talks to.
//! Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::{EntryKind, FileSystem, PortError};
