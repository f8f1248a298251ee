//! Cassette data structures for recorded filesystem interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Methods that change the filesystem when called.
pub const MUTATING_METHODS: &[&str] =
    &["create_dir_all", "symlink", "hard_link", "junction", "copy_file", "remove_file"];

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (e.g. "fs").
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

impl Interaction {
    /// Returns `true` if this call could have changed the filesystem.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        MUTATING_METHODS.contains(&self.method.as_str())
    }
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Layout root the recorded pass ran against.
    pub root: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Interactions that changed the filesystem, in call order.
    pub fn mutations(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter().filter(|i| i.is_mutation())
    }
}
