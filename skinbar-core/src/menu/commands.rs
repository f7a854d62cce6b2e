//! Command identifiers reported back to the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a leaf across the whole menu description.
///
/// The engine never runs application logic. Activating a leaf reports its
/// command id to a [CommandDispatcher](crate::dispatch::CommandDispatcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(pub u32);

impl CommandId {
    /// The raw id.
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for CommandId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
