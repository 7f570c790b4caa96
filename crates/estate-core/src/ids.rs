//! Kind-tagged integer identifiers.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::enums::EntityKind;

/// An integer identifier tagged with the kind of entity it names.
///
/// Contact `#3` and property `#3` are different ids. Serialized as the bare
/// integer; the kind is implied by where the id appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uuid {
    kind: EntityKind,
    id: u32,
}

impl Uuid {
    pub fn new(kind: EntityKind, id: u32) -> Self {
        Self { kind, id }
    }

    /// Shorthand for a contact id.
    pub fn contact(id: u32) -> Self {
        Self::new(EntityKind::Contact, id)
    }

    /// Shorthand for a property id.
    pub fn property(id: u32) -> Self {
        Self::new(EntityKind::Property, id)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

impl Serialize for Uuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.id)
    }
}

/// Parses a user-supplied id: a positive integer, optionally prefixed by `#`.
///
/// Returns `None` for zero, negative or non-numeric input.
pub fn parse_id(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(id),
    }
}
