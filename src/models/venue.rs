//! Venue model.
//!
//! A venue is a physical screening room. The scheduler only reads venues:
//! their identity keys the mutual-exclusion slots and their sort position
//! orders listings and timeline lanes.

use serde::{Deserialize, Serialize};

use super::{LocalizedText, VenueId};

/// A physical venue that hosts schedule entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Unique venue identifier.
    pub id: VenueId,
    /// Display name.
    pub name: LocalizedText,
    /// Sort position in listings (ascending).
    #[serde(default)]
    pub position: i32,
}

impl Venue {
    /// Creates a venue at sort position 0.
    pub fn new(id: impl Into<VenueId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: LocalizedText::same(name),
            position: 0,
        }
    }

    /// Sets the display name in both locales.
    pub fn with_name(mut self, name: LocalizedText) -> Self {
        self.name = name;
        self
    }

    /// Sets the sort position.
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }
}
