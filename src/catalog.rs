//! Catalog collaborator.
//!
//! The catalog subsystem owns venues, works and groups. The scheduler only
//! reads them through the [`Catalog`] trait, always receiving owned
//! snapshots of the current state so that runtimes are never cached on
//! the scheduling side.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{Group, GroupId, Venue, VenueId, Work, WorkId};

/// Read-only view of the festival catalog.
pub trait Catalog: Send + Sync {
    /// Looks up a venue.
    fn venue(&self, id: &VenueId) -> Option<Venue>;

    /// Looks up a work.
    fn work(&self, id: &WorkId) -> Option<Work>;

    /// Looks up a group.
    fn group(&self, id: &GroupId) -> Option<Group>;

    /// All venues, ordered by sort position then ID.
    fn venues(&self) -> Vec<Venue>;
}

/// Serialized catalog contents (JSON seed file).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub works: Vec<Work>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl CatalogSeed {
    /// Reads a seed from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Seed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// In-memory catalog.
///
/// Stands in for the catalog subsystem in the server binary and in tests.
/// Edits made here (e.g. [`InMemoryCatalog::set_work_runtime`]) are seen by
/// the very next overlap check.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    venues: RwLock<HashMap<VenueId, Venue>>,
    works: RwLock<HashMap<WorkId, Work>>,
    groups: RwLock<HashMap<GroupId, Group>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from a seed. Later duplicates replace earlier ones.
    pub fn from_seed(seed: CatalogSeed) -> Self {
        let catalog = Self::new();
        for v in seed.venues {
            catalog.insert_venue(v);
        }
        for w in seed.works {
            catalog.insert_work(w);
        }
        for g in seed.groups {
            catalog.insert_group(g);
        }
        catalog
    }

    /// Adds a venue.
    pub fn with_venue(self, venue: Venue) -> Self {
        self.insert_venue(venue);
        self
    }

    /// Adds a work.
    pub fn with_work(self, work: Work) -> Self {
        self.insert_work(work);
        self
    }

    /// Adds a group.
    pub fn with_group(self, group: Group) -> Self {
        self.insert_group(group);
        self
    }

    /// Inserts or replaces a venue.
    pub fn insert_venue(&self, venue: Venue) {
        self.venues.write().insert(venue.id.clone(), venue);
    }

    /// Inserts or replaces a work.
    pub fn insert_work(&self, work: Work) {
        self.works.write().insert(work.id.clone(), work);
    }

    /// Inserts or replaces a group.
    pub fn insert_group(&self, group: Group) {
        self.groups.write().insert(group.id.clone(), group);
    }

    /// Changes a work's runtime. Returns `false` if the work is unknown.
    ///
    /// Existing schedule entries are not re-validated.
    pub fn set_work_runtime(&self, id: &WorkId, runtime_minutes: u32) -> bool {
        match self.works.write().get_mut(id) {
            Some(work) => {
                work.runtime = Some(runtime_minutes.to_string());
                true
            }
            None => false,
        }
    }

    /// Removes a work. Group memberships are left dangling.
    pub fn remove_work(&self, id: &WorkId) -> Option<Work> {
        self.works.write().remove(id)
    }
}

impl Catalog for InMemoryCatalog {
    fn venue(&self, id: &VenueId) -> Option<Venue> {
        self.venues.read().get(id).cloned()
    }

    fn work(&self, id: &WorkId) -> Option<Work> {
        self.works.read().get(id).cloned()
    }

    fn group(&self, id: &GroupId) -> Option<Group> {
        self.groups.read().get(id).cloned()
    }

    fn venues(&self) -> Vec<Venue> {
        let mut venues: Vec<Venue> = self.venues.read().values().cloned().collect();
        venues.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        venues
    }
}
