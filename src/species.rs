use crate::errors::{SpeciesError, SpeciesResult};
use schema::{SpeciesData, SpeciesId};
use std::collections::HashMap;

/// Read-only access to species static data (base stats, abilities, gender
/// ratio, capture rate). Production hosts front the external species API
/// with their own caching implementation; tests and local runs use
/// [`StaticSpeciesProvider`].
pub trait SpeciesProvider: Send + Sync {
    fn get_species(&self, id: SpeciesId) -> SpeciesResult<SpeciesData>;
}

/// In-memory species catalog backed by a plain map.
///
/// Catalogs can be assembled programmatically or loaded from a RON document
/// holding a list of species records.
#[derive(Debug, Clone, Default)]
pub struct StaticSpeciesProvider {
    species: HashMap<SpeciesId, SpeciesData>,
}

impl StaticSpeciesProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_species(entries: Vec<SpeciesData>) -> Self {
        let mut provider = Self::new();
        for data in entries {
            provider.insert(data);
        }
        provider
    }

    /// Parse a RON list of species records into a catalog.
    pub fn from_ron(source: &str) -> SpeciesResult<Self> {
        let entries: Vec<SpeciesData> =
            ron::from_str(source).map_err(|err| SpeciesError::MalformedData(err.to_string()))?;
        Ok(Self::with_species(entries))
    }

    pub fn insert(&mut self, data: SpeciesData) {
        self.species.insert(data.id, data);
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl SpeciesProvider for StaticSpeciesProvider {
    fn get_species(&self, id: SpeciesId) -> SpeciesResult<SpeciesData> {
        self.species
            .get(&id)
            .cloned()
            .ok_or(SpeciesError::UnknownSpecies(id))
    }
}
