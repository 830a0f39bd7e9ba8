use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::error::{CatalogError, CatalogResult};
use super::types::{CatalogEntry, CatalogMetadata, Location};

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    metadata: CatalogMetadata,
    #[serde(default)]
    endpoints: Vec<CatalogEntry>,
    #[serde(default)]
    webhooks: Vec<CatalogEntry>,
}

/// Immutable set of endpoints and webhooks, endpoints first.
#[derive(Debug, Clone)]
pub struct Catalog {
    metadata: CatalogMetadata,
    entries: Vec<CatalogEntry>,
    endpoint_count: usize,
}

impl Catalog {
    /// Reads and parses the catalog document at `path`.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&raw)?;

        info!(
            path = %path.display(),
            declared_entries = catalog.metadata.total_entries,
            endpoints = catalog.endpoint_count,
            webhooks = catalog.webhook_count(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Self::from_parts(document.metadata, document.endpoints, document.webhooks)
    }

    /// Builds a catalog from already-parsed parts, assigning missing identifiers and
    /// rejecting duplicates.
    pub fn from_parts(
        metadata: CatalogMetadata,
        endpoints: Vec<CatalogEntry>,
        webhooks: Vec<CatalogEntry>,
    ) -> CatalogResult<Self> {
        let endpoint_count = endpoints.len();
        let mut entries: Vec<CatalogEntry> = endpoints.into_iter().chain(webhooks).collect();

        let mut seen = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    index,
                    field: "name",
                });
            }
            if entry.source.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    index,
                    field: "source",
                });
            }
            if !entry.id.is_empty() && !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateId {
                    id: entry.id.clone(),
                });
            }
        }

        // Explicit ids are all known before any positional id is generated.
        for (index, entry) in entries.iter_mut().enumerate() {
            if !entry.id.is_empty() {
                continue;
            }
            let generated = format!("endpoint_{}", index);
            if !seen.insert(generated.clone()) {
                return Err(CatalogError::GeneratedIdCollision {
                    id: generated,
                    index,
                });
            }
            entry.id = generated;
        }

        if metadata.total_entries != 0 && metadata.total_entries != entries.len() {
            warn!(
                declared = metadata.total_entries,
                loaded = entries.len(),
                "Catalog metadata count does not match loaded entries"
            );
        }

        Ok(Self {
            metadata,
            entries,
            endpoint_count,
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn endpoints(&self) -> &[CatalogEntry] {
        &self.entries[..self.endpoint_count]
    }

    pub fn webhooks(&self) -> &[CatalogEntry] {
        &self.entries[self.endpoint_count..]
    }

    pub fn webhook_count(&self) -> usize {
        self.entries.len() - self.endpoint_count
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct MapEndpoint {
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: Option<Location>,
}

#[derive(Debug, Deserialize)]
struct MapCategory {
    #[serde(default)]
    endpoints: Vec<MapEndpoint>,
}

/// Per-source location map (`<source>/map.json`), keyed by category.
///
/// Values that are not category objects (counters, version strings) are skipped.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    categories: BTreeMap<String, Vec<(String, Location)>>,
}

impl SourceMap {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let document: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw)?;
        let mut categories = BTreeMap::new();

        for (category, value) in document {
            if !value.is_object() {
                continue;
            }
            let parsed: MapCategory = match serde_json::from_value(value) {
                Ok(parsed) => parsed,
                Err(e) => {
                    debug!(category = %category, error = %e, "Skipping non-category map entry");
                    continue;
                }
            };
            let located: Vec<(String, Location)> = parsed
                .endpoints
                .into_iter()
                .filter_map(|ep| ep.location.map(|loc| (ep.name, loc)))
                .collect();
            categories.insert(category, located);
        }

        Ok(Self { categories })
    }

    pub fn insert(&mut self, category: &str, name: &str, location: Location) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .push((name.to_string(), location));
    }

    /// Location of the endpoint whose name matches exactly.
    pub fn find(&self, endpoint_name: &str) -> Option<Location> {
        self.categories
            .values()
            .flatten()
            .find(|(name, _)| name == endpoint_name)
            .map(|(_, location)| *location)
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
