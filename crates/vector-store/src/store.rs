use crate::error::{Result, VectorStoreError};
use crate::types::{IndexedItem, ItemId};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const STORE_SCHEMA_VERSION: u32 = 1;

/// Insertion-ordered embedding store with a single locked dimensionality.
///
/// The first appended item fixes the dimensionality `D` unless the store was created with
/// [`VectorStore::with_dimension`]. Mutation takes `&mut self`, so any reader holding
/// `&VectorStore` (a ranking pass, a session reset) sees contents that cannot change
/// underneath it.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    items: Vec<IndexedItem>,
    dimension: Option<usize>,
}

#[derive(Serialize)]
struct PersistedStoreRef<'a> {
    schema_version: u32,
    dimension: Option<usize>,
    items: &'a [IndexedItem],
}

#[derive(Deserialize)]
struct PersistedStore {
    schema_version: u32,
    dimension: Option<usize>,
    items: Vec<IndexedItem>,
}

impl VectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose dimensionality is locked before the first append.
    ///
    /// Fails with [`VectorStoreError::EmptyEmbedding`] when `dimension` is 0.
    pub fn with_dimension(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(VectorStoreError::EmptyEmbedding);
        }
        Ok(Self {
            items: Vec::new(),
            dimension: Some(dimension),
        })
    }

    /// Append one item. On failure the store is left unchanged.
    pub fn append(&mut self, item: IndexedItem) -> Result<()> {
        let dimension = self.check_embedding(&item.embedding)?;
        self.dimension = Some(dimension);
        self.items.push(item);
        Ok(())
    }

    /// Append a batch, all or nothing.
    pub fn extend(&mut self, items: impl IntoIterator<Item = IndexedItem>) -> Result<()> {
        let items: Vec<IndexedItem> = items.into_iter().collect();
        let Some(first) = items.first() else {
            return Ok(());
        };

        let dimension = self.check_embedding(&first.embedding)?;
        for item in &items[1..] {
            if item.embedding.len() != dimension {
                return Err(VectorStoreError::InvalidDimension {
                    expected: dimension,
                    actual: item.embedding.len(),
                });
            }
            check_finite(&item.embedding)?;
        }

        self.dimension = Some(dimension);
        self.items.extend(items);
        Ok(())
    }

    /// Dimensionality the store would have after accepting `embedding`.
    fn check_embedding(&self, embedding: &[f32]) -> Result<usize> {
        let dimension = match self.dimension {
            Some(expected) if embedding.len() != expected => {
                return Err(VectorStoreError::InvalidDimension {
                    expected,
                    actual: embedding.len(),
                });
            }
            Some(expected) => expected,
            None if embedding.is_empty() => return Err(VectorStoreError::EmptyEmbedding),
            None => embedding.len(),
        };
        check_finite(embedding)?;
        Ok(dimension)
    }

    /// Items in insertion order. Each call starts a fresh pass.
    pub fn all(&self) -> std::slice::Iter<'_, IndexedItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&IndexedItem> {
        self.items.get(position)
    }

    /// First item carrying `id`, with its insertion position.
    #[must_use]
    pub fn find(&self, id: &ItemId) -> Option<(usize, &IndexedItem)> {
        self.items
            .iter()
            .enumerate()
            .find(|(_, item)| &item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Remove every item and unlock the dimensionality.
    pub fn clear(&mut self) {
        self.items.clear();
        self.dimension = None;
    }

    /// Save store to disk, replacing any previous file atomically.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        log::info!("Saving VectorStore ({} items) to {:?}", self.items.len(), path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let persisted = PersistedStoreRef {
            schema_version: STORE_SCHEMA_VERSION,
            dimension: self.dimension,
            items: &self.items,
        };
        let bytes = serde_json::to_vec(&persisted)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Load store from disk, re-validating every record against the stored dimensionality.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading VectorStore from {:?}", path);
        let bytes = tokio::fs::read(path).await?;
        let persisted: PersistedStore = serde_json::from_slice(&bytes)?;
        if persisted.schema_version != STORE_SCHEMA_VERSION {
            return Err(VectorStoreError::UnsupportedSchema {
                found: persisted.schema_version,
                expected: STORE_SCHEMA_VERSION,
            });
        }

        let mut store = match persisted.dimension {
            Some(dimension) => Self::with_dimension(dimension)?,
            None => Self::new(),
        };
        store.extend(persisted.items)?;

        log::info!("Loaded {} items", store.len());
        Ok(store)
    }

    /// Load the store at `path`, or start empty when no file exists yet.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path.as_ref()).await {
            Err(VectorStoreError::IoError(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No store at {:?}; starting empty", path.as_ref());
                Ok(Self::new())
            }
            other => other,
        }
    }
}

// JSON has no encoding for NaN or infinity, so such a store could be saved but never loaded.
fn check_finite(embedding: &[f32]) -> Result<()> {
    match embedding.iter().position(|v| !v.is_finite()) {
        Some(position) => Err(VectorStoreError::NonFiniteEmbedding { position }),
        None => Ok(()),
    }
}
