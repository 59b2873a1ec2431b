use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tidy_vector_store::ItemId;

/// One item to be embedded during an index build.
///
/// On disk this is a JSON object with an `id` and exactly one payload key:
/// `{"id": "a.jpg", "image_path": "DCIM/a.jpg"}`, `{"id": "n1", "text": "..."}` or
/// `{"id": "b.jpg", "embedding": [0.1, 0.2]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexSource {
    pub id: ItemId,
    #[serde(flatten)]
    pub payload: SourcePayload,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePayload {
    Text(String),
    ImagePath(PathBuf),
    /// Precomputed vector, stored as-is.
    Embedding(Vec<f32>),
    #[serde(skip)]
    Image(Vec<u8>),
}

impl IndexSource {
    pub fn text(id: impl Into<ItemId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: SourcePayload::Text(text.into()),
        }
    }

    pub fn image(id: impl Into<ItemId>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            payload: SourcePayload::Image(bytes),
        }
    }

    pub fn image_path(id: impl Into<ItemId>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            payload: SourcePayload::ImagePath(path.into()),
        }
    }

    pub fn embedding(id: impl Into<ItemId>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            payload: SourcePayload::Embedding(embedding),
        }
    }
}

/// Read a JSON array of sources. Relative `image_path`s resolve against the file's directory.
pub async fn load_sources(path: impl AsRef<Path>) -> Result<Vec<IndexSource>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let mut sources: Vec<IndexSource> = serde_json::from_slice(&bytes)?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for source in &mut sources {
        if let SourcePayload::ImagePath(image) = &mut source.payload {
            if image.is_relative() {
                *image = base.join(&*image);
            }
        }
    }
    log::debug!("Loaded {} index sources from {:?}", sources.len(), path);
    Ok(sources)
}
