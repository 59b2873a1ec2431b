use crate::error::{Result, VectorStoreError};
use async_trait::async_trait;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

/// Produces embeddings of a fixed dimensionality for text and image inputs.
///
/// Model inference may block for a long time, so callers should await these off any
/// latency-sensitive path. Nothing downstream cares how the vectors were produced, only
/// that every vector has length [`Embedder::dimension`].
#[async_trait]
pub trait Embedder: Send + Sync {
    fn dimension(&self) -> usize;

    async fn embed_text(&self, text: &str) -> Result<Vec<f32>>;

    async fn embed_image(&self, image: &[u8]) -> Result<Vec<f32>>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EmbedMode {
    Stub,
}

impl EmbedMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stub => "stub",
        }
    }

    /// Build the backend for this mode.
    pub fn embedder(self, dimension: usize) -> Result<Arc<dyn Embedder>> {
        if dimension == 0 {
            return Err(VectorStoreError::EmptyEmbedding);
        }
        match self {
            Self::Stub => Ok(Arc::new(StubEmbedder::new(dimension))),
        }
    }
}

impl FromStr for EmbedMode {
    type Err = VectorStoreError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            other => Err(VectorStoreError::UnsupportedEmbedMode(other.to_string())),
        }
    }
}

impl Display for EmbedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic model-free embedder: hashes the input into a unit vector.
///
/// Identical inputs always map to identical vectors; text and image bytes hash into
/// separate domains so `"abc"` and the bytes `b"abc"` do not collide.
#[derive(Clone, Debug)]
pub struct StubEmbedder {
    dimension: usize,
}

impl StubEmbedder {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

const TEXT_DOMAIN: u64 = 0x7465_7874;
const IMAGE_DOMAIN: u64 = 0x696d_6167;

#[async_trait]
impl Embedder for StubEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        Ok(stub_embed(TEXT_DOMAIN, text.as_bytes(), self.dimension))
    }

    async fn embed_image(&self, image: &[u8]) -> Result<Vec<f32>> {
        if image.is_empty() {
            return Err(VectorStoreError::EmbeddingError(
                "image payload is empty".to_string(),
            ));
        }
        Ok(stub_embed(IMAGE_DOMAIN, image, self.dimension))
    }
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

fn stub_embed(domain: u64, bytes: &[u8], dimension: usize) -> Vec<f32> {
    let mut state = fnv1a_64(bytes)
        ^ domain
        ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let high = (bits >> 32) as u32;
        let mantissa = high >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    normalize(&mut vec);
    vec
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
