use serde::{Deserialize, Serialize};

/// Statistics about an index build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Items embedded and stored
    pub items: usize,

    /// Items whose embedding failed
    pub skipped: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Errors encountered, one per skipped item
    pub errors: Vec<String>,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self) {
        self.items += 1;
    }

    pub fn add_error(&mut self, error: String) {
        self.skipped += 1;
        self.errors.push(error);
    }
}
