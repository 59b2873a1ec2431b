use crate::error::{Result, SearchError};
use crate::ranker::{rank, ScoredResult};
use serde::Serialize;
use tidy_vector_store::{ItemId, VectorStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing has been indexed yet.
    Empty,
    /// Newest-indexed-first listing, no scores.
    Default,
    /// Results of the last query, best first.
    Queried,
}

/// What the consumer renders for one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEntry {
    pub position: usize,
    pub id: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl From<ScoredResult> for SessionEntry {
    fn from(result: ScoredResult) -> Self {
        Self {
            position: result.position,
            id: result.id,
            score: Some(result.score),
        }
    }
}

/// Current result list for one consumer.
///
/// Owned by whoever displays it; there is no shared session state. Every transition
/// replaces the entry list in a single assignment, so a reader never sees a mix of old
/// and new results.
#[derive(Debug, Clone)]
pub struct SearchSession {
    state: SessionState,
    entries: Vec<SessionEntry>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SessionState::Empty,
            entries: Vec::new(),
        }
    }

    /// Session for a freshly loaded store: Default if it has items, Empty otherwise.
    #[must_use]
    pub fn for_store(store: &VectorStore) -> Self {
        let mut session = Self::new();
        session.reset_to_default(store);
        session
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    pub fn current(&self) -> &[SessionEntry] {
        &self.entries
    }

    /// List the store newest first, without scores.
    ///
    /// An empty store (never populated, or cleared for a rebuild) leaves the session Empty.
    pub fn reset_to_default(&mut self, store: &VectorStore) {
        if store.is_empty() {
            self.state = SessionState::Empty;
            self.entries = Vec::new();
            return;
        }

        self.entries = store
            .all()
            .enumerate()
            .rev()
            .map(|(position, item)| SessionEntry {
                position,
                id: item.id.clone(),
                score: None,
            })
            .collect();
        self.state = SessionState::Default;
        log::debug!("Session reset to default ordering ({} items)", self.entries.len());
    }

    /// Replace the current results with a finished ranking.
    pub fn apply_query(&mut self, results: Vec<ScoredResult>) -> Result<()> {
        if self.state == SessionState::Empty {
            return Err(SearchError::SessionEmpty);
        }

        self.entries = results.into_iter().map(SessionEntry::from).collect();
        self.state = SessionState::Queried;
        Ok(())
    }

    /// Rank `store` against `query` and show the result.
    ///
    /// A session that is still Empty is first reset against `store`; if the store has no
    /// items the session stays Empty and nothing is ranked.
    pub fn query(&mut self, query: &[f32], store: &VectorStore) -> Result<()> {
        if self.state == SessionState::Empty {
            self.reset_to_default(store);
            if self.state == SessionState::Empty {
                return Ok(());
            }
        }

        let results = rank(query, store)?;
        self.apply_query(results)
    }

    /// Drop the active query and go back to the default listing.
    pub fn clear_query(&mut self, store: &VectorStore) {
        self.reset_to_default(store);
    }
}
