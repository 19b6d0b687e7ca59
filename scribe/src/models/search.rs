use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::models::notes::ScoredNote;

#[derive(Builder, Debug, Deserialize, Serialize)]
pub struct NoteQueryRequest {
    /// Query string to compare notes to.
    pub query: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SearchResponse {
    /// Synthesized summary of the matching notes.
    pub summary: String,
    /// Matching notes ordered by relevance.
    pub results: Vec<ScoredNote>,
    /// Number of matching notes. Always equal to the length of `results`
    /// for a well-formed response.
    pub count: usize,
}

impl SearchResponse {
    pub fn is_consistent(&self) -> bool {
        self.count == self.results.len()
    }
}
