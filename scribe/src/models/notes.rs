use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Note {
    /// Unique note ID assigned by the backend.
    pub id: String,
    /// Note content.
    pub text: String,
    /// Datetime the note was created in ISO format.
    pub timestamp: DateTime<Utc>,
}

/// A note returned from similarity search along with how closely it
/// matched the query. Backends may leave the score out.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScoredNote {
    #[serde(flatten)]
    pub note: Note,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

#[derive(Builder, Debug, Deserialize, Serialize)]
pub struct NewNoteRequest {
    /// Note content to add.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::ScoredNote;

    #[test]
    fn scored_note_without_similarity() {
        let data = r#"{"id":"n1","text":"Buy milk and eggs","timestamp":"2024-01-01T00:00:00Z"}"#;
        let scored: ScoredNote = serde_json::from_str(data).expect("valid scored note");
        assert_eq!(scored.note.id, "n1");
        assert_eq!(scored.note.text, "Buy milk and eggs");
        assert_eq!(scored.note.timestamp.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(scored.similarity, None);
    }

    #[test]
    fn scored_note_with_similarity() {
        let data = r#"{"id":"n2","text":"Oil change","timestamp":"2024-03-05T12:30:00Z","similarity":0.82}"#;
        let scored: ScoredNote = serde_json::from_str(data).expect("valid scored note");
        assert_eq!(scored.similarity, Some(0.82));
    }
}
