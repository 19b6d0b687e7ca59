mod models;

pub use models::notes::{NewNoteRequest, Note, ScoredNote};
pub use models::search::{NoteQueryRequest, SearchResponse};
