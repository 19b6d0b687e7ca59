#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use scribe::{NewNoteRequest, Note, NoteQueryRequest, ScoredNote, SearchResponse};
use scribe_client::error::{ClientError, ErrorReporter, Operation};
use tokio::net::TcpListener;

#[derive(Clone, Copy, Default, PartialEq)]
pub enum Mode {
    #[default]
    Normal,
    /// Acknowledge saves with an empty body.
    EmptyAck,
    /// Fail every request.
    Fail,
    /// Report one more search result than is returned.
    Inconsistent,
}

/// What the fake backend saw for a single request.
#[derive(Clone, Debug)]
pub struct Seen {
    pub authorization: Option<String>,
    pub client_header: Option<String>,
    pub params: HashMap<String, String>,
}

/// In-memory stand-in for the notes backend. Search matches notes that
/// contain the query, case-insensitively.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub mode: Mode,
    pub summary: String,
    pub notes: Arc<Mutex<Vec<Note>>>,
    pub seen: Arc<Mutex<Vec<Seen>>>,
}

impl FakeBackend {
    pub fn new(mode: Mode, summary: &str) -> Self {
        Self {
            mode,
            summary: summary.to_string(),
            ..Default::default()
        }
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().expect("notes lock").clone()
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().expect("seen lock").clone()
    }

    fn record(&self, headers: &HeaderMap, params: HashMap<String, String>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().expect("seen lock").push(Seen {
            authorization: header(AUTHORIZATION.as_str()),
            client_header: header("x-client"),
            params,
        });
    }
}

async fn add_note(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(request): Json<NewNoteRequest>,
) -> Response {
    backend.record(&headers, params);
    match backend.mode {
        Mode::Fail => (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response(),
        Mode::EmptyAck => {
            let mut notes = backend.notes.lock().expect("notes lock");
            let id = format!("n{}", notes.len() + 1);
            notes.push(Note {
                id,
                text: request.text,
                timestamp: Utc::now(),
            });
            StatusCode::NO_CONTENT.into_response()
        }
        Mode::Normal | Mode::Inconsistent => {
            let mut notes = backend.notes.lock().expect("notes lock");
            let note = Note {
                id: format!("n{}", notes.len() + 1),
                text: request.text,
                timestamp: Utc::now(),
            };
            notes.push(note.clone());
            (StatusCode::CREATED, Json(note)).into_response()
        }
    }
}

async fn query_notes(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(request): Json<NoteQueryRequest>,
) -> Response {
    backend.record(&headers, params);
    if backend.mode == Mode::Fail {
        return (StatusCode::BAD_GATEWAY, "search unavailable").into_response();
    }
    let query = request.query.to_lowercase();
    let results: Vec<ScoredNote> = backend
        .notes()
        .into_iter()
        .filter(|note| note.text.to_lowercase().contains(&query))
        .map(|note| ScoredNote {
            note,
            similarity: Some(0.9),
        })
        .collect();
    let mut count = results.len();
    if backend.mode == Mode::Inconsistent {
        count += 1;
    }
    let response = SearchResponse {
        summary: backend.summary.clone(),
        results,
        count,
    };
    Json(response).into_response()
}

/// Serve the fake backend on an ephemeral port and return its base URL.
pub async fn spawn_backend(backend: FakeBackend) -> Result<String, Box<dyn std::error::Error>> {
    let router = Router::new()
        .route("/notes", post(add_note))
        .route("/notes/query", post(query_notes))
        .with_state(backend);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let _ = tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(format!("http://{addr}"))
}

#[derive(Default)]
pub struct RecordingReporter {
    pub reports: Mutex<Vec<(Operation, String)>>,
}

impl RecordingReporter {
    pub fn operations(&self) -> Vec<Operation> {
        self.reports
            .lock()
            .expect("reports lock")
            .iter()
            .map(|(operation, _)| *operation)
            .collect()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, operation: Operation, err: &ClientError) {
        self.reports
            .lock()
            .expect("reports lock")
            .push((operation, err.to_string()));
    }
}
