use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bon::Builder;
use scribe::SearchResponse;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
    client::NoteBackend,
    error::{ErrorReporter, Operation, TracingReporter},
    models::state::DashboardState,
    timer::ResettableTimer,
    utils,
};

/// Matching notes are cut to this many characters when search results are
/// saved as a note.
const RESULT_PREVIEW_CHARS: usize = 100;

#[derive(Builder, Clone, Debug)]
pub struct DashboardOptions {
    /// Bearer token passed to every backend call.
    pub token: Option<String>,
    /// How long the save notice stays up after a successful save.
    #[builder(default = Duration::from_millis(utils::default_notice_millis()))]
    pub notice_duration: Duration,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The published view state plus the teardown flag. The flag is only read
/// and written under the channel's lock, so no update lands after
/// [`ViewState::close`] returns.
struct ViewState {
    sender: watch::Sender<DashboardState>,
    closed: AtomicBool,
}

impl ViewState {
    fn new() -> Self {
        let (sender, _) = watch::channel(DashboardState::default());
        Self {
            sender,
            closed: AtomicBool::new(false),
        }
    }

    fn update(&self, modify: impl FnOnce(&mut DashboardState)) {
        self.sender.send_if_modified(|state| {
            if self.closed.load(Ordering::Acquire) {
                return false;
            }
            modify(state);
            true
        });
    }

    fn close(&self) {
        self.sender.send_if_modified(|_| {
            self.closed.store(true, Ordering::Release);
            false
        });
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

struct Inner<B> {
    backend: B,
    reporter: Arc<dyn ErrorReporter>,
    token: Option<String>,
    state: Arc<ViewState>,
    notice: ResettableTimer,
}

/// Clears a loading flag when dropped so the flag is reset however the
/// operation ends.
struct LoadingGuard<'a> {
    state: &'a ViewState,
    clear: fn(&mut DashboardState),
}

impl<'a> LoadingGuard<'a> {
    fn start(
        state: &'a ViewState,
        set: fn(&mut DashboardState),
        clear: fn(&mut DashboardState),
    ) -> Self {
        state.update(set);
        Self { state, clear }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.update(self.clear);
    }
}

/// Controller behind the note dashboard. Holds the transient view state and
/// sequences calls to the note backend. Clones share the same state; the
/// pending save notice is cancelled once the last clone is dropped or
/// [`Dashboard::close`] is called.
pub struct Dashboard<B> {
    inner: Arc<Inner<B>>,
}

impl<B> Clone for Dashboard<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: NoteBackend> Dashboard<B> {
    pub fn new(backend: B, options: DashboardOptions) -> Self {
        Self::with_reporter(backend, options, Arc::new(TracingReporter))
    }

    pub fn with_reporter(
        backend: B,
        options: DashboardOptions,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let inner = Inner {
            backend,
            reporter,
            token: options.token,
            state: Arc::new(ViewState::new()),
            notice: ResettableTimer::new(options.notice_duration),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    pub fn state(&self) -> DashboardState {
        self.inner.state.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.sender.subscribe()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.state.update(|state| state.input_text = text);
    }

    /// Save the current input as a note. Blank input is ignored. On success
    /// the input is cleared and the save notice is shown; failures are only
    /// reported.
    pub async fn save(&self) {
        let Some(text) = self.non_blank_input() else {
            return;
        };

        let _loading = LoadingGuard::start(
            &self.inner.state,
            |state| state.loading.save = true,
            |state| state.loading.save = false,
        );
        debug!("saving note ({} chars)", text.chars().count());
        match self
            .inner
            .backend
            .add_note(&text, self.inner.token.as_deref())
            .await
        {
            Ok(note) => {
                if let Some(note) = note {
                    info!("saved note {}", note.id);
                }
                self.inner.state.update(|state| state.input_text.clear());
                self.show_save_notice();
            }
            Err(err) => self.inner.reporter.report(Operation::AddNote, &err),
        }
    }

    /// Search notes similar to the current input. Blank input is ignored.
    /// Results are only replaced on success.
    pub async fn search(&self) {
        let Some(query) = self.non_blank_input() else {
            return;
        };

        let _loading = LoadingGuard::start(
            &self.inner.state,
            |state| state.loading.search = true,
            |state| state.loading.search = false,
        );
        debug!("searching notes");
        match self
            .inner
            .backend
            .query_notes(&query, self.inner.token.as_deref())
            .await
        {
            Ok(response) => {
                info!("search matched {} notes", response.count);
                self.inner
                    .state
                    .update(|state| state.results = Some(response));
            }
            Err(err) => self.inner.reporter.report(Operation::QueryNotes, &err),
        }
    }

    /// Save the latest search results as a note of their own. Does nothing
    /// when there are no results.
    pub async fn save_result(&self) {
        let Some(text) = self
            .inner
            .state
            .sender
            .borrow()
            .results
            .as_ref()
            .map(result_note_text)
        else {
            return;
        };

        debug!("saving search results as a note");
        match self
            .inner
            .backend
            .add_note(&text, self.inner.token.as_deref())
            .await
        {
            Ok(note) => {
                if let Some(note) = note {
                    info!("saved search results as note {}", note.id);
                }
                self.show_save_notice();
            }
            Err(err) => self.inner.reporter.report(Operation::SaveResult, &err),
        }
    }

    /// Tear down the view. The pending save notice is cancelled, and
    /// operations still in flight settle without touching the state.
    pub fn close(&self) {
        self.inner.state.close();
        self.inner.notice.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.state.is_closed()
    }

    fn non_blank_input(&self) -> Option<String> {
        let state = self.inner.state.sender.borrow();
        if state.input_text.trim().is_empty() {
            None
        } else {
            Some(state.input_text.clone())
        }
    }

    fn show_save_notice(&self) {
        // Re-arm before raising the flag so a superseded timer can't clear
        // the new notice.
        let state = Arc::clone(&self.inner.state);
        self.inner.notice.arm(move || {
            state.update(|state| state.save_success = false);
        });
        self.inner.state.update(|state| state.save_success = true);
    }
}

/// Plain-text form of search results for saving as a note.
pub fn result_note_text(response: &SearchResponse) -> String {
    let matches: String = response
        .results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let text = &result.note.text;
            let preview: String = text.chars().take(RESULT_PREVIEW_CHARS).collect();
            let ellipsis = if text.chars().count() > RESULT_PREVIEW_CHARS {
                "..."
            } else {
                ""
            };
            format!("\n{}. {preview}{ellipsis}", idx + 1)
        })
        .collect();
    format!(
        "SUMMARY:\n{}\n\nMATCHING NOTES:\n{matches}",
        response.summary
    )
}
