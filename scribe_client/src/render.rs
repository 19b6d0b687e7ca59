use chrono::{DateTime, Utc};
use scribe::{Note, SearchResponse};

use crate::models::state::DashboardState;

pub const TITLE: &str = "Note Assistant";
pub const PLACEHOLDER: &str = "Speak or type to add/search notes...";
pub const SAVE_SUCCESS_BANNER: &str = "Note saved successfully!";
pub const RESULT_SUMMARY_ID: &str = "result-summary";

pub fn save_button(state: &DashboardState) -> String {
    let label = if state.loading.save {
        "Saving..."
    } else {
        "Save Note"
    };
    button(label, state.can_save())
}

pub fn search_button(state: &DashboardState) -> String {
    let label = if state.loading.search {
        "Searching..."
    } else {
        "Search Note"
    };
    button(label, state.can_search())
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("[{label}] (disabled)")
    }
}

pub fn count_label(count: usize) -> String {
    let noun = if count == 1 { "result" } else { "results" };
    format!("{count} {noun} found")
}

/// The card offered under search results. Saving it stores the formatted
/// results as a new note.
pub fn summary_card(response: &SearchResponse, now: DateTime<Utc>) -> Note {
    Note {
        id: RESULT_SUMMARY_ID.to_string(),
        text: response.summary.clone(),
        timestamp: now,
    }
}

pub fn note_card(note: &Note, show_save_button: bool) -> String {
    let mut card = format!(
        "+ {}\n| {}\n",
        note.timestamp.format("%Y-%m-%d %H:%M UTC"),
        note.text.replace('\n', "\n| ")
    );
    if show_save_button {
        card.push_str("| /keep to save this result\n");
    }
    card.push('+');
    card
}

pub fn results(response: &SearchResponse, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "Search Results ({})\n\nSummary\n  {}\n\nMatching Notes\n",
        count_label(response.count),
        response.summary.replace('\n', "\n  ")
    );
    for (idx, result) in response.results.iter().enumerate() {
        let similarity = result
            .similarity
            .map(|score| format!(" [{:.0}% match]", score * 100.0))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {}. {}{similarity}\n     {}\n",
            idx + 1,
            result.note.text,
            result.note.timestamp.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    out.push('\n');
    out.push_str(&note_card(&summary_card(response, now), true));
    out
}

/// The whole view, as shown by `/show`.
pub fn dashboard(state: &DashboardState, now: DateTime<Utc>) -> String {
    let input = if state.input_text.is_empty() {
        format!("({PLACEHOLDER})")
    } else {
        state.input_text.clone()
    };
    let mut out = format!(
        "{TITLE}\n\n> {input}\n\n{}  {}\n",
        save_button(state),
        search_button(state)
    );
    if state.save_success {
        out.push_str(&format!("\n{SAVE_SUCCESS_BANNER}\n"));
    }
    if let Some(response) = state.visible_results() {
        out.push('\n');
        out.push_str(&results(response, now));
        out.push('\n');
    }
    out
}

/// Lines describing what changed between two snapshots of the dashboard.
/// Typed input is left out since the user just entered it.
pub fn changes(prev: &DashboardState, next: &DashboardState, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![];
    if !prev.loading.save && next.loading.save {
        lines.push("Saving...".to_string());
    }
    if !prev.loading.search && next.loading.search {
        lines.push("Searching...".to_string());
    }
    if !prev.save_success && next.save_success {
        lines.push(SAVE_SUCCESS_BANNER.to_string());
    }
    if let Some(response) = next.visible_results() {
        if prev.visible_results() != Some(response) {
            lines.push(results(response, now));
        }
    }
    lines
}
