use scribe::SearchResponse;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Loading {
    pub save: bool,
    pub search: bool,
}

/// Everything the dashboard shows. Owned by the dashboard controller and
/// dropped along with it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub input_text: String,
    pub results: Option<SearchResponse>,
    pub loading: Loading,
    pub save_success: bool,
}

impl DashboardState {
    fn has_input(&self) -> bool {
        !self.input_text.trim().is_empty()
    }

    pub fn can_save(&self) -> bool {
        !self.loading.save && self.has_input()
    }

    pub fn can_search(&self) -> bool {
        !self.loading.search && self.has_input()
    }

    /// Results are hidden while a newer search is in flight.
    pub fn visible_results(&self) -> Option<&SearchResponse> {
        self.results.as_ref().filter(|_| !self.loading.search)
    }
}
