//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use super::search::{Search, SearchState};
use super::search_result::SearchResult;
use super::types::{ActiveSection, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub search: Search,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            search: Search::new(),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn search_state(&self) -> SearchState {
        self.search.state().await
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn cycle_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
    }

    pub async fn clear_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.clear();
    }

    pub async fn cycle_category_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.category = state.category.next();
    }

    pub async fn cycle_category_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.category = state.category.prev();
    }

    async fn result_count(&self) -> usize {
        match self.search.state().await {
            SearchState::Results(results) => results.len(),
            _ => 0,
        }
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.selected_result > 0 {
            state.selected_result -= 1;
        }
    }

    pub async fn move_selection_down(&self) {
        let count = self.result_count().await;
        let mut state = self.ui_state.lock().await;
        if state.selected_result < count.saturating_sub(1) {
            state.selected_result += 1;
        }
    }

    /// The result under the cursor, if the engine currently holds results.
    pub async fn selected_result(&self) -> Option<SearchResult> {
        let index = self.ui_state.lock().await.selected_result;
        match self.search.state().await {
            SearchState::Results(results) => results.get(index).cloned(),
            _ => None,
        }
    }

    /// Focus the result list after a successful search.
    pub async fn show_search_results(&self) {
        let mut state = self.ui_state.lock().await;
        state.selected_result = 0;
        state.show_detail_popup = false;
        state.active_section = ActiveSection::Results;
    }

    pub async fn show_detail_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_detail_popup = true;
    }

    pub async fn hide_detail_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_detail_popup = false;
    }

    pub async fn is_detail_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_detail_popup
    }

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
