//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Top bar (search input and category tabs)
//! - `content`: Result list rendering per search state
//! - `overlays`: Modal overlays (error, detail, help)

mod content;
mod layout;
mod overlays;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{SearchState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, search_state: &SearchState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + category tabs
                Constraint::Min(0),    // Result list
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state);
        content::render_results(frame, chunks[1], ui_state, search_state);

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Detail popup for the selected result (if open)
        if ui_state.show_detail_popup {
            overlays::render_detail_popup(frame, ui_state, search_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
