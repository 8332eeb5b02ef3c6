//! Core type definitions for the application

use std::time::Instant;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Search,
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        // Only two sections, so forward/backward both toggle
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }
}

/// Content-type filter for a store search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Music,
    Software,
    Ebooks,
}

impl Category {
    pub const VARIANTS: [Category; 4] = [
        Category::All,
        Category::Music,
        Category::Software,
        Category::Ebooks,
    ];

    /// The remote API's "entity" keyword; empty means unfiltered.
    pub fn entity(self) -> &'static str {
        match self {
            Category::All => "",
            Category::Music => "musicTrack",
            Category::Software => "software",
            Category::Ebooks => "ebook",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Music => "Music",
            Category::Software => "Software",
            Category::Ebooks => "E-Books",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Category::All => Category::Music,
            Category::Music => Category::Software,
            Category::Software => Category::Ebooks,
            Category::Ebooks => Category::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Category::All => Category::Ebooks,
            Category::Music => Category::All,
            Category::Software => Category::Music,
            Category::Ebooks => Category::Software,
        }
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub category: Category,
    pub selected_result: usize,
    pub show_detail_popup: bool,
    pub show_help_popup: bool,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_query: String::new(),
            category: Category::All,
            selected_result: 0,
            show_detail_popup: false,
            show_help_popup: false,
            error_message: None,
            error_timestamp: None,
        }
    }
}
