//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (sections, categories, UI state)
//! - `search_result`: Typed search hits decoded from the store response
//! - `search`: The search engine and its state machine
//! - `app_model`: Main application model with state management methods

mod app_model;
mod search;
mod search_result;
mod types;

// Re-export all public types for convenient access
pub use types::{ActiveSection, Category, UiState};

pub use search_result::SearchResult;

pub use search::{Search, SearchError, SearchState};

pub use app_model::AppModel;
