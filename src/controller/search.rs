//! Search dispatch and completion handling

use std::sync::Arc;

use super::AppController;

/// Shown for every failure class; the detail stays in the logs.
const NETWORK_ERROR_MESSAGE: &str =
    "There was an error accessing the iTunes Store. Please try again.";

impl AppController {
    pub async fn perform_search(&self) {
        let model = self.model.lock().await;
        let (query, category) = {
            let ui_state = model.ui_state.lock().await;
            (ui_state.search_query.clone(), ui_state.category)
        };
        if query.is_empty() {
            return;
        }
        tracing::debug!(query, category = ?category, "performing search");

        let shared_model = Arc::clone(&self.model);
        model
            .search
            .perform_search(&query, category, move |success| {
                // The callback runs under the engine's state lock; UI
                // mutation is deferred onto its own task.
                tokio::spawn(async move {
                    let model = shared_model.lock().await;
                    if success {
                        model.show_search_results().await;
                    } else {
                        model.set_error(NETWORK_ERROR_MESSAGE.to_string()).await;
                    }
                });
            })
            .await;
    }
}
