//! Store search engine: query building, the single in-flight request, and
//! the search state machine consumed by the UI.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use url::Url;

use super::search_result::{ResultEnvelope, SearchResult};
use super::types::Category;

const SEARCH_ENDPOINT: &str = "https://itunes.apple.com/search";
const RESULT_LIMIT: u32 = 200;

/// Where a search currently stands. The result list exists only in the
/// `Results` case, and only there.
#[derive(Clone, Debug, Default)]
pub enum SearchState {
    /// Initial state; also the reset state after a failed request.
    #[default]
    NotSearchedYet,
    Loading,
    NoResults,
    Results(Vec<SearchResult>),
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Owns the search state and the one in-flight request. Starting a new
/// search aborts the previous request before anything else happens, so a
/// stale response can never overwrite state set by a newer search.
pub struct Search {
    http: reqwest::Client,
    endpoint: Url,
    lang: String,
    country: String,
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    state: SearchState,
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl Search {
    pub fn new() -> Self {
        Self::with_endpoint(Url::parse(SEARCH_ENDPOINT).expect("search endpoint is a valid URL"))
    }

    /// Engine pointed at a non-default endpoint. Tests use this to talk to
    /// a local stub server.
    pub fn with_endpoint(endpoint: Url) -> Self {
        let (lang, country) = locale_from(std::env::var("LANG").ok());
        Self {
            http: reqwest::Client::new(),
            endpoint,
            lang,
            country,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Snapshot of the current search state.
    pub async fn state(&self) -> SearchState {
        self.inner.lock().await.state.clone()
    }

    /// Start a search, replacing any search still in flight. Returns as soon
    /// as the request is issued; `on_complete` fires later with the outcome.
    ///
    /// An empty `text` is a no-op: no state change, no request, no callback.
    /// A superseded search never invokes its callback.
    pub async fn perform_search<F>(&self, text: &str, category: Category, on_complete: F)
    where
        F: FnOnce(bool) + Send + 'static,
    {
        if text.is_empty() {
            return;
        }

        let mut inner = self.inner.lock().await;
        if let Some(previous) = inner.in_flight.take() {
            previous.abort();
        }
        inner.generation += 1;
        let generation = inner.generation;
        inner.state = SearchState::Loading;

        let url = self.request_url(text, category);
        tracing::debug!(%url, "starting search request");

        let http = self.http.clone();
        let shared = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let outcome = fetch(&http, url).await;

            let mut inner = shared.lock().await;
            if inner.generation != generation {
                // A newer search took over after this transport already
                // finished; the result must not reach the state.
                return;
            }
            inner.in_flight = None;

            let success = match outcome {
                Ok(results) if results.is_empty() => {
                    inner.state = SearchState::NoResults;
                    true
                }
                Ok(mut results) => {
                    results.sort_by(SearchResult::name_order);
                    tracing::info!(count = results.len(), "search completed");
                    inner.state = SearchState::Results(results);
                    true
                }
                Err(error) => {
                    tracing::error!(error = %error, "search failed");
                    inner.state = SearchState::NotSearchedYet;
                    false
                }
            };

            // Delivered under the state lock: the callback observes exactly
            // the state this completion set.
            on_complete(success);
        });
        inner.in_flight = Some(task.abort_handle());
    }

    fn request_url(&self, term: &str, category: Category) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("term", term);
            query.append_pair("limit", &RESULT_LIMIT.to_string());
            let entity = category.entity();
            if !entity.is_empty() {
                query.append_pair("entity", entity);
            }
            query.append_pair("lang", &self.lang);
            query.append_pair("country", &self.country);
        }
        url
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch(http: &reqwest::Client, url: Url) -> Result<Vec<SearchResult>, SearchError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(SearchError::HttpStatus(status));
    }
    let body = response.bytes().await?;
    parse(&body)
}

/// Decode a search response body. Missing per-record fields are fine; a
/// payload that is not the expected top-level shape is not.
pub fn parse(raw: &[u8]) -> Result<Vec<SearchResult>, SearchError> {
    let envelope: ResultEnvelope = serde_json::from_slice(raw)?;
    tracing::debug!(count = envelope.result_count, "decoded search response");
    Ok(envelope.results)
}

/// Derive the store `lang`/`country` query values from a POSIX locale
/// identifier such as `en_US.UTF-8`.
fn locale_from(lang_var: Option<String>) -> (String, String) {
    let identifier = lang_var
        .as_deref()
        .and_then(|value| value.split('.').next())
        .filter(|value| !value.is_empty() && *value != "C" && *value != "POSIX")
        .unwrap_or("en_US")
        .to_string();
    let country = identifier
        .rsplit('_')
        .next()
        .filter(|code| code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase()))
        .unwrap_or("US")
        .to_string();
    (identifier, country)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use url::Url;

    use super::{locale_from, parse, Search, SearchError, SearchState};
    use crate::model::types::Category;

    /// Minimal HTTP server answering each connection from `respond`, which
    /// maps the request target to (status, body, delay before replying).
    async fn stub_server<F>(respond: F) -> Url
    where
        F: Fn(&str) -> (u16, String, Duration) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let address = listener.local_addr().expect("stub server address");
        let respond = Arc::new(respond);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let respond = Arc::clone(&respond);
                tokio::spawn(async move {
                    let mut buffer = vec![0u8; 4096];
                    let Ok(read) = socket.read(&mut buffer).await else {
                        return;
                    };
                    let request = String::from_utf8_lossy(&buffer[..read]).into_owned();
                    let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                    let (status, body, delay) = (*respond)(&target);
                    tokio::time::sleep(delay).await;
                    let response = format!(
                        "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
        Url::parse(&format!("http://{address}/search")).expect("stub server url")
    }

    fn results_body(names: &[&str]) -> String {
        let results: Vec<serde_json::Value> = names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "trackName": name,
                    "artistName": "Artist",
                    "kind": "song"
                })
            })
            .collect();
        serde_json::json!({ "resultCount": results.len(), "results": results }).to_string()
    }

    fn completion_channel() -> (
        impl FnOnce(bool) + Send + 'static,
        mpsc::UnboundedReceiver<bool>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            move |success| {
                let _ = tx.send(success);
            },
            rx,
        )
    }

    async fn expect_completion(rx: &mut mpsc::UnboundedReceiver<bool>) -> bool {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("search should complete")
            .expect("completion callback should fire")
    }

    #[test]
    fn request_url_round_trips_the_search_text() {
        let search = Search::new();
        let term = "AC/DC & friends #1 кошки";
        let url = search.request_url(term, Category::All);

        assert_eq!(url.scheme(), "https");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("term".to_string(), term.to_string())));
        assert!(pairs.contains(&("limit".to_string(), "200".to_string())));
    }

    #[test]
    fn entity_parameter_follows_the_category() {
        let search = Search::new();

        let url = search.request_url("moby dick", Category::Ebooks);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("entity".to_string(), "ebook".to_string())));

        let unfiltered = search.request_url("moby dick", Category::All);
        assert!(unfiltered.query_pairs().all(|(k, _)| k != "entity"));
    }

    #[test]
    fn locale_parsing_handles_odd_values() {
        assert_eq!(
            locale_from(Some("de_DE.UTF-8".to_string())),
            ("de_DE".to_string(), "DE".to_string())
        );
        assert_eq!(
            locale_from(Some("C".to_string())),
            ("en_US".to_string(), "US".to_string())
        );
        assert_eq!(locale_from(None), ("en_US".to_string(), "US".to_string()));
    }

    #[test]
    fn parse_accepts_an_empty_result_set() {
        let results = parse(br#"{"resultCount":0,"results":[]}"#).expect("valid payload");
        assert!(results.is_empty());
    }

    #[test]
    fn parse_tolerates_missing_record_fields() {
        let results = parse(
            br#"{"resultCount":1,"results":[{"collectionName":"Greatest Hits"}]}"#,
        )
        .expect("valid payload");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "Greatest Hits");
    }

    #[test]
    fn parse_rejects_a_malformed_payload() {
        assert!(matches!(parse(b"not json"), Err(SearchError::Decode(_))));
    }

    #[tokio::test]
    async fn empty_text_is_a_no_op() {
        let search = Search::new();
        let (on_complete, mut rx) = completion_channel();
        search.perform_search("", Category::All, on_complete).await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(matches!(search.state().await, SearchState::NotSearchedYet));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn successful_search_sorts_and_stores_results() {
        let endpoint =
            stub_server(|_| (200, results_body(&["Beta", "alpha", "Gamma"]), Duration::ZERO))
                .await;
        let search = Search::with_endpoint(endpoint);

        let (on_complete, mut rx) = completion_channel();
        search
            .perform_search("metallica", Category::Music, on_complete)
            .await;
        assert!(matches!(search.state().await, SearchState::Loading));

        assert!(expect_completion(&mut rx).await);
        match search.state().await {
            SearchState::Results(results) => {
                let names: Vec<&str> = results.iter().map(|r| r.name()).collect();
                assert_eq!(names, ["alpha", "Beta", "Gamma"]);
            }
            state => panic!("expected results, got {state:?}"),
        }
    }

    #[tokio::test]
    async fn zero_results_end_in_no_results() {
        let endpoint = stub_server(|_| (200, results_body(&[]), Duration::ZERO)).await;
        let search = Search::with_endpoint(endpoint);

        let (on_complete, mut rx) = completion_channel();
        search
            .perform_search("nonexistent", Category::All, on_complete)
            .await;

        assert!(expect_completion(&mut rx).await);
        assert!(matches!(search.state().await, SearchState::NoResults));
    }

    #[tokio::test]
    async fn server_error_resets_the_state() {
        let endpoint = stub_server(|_| (500, String::new(), Duration::ZERO)).await;
        let search = Search::with_endpoint(endpoint);

        let (on_complete, mut rx) = completion_channel();
        search.perform_search("anything", Category::All, on_complete).await;

        assert!(!expect_completion(&mut rx).await);
        assert!(matches!(search.state().await, SearchState::NotSearchedYet));
    }

    #[tokio::test]
    async fn malformed_body_resets_the_state() {
        let endpoint = stub_server(|_| (200, "not json".to_string(), Duration::ZERO)).await;
        let search = Search::with_endpoint(endpoint);

        let (on_complete, mut rx) = completion_channel();
        search.perform_search("anything", Category::All, on_complete).await;

        assert!(!expect_completion(&mut rx).await);
        assert!(matches!(search.state().await, SearchState::NotSearchedYet));
    }

    #[tokio::test]
    async fn newer_search_supersedes_the_older_one() {
        let endpoint = stub_server(|target: &str| {
            if target.contains("term=first") {
                (200, results_body(&["stale"]), Duration::from_millis(500))
            } else {
                (200, results_body(&["fresh"]), Duration::ZERO)
            }
        })
        .await;
        let search = Search::with_endpoint(endpoint);

        let (on_complete_a, mut rx_a) = completion_channel();
        search.perform_search("first", Category::All, on_complete_a).await;

        let (on_complete_b, mut rx_b) = completion_channel();
        search.perform_search("second", Category::All, on_complete_b).await;

        assert!(expect_completion(&mut rx_b).await);

        // Give the first request's delayed response every chance to land.
        tokio::time::sleep(Duration::from_millis(700)).await;
        match search.state().await {
            SearchState::Results(results) => assert_eq!(results[0].name(), "fresh"),
            state => panic!("expected the newer search's results, got {state:?}"),
        }
        assert!(rx_a.try_recv().is_err(), "superseded search must not call back");
    }
}
