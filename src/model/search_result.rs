//! Typed model of a single store search hit, decoded from the remote response.

use std::cmp::Ordering;

use serde::Deserialize;

/// One search hit as the store returns it. Which fields are present depends on
/// the media type (tracks carry `track_*`, albums and audiobooks `collection_*`,
/// apps and e-books only the bare `price`), so everything optional stays an
/// `Option` and the display accessors resolve the fallback chains.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub artist_name: Option<String>,
    pub track_name: Option<String>,
    pub kind: Option<String>,
    #[serde(rename = "artworkUrl60")]
    pub image_small: String,
    #[serde(rename = "artworkUrl100")]
    pub image_large: String,
    pub track_price: Option<f64>,
    pub currency: String,
    pub track_view_url: Option<String>,
    pub collection_name: Option<String>,
    pub collection_view_url: Option<String>,
    pub collection_price: Option<f64>,
    #[serde(rename = "price")]
    pub item_price: Option<f64>,
    #[serde(rename = "primaryGenreName")]
    pub item_genre: Option<String>,
    #[serde(rename = "genres")]
    pub book_genre: Option<Vec<String>>,
}

impl SearchResult {
    /// Track name, falling back to the collection name. Empty only for
    /// records that carry neither (still not an error).
    pub fn name(&self) -> &str {
        self.track_name
            .as_deref()
            .or(self.collection_name.as_deref())
            .unwrap_or("")
    }

    pub fn artist(&self) -> &str {
        self.artist_name.as_deref().unwrap_or("")
    }

    pub fn store_url(&self) -> &str {
        self.track_view_url
            .as_deref()
            .or(self.collection_view_url.as_deref())
            .unwrap_or("")
    }

    /// First non-null of track, collection and item price.
    pub fn price(&self) -> f64 {
        self.track_price
            .or(self.collection_price)
            .or(self.item_price)
            .unwrap_or(0.0)
    }

    pub fn genre(&self) -> String {
        if let Some(genre) = &self.item_genre {
            genre.clone()
        } else if let Some(genres) = &self.book_genre {
            genres.join(", ")
        } else {
            String::new()
        }
    }

    /// Largest artwork URL available, or empty when the record has none.
    pub fn artwork_url(&self) -> &str {
        if self.image_large.is_empty() {
            &self.image_small
        } else {
            &self.image_large
        }
    }

    /// Human-readable media type. A record without `kind` is an audiobook;
    /// that is how the store reports them.
    pub fn display_type(&self) -> &'static str {
        match self.kind.as_deref().unwrap_or("audiobook") {
            "album" => "Album",
            "audiobook" => "Audio Book",
            "book" => "Book",
            "ebook" => "E-Book",
            "feature-movie" => "Movie",
            "music-video" => "Music Video",
            "podcast" => "Podcast",
            "software" => "App",
            "song" => "Song",
            "tv-episode" => "TV Episode",
            _ => "Unknown",
        }
    }

    /// Case-insensitive ordering by display name, used to sort result lists.
    pub fn name_order(a: &Self, b: &Self) -> Ordering {
        a.name().to_lowercase().cmp(&b.name().to_lowercase())
    }
}

/// The top-level shape of the search response. Decode-only; not retained
/// after the results are extracted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ResultEnvelope {
    pub result_count: u32,
    pub results: Vec<SearchResult>,
}

#[cfg(test)]
mod tests {
    use super::SearchResult;

    fn from_json(value: serde_json::Value) -> SearchResult {
        serde_json::from_value(value).expect("record should decode")
    }

    #[test]
    fn name_falls_back_to_collection_name() {
        let result = from_json(serde_json::json!({
            "collectionName": "Kind of Blue",
            "artistName": "Miles Davis"
        }));
        assert_eq!(result.name(), "Kind of Blue");

        let bare = from_json(serde_json::json!({ "artistName": "Miles Davis" }));
        assert_eq!(bare.name(), "");
    }

    #[test]
    fn store_url_prefers_the_track_link() {
        let result = from_json(serde_json::json!({
            "trackViewUrl": "https://example.com/track",
            "collectionViewUrl": "https://example.com/collection"
        }));
        assert_eq!(result.store_url(), "https://example.com/track");

        let collection_only = from_json(serde_json::json!({
            "collectionViewUrl": "https://example.com/collection"
        }));
        assert_eq!(collection_only.store_url(), "https://example.com/collection");
    }

    #[test]
    fn price_takes_the_first_known_value() {
        let result = from_json(serde_json::json!({
            "collectionPrice": 12.99,
            "price": 3.99
        }));
        assert_eq!(result.price(), 12.99);

        let item_only = from_json(serde_json::json!({ "price": 3.99 }));
        assert_eq!(item_only.price(), 3.99);

        assert_eq!(from_json(serde_json::json!({})).price(), 0.0);
    }

    #[test]
    fn genre_joins_the_book_genre_list() {
        let book = from_json(serde_json::json!({
            "genres": ["Sci-Fi", "Classics"]
        }));
        assert_eq!(book.genre(), "Sci-Fi, Classics");

        let track = from_json(serde_json::json!({
            "primaryGenreName": "Jazz",
            "genres": ["ignored"]
        }));
        assert_eq!(track.genre(), "Jazz");
    }

    #[test]
    fn display_type_maps_known_kinds() {
        let song = from_json(serde_json::json!({ "kind": "song" }));
        assert_eq!(song.display_type(), "Song");

        let app = from_json(serde_json::json!({ "kind": "software" }));
        assert_eq!(app.display_type(), "App");

        let mystery = from_json(serde_json::json!({ "kind": "hologram" }));
        assert_eq!(mystery.display_type(), "Unknown");

        // The store leaves `kind` off audiobook records entirely.
        let audiobook = from_json(serde_json::json!({}));
        assert_eq!(audiobook.display_type(), "Audio Book");
    }

    #[test]
    fn artwork_url_falls_back_to_the_small_image() {
        let result = from_json(serde_json::json!({
            "artworkUrl60": "https://example.com/60.jpg"
        }));
        assert_eq!(result.artwork_url(), "https://example.com/60.jpg");

        let both = from_json(serde_json::json!({
            "artworkUrl60": "https://example.com/60.jpg",
            "artworkUrl100": "https://example.com/100.jpg"
        }));
        assert_eq!(both.artwork_url(), "https://example.com/100.jpg");
    }

    #[test]
    fn name_order_is_case_insensitive() {
        let mut results: Vec<SearchResult> = ["Beta", "alpha", "Gamma"]
            .iter()
            .map(|name| from_json(serde_json::json!({ "trackName": name })))
            .collect();
        results.sort_by(SearchResult::name_order);
        let names: Vec<&str> = results.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["alpha", "Beta", "Gamma"]);
    }
}
