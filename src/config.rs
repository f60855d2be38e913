//! Configuration for the collection API boundary.

/// Default base URL of the Rijksmuseum API.
pub const DEFAULT_BASE_URL: &str = "https://www.rijksmuseum.nl/api";

/// Default response culture segment of the collection path.
pub const DEFAULT_CULTURE: &str = "en";

/// Default number of artworks requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Connection settings for the collection endpoint. The API key and format
/// selector live here so the controller never sees them.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub culture: String,
}

impl ApiConfig {
    /// Config pointing at the public API with default base URL and culture.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            culture: DEFAULT_CULTURE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = culture.into();
        self
    }
}
