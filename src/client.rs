//! Thin client for the remote collection endpoint
//!
//! Maps requests and responses one to one; injects the API key and format
//! selector; no retries, no rate-limit handling, no caching. Any transport
//! failure or non-2xx status surfaces as [`Error::RemoteFetch`].

use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::model::{ArtworkDetails, DetailsResponse, FilterSet, SearchResponse};

/// The network boundary the search controller talks through. Implemented by
/// [`CollectionClient`] for the real API and by scripted fakes in tests.
#[async_trait]
pub trait CollectionApi {
    /// Fetch one result page. `page` is 1-based; `page_size` must be > 0.
    async fn search(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse>;

    /// Fetch a single artwork by its stable object number.
    async fn fetch_details(&self, object_number: &str) -> Result<ArtworkDetails>;
}

/// HTTP client for the collection API.
#[derive(Debug, Clone)]
pub struct CollectionClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl CollectionClient {
    pub fn new(config: ApiConfig) -> Self {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        tracing::debug!("creating HTTP client with User-Agent: {user_agent}");

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .expect("failed to create HTTP client"); // builder cannot fail with this configuration

        Self { http, config }
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/{}/collection",
            self.config.base_url.trim_end_matches('/'),
            self.config.culture
        )
    }

    /// Query parameters for a search request. Unset facet values and empty
    /// queries are omitted rather than sent as empty strings.
    fn search_params(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: u32,
    ) -> Vec<(&'static str, String)> {
        let filters = filters.normalized();
        let mut params = vec![
            ("key", self.config.api_key.clone()),
            ("format", "json".to_string()),
            ("imgonly", "true".to_string()),
            ("p", page.to_string()),
            ("ps", page_size.to_string()),
        ];
        if !filters.query.is_empty() {
            params.push(("q", filters.query));
        }
        if let Some(material) = filters.material {
            params.push(("material", material));
        }
        if let Some(technique) = filters.technique {
            params.push(("technique", technique));
        }
        if let Some(object_type) = filters.object_type {
            params.push(("type", object_type));
        }
        params
    }
}

#[async_trait]
impl CollectionApi for CollectionClient {
    async fn search(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse> {
        debug_assert!(page >= 1, "page numbers are 1-based");
        debug_assert!(page_size >= 1, "page size must be positive");

        tracing::debug!("searching collection, page {page} (ps {page_size})");

        let response = self
            .http
            .get(self.collection_url())
            .query(&self.search_params(filters, page, page_size))
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        tracing::debug!(
            count = body.count,
            returned = body.art_objects.len(),
            "collection search completed"
        );
        Ok(body)
    }

    async fn fetch_details(&self, object_number: &str) -> Result<ArtworkDetails> {
        if object_number.trim().is_empty() {
            return Err(Error::InvalidObjectNumber);
        }

        tracing::debug!("fetching artwork details for {object_number}");

        let url = format!("{}/{}", self.collection_url(), object_number);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: DetailsResponse = response.json().await?;
        Ok(body.art_object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CollectionClient {
        CollectionClient::new(ApiConfig::new("test-key"))
    }

    #[test]
    fn collection_url_joins_base_and_culture() {
        let client = CollectionClient::new(
            ApiConfig::new("k").with_base_url("https://api.example.org/"),
        );
        assert_eq!(
            client.collection_url(),
            "https://api.example.org/en/collection"
        );
    }

    #[test]
    fn search_params_always_carry_key_format_and_paging() {
        let params = client().search_params(&FilterSet::default(), 3, 25);
        assert!(params.contains(&("key", "test-key".to_string())));
        assert!(params.contains(&("format", "json".to_string())));
        assert!(params.contains(&("imgonly", "true".to_string())));
        assert!(params.contains(&("p", "3".to_string())));
        assert!(params.contains(&("ps", "25".to_string())));
    }

    #[test]
    fn search_params_omit_unset_filters() {
        let filters = FilterSet {
            query: "  ".to_string(),
            material: Some("".to_string()),
            technique: None,
            object_type: Some("print".to_string()),
        };
        let params = client().search_params(&filters, 1, 10);
        assert!(!params.iter().any(|(name, _)| *name == "q"));
        assert!(!params.iter().any(|(name, _)| *name == "material"));
        assert!(!params.iter().any(|(name, _)| *name == "technique"));
        assert!(params.contains(&("type", "print".to_string())));
    }

    #[tokio::test]
    async fn fetch_details_rejects_empty_object_number() {
        let err = client().fetch_details("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidObjectNumber));
    }
}
