//! The search-state controller
//!
//! Owns the orchestration around one [`SearchSession`]: when to issue a new
//! search versus extend the current result set, how results are filtered,
//! deduplicated, and cached, and when state is persisted. The session value
//! itself is owned by the caller and passed into every operation.
//!
//! The `loading` flag is the sole mutual-exclusion mechanism between
//! `search` and `load_more`: it is set before the single suspension point of
//! each operation and cleared on every exit path, including failures. A
//! `load_more` arriving while a fetch is in flight observes a no-op.

use std::collections::HashSet;

use crate::cache::ResultCache;
use crate::catalog::FacetCatalog;
use crate::client::CollectionApi;
use crate::error::Result;
use crate::model::{Artwork, ArtworkDetails, FilterField, FilterSet, ResultPage, SearchResponse};
use crate::persist::SessionStore;
use crate::session::SearchSession;

/// Orchestrates searches over a [`CollectionApi`] implementation, consulting
/// and populating the first-page cache and persisting session state after
/// every completed mutation.
pub struct SearchController<C> {
    client: C,
    cache: ResultCache,
    catalog: FacetCatalog,
    store: SessionStore,
    page_size: u32,
}

impl<C: CollectionApi> SearchController<C> {
    pub fn new(client: C, store: SessionStore, page_size: u32) -> Self {
        Self {
            client,
            cache: ResultCache::default(),
            catalog: FacetCatalog::default(),
            store,
            page_size,
        }
    }

    /// Facet choices, refined with counts from completed fetches.
    pub fn catalog(&self) -> &FacetCatalog {
        &self.catalog
    }

    /// Load the persisted session, or start fresh when none is usable. A
    /// new process has no fetch in flight, so `loading` is always cleared.
    /// Rehydration itself never fetches; callers decide whether a follow-up
    /// [`SearchController::search`] is warranted.
    pub fn rehydrate(&self) -> SearchSession {
        let mut session = self.store.load().unwrap_or_default();
        session.loading = false;
        session
    }

    /// Persist the current session state.
    pub fn persist(&self, session: &SearchSession) -> Result<()> {
        self.store.save(session)
    }

    /// Mutate one filter field. Never triggers a fetch: callers invoke
    /// [`SearchController::search`] explicitly, debounced at the input
    /// boundary.
    pub fn update_filter(
        &self,
        session: &mut SearchSession,
        field: FilterField,
        value: Option<&str>,
    ) {
        match field {
            FilterField::Query => session.filters.query = value.unwrap_or_default().to_string(),
            FilterField::Material => session.filters.material = value.map(str::to_owned),
            FilterField::Technique => session.filters.technique = value.map(str::to_owned),
            FilterField::ObjectType => session.filters.object_type = value.map(str::to_owned),
        }
    }

    /// Run a fresh search for the session's current filters.
    ///
    /// Skips the fetch entirely when the normalized filters match the last
    /// completed search, when the filters are empty (the list is cleared
    /// instead), or when the first page for this filter combination is still
    /// cached. On fetch failure the previously displayed list is left
    /// untouched and the error is returned.
    pub async fn search(&mut self, session: &mut SearchSession) -> Result<()> {
        self.search_inner(session, false).await
    }

    async fn search_inner(&mut self, session: &mut SearchSession, force: bool) -> Result<()> {
        let filters = session.filters.normalized();

        if !force && session.last_searched.as_ref() == Some(&filters) {
            tracing::debug!("filters unchanged since last search, skipping fetch");
            return Ok(());
        }

        if filters.is_empty() {
            // Nothing to search for: clear rather than fetch everything.
            session.clear_results();
            session.last_searched = Some(filters);
            self.store.save(session)?;
            return Ok(());
        }

        let key = filters.cache_key();
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("first page served from cache for {key:?}");
            session.artworks = cached.artworks.clone();
            session.page = 1;
            session.end_of_results = cached.end_of_results;
            session.last_searched = Some(filters);
            self.store.save(session)?;
            return Ok(());
        }

        session.loading = true;
        let outcome = self.client.search(&filters, 1, self.page_size).await;
        session.loading = false;

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("search fetch failed, keeping previous results: {err}");
                return Err(err);
            }
        };

        self.catalog.refine(&response.facets);
        let page = self.displayable_page(response);

        session.artworks = page.artworks.clone();
        session.page = 1;
        session.end_of_results = page.end_of_results;
        session.last_searched = Some(filters);
        self.cache.put(key, page);
        self.store.save(session)?;
        Ok(())
    }

    /// Fetch the next page for the current filters and append it.
    ///
    /// No-op while a fetch is in flight or once the end of results was
    /// reached; returns whether a page was actually loaded. Appended
    /// artworks are deduplicated against the object numbers already in the
    /// session. On failure the page counter is unchanged, so a retry asks
    /// for the same page again.
    pub async fn load_more(&mut self, session: &mut SearchSession) -> Result<bool> {
        if session.loading {
            tracing::debug!("load_more ignored: a fetch is already in flight");
            return Ok(false);
        }
        if session.end_of_results {
            tracing::debug!("load_more ignored: end of results reached");
            return Ok(false);
        }

        let filters = session.filters.normalized();
        if filters.is_empty() {
            // The empty "nothing to search for" state has no further pages.
            return Ok(false);
        }

        let next_page = session.page + 1;
        session.loading = true;
        let outcome = self.client.search(&filters, next_page, self.page_size).await;
        session.loading = false;

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("load_more fetch failed, keeping page {}: {err}", session.page);
                return Err(err);
            }
        };

        self.catalog.refine(&response.facets);

        session.page = next_page;
        session.end_of_results = (response.art_objects.len() as u32) < self.page_size;

        let mut seen: HashSet<String> = session
            .artworks
            .iter()
            .map(|artwork| artwork.object_number.clone())
            .collect();
        for artwork in response.art_objects.into_iter().filter(Artwork::is_displayable) {
            if seen.insert(artwork.object_number.clone()) {
                session.artworks.push(artwork);
            }
        }

        self.store.save(session)?;
        Ok(true)
    }

    /// Return the session to its initial empty state, persist it, and re-run
    /// the search unconditionally. With the now-empty filters that search
    /// fetches nothing and leaves the list empty.
    pub async fn reset_filters(&mut self, session: &mut SearchSession) -> Result<()> {
        session.filters = FilterSet::default();
        session.artworks.clear();
        session.scroll_positions.clear();
        session.page = 1;
        session.end_of_results = false;
        session.loading = false;
        session.last_searched = None;
        self.store.save(session)?;
        self.search_inner(session, true).await
    }

    /// Remember a scroll offset under a navigation key.
    pub fn store_scroll_position(
        &self,
        session: &mut SearchSession,
        key: impl Into<String>,
        offset: f64,
    ) {
        session.scroll_positions.insert(key.into(), offset);
    }

    /// Saved scroll offset for a navigation key, or 0 when none was stored.
    pub fn retrieve_scroll_position(&self, session: &SearchSession, key: &str) -> f64 {
        session.scroll_positions.get(key).copied().unwrap_or(0.0)
    }

    /// Fetch the full record for a single artwork. Pass-through to the
    /// client; no session state is touched.
    pub async fn fetch_details(&self, object_number: &str) -> Result<ArtworkDetails> {
        self.client.fetch_details(object_number).await
    }

    /// Keep only displayable artworks; end-of-results is judged on the raw
    /// page length, since "fewer than requested" is about what the server
    /// returned, not what survived the image filter.
    fn displayable_page(&self, response: SearchResponse) -> ResultPage {
        let raw_len = response.art_objects.len();
        let artworks: Vec<Artwork> = response
            .art_objects
            .into_iter()
            .filter(Artwork::is_displayable)
            .collect();
        if artworks.len() < raw_len {
            tracing::debug!(
                dropped = raw_len - artworks.len(),
                "filtered artworks without a usable image"
            );
        }
        ResultPage {
            artworks,
            end_of_results: (raw_len as u32) < self.page_size,
        }
    }
}
