//! Data model for the collection API and the filter state
//!
//! Wire types mirror the collection endpoint's camelCase JSON. `FilterSet`
//! carries the user's search input and provides the normalized form that
//! drives change detection and cache keying.

use serde::{Deserialize, Serialize};

/// The facet dimensions a filter can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Query,
    Material,
    Technique,
    ObjectType,
}

/// Free-text query plus optional facet filters.
///
/// Equality on the *normalized* form decides whether a new search is needed;
/// the raw form keeps whatever the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub technique: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
}

impl FilterSet {
    /// Canonical form: query trimmed, empty or whitespace-only values folded
    /// to unset.
    pub fn normalized(&self) -> FilterSet {
        FilterSet {
            query: self.query.trim().to_owned(),
            material: normalize_value(self.material.as_deref()),
            technique: normalize_value(self.technique.as_deref()),
            object_type: normalize_value(self.object_type.as_deref()),
        }
    }

    /// True when nothing is set after normalization. An empty filter set is
    /// the "nothing to search for" state, not "search for everything".
    pub fn is_empty(&self) -> bool {
        let n = self.normalized();
        n.query.is_empty() && n.material.is_none() && n.technique.is_none() && n.object_type.is_none()
    }

    /// Stable cache key over the normalized fields.
    pub fn cache_key(&self) -> String {
        let n = self.normalized();
        format!(
            "q={}|material={}|technique={}|type={}",
            n.query,
            n.material.as_deref().unwrap_or(""),
            n.technique.as_deref().unwrap_or(""),
            n.object_type.as_deref().unwrap_or(""),
        )
    }
}

fn normalize_value(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Image descriptor attached to an artwork summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebImage {
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub offset_percentage_x: i64,
    #[serde(default)]
    pub offset_percentage_y: i64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub url: String,
}

/// Artwork summary as returned inside a search result page.
///
/// `object_number` is the stable external key; the numeric-looking `id` is
/// not guaranteed stable across endpoints and is never used for lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    #[serde(default)]
    pub id: String,
    pub object_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub long_title: String,
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub show_image: bool,
    #[serde(default)]
    pub web_image: Option<WebImage>,
}

impl Artwork {
    /// An artwork is displayable only with a usable, shareable image.
    pub fn is_displayable(&self) -> bool {
        self.has_image
            && self.show_image
            && self.web_image.as_ref().is_some_and(|image| !image.url.is_empty())
    }
}

/// Full artwork record fetched individually by object number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkDetails {
    #[serde(default)]
    pub id: String,
    pub object_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub long_title: String,
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub show_image: bool,
    #[serde(default)]
    pub web_image: Option<WebImage>,
    #[serde(default)]
    pub principal_maker: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub techniques: Vec<String>,
}

/// One `{key, count}` pair inside a server-reported facet dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub key: String,
    #[serde(default)]
    pub count: u64,
}

/// A server-reported facet dimension alongside search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFacet {
    pub name: String,
    #[serde(default)]
    pub facets: Vec<FacetCount>,
}

/// Body of the collection search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub art_objects: Vec<Artwork>,
    #[serde(default)]
    pub facets: Vec<ResponseFacet>,
}

/// Body of the single-artwork endpoint; the record sits under `artObject`.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsResponse {
    #[serde(rename = "artObject")]
    pub art_object: ArtworkDetails,
}

/// An ordered page of displayable artworks, as stored in the result cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub artworks: Vec<Artwork>,
    /// True when the raw page held strictly fewer items than requested.
    pub end_of_results: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_folds_blank_values_to_unset() {
        let filters = FilterSet {
            query: "  Rembrandt  ".to_string(),
            material: Some("   ".to_string()),
            technique: Some("".to_string()),
            object_type: Some(" painting ".to_string()),
        };
        let normalized = filters.normalized();
        assert_eq!(normalized.query, "Rembrandt");
        assert_eq!(normalized.material, None);
        assert_eq!(normalized.technique, None);
        assert_eq!(normalized.object_type, Some("painting".to_string()));
    }

    #[test]
    fn blank_and_unset_filters_share_a_cache_key() {
        let explicit_blanks = FilterSet {
            query: "  vermeer ".to_string(),
            material: Some("".to_string()),
            technique: Some("  ".to_string()),
            object_type: None,
        };
        let unset = FilterSet {
            query: "vermeer".to_string(),
            ..FilterSet::default()
        };
        assert_eq!(explicit_blanks.cache_key(), unset.cache_key());
        assert_eq!(explicit_blanks.normalized(), unset.normalized());
    }

    #[test]
    fn empty_filter_set_detection() {
        assert!(FilterSet::default().is_empty());
        assert!(
            FilterSet {
                query: "   ".to_string(),
                material: Some(" ".to_string()),
                ..FilterSet::default()
            }
            .is_empty()
        );
        assert!(
            !FilterSet {
                material: Some("paper".to_string()),
                ..FilterSet::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn displayability_requires_image_flags_and_url() {
        let mut artwork = Artwork {
            object_number: "SK-C-5".to_string(),
            has_image: true,
            show_image: true,
            web_image: Some(WebImage {
                url: "https://example.org/nightwatch.jpg".to_string(),
                ..WebImage::default()
            }),
            ..Artwork::default()
        };
        assert!(artwork.is_displayable());

        artwork.has_image = false;
        assert!(!artwork.is_displayable());

        artwork.has_image = true;
        artwork.show_image = false;
        assert!(!artwork.is_displayable());

        artwork.show_image = true;
        artwork.web_image = Some(WebImage::default());
        assert!(!artwork.is_displayable());

        artwork.web_image = None;
        assert!(!artwork.is_displayable());
    }

    #[test]
    fn search_response_parses_camel_case_payload() {
        let payload = r#"{
            "count": 2,
            "artObjects": [{
                "id": "en-SK-C-5",
                "objectNumber": "SK-C-5",
                "title": "The Night Watch",
                "longTitle": "The Night Watch, Rembrandt van Rijn, 1642",
                "hasImage": true,
                "showImage": true,
                "webImage": {"url": "https://example.org/i.jpg", "width": 2500, "height": 2034}
            }],
            "facets": [{"name": "material", "facets": [{"key": "canvas", "count": 12}]}]
        }"#;
        let response: SearchResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.art_objects.len(), 1);
        assert_eq!(response.art_objects[0].object_number, "SK-C-5");
        assert!(response.art_objects[0].is_displayable());
        assert_eq!(response.facets[0].facets[0].key, "canvas");
    }

    #[test]
    fn details_response_unwraps_art_object() {
        let payload = r#"{
            "artObject": {
                "objectNumber": "SK-A-3262",
                "title": "Self-portrait",
                "principalMaker": "Vincent van Gogh",
                "materials": ["canvas", "oil paint"],
                "techniques": ["painting"]
            }
        }"#;
        let response: DetailsResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.art_object.object_number, "SK-A-3262");
        assert_eq!(response.art_object.principal_maker, "Vincent van Gogh");
        assert_eq!(response.art_object.materials.len(), 2);
    }
}
