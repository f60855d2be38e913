//! Facet catalog
//!
//! Static reference lists of the facet values offered as filter choices,
//! optionally refined with the per-value counts the collection endpoint
//! reports alongside search results.

use serde::Serialize;

use crate::model::{FacetCount, ResponseFacet};

/// Facet dimension names as they appear in search responses.
pub const FACET_MATERIAL: &str = "material";
pub const FACET_TECHNIQUE: &str = "technique";
pub const FACET_TYPE: &str = "type";

pub const MATERIALS: &[&str] = &[
    "canvas",
    "paper",
    "panel",
    "copper",
    "parchment",
    "oil paint",
    "watercolour",
    "chalk",
    "ink",
    "porcelain",
];

pub const TECHNIQUES: &[&str] = &[
    "painting",
    "drawing",
    "etching",
    "engraving",
    "printing",
    "albumen print",
    "pen",
    "brush",
    "woodcut",
    "photolithography",
];

pub const OBJECT_TYPES: &[&str] = &[
    "painting",
    "print",
    "drawing",
    "photograph",
    "sculpture",
    "miniature",
    "vase",
    "tapestry",
    "furniture",
    "jewellery",
];

/// One selectable facet value, with the result count of the latest search
/// when the server reported one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetChoice {
    pub key: String,
    pub count: Option<u64>,
}

impl FacetChoice {
    fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            count: None,
        }
    }
}

/// The filter choices offered for each facet dimension.
#[derive(Debug, Clone)]
pub struct FacetCatalog {
    pub materials: Vec<FacetChoice>,
    pub techniques: Vec<FacetChoice>,
    pub object_types: Vec<FacetChoice>,
}

impl Default for FacetCatalog {
    fn default() -> Self {
        Self {
            materials: MATERIALS.iter().map(|k| FacetChoice::plain(k)).collect(),
            techniques: TECHNIQUES.iter().map(|k| FacetChoice::plain(k)).collect(),
            object_types: OBJECT_TYPES.iter().map(|k| FacetChoice::plain(k)).collect(),
        }
    }
}

impl FacetCatalog {
    /// Merge server-reported counts into the catalog. Known values pick up
    /// their count; values the static lists do not know are appended so the
    /// catalog reflects what the collection actually holds.
    pub fn refine(&mut self, facets: &[ResponseFacet]) {
        for facet in facets {
            match facet.name.as_str() {
                FACET_MATERIAL => merge_counts(&mut self.materials, &facet.facets),
                FACET_TECHNIQUE => merge_counts(&mut self.techniques, &facet.facets),
                FACET_TYPE => merge_counts(&mut self.object_types, &facet.facets),
                other => tracing::debug!("ignoring unknown facet dimension {other:?}"),
            }
        }
    }
}

fn merge_counts(choices: &mut Vec<FacetChoice>, counts: &[FacetCount]) {
    for reported in counts {
        match choices.iter_mut().find(|choice| choice.key == reported.key) {
            Some(choice) => choice.count = Some(reported.count),
            None => choices.push(FacetChoice {
                key: reported.key.clone(),
                count: Some(reported.count),
            }),
        }
    }
}
