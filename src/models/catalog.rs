use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Index of a cluster centre in the loaded model, in `[0, K)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub usize);

impl Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One known song with its training-time cluster assignment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRecord {
    pub title: String,
    pub artist: String,
    pub popularity: u32,
    pub cluster: ClusterId,
}

/// A catalog song returned to the client, optionally enriched with provider links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedTrack {
    #[serde(flatten)]
    pub record: CatalogRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl From<CatalogRecord> for RecommendedTrack {
    fn from(record: CatalogRecord) -> Self {
        Self {
            record,
            image_url: None,
            external_url: None,
        }
    }
}
