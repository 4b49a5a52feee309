use serde::{Deserialize, Serialize};

/// Metadata for a single track as resolved by the lookup provider.
///
/// The numeric fields are optional so that an incomplete lookup result can be
/// reported back as a missing field instead of being silently defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    /// Provider id of the first listed artist, used for the genre lookup
    #[serde(default)]
    pub artist_id: Option<String>,
    /// ISO date string ("1999-01-01", "1999-01" or "1999")
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub explicit: Option<bool>,
}

/// A track returned by a search, selectable as the seed song
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackCandidate {
    pub track_id: String,
    pub title: String,
    pub artist: String,
    pub image_url: Option<String>,
    pub external_url: Option<String>,
    pub metadata: TrackMetadata,
}
