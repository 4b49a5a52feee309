use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod catalog;
mod features;
mod spotify;
mod track;

pub use catalog::{CatalogRecord, ClusterId, RecommendedTrack};
pub use features::{
    FeatureVector, Genre, GenreFlags, ScaledVector, FEATURE_COLUMNS, FEATURE_COUNT,
};
pub use spotify::{
    SpotifyAlbum, SpotifyArtist, SpotifyArtistRef, SpotifyExternalUrls, SpotifyImage,
    SpotifyPaging, SpotifySearchResponse, SpotifyToken, SpotifyTrack,
};
pub use track::{TrackCandidate, TrackMetadata};

/// Request to recommend songs for already-resolved track metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub metadata: TrackMetadata,
    /// Free-text genre strings of the track's artist
    #[serde(default)]
    pub genres: Vec<String>,
    /// Title to leave out of the results; defaults to the seed track's title
    #[serde(default)]
    pub exclude_title: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Songs from the seed track's cluster, most popular first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub cluster: ClusterId,
    pub recommendations: Vec<RecommendedTrack>,
}

/// Description of the loaded scaler, cluster model and catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_name: Option<String>,
    pub cluster_count: usize,
    pub feature_columns: Vec<String>,
    pub catalog_size: usize,
    pub loaded_at: DateTime<Utc>,
}
