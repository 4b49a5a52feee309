use serde::Deserialize;

use super::{TrackCandidate, TrackMetadata};

// ============================================================================
// Spotify Web API Types
// ============================================================================

/// Response from the client-credentials token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyToken {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Response from GET /v1/search?type=track
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifySearchResponse {
    pub tracks: SpotifyPaging<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPaging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtistRef>,
    pub album: SpotifyAlbum,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub explicit: Option<bool>,
    #[serde(default)]
    pub external_urls: SpotifyExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Response from GET /v1/artists/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    #[serde(default)]
    pub genres: Vec<String>,
}

impl From<SpotifyTrack> for TrackCandidate {
    fn from(track: SpotifyTrack) -> Self {
        // Only the first listed artist is used for display and genre lookup
        let (artist, artist_id) = track
            .artists
            .into_iter()
            .next()
            .map(|a| (a.name, a.id))
            .unwrap_or_default();

        let image_url = track.album.images.into_iter().next().map(|i| i.url);

        TrackCandidate {
            track_id: track.id,
            title: track.name.clone(),
            artist: artist.clone(),
            image_url,
            external_url: track.external_urls.spotify,
            metadata: TrackMetadata {
                title: track.name,
                artist,
                artist_id,
                release_date: track.album.release_date,
                popularity: track.popularity,
                duration_ms: track.duration_ms,
                explicit: track.explicit,
            },
        }
    }
}
