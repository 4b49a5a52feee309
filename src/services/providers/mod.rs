pub mod spotify;

pub use spotify::SpotifyProvider;

use crate::{error::AppResult, models::TrackCandidate};

/// Trait for music catalog lookup providers
///
/// Resolves user search terms into concrete tracks with the metadata the
/// recommendation pipeline needs, and supplies artist genre tags. This is the
/// only component that performs network I/O.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrackLookup: Send + Sync {
    /// Search for tracks by title and artist
    ///
    /// Returns at most `limit` candidates in provider relevance order.
    async fn search_tracks(
        &self,
        title: &str,
        artist: &str,
        limit: usize,
    ) -> AppResult<Vec<TrackCandidate>>;

    /// Fetch the free-text genre strings attached to an artist
    async fn artist_genres(&self, artist_id: &str) -> AppResult<Vec<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
