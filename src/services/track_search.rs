use crate::{
    error::{AppError, AppResult},
    models::TrackCandidate,
    services::providers::TrackLookup,
};

/// Number of candidates offered for the user to choose a seed song from
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// Service function for track search
///
/// Validates the user's terms and delegates to the configured lookup provider.
pub async fn search_tracks(
    provider: &dyn TrackLookup,
    title: &str,
    artist: &str,
) -> AppResult<Vec<TrackCandidate>> {
    if title.trim().is_empty() || artist.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "both song title and artist name are required".to_string(),
        ));
    }

    provider
        .search_tracks(title, artist, SEARCH_RESULT_LIMIT)
        .await
}
