use crate::{
    error::AppResult,
    models::{RecommendationResponse, RecommendedTrack, TrackCandidate},
    services::{pipeline::Recommender, providers::TrackLookup},
};

/// Generates recommendations for a track picked from search results
///
/// Looks up the genres of the track's first artist, runs the cluster pipeline
/// with the track's own title excluded, and optionally resolves a cover image
/// and listening link for every recommended song.
pub async fn recommend_for_candidate(
    provider: &dyn TrackLookup,
    recommender: &Recommender,
    candidate: &TrackCandidate,
    limit: Option<usize>,
    enrich: bool,
) -> AppResult<RecommendationResponse> {
    let genres = match candidate.metadata.artist_id.as_deref() {
        Some(artist_id) => provider.artist_genres(artist_id).await?,
        None => {
            tracing::debug!(
                track_id = %candidate.track_id,
                "No artist id for selected track, genre flags left unset"
            );
            Vec::new()
        }
    };

    let recommendation =
        recommender.recommend(&candidate.metadata, genres.as_slice(), &candidate.title, limit)?;

    let mut recommendations: Vec<RecommendedTrack> = recommendation
        .songs
        .into_iter()
        .map(RecommendedTrack::from)
        .collect();

    if enrich {
        enrich_tracks(provider, &mut recommendations).await;
    }

    Ok(RecommendationResponse {
        cluster: recommendation.cluster,
        recommendations,
    })
}

/// Attaches image and link from the provider's best match for each song.
/// Lookup failures leave the fields empty.
pub async fn enrich_tracks(provider: &dyn TrackLookup, tracks: &mut [RecommendedTrack]) {
    for track in tracks.iter_mut() {
        match provider
            .search_tracks(&track.record.title, &track.record.artist, 1)
            .await
        {
            Ok(matches) => {
                if let Some(found) = matches.into_iter().next() {
                    track.image_url = found.image_url;
                    track.external_url = found.external_url;
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    title = %track.record.title,
                    provider = provider.name(),
                    "Failed to enrich recommendation"
                );
            }
        }
    }
}
