use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{ClusterId, RecommendedTrack, TrackCandidate},
    services::{
        pipeline::Recommender, providers::TrackLookup, recommendations, track_search,
    },
};

/// A user's progress from searching to seeing recommendations.
///
/// Each state carries exactly the data that is valid in it; moving between
/// states goes through the transition methods below.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Search,
    Selection {
        candidates: Vec<TrackCandidate>,
    },
    Recommendation {
        candidates: Vec<TrackCandidate>,
        selected: TrackCandidate,
        cluster: ClusterId,
        recommendations: Vec<RecommendedTrack>,
    },
}

impl Session {
    pub fn new() -> Self {
        Self::Search
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Session::Search => "search",
            Session::Selection { .. } => "selection",
            Session::Recommendation { .. } => "recommendation",
        }
    }

    /// Runs a search and moves to `Selection`. Allowed from every state.
    ///
    /// The state is left untouched when the search fails or finds nothing.
    pub async fn search(
        &mut self,
        provider: &dyn TrackLookup,
        title: &str,
        artist: &str,
    ) -> AppResult<()> {
        let candidates = track_search::search_tracks(provider, title, artist).await?;

        if candidates.is_empty() {
            return Err(AppError::NotFound(format!(
                "no songs found for '{}' by '{}'",
                title, artist
            )));
        }

        *self = Session::Selection { candidates };
        Ok(())
    }

    /// Picks a seed song from the current candidates and moves to `Recommendation`
    pub async fn select(
        &mut self,
        index: usize,
        provider: &dyn TrackLookup,
        recommender: &Recommender,
        limit: Option<usize>,
        enrich: bool,
    ) -> AppResult<()> {
        let candidates = match self {
            Session::Search => {
                return Err(AppError::InvalidState(
                    "no search results yet, search for a song first".to_string(),
                ))
            }
            Session::Selection { candidates } | Session::Recommendation { candidates, .. } => {
                candidates
            }
        };

        let selected = candidates.get(index).cloned().ok_or_else(|| {
            AppError::InvalidInput(format!(
                "selection {} is out of range, {} songs available",
                index,
                candidates.len()
            ))
        })?;

        let response =
            recommendations::recommend_for_candidate(provider, recommender, &selected, limit, enrich)
                .await?;

        let candidates = std::mem::take(candidates);
        *self = Session::Recommendation {
            candidates,
            selected,
            cluster: response.cluster,
            recommendations: response.recommendations,
        };

        Ok(())
    }

    /// Returns to the previous step
    pub fn back(&mut self) {
        *self = match std::mem::take(self) {
            Session::Recommendation { candidates, .. } => Session::Selection { candidates },
            Session::Selection { .. } | Session::Search => Session::Search,
        };
    }
}
