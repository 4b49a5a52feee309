#![allow(dead_code)]

use std::sync::Arc;

use cadence_api::{
    error::AppResult,
    models::{CatalogRecord, ClusterId, TrackCandidate, TrackMetadata, FEATURE_COUNT},
    services::{
        pipeline::{Catalog, ClusterModel, Scaler},
        providers::TrackLookup,
        Recommender,
    },
};

pub fn seed_metadata() -> TrackMetadata {
    TrackMetadata {
        title: "X".to_string(),
        artist: "Y".to_string(),
        artist_id: Some("artist-y".to_string()),
        release_date: Some("1999-01-01".to_string()),
        popularity: Some(80),
        duration_ms: Some(200_000),
        explicit: Some(false),
    }
}

pub fn record(title: &str, artist: &str, popularity: u32, cluster: usize) -> CatalogRecord {
    CatalogRecord {
        title: title.to_string(),
        artist: artist.to_string(),
        popularity,
        cluster: ClusterId(cluster),
    }
}

/// Three songs in cluster 2 plus noise around them
pub fn catalog() -> Catalog {
    Catalog::from_records(vec![
        record("Seventy", "B", 70, 2),
        record("Loud", "Z", 99, 0),
        record("X", "Someone Else", 95, 2),
        record("Ninety", "A", 90, 2),
        record("Quiet", "Q", 5, 1),
        record("Sixty", "C", 60, 2),
    ])
}

/// Identity scaler; the third centre sits exactly on the seed's features
/// when tagged with "pop rock"
pub fn recommender() -> Recommender {
    let scaler = Scaler::standard(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap();
    let model = ClusterModel::new(vec![
        vec![2020.0, 10.0, 90_000.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        vec![1960.0, 30.0, 300_000.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
        vec![1999.0, 80.0, 200_000.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ])
    .unwrap();
    Recommender::new(scaler, model, Arc::new(catalog()))
}

/// In-memory lookup provider returning canned results
pub struct StubLookup {
    pub candidates: Vec<TrackCandidate>,
    pub genres: Vec<String>,
}

impl StubLookup {
    pub fn new() -> Self {
        let seed = seed_metadata();
        let other = TrackMetadata {
            title: "Remix".to_string(),
            ..seed_metadata()
        };

        Self {
            candidates: vec![
                TrackCandidate {
                    track_id: "track-x".to_string(),
                    title: seed.title.clone(),
                    artist: seed.artist.clone(),
                    image_url: Some("https://img/x".to_string()),
                    external_url: Some("https://open/x".to_string()),
                    metadata: seed,
                },
                TrackCandidate {
                    track_id: "track-remix".to_string(),
                    title: other.title.clone(),
                    artist: other.artist.clone(),
                    image_url: None,
                    external_url: None,
                    metadata: other,
                },
            ],
            genres: vec!["pop rock".to_string()],
        }
    }
}

#[async_trait::async_trait]
impl TrackLookup for StubLookup {
    async fn search_tracks(
        &self,
        title: &str,
        _artist: &str,
        limit: usize,
    ) -> AppResult<Vec<TrackCandidate>> {
        if title == "nothing" {
            return Ok(vec![]);
        }
        Ok(self.candidates.iter().take(limit).cloned().collect())
    }

    async fn artist_genres(&self, _artist_id: &str) -> AppResult<Vec<String>> {
        Ok(self.genres.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
