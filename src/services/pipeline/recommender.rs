use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{
    catalog::Catalog, cluster_model::ClusterModel, features, genre_tagger, ranker,
    ranker::DEFAULT_LIMIT, scaler::Scaler,
};
use crate::{
    error::PipelineError,
    models::{CatalogRecord, ClusterId, ModelInfo, ScaledVector, TrackMetadata, FEATURE_COLUMNS},
};

/// Songs recommended for one seed track
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub cluster: ClusterId,
    pub songs: Vec<CatalogRecord>,
}

/// Process-wide recommendation pipeline.
///
/// Owns the fitted scaler, the cluster model and the catalog. All three are
/// immutable after construction, so a single instance can be shared behind an
/// `Arc` by every request.
#[derive(Debug)]
pub struct Recommender {
    scaler: Scaler,
    model: ClusterModel,
    catalog: Arc<Catalog>,
    default_limit: usize,
    loaded_at: DateTime<Utc>,
}

impl Recommender {
    pub fn new(scaler: Scaler, model: ClusterModel, catalog: Arc<Catalog>) -> Self {
        catalog.validate_against(model.cluster_count());

        Self {
            scaler,
            model,
            catalog,
            default_limit: DEFAULT_LIMIT,
            loaded_at: Utc::now(),
        }
    }

    /// Loads all three artifacts. Any failure is fatal for the caller.
    pub fn load(
        scaler_path: &str,
        model_path: &str,
        catalog_path: &str,
    ) -> Result<Self, PipelineError> {
        let scaler = Scaler::load(scaler_path)?;
        let model = ClusterModel::load(model_path)?;
        let catalog = Catalog::load(catalog_path)?;

        Ok(Self::new(scaler, model, Arc::new(catalog)))
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Tags, builds and scales the model input for a track
    pub fn scaled_features<S: AsRef<str>>(
        &self,
        metadata: &TrackMetadata,
        genres: &[S],
    ) -> Result<ScaledVector, PipelineError> {
        let flags = genre_tagger::tag(genres);
        let vector = features::build(metadata, &flags)?;
        Ok(self.scaler.scale(&vector))
    }

    /// Assigns a track to its cluster
    pub fn classify<S: AsRef<str>>(
        &self,
        metadata: &TrackMetadata,
        genres: &[S],
    ) -> Result<ClusterId, PipelineError> {
        let scaled = self.scaled_features(metadata, genres)?;

        self.model.assign(&scaled).inspect_err(|e| {
            tracing::error!(error = %e, "Scaled vector rejected by cluster model");
        })
    }

    /// Recommends the most popular catalog songs sharing the seed track's cluster
    pub fn recommend<S: AsRef<str>>(
        &self,
        metadata: &TrackMetadata,
        genres: &[S],
        exclude_title: &str,
        limit: Option<usize>,
    ) -> Result<Recommendation, PipelineError> {
        let cluster = self.classify(metadata, genres)?;
        let limit = limit.unwrap_or(self.default_limit);
        let songs = ranker::rank(cluster, self.catalog.records(), exclude_title, limit);

        tracing::info!(
            title = %metadata.title,
            artist = %metadata.artist,
            cluster = %cluster,
            results = songs.len(),
            "Recommendations computed"
        );

        Ok(Recommendation { cluster, songs })
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            model_name: self.model.name().map(str::to_string),
            cluster_count: self.model.cluster_count(),
            feature_columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            catalog_size: self.catalog.len(),
            loaded_at: self.loaded_at,
        }
    }
}
