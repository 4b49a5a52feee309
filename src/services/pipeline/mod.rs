//! Inference pipeline: genre tagging, feature building, scaling, cluster
//! assignment and ranking of cluster-mates.

pub mod catalog;
pub mod cluster_model;
pub mod features;
pub mod genre_tagger;
pub mod ranker;
pub mod recommender;
pub mod scaler;

pub use catalog::Catalog;
pub use cluster_model::ClusterModel;
pub use ranker::DEFAULT_LIMIT;
pub use recommender::{Recommendation, Recommender};
pub use scaler::{Scaler, ScalerKind};
