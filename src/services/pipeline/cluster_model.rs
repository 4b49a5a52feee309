use linfa_nn::distance::{Distance, L2Dist};
use ndarray::{Array2, ArrayView1};
use serde::Deserialize;
use std::path::Path;

use crate::{
    error::PipelineError,
    models::{ClusterId, ScaledVector, FEATURE_COUNT},
};

#[derive(Debug, Deserialize)]
struct ClusterModelArtifact {
    #[serde(default)]
    name: Option<String>,
    centers: Vec<Vec<f64>>,
}

/// Nearest-centroid assigner over the fitted cluster centres.
///
/// The number of clusters is whatever the artifact holds, so models fitted
/// with different K can be swapped by pointing at another file.
#[derive(Debug, Clone)]
pub struct ClusterModel {
    name: Option<String>,
    /// One row per cluster, `FEATURE_COUNT` columns
    centers: Array2<f64>,
}

impl ClusterModel {
    /// Loads a cluster model artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::ModelLoad(format!("cannot read {}: {}", path.display(), e))
        })?;

        let model = Self::from_json(&contents)?;

        tracing::info!(
            path = %path.display(),
            clusters = model.cluster_count(),
            "Loaded cluster model artifact"
        );

        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let artifact: ClusterModelArtifact = serde_json::from_str(json)
            .map_err(|e| PipelineError::ModelLoad(format!("invalid artifact: {}", e)))?;

        let mut model = Self::new(artifact.centers)?;
        model.name = artifact.name;
        Ok(model)
    }

    pub fn new(centers: Vec<Vec<f64>>) -> Result<Self, PipelineError> {
        if centers.is_empty() {
            return Err(PipelineError::ModelLoad(
                "artifact contains no cluster centers".to_string(),
            ));
        }

        let rows = centers.len();
        let mut flat = Vec::with_capacity(rows * FEATURE_COUNT);
        for (idx, center) in centers.into_iter().enumerate() {
            if center.len() != FEATURE_COUNT {
                return Err(PipelineError::ModelLoad(format!(
                    "center {} has dimension {}, expected {}",
                    idx,
                    center.len(),
                    FEATURE_COUNT
                )));
            }
            if center.iter().any(|v| !v.is_finite()) {
                return Err(PipelineError::ModelLoad(format!(
                    "center {} contains non-finite values",
                    idx
                )));
            }
            flat.extend(center);
        }

        let centers = Array2::from_shape_vec((rows, FEATURE_COUNT), flat)
            .map_err(|e| PipelineError::ModelLoad(format!("invalid center matrix: {}", e)))?;

        Ok(Self {
            name: None,
            centers,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of clusters (K)
    pub fn cluster_count(&self) -> usize {
        self.centers.nrows()
    }

    /// Returns the cluster whose centre is closest in Euclidean distance.
    /// Ties resolve to the lowest cluster index.
    pub fn assign(&self, scaled: &ScaledVector) -> Result<ClusterId, PipelineError> {
        if scaled.len() != FEATURE_COUNT {
            return Err(PipelineError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: scaled.len(),
            });
        }

        let point = ArrayView1::from(scaled.as_slice());
        let mut best = 0;
        let mut best_distance = f64::INFINITY;

        // Strict comparison keeps the lowest index on ties
        for (idx, center) in self.centers.rows().into_iter().enumerate() {
            let distance = L2Dist.rdistance(point, center);
            if distance < best_distance {
                best = idx;
                best_distance = distance;
            }
        }

        Ok(ClusterId(best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(fill: f64) -> Vec<f64> {
        vec![fill; FEATURE_COUNT]
    }

    fn three_cluster_model() -> ClusterModel {
        ClusterModel::new(vec![center(-1.0), center(0.0), center(1.0)]).unwrap()
    }

    #[test]
    fn test_assign_nearest_center() {
        let model = three_cluster_model();
        let near_two = ScaledVector::new(vec![0.9; FEATURE_COUNT]);
        let near_zero = ScaledVector::new(vec![-3.0; FEATURE_COUNT]);

        assert_eq!(model.assign(&near_two), Ok(ClusterId(2)));
        assert_eq!(model.assign(&near_zero), Ok(ClusterId(0)));
    }

    #[test]
    fn test_assign_is_idempotent() {
        let model = three_cluster_model();
        let vector = ScaledVector::new(vec![0.2, -0.4, 0.1, 0.0, 1.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.5]);
        let first = model.assign(&vector).unwrap();
        for _ in 0..5 {
            assert_eq!(model.assign(&vector).unwrap(), first);
        }
    }

    #[test]
    fn test_assign_tie_picks_lowest_index() {
        let model = ClusterModel::new(vec![center(-1.0), center(1.0)]).unwrap();
        let midpoint = ScaledVector::new(vec![0.0; FEATURE_COUNT]);
        assert_eq!(model.assign(&midpoint), Ok(ClusterId(0)));
    }

    #[test]
    fn test_assign_dimension_mismatch() {
        let model = three_cluster_model();
        let short = ScaledVector::new(vec![0.0; 10]);
        assert_eq!(
            model.assign(&short),
            Err(PipelineError::DimensionMismatch {
                expected: 11,
                actual: 10
            })
        );
    }

    #[test]
    fn test_from_json_nine_clusters() {
        let centers: Vec<Vec<f64>> = (0..9).map(|i| center(i as f64)).collect();
        let json = serde_json::json!({ "name": "kmeans_9", "centers": centers }).to_string();

        let model = ClusterModel::from_json(&json).unwrap();
        assert_eq!(model.cluster_count(), 9);
        assert_eq!(model.name(), Some("kmeans_9"));
        assert_eq!(
            model.assign(&ScaledVector::new(vec![7.2; FEATURE_COUNT])),
            Ok(ClusterId(7))
        );
    }

    #[test]
    fn test_rejects_wrong_center_dimension() {
        let result = ClusterModel::new(vec![center(0.0), vec![0.0; 12]]);
        let err = result.unwrap_err();
        assert_eq!(
            err,
            PipelineError::ModelLoad("center 1 has dimension 12, expected 11".to_string())
        );
    }

    #[test]
    fn test_rejects_empty_model() {
        assert!(matches!(
            ClusterModel::new(vec![]),
            Err(PipelineError::ModelLoad(_))
        ));
    }

    #[test]
    fn test_missing_artifact() {
        assert!(matches!(
            ClusterModel::load("/nonexistent/kmeans_model.json"),
            Err(PipelineError::ModelLoad(_))
        ));
    }
}
