use serde::Deserialize;
use std::path::Path;

use crate::{
    error::PipelineError,
    models::{FeatureVector, ScaledVector, FEATURE_COLUMNS, FEATURE_COUNT},
};

/// Persisted form of a fitted scaler
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScalerArtifact {
    /// `(x - mean) / scale`
    Standard {
        #[serde(default)]
        columns: Option<Vec<String>>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    /// `x * scale + min`
    MinMax {
        #[serde(default)]
        columns: Option<Vec<String>>,
        min: Vec<f64>,
        scale: Vec<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalerKind {
    Standard,
    MinMax,
}

/// Fitted per-column transform applied to every feature vector before clustering.
///
/// Parameters are fixed at load time; `scale` is a pure function of its input.
#[derive(Debug, Clone)]
pub struct Scaler {
    kind: ScalerKind,
    offset: [f64; FEATURE_COUNT],
    factor: [f64; FEATURE_COUNT],
}

impl Scaler {
    /// Loads a scaler artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::ScalerLoad(format!("cannot read {}: {}", path.display(), e))
        })?;

        let scaler = Self::from_json(&contents)?;

        tracing::info!(
            path = %path.display(),
            kind = ?scaler.kind,
            "Loaded scaler artifact"
        );

        Ok(scaler)
    }

    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let artifact: ScalerArtifact = serde_json::from_str(json)
            .map_err(|e| PipelineError::ScalerLoad(format!("invalid artifact: {}", e)))?;

        match artifact {
            ScalerArtifact::Standard {
                columns,
                mean,
                scale,
            } => {
                check_columns(columns.as_deref())?;
                Self::standard(mean, scale)
            }
            ScalerArtifact::MinMax {
                columns,
                min,
                scale,
            } => {
                check_columns(columns.as_deref())?;
                Self::min_max(min, scale)
            }
        }
    }

    /// Standardization with fitted per-column mean and scale
    pub fn standard(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, PipelineError> {
        let offset = to_columns("mean", mean)?;
        let factor = to_columns("scale", scale)?;

        if let Some(col) = factor.iter().position(|s| *s == 0.0) {
            return Err(PipelineError::ScalerLoad(format!(
                "scale for column '{}' is zero",
                FEATURE_COLUMNS[col]
            )));
        }

        Ok(Self {
            kind: ScalerKind::Standard,
            offset,
            factor,
        })
    }

    /// Min-max normalization with fitted per-column minimum offset and scale
    pub fn min_max(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, PipelineError> {
        Ok(Self {
            kind: ScalerKind::MinMax,
            offset: to_columns("min", min)?,
            factor: to_columns("scale", scale)?,
        })
    }

    pub fn kind(&self) -> ScalerKind {
        self.kind
    }

    pub fn scale(&self, vector: &FeatureVector) -> ScaledVector {
        let values = vector
            .as_slice()
            .iter()
            .zip(self.offset.iter().zip(self.factor.iter()))
            .map(|(x, (offset, factor))| match self.kind {
                ScalerKind::Standard => (x - offset) / factor,
                ScalerKind::MinMax => x * factor + offset,
            })
            .collect();

        ScaledVector::new(values)
    }
}

fn check_columns(columns: Option<&[String]>) -> Result<(), PipelineError> {
    let Some(columns) = columns else {
        return Ok(());
    };

    if columns.len() != FEATURE_COUNT {
        return Err(PipelineError::ScalerLoad(format!(
            "expected {} columns, artifact declares {}",
            FEATURE_COUNT,
            columns.len()
        )));
    }

    for (expected, actual) in FEATURE_COLUMNS.iter().zip(columns) {
        if expected != actual {
            return Err(PipelineError::ScalerLoad(format!(
                "column order mismatch: expected '{}', found '{}'",
                expected, actual
            )));
        }
    }

    Ok(())
}

fn to_columns(name: &str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT], PipelineError> {
    if values.len() != FEATURE_COUNT {
        return Err(PipelineError::ScalerLoad(format!(
            "'{}' has {} columns, expected {}",
            name,
            values.len(),
            FEATURE_COUNT
        )));
    }

    if values.iter().any(|v| !v.is_finite()) {
        return Err(PipelineError::ScalerLoad(format!(
            "'{}' contains non-finite values",
            name
        )));
    }

    let mut columns = [0.0; FEATURE_COUNT];
    columns.copy_from_slice(&values);
    Ok(columns)
}
