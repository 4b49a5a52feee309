use crate::{
    error::PipelineError,
    models::{FeatureVector, GenreFlags, TrackMetadata},
};

/// Extracts the year from an ISO date string ("1999-01-01" -> 1999)
pub fn release_year(release_date: &str) -> Result<i32, PipelineError> {
    let prefix: String = release_date.chars().take(4).collect();

    if prefix.chars().count() < 4 || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return Err(PipelineError::MalformedDate(release_date.to_string()));
    }

    prefix
        .parse()
        .map_err(|_| PipelineError::MalformedDate(release_date.to_string()))
}

/// Assembles the model input vector in `FEATURE_COLUMNS` order
pub fn build(metadata: &TrackMetadata, flags: &GenreFlags) -> Result<FeatureVector, PipelineError> {
    let release_date = metadata
        .release_date
        .as_deref()
        .ok_or(PipelineError::MissingField("release_date"))?;
    let popularity = metadata
        .popularity
        .ok_or(PipelineError::MissingField("popularity"))?;
    let duration_ms = metadata
        .duration_ms
        .ok_or(PipelineError::MissingField("duration_ms"))?;
    let explicit = metadata
        .explicit
        .ok_or(PipelineError::MissingField("explicit"))?;

    let year = release_year(release_date)?;
    let genres = flags.values().map(indicator);

    Ok(FeatureVector::new([
        f64::from(year),
        f64::from(popularity),
        duration_ms as f64,
        indicator(explicit),
        genres[0],
        genres[1],
        genres[2],
        genres[3],
        genres[4],
        genres[5],
        genres[6],
    ]))
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}
