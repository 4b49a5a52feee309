use std::{io::Read, path::Path, str::FromStr};

use csv::StringRecord;

use crate::{
    error::PipelineError,
    models::{CatalogRecord, ClusterId},
};

/// Header names accepted for each required column, most preferred first
const TITLE_HEADERS: &[&str] = &["spotify_title", "title"];
const ARTIST_HEADERS: &[&str] = &["spotify_artist", "artist"];
const POPULARITY_HEADERS: &[&str] = &["popularity"];
const CLUSTER_HEADERS: &[&str] = &["cluster"];

/// Positions of the required columns within a catalog row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    title: usize,
    artist: usize,
    popularity: usize,
    cluster: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, PipelineError> {
        Ok(Self {
            title: find_column(headers, "title", TITLE_HEADERS)?,
            artist: find_column(headers, "artist", ARTIST_HEADERS)?,
            popularity: find_column(headers, "popularity", POPULARITY_HEADERS)?,
            cluster: find_column(headers, "cluster", CLUSTER_HEADERS)?,
        })
    }

    fn record(&self, row: &StringRecord) -> Result<CatalogRecord, String> {
        Ok(CatalogRecord {
            title: field(row, self.title, "title")?.to_string(),
            artist: field(row, self.artist, "artist")?.to_string(),
            popularity: parse(row, self.popularity, "popularity")?,
            cluster: ClusterId(parse(row, self.cluster, "cluster")?),
        })
    }
}

fn find_column(
    headers: &StringRecord,
    column: &str,
    accepted: &[&str],
) -> Result<usize, PipelineError> {
    accepted
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name))
        .ok_or_else(|| PipelineError::CatalogLoad(format!("missing required column '{}'", column)))
}

fn field<'r>(row: &'r StringRecord, idx: usize, column: &str) -> Result<&'r str, String> {
    row.get(idx)
        .ok_or_else(|| format!("missing value for '{}'", column))
}

fn parse<T>(row: &StringRecord, idx: usize, column: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = field(row, idx, column)?;
    raw.parse()
        .map_err(|e| format!("invalid {} '{}': {}", column, raw, e))
}

/// Read-only table of known songs and their precomputed clusters
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    /// Loads the catalog from a CSV file with a header row
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            PipelineError::CatalogLoad(format!("cannot open {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            records = catalog.len(),
            "Loaded song catalog"
        );

        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PipelineError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| PipelineError::CatalogLoad(format!("cannot read header row: {}", e)))?;
        let columns = Columns::resolve(headers)?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            // header is line 1
            let record = row
                .map_err(|e| e.to_string())
                .and_then(|row| columns.record(&row))
                .map_err(|e| {
                    PipelineError::CatalogLoad(format!("invalid row {}: {}", idx + 2, e))
                })?;
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records whose cluster id lies outside `[0, cluster_count)`
    pub fn out_of_range(&self, cluster_count: usize) -> usize {
        self.records
            .iter()
            .filter(|r| r.cluster >= ClusterId(cluster_count))
            .count()
    }

    /// Warns about records that the given model can never assign a seed to
    pub fn validate_against(&self, cluster_count: usize) {
        let unreachable = self.out_of_range(cluster_count);
        if unreachable > 0 {
            tracing::warn!(
                unreachable = unreachable,
                clusters = cluster_count,
                "Catalog contains records with cluster ids the loaded model cannot produce"
            );
        }
    }
}
