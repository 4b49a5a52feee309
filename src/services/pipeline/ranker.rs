use crate::models::{CatalogRecord, ClusterId};

pub const DEFAULT_LIMIT: usize = 10;

/// Picks the most popular catalog songs from `cluster`.
///
/// Records titled exactly `exclude_title` are dropped regardless of artist.
/// Popularity ties keep catalog order. Returns fewer than `limit` records
/// (possibly none) when the cluster runs out of candidates.
pub fn rank(
    cluster: ClusterId,
    catalog: &[CatalogRecord],
    exclude_title: &str,
    limit: usize,
) -> Vec<CatalogRecord> {
    let mut candidates: Vec<&CatalogRecord> = catalog
        .iter()
        .filter(|record| record.cluster == cluster)
        .filter(|record| record.title != exclude_title)
        .collect();

    // sort_by is stable
    candidates.sort_by(|a, b| b.popularity.cmp(&a.popularity));

    candidates.into_iter().take(limit).cloned().collect()
}
