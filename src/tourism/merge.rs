//! Dataset merging

use crate::models::PointOfInterest;

/// Concatenate normalized datasets into one attraction list.
///
/// Dataset order and row order are preserved. Nothing is deduplicated, so the
/// same attraction listed by two datasets appears twice.
#[must_use]
pub fn merge<I>(datasets: I) -> Vec<PointOfInterest>
where
    I: IntoIterator<Item = Vec<PointOfInterest>>,
{
    datasets.into_iter().flatten().collect()
}
