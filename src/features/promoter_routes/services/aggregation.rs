//! Route-level counters derived from point rows.
//!
//! Counters are always recomputed from the full point set rather than
//! adjusted incrementally, so applying the same completion twice yields the
//! same totals.

use crate::core::error::{AppError, Result};
use crate::features::promoter_routes::models::PointProgress;

/// Summary counters for one route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteTotals {
    pub total_points: i32,
    pub completed_points: i32,
    pub total_leaflets: i32,
}

/// Count completed points and sum leaflets; missing leaflet counts are zero.
///
/// Sums are taken in `i64` and must fit the INTEGER counter columns.
pub fn aggregate<I>(points: I) -> Result<RouteTotals>
where
    I: IntoIterator<Item = PointProgress>,
{
    let (total, completed, leaflets) =
        points
            .into_iter()
            .fold((0i64, 0i64, 0i64), |(total, completed, leaflets), point| {
                (
                    total + 1,
                    completed + i64::from(point.completed),
                    leaflets + i64::from(point.leaflets_distributed.unwrap_or(0)),
                )
            });

    Ok(RouteTotals {
        total_points: counter("total_points", total)?,
        completed_points: counter("completed_points", completed)?,
        total_leaflets: counter("total_leaflets", leaflets)?,
    })
}

fn counter(name: &str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        AppError::Validation(format!("Route {} out of range: {}", name, value))
    })
}
