//! Append-only history of named interview aspect scores and the analytics
//! projections (trends, time series, radar, category comparison) built on it.

pub mod charts;
pub mod domain;
pub mod history;
pub mod repository;
pub mod router;

#[cfg(test)]
mod tests;

pub use charts::{classify_trend, write_time_series_csv, TREND_DEAD_BAND};
pub use domain::{
    AspectCategory, AspectMetadata, AspectScore, AspectScoreHistory, AspectScoreInput,
    AspectStatistics, CategoryComparison, RadarPoint, TimeRange, TimeSeriesRow, Trend,
};
pub use history::{AspectScoreManager, ImportError};
pub use repository::{AspectScoreStore, InMemoryAspectStore, JsonFileAspectStore, StoreError};
pub use router::aspect_router;
