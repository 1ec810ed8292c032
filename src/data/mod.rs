/// Data layer: core types, loading, validation and the derived views.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  required columns present?
///   └──────────┘
///        │
///        ▼
///   ┌───────────┬────────┬───────────┬───────┐
///   │ aggregate │ filter │ recommend │ stats │  pure views over &Dataset
///   └───────────┴────────┴───────────┴───────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod recommend;
pub mod stats;
pub mod validate;

pub use aggregate::{aggregate_mean, max_measure, mean_for_exact_value, AggregationResult, GroupMean};
pub use error::{DataError, DataResult};
pub use filter::{filter_range, FilterRange};
pub use loader::{load_csv_bytes, load_file, LoadOptions};
pub use model::{CellValue, Column, Dataset, Row};
pub use recommend::{recommend, recommendation_view, Predicate, Recommendation};
pub use stats::{describe, ColumnSummary, Summary};
pub use validate::{load_and_validate, missing_columns, validate};
