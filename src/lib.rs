pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::csv_source::{ColumnNames, CsvSource};
pub use adapters::output::OutputFormat;
pub use config::{Settings, TomlConfig};
pub use core::axis::{axis_range, AxisRange};
pub use core::chart::ScatterChart;
pub use core::comparison::{Comparison, ComparisonEngine, ComparisonSummary};
pub use core::difference::{compute_differences, DifferenceEngine, DuplicatePolicy};
pub use domain::continents::ContinentMap;
pub use domain::model::{Continent, CountryRecord, DerivedRecord, Outlook};
pub use domain::ports::RecordSource;
pub use utils::error::{CompareError, Result};
