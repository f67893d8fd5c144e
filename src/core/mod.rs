pub mod axis;
pub mod chart;
pub mod comparison;
pub mod difference;

pub use crate::domain::model::{Continent, CountryRecord, DerivedRecord, Outlook};
pub use crate::domain::ports::RecordSource;
pub use crate::utils::error::Result;
