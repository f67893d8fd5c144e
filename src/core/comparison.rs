use crate::core::chart::ScatterChart;
use crate::core::difference::{list_countries, DifferenceEngine};
use crate::domain::model::{
    normalize_country_name, Continent, CountryRecord, DerivedRecord, Outlook,
};
use crate::domain::ports::RecordSource;
use crate::utils::error::{CompareError, Result};
use serde::Serialize;

pub const DEFAULT_REFERENCE_COUNTRY: &str = "Italy";

/// Result of comparing every country against one reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub reference: String,
    /// Position of the reference row in `records`.
    pub reference_index: usize,
    pub records: Vec<DerivedRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ComparisonSummary {
    pub total: usize,
    /// Rows other than the reference row.
    pub compared: usize,
    pub better: usize,
    pub equivalent: usize,
    pub worse: usize,
    pub unknown_continent: usize,
}

impl Comparison {
    pub fn summary(&self) -> ComparisonSummary {
        let mut summary = ComparisonSummary {
            total: self.records.len(),
            ..Default::default()
        };

        for (index, record) in self.records.iter().enumerate() {
            // 只略過參考列，同名的重複列仍計入
            if index == self.reference_index {
                continue;
            }
            summary.compared += 1;
            match record.outlook() {
                Outlook::Better => summary.better += 1,
                Outlook::Equivalent => summary.equivalent += 1,
                Outlook::Worse => summary.worse += 1,
            }
        }
        summary.unknown_continent = self
            .records
            .iter()
            .filter(|r| r.continent == Continent::Unknown)
            .count();

        summary
    }

    pub fn chart(&self) -> Result<ScatterChart> {
        ScatterChart::build(&self.reference, &self.records)
    }
}

/// Holds an immutable source table and recomputes a fresh comparison per reference.
pub struct ComparisonEngine {
    records: Vec<CountryRecord>,
    engine: DifferenceEngine,
}

impl ComparisonEngine {
    pub fn load<S: RecordSource>(source: &S, engine: DifferenceEngine) -> Result<Self> {
        tracing::info!("📥 Loading records from {}", source.describe());
        let records = source.load()?;

        if records.is_empty() {
            return Err(CompareError::ValidationError {
                message: format!("{} contains no records", source.describe()),
            });
        }
        tracing::info!("Loaded {} records", records.len());

        Ok(Self { records, engine })
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn countries(&self) -> Vec<String> {
        list_countries(&self.records)
    }

    pub fn compare(&self, reference: &str) -> Result<Comparison> {
        let (reference_index, records) = self.engine.compute_indexed(&self.records, reference)?;
        let reference = normalize_country_name(reference);

        let comparison = Comparison {
            reference,
            reference_index,
            records,
        };
        let summary = comparison.summary();
        tracing::info!(
            "✅ Compared {} countries against {}: {} better, {} worse",
            summary.compared,
            comparison.reference,
            summary.better,
            summary.worse
        );

        Ok(comparison)
    }
}
