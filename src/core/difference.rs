use crate::domain::continents::ContinentMap;
use crate::domain::model::{normalize_country_name, CountryRecord, DerivedRecord};
use crate::utils::error::{CompareError, Result};
use std::str::FromStr;

/// What to do when the reference name matches more than one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// 使用第一筆符合的資料
    #[default]
    UseFirst,
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(DuplicatePolicy::UseFirst),
            "error" => Ok(DuplicatePolicy::Reject),
            other => Err(CompareError::InvalidConfigValueError {
                field: "comparison.on_duplicate".to_string(),
                value: other.to_string(),
                reason: "Valid values: first, error".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DifferenceEngine {
    continents: ContinentMap,
    duplicate_policy: DuplicatePolicy,
}

impl DifferenceEngine {
    pub fn new(continents: ContinentMap) -> Self {
        Self {
            continents,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn continents(&self) -> &ContinentMap {
        &self.continents
    }

    /// 計算每個國家相對參考國家的薪資與生活成本百分比差異
    ///
    /// The output keeps input order. The reference row gets exactly `0.0` for
    /// both differences.
    pub fn compute(
        &self,
        records: &[CountryRecord],
        reference_country: &str,
    ) -> Result<Vec<DerivedRecord>> {
        self.compute_indexed(records, reference_country)
            .map(|(_, derived)| derived)
    }

    /// Same as [`compute`](Self::compute), also returning the position of the
    /// row used as reference.
    pub fn compute_indexed(
        &self,
        records: &[CountryRecord],
        reference_country: &str,
    ) -> Result<(usize, Vec<DerivedRecord>)> {
        for record in records {
            check_record(record)?;
        }

        let reference_name = normalize_country_name(reference_country);
        let reference_index = self.locate_reference(records, &reference_name)?;
        let reference = &records[reference_index];

        if reference.salary <= 0.0 {
            return Err(CompareError::InvalidReferenceError {
                country: reference.country.clone(),
                field: "salary".to_string(),
                value: reference.salary,
            });
        }
        if reference.cost_of_living <= 0.0 {
            return Err(CompareError::InvalidReferenceError {
                country: reference.country.clone(),
                field: "cost_of_living".to_string(),
                value: reference.cost_of_living,
            });
        }

        let mut unmapped = 0usize;
        let mut derived = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let (salary_diff_pct, col_diff_pct) = if index == reference_index {
                (0.0, 0.0)
            } else {
                (
                    bounded_difference(record.salary, reference, "salary", reference.salary)?,
                    bounded_difference(
                        record.cost_of_living,
                        reference,
                        "cost_of_living",
                        reference.cost_of_living,
                    )?,
                )
            };

            let continent = self.continents.lookup(&record.country);
            if !self.continents.contains(&record.country) {
                tracing::debug!("No continent mapping for '{}'", record.country);
                unmapped += 1;
            }

            derived.push(DerivedRecord {
                country: record.country.clone(),
                salary: record.salary,
                cost_of_living: record.cost_of_living,
                salary_diff_pct,
                col_diff_pct,
                continent,
            });
        }

        if unmapped > 0 {
            tracing::warn!(
                "⚠️ {} countries have no continent mapping and are grouped as Unknown",
                unmapped
            );
        }
        tracing::debug!(
            "Computed differences for {} records against {}",
            derived.len(),
            reference.country
        );

        Ok((reference_index, derived))
    }

    fn locate_reference(&self, records: &[CountryRecord], reference_name: &str) -> Result<usize> {
        let mut matches = records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.country == reference_name)
            .map(|(index, _)| index);

        let first = matches
            .next()
            .ok_or_else(|| CompareError::ReferenceNotFoundError {
                country: reference_name.to_string(),
            })?;

        let extra = matches.count();
        if extra > 0 {
            match self.duplicate_policy {
                DuplicatePolicy::UseFirst => {
                    tracing::warn!(
                        "⚠️ '{}' appears {} times, using the first row",
                        reference_name,
                        extra + 1
                    );
                }
                DuplicatePolicy::Reject => {
                    return Err(CompareError::AmbiguousReferenceError {
                        country: reference_name.to_string(),
                        matches: extra + 1,
                    });
                }
            }
        }

        Ok(first)
    }
}

/// 使用內建洲別表與預設重複策略計算差異
pub fn compute_differences(
    records: &[CountryRecord],
    reference_country: &str,
) -> Result<Vec<DerivedRecord>> {
    DifferenceEngine::default().compute(records, reference_country)
}

/// Sorted, de-duplicated country names.
pub fn list_countries(records: &[CountryRecord]) -> Vec<String> {
    let mut names: Vec<String> = records.iter().map(|r| r.country.clone()).collect();
    names.sort();
    names.dedup();
    names
}

fn percent_difference(value: f64, baseline: f64) -> f64 {
    (value - baseline) / baseline * 100.0
}

/// 極小的基準值會使結果溢位成 inf
fn bounded_difference(
    value: f64,
    reference: &CountryRecord,
    field: &str,
    baseline: f64,
) -> Result<f64> {
    let diff = percent_difference(value, baseline);
    if diff.is_finite() {
        Ok(diff)
    } else {
        Err(CompareError::InvalidReferenceError {
            country: reference.country.clone(),
            field: field.to_string(),
            value: baseline,
        })
    }
}

fn check_record(record: &CountryRecord) -> Result<()> {
    if record.country.trim().is_empty() {
        return Err(CompareError::ValidationError {
            message: "record has an empty country name".to_string(),
        });
    }
    if !record.salary.is_finite() {
        return Err(CompareError::MissingFieldError {
            country: record.country.clone(),
            field: "salary".to_string(),
        });
    }
    if !record.cost_of_living.is_finite() {
        return Err(CompareError::MissingFieldError {
            country: record.country.clone(),
            field: "cost_of_living".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Continent;

    const EPSILON: f64 = 1e-9;

    fn sample() -> Vec<CountryRecord> {
        vec![
            CountryRecord::new("Italy", 2000.0, 1000.0),
            CountryRecord::new("Spain", 2220.0, 926.0),
            CountryRecord::new("Switzerland", 6000.0, 1800.0),
        ]
    }

    #[test]
    fn test_italy_spain_example() {
        let derived = compute_differences(&sample(), "Italy").unwrap();

        let spain = &derived[1];
        assert_eq!(spain.country, "Spain");
        assert!((spain.salary_diff_pct - 11.0).abs() < EPSILON);
        assert!((spain.col_diff_pct - -7.4).abs() < EPSILON);
        assert_eq!(spain.continent, Continent::Europe);
    }

    #[test]
    fn test_reference_is_exactly_zero() {
        for reference in ["Italy", "Spain", "Switzerland"] {
            let derived = compute_differences(&sample(), reference).unwrap();
            let own = derived.iter().find(|r| r.country == reference).unwrap();
            assert_eq!(own.salary_diff_pct, 0.0);
            assert_eq!(own.col_diff_pct, 0.0);
        }
    }

    #[test]
    fn test_reference_name_is_normalized() {
        let derived = compute_differences(&sample(), "  spain ").unwrap();
        assert_eq!(derived[1].salary_diff_pct, 0.0);
    }

    #[test]
    fn test_preserves_input_order() {
        let derived = compute_differences(&sample(), "Switzerland").unwrap();
        let names: Vec<&str> = derived.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Italy", "Spain", "Switzerland"]);
    }

    #[test]
    fn test_reference_not_found() {
        let err = compute_differences(&sample(), "Atlantis").unwrap_err();
        assert!(matches!(
            err,
            CompareError::ReferenceNotFoundError { ref country } if country == "Atlantis"
        ));
    }

    #[test]
    fn test_zero_salary_baseline() {
        let records = vec![
            CountryRecord::new("Italy", 0.0, 1000.0),
            CountryRecord::new("Spain", 2220.0, 926.0),
        ];
        let err = compute_differences(&records, "Italy").unwrap_err();
        assert!(matches!(
            err,
            CompareError::InvalidReferenceError { ref field, .. } if field == "salary"
        ));
    }

    #[test]
    fn test_tiny_baseline_overflow_is_rejected() {
        let records = vec![
            CountryRecord::new("Italy", 1e-310, 1000.0),
            CountryRecord::new("Spain", 1e10, 926.0),
        ];
        let err = compute_differences(&records, "Italy").unwrap_err();
        assert!(matches!(
            err,
            CompareError::InvalidReferenceError { ref country, ref field, .. }
                if country == "Italy" && field == "salary"
        ));

        let records = vec![
            CountryRecord::new("Italy", 2000.0, 1e-300),
            CountryRecord::new("Spain", 2220.0, f64::MAX),
        ];
        let err = compute_differences(&records, "Italy").unwrap_err();
        assert!(matches!(
            err,
            CompareError::InvalidReferenceError { ref field, .. } if field == "cost_of_living"
        ));
    }

    #[test]
    fn test_compute_indexed_reports_reference_row() {
        let records = vec![
            CountryRecord::new("Spain", 2220.0, 926.0),
            CountryRecord::new("Italy", 2000.0, 1000.0),
            CountryRecord::new("Italy", 4000.0, 1000.0),
        ];
        let (index, derived) = DifferenceEngine::default()
            .compute_indexed(&records, "Italy")
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(derived.len(), 3);
    }

    #[test]
    fn test_negative_cost_of_living_baseline() {
        let records = vec![CountryRecord::new("Italy", 2000.0, -5.0)];
        let err = compute_differences(&records, "Italy").unwrap_err();
        assert!(matches!(
            err,
            CompareError::InvalidReferenceError { ref field, .. } if field == "cost_of_living"
        ));
    }

    #[test]
    fn test_zero_baseline_on_other_row_is_fine() {
        let records = vec![
            CountryRecord::new("Italy", 2000.0, 1000.0),
            CountryRecord::new("Spain", 0.0, 0.0),
        ];
        let derived = compute_differences(&records, "Italy").unwrap();
        assert_eq!(derived[1].salary_diff_pct, -100.0);
        assert_eq!(derived[1].col_diff_pct, -100.0);
    }

    #[test]
    fn test_non_finite_value_is_missing_field() {
        let records = vec![
            CountryRecord::new("Italy", 2000.0, 1000.0),
            CountryRecord::new("Spain", 2220.0, f64::NAN),
        ];
        let err = compute_differences(&records, "Italy").unwrap_err();
        assert!(matches!(
            err,
            CompareError::MissingFieldError { ref country, ref field }
                if country == "Spain" && field == "cost_of_living"
        ));
    }

    #[test]
    fn test_unmapped_continent_is_unknown() {
        let records = vec![
            CountryRecord::new("Italy", 2000.0, 1000.0),
            CountryRecord::new("Atlantis", 5000.0, 500.0),
        ];
        let derived = compute_differences(&records, "Italy").unwrap();
        assert_eq!(derived[1].continent, Continent::Unknown);
        assert!((derived[1].salary_diff_pct - 150.0).abs() < EPSILON);
    }

    #[test]
    fn test_duplicate_reference_uses_first_row() {
        let records = vec![
            CountryRecord::new("Italy", 2000.0, 1000.0),
            CountryRecord::new("italy ", 4000.0, 2000.0),
        ];
        let derived = compute_differences(&records, "Italy").unwrap();
        assert_eq!(derived[0].salary_diff_pct, 0.0);
        assert!((derived[1].salary_diff_pct - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_duplicate_reference_rejected() {
        let records = vec![
            CountryRecord::new("Italy", 2000.0, 1000.0),
            CountryRecord::new("Italy", 4000.0, 2000.0),
        ];
        let engine = DifferenceEngine::default().with_duplicate_policy(DuplicatePolicy::Reject);
        let err = engine.compute(&records, "Italy").unwrap_err();
        assert!(matches!(
            err,
            CompareError::AmbiguousReferenceError { matches: 2, .. }
        ));
    }

    #[test]
    fn test_duplicate_policy_from_str() {
        assert_eq!(
            "first".parse::<DuplicatePolicy>().unwrap(),
            DuplicatePolicy::UseFirst
        );
        assert_eq!(
            "error".parse::<DuplicatePolicy>().unwrap(),
            DuplicatePolicy::Reject
        );
        assert!("last".parse::<DuplicatePolicy>().is_err());
    }

    #[test]
    fn test_list_countries() {
        let mut records = sample();
        records.push(CountryRecord::new("austria", 3000.0, 1100.0));
        records.push(CountryRecord::new("Spain", 1.0, 1.0));
        assert_eq!(
            list_countries(&records),
            vec!["Austria", "Italy", "Spain", "Switzerland"]
        );
    }
}
