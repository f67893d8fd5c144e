use crate::core::axis::{axis_range, AxisRange};
use crate::domain::model::{Continent, DerivedRecord};
use crate::utils::error::{CompareError, Result};
use serde::{Deserialize, Serialize};

pub const X_AXIS_LABEL: &str = "Cost of Living Difference (%)";
pub const Y_AXIS_LABEL: &str = "Salary Difference (%)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAxis {
    pub label: String,
    pub range: AxisRange,
    pub tick_step: f64,
}

impl ChartAxis {
    fn new(label: &str, range: AxisRange) -> Self {
        Self {
            label: label.to_string(),
            tick_step: range.tick_step(),
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub group: Continent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    /// x = 0
    Vertical,
    /// y = 0
    Horizontal,
    /// y = x，薪資與生活成本同幅度變化的基準線
    Benchmark,
}

/// A dashed reference line drawn from `(x0, y0)` to `(x1, y1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub kind: GuideKind,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub color: String,
}

/// Everything a drawing surface needs to plot one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub title: String,
    pub reference: String,
    pub x_axis: ChartAxis,
    pub y_axis: ChartAxis,
    pub points: Vec<ChartPoint>,
    pub guides: Vec<Guide>,
}

impl ScatterChart {
    pub fn build(reference: &str, derived: &[DerivedRecord]) -> Result<Self> {
        let col_diffs: Vec<f64> = derived.iter().map(|r| r.col_diff_pct).collect();
        let salary_diffs: Vec<f64> = derived.iter().map(|r| r.salary_diff_pct).collect();

        let (x_range, y_range) = match (axis_range(&col_diffs), axis_range(&salary_diffs)) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                return Err(CompareError::ValidationError {
                    message: "cannot chart an empty comparison".to_string(),
                })
            }
        };

        let points = derived
            .iter()
            .map(|r| ChartPoint {
                x: r.col_diff_pct,
                y: r.salary_diff_pct,
                label: r.country.clone(),
                group: r.continent,
            })
            .collect();

        let diagonal_lo = x_range.min.min(y_range.min);
        let diagonal_hi = x_range.max.max(y_range.max);

        let guides = vec![
            Guide {
                kind: GuideKind::Benchmark,
                x0: diagonal_lo,
                y0: diagonal_lo,
                x1: diagonal_hi,
                y1: diagonal_hi,
                color: "red".to_string(),
            },
            Guide {
                kind: GuideKind::Vertical,
                x0: 0.0,
                y0: y_range.min,
                x1: 0.0,
                y1: y_range.max,
                color: "white".to_string(),
            },
            Guide {
                kind: GuideKind::Horizontal,
                x0: x_range.min,
                y0: 0.0,
                x1: x_range.max,
                y1: 0.0,
                color: "white".to_string(),
            },
        ];

        Ok(Self {
            title: format!(
                "Cost of Living vs Salary Comparison (Reference: {})",
                reference
            ),
            reference: reference.to_string(),
            x_axis: ChartAxis::new(X_AXIS_LABEL, x_range),
            y_axis: ChartAxis::new(Y_AXIS_LABEL, y_range),
            points,
            guides,
        })
    }

    /// 圖例中出現的洲別 (排序後)
    pub fn groups(&self) -> Vec<Continent> {
        let mut groups: Vec<Continent> = self.points.iter().map(|p| p.group).collect();
        groups.sort();
        groups.dedup();
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::difference::compute_differences;
    use crate::domain::model::CountryRecord;

    #[test]
    fn test_build_chart() {
        let records = vec![
            CountryRecord::new("Italy", 2000.0, 1000.0),
            CountryRecord::new("Spain", 2220.0, 926.0),
            CountryRecord::new("Atlantis", 1000.0, 500.0),
        ];
        let derived = compute_differences(&records, "Italy").unwrap();
        let chart = ScatterChart::build("Italy", &derived).unwrap();

        assert_eq!(
            chart.title,
            "Cost of Living vs Salary Comparison (Reference: Italy)"
        );
        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.points[0].x, 0.0);
        assert_eq!(chart.points[0].y, 0.0);
        assert_eq!(chart.groups(), vec![Continent::Europe, Continent::Unknown]);

        for point in &chart.points {
            assert!(chart.x_axis.range.contains(point.x));
            assert!(chart.y_axis.range.contains(point.y));
        }

        let vertical = chart
            .guides
            .iter()
            .find(|g| g.kind == GuideKind::Vertical)
            .unwrap();
        assert_eq!(vertical.x0, 0.0);
        assert_eq!(vertical.y0, chart.y_axis.range.min);

        let benchmark = chart
            .guides
            .iter()
            .find(|g| g.kind == GuideKind::Benchmark)
            .unwrap();
        assert_eq!(benchmark.x0, benchmark.y0);
        assert_eq!(benchmark.x1, benchmark.y1);
    }

    #[test]
    fn test_single_row_chart_has_width() {
        let records = vec![CountryRecord::new("Italy", 2000.0, 1000.0)];
        let derived = compute_differences(&records, "Italy").unwrap();
        let chart = ScatterChart::build("Italy", &derived).unwrap();
        assert!(chart.x_axis.range.span() > 0.0);
        assert!(chart.y_axis.range.span() > 0.0);
    }

    #[test]
    fn test_empty_chart_is_rejected() {
        assert!(ScatterChart::build("Italy", &[]).is_err());
    }
}
