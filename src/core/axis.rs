use serde::{Deserialize, Serialize};

/// 每側留白為資料範圍的 10%
pub const AXIS_MARGIN_RATIO: f64 = 0.1;

/// Margin used when every value is identical and the span is zero.
pub const MIN_AXIS_MARGIN: f64 = 1.0;

const TICK_COUNT: f64 = 5.0;

/// Padded axis range for one plotted dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    /// Unpadded extremes of the data.
    pub data_min: f64,
    pub data_max: f64,
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn data_span(&self) -> f64 {
        self.data_max - self.data_min
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Distance between gridlines: a fifth of the data span.
    pub fn tick_step(&self) -> f64 {
        let span = self.data_span();
        if span > 0.0 {
            span / TICK_COUNT
        } else {
            MIN_AXIS_MARGIN
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// 計算繪圖用的座標軸範圍
///
/// Returns `None` when `values` is empty. Non-finite values are ignored.
pub fn axis_range(values: &[f64]) -> Option<AxisRange> {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let first = finite.next()?;
    let (data_min, data_max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let span = data_max - data_min;
    let margin = if span > 0.0 {
        span * AXIS_MARGIN_RATIO
    } else {
        MIN_AXIS_MARGIN
    };

    Some(AxisRange {
        min: data_min - margin,
        max: data_max + margin,
        data_min,
        data_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_is_ten_percent_of_span() {
        let range = axis_range(&[-20.0, 0.0, 80.0]).unwrap();
        assert!((range.min - -30.0).abs() < 1e-9);
        assert!((range.max - 90.0).abs() < 1e-9);
        assert!((range.tick_step() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_value_has_non_zero_width() {
        let range = axis_range(&[0.0]).unwrap();
        assert!(range.span() > 0.0);
        assert_eq!(range.bounds(), (-MIN_AXIS_MARGIN, MIN_AXIS_MARGIN));
        assert_eq!(range.tick_step(), MIN_AXIS_MARGIN);
    }

    #[test]
    fn test_identical_values() {
        let range = axis_range(&[12.5, 12.5, 12.5]).unwrap();
        assert!(range.span() > 0.0);
        assert!(range.contains(12.5));
    }

    #[test]
    fn test_empty_input() {
        assert!(axis_range(&[]).is_none());
        assert!(axis_range(&[f64::NAN]).is_none());
    }
}
