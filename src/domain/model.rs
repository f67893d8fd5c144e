use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 單一國家的原始數據
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    pub salary: f64,
    pub cost_of_living: f64,
}

impl CountryRecord {
    /// 建立記錄並正規化國家名稱
    pub fn new(country: &str, salary: f64, cost_of_living: f64) -> Self {
        Self {
            country: normalize_country_name(country),
            salary,
            cost_of_living,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Continent {
    America,
    Africa,
    Asia,
    Europe,
    Oceania,
    Unknown,
}

impl Continent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Continent::America => "America",
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::Oceania => "Oceania",
            Continent::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Continent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "america" => Ok(Continent::America),
            "africa" => Ok(Continent::Africa),
            "asia" => Ok(Continent::Asia),
            "europe" => Ok(Continent::Europe),
            "oceania" => Ok(Continent::Oceania),
            "unknown" => Ok(Continent::Unknown),
            other => Err(format!("unknown continent '{}'", other)),
        }
    }
}

/// 相對於 y = x 基準線的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    Better,
    Equivalent,
    Worse,
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outlook::Better => "better",
            Outlook::Equivalent => "equivalent",
            Outlook::Worse => "worse",
        };
        f.write_str(label)
    }
}

const OUTLOOK_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub country: String,
    pub salary: f64,
    pub cost_of_living: f64,
    pub salary_diff_pct: f64,
    pub col_diff_pct: f64,
    pub continent: Continent,
}

impl DerivedRecord {
    /// Salary gap minus cost-of-living gap, in percentage points.
    pub fn advantage(&self) -> f64 {
        self.salary_diff_pct - self.col_diff_pct
    }

    pub fn outlook(&self) -> Outlook {
        let advantage = self.advantage();
        if advantage > OUTLOOK_TOLERANCE {
            Outlook::Better
        } else if advantage < -OUTLOOK_TOLERANCE {
            Outlook::Worse
        } else {
            Outlook::Equivalent
        }
    }
}

/// 去除前後空白並轉為 title case
///
/// A letter is upper-cased when it starts the string or follows a non-letter,
/// otherwise lower-cased, so `"hong kong (china)"` becomes `"Hong Kong (China)"`.
pub fn normalize_country_name(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut previous_is_letter = false;

    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                normalized.extend(c.to_lowercase());
            } else {
                normalized.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            normalized.push(c);
            previous_is_letter = false;
        }
    }

    normalized
}
