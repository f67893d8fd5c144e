use crate::domain::model::{normalize_country_name, CountryRecord};
use crate::domain::ports::RecordSource;
use crate::utils::error::{CompareError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// 來源表格的欄位名稱
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub country: String,
    pub salary: String,
    pub cost_of_living: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            country: "Country".to_string(),
            salary: "Sal".to_string(),
            cost_of_living: "Col".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
enum SourceData {
    Path(PathBuf),
    Bytes { name: String, data: Vec<u8> },
}

/// CSV/TSV loader for either a dataset on disk or uploaded content.
#[derive(Debug, Clone)]
pub struct CsvSource {
    data: SourceData,
    delimiter: u8,
    columns: ColumnNames,
}

impl CsvSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let delimiter = delimiter_for(&path);
        Self {
            data: SourceData::Path(path),
            delimiter,
            columns: ColumnNames::default(),
        }
    }

    /// 使用者上傳的內容，`name` 為原始檔名
    pub fn from_bytes(name: &str, data: Vec<u8>) -> Self {
        Self {
            delimiter: delimiter_for(Path::new(name)),
            data: SourceData::Bytes {
                name: name.to_string(),
                data,
            },
            columns: ColumnNames::default(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }

    fn parse<R: Read>(&self, reader: R) -> Result<Vec<CountryRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column_index = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| CompareError::ConfigError {
                    message: format!("column '{}' not found in {}", name, self.describe()),
                })
        };
        let country_idx = column_index(&self.columns.country)?;
        let salary_idx = column_index(&self.columns.salary)?;
        let col_idx = column_index(&self.columns.cost_of_living)?;

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let row_data = result?;
            // 第 1 行是標題
            let line = row + 2;

            let country = normalize_country_name(row_data.get(country_idx).unwrap_or(""));
            if country.is_empty() {
                return Err(CompareError::ValidationError {
                    message: format!("row {} has an empty country name", line),
                });
            }

            let salary = parse_number(row_data.get(salary_idx)).ok_or_else(|| {
                CompareError::MissingFieldError {
                    country: country.clone(),
                    field: "salary".to_string(),
                }
            })?;
            let cost_of_living = parse_number(row_data.get(col_idx)).ok_or_else(|| {
                CompareError::MissingFieldError {
                    country: country.clone(),
                    field: "cost_of_living".to_string(),
                }
            })?;

            records.push(CountryRecord {
                country,
                salary,
                cost_of_living,
            });
        }

        tracing::debug!("Parsed {} rows from {}", records.len(), self.describe());
        Ok(records)
    }
}

impl RecordSource for CsvSource {
    fn load(&self) -> Result<Vec<CountryRecord>> {
        match &self.data {
            SourceData::Path(path) => {
                let file = std::fs::File::open(path)?;
                self.parse(file)
            }
            SourceData::Bytes { data, .. } => self.parse(data.as_slice()),
        }
    }

    fn describe(&self) -> String {
        match &self.data {
            SourceData::Path(path) => path.display().to_string(),
            SourceData::Bytes { name, data } => format!("upload '{}' ({} bytes)", name, data.len()),
        }
    }
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

fn parse_number(cell: Option<&str>) -> Option<f64> {
    let cleaned: String = cell?.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uploaded_csv() {
        let data = b"Country,Sal,Col\n italy ,2000,1000\nUNITED STATES,\"4,500.5\",1400\n".to_vec();
        let records = CsvSource::from_bytes("upload.csv", data).load().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], CountryRecord::new("Italy", 2000.0, 1000.0));
        assert_eq!(records[1].country, "United States");
        assert_eq!(records[1].salary, 4500.5);
    }

    #[test]
    fn test_tsv_by_extension() {
        let data = b"Country\tSal\tCol\nSpain\t2220\t926\n".to_vec();
        let records = CsvSource::from_bytes("data.TSV", data).load().unwrap();
        assert_eq!(records[0], CountryRecord::new("Spain", 2220.0, 926.0));
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let data = b"name;salary;col\nItaly;2000;1000\n".to_vec();
        let columns = ColumnNames {
            country: "name".to_string(),
            salary: "salary".to_string(),
            cost_of_living: "col".to_string(),
        };
        let records = CsvSource::from_bytes("upload.txt", data)
            .with_delimiter(b';')
            .with_columns(columns)
            .load()
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_salary() {
        let data = b"Country,Sal,Col\nItaly,,1000\n".to_vec();
        let err = CsvSource::from_bytes("upload.csv", data).load().unwrap_err();
        assert!(matches!(
            err,
            CompareError::MissingFieldError { ref country, ref field }
                if country == "Italy" && field == "salary"
        ));
    }

    #[test]
    fn test_non_numeric_and_nan_are_missing() {
        let data = b"Country,Sal,Col\nItaly,2000,n/a\n".to_vec();
        let err = CsvSource::from_bytes("upload.csv", data).load().unwrap_err();
        assert!(matches!(err, CompareError::MissingFieldError { .. }));

        let data = b"Country,Sal,Col\nItaly,NaN,1000\n".to_vec();
        let err = CsvSource::from_bytes("upload.csv", data).load().unwrap_err();
        assert!(matches!(err, CompareError::MissingFieldError { .. }));
    }

    #[test]
    fn test_short_row_is_missing_field() {
        let data = b"Country,Sal,Col\nItaly,2000\n".to_vec();
        let err = CsvSource::from_bytes("upload.csv", data).load().unwrap_err();
        assert!(matches!(
            err,
            CompareError::MissingFieldError { ref field, .. } if field == "cost_of_living"
        ));
    }

    #[test]
    fn test_empty_country() {
        let data = b"Country,Sal,Col\n  ,2000,1000\n".to_vec();
        let err = CsvSource::from_bytes("upload.csv", data).load().unwrap_err();
        assert!(matches!(err, CompareError::ValidationError { .. }));
    }

    #[test]
    fn test_missing_column() {
        let data = b"Country,Salary,Col\nItaly,2000,1000\n".to_vec();
        let err = CsvSource::from_bytes("upload.csv", data).load().unwrap_err();
        assert!(matches!(err, CompareError::ConfigError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = CsvSource::from_path("/nonexistent/countries.csv")
            .load()
            .unwrap_err();
        assert!(matches!(err, CompareError::IoError(_)));
    }
}
