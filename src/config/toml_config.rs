use crate::utils::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub comparison: ComparisonConfig,
    pub output: OutputConfig,
    /// 額外的國家洲別對應，例如 `Kosovo = "Europe"`
    pub continents: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub path: Option<String>,
    pub delimiter: Option<String>,
    pub country_column: Option<String>,
    pub salary_column: Option<String>,
    pub cost_of_living_column: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub reference: Option<String>,
    /// "first" 或 "error"
    pub on_duplicate: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CompareError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CompareError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
path = "data/col_sal.csv"
delimiter = ";"
country_column = "Nation"

[comparison]
reference = "Spain"
on_duplicate = "error"

[output]
format = "csv"
path = "out/spain.csv"

[continents]
Kosovo = "Europe"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source.path.as_deref(), Some("data/col_sal.csv"));
        assert_eq!(config.source.country_column.as_deref(), Some("Nation"));
        assert_eq!(config.source.salary_column, None);
        assert_eq!(config.comparison.reference.as_deref(), Some("Spain"));
        assert_eq!(config.output.format.as_deref(), Some("csv"));
        assert_eq!(config.continents.get("Kosovo").map(String::as_str), Some("Europe"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.source.path.is_none());
        assert!(config.continents.is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COL_COMPARE_TEST_DATA_DIR", "/srv/numbeo");

        let toml_content = r#"
[source]
path = "${COL_COMPARE_TEST_DATA_DIR}/countries.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.source.path.as_deref(),
            Some("/srv/numbeo/countries.csv")
        );

        std::env::remove_var("COL_COMPARE_TEST_DATA_DIR");
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[source\npath = 1").unwrap_err();
        assert!(matches!(err, CompareError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[comparison]\nreference = \"Portugal\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.comparison.reference.as_deref(), Some("Portugal"));
    }
}
