use crate::adapters::csv_source::{ColumnNames, CsvSource};
use crate::adapters::output::{OutputFormat, OUTPUT_FORMATS};
use crate::config::toml_config::TomlConfig;
use crate::core::comparison::DEFAULT_REFERENCE_COUNTRY;
use crate::core::difference::{DifferenceEngine, DuplicatePolicy};
use crate::domain::continents::ContinentMap;
use crate::domain::model::Continent;
use crate::utils::error::{CompareError, Result};
use crate::utils::validation::{
    validate_delimiter, validate_file_extension, validate_non_empty_string, validate_one_of,
    validate_path, Validate,
};

/// Fully resolved settings after merging the config file and command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: String,
    pub delimiter: Option<String>,
    pub columns: ColumnNames,
    pub reference: String,
    pub on_duplicate: String,
    pub format: String,
    pub output_path: Option<String>,
    pub continent_overrides: Vec<(String, String)>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: String::new(),
            delimiter: None,
            columns: ColumnNames::default(),
            reference: DEFAULT_REFERENCE_COUNTRY.to_string(),
            on_duplicate: "first".to_string(),
            format: OutputFormat::default().to_string(),
            output_path: None,
            continent_overrides: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self::default();
        let source = &config.source;

        if let Some(path) = &source.path {
            settings.data_path = path.clone();
        }
        settings.delimiter = source.delimiter.clone();
        if let Some(column) = &source.country_column {
            settings.columns.country = column.clone();
        }
        if let Some(column) = &source.salary_column {
            settings.columns.salary = column.clone();
        }
        if let Some(column) = &source.cost_of_living_column {
            settings.columns.cost_of_living = column.clone();
        }
        if let Some(reference) = &config.comparison.reference {
            settings.reference = reference.clone();
        }
        if let Some(policy) = &config.comparison.on_duplicate {
            settings.on_duplicate = policy.clone();
        }
        if let Some(format) = &config.output.format {
            settings.format = format.clone();
        }
        settings.output_path = config.output.path.clone();
        settings.continent_overrides = config
            .continents
            .iter()
            .map(|(name, continent)| (name.clone(), continent.clone()))
            .collect();

        settings
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        self.format.parse()
    }

    pub fn source(&self) -> Result<CsvSource> {
        let mut source = CsvSource::from_path(&self.data_path).with_columns(self.columns.clone());
        if let Some(delimiter) = &self.delimiter {
            source = source.with_delimiter(validate_delimiter("source.delimiter", delimiter)?);
        }
        Ok(source)
    }

    pub fn engine(&self) -> Result<DifferenceEngine> {
        let mut overrides = Vec::with_capacity(self.continent_overrides.len());
        for (name, continent) in &self.continent_overrides {
            let continent = parse_continent_override(name, continent)?;
            overrides.push((name.as_str(), continent));
        }

        let continents = ContinentMap::builtin().with_overrides(overrides);
        let policy: DuplicatePolicy = self.on_duplicate.parse()?;
        Ok(DifferenceEngine::new(continents).with_duplicate_policy(policy))
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("source.path", &self.data_path)?;
        match &self.delimiter {
            Some(delimiter) => {
                validate_delimiter("source.delimiter", delimiter)?;
            }
            None => validate_file_extension("source.path", &self.data_path, &["csv", "tsv"])?,
        }

        validate_non_empty_string("source.country_column", &self.columns.country)?;
        validate_non_empty_string("source.salary_column", &self.columns.salary)?;
        validate_non_empty_string(
            "source.cost_of_living_column",
            &self.columns.cost_of_living,
        )?;
        validate_non_empty_string("comparison.reference", &self.reference)?;
        validate_one_of(
            "comparison.on_duplicate",
            &self.on_duplicate,
            &["first", "error"],
        )?;
        validate_one_of(
            "output.format",
            &self.format.to_ascii_lowercase(),
            OUTPUT_FORMATS,
        )?;

        if let Some(path) = &self.output_path {
            validate_path("output.path", path)?;
        }

        for (name, continent) in &self.continent_overrides {
            validate_non_empty_string("continents", name)?;
            parse_continent_override(name, continent)?;
        }

        Ok(())
    }
}

/// 只接受五大洲，`Unknown` 保留給未對應的國家
fn parse_continent_override(name: &str, value: &str) -> Result<Continent> {
    match value.parse::<Continent>() {
        Ok(Continent::Unknown) | Err(_) => Err(CompareError::InvalidConfigValueError {
            field: format!("continents.{}", name),
            value: value.to_string(),
            reason: "Valid values: America, Africa, Asia, Europe, Oceania".to_string(),
        }),
        Ok(continent) => Ok(continent),
    }
}
