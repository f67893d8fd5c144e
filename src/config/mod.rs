pub mod settings;
pub mod toml_config;

pub use settings::Settings;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "col-compare")]
#[command(about = "Compare salaries and cost of living across countries")]
pub struct CliConfig {
    /// CSV/TSV file with Country, Sal and Col columns
    #[arg(short, long)]
    pub data: Option<String>,

    /// Reference country (default: Italy)
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Output format: table, csv, json or chart
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Print the available reference countries and exit")]
    pub list_countries: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, default_value = "compact", help = "Log format: compact or json")]
    pub log_format: String,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Settings::from_toml(&TomlConfig::from_file(path)?)
            }
            None => Settings::default(),
        };

        if let Some(data) = &self.data {
            settings.data_path = data.clone();
        }
        if let Some(reference) = &self.reference {
            settings.reference = reference.clone();
        }
        if let Some(format) = &self.format {
            settings.format = format.clone();
        }
        if let Some(output) = &self.output {
            settings.output_path = Some(output.clone());
        }

        Ok(settings)
    }
}
