use crate::core::comparison::Comparison;
use crate::domain::model::{DerivedRecord, Outlook};
use crate::utils::error::{CompareError, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Row, Table};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const OUTPUT_FORMATS: &[&str] = &["table", "csv", "json", "chart"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
    /// 給繪圖前端使用的散佈圖描述
    Chart,
}

impl FromStr for OutputFormat {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "chart" => Ok(OutputFormat::Chart),
            other => Err(CompareError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: format!("Valid formats: {}", OUTPUT_FORMATS.join(", ")),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Chart => "chart",
        };
        f.write_str(name)
    }
}

pub fn render(comparison: &Comparison, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(comparison)),
        OutputFormat::Csv => render_csv(comparison),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(comparison)?),
        OutputFormat::Chart => Ok(serde_json::to_string_pretty(&comparison.chart()?)?),
    }
}

/// 依優勢 (薪資差 - 生活成本差) 由高至低排列
pub fn render_table(comparison: &Comparison) -> String {
    let mut rows: Vec<(usize, &DerivedRecord)> = comparison.records.iter().enumerate().collect();
    rows.sort_by(|(_, a), (_, b)| b.advantage().total_cmp(&a.advantage()));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Country",
        "Continent",
        "Salary",
        "Cost of Living",
        "Salary Diff (%)",
        "COL Diff (%)",
        "Outlook",
    ]);

    for (index, record) in rows {
        let outlook = record.outlook();
        let outlook_cell = match outlook {
            Outlook::Better => Cell::new(outlook).fg(Color::Green),
            Outlook::Worse => Cell::new(outlook).fg(Color::Red),
            Outlook::Equivalent => Cell::new(outlook),
        };
        let country_cell = if index == comparison.reference_index {
            Cell::new(format!("{} (reference)", record.country))
        } else {
            Cell::new(&record.country)
        };
        table.add_row(Row::from(vec![
            country_cell,
            Cell::new(record.continent),
            Cell::new(format!("{:.0}", record.salary)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}", record.cost_of_living))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:+.1}", record.salary_diff_pct))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:+.1}", record.col_diff_pct)).set_alignment(CellAlignment::Right),
            outlook_cell,
        ]));
    }

    let summary = comparison.summary();
    format!(
        "{}\n{} of {} countries have a better salary-to-cost-of-living outlook than {}",
        table, summary.better, summary.compared, comparison.reference
    )
}

pub fn render_csv(comparison: &Comparison) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "country",
        "continent",
        "salary",
        "cost_of_living",
        "salary_diff_pct",
        "col_diff_pct",
        "outlook",
    ])?;
    for record in &comparison.records {
        writer.write_record([
            record.country.clone(),
            record.continent.to_string(),
            record.salary.to_string(),
            record.cost_of_living.to_string(),
            format!("{:.4}", record.salary_diff_pct),
            format!("{:.4}", record.col_diff_pct),
            record.outlook().to_string(),
        ])?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| CompareError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

/// 寫入檔案 (自動建立上層目錄)，未指定路徑時輸出到 stdout
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, content)?;
            tracing::info!("📁 Output saved to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
