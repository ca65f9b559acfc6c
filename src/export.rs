//! File export of pipeline output.
//!
//! Leads are flattened into [`LeadRecord`]s and written as CSV or JSON.

use crate::errors::{AppError, ResultExt};
use crate::models::{Lead, LeadRecord};
use std::fs;
use std::path::{Path, PathBuf};

const CSV_HEADER: [&str; 10] = [
    "name",
    "email",
    "company",
    "position",
    "location",
    "industry",
    "company_size",
    "tags",
    "score",
    "missing_info",
];

/// Separator used when tags are flattened into a single CSV cell.
pub const CSV_TAG_SEPARATOR: &str = ";";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "leads.csv",
            ExportFormat::Json => "leads.json",
        }
    }

    pub fn render(self, leads: &[Lead]) -> Result<String, AppError> {
        let records: Vec<LeadRecord> = leads.iter().map(LeadRecord::from).collect();
        match self {
            ExportFormat::Csv => Ok(render_csv(&records)),
            ExportFormat::Json => Ok(serde_json::to_string_pretty(&records)?),
        }
    }

    /// Writes `leads` to `path`, creating parent directories as needed.
    pub fn export(self, leads: &[Lead], path: &Path) -> Result<PathBuf, AppError> {
        let content = self.render(leads)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating export directory {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("Writing {}", path.display()))?;

        tracing::info!("✅ Exported {} leads to {}", leads.len(), path.display());
        Ok(path.to_path_buf())
    }

    /// Writes `leads` into `dir` under the format's default file name.
    pub fn export_to_dir(self, leads: &[Lead], dir: &Path) -> Result<PathBuf, AppError> {
        self.export(leads, &dir.join(self.default_file_name()))
    }
}

/// Renders records as RFC 4180 CSV with a header row.
pub fn render_csv(records: &[LeadRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_HEADER.iter().copied());

    for record in records {
        let tags = record.tags.join(CSV_TAG_SEPARATOR);
        let score = record.score.to_string();
        push_row(
            &mut out,
            [
                record.name.as_str(),
                record.email.as_str(),
                record.company.as_str(),
                record.position.as_str(),
                record.location.as_str(),
                record.industry.as_str(),
                record.company_size.as_str(),
                tags.as_str(),
                score.as_str(),
                record.missing_info.as_deref().unwrap_or(""),
            ],
        );
    }
    out
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_csv_field(field));
    }
    out.push_str("\r\n");
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, tags: &[&str]) -> LeadRecord {
        LeadRecord {
            name: name.to_string(),
            email: "a@x.com".to_string(),
            company: "DataWorks".to_string(),
            position: "Engineer".to_string(),
            location: "Jakarta".to_string(),
            industry: "Tech".to_string(),
            company_size: "Large".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            score: 100,
            missing_info: Some("No".to_string()),
        }
    }

    #[test]
    fn test_csv_header_and_row() {
        let csv = render_csv(&[record("Jane Doe", &["High Potential", "Tech Industry"])]);
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(
            lines[0],
            "name,email,company,position,location,industry,company_size,tags,score,missing_info"
        );
        assert_eq!(
            lines[1],
            "Jane Doe,a@x.com,DataWorks,Engineer,Jakarta,Tech,Large,High Potential;Tech Industry,100,No"
        );
    }

    #[test]
    fn test_csv_quotes_special_characters() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_empty_missing_info() {
        let mut r = record("Jane", &[]);
        r.missing_info = None;
        let csv = render_csv(&[r]);
        assert!(csv.lines().nth(1).unwrap().ends_with(",100,"));
    }
}
