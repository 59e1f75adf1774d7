//! CSV export of a [`LeadReport`].

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{report::LeadReport, verdict::Lead};

/// Fixed column order for exported leads.
pub const CSV_HEADER: [&str; 3] = ["Company", "Investment Plans", "Source"];

impl LeadReport {
    /// Serialize the leads as CSV, one row per lead, in report order.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;
        for lead in self.leads() {
            writer.write_record([
                lead.company_name.as_str(),
                lead.investment_summary.as_str(),
                lead.source_url.as_str(),
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// `leads_<sector>_<YYYY-MM-DD>.csv`, dated by generation time.
    pub fn csv_file_name(&self) -> String {
        format!(
            "leads_{}_{}.csv",
            slugify(self.sector()),
            self.generated_at().format("%Y-%m-%d")
        )
    }

    /// Write the CSV into `dir` and return the file path.
    pub fn write_csv(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.csv_file_name());
        std::fs::write(&path, self.to_csv()?)?;
        tracing::info!(path = %path.display(), leads = self.total_accepted(), "Wrote CSV export");
        Ok(path)
    }
}

/// Parse CSV produced by [`LeadReport::to_csv`] back into leads.
pub fn read_csv(text: &str) -> Result<Vec<Lead>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut leads = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        leads.push(Lead {
            company_name: field(0),
            investment_summary: field(1),
            source_url: field(2),
        });
    }
    Ok(leads)
}

/// Lowercase ASCII alphanumerics, everything else collapsed to `_`.
fn slugify(sector: &str) -> String {
    let mut slug = String::with_capacity(sector.len());
    for c in sector.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "sector".to_string()
    } else {
        slug.to_string()
    }
}
