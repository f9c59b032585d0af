//! Writing forecast reports to disk

use anyhow::{Context, Result};
use price_forecast::{DataLoader, ForecastReport};
use std::fs;
use std::path::Path;
use tracing::info;

/// Write the report as JSON for `.json` paths, otherwise the forecast curve as CSV
pub fn write_report(report: &ForecastReport, path: &Path) -> Result<()> {
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        let mut df = report.forecast.to_frame()?;
        DataLoader::to_csv(&mut df, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!(path = %path.display(), json = is_json, "report written");
    Ok(())
}
