use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};

use super::render::NO_DATA;
use crate::models::AnalysisResponse;

/// Builds the markdown document offered for download.
pub fn build_document(response: &AnalysisResponse) -> String {
    let analysis = &response.analysis;
    let or_no_data = |text: &str| {
        if text.trim().is_empty() {
            NO_DATA.to_string()
        } else {
            text.to_string()
        }
    };

    format!(
        "# Mutual Fund Analysis Report\n\
         ## Fund: {fund}\n\
         ## Generated on: {generated}\n\
         \n\
         ---\n\
         \n\
         ## Fund Analysis\n\
         {fund_analysis}\n\
         \n\
         ---\n\
         \n\
         ## Sentiment Analysis\n\
         {sentiment}\n\
         \n\
         ---\n\
         \n\
         ## Macroeconomic Analysis\n\
         {macro_}\n\
         \n\
         ---\n\
         \n\
         ## Final Investment Report\n\
         {report}\n",
        fund = response.fund_name,
        generated = response
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S"),
        fund_analysis = or_no_data(&analysis.fund_analysis),
        sentiment = or_no_data(&analysis.sentiment_analysis),
        macro_ = or_no_data(&analysis.macro_analysis),
        report = or_no_data(&analysis.final_report),
    )
}

/// `MF_Analysis_<name>_<YYYYMMDD>.md`, spaces replaced by underscores.
pub fn file_name(fund_name: &str, date: NaiveDate) -> String {
    let name: String = fund_name
        .trim()
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' => '-',
            other => other,
        })
        .collect();
    format!("MF_Analysis_{}_{}.md", name, date.format("%Y%m%d"))
}

pub async fn save_report(
    dir: &Path,
    response: &AnalysisResponse,
    date: NaiveDate,
) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(file_name(&response.fund_name, date));
    tokio::fs::write(&path, build_document(response))
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "Report saved");
    Ok(path)
}
