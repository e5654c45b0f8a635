use chrono::Local;

use super::render::{ReportLayout, format_markdown, split_report};
use crate::models::AnalysisResponse;
use crate::pipeline::AnalysisField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Fund,
    Sentiment,
    Macro,
    FinalReport,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Fund, Tab::Sentiment, Tab::Macro, Tab::FinalReport];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Fund => "📊 Fund Analysis",
            Tab::Sentiment => "💭 Sentiment Analysis",
            Tab::Macro => "🌍 Macroeconomic Analysis",
            Tab::FinalReport => "📋 Final Report",
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            Tab::Fund => "Fund Performance & Details",
            Tab::Sentiment => "Market Sentiment & News",
            Tab::Macro => "Economic Environment",
            Tab::FinalReport => "Comprehensive Investment Report",
        }
    }

    fn field(&self) -> AnalysisField {
        match self {
            Tab::Fund => AnalysisField::FundAnalysis,
            Tab::Sentiment => AnalysisField::SentimentAnalysis,
            Tab::Macro => AnalysisField::MacroAnalysis,
            Tab::FinalReport => AnalysisField::FinalReport,
        }
    }

    fn content<'a>(&self, response: &'a AnalysisResponse) -> &'a str {
        let analysis = &response.analysis;
        match self {
            Tab::Fund => &analysis.fund_analysis,
            Tab::Sentiment => &analysis.sentiment_analysis,
            Tab::Macro => &analysis.macro_analysis,
            Tab::FinalReport => &analysis.final_report,
        }
    }

    /// Menu keys `1` to `4`.
    pub fn from_key(key: &str) -> Option<Tab> {
        match key {
            "1" => Some(Tab::Fund),
            "2" => Some(Tab::Sentiment),
            "3" => Some(Tab::Macro),
            "4" => Some(Tab::FinalReport),
            _ => None,
        }
    }
}

pub fn render_banner(response: &AnalysisResponse) -> String {
    let local_time = response.timestamp.with_timezone(&Local);
    let mut out = format!(
        "✅ Analysis completed successfully!\n\nFund Analyzed: {}\nAnalysis Time: {}",
        response.fund_name,
        local_time.format("%Y-%m-%d %H:%M:%S"),
    );

    if !response.degraded_fields.is_empty() {
        let labels: Vec<&str> = Tab::ALL
            .iter()
            .filter(|tab| response.degraded_fields.contains(&tab.field()))
            .map(|tab| tab.label())
            .collect();
        out.push_str(&format!(
            "\n⚠️  Some sections could not be generated: {}",
            labels.join(", ")
        ));
    }
    out
}

pub fn render_tab(tab: Tab, response: &AnalysisResponse) -> String {
    let content = tab.content(response);
    let mut out = format!("━━━ {} ━━━\n### {}\n\n", tab.label(), tab.heading());

    if content.trim().is_empty() {
        out.push_str(&format!(
            "⚠️  No {} data available",
            tab.heading().to_lowercase()
        ));
        return out;
    }

    if tab != Tab::FinalReport {
        out.push_str(&format_markdown(content));
        return out;
    }

    match split_report(content) {
        ReportLayout::Single(text) => out.push_str(&text),
        ReportLayout::Sections { preamble, sections } => {
            if let Some(preamble) = preamble {
                out.push_str(&preamble);
                out.push_str("\n\n");
            }
            out.push_str("Report sections:\n");
            for (i, section) in sections.iter().enumerate() {
                out.push_str(&format!("  [r{}] {}\n", i + 1, section.title));
            }
        }
    }
    out
}

/// Renders report section `number`, counted from 1 as shown in the menu.
pub fn render_report_section(response: &AnalysisResponse, number: usize) -> Option<String> {
    let layout = split_report(&response.analysis.final_report);
    let section = layout.section(number.checked_sub(1)?)?;
    Some(format!("━━━ {} ━━━\n\n{}", section.title, section.body))
}

pub fn render_menu(response: &AnalysisResponse) -> String {
    let tabs: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("[{}] {}", i + 1, tab.label()))
        .collect();
    let mut menu = tabs.join("  ");

    let titles = split_report(&response.analysis.final_report).section_titles().len();
    if titles > 0 {
        menu.push_str(&format!("\n[r1-r{titles}] Report section"));
    }
    menu.push_str("\n[d] 📥 Download Full Report  [n] New analysis  [q] Quit");
    menu
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::AnalysisResult;
    use chrono::Utc;

    fn response(final_report: &str, sentiment: &str) -> AnalysisResponse {
        AnalysisResponse {
            status: "success".to_string(),
            fund_name: "Axis Bluechip Fund".to_string(),
            analysis: AnalysisResult {
                fund_analysis: "##Overview\n\n\n\nLarge cap fund.".to_string(),
                sentiment_analysis: sentiment.to_string(),
                macro_analysis: "Rates stable.".to_string(),
                final_report: final_report.to_string(),
            },
            degraded_fields: vec![],
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_tab_keys() {
        assert_eq!(Tab::from_key("1"), Some(Tab::Fund));
        assert_eq!(Tab::from_key("4"), Some(Tab::FinalReport));
        assert_eq!(Tab::from_key("5"), None);
    }

    #[test]
    fn test_render_tab_formats_markdown() {
        let out = render_tab(Tab::Fund, &response("Report", "Positive"));
        assert!(out.contains("Fund Performance & Details"));
        assert!(out.contains("## Overview\n\nLarge cap fund."));
    }

    #[test]
    fn test_render_tab_empty_content_warns() {
        let out = render_tab(Tab::Sentiment, &response("Report", ""));
        assert!(out.contains("No market sentiment & news data available"));
    }

    #[test]
    fn test_final_report_lists_sections() {
        let r = response("Preface\n## Executive Summary\nHold.\n## Risk Assessment\nLow.", "x");
        let out = render_tab(Tab::FinalReport, &r);
        assert!(out.contains("Preface"));
        assert!(out.contains("[r1] Executive Summary"));
        assert!(out.contains("[r2] Risk Assessment"));

        let section = render_report_section(&r, 2).unwrap();
        assert!(section.contains("Risk Assessment"));
        assert!(section.ends_with("Low."));
        assert!(render_report_section(&r, 0).is_none());
        assert!(render_report_section(&r, 3).is_none());
    }

    #[test]
    fn test_final_report_without_sections_is_one_block() {
        let r = response("Service temporarily unavailable. Please try again later.", "x");
        let out = render_tab(Tab::FinalReport, &r);
        assert!(out.ends_with("Service temporarily unavailable. Please try again later."));
        assert!(!render_menu(&r).contains("[r1"));
    }

    #[test]
    fn test_banner_mentions_degraded_sections() {
        let mut r = response("Report", "Service temporarily unavailable. Please try again later.");
        assert!(!render_banner(&r).contains("could not be generated"));

        r.degraded_fields = vec![AnalysisField::SentimentAnalysis];
        let banner = render_banner(&r);
        assert!(banner.contains("Axis Bluechip Fund"));
        assert!(banner.contains("Sentiment Analysis"));
    }
}
