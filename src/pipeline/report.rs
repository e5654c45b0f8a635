use serde::{Deserialize, Serialize};

use crate::llm::Completion;

/// The four text blocks of one analysis. Every field is always populated,
/// either with generated text or with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub fund_analysis: String,
    pub sentiment_analysis: String,
    pub macro_analysis: String,
    pub final_report: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisField {
    FundAnalysis,
    SentimentAnalysis,
    MacroAnalysis,
    FinalReport,
}

impl AnalysisField {
    pub const ALL: [AnalysisField; 4] = [
        AnalysisField::FundAnalysis,
        AnalysisField::SentimentAnalysis,
        AnalysisField::MacroAnalysis,
        AnalysisField::FinalReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisField::FundAnalysis => "fundAnalysis",
            AnalysisField::SentimentAnalysis => "sentimentAnalysis",
            AnalysisField::MacroAnalysis => "macroAnalysis",
            AnalysisField::FinalReport => "finalReport",
        }
    }
}

/// Output of [`super::Orchestrator::analyze`]: the result plus which slots
/// hold placeholders instead of generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub fund_name: String,
    pub result: AnalysisResult,
    pub degraded_fields: Vec<AnalysisField>,
}

impl Analysis {
    pub fn from_slots(
        fund_name: String,
        fund: Completion,
        sentiment: Completion,
        macro_: Completion,
        report: Completion,
    ) -> Self {
        let degraded_fields = AnalysisField::ALL
            .into_iter()
            .zip([&fund, &sentiment, &macro_, &report])
            .filter(|(_, completion)| completion.degraded)
            .map(|(field, _)| field)
            .collect();

        Self {
            fund_name,
            result: AnalysisResult {
                fund_analysis: fund.content,
                sentiment_analysis: sentiment.content,
                macro_analysis: macro_.content,
                final_report: report.content,
            },
            degraded_fields,
        }
    }
}
