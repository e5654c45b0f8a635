//! Text processing for the generated markdown: heading cleanup and splitting
//! the final report into its `## ` sections.

pub const NO_DATA: &str = "No data available";

const SECTION_MARKER: &str = "\n## ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLayout {
    /// Report with second-level headings, browsable one section at a time.
    Sections {
        preamble: Option<String>,
        sections: Vec<ReportSection>,
    },
    /// No usable headings; shown as one block.
    Single(String),
}

impl ReportLayout {
    pub fn section(&self, index: usize) -> Option<&ReportSection> {
        match self {
            ReportLayout::Sections { sections, .. } => sections.get(index),
            ReportLayout::Single(_) => None,
        }
    }

    pub fn section_titles(&self) -> Vec<&str> {
        match self {
            ReportLayout::Sections { sections, .. } => {
                sections.iter().map(|s| s.title.as_str()).collect()
            }
            ReportLayout::Single(_) => Vec::new(),
        }
    }
}

/// Splits a report on `## ` headings. Pieces with an empty title or no body
/// line are dropped. Falls back to [`ReportLayout::Single`] when nothing
/// usable remains.
pub fn split_report(report: &str) -> ReportLayout {
    let text = if report.starts_with("## ") {
        format!("\n{report}")
    } else {
        report.to_string()
    };

    let mut parts = text.split(SECTION_MARKER);
    let head = parts.next().unwrap_or_default().trim();

    let sections: Vec<ReportSection> = parts
        .filter_map(|part| {
            let (title, body) = part.split_once('\n')?;
            let title = title.trim();
            if title.is_empty() {
                return None;
            }
            Some(ReportSection {
                title: title.to_string(),
                body: format_markdown(body),
            })
        })
        .collect();

    if sections.is_empty() {
        return ReportLayout::Single(format_markdown(report));
    }

    ReportLayout::Sections {
        preamble: (!head.is_empty()).then(|| format_markdown(head)),
        sections,
    }
}

/// Collapses runs of blank lines to one and puts exactly one space after a
/// heading's `#` run. Blank input becomes [`NO_DATA`].
pub fn format_markdown(content: &str) -> String {
    if content.trim().is_empty() {
        return NO_DATA.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = false;

    for line in content.trim().lines() {
        if line.trim().is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
            continue;
        }
        previous_blank = false;
        lines.push(normalize_heading(line));
    }

    lines.join("\n")
}

fn normalize_heading(line: &str) -> String {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return line.to_string();
    }

    let text = line[level..].trim_start();
    if text.is_empty() {
        return line.to_string();
    }
    format!("{} {}", &line[..level], text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_preamble_and_sections() {
        let report = "# Investment Research Report\nIntro line.\n## Executive Summary\nBuy on dips.\n## Risk Assessment\nModerate risk.";
        let layout = split_report(report);

        match layout {
            ReportLayout::Sections { preamble, sections } => {
                assert_eq!(
                    preamble.as_deref(),
                    Some("# Investment Research Report\nIntro line.")
                );
                assert_eq!(sections.len(), 2);
                assert_eq!(sections[0].title, "Executive Summary");
                assert_eq!(sections[0].body, "Buy on dips.");
                assert_eq!(sections[1].title, "Risk Assessment");
                assert_eq!(sections[1].body, "Moderate risk.");
            }
            other => panic!("expected sections, got {other:?}"),
        }
    }

    #[test]
    fn test_split_report_starting_with_heading() {
        let layout = split_report("## Executive Summary\nHold.\n## Recommendation\nBuy.");
        assert_eq!(
            layout.section_titles(),
            vec!["Executive Summary", "Recommendation"]
        );
        match layout {
            ReportLayout::Sections { preamble, .. } => assert!(preamble.is_none()),
            other => panic!("expected sections, got {other:?}"),
        }
    }

    #[test]
    fn test_split_without_marker_is_single_block() {
        let layout = split_report("Error calling completion API: 503. Please try again.");
        assert_eq!(
            layout,
            ReportLayout::Single("Error calling completion API: 503. Please try again.".to_string())
        );
        assert!(layout.section(0).is_none());
    }

    #[test]
    fn test_split_skips_empty_title_and_bodiless_sections() {
        let report = "Intro\n## \nOrphan body\n## Title Only\n## Conclusion\nDone.";
        let layout = split_report(report);
        assert_eq!(layout.section_titles(), vec!["Conclusion"]);
        assert_eq!(layout.section(0).unwrap().body, "Done.");
    }

    #[test]
    fn test_split_with_only_unusable_sections_falls_back() {
        let layout = split_report("Intro\n## Heading without body");
        assert!(matches!(layout, ReportLayout::Single(text) if text.contains("Intro")));
    }

    #[test]
    fn test_split_empty_report() {
        assert_eq!(split_report(""), ReportLayout::Single(NO_DATA.to_string()));
    }

    #[test]
    fn test_section_with_empty_body_shows_no_data() {
        let layout = split_report("Intro\n## Outlook\n   ");
        assert_eq!(layout.section(0).unwrap().body, NO_DATA);
    }

    #[test]
    fn test_format_collapses_blank_runs() {
        let text = "First\n\n\n\nSecond\n \n\t\nThird";
        assert_eq!(format_markdown(text), "First\n\nSecond\n\nThird");
    }

    #[test]
    fn test_format_normalizes_headings() {
        assert_eq!(format_markdown("##Returns"), "## Returns");
        assert_eq!(format_markdown("###    Risk"), "### Risk");
        assert_eq!(format_markdown("# Title"), "# Title");
    }

    #[test]
    fn test_format_leaves_other_lines_alone() {
        assert_eq!(format_markdown("C# is not a heading"), "C# is not a heading");
        assert_eq!(format_markdown("#######too deep"), "#######too deep");
        assert_eq!(format_markdown("###"), "###");
    }

    #[test]
    fn test_format_blank_is_no_data() {
        assert_eq!(format_markdown("  \n\n "), NO_DATA);
    }
}
