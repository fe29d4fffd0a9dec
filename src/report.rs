use std::fmt::Write;

use crate::models::{FilterCriteria, KindSummary, MatchResult, Record, RecordKind, ViewRecord};
use crate::view::RecordView;

pub fn summarize_by_kind(records: &[Record]) -> Vec<KindSummary> {
    let mut map: std::collections::HashMap<RecordKind, (usize, f64, usize)> =
        std::collections::HashMap::new();

    for record in records {
        let entry = map.entry(record.kind()).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Some(ratio) = record.score_ratio() {
            entry.1 += ratio;
            entry.2 += 1;
        }
    }

    let mut summaries: Vec<KindSummary> = map
        .into_iter()
        .map(|(kind, (count, total_ratio, scored))| KindSummary {
            kind,
            count,
            avg_score: if scored == 0 {
                None
            } else {
                Some(total_ratio / scored as f64)
            },
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.kind.cmp(&b.kind)));
    summaries
}

fn describe_filters(criteria: &FilterCriteria) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(search) = criteria.search.as_deref().filter(|s| !s.trim().is_empty()) {
        parts.push(format!("search \"{}\"", search.trim()));
    }
    if !criteria.kinds.is_empty() {
        let kinds: Vec<&str> = criteria.kinds.iter().map(|kind| kind.as_str()).collect();
        parts.push(format!("kind {}", kinds.join("/")));
    }
    if !criteria.categories.is_empty() {
        let categories: Vec<&str> = criteria.categories.iter().map(String::as_str).collect();
        parts.push(format!("category {}", categories.join("/")));
    }
    if !criteria.statuses.is_empty() {
        let statuses: Vec<&str> = criteria.statuses.iter().map(String::as_str).collect();
        parts.push(format!("status {}", statuses.join("/")));
    }
    if let Some(course) = criteria.course.as_deref().filter(|s| !s.trim().is_empty()) {
        parts.push(format!("course \"{}\"", course.trim()));
    }
    if let Some(window) = criteria.window.filter(|window| !window.is_open()) {
        let from = window.from.map_or("…".to_string(), |date| date.to_string());
        let until = window.until.map_or("…".to_string(), |date| date.to_string());
        parts.push(format!("dates {from} to {until}"));
    }
    parts
}

pub fn build_report(
    label: &str,
    criteria: &FilterCriteria,
    summaries: &[KindSummary],
    views: &[RecordView],
    matches: Option<&[MatchResult]>,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# AfriLearnHub Dashboard Digest");
    let filters = describe_filters(criteria);
    if filters.is_empty() {
        let _ = writeln!(output, "Generated from {label} (no filters)");
    } else {
        let _ = writeln!(output, "Generated from {label} ({})", filters.join(", "));
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## Record Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No records available.");
    } else {
        for summary in summaries {
            match summary.avg_score {
                Some(avg) => {
                    let _ = writeln!(
                        output,
                        "- {}: {} records (avg score {:.0}%)",
                        summary.kind,
                        summary.count,
                        avg * 100.0
                    );
                }
                None => {
                    let _ = writeln!(output, "- {}: {} records", summary.kind, summary.count);
                }
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Matching Records");

    if views.is_empty() {
        let _ = writeln!(output, "No records match these filters.");
    } else {
        for view in views {
            let _ = writeln!(output, "{}", render_row(view));
        }
    }

    if let Some(matches) = matches {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Program Matches");

        if matches.is_empty() {
            let _ = writeln!(output, "No programs accept this subject combination.");
        } else {
            for result in matches {
                let _ = write!(
                    output,
                    "- {} ({}): {:.0}% match",
                    result.program, result.faculty, result.percentage
                );
                if !result.missing_recommended.is_empty() {
                    let _ = write!(output, ", consider {}", result.missing_recommended.join(", "));
                }
                let _ = writeln!(output);
            }
        }
    }

    output
}

/// One markdown bullet for a view row.
pub fn render_row(view: &RecordView) -> String {
    let mut line = String::from("- ");
    if view.sticky {
        line.push_str("(pinned) ");
    }
    let _ = write!(line, "[{}] {}", view.kind, view.title);

    let details: Vec<&str> = [
        view.subtitle.as_deref(),
        view.status.as_deref(),
        view.score.as_deref(),
        view.stipend.as_deref(),
        view.due.as_deref(),
        view.when.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !details.is_empty() {
        let _ = write!(line, " · {}", details.join(" · "));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching;
    use crate::models::SortKey;
    use crate::sample;
    use crate::view;
    use chrono::{TimeZone, Utc};

    #[test]
    fn summaries_average_only_scored_records() {
        let records = sample::records().expect("sample dates are valid");
        let summaries = summarize_by_kind(&records);

        assert_eq!(summaries.len(), RecordKind::ALL.len());
        assert_eq!(summaries[0].kind, RecordKind::Grade);
        assert_eq!(summaries[0].count, 5);

        let assignments = summaries
            .iter()
            .find(|summary| summary.kind == RecordKind::Assignment)
            .expect("assignments summarized");
        assert_eq!(assignments.count, 4);
        assert_eq!(assignments.avg_score, Some(0.88));

        let discussions = summaries
            .iter()
            .find(|summary| summary.kind == RecordKind::Discussion)
            .expect("discussions summarized");
        assert_eq!(discussions.avg_score, None);
    }

    #[test]
    fn report_lists_sections() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let records = sample::records().expect("sample dates are valid");
        let criteria = FilterCriteria {
            kinds: [RecordKind::Internship].into_iter().collect(),
            statuses: ["open".to_string()].into_iter().collect(),
            ..FilterCriteria::default()
        };
        let views = view::build(&records, &criteria, SortKey::Newest, now);
        let matches = matching::rank(&["mathematics", "physics"], &sample::programs());
        let report = build_report(
            "sample catalog",
            &criteria,
            &summarize_by_kind(&records),
            &views,
            Some(matches.as_slice()),
        );

        assert!(report.contains("# AfriLearnHub Dashboard Digest"));
        assert!(report.contains("Generated from sample catalog (kind internship, status open)"));
        assert!(report.contains("## Record Mix"));
        assert!(report.contains("- [internship] Junior data analyst intern · Safaricom, Nairobi"));
        assert!(report.contains("KES 25,000/month"));
        assert!(!report.contains("Software engineering intern"));
        assert!(report.contains("- BEng Civil Engineering (Engineering): 50% match"));
        assert!(report.contains("## Program Matches"));
    }

    #[test]
    fn empty_inputs_print_placeholders() {
        let report = build_report("postgres", &FilterCriteria::default(), &[], &[], Some(&[][..]));
        assert!(report.contains("(no filters)"));
        assert!(report.contains("No records available."));
        assert!(report.contains("No records match these filters."));
        assert!(report.contains("No programs accept this subject combination."));
    }
}
