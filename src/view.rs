use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::filter;
use crate::format;
use crate::models::{FilterCriteria, Record, RecordKind, SortKey, ViewRecord};
use crate::sort;

/// Display-ready row produced by the view pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    pub id: Uuid,
    pub kind: RecordKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    pub sticky: bool,
}

/// Filters, sorts and formats `records` for display.
pub fn build(
    records: &[Record],
    criteria: &FilterCriteria,
    key: SortKey,
    now: DateTime<Utc>,
) -> Vec<RecordView> {
    let filtered = filter::apply(records, criteria);
    let sorted = sort::apply(&filtered, key);
    debug!(
        total = records.len(),
        filtered = !criteria.is_empty(),
        matched = sorted.len(),
        sort = key.as_str(),
        "view computed"
    );
    sorted.iter().map(|record| present(record, now)).collect()
}

fn graded(score: f64, total: f64) -> Option<String> {
    if total > 0.0 {
        let percentage = score / total * 100.0;
        Some(format!(
            "{} ({})",
            format::percentage(score / total),
            format::letter_grade(percentage)
        ))
    } else {
        None
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn joined(parts: &[&str]) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

pub fn present(record: &Record, now: DateTime<Utc>) -> RecordView {
    let mut view = RecordView {
        id: record.id(),
        kind: record.kind(),
        title: record.title().to_string(),
        subtitle: None,
        status: record.status().and_then(non_empty),
        category: record.category().and_then(non_empty),
        when: record
            .timestamp()
            .map(|timestamp| format::relative_time(timestamp, now)),
        score: None,
        stipend: None,
        due: None,
        initials: None,
        sticky: record.is_sticky(),
    };

    match record {
        Record::Course(course) => {
            view.subtitle = non_empty(&course.instructor);
            view.score = Some(format!("{} complete", format::percentage(course.progress / 100.0)));
            view.initials = non_empty(&format::initials(&course.instructor));
        }
        Record::Assignment(assignment) => {
            view.subtitle = non_empty(&assignment.course);
            view.when = None;
            view.due = Some(format::due_label(assignment.due_at, now));
            view.score = assignment
                .score
                .and_then(|score| graded(score, assignment.total));
        }
        Record::Grade(grade) => {
            view.subtitle = non_empty(&grade.course);
            view.score = graded(grade.score, grade.total);
        }
        Record::Discussion(discussion) => {
            view.subtitle = non_empty(&discussion.course);
            view.score = Some(match discussion.replies {
                1 => "1 reply".to_string(),
                n => format!("{n} replies"),
            });
            view.initials = non_empty(&format::initials(&discussion.author));
        }
        Record::Internship(internship) => {
            view.subtitle = joined(&[internship.company.as_str(), internship.location.as_str()]);
            view.stipend = Some(format::stipend(internship.stipend, &internship.currency));
            view.due = internship
                .deadline
                .map(|deadline| format::due_label(Some(deadline), now));
        }
        Record::Mentor(mentor) => {
            view.subtitle = Some(mentor.expertise.join(", ")).filter(|value| !value.is_empty());
            view.score = Some(format!("{:.1}/5", mentor.rating));
            view.initials = non_empty(&format::initials(&mentor.name));
        }
        Record::Application(application) => {
            view.subtitle = joined(&[application.university.as_str(), application.country.as_str()]);
            if application.submitted_at.is_none() {
                view.when = Some("Not submitted".to_string());
            }
        }
    }

    view
}
