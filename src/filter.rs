use std::collections::BTreeSet;

use crate::models::{FilterCriteria, ViewRecord};

/// Returns the records matching every active criterion, in input order.
pub fn apply<R: ViewRecord + Clone>(records: &[R], criteria: &FilterCriteria) -> Vec<R> {
    let needle = criteria
        .search
        .as_deref()
        .map(str::trim)
        .filter(|search| !search.is_empty())
        .map(str::to_lowercase);
    let categories = lowercase_set(&criteria.categories);
    let statuses = lowercase_set(&criteria.statuses);
    let course = criteria
        .course
        .as_deref()
        .map(str::trim)
        .filter(|course| !course.is_empty())
        .map(str::to_lowercase);

    records
        .iter()
        .filter(|record| criteria.kinds.is_empty() || criteria.kinds.contains(&record.kind()))
        .filter(|record| {
            needle
                .as_deref()
                .map_or(true, |needle| matches_search(*record, needle))
        })
        .filter(|record| member_of(record.category(), &categories))
        .filter(|record| member_of(record.status(), &statuses))
        .filter(|record| {
            course.as_deref().map_or(true, |course| {
                record
                    .course()
                    .is_some_and(|value| value.trim().to_lowercase() == course)
            })
        })
        .filter(|record| {
            criteria
                .window
                .filter(|window| !window.is_open())
                .map_or(true, |window| {
                    record
                        .timestamp()
                        .is_some_and(|at| window.contains(at.date_naive()))
                })
        })
        .cloned()
        .collect()
}

fn matches_search<R: ViewRecord>(record: &R, needle: &str) -> bool {
    record
        .searchable_text()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn member_of(value: Option<&str>, allowed: &BTreeSet<String>) -> bool {
    if allowed.is_empty() {
        return true;
    }
    value.is_some_and(|value| allowed.contains(&value.trim().to_lowercase()))
}

fn lowercase_set(values: &BTreeSet<String>) -> BTreeSet<String> {
    values
        .iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}
