use std::cmp::Ordering;

use crate::models::{SortKey, ViewRecord};

/// Returns a stably sorted copy of `records`. Sticky records always lead;
/// the comparator only orders within the sticky and non-sticky partitions.
pub fn apply<R: ViewRecord + Clone>(records: &[R], key: SortKey) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        b.is_sticky()
            .cmp(&a.is_sticky())
            .then_with(|| compare(a, b, key))
    });
    sorted
}

pub fn compare<R: ViewRecord>(a: &R, b: &R, key: SortKey) -> Ordering {
    match key {
        SortKey::TitleAsc => compare_titles(a.title(), b.title()),
        SortKey::TitleDesc => compare_titles(b.title(), a.title()),
        SortKey::Newest => missing_last(a.timestamp(), b.timestamp(), |a, b| b.cmp(a)),
        SortKey::Oldest => missing_last(a.timestamp(), b.timestamp(), |a, b| a.cmp(b)),
        SortKey::ScoreDesc => missing_last(a.score_ratio(), b.score_ratio(), |a, b| b.total_cmp(a)),
        SortKey::ScoreAsc => missing_last(a.score_ratio(), b.score_ratio(), |a, b| a.total_cmp(b)),
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn missing_last<T>(a: Option<T>, b: Option<T>, order: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => order(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Discussion, Grade, Record};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
    }

    fn grade(title: &str, score: f64, days: i64) -> Record {
        Record::Grade(Grade {
            id: Uuid::new_v4(),
            title: title.to_string(),
            course: "Mathematics".to_string(),
            category: "quiz".to_string(),
            score,
            total: 20.0,
            graded_at: t0() + Duration::days(days),
        })
    }

    fn discussion(title: &str, days: i64, sticky: bool) -> Record {
        Record::Discussion(Discussion {
            id: Uuid::new_v4(),
            title: title.to_string(),
            body: String::new(),
            course: "Physics".to_string(),
            author: "Zanele Dube".to_string(),
            tags: Vec::new(),
            replies: 0,
            created_at: t0() + Duration::days(days),
            sticky,
        })
    }

    fn titles(records: &[Record]) -> Vec<&str> {
        records.iter().map(|record| record.title()).collect()
    }

    const ALL_KEYS: [SortKey; 6] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::ScoreDesc,
        SortKey::ScoreAsc,
    ];

    #[test]
    fn title_and_recency_orders() {
        let records = vec![grade("Zebra", 10.0, 0), grade("Apple", 12.0, 1)];
        assert_eq!(titles(&apply(&records, SortKey::TitleAsc)), vec!["Apple", "Zebra"]);
        assert_eq!(titles(&apply(&records, SortKey::Newest)), vec!["Apple", "Zebra"]);
        assert_eq!(titles(&apply(&records, SortKey::Oldest)), vec!["Zebra", "Apple"]);
        assert_eq!(titles(&apply(&records, SortKey::TitleDesc)), vec!["Zebra", "Apple"]);
    }

    #[test]
    fn title_comparison_ignores_case_first() {
        let records = vec![grade("banana", 1.0, 0), grade("Apple", 1.0, 0), grade("apple", 1.0, 0)];
        assert_eq!(
            titles(&apply(&records, SortKey::TitleAsc)),
            vec!["Apple", "apple", "banana"]
        );
    }

    #[test]
    fn score_orders_by_ratio_and_keeps_ties_stable() {
        let records = vec![
            grade("Quiz 1", 15.0, 0),
            grade("Quiz 2", 19.0, 1),
            grade("Quiz 3", 15.0, 2),
        ];
        assert_eq!(
            titles(&apply(&records, SortKey::ScoreDesc)),
            vec!["Quiz 2", "Quiz 1", "Quiz 3"]
        );
        assert_eq!(
            titles(&apply(&records, SortKey::ScoreAsc)),
            vec!["Quiz 1", "Quiz 3", "Quiz 2"]
        );
    }

    #[test]
    fn unscored_records_sort_last_in_both_directions() {
        let records = vec![discussion("Notes", 0, false), grade("Quiz", 10.0, 0)];
        assert_eq!(titles(&apply(&records, SortKey::ScoreDesc)), vec!["Quiz", "Notes"]);
        assert_eq!(titles(&apply(&records, SortKey::ScoreAsc)), vec!["Quiz", "Notes"]);
    }

    #[test]
    fn sticky_records_lead_for_every_key() {
        let records = vec![
            discussion("Weekly thread", 5, false),
            discussion("Course rules", 0, true),
            discussion("Exam tips", 3, false),
            discussion("Office hours", 1, true),
        ];
        for key in ALL_KEYS {
            let sorted = apply(&records, key);
            let first_loose = sorted
                .iter()
                .position(|record| !record.is_sticky())
                .expect("non-sticky records present");
            assert!(sorted[first_loose..].iter().all(|record| !record.is_sticky()));
            assert_eq!(first_loose, 2, "sticky partition broken for {key:?}");
        }
        assert_eq!(
            titles(&apply(&records, SortKey::Newest)),
            vec!["Office hours", "Course rules", "Weekly thread", "Exam tips"]
        );
    }

    #[test]
    fn sorting_is_an_idempotent_permutation() {
        let records = vec![
            grade("Essay", 14.0, 2),
            discussion("Pinned", 1, true),
            grade("Lab", 18.0, 0),
            discussion("Question", 4, false),
            grade("essay", 14.0, 2),
        ];
        for key in ALL_KEYS {
            let once = apply(&records, key);
            assert_eq!(once.len(), records.len());
            for record in &records {
                assert_eq!(
                    once.iter().filter(|candidate| *candidate == record).count(),
                    records.iter().filter(|candidate| *candidate == record).count()
                );
            }
            assert_eq!(apply(&once, key), once, "not idempotent for {key:?}");
        }
    }

    #[test]
    fn input_is_left_untouched() {
        let records = vec![grade("B", 1.0, 0), grade("A", 2.0, 1)];
        let snapshot = records.clone();
        let _ = apply(&records, SortKey::TitleAsc);
        assert_eq!(records, snapshot);
    }
}
