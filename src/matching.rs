use std::collections::HashSet;
use std::path::Path;

use crate::error::SourceError;
use crate::models::{MatchResult, ProgramProfile};

const REQUIRED_POINTS: f64 = 50.0;
const RECOMMENDED_POINTS: f64 = 50.0;

fn normalize(subject: &str) -> String {
    subject.trim().to_lowercase()
}

fn selection_set<S: AsRef<str>>(selected: &[S]) -> HashSet<String> {
    selected
        .iter()
        .map(|subject| normalize(subject.as_ref()))
        .filter(|subject| !subject.is_empty())
        .collect()
}

/// Percentage match of a subject selection against a program, or `None` when
/// any required subject is missing.
pub fn score<S: AsRef<str>>(selected: &[S], profile: &ProgramProfile) -> Option<f64> {
    evaluate(&selection_set(selected), profile).map(|result| result.percentage)
}

fn evaluate(selected: &HashSet<String>, profile: &ProgramProfile) -> Option<MatchResult> {
    let meets_required = profile
        .required
        .iter()
        .all(|subject| selected.contains(&normalize(subject)));
    if !meets_required {
        return None;
    }

    let (matched, missing): (Vec<&String>, Vec<&String>) = profile
        .recommended
        .iter()
        .partition(|subject| selected.contains(&normalize(subject)));

    let coverage = if profile.recommended.is_empty() {
        1.0
    } else {
        matched.len() as f64 / profile.recommended.len() as f64
    };

    Some(MatchResult {
        program: profile.name.clone(),
        faculty: profile.faculty.clone(),
        percentage: (REQUIRED_POINTS + RECOMMENDED_POINTS * coverage).clamp(0.0, 100.0),
        matched_recommended: matched.into_iter().cloned().collect(),
        missing_recommended: missing.into_iter().cloned().collect(),
    })
}

/// Eligible programs ordered by descending match; ties keep catalog order.
pub fn rank<S: AsRef<str>>(selected: &[S], programs: &[ProgramProfile]) -> Vec<MatchResult> {
    let selected = selection_set(selected);
    let mut results: Vec<MatchResult> = programs
        .iter()
        .filter_map(|profile| evaluate(&selected, profile))
        .collect();
    results.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    results
}

/// Every program in catalog order with its score, ineligible ones included.
pub fn score_all<'a, S: AsRef<str>>(
    selected: &[S],
    programs: &'a [ProgramProfile],
) -> Vec<(&'a ProgramProfile, Option<f64>)> {
    programs
        .iter()
        .map(|profile| (profile, score(selected, profile)))
        .collect()
}

pub fn load_programs(path: &Path) -> Result<Vec<ProgramProfile>, SourceError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(name: &str, required: &[&str], recommended: &[&str]) -> ProgramProfile {
        ProgramProfile {
            name: name.to_string(),
            faculty: "Sciences".to_string(),
            required: required.iter().map(|s| s.to_string()).collect(),
            recommended: recommended.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn partial_recommended_coverage_scales_linearly() {
        let medicine = program(
            "Medicine",
            &["biology", "chemistry"],
            &["mathematics", "physics"],
        );
        let selected = ["biology", "chemistry", "mathematics"];
        assert_eq!(score(&selected, &medicine), Some(75.0));
    }

    #[test]
    fn missing_required_subject_is_ineligible() {
        let medicine = program("Medicine", &["biology", "chemistry"], &["physics"]);
        assert_eq!(score(&["biology", "physics"], &medicine), None);
    }

    #[test]
    fn subjects_compare_ignoring_case_and_whitespace() {
        let law = program("Law", &["English"], &["History", "Literature"]);
        assert_eq!(score(&[" english ", "HISTORY"], &law), Some(75.0));
    }

    #[test]
    fn empty_recommended_list_counts_as_full_coverage() {
        let arts = program("Fine Art", &["art"], &[]);
        assert_eq!(score(&["art"], &arts), Some(100.0));
        let open = program("General Studies", &[], &["english", "mathematics"]);
        assert_eq!(score::<&str>(&[], &open), Some(50.0));
    }

    #[test]
    fn rank_excludes_ineligible_and_orders_descending() {
        let programs = vec![
            program("Pharmacy", &["chemistry"], &["biology", "physics"]),
            program("Engineering", &["mathematics", "physics"], &["chemistry"]),
            program("Nursing", &["biology"], &["chemistry", "english"]),
            program("Biochemistry", &["chemistry", "biology"], &["mathematics", "physics"]),
        ];
        let selected = ["biology", "chemistry", "english"];

        let ranked = rank(&selected, &programs);
        let names: Vec<&str> = ranked.iter().map(|result| result.program.as_str()).collect();

        assert_eq!(names, vec!["Nursing", "Pharmacy", "Biochemistry"]);
        assert_eq!(ranked[0].percentage, 100.0);
        assert_eq!(ranked[1].percentage, 75.0);
        assert_eq!(ranked[2].percentage, 50.0);
        assert_eq!(ranked[1].missing_recommended, vec!["physics".to_string()]);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].percentage >= pair[1].percentage));
        assert!(ranked
            .iter()
            .all(|result| (0.0..=100.0).contains(&result.percentage)));
    }

    #[test]
    fn score_all_keeps_ineligible_programs_in_catalog_order() {
        let programs = vec![
            program("Engineering", &["mathematics", "physics"], &["chemistry"]),
            program("Nursing", &["biology"], &["chemistry", "english"]),
        ];
        let scored = score_all(&["biology", "english"], &programs);
        let rows: Vec<(&str, Option<f64>)> = scored
            .iter()
            .map(|(profile, percentage)| (profile.name.as_str(), *percentage))
            .collect();
        assert_eq!(rows, vec![("Engineering", None), ("Nursing", Some(75.0))]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let programs = vec![
            program("Geology", &["geography"], &["chemistry"]),
            program("Surveying", &["geography"], &["mathematics"]),
        ];
        let ranked = rank(&["geography"], &programs);
        let names: Vec<&str> = ranked.iter().map(|result| result.program.as_str()).collect();
        assert_eq!(names, vec!["Geology", "Surveying"]);
    }
}
