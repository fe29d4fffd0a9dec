//! Built-in demo catalog used when no live source is configured and by
//! `seed` to populate a fresh database.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::error::SourceError;
use crate::models::{
    Application, Assignment, Course, Discussion, Grade, Internship, Mentor, ProgramProfile, Record,
};

fn at(year: i32, month: u32, day: u32, hour: u32) -> Result<DateTime<Utc>, SourceError> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .ok_or(SourceError::InvalidSampleDate {
            year,
            month,
            day,
            hour,
        })
}

fn id(value: u128) -> Uuid {
    Uuid::from_u128(0x5a4f_0000_0000_4000_8000_0000_0000_0000 | value)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub fn records() -> Result<Vec<Record>, SourceError> {
    let mut records = Vec::new();
    records.extend(courses()?);
    records.extend(assignments()?);
    records.extend(grades()?);
    records.extend(discussions()?);
    records.extend(internships()?);
    records.extend(mentors()?);
    records.extend(applications()?);
    Ok(records)
}

fn courses() -> Result<Vec<Record>, SourceError> {
    Ok(vec![
        Record::Course(Course {
            id: id(0x101),
            title: "Introduction to Data Science".to_string(),
            description: "Python, statistics and visualisation for beginners".to_string(),
            category: "Technology".to_string(),
            instructor: "Kwame Mensah".to_string(),
            status: "active".to_string(),
            progress: 65.0,
            starts_at: at(2026, 1, 12, 8)?,
            tags: strings(&["python", "statistics", "beginner"]),
        }),
        Record::Course(Course {
            id: id(0x102),
            title: "African History: Empires and Trade".to_string(),
            description: "From Mali and Songhai to the Swahili coast".to_string(),
            category: "Humanities".to_string(),
            instructor: "Amina Okafor".to_string(),
            status: "active".to_string(),
            progress: 30.0,
            starts_at: at(2026, 2, 2, 9)?,
            tags: strings(&["history", "trade"]),
        }),
        Record::Course(Course {
            id: id(0x103),
            title: "Organic Chemistry I".to_string(),
            description: "Structure, bonding and reaction mechanisms".to_string(),
            category: "Science".to_string(),
            instructor: "Thandiwe Nkosi".to_string(),
            status: "completed".to_string(),
            progress: 100.0,
            starts_at: at(2025, 9, 1, 8)?,
            tags: strings(&["chemistry", "lab"]),
        }),
        Record::Course(Course {
            id: id(0x104),
            title: "Entrepreneurship for Young Founders".to_string(),
            description: "Validating ideas, pricing and pitching to investors".to_string(),
            category: "Business".to_string(),
            instructor: "Chinedu Eze".to_string(),
            status: "upcoming".to_string(),
            progress: 0.0,
            starts_at: at(2026, 11, 3, 10)?,
            tags: strings(&["startup", "finance"]),
        }),
    ])
}

fn assignments() -> Result<Vec<Record>, SourceError> {
    Ok(vec![
        Record::Assignment(Assignment {
            id: id(0x201),
            title: "Exploratory analysis of rainfall data".to_string(),
            description: "Notebook with three charts and a short summary".to_string(),
            course: "Introduction to Data Science".to_string(),
            status: "pending".to_string(),
            due_at: Some(at(2026, 10, 24, 23)?),
            score: None,
            total: 100.0,
        }),
        Record::Assignment(Assignment {
            id: id(0x202),
            title: "Essay: the trans-Saharan gold trade".to_string(),
            description: "1500 words with at least four primary sources".to_string(),
            course: "African History: Empires and Trade".to_string(),
            status: "submitted".to_string(),
            due_at: Some(at(2026, 10, 10, 23)?),
            score: None,
            total: 50.0,
        }),
        Record::Assignment(Assignment {
            id: id(0x203),
            title: "Titration lab report".to_string(),
            description: "Report the molarity with uncertainty".to_string(),
            course: "Organic Chemistry I".to_string(),
            status: "graded".to_string(),
            due_at: Some(at(2025, 11, 14, 17)?),
            score: Some(44.0),
            total: 50.0,
        }),
        Record::Assignment(Assignment {
            id: id(0x204),
            title: "Reading reflection".to_string(),
            description: "Optional reflection on the weekly reading".to_string(),
            course: "African History: Empires and Trade".to_string(),
            status: "pending".to_string(),
            due_at: None,
            score: None,
            total: 10.0,
        }),
    ])
}

fn grades() -> Result<Vec<Record>, SourceError> {
    Ok(vec![
        Record::Grade(Grade {
            id: id(0x301),
            title: "Midterm exam".to_string(),
            course: "Organic Chemistry I".to_string(),
            category: "exam".to_string(),
            score: 78.0,
            total: 100.0,
            graded_at: at(2025, 10, 20, 12)?,
        }),
        Record::Grade(Grade {
            id: id(0x302),
            title: "Final exam".to_string(),
            course: "Organic Chemistry I".to_string(),
            category: "exam".to_string(),
            score: 91.0,
            total: 100.0,
            graded_at: at(2025, 12, 15, 12)?,
        }),
        Record::Grade(Grade {
            id: id(0x303),
            title: "Quiz 1: Python basics".to_string(),
            course: "Introduction to Data Science".to_string(),
            category: "quiz".to_string(),
            score: 17.0,
            total: 20.0,
            graded_at: at(2026, 2, 3, 15)?,
        }),
        Record::Grade(Grade {
            id: id(0x304),
            title: "Quiz 2: Descriptive statistics".to_string(),
            course: "Introduction to Data Science".to_string(),
            category: "quiz".to_string(),
            score: 11.0,
            total: 20.0,
            graded_at: at(2026, 3, 2, 15)?,
        }),
        Record::Grade(Grade {
            id: id(0x305),
            title: "Map exercise".to_string(),
            course: "African History: Empires and Trade".to_string(),
            category: "assignment".to_string(),
            score: 13.5,
            total: 20.0,
            graded_at: at(2026, 10, 1, 9)?,
        }),
    ])
}

fn discussions() -> Result<Vec<Record>, SourceError> {
    Ok(vec![
        Record::Discussion(Discussion {
            id: id(0x401),
            title: "Study group for the statistics quiz".to_string(),
            body: "Meeting in the library on Thursday at 4pm".to_string(),
            course: "Introduction to Data Science".to_string(),
            author: "Fatima Bello".to_string(),
            tags: strings(&["study-group"]),
            replies: 12,
            created_at: at(2026, 10, 16, 18)?,
            sticky: false,
        }),
        Record::Discussion(Discussion {
            id: id(0x402),
            title: "Course guidelines and office hours".to_string(),
            body: "Read before posting. Office hours are Mondays 2-4pm".to_string(),
            course: "African History: Empires and Trade".to_string(),
            author: "Amina Okafor".to_string(),
            tags: strings(&["announcement"]),
            replies: 3,
            created_at: at(2026, 2, 1, 9)?,
            sticky: true,
        }),
        Record::Discussion(Discussion {
            id: id(0x403),
            title: "Which sources cover Great Zimbabwe?".to_string(),
            body: "Looking for archaeology papers beyond the textbook".to_string(),
            course: "African History: Empires and Trade".to_string(),
            author: "Tendai Moyo".to_string(),
            tags: strings(&["sources", "question"]),
            replies: 5,
            created_at: at(2026, 10, 12, 11)?,
            sticky: false,
        }),
        Record::Discussion(Discussion {
            id: id(0x404),
            title: "Lab safety rules".to_string(),
            body: "Goggles and gloves are mandatory for every session".to_string(),
            course: "Organic Chemistry I".to_string(),
            author: "Thandiwe Nkosi".to_string(),
            tags: strings(&["announcement", "lab"]),
            replies: 0,
            created_at: at(2025, 9, 1, 7)?,
            sticky: true,
        }),
    ])
}

fn internships() -> Result<Vec<Record>, SourceError> {
    Ok(vec![
        Record::Internship(Internship {
            id: id(0x501),
            title: "Junior data analyst intern".to_string(),
            company: "Safaricom".to_string(),
            location: "Nairobi".to_string(),
            category: "Technology".to_string(),
            status: "open".to_string(),
            stipend: Some(25_000),
            currency: "KES".to_string(),
            posted_at: at(2026, 10, 5, 8)?,
            deadline: Some(at(2026, 11, 15, 23)?),
        }),
        Record::Internship(Internship {
            id: id(0x502),
            title: "Research assistant, public health".to_string(),
            company: "African Population and Health Research Center".to_string(),
            location: "Nairobi".to_string(),
            category: "Health".to_string(),
            status: "open".to_string(),
            stipend: None,
            currency: "KES".to_string(),
            posted_at: at(2026, 9, 22, 8)?,
            deadline: Some(at(2026, 10, 30, 23)?),
        }),
        Record::Internship(Internship {
            id: id(0x503),
            title: "Software engineering intern".to_string(),
            company: "Paystack".to_string(),
            location: "Lagos".to_string(),
            category: "Technology".to_string(),
            status: "closed".to_string(),
            stipend: Some(150_000),
            currency: "NGN".to_string(),
            posted_at: at(2026, 6, 1, 8)?,
            deadline: Some(at(2026, 7, 1, 23)?),
        }),
    ])
}

fn mentors() -> Result<Vec<Record>, SourceError> {
    Ok(vec![
        Record::Mentor(Mentor {
            id: id(0x601),
            name: "Dr. Ngozi Adeyemi".to_string(),
            bio: "Biomedical researcher mentoring pre-med students".to_string(),
            expertise: strings(&["medicine", "research", "biology"]),
            rating: 4.8,
            status: "available".to_string(),
            joined_at: at(2025, 4, 10, 9)?,
        }),
        Record::Mentor(Mentor {
            id: id(0x602),
            name: "Samuel Osei".to_string(),
            bio: "Backend engineer and open source maintainer".to_string(),
            expertise: strings(&["software", "career", "python"]),
            rating: 4.5,
            status: "busy".to_string(),
            joined_at: at(2026, 1, 18, 9)?,
        }),
        Record::Mentor(Mentor {
            id: id(0x603),
            name: "Lindiwe Dlamini".to_string(),
            bio: "Chartered accountant helping students with scholarships".to_string(),
            expertise: strings(&["finance", "scholarships"]),
            rating: 4.9,
            status: "available".to_string(),
            joined_at: at(2026, 8, 2, 9)?,
        }),
    ])
}

fn applications() -> Result<Vec<Record>, SourceError> {
    Ok(vec![
        Record::Application(Application {
            id: id(0x701),
            university: "University of Cape Town".to_string(),
            program: "BSc Computer Science".to_string(),
            country: "South Africa".to_string(),
            status: "submitted".to_string(),
            submitted_at: Some(at(2026, 9, 28, 14)?),
        }),
        Record::Application(Application {
            id: id(0x702),
            university: "University of Ghana".to_string(),
            program: "BSc Biochemistry".to_string(),
            country: "Ghana".to_string(),
            status: "accepted".to_string(),
            submitted_at: Some(at(2026, 6, 3, 10)?),
        }),
        Record::Application(Application {
            id: id(0x703),
            university: "Makerere University".to_string(),
            program: "Bachelor of Medicine and Surgery".to_string(),
            country: "Uganda".to_string(),
            status: "draft".to_string(),
            submitted_at: None,
        }),
    ])
}

fn program(name: &str, faculty: &str, required: &[&str], recommended: &[&str]) -> ProgramProfile {
    ProgramProfile {
        name: name.to_string(),
        faculty: faculty.to_string(),
        required: strings(required),
        recommended: strings(recommended),
    }
}

/// Degree programs offered for subject matching.
pub fn programs() -> Vec<ProgramProfile> {
    vec![
        program(
            "Bachelor of Medicine and Surgery",
            "Health Sciences",
            &["biology", "chemistry"],
            &["mathematics", "physics"],
        ),
        program(
            "BSc Computer Science",
            "Science",
            &["mathematics"],
            &["physics", "computer studies", "further mathematics"],
        ),
        program(
            "BEng Civil Engineering",
            "Engineering",
            &["mathematics", "physics"],
            &["chemistry", "technical drawing"],
        ),
        program(
            "BSc Biochemistry",
            "Science",
            &["chemistry", "biology"],
            &["mathematics"],
        ),
        program(
            "Bachelor of Laws",
            "Law",
            &["english"],
            &["history", "literature", "government"],
        ),
        program(
            "BCom Accounting",
            "Commerce",
            &["mathematics", "english"],
            &["economics", "accounting"],
        ),
        program(
            "BA Fine Art",
            "Humanities",
            &["fine art"],
            &[],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordKind, ViewRecord};
    use std::collections::HashSet;

    #[test]
    fn catalog_covers_every_kind_with_unique_ids() {
        let records = records().expect("sample dates are valid");
        let kinds: HashSet<RecordKind> = records.iter().map(|record| record.kind()).collect();
        assert_eq!(kinds.len(), RecordKind::ALL.len());

        let ids: HashSet<Uuid> = records.iter().map(|record| record.id()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn catalog_timestamps_are_real_dates() {
        assert!(records()
            .expect("sample dates are valid")
            .iter()
            .filter_map(|record| record.timestamp())
            .all(|timestamp| timestamp > DateTime::<Utc>::UNIX_EPOCH));
    }

    #[test]
    fn impossible_dates_are_reported() {
        let err = at(2026, 2, 30, 9).expect_err("february has no 30th");
        assert!(matches!(
            err,
            SourceError::InvalidSampleDate {
                month: 2,
                day: 30,
                ..
            }
        ));
        assert!(at(2026, 2, 28, 9).is_ok());
    }

    #[test]
    fn programs_have_unique_names() {
        let programs = programs();
        let names: HashSet<&str> = programs.iter().map(|program| program.name.as_str()).collect();
        assert_eq!(names.len(), programs.len());
    }
}
