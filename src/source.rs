use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db;
use crate::error::SourceError;
use crate::models::{
    Application, Assignment, Course, Discussion, Grade, Internship, Mentor, Record, RecordKind,
};
use crate::sample;

/// Resolves the records a view is computed from. Implementations never
/// merge provenances.
pub trait DataSource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl DataSource for SampleSource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        sample::records()
    }
}

#[derive(Debug, Clone)]
pub struct CsvSource {
    pub path: PathBuf,
}

impl DataSource for CsvSource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        read_csv(&self.path)
    }
}

#[derive(Debug, Clone)]
pub struct PgSource {
    pub pool: PgPool,
}

impl DataSource for PgSource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        db::fetch_records(&self.pool).await
    }
}

/// The single provenance picked for a run.
#[derive(Debug, Clone)]
pub enum ResolvedSource {
    Sample(SampleSource),
    Csv(CsvSource),
    Postgres(PgSource),
}

impl ResolvedSource {
    pub fn label(&self) -> String {
        match self {
            Self::Sample(_) => "sample catalog".to_string(),
            Self::Csv(source) => format!("csv {}", source.path.display()),
            Self::Postgres(_) => "postgres".to_string(),
        }
    }
}

impl DataSource for ResolvedSource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        let records = match self {
            Self::Sample(source) => source.fetch().await?,
            Self::Csv(source) => source.fetch().await?,
            Self::Postgres(source) => source.fetch().await?,
        };
        info!(source = %self.label(), count = records.len(), "records fetched");
        Ok(records)
    }
}

/// Flat CSV export row. Columns shared by several kinds are reused, e.g.
/// `owner` is the instructor, author, company or university.
#[derive(Debug, Deserialize)]
struct CsvRow {
    kind: String,
    id: Option<Uuid>,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    status: Option<String>,
    course: Option<String>,
    owner: Option<String>,
    location: Option<String>,
    score: Option<f64>,
    total: Option<f64>,
    amount: Option<u32>,
    currency: Option<String>,
    occurred_at: Option<DateTime<Utc>>,
    due_at: Option<DateTime<Utc>>,
    sticky: Option<bool>,
    tags: Option<String>,
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<Record, SourceError> {
        let kind: RecordKind = self
            .kind
            .parse()
            .map_err(|source| SourceError::UnknownKind { row, source })?;
        let missing = |field: &'static str| SourceError::MissingField { row, kind, field };

        let id = self.id.unwrap_or_else(Uuid::new_v4);
        let title = self
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| missing("title"))?;
        let text = |value: Option<String>| value.unwrap_or_default();
        let tags: Vec<String> = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        let record = match kind {
            RecordKind::Course => Record::Course(Course {
                id,
                title,
                description: text(self.description),
                category: text(self.category),
                instructor: text(self.owner),
                status: text(self.status),
                progress: self.score.unwrap_or(0.0),
                starts_at: self.occurred_at.ok_or_else(|| missing("occurred_at"))?,
                tags,
            }),
            RecordKind::Assignment => Record::Assignment(Assignment {
                id,
                title,
                description: text(self.description),
                course: text(self.course),
                status: text(self.status),
                due_at: self.due_at.or(self.occurred_at),
                score: self.score,
                total: self.total.unwrap_or(100.0),
            }),
            RecordKind::Grade => Record::Grade(Grade {
                id,
                title,
                course: text(self.course),
                category: text(self.category),
                score: self.score.ok_or_else(|| missing("score"))?,
                total: self.total.unwrap_or(100.0),
                graded_at: self.occurred_at.ok_or_else(|| missing("occurred_at"))?,
            }),
            RecordKind::Discussion => Record::Discussion(Discussion {
                id,
                title,
                body: text(self.description),
                course: text(self.course),
                author: text(self.owner),
                tags,
                replies: self.amount.unwrap_or(0),
                created_at: self.occurred_at.ok_or_else(|| missing("occurred_at"))?,
                sticky: self.sticky.unwrap_or(false),
            }),
            RecordKind::Internship => Record::Internship(Internship {
                id,
                title,
                company: self.owner.ok_or_else(|| missing("owner"))?,
                location: text(self.location),
                category: text(self.category),
                status: text(self.status),
                stipend: self.amount,
                currency: text(self.currency),
                posted_at: self.occurred_at.ok_or_else(|| missing("occurred_at"))?,
                deadline: self.due_at,
            }),
            RecordKind::Mentor => Record::Mentor(Mentor {
                id,
                name: title,
                bio: text(self.description),
                expertise: tags,
                rating: self.score.unwrap_or(0.0),
                status: text(self.status),
                joined_at: self.occurred_at.ok_or_else(|| missing("occurred_at"))?,
            }),
            RecordKind::Application => Record::Application(Application {
                id,
                university: self.owner.ok_or_else(|| missing("owner"))?,
                program: title,
                country: text(self.location),
                status: text(self.status),
                submitted_at: self.occurred_at,
            }),
        };

        Ok(record)
    }
}

/// Reads a CSV export into records. Row numbers in errors are 1-based and
/// count the header line.
pub fn read_csv(path: &Path) -> Result<Vec<Record>, SourceError> {
    let file = std::fs::File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file)
}

fn parse_csv<R: std::io::Read>(input: R) -> Result<Vec<Record>, SourceError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        records.push(row.into_record(index + 2)?);
    }

    debug!(count = records.len(), "csv rows converted");
    Ok(records)
}
