use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Common view over every domain record so the filter and sort engines stay
/// generic instead of switching on page-specific shapes.
pub trait ViewRecord {
    fn id(&self) -> Uuid;
    fn kind(&self) -> RecordKind;
    fn title(&self) -> &str;
    /// Free-text fields matched by search, in display order.
    fn searchable_text(&self) -> Vec<&str>;
    fn category(&self) -> Option<&str> {
        None
    }
    fn status(&self) -> Option<&str> {
        None
    }
    fn course(&self) -> Option<&str> {
        None
    }
    /// Primary date used by chronological sorting and date windows.
    fn timestamp(&self) -> Option<DateTime<Utc>>;
    /// Numeric ratio in 0..=1 used by score sorting.
    fn score_ratio(&self) -> Option<f64> {
        None
    }
    fn is_sticky(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Course,
    Assignment,
    Grade,
    Discussion,
    Internship,
    Mentor,
    Application,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Course,
        RecordKind::Assignment,
        RecordKind::Grade,
        RecordKind::Discussion,
        RecordKind::Internship,
        RecordKind::Mentor,
        RecordKind::Application,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Assignment => "assignment",
            Self::Grade => "grade",
            Self::Discussion => "discussion",
            Self::Internship => "internship",
            Self::Mentor => "mentor",
            Self::Application => "application",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown record kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownKind(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub instructor: String,
    pub status: String,
    pub progress: f64,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub course: String,
    pub status: String,
    pub due_at: Option<DateTime<Utc>>,
    pub score: Option<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: Uuid,
    pub title: String,
    pub course: String,
    pub category: String,
    pub score: f64,
    pub total: f64,
    pub graded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub course: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub replies: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sticky: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Internship {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub status: String,
    pub stipend: Option<u32>,
    pub currency: String,
    pub posted_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    pub rating: f64,
    pub status: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub university: String,
    pub program: String,
    pub country: String,
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Course(Course),
    Assignment(Assignment),
    Grade(Grade),
    Discussion(Discussion),
    Internship(Internship),
    Mentor(Mentor),
    Application(Application),
}

fn ratio(score: f64, total: f64) -> Option<f64> {
    if total > 0.0 && score.is_finite() {
        Some(score / total)
    } else {
        None
    }
}

impl ViewRecord for Course {
    fn id(&self) -> Uuid {
        self.id
    }
    fn kind(&self) -> RecordKind {
        RecordKind::Course
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.instructor.as_str(),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
    fn course(&self) -> Option<&str> {
        Some(&self.title)
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.starts_at)
    }
    fn score_ratio(&self) -> Option<f64> {
        ratio(self.progress, 100.0)
    }
}

impl ViewRecord for Assignment {
    fn id(&self) -> Uuid {
        self.id
    }
    fn kind(&self) -> RecordKind {
        RecordKind::Assignment
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn searchable_text(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.course.as_str(),
        ]
    }
    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
    fn course(&self) -> Option<&str> {
        Some(&self.course)
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }
    fn score_ratio(&self) -> Option<f64> {
        self.score.and_then(|score| ratio(score, self.total))
    }
}

impl ViewRecord for Grade {
    fn id(&self) -> Uuid {
        self.id
    }
    fn kind(&self) -> RecordKind {
        RecordKind::Grade
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn searchable_text(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.course.as_str()]
    }
    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
    fn course(&self) -> Option<&str> {
        Some(&self.course)
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.graded_at)
    }
    fn score_ratio(&self) -> Option<f64> {
        ratio(self.score, self.total)
    }
}

impl ViewRecord for Discussion {
    fn id(&self) -> Uuid {
        self.id
    }
    fn kind(&self) -> RecordKind {
        RecordKind::Discussion
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.body.as_str(),
            self.author.as_str(),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
    fn course(&self) -> Option<&str> {
        Some(&self.course)
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
    fn is_sticky(&self) -> bool {
        self.sticky
    }
}

impl ViewRecord for Internship {
    fn id(&self) -> Uuid {
        self.id
    }
    fn kind(&self) -> RecordKind {
        RecordKind::Internship
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn searchable_text(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.company.as_str(),
            self.location.as_str(),
        ]
    }
    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.posted_at)
    }
}

impl ViewRecord for Mentor {
    fn id(&self) -> Uuid {
        self.id
    }
    fn kind(&self) -> RecordKind {
        RecordKind::Mentor
    }
    fn title(&self) -> &str {
        &self.name
    }
    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.bio.as_str()];
        fields.extend(self.expertise.iter().map(String::as_str));
        fields
    }
    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.joined_at)
    }
    fn score_ratio(&self) -> Option<f64> {
        ratio(self.rating, 5.0)
    }
}

impl ViewRecord for Application {
    fn id(&self) -> Uuid {
        self.id
    }
    fn kind(&self) -> RecordKind {
        RecordKind::Application
    }
    fn title(&self) -> &str {
        &self.program
    }
    fn searchable_text(&self) -> Vec<&str> {
        vec![
            self.program.as_str(),
            self.university.as_str(),
            self.country.as_str(),
        ]
    }
    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }
}

macro_rules! delegate {
    ($record:expr, $inner:ident => $body:expr) => {
        match $record {
            Record::Course($inner) => $body,
            Record::Assignment($inner) => $body,
            Record::Grade($inner) => $body,
            Record::Discussion($inner) => $body,
            Record::Internship($inner) => $body,
            Record::Mentor($inner) => $body,
            Record::Application($inner) => $body,
        }
    };
}

impl ViewRecord for Record {
    fn id(&self) -> Uuid {
        delegate!(self, inner => inner.id())
    }
    fn kind(&self) -> RecordKind {
        delegate!(self, inner => inner.kind())
    }
    fn title(&self) -> &str {
        delegate!(self, inner => inner.title())
    }
    fn searchable_text(&self) -> Vec<&str> {
        delegate!(self, inner => inner.searchable_text())
    }
    fn category(&self) -> Option<&str> {
        delegate!(self, inner => inner.category())
    }
    fn status(&self) -> Option<&str> {
        delegate!(self, inner => inner.status())
    }
    fn course(&self) -> Option<&str> {
        delegate!(self, inner => inner.course())
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        delegate!(self, inner => inner.timestamp())
    }
    fn score_ratio(&self) -> Option<f64> {
        delegate!(self, inner => inner.score_ratio())
    }
    fn is_sticky(&self) -> bool {
        delegate!(self, inner => inner.is_sticky())
    }
}

/// Inclusive calendar window; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.until.map_or(true, |until| date <= until)
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.until.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub kinds: BTreeSet<RecordKind>,
    pub categories: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
    pub course: Option<String>,
    pub window: Option<DateWindow>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search
            .as_deref()
            .map_or(true, |search| search.trim().is_empty())
            && self.kinds.is_empty()
            && self.categories.is_empty()
            && self.statuses.is_empty()
            && self
                .course
                .as_deref()
                .map_or(true, |course| course.trim().is_empty())
            && self.window.map_or(true, |window| window.is_open())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    #[value(name = "newest")]
    Newest,
    #[value(name = "oldest")]
    Oldest,
    #[value(name = "title-asc")]
    TitleAsc,
    #[value(name = "title-desc")]
    TitleDesc,
    #[value(name = "score-desc", alias = "grade-desc")]
    ScoreDesc,
    #[value(name = "score-asc", alias = "grade-asc")]
    ScoreAsc,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::ScoreDesc => "score-desc",
            Self::ScoreAsc => "score-asc",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "title-asc" => Ok(Self::TitleAsc),
            "title-desc" => Ok(Self::TitleDesc),
            "score-desc" | "grade-desc" => Ok(Self::ScoreDesc),
            "score-asc" | "grade-asc" => Ok(Self::ScoreAsc),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramProfile {
    pub name: String,
    pub faculty: String,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub recommended: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub program: String,
    pub faculty: String,
    pub percentage: f64,
    pub matched_recommended: Vec<String>,
    pub missing_recommended: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindSummary {
    pub kind: RecordKind,
    pub count: usize,
    pub avg_score: Option<f64>,
}
