use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

mod config;
mod db;
mod error;
mod filter;
mod format;
mod matching;
mod models;
mod report;
mod sample;
mod sort;
mod source;
mod telemetry;
mod view;

use config::{AppConfig, SourceKind};
use models::{DateWindow, FilterCriteria, ProgramProfile, RecordKind, SortKey};
use source::{CsvSource, DataSource, PgSource, ResolvedSource, SampleSource};

#[derive(Parser)]
#[command(name = "afrilearn-views")]
#[command(about = "Filtered, sorted and ranked dashboard views over AfriLearnHub records", long_about = None)]
struct Cli {
    /// Where records come from (defaults to AFRILEARN_SOURCE, then the sample catalog)
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,
    /// CSV export to read records from; implies --source csv
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Only include these record kinds (repeatable)
    #[arg(long, value_parser = parse_kind)]
    kind: Vec<RecordKind>,
    /// Case-insensitive text search
    #[arg(long)]
    search: Option<String>,
    /// Only include these categories (repeatable)
    #[arg(long)]
    category: Vec<String>,
    /// Only include these statuses (repeatable)
    #[arg(long)]
    status: Vec<String>,
    /// Only include records attached to this course
    #[arg(long)]
    course: Option<String>,
    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    until: Option<NaiveDate>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        let window = DateWindow {
            from: self.from,
            until: self.until,
        };
        FilterCriteria {
            search: self.search.clone(),
            kinds: self.kind.iter().copied().collect(),
            categories: self.category.iter().cloned().collect(),
            statuses: self.status.iter().cloned().collect(),
            course: self.course.clone(),
            window: (!window.is_open()).then_some(window),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load the sample catalog into Postgres
    Seed,
    /// Import records from a CSV export into Postgres
    Import {
        path: PathBuf,
    },
    /// Print a filtered and sorted record list
    List {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value_t = SortKey::Newest)]
        sort: SortKey,
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Emit JSON instead of text rows
        #[arg(long)]
        json: bool,
    },
    /// Rank degree programs for a set of subjects
    Match {
        #[arg(long = "subject", required = true)]
        subjects: Vec<String>,
        /// JSON program catalog (defaults to the built-in one)
        #[arg(long)]
        programs: Option<PathBuf>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// List every program in catalog order, ineligible ones included
        #[arg(long, conflicts_with = "json")]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown digest
    Report {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value_t = SortKey::Newest)]
        sort: SortKey,
        #[arg(long = "subject")]
        subjects: Vec<String>,
        #[arg(long)]
        programs: Option<PathBuf>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_kind(raw: &str) -> Result<RecordKind, String> {
    raw.parse().map_err(|err: models::UnknownKind| err.to_string())
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let database_url = config.require_database_url()?;
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")
}

async fn resolve_source(config: &AppConfig) -> anyhow::Result<ResolvedSource> {
    let source = match config.source {
        SourceKind::Sample => ResolvedSource::Sample(SampleSource),
        SourceKind::Csv => ResolvedSource::Csv(CsvSource {
            path: config.require_csv_path()?.clone(),
        }),
        SourceKind::Postgres => ResolvedSource::Postgres(PgSource {
            pool: connect(config).await?,
        }),
    };
    info!(source = %source.label(), "record source resolved");
    Ok(source)
}

fn load_programs(path: Option<&PathBuf>) -> anyhow::Result<Vec<ProgramProfile>> {
    match path {
        Some(path) => matching::load_programs(path)
            .with_context(|| format!("failed to load programs from {}", path.display())),
        None => Ok(sample::programs()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?.with_overrides(cli.source, cli.csv);
    telemetry::init(&config.log_level)?;

    match cli.command {
        Commands::InitDb => {
            let pool = connect(&config).await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect(&config).await?;
            let changed = db::seed(&pool).await?;
            println!("Seeded {changed} sample records.");
        }
        Commands::Import { path } => {
            let pool = connect(&config).await?;
            let inserted = db::import_csv(&pool, &path)
                .await
                .with_context(|| format!("failed to import {}", path.display()))?;
            println!("Imported {inserted} records from {}.", path.display());
        }
        Commands::List {
            filters,
            sort,
            limit,
            json,
        } => {
            let source = resolve_source(&config).await?;
            let records = source.fetch().await?;
            let views = view::build(&records, &filters.criteria(), sort, Utc::now());
            let shown: Vec<_> = views.into_iter().take(limit).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else if shown.is_empty() {
                println!("No records match these filters.");
            } else {
                for row in &shown {
                    println!("{}", report::render_row(row));
                }
            }
        }
        Commands::Match {
            subjects,
            programs,
            limit,
            all,
            json,
        } => {
            let programs = load_programs(programs.as_ref())?;
            if all {
                for (profile, percentage) in matching::score_all(&subjects, &programs) {
                    match percentage {
                        Some(percentage) => println!(
                            "- {} ({}) {:.0}% match",
                            profile.name, profile.faculty, percentage
                        ),
                        None => println!(
                            "- {} ({}) missing required subjects",
                            profile.name, profile.faculty
                        ),
                    }
                }
                return Ok(());
            }

            let ranked = matching::rank(&subjects, &programs);
            let shown: Vec<_> = ranked.into_iter().take(limit).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
                return Ok(());
            }

            if shown.is_empty() {
                println!("No programs accept this subject combination.");
                return Ok(());
            }

            println!("Programs ranked by subject match:");
            for result in &shown {
                println!(
                    "- {} ({}) {:.0}% match",
                    result.program, result.faculty, result.percentage
                );
            }
        }
        Commands::Report {
            filters,
            sort,
            subjects,
            programs,
            out,
        } => {
            let source = resolve_source(&config).await?;
            let records = source.fetch().await?;
            let criteria = filters.criteria();
            let views = view::build(&records, &criteria, sort, Utc::now());
            let matches = if subjects.is_empty() {
                None
            } else {
                let programs = load_programs(programs.as_ref())?;
                Some(matching::rank(&subjects, &programs))
            };
            let report = report::build_report(
                &source.label(),
                &criteria,
                &report::summarize_by_kind(&records),
                &views,
                matches.as_deref(),
            );
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
