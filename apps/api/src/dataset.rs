//! Dataset Index: the job/skill reference table, loaded once at startup and
//! shared read-only across requests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Returned by `reference_skills_for` when no record matches.
pub const ANY_SKILLS: &str = "Any";

const ROLE_COLUMN: &str = "Job Roles";
const SKILLS_COLUMN: &str = "Resume";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset source unavailable at {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset is missing the '{0}' column")]
    MissingColumn(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Job Roles")]
    pub job_role: String,
    /// Comma-separated free text. Empty cells load as "".
    #[serde(rename = "Resume", default)]
    pub reference_skills: String,
}

#[derive(Debug, Default)]
pub struct DatasetIndex {
    records: Vec<JobRecord>,
}

impl DatasetIndex {
    pub fn from_records(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    /// Loads the index from a CSV file. Any failure degrades to an empty index
    /// with a single warning; startup is never blocked on the dataset.
    pub fn load(path: &Path) -> Self {
        match read_records(path) {
            Ok(records) => {
                info!(
                    "Loaded {} job records from {}",
                    records.len(),
                    path.display()
                );
                Self { records }
            }
            Err(e) => {
                warn!("{e}. Dataset-backed lookups will return empty results.");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique job roles in load order.
    pub fn job_roles(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.job_role.as_str()))
            .map(|r| r.job_role.clone())
            .collect()
    }

    /// Reference skills of the first record for `job_role`, or `"Any"`.
    pub fn reference_skills_for(&self, job_role: &str) -> &str {
        self.records
            .iter()
            .find(|r| r.job_role == job_role)
            .map(|r| r.reference_skills.as_str())
            .unwrap_or(ANY_SKILLS)
    }

    /// Returns the `n` best-matching job roles for the given skills.
    /// Ties keep load order. Scores live in a per-call vector; the index itself
    /// is never written to.
    pub fn top_matches(&self, user_skills: &[String], n: usize) -> Vec<String> {
        if self.records.is_empty() || user_skills.is_empty() {
            return Vec::new();
        }

        let user_set: HashSet<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();

        let mut scored: Vec<(usize, &JobRecord)> = self
            .records
            .iter()
            .map(|r| (score_against(&r.reference_skills, &user_set), r))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(n)
            .map(|(_, r)| r.job_role.clone())
            .collect()
    }
}

/// Size of the case-insensitive intersection between comma-separated job skills
/// and the user's skill set. `user_skills` is expected to be lowercased already.
pub fn score_against(job_skills_text: &str, user_skills: &HashSet<String>) -> usize {
    job_skills_text
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .collect::<HashSet<_>>()
        .iter()
        .filter(|s| user_skills.contains(s.as_str()))
        .count()
}

fn read_records(path: &Path) -> Result<Vec<JobRecord>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    for column in [ROLE_COLUMN, SKILLS_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize::<JobRecord>() {
        match result {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} malformed rows in {}", skipped, path.display());
    }

    Ok(records)
}
