use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuizResult,
};

pub const RESULT_LOG_HEADER: [&str; 7] = [
    "username",
    "category",
    "difficulty",
    "score",
    "total",
    "accuracy_percent",
    "timestamp",
];

/// One row of the result log.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ResultLogEntry {
    pub username: String,
    pub category: String,
    pub difficulty: String,
    pub score: u32,
    pub total: u32,
    pub accuracy_percent: f64,
    pub timestamp: String,
}

impl From<&QuizResult> for ResultLogEntry {
    fn from(result: &QuizResult) -> Self {
        ResultLogEntry {
            username: result.username.clone(),
            category: result.category.clone(),
            difficulty: result.difficulty.clone(),
            score: result.score,
            total: result.total,
            accuracy_percent: result.accuracy(),
            timestamp: result.timestamp(),
        }
    }
}

impl ResultLogEntry {
    fn to_record(&self) -> [String; 7] {
        [
            self.username.clone(),
            self.category.clone(),
            self.difficulty.clone(),
            self.score.to_string(),
            self.total.to_string(),
            format!("{:.2}", self.accuracy_percent),
            self.timestamp.clone(),
        ]
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultLogRepository: Send + Sync {
    async fn append(&self, result: &QuizResult) -> AppResult<()>;
    async fn list(&self) -> AppResult<Vec<ResultLogEntry>>;
}

/// Append-only CSV file. One writer at a time.
pub struct CsvResultLogRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvResultLogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResultLogRepository for CsvResultLogRepository {
    async fn append(&self, result: &QuizResult) -> AppResult<()> {
        let _guard = self.lock.lock().await;

        let path = self.path.clone();
        let entry = ResultLogEntry::from(result);
        run_blocking(move || append_entry(&path, &entry)).await?;

        log::debug!(
            "Appended result for '{}' to {}",
            result.username,
            self.path.display()
        );
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<ResultLogEntry>> {
        let _guard = self.lock.lock().await;

        let path = self.path.clone();
        run_blocking(move || read_entries(&path)).await
    }
}

/// Runs file work on the blocking pool so the async workers keep serving.
async fn run_blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalError(format!("Result log task failed: {}", e)))?
}

fn append_entry(path: &Path, entry: &ResultLogEntry) -> AppResult<()> {
    let is_new = std::fs::metadata(path)
        .map(|m| m.len() == 0)
        .unwrap_or(true);
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if is_new {
        writer.write_record(RESULT_LOG_HEADER)?;
    }
    writer.write_record(entry.to_record())?;
    writer.flush()?;
    Ok(())
}

fn read_entries(path: &Path) -> AppResult<Vec<ResultLogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut entries = Vec::new();
    for (i, row) in reader.deserialize::<ResultLogEntry>().enumerate() {
        match row {
            Ok(entry) => entries.push(entry),
            Err(e) => log::warn!(
                "Skipping malformed row {} in {}: {}",
                i + 2,
                path.display(),
                e
            ),
        }
    }
    Ok(entries)
}
