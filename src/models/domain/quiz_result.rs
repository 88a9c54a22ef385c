use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::domain::question::Question;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Snapshot of a finished session. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub username: String,
    pub category: String,
    pub difficulty: String,
    pub score: u32,
    pub total: u32,
    pub completed_at: DateTime<Local>,
    pub questions: Vec<Question>,
}

impl QuizResult {
    pub fn new(
        username: &str,
        category: &str,
        difficulty: &str,
        questions: Vec<Question>,
        completed_at: DateTime<Local>,
    ) -> Self {
        let score = questions.iter().filter(|q| q.is_correct).count() as u32;
        QuizResult {
            username: username.to_string(),
            category: category.to_string(),
            difficulty: difficulty.to_string(),
            score,
            total: questions.len() as u32,
            completed_at,
            questions,
        }
    }

    /// Percentage of correct answers; zero for an empty quiz.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 * 100.0 / self.total as f64
    }

    pub fn timestamp(&self) -> String {
        self.completed_at.format(TIMESTAMP_FORMAT).to_string()
    }
}
