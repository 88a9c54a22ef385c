use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{Answer, Question};
use crate::models::domain::quiz_result::QuizResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    InProgress,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Completed,
    TimedOut,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_seconds: u32 },
    Expired,
    Inactive,
}

/// One timed run over a fixed question list.
///
/// `Idle → InProgress → Finished`. Answers and ticks are only accepted while
/// `InProgress`, so whichever of the two ends the session first wins and the
/// other becomes a no-op.
#[derive(Clone, Debug)]
pub struct QuizSession {
    pub id: Uuid,
    pub username: String,
    pub category: String,
    pub difficulty: String,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    time_limit_seconds: u32,
    remaining_seconds: u32,
    state: SessionState,
    finish_reason: Option<FinishReason>,
    result: Option<QuizResult>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    pub fn new(
        username: &str,
        category: &str,
        difficulty: &str,
        questions: Vec<Question>,
        time_limit_seconds: u32,
    ) -> Self {
        QuizSession {
            id: Uuid::new_v4(),
            username: username.to_string(),
            category: category.to_string(),
            difficulty: difficulty.to_string(),
            questions,
            current_index: 0,
            score: 0,
            time_limit_seconds,
            remaining_seconds: time_limit_seconds,
            state: SessionState::Idle,
            finish_reason: None,
            result: None,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn start(&mut self) -> AppResult<()> {
        if self.state != SessionState::Idle {
            return Err(AppError::SessionInactive(format!(
                "Session {} has already been started",
                self.id
            )));
        }
        if self.questions.is_empty() {
            return Err(AppError::Generation(
                "A quiz needs at least one question".to_string(),
            ));
        }
        if self.time_limit_seconds == 0 {
            return Err(AppError::ValidationError(
                "Time limit must be at least one second".to_string(),
            ));
        }
        self.state = SessionState::InProgress;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    pub fn submit_answer(&mut self, answer: &Answer) -> AppResult<AnswerOutcome> {
        self.ensure_in_progress()?;

        let question = self.questions.get_mut(self.current_index).ok_or_else(|| {
            AppError::InternalError(format!(
                "Session {} has no question at index {}",
                self.id, self.current_index
            ))
        })?;
        let correct = question.grade(answer)?;
        let correct_answer = question.correct_answer().to_string();

        if correct {
            self.score += 1;
        }
        self.current_index += 1;
        if self.current_index >= self.questions.len() {
            self.finish(FinishReason::Completed);
        }

        Ok(AnswerOutcome {
            correct,
            correct_answer,
            finished: self.state == SessionState::Finished,
        })
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != SessionState::InProgress {
            return TickOutcome::Inactive;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.finish(FinishReason::TimedOut);
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            remaining_seconds: self.remaining_seconds,
        }
    }

    pub fn cancel(&mut self) -> AppResult<()> {
        if self.state == SessionState::Finished {
            return Err(AppError::SessionInactive(format!(
                "Session {} is already finished",
                self.id
            )));
        }
        self.finish(FinishReason::Cancelled);
        Ok(())
    }

    fn ensure_in_progress(&self) -> AppResult<()> {
        match self.state {
            SessionState::InProgress => Ok(()),
            SessionState::Idle => Err(AppError::SessionInactive(format!(
                "Session {} has not started",
                self.id
            ))),
            SessionState::Finished => Err(AppError::SessionInactive(format!(
                "Session {} is finished",
                self.id
            ))),
        }
    }

    fn finish(&mut self, reason: FinishReason) {
        self.state = SessionState::Finished;
        self.finish_reason = Some(reason);
        self.finished_at = Some(Utc::now());
        if reason != FinishReason::Cancelled {
            self.result = Some(QuizResult::new(
                &self.username,
                &self.category,
                &self.difficulty,
                self.questions.clone(),
                Local::now(),
            ));
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::InProgress
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    pub fn current_question(&self) -> Option<&Question> {
        if !self.is_active() {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Present once the session completed or timed out; never for a cancelled one.
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }
}
