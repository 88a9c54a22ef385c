use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{
    AnswerOutcome, FinishReason, Question, QuestionKind, QuizResult, QuizSession, SessionState,
};
use crate::services::report_service::grade;

/// A question as shown to the player: no correct answer attached.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub number: usize,
    pub total: usize,
    pub kind: QuestionKind,
    pub kind_label: &'static str,
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl QuestionView {
    pub fn new(question: &Question, index: usize, total: usize) -> Self {
        QuestionView {
            number: index + 1,
            total,
            kind: question.kind,
            kind_label: question.kind.label(),
            prompt: question.prompt.clone(),
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub score: u32,
    pub total: u32,
    pub accuracy: f64,
    pub grade: &'static str,
    pub completed_at: String,
}

impl From<&QuizResult> for ResultView {
    fn from(result: &QuizResult) -> Self {
        let accuracy = result.accuracy();
        ResultView {
            score: result.score,
            total: result.total,
            accuracy: (accuracy * 100.0).round() / 100.0,
            grade: grade(accuracy),
            completed_at: result.timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: Uuid,
    pub username: String,
    pub category: String,
    pub difficulty: String,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    pub answered: usize,
    pub total: usize,
    pub score: u32,
    pub remaining_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
}

impl From<&QuizSession> for SessionStatusResponse {
    fn from(session: &QuizSession) -> Self {
        let total = session.total();
        SessionStatusResponse {
            session_id: session.id,
            username: session.username.clone(),
            category: session.category.clone(),
            difficulty: session.difficulty.clone(),
            state: session.state(),
            finish_reason: session.finish_reason(),
            answered: session.current_index(),
            total,
            score: session.score(),
            remaining_seconds: session.remaining_seconds(),
            started_at: session.started_at(),
            question: session
                .current_question()
                .map(|q| QuestionView::new(q, session.current_index(), total)),
            result: session.result().map(ResultView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcomeResponse {
    pub correct: bool,
    pub correct_answer: String,
    pub finished: bool,
    pub score: u32,
    pub remaining_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
}

impl AnswerOutcomeResponse {
    pub fn new(outcome: AnswerOutcome, session: &QuizSession) -> Self {
        AnswerOutcomeResponse {
            correct: outcome.correct,
            correct_answer: outcome.correct_answer,
            finished: outcome.finished,
            score: session.score(),
            remaining_seconds: session.remaining_seconds(),
            next_question: session
                .current_question()
                .map(|q| QuestionView::new(q, session.current_index(), session.total())),
            result: session.result().map(ResultView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub content: String,
    pub characters: usize,
    pub sentences: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Answer;

    fn session() -> QuizSession {
        let mut session = QuizSession::new(
            "alice",
            "Java",
            "Easy",
            vec![
                Question::true_false("True or False: Java runs on the JVM.".to_string()),
                Question::fill_blank("Java uses _____ collection.".to_string(), "garbage".to_string()),
            ],
            120,
        );
        session.start().unwrap();
        session
    }

    #[test]
    fn test_question_view_hides_answer() {
        let view = QuestionView::new(&Question::fill_blank("x _____".into(), "secret".into()), 0, 1);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["number"], 1);
        assert!(json.get("correct_text").is_none());
        assert!(json.get("options").is_none());
        assert!(!json.to_string().contains("secret"));
    }

    #[test]
    fn test_status_shows_current_question() {
        let status = SessionStatusResponse::from(&session());
        assert_eq!(status.state, SessionState::InProgress);
        assert_eq!(status.total, 2);
        assert_eq!(status.question.as_ref().unwrap().kind, QuestionKind::TrueFalse);
        assert!(status.result.is_none());
    }

    #[test]
    fn test_answer_outcome_after_finish_has_result() {
        let mut session = session();
        session.submit_answer(&Answer::Choice(0)).unwrap();
        let outcome = session
            .submit_answer(&Answer::Text("nope".to_string()))
            .unwrap();
        let response = AnswerOutcomeResponse::new(outcome, &session);

        assert!(response.finished);
        assert!(!response.correct);
        assert_eq!(response.correct_answer, "garbage");
        assert!(response.next_question.is_none());
        let result = response.result.unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.accuracy, 50.0);
        assert_eq!(result.grade, "D (Pass)");
    }
}
