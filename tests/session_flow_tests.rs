use std::path::PathBuf;
use std::sync::Arc;

use quizforge_server::models::domain::{Answer, FinishReason, SessionState};
use quizforge_server::models::dto::request::{ManualQuestionRequest, ManualQuizRequest};
use quizforge_server::repositories::{CsvResultLogRepository, ResultLogRepository};
use quizforge_server::services::{QuizService, SessionService};
use quizforge_server::engine::Vocabulary;

struct TempCsv(PathBuf);

impl Drop for TempCsv {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn temp_csv() -> TempCsv {
    TempCsv(std::env::temp_dir().join(format!("flow_results_{}.csv", uuid::Uuid::new_v4())))
}

fn manual(question: &str, correct_index: usize) -> ManualQuestionRequest {
    ManualQuestionRequest {
        question: question.to_string(),
        options: vec![
            "Alpha".to_string(),
            "Beta".to_string(),
            "Gamma".to_string(),
            "Delta".to_string(),
        ],
        correct_index,
    }
}

#[actix_rt::test]
async fn test_manual_quiz_is_logged_to_csv() {
    let file = temp_csv();
    let log: Arc<dyn ResultLogRepository> = Arc::new(CsvResultLogRepository::new(&file.0));
    let quizzes = QuizService::new(Arc::new(Vocabulary::default()), Some(9));
    let sessions = SessionService::new(Arc::clone(&log));

    let prepared = quizzes
        .prepare_manual_quiz(ManualQuizRequest {
            questions: vec![manual("First letter?", 0), manual("Third letter?", 2)],
        })
        .unwrap();
    assert_eq!(prepared.time_limit_seconds, 120);

    let session = sessions.start("alice", prepared).await.unwrap();
    let mut answered = 0;
    while let Some(question) = sessions
        .get(session.id, "alice")
        .await
        .unwrap()
        .current_question()
        .cloned()
    {
        let index = question.correct_index.unwrap();
        let (outcome, _) = sessions
            .submit(session.id, "alice", &Answer::Choice(index))
            .await
            .unwrap();
        answered += 1;
        if outcome.finished {
            break;
        }
    }
    assert_eq!(answered, 2);

    let finished = sessions.get(session.id, "alice").await.unwrap();
    assert_eq!(finished.state(), SessionState::Finished);
    assert_eq!(finished.finish_reason(), Some(FinishReason::Completed));

    let entries = log.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].username, "alice");
    assert_eq!(entries[0].category, "Manual Quiz");
    assert_eq!(entries[0].score, 2);
    assert_eq!(entries[0].total, 2);

    let raw = std::fs::read_to_string(&file.0).unwrap();
    assert!(raw.starts_with("username,category,difficulty,score,total,accuracy_percent,timestamp"));
}

#[actix_rt::test]
async fn test_timed_out_session_counts_unanswered_as_wrong() {
    let file = temp_csv();
    let log: Arc<dyn ResultLogRepository> = Arc::new(CsvResultLogRepository::new(&file.0));
    let quizzes = QuizService::new(Arc::new(Vocabulary::default()), Some(9));
    let sessions = SessionService::new(Arc::clone(&log));

    let mut prepared = quizzes
        .prepare_manual_quiz(ManualQuizRequest {
            questions: vec![manual("Second letter?", 1), manual("Fourth letter?", 3)],
        })
        .unwrap();
    prepared.time_limit_seconds = 3;
    let session = sessions.start("bob", prepared).await.unwrap();

    let first = session.current_question().unwrap().correct_index.unwrap();
    sessions
        .submit(session.id, "bob", &Answer::Choice(first))
        .await
        .unwrap();

    let mut expired = 0;
    for _ in 0..3 {
        expired += sessions.tick_all().await;
    }
    assert_eq!(expired, 1);

    let result = sessions.result(session.id, "bob").await.unwrap();
    assert_eq!(result.score, 1);
    assert_eq!(result.total, 2);
    assert!(result.questions[1].user_answer.is_none());

    let entries = log.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].accuracy_percent, 50.0);
}
