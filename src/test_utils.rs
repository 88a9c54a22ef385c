#[cfg(test)]
pub mod fixtures {
    use std::{path::PathBuf, sync::Arc};

    use chrono::{Local, TimeZone};

    use crate::{
        app_state::AppState,
        config::Config,
        engine::Vocabulary,
        models::domain::{Answer, Question, QuizResult, User},
        repositories::{CsvResultLogRepository, JsonUserRepository},
    };

    /// Temporary files backing a test [`AppState`]; removed on drop.
    pub struct TempFiles(Vec<PathBuf>);

    impl Drop for TempFiles {
        fn drop(&mut self) {
            for path in &self.0 {
                let _ = std::fs::remove_file(path);
            }
        }
    }

    /// App state over throwaway user and result files.
    pub fn test_state() -> (AppState, TempFiles) {
        let dir = std::env::temp_dir();
        let id = uuid::Uuid::new_v4();
        let users_file = dir.join(format!("test_users_{}.json", id));
        let results_file = dir.join(format!("test_results_{}.csv", id));

        let mut config = Config::test_config();
        config.users_file = users_file.clone();
        config.results_file = results_file.clone();

        let users = JsonUserRepository::load(&users_file).unwrap();
        let state = AppState::with_repositories(
            config,
            Arc::new(Vocabulary::default()),
            Arc::new(users),
            Arc::new(CsvResultLogRepository::new(&results_file)),
        );
        (state, TempFiles(vec![users_file, results_file]))
    }

    /// `Authorization` header value for `username`.
    pub fn bearer(state: &AppState, username: &str) -> String {
        let token = state
            .jwt_service
            .create_token(&User::test_user(username))
            .unwrap();
        format!("Bearer {}", token)
    }

    /// A true/false quiz with the first `correct` of `total` answered right.
    pub fn finished_result(username: &str, correct: usize, total: usize) -> QuizResult {
        let questions = (0..total)
            .map(|i| {
                let mut question = Question::true_false(format!("True or False: fact {}.", i));
                let choice = if i < correct { 0 } else { 1 };
                question.grade(&Answer::Choice(choice)).unwrap();
                question
            })
            .collect();
        let at = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        QuizResult::new(username, "Java", "Easy", questions, at)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_finished_result() {
        let result = finished_result("alice", 2, 5);
        assert_eq!(result.score, 2);
        assert_eq!(result.total, 5);
        assert_eq!(result.username, "alice");
    }

    #[test]
    fn test_fixtures_temp_files_are_removed() {
        let (state, files) = test_state();
        let results_file = state.config.results_file.clone();
        std::fs::write(&results_file, "x").unwrap();
        drop(files);
        assert!(!results_file.exists());
    }
}
