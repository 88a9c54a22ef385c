use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{Answer, Question};

pub const MANUAL_OPTION_COUNT: usize = 4;

fn default_difficulty() -> String {
    "Medium".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct StartQuizRequest {
    #[validate(length(min = 1, max = 50))]
    pub category: String,

    #[serde(default = "default_difficulty")]
    #[validate(length(min = 1, max = 30))]
    pub difficulty: String,

    #[validate(range(min = 1, max = 20, message = "Number of questions must be between 1 and 20"))]
    pub num_questions: usize,

    #[validate(range(min = 1, max = 60, message = "Time limit must be between 1 and 60 minutes"))]
    pub time_limit_minutes: u32,

    #[serde(default)]
    pub content: Option<String>,

    /// Content came from a file upload and should be treated like `Custom`.
    #[serde(default)]
    pub from_upload: bool,

    #[serde(default)]
    #[validate(length(max = 20), nested)]
    pub manual_questions: Vec<ManualQuestionRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ManualQuestionRequest {
    #[validate(length(min = 1, message = "Please enter the question text"))]
    pub question: String,

    #[validate(length(equal = 4, message = "Exactly 4 options are required"))]
    pub options: Vec<String>,

    #[validate(range(max = 3, message = "Correct option must be between 0 and 3"))]
    pub correct_index: usize,
}

impl ManualQuestionRequest {
    /// Builds a multiple-choice question, trimming the text and rejecting
    /// blank or repeated options.
    pub fn into_question(self) -> AppResult<Question> {
        let question = self.question.trim().to_string();
        if question.is_empty() {
            return Err(AppError::ValidationError(
                "Please enter the question text".to_string(),
            ));
        }
        let options: Vec<String> = self.options.iter().map(|o| o.trim().to_string()).collect();
        if options.len() != MANUAL_OPTION_COUNT || options.iter().any(String::is_empty) {
            return Err(AppError::ValidationError(
                "Please fill all 4 options".to_string(),
            ));
        }

        let question = Question::multiple_choice(question, options, self.correct_index);
        question.validate()?;
        Ok(question)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ManualQuizRequest {
    #[validate(length(min = 1, max = 20, message = "Add between 1 and 20 questions"), nested)]
    pub questions: Vec<ManualQuestionRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnswerRequest {
    pub answer: Answer,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters"))]
    pub username: String,

    #[validate(length(min = 4, max = 128, message = "Password must be at least 4 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please enter username"))]
    pub username: String,

    #[validate(length(min = 1, message = "Please enter password"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsQuery {
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual(options: &[&str], correct_index: usize) -> ManualQuestionRequest {
        ManualQuestionRequest {
            question: "What does JVM stand for?".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_index,
        }
    }

    fn start_request(num_questions: usize, time_limit_minutes: u32) -> StartQuizRequest {
        StartQuizRequest {
            category: "Java".to_string(),
            difficulty: "Easy".to_string(),
            num_questions,
            time_limit_minutes,
            content: None,
            from_upload: false,
            manual_questions: vec![],
        }
    }

    #[test]
    fn test_valid_start_request() {
        assert!(start_request(5, 10).validate().is_ok());
    }

    #[test]
    fn test_start_request_bounds() {
        assert!(start_request(0, 10).validate().is_err());
        assert!(start_request(21, 10).validate().is_err());
        assert!(start_request(5, 0).validate().is_err());
        assert!(start_request(5, 61).validate().is_err());
    }

    #[test]
    fn test_start_request_defaults_from_json() {
        let request: StartQuizRequest = serde_json::from_str(
            r#"{"category":"AI","num_questions":3,"time_limit_minutes":5}"#,
        )
        .unwrap();
        assert_eq!(request.difficulty, "Medium");
        assert!(request.content.is_none());
        assert!(!request.from_upload);
        assert!(request.manual_questions.is_empty());
    }

    #[test]
    fn test_nested_manual_question_is_validated() {
        let mut request = start_request(5, 10);
        request.manual_questions = vec![manual(&["a", "b"], 0)];
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_manual_question_into_question() {
        let question = manual(&[" Java Virtual Machine ", "Joint", "Jolly", "Just"], 0)
            .into_question()
            .unwrap();
        assert_eq!(question.options[0], "Java Virtual Machine");
        assert_eq!(question.correct_answer(), "Java Virtual Machine");
    }

    #[test]
    fn test_manual_question_rejects_blank_option() {
        let result = manual(&["a", "  ", "c", "d"], 0).into_question();
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_manual_question_rejects_duplicates() {
        assert!(manual(&["a", "a", "c", "d"], 0).into_question().is_err());
    }

    #[test]
    fn test_manual_quiz_request_needs_questions() {
        let request = ManualQuizRequest { questions: vec![] };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_signup_passwords_must_match() {
        let request = SignupRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
        };
        assert!(request.validate().is_err());

        let request = SignupRequest {
            confirm_password: "secret1".to_string(),
            ..request
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_requires_fields() {
        let request = LoginRequest {
            username: String::new(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
