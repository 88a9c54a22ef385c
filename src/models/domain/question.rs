use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    FillBlank,
}

impl QuestionKind {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::TrueFalse => "True/False",
            QuestionKind::FillBlank => "Fill in the Blank",
        }
    }
}

/// One quiz item.
///
/// Choice questions (`MultipleChoice`, `TrueFalse`) carry `options` and a
/// `correct_index`; `FillBlank` carries only `correct_text`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: Option<usize>,
    pub correct_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    pub is_correct: bool,
}

/// What a user submits for the current question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Choice(usize),
    Text(String),
}

impl Question {
    pub fn multiple_choice(prompt: String, options: Vec<String>, correct_index: usize) -> Self {
        Self {
            kind: QuestionKind::MultipleChoice,
            prompt,
            options,
            correct_index: Some(correct_index),
            correct_text: None,
            user_answer: None,
            is_correct: false,
        }
    }

    pub fn true_false(prompt: String) -> Self {
        Self {
            kind: QuestionKind::TrueFalse,
            prompt,
            options: vec!["True".to_string(), "False".to_string()],
            correct_index: Some(0),
            correct_text: None,
            user_answer: None,
            is_correct: false,
        }
    }

    pub fn fill_blank(prompt: String, answer: String) -> Self {
        Self {
            kind: QuestionKind::FillBlank,
            prompt,
            options: Vec::new(),
            correct_index: None,
            correct_text: Some(answer),
            user_answer: None,
            is_correct: false,
        }
    }

    /// Checks the shape invariants: unique options with a valid index for
    /// choice questions, no options and a non-empty answer for blanks.
    pub fn validate(&self) -> AppResult<()> {
        match self.kind {
            QuestionKind::FillBlank => {
                if !self.options.is_empty() {
                    return Err(AppError::ValidationError(
                        "Fill-in-the-blank questions cannot have options".to_string(),
                    ));
                }
                if self.correct_text.as_deref().map_or(true, |t| t.trim().is_empty()) {
                    return Err(AppError::ValidationError(
                        "Fill-in-the-blank questions need an answer".to_string(),
                    ));
                }
            }
            QuestionKind::MultipleChoice | QuestionKind::TrueFalse => {
                if self.options.len() < 2 || self.options.len() > 4 {
                    return Err(AppError::ValidationError(format!(
                        "Choice questions need 2 to 4 options, got {}",
                        self.options.len()
                    )));
                }
                for (i, option) in self.options.iter().enumerate() {
                    if option.trim().is_empty() {
                        return Err(AppError::ValidationError(format!(
                            "Option {} is empty",
                            i + 1
                        )));
                    }
                    if self.options[..i].contains(option) {
                        return Err(AppError::ValidationError(format!(
                            "Option '{}' is listed twice",
                            option
                        )));
                    }
                }
                match self.correct_index {
                    Some(index) if index < self.options.len() => {}
                    _ => {
                        return Err(AppError::ValidationError(
                            "Correct option index is out of range".to_string(),
                        ))
                    }
                }
            }
        }
        if self.prompt.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Question text is empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn correct_answer(&self) -> &str {
        match self.kind {
            QuestionKind::FillBlank => self.correct_text.as_deref().unwrap_or_default(),
            _ => self
                .correct_index
                .and_then(|i| self.options.get(i))
                .map(String::as_str)
                .unwrap_or_default(),
        }
    }

    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }

    /// Records `answer` and returns whether it was right.
    ///
    /// Blank text, an out-of-range choice or an answer of the wrong shape is
    /// rejected without touching the question.
    pub fn grade(&mut self, answer: &Answer) -> AppResult<bool> {
        if self.is_answered() {
            return Err(AppError::SessionInactive(
                "Question has already been answered".to_string(),
            ));
        }

        let (given, correct) = match (self.kind, answer) {
            (QuestionKind::FillBlank, Answer::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(AppError::ValidationError(
                        "Please enter an answer before continuing".to_string(),
                    ));
                }
                let correct = self
                    .correct_text
                    .as_deref()
                    .map_or(false, |expected| expected.to_lowercase() == text.to_lowercase());
                (text.to_string(), correct)
            }
            (QuestionKind::MultipleChoice | QuestionKind::TrueFalse, Answer::Choice(index)) => {
                let option = self.options.get(*index).ok_or_else(|| {
                    AppError::ValidationError(format!(
                        "Option {} does not exist; pick 0 to {}",
                        index,
                        self.options.len().saturating_sub(1)
                    ))
                })?;
                (option.clone(), self.correct_index == Some(*index))
            }
            (QuestionKind::FillBlank, Answer::Choice(_)) => {
                return Err(AppError::ValidationError(
                    "This question expects a typed answer".to_string(),
                ))
            }
            (_, Answer::Text(_)) => {
                return Err(AppError::ValidationError(
                    "This question expects one of the listed options".to_string(),
                ))
            }
        };

        self.user_answer = Some(given);
        self.is_correct = correct;
        Ok(correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_choice() -> Question {
        Question::multiple_choice(
            "Pick one".to_string(),
            vec!["alpha".into(), "beta".into(), "gamma".into(), "delta".into()],
            2,
        )
    }

    #[test]
    fn test_true_false_shape() {
        let question = Question::true_false("True or False: water is wet.".to_string());
        assert_eq!(question.options, vec!["True", "False"]);
        assert_eq!(question.correct_index, Some(0));
        assert_eq!(question.correct_answer(), "True");
        assert!(question.validate().is_ok());
    }

    #[test]
    fn test_fill_blank_shape() {
        let question = Question::fill_blank("Fill in: _____".to_string(), "garbage".to_string());
        assert!(question.options.is_empty());
        assert!(question.correct_index.is_none());
        assert_eq!(question.correct_answer(), "garbage");
        assert!(question.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_options() {
        let question = Question::multiple_choice(
            "Pick".to_string(),
            vec!["same".into(), "same".into(), "other".into()],
            0,
        );
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_index() {
        let question =
            Question::multiple_choice("Pick".to_string(), vec!["a".into(), "b".into()], 5);
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_grade_choice() {
        let mut question = sample_choice();
        assert!(question.grade(&Answer::Choice(2)).unwrap());
        assert_eq!(question.user_answer.as_deref(), Some("gamma"));
        assert!(question.is_correct);
    }

    #[test]
    fn test_grade_only_once() {
        let mut question = sample_choice();
        assert!(!question.grade(&Answer::Choice(0)).unwrap());
        assert!(matches!(
            question.grade(&Answer::Choice(2)),
            Err(AppError::SessionInactive(_))
        ));
        assert!(!question.is_correct);
    }

    #[test]
    fn test_grade_fill_blank_is_case_insensitive_and_trimmed() {
        let mut question = Question::fill_blank("_____".to_string(), "Garbage".to_string());
        assert!(question.grade(&Answer::Text("  gARBAGE ".to_string())).unwrap());
        assert_eq!(question.user_answer.as_deref(), Some("gARBAGE"));
    }

    #[test]
    fn test_grade_fill_blank_rejects_partial_match() {
        let mut question = Question::fill_blank("_____".to_string(), "collection".to_string());
        assert!(!question.grade(&Answer::Text("collect".to_string())).unwrap());
    }

    #[test]
    fn test_grade_rejects_blank_and_wrong_shape() {
        let mut blank = Question::fill_blank("_____".to_string(), "memory".to_string());
        assert!(blank.grade(&Answer::Text("   ".to_string())).is_err());
        assert!(blank.grade(&Answer::Choice(0)).is_err());
        assert!(!blank.is_answered());

        let mut choice = sample_choice();
        assert!(choice.grade(&Answer::Text("alpha".to_string())).is_err());
        assert!(choice.grade(&Answer::Choice(9)).is_err());
        assert!(!choice.is_answered());
    }

    #[test]
    fn test_answer_json_shape() {
        let choice: Answer = serde_json::from_str(r#"{"type":"choice","value":1}"#).unwrap();
        assert_eq!(choice, Answer::Choice(1));
        let text: Answer = serde_json::from_str(r#"{"type":"text","value":"jvm"}"#).unwrap();
        assert_eq!(text, Answer::Text("jvm".to_string()));
    }
}
