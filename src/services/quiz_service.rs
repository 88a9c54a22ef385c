use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use validator::Validate;

use crate::{
    constants::sample_content::{CUSTOM_CATEGORY, SAMPLE_CONTENT},
    engine::{
        extract_sentences, sentence_extractor::join_lines, GenerationRequest, QuestionGenerator,
        Vocabulary,
    },
    errors::{AppError, AppResult},
    models::{
        domain::Question,
        dto::request::{ManualQuestionRequest, ManualQuizRequest, StartQuizRequest},
    },
};

pub const MANUAL_QUIZ_CATEGORY: &str = "Manual Quiz";
pub const MANUAL_QUIZ_DIFFICULTY: &str = "Custom";
const MANUAL_MIN_MINUTES: u32 = 2;

/// Everything needed to open a session.
#[derive(Clone, Debug)]
pub struct PreparedQuiz {
    pub category: String,
    pub difficulty: String,
    pub questions: Vec<Question>,
    pub time_limit_seconds: u32,
}

#[derive(Clone, Debug)]
pub struct UploadedContent {
    pub content: String,
    pub sentences: usize,
}

pub fn sample_content(category: &str) -> Option<&'static str> {
    SAMPLE_CONTENT
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, text)| *text)
}

/// Builds question lists from text, samples and hand-written questions.
pub struct QuizService {
    generator: QuestionGenerator,
    rng: Mutex<StdRng>,
}

impl QuizService {
    /// A fixed `seed` makes generation reproducible.
    pub fn new(vocabulary: Arc<Vocabulary>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            generator: QuestionGenerator::new(vocabulary),
            rng: Mutex::new(rng),
        }
    }

    pub fn generator(&self) -> &QuestionGenerator {
        &self.generator
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> AppResult<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::InternalError("Random generator lock poisoned".to_string()))?;
        Ok(f(&mut rng))
    }

    /// Picks the text to generate from: supplied content wins, otherwise the
    /// built-in sample for the category.
    pub fn resolve_content(
        &self,
        category: &str,
        content: Option<&str>,
        from_upload: bool,
    ) -> AppResult<String> {
        if let Some(text) = content.map(str::trim).filter(|t| !t.is_empty()) {
            return Ok(text.to_string());
        }
        if from_upload || category.eq_ignore_ascii_case(CUSTOM_CATEGORY) {
            return Err(AppError::ValidationError(
                "Please enter custom content or upload a file".to_string(),
            ));
        }
        sample_content(category)
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "Unknown category '{}'; choose Java, AI, Networking or Custom",
                    category
                ))
            })
    }

    pub fn prepare_upload(&self, raw: &[u8]) -> AppResult<UploadedContent> {
        let text = std::str::from_utf8(raw).map_err(|_| {
            AppError::ValidationError("Uploaded file is not valid UTF-8 text".to_string())
        })?;
        let content = join_lines(text);
        if content.is_empty() {
            return Err(AppError::ValidationError(
                "Uploaded file is empty".to_string(),
            ));
        }

        let sentences = extract_sentences(&content).len();
        log::info!(
            "Accepted upload of {} characters ({} usable sentences)",
            content.len(),
            sentences
        );
        Ok(UploadedContent { content, sentences })
    }

    /// Generates questions for `request`, merging any manual questions into
    /// the shuffled list.
    pub fn prepare_quiz(&self, request: StartQuizRequest) -> AppResult<PreparedQuiz> {
        request.validate()?;

        let content =
            self.resolve_content(&request.category, request.content.as_deref(), request.from_upload)?;
        let sentences = extract_sentences(&content);
        let generation = GenerationRequest {
            count: request.num_questions,
            category_hint: &request.category,
            force_multiple_choice: request.from_upload,
        };

        let mut questions =
            self.with_rng(|rng| self.generator.generate(&sentences, &generation, rng))?;
        if questions.is_empty() && request.manual_questions.is_empty() {
            log::warn!(
                "No questions could be generated for category '{}' ({} sentences)",
                request.category,
                sentences.len()
            );
            return Err(AppError::Generation(
                "Could not generate questions. Please provide more detailed content.".to_string(),
            ));
        }

        if !request.manual_questions.is_empty() {
            let manual = into_questions(request.manual_questions)?;
            log::info!(
                "Merging {} manual question(s) into {} generated",
                manual.len(),
                questions.len()
            );
            questions.extend(manual);
            self.with_rng(|rng| questions.shuffle(rng))?;
        }

        Ok(PreparedQuiz {
            category: request.category,
            difficulty: request.difficulty,
            questions,
            time_limit_seconds: request.time_limit_minutes * 60,
        })
    }

    /// A quiz made only of hand-written questions, with at least two minutes
    /// and one minute per question.
    pub fn prepare_manual_quiz(&self, request: ManualQuizRequest) -> AppResult<PreparedQuiz> {
        request.validate()?;

        let questions = into_questions(request.questions)?;
        let minutes = (questions.len() as u32).max(MANUAL_MIN_MINUTES);
        Ok(PreparedQuiz {
            category: MANUAL_QUIZ_CATEGORY.to_string(),
            difficulty: MANUAL_QUIZ_DIFFICULTY.to_string(),
            questions,
            time_limit_seconds: minutes * 60,
        })
    }
}

fn into_questions(requests: Vec<ManualQuestionRequest>) -> AppResult<Vec<Question>> {
    requests
        .into_iter()
        .enumerate()
        .map(|(i, request)| {
            request.into_question().map_err(|e| match e {
                AppError::ValidationError(msg) => {
                    AppError::ValidationError(format!("Manual question {}: {}", i + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuestionKind;

    fn service() -> QuizService {
        QuizService::new(Arc::new(Vocabulary::default()), Some(7))
    }

    fn start(category: &str, content: Option<&str>, num_questions: usize) -> StartQuizRequest {
        StartQuizRequest {
            category: category.to_string(),
            difficulty: "Easy".to_string(),
            num_questions,
            time_limit_minutes: 5,
            content: content.map(str::to_string),
            from_upload: false,
            manual_questions: vec![],
        }
    }

    fn manual(question: &str) -> ManualQuestionRequest {
        ManualQuestionRequest {
            question: question.to_string(),
            options: vec!["one".into(), "two".into(), "three".into(), "four".into()],
            correct_index: 2,
        }
    }

    #[test]
    fn test_sample_content_lookup() {
        assert!(sample_content("java").is_some());
        assert!(sample_content("Networking").is_some());
        assert!(sample_content("Custom").is_none());
    }

    #[test]
    fn test_resolve_content_rules() {
        let service = service();
        assert_eq!(
            service.resolve_content("Custom", Some("  my text  "), false).unwrap(),
            "my text"
        );
        assert!(service.resolve_content("AI", Some("   "), false).unwrap().contains("Machine learning"));
        assert!(matches!(
            service.resolve_content("Custom", None, false),
            Err(AppError::ValidationError(_))
        ));
        assert!(service.resolve_content("Java", None, true).is_err());
        assert!(service.resolve_content("Cooking", None, false).is_err());
    }

    #[test]
    fn test_prepare_quiz_from_sample() {
        let quiz = service().prepare_quiz(start("Java", None, 5)).unwrap();
        assert_eq!(quiz.questions.len(), 5);
        assert_eq!(quiz.time_limit_seconds, 300);
        assert_eq!(quiz.category, "Java");
        for question in &quiz.questions {
            assert!(question.validate().is_ok());
        }
    }

    #[test]
    fn test_prepare_quiz_custom_is_multiple_choice() {
        let content = "Rust programs are compiled ahead of time. \
                       Ownership rules prevent many memory errors. \
                       Cargo manages packages and builds projects.";
        let quiz = service()
            .prepare_quiz(start("Custom", Some(content), 3))
            .unwrap();
        assert!(quiz
            .questions
            .iter()
            .all(|q| q.kind == QuestionKind::MultipleChoice));
    }

    #[test]
    fn test_prepare_quiz_with_unusable_content_fails() {
        let result = service().prepare_quiz(start("Custom", Some("Too short. Tiny."), 3));
        assert!(matches!(result, Err(AppError::Generation(_))));
    }

    #[test]
    fn test_prepare_quiz_rejects_out_of_range_count() {
        let result = service().prepare_quiz(start("Java", None, 21));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_manual_questions_are_merged() {
        let mut request = start("Java", None, 3);
        request.manual_questions = vec![manual("Pick the third"), manual("Pick it again")];
        let quiz = service().prepare_quiz(request).unwrap();

        assert_eq!(quiz.questions.len(), 5);
        assert_eq!(
            quiz.questions
                .iter()
                .filter(|q| q.prompt.starts_with("Pick"))
                .count(),
            2
        );
    }

    #[test]
    fn test_manual_questions_rescue_empty_generation() {
        let mut request = start("Custom", Some("Nothing usable."), 3);
        request.manual_questions = vec![manual("Only this")];
        let quiz = service().prepare_quiz(request).unwrap();
        assert_eq!(quiz.questions.len(), 1);
    }

    #[test]
    fn test_manual_quiz_time_limit() {
        let service = service();
        let one = service
            .prepare_manual_quiz(ManualQuizRequest {
                questions: vec![manual("Q1")],
            })
            .unwrap();
        assert_eq!(one.category, MANUAL_QUIZ_CATEGORY);
        assert_eq!(one.difficulty, MANUAL_QUIZ_DIFFICULTY);
        assert_eq!(one.time_limit_seconds, 120);

        let three = service
            .prepare_manual_quiz(ManualQuizRequest {
                questions: vec![manual("Q1"), manual("Q2"), manual("Q3")],
            })
            .unwrap();
        assert_eq!(three.time_limit_seconds, 180);
        assert_eq!(three.questions[0].prompt, "Q1");
    }

    #[test]
    fn test_manual_quiz_reports_bad_question_number() {
        let mut bad = manual("Q2");
        bad.options[3] = " ".to_string();
        let result = service().prepare_manual_quiz(ManualQuizRequest {
            questions: vec![manual("Q1"), bad],
        });
        match result {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("Manual question 2")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_prepare_upload() {
        let service = service();
        let upload = service
            .prepare_upload(b"Line one of the file\nis joined here. Another line with words.\n")
            .unwrap();
        assert_eq!(
            upload.content,
            "Line one of the file is joined here. Another line with words."
        );
        assert_eq!(upload.sentences, 2);

        assert!(service.prepare_upload(b"\n  \n").is_err());
        assert!(service.prepare_upload(&[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let first = service().prepare_quiz(start("AI", None, 4)).unwrap();
        let second = service().prepare_quiz(start("AI", None, 4)).unwrap();
        assert_eq!(first.questions, second.questions);
    }
}
