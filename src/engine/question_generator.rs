use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::sample_content::CUSTOM_CATEGORY;
use crate::engine::distractor_factory::DistractorFactory;
use crate::engine::sentence_extractor::strip_non_alphanumeric;
use crate::engine::vocabulary::Vocabulary;
use crate::models::domain::question::{Question, QuestionKind};

pub const BLANK_MARKER: &str = "_____";

const KEY_TERM_MIN_LEN: usize = 6;
const KEY_TERM_MIN_TOKENS: usize = 6;
const BLANK_MIN_LEN: usize = 5;

const FALLBACK_CORRECT: &str = "The statement is accurate as presented";
const FALLBACK_DISTRACTORS: [&str; 3] = [
    "The statement is completely false",
    "The opposite meaning is true",
    "This information is not mentioned",
];

#[derive(Clone, Debug)]
pub struct GenerationRequest<'a> {
    pub count: usize,
    pub category_hint: &'a str,
    pub force_multiple_choice: bool,
}

impl GenerationRequest<'_> {
    /// Custom content always gets multiple-choice questions.
    fn multiple_choice_only(&self) -> bool {
        self.force_multiple_choice || self.category_hint.eq_ignore_ascii_case(CUSTOM_CATEGORY)
    }
}

/// Turns candidate sentences into quiz questions.
#[derive(Clone, Debug)]
pub struct QuestionGenerator {
    vocabulary: Arc<Vocabulary>,
    distractors: DistractorFactory,
}

impl QuestionGenerator {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        let distractors = DistractorFactory::new(Arc::clone(&vocabulary));
        Self {
            vocabulary,
            distractors,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Builds up to `request.count` questions from `sentences`.
    ///
    /// Sentences are visited cyclically, at most twice each. Unless multiple
    /// choice is forced, the kind rotates MultipleChoice → TrueFalse →
    /// FillBlank by the number of questions built so far, and a sentence with
    /// no word long enough to blank out becomes a TrueFalse question instead.
    /// The result is shuffled.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        sentences: &[String],
        request: &GenerationRequest<'_>,
        rng: &mut R,
    ) -> Vec<Question> {
        let mut questions = Vec::with_capacity(request.count);
        if sentences.is_empty() || request.count == 0 {
            return questions;
        }

        let multiple_choice_only = request.multiple_choice_only();
        let max_attempts = sentences.len() * 2;
        let mut attempt = 0;

        while questions.len() < request.count && attempt < max_attempts {
            let sentence = &sentences[attempt % sentences.len()];
            let kind = if multiple_choice_only {
                QuestionKind::MultipleChoice
            } else {
                match questions.len() % 3 {
                    0 => QuestionKind::MultipleChoice,
                    1 => QuestionKind::TrueFalse,
                    _ => QuestionKind::FillBlank,
                }
            };

            let question = match kind {
                QuestionKind::MultipleChoice => self.multiple_choice(sentence, rng),
                QuestionKind::TrueFalse => true_false(sentence),
                QuestionKind::FillBlank => {
                    fill_blank(sentence).or_else(|| true_false(sentence))
                }
            };

            if let Some(question) = question {
                log::debug!(
                    "Generated {} question {}",
                    question.kind.label(),
                    questions.len() + 1
                );
                questions.push(question);
            }
            attempt += 1;
        }

        log::info!(
            "Generated {} question(s) from {} sentence(s) for category '{}'",
            questions.len(),
            sentences.len(),
            request.category_hint
        );

        questions.shuffle(rng);
        questions.truncate(request.count);
        questions
    }

    /// Asks which word belongs in place of the sentence's key term, or falls
    /// back to a comprehension question when no key term qualifies.
    pub fn multiple_choice<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> Option<Question> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return None;
        }

        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        let key_term = tokens
            .iter()
            .map(|token| strip_non_alphanumeric(token))
            .find(|clean| clean.len() >= KEY_TERM_MIN_LEN && !self.vocabulary.is_common_word(clean));

        let (prompt, correct, distractors) = match key_term {
            Some(term) if tokens.len() >= KEY_TERM_MIN_TOKENS => {
                let prompt = format!(
                    "According to the content:\n\n\"{}\"\n\nWhat word best fits in place of \"{}\"?",
                    sentence, term
                );
                let distractors = self.distractors.distract(&term, sentence, rng);
                (prompt, term, distractors)
            }
            _ => (
                format!(
                    "Which statement is correct about the following?\n\n{}",
                    sentence
                ),
                FALLBACK_CORRECT.to_string(),
                FALLBACK_DISTRACTORS.iter().map(|d| d.to_string()).collect(),
            ),
        };

        let mut options = Vec::with_capacity(distractors.len() + 1);
        options.push(correct.clone());
        options.extend(distractors);
        options.shuffle(rng);
        let correct_index = options.iter().position(|o| *o == correct)?;

        Some(Question::multiple_choice(prompt, options, correct_index))
    }
}

/// Restates the sentence as a True/False item. The answer is always "True".
pub fn true_false(sentence: &str) -> Option<Question> {
    let sentence = sentence.trim();
    if sentence.is_empty() {
        return None;
    }
    Some(Question::true_false(format!("True or False: {}.", sentence)))
}

/// Blanks out the longest word of at least five letters/digits. Ties go to
/// the first occurrence.
pub fn fill_blank(sentence: &str) -> Option<Question> {
    let mut tokens: Vec<String> = sentence.split_whitespace().map(str::to_string).collect();

    let mut best: Option<(usize, String)> = None;
    for (i, token) in tokens.iter().enumerate() {
        let clean = strip_non_alphanumeric(token);
        let longest = best.as_ref().map_or(0, |(_, b)| b.len());
        if clean.len() >= BLANK_MIN_LEN && clean.len() > longest {
            best = Some((i, clean));
        }
    }

    let (index, answer) = best?;
    tokens[index] = BLANK_MARKER.to_string();
    let prompt = format!("Fill in the blank:\n{}.", tokens.join(" "));
    Some(Question::fill_blank(prompt, answer))
}
