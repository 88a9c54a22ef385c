use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::vocabulary::{COMMON_WORDS, DOMAIN_TERMS, GENERIC_WRONG_ANSWERS, OPPOSITES};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DomainTerm {
    pub keyword: String,
    pub alternatives: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct OppositePair {
    pub word: String,
    pub opposite: String,
}

/// Word tables consulted while building questions and distractors.
///
/// A `Vocabulary` is built once and shared read-only by the generator and
/// the distractor factory. `Default` gives the compiled-in tables; a JSON
/// file with the same shape can replace them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Vocabulary {
    pub common_words: Vec<String>,
    pub domain_terms: Vec<DomainTerm>,
    pub opposites: Vec<OppositePair>,
    pub generic_wrong_answers: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            common_words: COMMON_WORDS.iter().map(|w| w.to_string()).collect(),
            domain_terms: DOMAIN_TERMS
                .iter()
                .map(|(keyword, alternatives)| DomainTerm {
                    keyword: keyword.to_string(),
                    alternatives: alternatives.iter().map(|a| a.to_string()).collect(),
                })
                .collect(),
            opposites: OPPOSITES
                .iter()
                .map(|(word, opposite)| OppositePair {
                    word: word.to_string(),
                    opposite: opposite.to_string(),
                })
                .collect(),
            generic_wrong_answers: GENERIC_WRONG_ANSWERS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Vocabulary {
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Storage(format!(
                "Failed to read vocabulary file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let vocabulary: Vocabulary = serde_json::from_str(&raw)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.generic_wrong_answers.is_empty() {
            return Err(AppError::ValidationError(
                "Vocabulary needs at least one generic wrong answer".to_string(),
            ));
        }
        if let Some(term) = self.domain_terms.iter().find(|t| t.alternatives.is_empty()) {
            return Err(AppError::ValidationError(format!(
                "Domain term '{}' has no alternatives",
                term.keyword
            )));
        }
        Ok(())
    }

    /// Compares the lowercased, letters-only form of `word` against the stoplist.
    pub fn is_common_word(&self, word: &str) -> bool {
        let letters: String = word
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        self.common_words.iter().any(|c| *c == letters)
    }

    /// First domain term whose keyword appears in `lowercase`.
    pub fn domain_term_for(&self, lowercase: &str) -> Option<&DomainTerm> {
        self.domain_terms
            .iter()
            .find(|t| lowercase.contains(t.keyword.as_str()))
    }

    pub fn opposite_for(&self, lowercase: &str) -> Option<&OppositePair> {
        self.opposites
            .iter()
            .find(|p| lowercase.contains(p.word.as_str()))
    }
}
