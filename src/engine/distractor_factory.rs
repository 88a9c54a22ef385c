use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::vocabulary::Vocabulary;

pub const DISTRACTOR_COUNT: usize = 3;
const MAX_FILLER_ATTEMPTS: usize = 20;

/// Manufactures wrong-but-plausible answers for a key term.
#[derive(Clone, Debug)]
pub struct DistractorFactory {
    vocabulary: Arc<Vocabulary>,
}

impl DistractorFactory {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Returns exactly three distractors for `correct`.
    ///
    /// The candidates are pairwise distinct and never equal `correct`, both
    /// compared case-insensitively. `context` is the sentence the term was
    /// taken from; the strategies below only look at the term itself.
    ///
    /// Strategies run in order until three candidates are collected:
    /// 1. two picks from the matching domain-term alternatives
    /// 2. the term with its first two characters swapped (terms over 5 chars)
    /// 3. every digit replaced by one random digit
    /// 4. the first matching opposite substituted in
    /// 5. a filler loop over generic answers and suffix/gerund mutations
    /// 6. `Wrong option N` placeholders
    pub fn distract<R: Rng + ?Sized>(
        &self,
        correct: &str,
        _context: &str,
        rng: &mut R,
    ) -> Vec<String> {
        let mut pool = CandidatePool::new(correct);
        let lower = correct.to_ascii_lowercase();
        let length = correct.chars().count();

        if let Some(term) = self.vocabulary.domain_term_for(&lower) {
            for _ in 0..2 {
                if let Some(alternative) = term.alternatives.choose(rng) {
                    pool.offer(alternative.clone());
                }
            }
        }

        if length > 5 {
            pool.offer(swap_first_two(correct));
        }

        if correct.chars().any(|c| c.is_ascii_digit()) {
            let digit = char::from(b'0' + rng.gen_range(1..=9u8));
            pool.offer(
                correct
                    .chars()
                    .map(|c| if c.is_ascii_digit() { digit } else { c })
                    .collect(),
            );
        }

        if let Some(pair) = self.vocabulary.opposite_for(&lower) {
            pool.offer(replace_ignore_ascii_case(correct, &pair.word, &pair.opposite));
        }

        let mut attempts = 0;
        while !pool.is_full() && attempts < MAX_FILLER_ATTEMPTS {
            let candidate = match attempts % 3 {
                1 if length > 4 => Some(suffix_mutation(correct, rng)),
                2 => Some(format!("{}ing", correct.to_lowercase())),
                _ => self.vocabulary.generic_wrong_answers.choose(rng).cloned(),
            };
            if let Some(candidate) = candidate {
                pool.offer(candidate);
            }
            attempts += 1;
        }

        let mut placeholder = 1;
        while !pool.is_full() {
            pool.offer(format!("Wrong option {}", placeholder));
            placeholder += 1;
        }

        log::debug!("Distractors for '{}': {:?}", correct, pool.candidates);
        pool.candidates
    }
}

struct CandidatePool {
    correct: String,
    candidates: Vec<String>,
}

impl CandidatePool {
    fn new(correct: &str) -> Self {
        Self {
            correct: correct.to_lowercase(),
            candidates: Vec::with_capacity(DISTRACTOR_COUNT),
        }
    }

    fn is_full(&self) -> bool {
        self.candidates.len() >= DISTRACTOR_COUNT
    }

    fn offer(&mut self, candidate: String) -> bool {
        if self.is_full() || candidate.trim().is_empty() {
            return false;
        }
        let lowered = candidate.to_lowercase();
        if lowered == self.correct || self.candidates.iter().any(|c| c.to_lowercase() == lowered) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }
}

fn swap_first_two(word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    if chars.len() > 2 {
        chars.swap(0, 1);
    }
    chars.into_iter().collect()
}

fn suffix_mutation<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    if rng.gen_bool(0.5) {
        let mut chars: Vec<char> = word.chars().collect();
        chars.pop();
        let mut mutated: String = chars.into_iter().collect();
        mutated.push_str("ed");
        mutated
    } else {
        format!("Non-{}", word.to_lowercase())
    }
}

/// Replaces every ASCII case-insensitive occurrence of `needle`.
fn replace_ignore_ascii_case(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let lower = haystack.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();
    let mut result = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, _) in lower.match_indices(needle.as_str()) {
        result.push_str(&haystack[last..start]);
        result.push_str(replacement);
        last = start + needle.len();
    }
    result.push_str(&haystack[last..]);
    result
}
