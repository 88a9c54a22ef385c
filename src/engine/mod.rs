//! Heuristic question generation.
//!
//! Raw text flows through [`sentence_extractor::extract_sentences`] into
//! [`question_generator::QuestionGenerator`], which calls
//! [`distractor_factory::DistractorFactory`] for multiple-choice options.
//! Everything here is synchronous and takes its randomness as a parameter.

pub mod distractor_factory;
pub mod question_generator;
pub mod sentence_extractor;
pub mod vocabulary;

pub use distractor_factory::DistractorFactory;
pub use question_generator::{GenerationRequest, QuestionGenerator};
pub use sentence_extractor::extract_sentences;
pub use vocabulary::Vocabulary;
