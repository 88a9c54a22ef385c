pub mod sample_content;
pub mod vocabulary;
