pub mod question;
pub mod quiz_result;
pub mod quiz_session;
pub mod user;
pub use question::{Answer, Question, QuestionKind};
pub use quiz_result::QuizResult;
pub use quiz_session::{AnswerOutcome, FinishReason, QuizSession, SessionState, TickOutcome};
pub use user::User;
