pub mod quiz_service;
pub mod report_service;
pub mod session_service;
pub mod user_service;

pub use quiz_service::{PreparedQuiz, QuizService};
pub use session_service::SessionService;
pub use user_service::UserService;
