pub mod auth_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod results_handler;

use actix_web::web;

use crate::auth::AuthMiddleware;

pub use auth_handler::{login, signup};
pub use health_handler::health_check;
pub use quiz_handler::{
    cancel_session, get_session, session_report, session_summary, start_manual_quiz, start_quiz,
    submit_answer, upload_content,
};
pub use results_handler::{list_results, results_dashboard};

/// Public routes first; everything else under `/api` needs a bearer token.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(signup)
        .service(login)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(upload_content)
                .service(start_manual_quiz)
                .service(start_quiz)
                .service(get_session)
                .service(submit_answer)
                .service(cancel_session)
                .service(session_summary)
                .service(session_report)
                .service(results_dashboard)
                .service(list_results),
        );
}
