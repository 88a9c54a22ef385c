use actix_web::{delete, get, http::header, post, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{AnswerRequest, ManualQuizRequest, StartQuizRequest},
        response::{AnswerOutcomeResponse, MessageResponse, SessionStatusResponse, UploadResponse},
    },
    services::report_service::{render_report, render_summary, report_file_name},
};

#[post("/content/upload")]
pub async fn upload_content(
    state: web::Data<AppState>,
    body: web::Bytes,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let upload = state.quiz_service.prepare_upload(&body)?;
    Ok(HttpResponse::Ok().json(UploadResponse {
        characters: upload.content.chars().count(),
        sentences: upload.sentences,
        content: upload.content,
    }))
}

#[post("/quizzes")]
pub async fn start_quiz(
    state: web::Data<AppState>,
    request: web::Json<StartQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.prepare_quiz(request.into_inner())?;
    let session = state.session_service.start(auth.username(), quiz).await?;
    Ok(HttpResponse::Created().json(SessionStatusResponse::from(&session)))
}

#[post("/quizzes/manual")]
pub async fn start_manual_quiz(
    state: web::Data<AppState>,
    request: web::Json<ManualQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.prepare_manual_quiz(request.into_inner())?;
    let session = state.session_service.start(auth.username(), quiz).await?;
    Ok(HttpResponse::Created().json(SessionStatusResponse::from(&session)))
}

#[get("/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.get(*id, auth.username()).await?;
    Ok(HttpResponse::Ok().json(SessionStatusResponse::from(&session)))
}

#[post("/sessions/{id}/answers")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<AnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (outcome, session) = state
        .session_service
        .submit(*id, auth.username(), &request.answer)
        .await?;
    Ok(HttpResponse::Ok().json(AnswerOutcomeResponse::new(outcome, &session)))
}

#[delete("/sessions/{id}")]
pub async fn cancel_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.session_service.cancel(*id, auth.username()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Quiz cancelled".to_string(),
    }))
}

#[get("/sessions/{id}/summary")]
pub async fn session_summary(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state.session_service.result(*id, auth.username()).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_summary(&result)))
}

#[get("/sessions/{id}/report")]
pub async fn session_report(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state.session_service.result(*id, auth.username()).await?;
    let file_name = report_file_name(&result);
    let html = render_report(&result)?;
    log::info!("Exporting report {}", file_name);

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(html))
}
