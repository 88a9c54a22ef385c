use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::ResultsQuery,
    services::report_service::render_results_table,
};

#[get("/results")]
pub async fn list_results(
    state: web::Data<AppState>,
    query: web::Query<ResultsQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let mut entries = state.result_log.list().await?;
    if let Some(username) = query.username.as_deref() {
        entries.retain(|e| e.username == username);
    }
    Ok(HttpResponse::Ok().json(entries))
}

#[get("/results/dashboard")]
pub async fn results_dashboard(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let entries = state.result_log.list().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_results_table(&entries)))
}
