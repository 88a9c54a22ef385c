use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{LoginRequest, SignupRequest},
        response::{AuthResponse, MessageResponse},
    },
};

#[post("/api/auth/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.signup(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(MessageResponse {
        message: format!("Signup successful for '{}'! Please login.", user.username),
    }))
}

#[post("/api/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.login(request.into_inner()).await?;
    let token = state.jwt_service.create_token(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        username: user.username,
        message: "Login successful".to_string(),
    }))
}
