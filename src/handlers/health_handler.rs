use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "active_sessions": state.session_service.active_count().await,
        "registered_users": state.user_service.user_count().await?,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dto::request::SignupRequest;
    use crate::test_utils::{fixtures, test_helpers::assert_success_status};
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_check() {
        let (state, _files) = fixtures::test_state();
        state
            .user_service
            .signup(SignupRequest {
                username: "alice".to_string(),
                password: "secret".to_string(),
                confirm_password: "secret".to_string(),
            })
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["active_sessions"], 0);
        assert_eq!(body["registered_users"], 1);
    }
}
