use std::sync::Arc;

use chrono::TimeDelta;

use crate::{
    auth::JwtService,
    config::Config,
    engine::Vocabulary,
    errors::AppResult,
    repositories::{
        CsvResultLogRepository, JsonUserRepository, ResultLogRepository, UserRepository,
    },
    services::{QuizService, SessionService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub session_service: Arc<SessionService>,
    pub user_service: Arc<UserService>,
    pub result_log: Arc<dyn ResultLogRepository>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let vocabulary = match &config.vocabulary_file {
            Some(path) => {
                log::info!("Loading vocabulary from {}", path.display());
                Vocabulary::from_file(path)?
            }
            None => Vocabulary::default(),
        };

        let user_repository: Arc<dyn UserRepository> =
            Arc::new(JsonUserRepository::load(&config.users_file)?);
        let result_log: Arc<dyn ResultLogRepository> =
            Arc::new(CsvResultLogRepository::new(&config.results_file));

        Ok(Self::with_repositories(
            config,
            Arc::new(vocabulary),
            user_repository,
            result_log,
        ))
    }

    pub fn with_repositories(
        config: Config,
        vocabulary: Arc<Vocabulary>,
        user_repository: Arc<dyn UserRepository>,
        result_log: Arc<dyn ResultLogRepository>,
    ) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Self {
            quiz_service: Arc::new(QuizService::new(vocabulary, config.generator_seed)),
            session_service: Arc::new(
                SessionService::new(Arc::clone(&result_log))
                    .with_retention(TimeDelta::minutes(config.session_retention_minutes)),
            ),
            user_service: Arc::new(UserService::new(user_repository)),
            result_log,
            jwt_service,
            config: Arc::new(config),
        }
    }
}
