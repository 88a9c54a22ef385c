use std::{collections::HashMap, sync::Arc, time::Duration};

use actix_web::rt::task::JoinHandle;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::{sync::RwLock, time::MissedTickBehavior};
use uuid::Uuid;

use crate::{
    auth::require_owner,
    errors::{AppError, AppResult},
    models::domain::{
        Answer, AnswerOutcome, QuizResult, QuizSession, SessionState, TickOutcome,
    },
    repositories::ResultLogRepository,
    services::quiz_service::PreparedQuiz,
};

/// How long a finished session stays readable for its summary and report.
pub const DEFAULT_RETENTION_MINUTES: i64 = 30;

/// Live quiz sessions, keyed by id.
///
/// All mutation happens under the write lock, so the once-a-second tick and a
/// submitted answer are serialized per session. Finished sessions are dropped
/// by the tick once they are older than the retention window.
pub struct SessionService {
    sessions: RwLock<HashMap<Uuid, QuizSession>>,
    result_log: Arc<dyn ResultLogRepository>,
    retention: TimeDelta,
}

impl SessionService {
    pub fn new(result_log: Arc<dyn ResultLogRepository>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            result_log,
            retention: TimeDelta::minutes(DEFAULT_RETENTION_MINUTES),
        }
    }

    pub fn with_retention(mut self, retention: TimeDelta) -> Self {
        self.retention = retention;
        self
    }

    pub async fn start(&self, username: &str, quiz: PreparedQuiz) -> AppResult<QuizSession> {
        let mut session = QuizSession::new(
            username,
            &quiz.category,
            &quiz.difficulty,
            quiz.questions,
            quiz.time_limit_seconds,
        );
        session.start()?;

        log::info!(
            "Session {} started for '{}': {} question(s), {}s",
            session.id,
            username,
            session.total(),
            session.time_limit_seconds()
        );
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    pub async fn get(&self, id: Uuid, username: &str) -> AppResult<QuizSession> {
        let sessions = self.sessions.read().await;
        let session = find(&sessions, id)?;
        require_owner(username, &session.username)?;
        Ok(session.clone())
    }

    /// Grades `answer` against the current question. Returns the outcome and
    /// the session as it stands afterwards.
    pub async fn submit(
        &self,
        id: Uuid,
        username: &str,
        answer: &Answer,
    ) -> AppResult<(AnswerOutcome, QuizSession)> {
        let (outcome, snapshot) = {
            let mut sessions = self.sessions.write().await;
            let session = sessions
                .get_mut(&id)
                .ok_or_else(|| not_found(id))?;
            require_owner(username, &session.username)?;

            let outcome = session.submit_answer(answer)?;
            (outcome, session.clone())
        };

        if outcome.finished {
            if let Some(result) = snapshot.result() {
                log::info!(
                    "Session {} completed: {}/{}",
                    id,
                    result.score,
                    result.total
                );
                self.record(result).await;
            }
        }
        Ok((outcome, snapshot))
    }

    /// Discards the session. An in-progress session is cancelled first and
    /// leaves no result behind.
    pub async fn cancel(&self, id: Uuid, username: &str) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        require_owner(username, &session.username)?;

        if session.state() != SessionState::Finished {
            session.cancel()?;
            log::info!("Session {} cancelled by '{}'", id, username);
        }
        sessions.remove(&id);
        Ok(())
    }

    /// The finished result of a session that completed or ran out of time.
    pub async fn result(&self, id: Uuid, username: &str) -> AppResult<QuizResult> {
        let session = self.get(id, username).await?;
        session.result().cloned().ok_or_else(|| {
            AppError::SessionInactive(format!("Session {} has not finished yet", id))
        })
    }

    /// Advances every in-progress session by one second, records the results
    /// of those that expired and evicts finished sessions past retention.
    /// Returns how many expired.
    pub async fn tick_all(&self) -> usize {
        self.tick_all_at(Utc::now()).await
    }

    async fn tick_all_at(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<QuizResult> = {
            let mut sessions = self.sessions.write().await;
            let expired: Vec<QuizResult> = sessions
                .values_mut()
                .filter_map(|session| match session.tick() {
                    TickOutcome::Expired => {
                        log::info!("Session {} ran out of time", session.id);
                        session.result().cloned()
                    }
                    TickOutcome::Running { .. } | TickOutcome::Inactive => None,
                })
                .collect();

            let before = sessions.len();
            sessions.retain(|_, session| !self.is_stale(session, now));
            let evicted = before - sessions.len();
            if evicted > 0 {
                log::debug!("Evicted {} finished session(s)", evicted);
            }
            expired
        };

        for result in &expired {
            self.record(result).await;
        }
        expired.len()
    }

    pub async fn active_count(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|s| s.is_active())
            .count()
    }

    fn is_stale(&self, session: &QuizSession, now: DateTime<Utc>) -> bool {
        session
            .finished_at()
            .map_or(false, |finished| now - finished >= self.retention)
    }

    async fn record(&self, result: &QuizResult) {
        if let Err(e) = self.result_log.append(result).await {
            log::warn!(
                "Failed to record result for '{}': {}",
                result.username,
                e
            );
        }
    }
}

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Ticks every session once per [`TICK_INTERVAL`] until the handle is aborted.
pub fn spawn_ticker(service: Arc<SessionService>) -> JoinHandle<()> {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let expired = service.tick_all().await;
            if expired > 0 {
                log::debug!("{} session(s) expired this tick", expired);
            }
        }
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {} not found", id))
}

fn find(sessions: &HashMap<Uuid, QuizSession>, id: Uuid) -> AppResult<&QuizSession> {
    sessions.get(&id).ok_or_else(|| not_found(id))
}
