//! REST endpoints hosting many concurrent wizard sessions.
//!
//! Each session owns its own `WizardController`; backend calls run with the
//! session lock released so other requests for the session are not blocked.
//! Sessions idle for longer than the store's idle timeout are dropped by
//! `spawn_expiry_sweep`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::{SubmissionClient, submit};
use crate::error::SubmissionError;
use crate::render::ResultRenderer;
use crate::wizard::{Advance, FormValues, Notifications, PendingGeneration, WizardController};

type SharedController = Arc<Mutex<WizardController>>;

/// How often `spawn_expiry_sweep` looks for idle sessions.
pub const EXPIRY_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct SessionEntry {
    controller: SharedController,
    last_touched: DateTime<Utc>,
}

/// Session registry plus what every new controller is built from.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    client: Arc<dyn SubmissionClient>,
    renderer: ResultRenderer,
    notification_ttl: chrono::Duration,
    idle_ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(
        client: Arc<dyn SubmissionClient>,
        renderer: ResultRenderer,
        notification_ttl: chrono::Duration,
        idle_ttl: chrono::Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            client,
            renderer,
            notification_ttl,
            idle_ttl,
        })
    }

    /// Start a new session and return its id.
    pub async fn create(&self) -> (Uuid, SharedController) {
        let id = Uuid::new_v4();
        let controller = WizardController::new(
            Arc::clone(&self.client),
            self.renderer,
            Notifications::new(self.notification_ttl),
        );
        let controller = Arc::new(Mutex::new(controller));
        self.sessions.write().await.insert(
            id,
            SessionEntry {
                controller: Arc::clone(&controller),
                last_touched: Utc::now(),
            },
        );
        info!(session_id = %id, "Wizard session created");
        (id, controller)
    }

    /// Look up a session and mark it as used now.
    pub async fn get(&self, id: Uuid) -> Option<SharedController> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_touched = Utc::now();
        Some(Arc::clone(&entry.controller))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drop sessions untouched for longer than the idle timeout.
    /// A session that is locked by a request or still generating is kept.
    /// Returns the number of sessions expired.
    pub async fn expire_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, entry| {
            if now - entry.last_touched < self.idle_ttl {
                return true;
            }
            let busy = match entry.controller.try_lock() {
                Ok(wizard) => wizard.session().in_progress(),
                Err(_) => true,
            };
            if !busy {
                debug!(session_id = %id, last_touched = %entry.last_touched, "Wizard session expired");
            }
            busy
        });

        let expired = before - sessions.len();
        if expired > 0 {
            info!(expired, remaining = sessions.len(), "Expired idle wizard sessions");
        }
        expired
    }
}

/// Periodically expire idle sessions.
pub fn spawn_expiry_sweep(
    store: Arc<SessionStore>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Skip immediate first tick
        ticker.tick().await;

        loop {
            ticker.tick().await;
            store.expire_idle(Utc::now()).await;
        }
    })
}

/// Build the wizard REST routes.
pub fn wizard_routes(store: Arc<SessionStore>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/wizard/sessions", post(create_session))
        .route(
            "/api/wizard/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/wizard/sessions/{id}/form", put(update_form))
        .route("/api/wizard/sessions/{id}/next", post(next_step))
        .route("/api/wizard/sessions/{id}/back", post(previous_step))
        .route("/api/wizard/sessions/{id}/reset", post(reset_session))
        .route("/api/wizard/sessions/{id}/retry", post(retry_generation))
        .route(
            "/api/wizard/sessions/{id}/notifications/{notification_id}/dismiss",
            post(dismiss_notification),
        )
        .route("/api/wizard/sessions/{id}/result", get(get_result))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

fn session_not_found(id: Uuid) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("Session {id} not found"))
}

async fn view_response(controller: &SharedController) -> Response {
    let mut wizard = controller.lock().await;
    wizard.prune_notifications(chrono::Utc::now());
    Json(wizard.view_state()).into_response()
}

/// Run a generation for the session without holding its lock across the
/// backend calls. `begin` is `begin_generation` or `begin_retry`.
async fn run_generation<F>(controller: &SharedController, begin: F) -> Result<(), SubmissionError>
where
    F: FnOnce(&mut WizardController) -> Result<PendingGeneration, SubmissionError>,
{
    let (pending, client) = {
        let mut wizard = controller.lock().await;
        (begin(&mut wizard)?, wizard.client())
    };
    let outcome = submit(client.as_ref(), &pending.profile).await;
    controller
        .lock()
        .await
        .finish_generation(pending.ticket, outcome);
    Ok(())
}

fn generation_error(e: SubmissionError) -> Response {
    match e {
        SubmissionError::AlreadyInProgress => error_response(StatusCode::CONFLICT, e.to_string()),
        SubmissionError::NoProfile | SubmissionError::NothingToRetry => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        other => error_response(StatusCode::BAD_GATEWAY, other.to_string()),
    }
}

// ── Handlers ────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "trip-wizard"
    }))
}

async fn create_session(State(store): State<Arc<SessionStore>>) -> Response {
    let (id, controller) = store.create().await;
    let view = controller.lock().await.view_state();
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "session_id": id, "view": view })),
    )
        .into_response()
}

async fn get_session(State(store): State<Arc<SessionStore>>, Path(id): Path<Uuid>) -> Response {
    match store.get(id).await {
        Some(controller) => view_response(&controller).await,
        None => session_not_found(id),
    }
}

async fn delete_session(State(store): State<Arc<SessionStore>>, Path(id): Path<Uuid>) -> Response {
    if store.remove(id).await {
        info!(session_id = %id, "Wizard session deleted");
        StatusCode::NO_CONTENT.into_response()
    } else {
        session_not_found(id)
    }
}

async fn update_form(
    State(store): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
    Json(form): Json<FormValues>,
) -> Response {
    let Some(controller) = store.get(id).await else {
        return session_not_found(id);
    };
    controller.lock().await.update_form(form);
    view_response(&controller).await
}

async fn next_step(State(store): State<Arc<SessionStore>>, Path(id): Path<Uuid>) -> Response {
    let Some(controller) = store.get(id).await else {
        return session_not_found(id);
    };

    let advance = controller.lock().await.try_advance();
    debug!(session_id = %id, ?advance, "Next requested");
    if advance == Advance::ReadyToSubmit {
        if let Err(e) = run_generation(&controller, WizardController::begin_generation).await {
            warn!(session_id = %id, error = %e, "Generation not started");
            return generation_error(e);
        }
    }
    view_response(&controller).await
}

async fn previous_step(State(store): State<Arc<SessionStore>>, Path(id): Path<Uuid>) -> Response {
    let Some(controller) = store.get(id).await else {
        return session_not_found(id);
    };
    controller.lock().await.retreat();
    view_response(&controller).await
}

async fn reset_session(State(store): State<Arc<SessionStore>>, Path(id): Path<Uuid>) -> Response {
    let Some(controller) = store.get(id).await else {
        return session_not_found(id);
    };
    controller.lock().await.reset();
    view_response(&controller).await
}

async fn retry_generation(
    State(store): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(controller) = store.get(id).await else {
        return session_not_found(id);
    };
    info!(session_id = %id, "Retry requested");
    if let Err(e) = run_generation(&controller, WizardController::begin_retry).await {
        debug!(session_id = %id, error = %e, "Retry rejected");
        return generation_error(e);
    }
    view_response(&controller).await
}

async fn dismiss_notification(
    State(store): State<Arc<SessionStore>>,
    Path((id, notification_id)): Path<(Uuid, Uuid)>,
) -> Response {
    let Some(controller) = store.get(id).await else {
        return session_not_found(id);
    };
    if !controller.lock().await.dismiss_notification(notification_id) {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Notification {notification_id} not found"),
        );
    }
    view_response(&controller).await
}

async fn get_result(State(store): State<Arc<SessionStore>>, Path(id): Path<Uuid>) -> Response {
    let Some(controller) = store.get(id).await else {
        return session_not_found(id);
    };
    let wizard = controller.lock().await;
    let session = wizard.session();
    let Some(rendered) = &session.rendered else {
        return error_response(StatusCode::NOT_FOUND, "No itinerary has been generated yet");
    };
    match rendered.to_document(session.submitted.as_ref()) {
        Ok(document) => Html(document).into_response(),
        Err(e) => {
            warn!(session_id = %id, error = %e, "Could not build the printable document");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
