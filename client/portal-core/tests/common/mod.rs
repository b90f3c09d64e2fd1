#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use htportal_core::{ApiClient, AuthorizationGate, SessionStore};

/// Value the stub issues in the csrftoken cookie after login.
pub const CSRF_TOKEN: &str = "stub-csrf-token";
/// The only password the stub accepts.
pub const PASSWORD: &str = "secret";

/// In-memory state behind the stub portal backend.
#[derive(Default)]
pub struct StubState {
    pub questions: Mutex<Vec<Value>>,
    pub correct_answers: Mutex<HashMap<i64, String>>,
    pub sponsors: Mutex<Vec<Value>>,
    pub next_id: Mutex<i64>,
    pub score: Mutex<u32>,
    pub notifications: Mutex<Vec<Value>>,
    pub notification_hits: AtomicUsize,
    pub leaderboard_visible: Mutex<bool>,
}

/// Stub portal backend on an ephemeral port. It enforces the double-submit
/// CSRF pair on every mutating route, so any mutation that succeeds in a
/// test proves the client echoed the cookie correctly.
pub struct StubBackend {
    pub addr: SocketAddr,
    pub state: Arc<StubState>,
}

impl StubBackend {
    pub async fn spawn() -> Self {
        let state = Arc::new(StubState::default());
        *state.next_id.lock().unwrap() = 1;

        let app = Router::new()
            .route("/api/login/", post(login))
            .route("/api/quiz/questions/", get(list_questions))
            .route("/api/quiz/questions/{id}/answer/", post(submit_answer))
            .route("/api/quiz/my-score/", get(my_score))
            .route("/api/quiz/toggle-leaderboard/", post(toggle_leaderboard))
            .route("/api/notifications/", get(list_notifications))
            .route("/api/sponsors/", get(list_sponsors).post(create_sponsor))
            .route(
                "/api/sponsors/{id}/",
                put(update_sponsor).delete(delete_sponsor),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::with_base_url(&self.base_url(), Duration::from_secs(5)).expect("client")
    }

    pub fn add_question(&self, id: i64, expires_at: DateTime<Utc>, correct: &str) {
        self.state.questions.lock().unwrap().push(json!({
            "id": id,
            "question_text": format!("Stub question {id}"),
            "option_a": "Option A",
            "option_b": "Option B",
            "option_c": "Option C",
            "option_d": "Option D",
            "year": 2025,
            "expires_at": expires_at.to_rfc3339(),
            "already_answered": false,
        }));
        self.state
            .correct_answers
            .lock()
            .unwrap()
            .insert(id, correct.to_string());
    }

    pub fn add_notification(&self, id: i64, message: &str, read: bool) {
        self.state.notifications.lock().unwrap().push(json!({
            "id": id,
            "message": message,
            "created_at": Utc::now().to_rfc3339(),
            "read": read,
        }));
    }
}

/// Gate over a unique temp storage dir, so parallel tests never share slots.
pub fn temp_gate() -> AuthorizationGate {
    let dir = std::env::temp_dir().join(format!("htportal-test-{}", uuid::Uuid::new_v4()));
    AuthorizationGate::new(SessionStore::new(dir))
}

fn require_csrf(headers: &HeaderMap) -> Result<(), Response> {
    let cookie_token = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .find_map(|c| c.trim().strip_prefix("csrftoken="))
                .map(str::to_string)
        });
    let header_token = headers
        .get("x-csrftoken")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match (cookie_token, header_token) {
        (Some(cookie), Some(header)) if cookie == header => Ok(()),
        _ => Err((
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "CSRF token missing or incorrect"})),
        )
            .into_response()),
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();
    if password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid credentials"})),
        )
            .into_response();
    }

    let groups = if email.starts_with("admin") {
        json!(["Admin"])
    } else {
        json!(["Member"])
    };
    let cookies = AppendHeaders([
        (header::SET_COOKIE, "sessionid=stub-session; Path=/".to_string()),
        (header::SET_COOKIE, format!("csrftoken={CSRF_TOKEN}; Path=/")),
    ]);
    (
        StatusCode::OK,
        cookies,
        Json(json!({
            "user": {"fullName": "Stub User", "email": email, "groups": groups}
        })),
    )
        .into_response()
}

async fn list_questions(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(Value::Array(state.questions.lock().unwrap().clone()))
}

async fn submit_answer(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }

    let expires_at = {
        let questions = state.questions.lock().unwrap();
        let Some(q) = questions.iter().find(|q| q["id"].as_i64() == Some(id)) else {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Question not found"})),
            )
                .into_response();
        };
        q["expires_at"]
            .as_str()
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
            .expect("stub question expiry")
    };

    // The stub is the authority on expiry, like the real backend.
    if Utc::now() >= expires_at {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Question has expired"})),
        )
            .into_response();
    }

    let correct = state
        .correct_answers
        .lock()
        .unwrap()
        .get(&id)
        .cloned()
        .unwrap_or_else(|| "A".to_string());
    let selected = body["selected_answer"].as_str().unwrap_or_default();
    let is_correct = selected == correct;
    if is_correct {
        *state.score.lock().unwrap() += 1;
    }

    Json(json!({"isCorrect": is_correct, "correct_answer": correct})).into_response()
}

async fn my_score(State(state): State<Arc<StubState>>) -> Json<Value> {
    let score = *state.score.lock().unwrap();
    Json(json!({"score": score, "answered": score}))
}

async fn toggle_leaderboard(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }
    let mut visible = state.leaderboard_visible.lock().unwrap();
    *visible = !*visible;
    Json(json!({"leaderboard_visible": *visible, "active_year": 2025})).into_response()
}

async fn list_notifications(State(state): State<Arc<StubState>>) -> Json<Value> {
    state.notification_hits.fetch_add(1, Ordering::SeqCst);
    Json(Value::Array(state.notifications.lock().unwrap().clone()))
}

async fn list_sponsors(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(Value::Array(state.sponsors.lock().unwrap().clone()))
}

async fn create_sponsor(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }
    let id = {
        let mut next = state.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    };
    body["id"] = json!(id);
    state.sponsors.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_sponsor(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }
    body["id"] = json!(id);
    let mut sponsors = state.sponsors.lock().unwrap();
    match sponsors.iter_mut().find(|s| s["id"].as_i64() == Some(id)) {
        Some(existing) => {
            *existing = body.clone();
            Json(body).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Sponsor not found"})),
        )
            .into_response(),
    }
}

async fn delete_sponsor(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }
    let mut sponsors = state.sponsors.lock().unwrap();
    let before = sponsors.len();
    sponsors.retain(|s| s["id"].as_i64() != Some(id));
    if sponsors.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Sponsor not found"})),
        )
            .into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}
