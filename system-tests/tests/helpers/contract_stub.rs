// system-tests/tests/helpers/contract_stub.rs
// ============================================================================
// Module: Contract Stub
// Description: Loopback favorites server that follows the documented contract.
// Purpose: Run the contract suites hermetically when no deployment is configured.
// Dependencies: axum, favorites-contract, rand, time, tokio, url
// ============================================================================

//! ## Overview
//! The stub issues opaque session cookies from `POST /v1/auth/tokens` and
//! validates `POST /v1/favorites` submissions with the shared contract rules.
//! `GET /v1/favorites` is rejected by the router with 405. Accepted places are
//! kept in memory for inspection by tests.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use favorites_contract::ErrorEnvelope;
use favorites_contract::FavoriteForm;
use favorites_contract::FavoritePlace;
use favorites_contract::validate_submission;
use rand::RngCore;
use rand::rngs::OsRng;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::runtime::Builder;
use tokio::sync::oneshot;
use tracing::debug;
use tracing::info;
use url::Url;
use url::form_urlencoded;

/// Cookie name carrying the stub session token.
pub const SESSION_COOKIE: &str = "session";

/// Message returned for requests without a live session.
const UNAUTHORIZED_MESSAGE: &str = "Необходима авторизация";

#[derive(Clone, Default)]
struct StubState {
    sessions: Arc<Mutex<HashSet<String>>>,
    places: Arc<Mutex<Vec<FavoritePlace>>>,
}

/// Handle for the loopback contract stub; shuts the server down on drop.
pub struct ContractStubHandle {
    base_url: Url,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
    state: StubState,
}

impl ContractStubHandle {
    /// Returns the stub base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns every place the stub accepted, in order.
    pub fn created_places(&self) -> Vec<FavoritePlace> {
        self.state.places.lock().map_or_else(|_| Vec::new(), |places| places.clone())
    }

    /// Returns the number of sessions issued so far.
    pub fn session_count(&self) -> usize {
        self.state.sessions.lock().map_or(0, |sessions| sessions.len())
    }
}

impl Drop for ContractStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Starts the contract stub on an ephemeral loopback port.
pub fn spawn_contract_stub() -> Result<ContractStubHandle, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("contract stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("contract stub listener nonblocking failed: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("contract stub local addr failed: {err}"))?;
    let base_url = Url::parse(&format!("http://{addr}/"))
        .map_err(|err| format!("contract stub url invalid: {err}"))?;

    let state = StubState::default();
    let app = Router::new()
        .route("/v1/auth/tokens", post(issue_session))
        .route("/v1/favorites", post(create_favorite))
        .with_state(state.clone());
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    info!(%base_url, "contract stub listening");
    Ok(ContractStubHandle {
        base_url,
        shutdown: Some(shutdown_tx),
        join: Some(join),
        state,
    })
}

async fn issue_session(State(state): State<StubState>) -> Response {
    let token = new_session_token();
    if let Ok(mut sessions) = state.sessions.lock() {
        sessions.insert(token.clone());
    }
    debug!("contract stub issued session");
    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly");
    (StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(json!({ "status": "ok" })))
        .into_response()
}

async fn create_favorite(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !has_live_session(&state, &headers) {
        debug!("contract stub rejected request without session");
        return error_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE);
    }
    let form = FavoriteForm::from_pairs(form_urlencoded::parse(&body));
    let draft = match validate_submission(&form) {
        Ok(draft) => draft,
        Err(violation) => {
            debug!(%violation, "contract stub rejected submission");
            return error_response(StatusCode::BAD_REQUEST, &violation.message());
        }
    };
    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_or(Value::Null, Value::String);
    let mut places = match state.places.lock() {
        Ok(places) => places,
        Err(_) => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "state poisoned");
        }
    };
    let mut extra = Map::new();
    extra.insert("id".to_string(), Value::from(places.len() + 1));
    let place = FavoritePlace {
        title: draft.title,
        lat: draft.lat,
        lon: draft.lon,
        color: draft.color,
        created_at,
        extra,
    };
    places.push(place.clone());
    drop(places);
    (StatusCode::OK, Json(place)).into_response()
}

fn has_live_session(state: &StubState, headers: &HeaderMap) -> bool {
    let Some(token) = session_token(headers) else {
        return false;
    };
    state.sessions.lock().is_ok_and(|sessions| sessions.contains(&token))
}

/// Extracts the session token from the `Cookie` header.
fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
}

fn new_session_token() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().fold(String::with_capacity(32), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorEnvelope::new(message))).into_response()
}
