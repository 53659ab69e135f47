//! HTTP API server for the LUCID node.
//!
//! Provides REST endpoints for registration, linking, root resolution,
//! account aggregation, and credential lookups. Every request is forwarded
//! to the node event loop, which owns the registry.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;

use lucid_core::{Account, Address, Identity, IdentityId, RegistryError};

use crate::commands::{IdResponse, LinkResponse, RegistryCommand, RootResponse};
use crate::state::NodeState;

// --- Request / response types ---

#[derive(Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub uptime_secs: u64,
    pub identity_count: u64,
    pub path_compression: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

#[derive(Deserialize)]
pub struct RegisterSocialRequest {
    pub platform: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar_uri: String,
}

#[derive(Deserialize)]
pub struct RegisterWalletRequest {
    pub address: String,
}

#[derive(Deserialize)]
pub struct LinkRequest {
    pub ids: Vec<IdentityId>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

/// Map a registry error to an HTTP status and JSON body.
fn registry_error(e: RegistryError) -> ApiError {
    let status = match &e {
        RegistryError::UnknownIdentity(_) => StatusCode::NOT_FOUND,
        RegistryError::DuplicateCredential(_) => StatusCode::CONFLICT,
        RegistryError::InvalidAddress(_)
        | RegistryError::InvalidCredential(_)
        | RegistryError::InsufficientOperands(_) => StatusCode::BAD_REQUEST,
        RegistryError::Storage(_) | RegistryError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            kind: e.kind().to_string(),
        }),
    )
}

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
            kind: "Internal".into(),
        }),
    )
}

/// Malformed path parameters or JSON bodies, reported in the same shape as
/// registry errors.
fn bad_request(message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            kind: "InvalidRequest".into(),
        }),
    )
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(req)| req)
        .map_err(|rejection| bad_request(rejection.body_text()))
}

fn path_id(path: Result<Path<u64>, PathRejection>) -> Result<IdentityId, ApiError> {
    path.map(|Path(id)| IdentityId(id))
        .map_err(|rejection| bad_request(rejection.body_text()))
}

fn parse_address(raw: &str) -> Result<Address, ApiError> {
    raw.parse::<Address>().map_err(registry_error)
}

// --- Handlers ---

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn handle_status(State(state): State<Arc<NodeState>>) -> ApiResult<StatusResponse> {
    let (reply, reply_rx) = oneshot::channel();
    let stats = send_command_and_await(&state, RegistryCommand::Stats { reply }, reply_rx).await?;
    Ok(Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        identity_count: stats.identity_count,
        path_compression: stats.path_compression,
    }))
}

async fn handle_register_social(
    State(state): State<Arc<NodeState>>,
    body: Result<Json<RegisterSocialRequest>, JsonRejection>,
) -> ApiResult<IdResponse> {
    let req = json_body(body)?;
    let (reply, reply_rx) = oneshot::channel();
    let cmd = RegistryCommand::RegisterSocial {
        platform: req.platform,
        handle: req.handle,
        display_name: req.display_name,
        avatar_uri: req.avatar_uri,
        reply,
    };
    send_command_and_await(&state, cmd, reply_rx).await.map(Json)
}

async fn handle_register_wallet(
    State(state): State<Arc<NodeState>>,
    body: Result<Json<RegisterWalletRequest>, JsonRejection>,
) -> ApiResult<IdResponse> {
    let req = json_body(body)?;
    let address = parse_address(&req.address)?;
    let (reply, reply_rx) = oneshot::channel();
    let cmd = RegistryCommand::RegisterWallet { address, reply };
    send_command_and_await(&state, cmd, reply_rx).await.map(Json)
}

async fn handle_get_identity(
    State(state): State<Arc<NodeState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Identity> {
    let id = path_id(path)?;
    let (reply, reply_rx) = oneshot::channel();
    let cmd = RegistryCommand::GetIdentity { id, reply };
    send_command_and_await(&state, cmd, reply_rx).await.map(Json)
}

async fn handle_find_root(
    State(state): State<Arc<NodeState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<RootResponse> {
    let id = path_id(path)?;
    let (reply, reply_rx) = oneshot::channel();
    let cmd = RegistryCommand::FindRoot { id, reply };
    send_command_and_await(&state, cmd, reply_rx).await.map(Json)
}

async fn handle_link(
    State(state): State<Arc<NodeState>>,
    body: Result<Json<LinkRequest>, JsonRejection>,
) -> ApiResult<LinkResponse> {
    let req = json_body(body)?;
    let (reply, reply_rx) = oneshot::channel();
    let cmd = RegistryCommand::Link {
        ids: req.ids,
        reply,
    };
    send_command_and_await(&state, cmd, reply_rx).await.map(Json)
}

async fn handle_get_account(
    State(state): State<Arc<NodeState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Account> {
    let id = path_id(path)?;
    let (reply, reply_rx) = oneshot::channel();
    let cmd = RegistryCommand::GetAccount { id, reply };
    send_command_and_await(&state, cmd, reply_rx).await.map(Json)
}

async fn handle_lookup_social(
    State(state): State<Arc<NodeState>>,
    Path((platform, handle)): Path<(String, String)>,
) -> ApiResult<IdResponse> {
    let (reply, reply_rx) = oneshot::channel();
    let cmd = RegistryCommand::LookupSocial {
        platform,
        handle,
        reply,
    };
    send_command_and_await(&state, cmd, reply_rx).await.map(Json)
}

async fn handle_lookup_wallet(
    State(state): State<Arc<NodeState>>,
    Path(address): Path<String>,
) -> ApiResult<IdResponse> {
    let address = parse_address(&address)?;
    let (reply, reply_rx) = oneshot::channel();
    let cmd = RegistryCommand::LookupWallet { address, reply };
    send_command_and_await(&state, cmd, reply_rx).await.map(Json)
}

/// Helper to send a command and await the reply.
async fn send_command_and_await<T>(
    state: &Arc<NodeState>,
    cmd: RegistryCommand,
    reply_rx: oneshot::Receiver<Result<T, RegistryError>>,
) -> Result<T, ApiError> {
    state
        .command_tx
        .send(cmd)
        .await
        .map_err(|_| internal_error("node event loop not running"))?;

    match reply_rx.await {
        Ok(Ok(resp)) => Ok(resp),
        Ok(Err(e)) => Err(registry_error(e)),
        Err(_) => Err(internal_error("event loop dropped the reply channel")),
    }
}

// --- Server ---

pub fn build_router(state: Arc<NodeState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handle_health))
        .route("/api/v1/status", get(handle_status))
        .route("/api/v1/identities/social", post(handle_register_social))
        .route("/api/v1/identities/wallet", post(handle_register_wallet))
        .route("/api/v1/identities/{id}", get(handle_get_identity))
        .route("/api/v1/identities/{id}/root", get(handle_find_root))
        .route("/api/v1/link", post(handle_link))
        .route("/api/v1/accounts/{id}", get(handle_get_account))
        .route(
            "/api/v1/lookup/social/{platform}/{handle}",
            get(handle_lookup_social),
        )
        .route("/api/v1/lookup/wallet/{address}", get(handle_lookup_wallet))
        .with_state(state)
}

pub async fn start_api_server(
    listen_addr: SocketAddr,
    state: Arc<NodeState>,
) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(listener, app).await?;
    Ok(())
}
