//! HTTP transport: maps routes onto [`SyncService`] calls.
//!
//! | Route                | Call                      |
//! |----------------------|---------------------------|
//! | `POST /update-board` | [`SyncService::submit`]   |
//! | `GET /board-state`   | [`SyncService::snapshot`] |
//! | `POST /reset`        | [`SyncService::reset`]    |
//! | `GET /ping`          | keep-alive                |
//! | `GET /`              | board visualizer page     |

use crate::config::RelayConfig;
use crate::error::{SyncError, SyncErrorKind};
use crate::sync::{Snapshot, SubmitRequest, SyncService};
use axum::extract::{FromRequest, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use std::net::{IpAddr, Ipv4Addr};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Builds the relay router around a shared service.
#[instrument(skip(service), fields(profile = %service.profile()))]
pub fn router(service: SyncService) -> Router {
    debug!("Building relay router");
    Router::new()
        .route("/", get(index))
        .route("/update-board", post(update_board))
        .route("/board-state", get(board_state))
        .route("/reset", post(reset))
        .route("/ping", get(ping))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(service)
}

/// Binds the configured address and serves until Ctrl+C.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: &RelayConfig) -> anyhow::Result<()> {
    let service = SyncService::new(*config.profile());
    let app = router(service);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    let addr = listener.local_addr()?;
    let shown = match local_ip().await {
        Some(ip) => ip,
        None => addr.ip(),
    };
    info!(%addr, profile = %config.profile(), "Server running at http://{}:{}", shown, addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Finds the LAN address other devices can reach this host on.
///
/// Connecting a UDP socket only selects a route; nothing is sent.
pub async fn local_ip() -> Option<IpAddr> {
    let socket = tokio::net::UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await.ok()?;
    socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80)).await.ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_unspecified()).then_some(ip)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

fn log_request(req: Request) -> Request {
    debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

/// Producer update, read from a JSON or urlencoded form body.
///
/// A body that does not parse is a [`SyncError`] like any other bad update,
/// so it answers 400 with the rejection text. Any other body is treated as an update with no fields, which the service
/// rejects as malformed.
#[derive(Debug)]
pub struct UpdatePayload(pub SubmitRequest);

impl<S> FromRequest<S> for UpdatePayload
where
    S: Send + Sync,
{
    type Rejection = SyncError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<SubmitRequest>::from_request(req, state)
                .await
                .map_err(|rejection| body_rejected(rejection.body_text()))?;
            Ok(Self(body))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<SubmitRequest>::from_request(req, state)
                .await
                .map_err(|rejection| body_rejected(rejection.body_text()))?;
            Ok(Self(body))
        } else {
            debug!(content_type, "Unrecognised update body");
            Ok(Self(SubmitRequest::default()))
        }
    }
}

fn body_rejected(reason: String) -> SyncError {
    warn!(%reason, "Rejected board update body");
    SyncError::malformed(reason)
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.kind.to_string()).into_response()
    }
}

async fn index() -> Html<&'static str> {
    info!("Serving board visualizer");
    Html(INDEX_HTML)
}

async fn update_board(
    State(service): State<SyncService>,
    UpdatePayload(request): UpdatePayload,
) -> Result<&'static str, SyncError> {
    service.submit(&request).inspect_err(|e| match e.kind() {
        SyncErrorKind::LengthMismatch { expected, actual } => {
            warn!(expected, actual, payload = ?request.state, "Rejected board update");
        }
        SyncErrorKind::MalformedPayload(reason) => {
            warn!(%reason, payload = ?request.state, "Rejected board update");
        }
    })?;
    Ok("OK")
}

async fn board_state(State(service): State<SyncService>) -> Json<Snapshot> {
    Json(service.snapshot())
}

async fn reset(State(service): State<SyncService>) -> Json<Snapshot> {
    service.reset();
    Json(service.snapshot())
}

async fn ping() -> &'static str {
    "pong"
}
