//! HTTP endpoints: the WebSocket upgrade plus the read-only side channel.

use actix_web::error::ErrorInternalServerError;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder, Result};
use serde_json::json;

use crate::handler;
use crate::AppState;

/// Liveness probe with a couple of convenience counters.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> Result<impl Responder> {
    let stats = state
        .relay
        .stats()
        .await
        .map_err(ErrorInternalServerError)?;
    Ok(web::Json(json!({
        "status": "ok",
        "players": stats.players,
        "uptime": state.started_at.elapsed().as_secs(),
    })))
}

/// The current roster, for debugging and spectator pages. Read-only; the
/// authoritative copy never leaves the relay actor.
#[get("/api/players")]
pub async fn players(state: web::Data<AppState>) -> Result<impl Responder> {
    let players = state
        .relay
        .players()
        .await
        .map_err(ErrorInternalServerError)?;
    Ok(web::Json(json!({
        "count": players.len(),
        "players": players,
    })))
}

/// The WebSocket upgrade. The handler task is spawned without being awaited
/// so the 101 response goes out immediately.
#[get("/ws")]
pub async fn websocket(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (res, session, msg_stream) = actix_ws::handle(&req, stream)?;
    actix_web::rt::spawn(handler::handle_ws(
        state.relay.clone(),
        session,
        msg_stream,
    ));
    Ok(res)
}
