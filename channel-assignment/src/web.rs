use std::sync::Mutex;

use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::{audit, AuditReport};
use crate::display::render_channel_sheet;
use crate::engine::{assign_channels, AssignmentOutcome, ChannelLayout, Performer};
use crate::roster::{resolve_roster, BookingRecord};

// Last result lives in memory only; riders are regenerated per request
pub struct AppState {
    pub default_layout: ChannelLayout,
    pub title: String,
    pub last_outcome: Mutex<Option<AssignmentOutcome>>,
}

impl AppState {
    pub fn new(default_layout: ChannelLayout, title: String) -> Self {
        AppState {
            default_layout,
            title,
            last_outcome: Mutex::new(None),
        }
    }
}

#[derive(Deserialize)]
pub struct AssignRequest {
    /// Falls back to the configured console when absent
    pub layout: Option<ChannelLayout>,
    pub roster: Vec<Performer>,
}

#[derive(Serialize)]
pub struct AssignResponse {
    #[serde(flatten)]
    pub outcome: AssignmentOutcome,
    pub unassigned_channels: usize,
    pub audit: AuditReport,
}

fn poisoned() -> actix_web::Error {
    actix_web::error::ErrorInternalServerError("state lock poisoned")
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

async fn get_layout(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.default_layout))
}

async fn post_assign(
    req: web::Json<AssignRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let AssignRequest { layout, roster } = req.into_inner();
    let layout = layout.unwrap_or_else(|| state.default_layout.clone());

    let outcome = assign_channels(&layout, &roster);
    let response = AssignResponse {
        unassigned_channels: outcome.layout.unassigned_applicable(),
        audit: audit(&outcome.layout),
        outcome: outcome.clone(),
    };

    *state.last_outcome.lock().map_err(|_| poisoned())? = Some(outcome);

    Ok(HttpResponse::Ok().json(response))
}

async fn post_resolve_roster(records: web::Json<Vec<BookingRecord>>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(resolve_roster(&records)))
}

async fn get_sheet(state: web::Data<AppState>) -> Result<HttpResponse> {
    let last = state.last_outcome.lock().map_err(|_| poisoned())?;

    if let Some(ref outcome) = *last {
        Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(render_channel_sheet(&state.title, &outcome.layout)))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No assignment available"})))
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/layout", web::get().to(get_layout))
        .route("/api/assign", web::post().to(post_assign))
        .route("/api/roster/resolve", web::post().to(post_resolve_roster))
        .route("/api/sheet", web::get().to(get_sheet));
}

pub async fn start_server(host: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);
    info!("Listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
