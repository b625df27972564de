use anyhow::{Context, Result};
use axum::extract::{Path, Query};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::DiagramSettings;
use crate::diagram::catalog::{FuseTypeId, FuseTypeParseError};
use crate::diagram::renderer::{DiagramScene, FuseDiagramRenderInput, FuseDiagramRenderer};
use crate::diagram::selection::SelectionState;
use crate::diagram::svg::scene_to_svg;
use crate::diagram::zone::ZoneCategory;
use crate::lookup::FuseLocation;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Extra parameters such as cache busters are ignored.
#[derive(Debug, Default, Deserialize)]
struct DiagramQuery {
    selected: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/diagram", post(handle_lookup_diagram))
        .route("/diagram/:category", get(handle_diagram_svg))
        .route("/diagram/:category/scene", get(handle_diagram_scene))
}

pub async fn run_http_server(settings: &DiagramSettings) -> Result<()> {
    let bind = settings.bind.as_str();
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind HTTP server to `{bind}`"))?;
    let local_addr = listener.local_addr().ok();

    info!(
        requested_bind = %bind,
        bound_addr = local_addr.map(|addr| addr.to_string()),
        "starting fuse diagram HTTP server"
    );

    axum::serve(listener, router())
        .await
        .context("HTTP server exited with an error")
}

async fn handle_health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn handle_diagram_svg(
    Path(category): Path<String>,
    Query(query): Query<DiagramQuery>,
) -> Response {
    match scene_for(&category, query.selected.as_deref()) {
        Ok(scene) => svg_response(&scene),
        Err(error) => rejected(error),
    }
}

async fn handle_diagram_scene(
    Path(category): Path<String>,
    Query(query): Query<DiagramQuery>,
) -> Response {
    match scene_for(&category, query.selected.as_deref()) {
        Ok(scene) => (StatusCode::OK, Json(scene)).into_response(),
        Err(error) => rejected(error),
    }
}

async fn handle_lookup_diagram(Json(location): Json<FuseLocation>) -> Response {
    info!(
        category = %location.location_category,
        fuse_number = %location.fuse_number,
        circuit = %location.circuit,
        "rendering diagram for fuse lookup"
    );
    let selection = SelectionState::default();
    let scene = FuseDiagramRenderer::render(FuseDiagramRenderInput {
        category: location.location_category,
        selection: &selection,
    });
    svg_response(&scene)
}

fn scene_for(category: &str, selected: Option<&str>) -> Result<DiagramScene, FuseTypeParseError> {
    let category = ZoneCategory::parse_lenient(category);
    let selected = selected
        .filter(|value| !value.trim().is_empty())
        .map(str::parse::<FuseTypeId>)
        .transpose()?;

    let selection = SelectionState::with_selected(selected);
    Ok(FuseDiagramRenderer::render(FuseDiagramRenderInput {
        category,
        selection: &selection,
    }))
}

fn rejected(error: FuseTypeParseError) -> Response {
    warn!(error = %error, "rejected diagram request");
    error_response(StatusCode::BAD_REQUEST, error.to_string())
}

fn svg_response(scene: &DiagramScene) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, SVG_CONTENT_TYPE)],
        scene_to_svg(scene),
    )
        .into_response()
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}
