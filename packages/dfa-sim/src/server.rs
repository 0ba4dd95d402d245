use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use dfa_sim_lib::{
    automaton::{Dfa, builtin::BuiltinMachine, description::DfaDescription},
    config::ServerConfig,
    protocol::{self, MachineSummary, SimulateRequest, SimulateResponse, ValidateResponse},
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
};

pub fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?
        .block_on(start_server(config))
}

async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.address();
    let app = router(Arc::new(config))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind: {addr}"))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

pub fn router(config: Arc<ServerConfig>) -> anyhow::Result<Router> {
    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/simulate", post(simulate_handler))
        .route("/validate", post(validate_handler))
        .route("/machines", get(list_machines_handler))
        .route("/machines/{id}", get(machine_handler))
        .route("/", get(index_handler))
        .route("/style.css", get(css_handler))
        .route("/script.js", get(js_handler));

    for folder in ["assets", "examples"] {
        let dir = config.get_static_dir().join(folder);
        if dir.is_dir() {
            tracing::debug!("Serving {} at /{}", dir.display(), folder);
            app = app.nest_service(&format!("/{folder}"), ServeDir::new(dir));
        }
    }

    Ok(app
        .with_state(Arc::clone(&config))
        .layer(cors_layer(&config)?))
}

fn cors_layer(config: &ServerConfig) -> anyhow::Result<CorsLayer> {
    let origins = config.get_cors_origins();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins = origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin: {o}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn simulate_handler(Json(request): Json<SimulateRequest>) -> Json<SimulateResponse> {
    let response = protocol::simulate(&request);
    tracing::debug!(
        "Simulated {:?}: {} ({} states visited)",
        request.input_string,
        response.message,
        response.trace.len()
    );
    Json(response)
}

async fn validate_handler(Json(description): Json<DfaDescription>) -> Json<ValidateResponse> {
    Json(Dfa::from(&description).report().into())
}

async fn list_machines_handler() -> Json<Vec<MachineSummary>> {
    Json(
        BuiltinMachine::all()
            .iter()
            .copied()
            .map(MachineSummary::from)
            .collect(),
    )
}

async fn machine_handler(
    Path(id): Path<String>,
) -> Result<Json<DfaDescription>, (StatusCode, String)> {
    match id.parse::<BuiltinMachine>() {
        Ok(machine) => Ok(Json(machine.build().to_description())),
        Err(e) => Err((StatusCode::NOT_FOUND, e)),
    }
}

async fn index_handler(State(config): State<Arc<ServerConfig>>) -> Response {
    serve_frontend_file(config.get_static_dir().join("index.html"), "text/html; charset=utf-8").await
}

async fn css_handler(State(config): State<Arc<ServerConfig>>) -> Response {
    serve_frontend_file(config.get_static_dir().join("style.css"), "text/css").await
}

async fn js_handler(State(config): State<Arc<ServerConfig>>) -> Response {
    serve_frontend_file(
        config.get_static_dir().join("script.js"),
        "application/javascript",
    )
    .await
}

async fn serve_frontend_file(path: PathBuf, content_type: &'static str) -> Response {
    match tokio::fs::read(&path).await {
        Ok(content) => ([(header::CONTENT_TYPE, content_type)], content).into_response(),
        Err(e) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::warn!("Could not read {}: {}", path.display(), e);
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{name} not found") })),
            )
                .into_response()
        }
    }
}
