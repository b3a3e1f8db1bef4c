use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use display::{FlatRenderer, SimOutput};
use engine::command;
use engine::integrator::ANIM_STEP;
use engine::store::{ApplyError, StateStore};
use engine::ticker::{LiveSnapshot, RenderLoop, TickerConfig};
use shared::domain::SEGMENT_COUNT;
use shared::error::{ApiError, ErrorCode};
use shared::protocol::{ConfigResponse, HealthResponse, StatusResponse};
use shared::state::TargetState;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, info, warn};

mod config;

use config::{load_settings, Settings};

const MAX_COMMAND_BYTES: usize = 16 * 1024;

#[derive(Clone)]
struct AppState {
    store: Arc<StateStore>,
    status: watch::Receiver<LiveSnapshot>,
    settings: Settings,
    started_at: Instant,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();

    // Failing to acquire the output is the one fatal startup condition.
    let output = SimOutput::open(settings.panel_width, settings.panel_height)?;
    let renderer = FlatRenderer::new(settings.panel_width, settings.panel_height);

    let store = Arc::new(StateStore::new(TargetState::new(Instant::now())));
    let stop = Arc::new(AtomicBool::new(false));
    let (render_loop, status) = RenderLoop::new(
        Arc::clone(&store),
        Box::new(renderer),
        Box::new(output),
        TickerConfig {
            target_fps: settings.target_fps,
            blank_after: settings.blank_after_seconds,
            freeze_after: settings.freeze_after_seconds,
        },
        Arc::clone(&stop),
    );
    let render_thread = render_loop.spawn()?;

    let state = AppState {
        store,
        status,
        settings: settings.clone(),
        started_at: Instant::now(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "controller listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    stop.store(true, Ordering::Relaxed);
    if render_thread.join().is_err() {
        warn!("render thread panicked during shutdown");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown requested");
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/update", post(update))
        .route("/status", get(status))
        .route("/config", get(config_info))
        .route("/healthz", get(healthz))
        .layer(RequestBodyLimitLayer::new(MAX_COMMAND_BYTES))
        .layer(cors)
        .with_state(state)
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, Json<ApiError>)> {
    let presented = headers.get("x-api-token").and_then(|v| v.to_str().ok());
    if presented == Some(state.settings.api_token.as_str()) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiError::new(ErrorCode::Unauthorized, "unauthorized")),
        ))
    }
}

async fn update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<&'static str, (StatusCode, Json<ApiError>)> {
    authorize(&state, &headers)?;

    let cmd = command::parse(body.as_bytes()).map_err(|error| {
        debug!(%error, "rejected command");
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(ErrorCode::Validation, error.to_string())),
        )
    })?;

    let accepted = state
        .store
        .apply(&cmd, Instant::now())
        .map_err(|error: ApplyError| {
            debug!(%error, "rejected command");
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new(ErrorCode::Validation, error.to_string())),
            )
        })?;

    info!(
        mode = accepted.mode.name(),
        colour = accepted.colour_level,
        geometry = accepted.geometry.name(),
        "command accepted"
    );
    Ok("OK")
}

async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.status.borrow().clone();
    Json(StatusResponse {
        colour: snapshot.live.colour_level,
        geometry: snapshot.live.geometry,
        segments: snapshot.live.segments,
        age: snapshot.age,
        quiet: snapshot.quiet,
        mode: snapshot.live.mode,
        width: snapshot.live.element_width,
        percent: snapshot.live.percent,
    })
}

async fn config_info(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        width: state.settings.panel_width,
        height: state.settings.panel_height,
        segments: SEGMENT_COUNT as u32,
        blank_interval: state.settings.blank_after_seconds,
        anim_step: ANIM_STEP,
        target_fps: state.settings.target_fps,
    })
}

async fn healthz(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        uptime: state.started_at.elapsed().as_secs(),
    })
}
