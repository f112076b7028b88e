use crate::config::{PipelineConfig, ServerConfig};
use crate::decoder::Symbology;
use crate::decoders::{self, DecoderInfo};
use crate::detection::BoundingBox;
use crate::error::QrError;
use crate::pipeline::{DecodePipeline, DecodeResult, DecodeTier, StepTiming};
use crate::preprocessing::Enhancement;
use crate::selection::{self, SelectionRect};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DecodePipeline>,
    pub config: Arc<ServerConfig>,
}

/// Decode response
#[derive(Debug, Serialize)]
pub struct DecodeResponse {
    pub found: bool,
    pub text: Option<String>,
    pub symbology: Option<Symbology>,
    pub tier: Option<DecodeTier>,
    pub region: Option<BoundingBox>,
    pub enhancement: Option<Enhancement>,
    pub processing_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub decoder: DecoderInfo,
    pub max_file_size_bytes: usize,
    pub pipeline: PipelineConfig,
}

/// Run the HTTP server
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let decoder = decoders::default_decoder()?;
    let pipeline = DecodePipeline::with_config(decoder, config.pipeline);
    let addr = format!("{}:{}", config.host, config.port);

    let state = AppState {
        pipeline: Arc::new(pipeline),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/decode", post(handle_decode))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle decode requests
async fn handle_decode(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DecodeResponse>, QrError> {
    let start = Instant::now();

    let mut file_data: Option<Bytes> = None;
    let mut selection_fields: [Option<String>; 4] = Default::default();

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| QrError::InvalidRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let slot = match name.as_str() {
            "file" => {
                file_data = Some(field.bytes().await.map_err(|e| {
                    QrError::InvalidRequest(format!("Failed to read file data: {}", e))
                })?);
                continue;
            }
            "x" => 0,
            "y" => 1,
            "width" => 2,
            "height" => 3,
            _ => continue,
        };
        selection_fields[slot] = Some(field.text().await.map_err(|e| {
            QrError::InvalidRequest(format!("Invalid selection field {}: {}", name, e))
        })?);
    }

    let data = file_data.ok_or(QrError::MissingFile)?;

    if data.len() > state.config.max_file_size {
        return Err(QrError::ImageTooLarge {
            size: data.len(),
            max: state.config.max_file_size,
        });
    }

    let selection = parse_selection(selection_fields)?;

    let capture = image::load_from_memory(&data)
        .map_err(|e| QrError::ImageLoad(e.to_string()))?
        .to_rgb8();
    let capture = match selection {
        Some(rect) => selection::crop(&capture, &rect)?,
        None => capture,
    };

    // The pipeline is CPU-bound; keep it off the async workers
    let pipeline = Arc::clone(&state.pipeline);
    let report = tokio::task::spawn_blocking(move || pipeline.run(&capture))
        .await
        .map_err(|e| QrError::Internal(format!("Decode task failed: {}", e)))?;

    let processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        "Decode completed in {}ms, found: {}, tier: {:?}",
        processing_time_ms,
        report.result.is_found(),
        report.tier
    );

    let (found, text, symbology) = match report.result {
        DecodeResult::Found { text, symbology } => (true, Some(text), Some(symbology)),
        DecodeResult::NotFound => (false, None, None),
    };

    Ok(Json(DecodeResponse {
        found,
        text,
        symbology,
        tier: report.tier,
        region: report.region,
        enhancement: report.enhancement,
        processing_time_ms,
        steps: report.steps,
    }))
}

/// All four selection fields or none of them
fn parse_selection(fields: [Option<String>; 4]) -> Result<Option<SelectionRect>, QrError> {
    match fields {
        [None, None, None, None] => Ok(None),
        [Some(x), Some(y), Some(w), Some(h)] => {
            format!("{},{},{},{}", x, y, w, h).parse().map(Some)
        }
        _ => Err(QrError::InvalidRequest(
            "Selection needs all of x, y, width and height".to_string(),
        )),
    }
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        decoder: DecoderInfo::of(state.pipeline.decoder()),
        max_file_size_bytes: state.config.max_file_size,
        pipeline: *state.pipeline.config(),
    })
}
