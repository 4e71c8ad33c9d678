//! Planar Statics HTTP Server

use axum::{
    extract::{rejection::JsonRejection, Json},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use planar_statics::prelude::*;
use planar_statics::request::{
    BeamRequest, CenterOfMassRequest, CentroidRequest, ForceFromTorqueRequest, FrameRequest,
    SectionRequest, TorqueAtRequest, TrussRequest,
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8086;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct AnalysisResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<T>,
}

#[derive(Debug, Serialize)]
struct ForceResult {
    force: f64,
}

#[derive(Debug, Serialize)]
struct TorqueResult {
    torque: f64,
}

#[derive(Debug, Serialize)]
struct CenterOfMassResult {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Serialize)]
struct CentroidResult {
    x: f64,
    y: f64,
}

type Payload<T> = Result<Json<T>, JsonRejection>;

/// Unwrap an extracted body, turning rejections into statics errors
fn read_payload<T>(payload: Payload<T>) -> StaticsResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| StaticsError::MalformedRequest(rejection.body_text()))
}

/// Wrap a solver outcome in the response envelope
fn respond<T: Serialize>(route: &str, outcome: StaticsResult<T>) -> impl IntoResponse {
    match outcome {
        Ok(results) => (
            StatusCode::OK,
            Json(AnalysisResponse {
                success: true,
                error: None,
                kind: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            warn!("{route}: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(AnalysisResponse {
                    success: false,
                    error: Some(e.to_string()),
                    kind: Some(e.kind()),
                    results: None,
                }),
            )
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn analyze_beam(payload: Payload<BeamRequest>) -> impl IntoResponse {
    let outcome = read_payload(payload).and_then(|request| {
        let options = request.options()?;
        request.into_model()?.analyze(&options)
    });
    respond("beam", outcome)
}

async fn analyze_truss(payload: Payload<TrussRequest>) -> impl IntoResponse {
    let outcome = read_payload(payload)
        .and_then(TrussRequest::into_model)
        .and_then(|model| model.solve(&AnalysisOptions::default()));
    respond("truss", outcome)
}

async fn analyze_frame(payload: Payload<FrameRequest>) -> impl IntoResponse {
    let outcome = read_payload(payload)
        .and_then(FrameRequest::into_model)
        .and_then(|model| model.solve(&AnalysisOptions::default()));
    respond("frame", outcome)
}

async fn torque_at(payload: Payload<TorqueAtRequest>) -> impl IntoResponse {
    let outcome = read_payload(payload)
        .and_then(TorqueAtRequest::evaluate)
        .map(|torque| TorqueResult { torque });
    respond("torque-at", outcome)
}

async fn section(payload: Payload<SectionRequest>) -> impl IntoResponse {
    let outcome = read_payload(payload).and_then(SectionRequest::into_section);
    respond("section", outcome)
}

async fn centroid(payload: Payload<CentroidRequest>) -> impl IntoResponse {
    let outcome = read_payload(payload)
        .and_then(|request| composite_centroid(&request.shapes))
        .map(|p| CentroidResult { x: p.x, y: p.y });
    respond("centroid", outcome)
}

async fn center_of_mass(payload: Payload<CenterOfMassRequest>) -> impl IntoResponse {
    let outcome = read_payload(payload)
        .and_then(|request| center_of_mass_3d(&request.points))
        .map(|p| CenterOfMassResult {
            x: p.x,
            y: p.y,
            z: p.z,
        });
    respond("center-of-mass", outcome)
}

async fn force(payload: Payload<ForceFromTorqueRequest>) -> impl IntoResponse {
    let outcome = read_payload(payload)
        .and_then(|request| force_from_torque(request.torque, request.distance))
        .map(|force| ForceResult { force });
    respond("force-from-torque", outcome)
}

fn bind_address() -> anyhow::Result<SocketAddr> {
    let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = match std::env::var("PORT") {
        Ok(port) => port.parse::<u16>()?,
        Err(_) => DEFAULT_PORT,
    };
    Ok(format!("{host}:{port}").parse()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/beam", post(analyze_beam))
        .route("/api/v1/truss", post(analyze_truss))
        .route("/api/v1/frame", post(analyze_frame))
        .route("/api/v1/torque-at", post(torque_at))
        .route("/api/v1/section", post(section))
        .route("/api/v1/centroid", post(centroid))
        .route("/api/v1/center-of-mass", post(center_of_mass))
        .route("/api/v1/force-from-torque", post(force))
        .layer(cors);

    let addr = bind_address()?;
    info!("Planar Statics server listening on http://{addr}");
    info!("  Health check: GET  /health");
    info!("  Beam:         POST /api/v1/beam");
    info!("  Truss:        POST /api/v1/truss");
    info!("  Frame:        POST /api/v1/frame");
    info!("  Torque at x:  POST /api/v1/torque-at");
    info!("  Section:      POST /api/v1/section");
    info!("  Centroid:     POST /api/v1/centroid");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};

    async fn extract<T: serde::de::DeserializeOwned>(body: &'static str) -> Payload<T> {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        Json::<T>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_serialization_error() {
        let payload = extract::<BeamRequest>(r#"{"length": "#).await;
        let err = read_payload(payload).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);

        let missing = extract::<BeamRequest>(r#"{"torque": 1.0}"#).await;
        let err = read_payload(missing).unwrap_err();
        assert!(matches!(err, StaticsError::MalformedRequest(_)));
    }

    #[tokio::test]
    async fn test_well_formed_body_passes_through() {
        let payload = extract::<ForceFromTorqueRequest>(r#"{"torsor": 10.0, "distancia": 2.0}"#).await;
        let request = read_payload(payload).unwrap();
        assert_eq!(force_from_torque(request.torque, request.distance).unwrap(), 5.0);
    }
}
