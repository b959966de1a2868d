//! The analysis endpoint.
//!
//! `POST /api/analyze` accepts either a JSON body `{ "url": "..." }` naming a
//! product page on a supported site, or a multipart upload with an `image`
//! field. Responses use a uniform envelope: `{ "success": true, "data": ... }`
//! on success, `{ "success": false, "error": "..." }` otherwise — never a
//! partial success.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use labelcheck::{AcquireError, AnalysisError, ImageSource};

use crate::app::AppState;

#[derive(Deserialize)]
struct AnalyzeRequest {
    url: String,
}

/// Accepts JSON or multipart and runs the pipeline.
pub async fn analyze_handler(
    State(state): State<AppState>,
    request: Request,
) -> (StatusCode, Json<Value>) {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let multipart = match Multipart::from_request(request, &()).await {
            Ok(m) => m,
            Err(e) => return failure(StatusCode::BAD_REQUEST, format!("invalid multipart body: {e}")),
        };
        analyze_upload(&state, multipart).await
    } else {
        let Json(body) = match Json::<AnalyzeRequest>::from_request(request, &()).await {
            Ok(json) => json,
            Err(e) => return failure(StatusCode::BAD_REQUEST, format!("invalid request body: {e}")),
        };
        info!(url = %body.url, "analyze request");
        run_pipeline(&state, &ImageSource::Url(body.url)).await
    }
}

/// Pull the `image` field out of the multipart body, stage it on disk, and
/// run the pipeline against the staged file.
async fn analyze_upload(state: &AppState, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    let mut image_bytes = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("image") {
                    match field.bytes().await {
                        Ok(bytes) => {
                            image_bytes = Some(bytes);
                            break;
                        }
                        Err(e) => {
                            return failure(
                                StatusCode::BAD_REQUEST,
                                format!("could not read image field: {e}"),
                            )
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return failure(StatusCode::BAD_REQUEST, format!("invalid multipart body: {e}"))
            }
        }
    }

    let Some(bytes) = image_bytes else {
        return failure(StatusCode::BAD_REQUEST, "missing \"image\" field".to_string());
    };
    info!(bytes = bytes.len(), "analyze upload");

    let staged = std::env::temp_dir().join(format!(
        "labelcheck-upload-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default()
    ));
    if let Err(e) = tokio::fs::write(&staged, &bytes).await {
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("could not stage upload: {e}"),
        );
    }

    let response = run_pipeline(state, &ImageSource::LocalPath(staged.clone())).await;
    tokio::fs::remove_file(&staged).await.ok();
    response
}

async fn run_pipeline(state: &AppState, source: &ImageSource) -> (StatusCode, Json<Value>) {
    match state.pipeline.run_with_analysis(source).await {
        Ok((record, analysis)) => {
            let mut data = match serde_json::to_value(&record) {
                Ok(value) => value,
                Err(e) => {
                    error!(error = %e, "record serialization failed");
                    return failure(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal serialization error".to_string(),
                    );
                }
            };
            if let Value::Object(ref mut map) = data {
                map.insert("analysis".to_string(), Value::String(analysis));
            }
            (StatusCode::OK, Json(json!({ "success": true, "data": data })))
        }
        Err(e) => {
            error!(error = %e, source = %source.describe(), "analysis failed");
            failure(status_for(&e), e.to_string())
        }
    }
}

/// Map pipeline errors onto HTTP status codes: caller mistakes are 400,
/// upstream trouble (sites, model, search) is 502, everything else 500.
fn status_for(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::Acquire(
            AcquireError::InvalidUrl { .. } | AcquireError::UnsupportedSite { .. },
        ) => StatusCode::BAD_REQUEST,
        AnalysisError::Acquire(_) | AnalysisError::AcquisitionFailure { .. } => {
            StatusCode::BAD_GATEWAY
        }
        AnalysisError::MalformedModelOutput { .. }
        | AnalysisError::Model(_)
        | AnalysisError::Search(_) => StatusCode::BAD_GATEWAY,
        AnalysisError::ReferenceDataUnavailable(_) | AnalysisError::Config(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn failure(status: StatusCode, error: String) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "error": error })))
}
