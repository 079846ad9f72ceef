//! Job submission and status handlers.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use clipscout_models::{Clip, HighlightConfig, Job, JobId, JobStatus, MediaSource};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::validation::{validate_dropbox_url, validate_youtube_url};

/// POST /api/jobs
///
/// Accepts a multipart upload with a `file` part and an optional `config`
/// part carrying ranking parameter overrides as JSON. The job is queued
/// for analysis and its initial snapshot returned with 202.
pub async fn submit_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Job>)> {
    let mut upload: Option<(String, axum::body::Bytes)> = None;
    let mut config = HighlightConfig::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    return Err(ApiError::bad_request("No file uploaded"));
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
                upload = Some((filename, data));
            }
            "config" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read config: {e}")))?;
                config = serde_json::from_str(&raw)
                    .map_err(|e| ApiError::bad_request(format!("Invalid config: {e}")))?;
            }
            _ => {}
        }
    }

    let (filename, data) = upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    if data.is_empty() {
        return Err(ApiError::bad_request("Uploaded file is empty"));
    }

    // Only the extension of the client filename is trusted
    let suffix = filename_suffix(&filename);

    let uploads_dir = state.orchestrator.config().work_dir.join("uploads");
    tokio::fs::create_dir_all(&uploads_dir)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to prepare upload directory: {e}")))?;

    let path = uploads_dir.join(format!("{}{}", Uuid::new_v4(), suffix));
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store upload: {e}")))?;

    info!(
        path = %path.display(),
        bytes = data.len(),
        "Stored uploaded media"
    );

    let job = state
        .orchestrator
        .submit(MediaSource::Upload { path }, config)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(job)))
}

/// Body for link-based job submission.
#[derive(Debug, Deserialize, Validate)]
pub struct JobFromLinkRequest {
    /// Link to the source media
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
    /// Which service the link points at ("youtube" or "dropbox")
    pub source: String,
    /// Optional ranking parameter overrides
    #[serde(default)]
    pub config: Option<HighlightConfig>,
}

/// POST /api/jobs/from-link
///
/// Accepts a YouTube or Dropbox link and queues a job that downloads the
/// media before analysis.
pub async fn submit_from_link(
    State(state): State<AppState>,
    Json(body): Json<JobFromLinkRequest>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    body.validate()
        .map_err(|e| ApiError::bad_request(validation_message(&e)))?;

    let url = body.url.trim();
    if url.is_empty() {
        return Err(ApiError::bad_request("URL is required"));
    }

    let source = match body.source.to_lowercase().as_str() {
        "youtube" => MediaSource::Youtube {
            url: validate_youtube_url(url).map_err(ApiError::BadRequest)?,
        },
        "dropbox" => MediaSource::DirectUrl {
            url: validate_dropbox_url(url).map_err(ApiError::BadRequest)?,
        },
        _ => {
            return Err(ApiError::bad_request(
                "source must be 'youtube' or 'dropbox'",
            ))
        }
    };

    let job = state
        .orchestrator
        .submit(source, body.config.unwrap_or_default())
        .await?;

    Ok((StatusCode::ACCEPTED, Json(job)))
}

/// GET /api/jobs/:job_id
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Job>> {
    let id = JobId::from_string(job_id);
    let job = state
        .orchestrator
        .job(&id)
        .await
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    Ok(Json(job))
}

/// GET /api/jobs/:job_id/clips
///
/// Returns the ranked clips once the job has completed; 409 while it is
/// still processing or after it failed.
pub async fn get_job_clips(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Vec<Clip>>> {
    let id = JobId::from_string(job_id);
    let job = state
        .orchestrator
        .job(&id)
        .await
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    if job.status != JobStatus::Completed {
        return Err(ApiError::conflict(format!(
            "Job not completed yet (status={})",
            job.status.as_str()
        )));
    }

    Ok(Json(job.clips))
}

fn filename_suffix(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| ".mp4".to_string())
}

fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}
