//! API integration tests.
//!
//! The router is exercised end to end against an orchestrator wired with
//! in-memory collaborators, so no FFmpeg binary or network access is
//! needed.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use clipscout_api::{create_router, ApiConfig, AppState};
use clipscout_jobs::{AcquireAudio, JobOrchestrator, OrchestratorConfig, ProvideTranscript};
use clipscout_media::{AudioTrack, MediaError};
use clipscout_models::{MediaSource, Transcription};

const RATE: u32 = 100;

/// Produces one minute of constant tone regardless of the source.
struct ToneAcquirer;

#[async_trait]
impl AcquireAudio for ToneAcquirer {
    async fn acquire(
        &self,
        _source: &MediaSource,
        workdir: &Path,
    ) -> Result<AudioTrack, MediaError> {
        let wav_path = workdir.join("audio.wav");
        tokio::fs::write(&wav_path, b"RIFF").await?;
        Ok(AudioTrack {
            samples: vec![0.5; 60 * RATE as usize],
            sample_rate: RATE,
            wav_path,
        })
    }
}

/// Acquirer that outlives any test's patience, keeping jobs in processing.
struct StallingAcquirer;

#[async_trait]
impl AcquireAudio for StallingAcquirer {
    async fn acquire(
        &self,
        _source: &MediaSource,
        workdir: &Path,
    ) -> Result<AudioTrack, MediaError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(AudioTrack {
            samples: vec![0.5; RATE as usize],
            sample_rate: RATE,
            wav_path: workdir.join("audio.wav"),
        })
    }
}

struct NoTranscript;

#[async_trait]
impl ProvideTranscript for NoTranscript {
    async fn transcribe(&self, _wav_path: &Path) -> Transcription {
        Transcription::unavailable("disabled in tests")
    }
}

fn test_state(work_dir: &Path, acquirer: Arc<dyn AcquireAudio>) -> AppState {
    let config = OrchestratorConfig {
        work_dir: work_dir.to_path_buf(),
        ..Default::default()
    };
    let orchestrator = Arc::new(JobOrchestrator::new(
        config,
        acquirer,
        Arc::new(NoTranscript),
    ));
    AppState::with_orchestrator(ApiConfig::default(), orchestrator, false)
}

fn test_app(work_dir: &Path) -> Router {
    create_router(test_state(work_dir, Arc::new(ToneAcquirer)), None)
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a multipart POST from (name, filename, bytes) triples. An empty
/// filename produces a plain text part.
fn multipart_request(uri: &str, parts: &[(&str, &str, &[u8])]) -> Request<Body> {
    let boundary = "clipscout-test-boundary";
    let mut body = Vec::new();
    for (name, filename, bytes) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        if filename.is_empty() {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
        } else {
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn wait_for_completed(app: &Router, job_id: &str) -> Value {
    for _ in 0..500 {
        let response = get(app, &format!("/api/jobs/{job_id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let job = body_json(response).await;
        match job["status"].as_str() {
            Some("completed") => return job,
            Some("failed") => panic!("job failed: {job}"),
            _ => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    }
    panic!("job did not complete in time");
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_reports_transcription_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = get(&app, "/ready").await;
    // Readiness depends on FFmpeg being installed on the host, so only
    // the response shape is asserted here.
    assert!(
        response.status() == StatusCode::OK
            || response.status() == StatusCode::SERVICE_UNAVAILABLE
    );

    let body = body_json(response).await;
    assert_eq!(body["checks"]["transcription"]["status"], "disabled");
}

#[tokio::test]
async fn test_unknown_job_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = get(&app, "/api/jobs/no-such-job").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("Job not found"));
}

#[tokio::test]
async fn test_from_link_rejects_unknown_source() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let request = json_request(
        "/api/jobs/from-link",
        json!({"url": "https://www.youtube.com/watch?v=abc", "source": "vimeo"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("source must be 'youtube' or 'dropbox'"));
}

#[tokio::test]
async fn test_from_link_rejects_wrong_host() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let request = json_request(
        "/api/jobs/from-link",
        json!({"url": "https://vimeo.com/12345", "source": "youtube"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("Invalid YouTube URL"));
}

#[tokio::test]
async fn test_from_link_requires_url() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let request = json_request("/api/jobs/from-link", json!({"url": "", "source": "youtube"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("URL is required"));
}

#[tokio::test]
async fn test_from_link_job_runs_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let request = json_request(
        "/api/jobs/from-link",
        json!({"url": "https://www.youtube.com/watch?v=abc", "source": "youtube"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let job = body_json(response).await;
    assert_eq!(job["status"], "processing");
    let job_id = job["id"].as_str().unwrap().to_string();
    assert!(!job_id.is_empty());

    let done = wait_for_completed(&app, &job_id).await;
    let clips = done["clips"].as_array().unwrap();
    assert_eq!(clips.len(), 3);
    assert_eq!(clips[0]["rank"], 1);

    // Completed jobs serve their clips from the subresource as well
    let response = get(&app, &format!("/api/jobs/{job_id}/clips")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let clips = body_json(response).await;
    assert_eq!(clips.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_upload_job_honors_config_part() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let request = multipart_request(
        "/api/jobs",
        &[
            ("file", "talk.mp4", b"fake media bytes".as_slice()),
            ("config", "", br#"{"top_k": 2}"#.as_slice()),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let job = body_json(response).await;
    let job_id = job["id"].as_str().unwrap().to_string();

    let done = wait_for_completed(&app, &job_id).await;
    assert_eq!(done["clips"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_upload_with_empty_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let request = multipart_request("/api/jobs", &[("file", "talk.mp4", b"".as_slice())]);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Uploaded file is empty"));
}

#[tokio::test]
async fn test_upload_without_file_part_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let request = multipart_request("/api/jobs", &[("config", "", br#"{"top_k": 2}"#.as_slice())]);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("No file uploaded"));
}

#[tokio::test]
async fn test_upload_with_invalid_config_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let request = multipart_request(
        "/api/jobs",
        &[
            ("file", "talk.mp4", b"fake media bytes".as_slice()),
            ("config", "", br#"{"top_k": 0}"#.as_slice()),
        ],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("top_k"));
}

#[tokio::test]
async fn test_clips_of_processing_job_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path(), Arc::new(StallingAcquirer));
    let app = create_router(state, None);

    let request = json_request(
        "/api/jobs/from-link",
        json!({"url": "https://www.youtube.com/watch?v=abc", "source": "youtube"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let job = body_json(response).await;
    let job_id = job["id"].as_str().unwrap().to_string();

    let response = get(&app, &format!("/api/jobs/{job_id}/clips")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("not completed"));
}

#[tokio::test]
async fn test_security_headers_present() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = get(&app, "/health").await;
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("X-Frame-Options").unwrap(), "DENY");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("X-Request-ID", "test-request-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("X-Request-ID").unwrap(),
        "test-request-42"
    );
}
