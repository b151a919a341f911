use gloo_console::error;
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use thiserror::Error;

use shared::{AnalysisEnvelope, AnalysisTypeInfo, AuthStatus};

const AUTH_CHECK: &str = "/auth/check";
const AUTH_LOGOUT: &str = "/auth/logout";
const ANALYSIS_TYPES: &str = "/fashion/analysis-types";
const UPLOAD_ANALYZE: &str = "/fashion/upload-analyze";
const TEST_ANALYZE: &str = "/fashion/test-analyze";

#[derive(Error, Clone, Debug)]
pub enum ApiError {
    #[error("Server error: {0}")]
    Status(u16),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

pub async fn check_auth() -> Result<AuthStatus, ApiError> {
    get_json(AUTH_CHECK).await
}

pub async fn fetch_analysis_types() -> Result<Vec<AnalysisTypeInfo>, ApiError> {
    get_json(ANALYSIS_TYPES).await
}

/// Multipart upload of the retained image; the analysis type rides in the
/// query string, matching the backend contract.
pub async fn upload_analyze(
    file: &GlooFile,
    analysis_type: &str,
) -> Result<AnalysisEnvelope, ApiError> {
    let form_data =
        web_sys::FormData::new().map_err(|_| ApiError::Network("form assembly failed".into()))?;
    form_data
        .append_with_blob("file", file.as_ref())
        .map_err(|_| ApiError::Network("form assembly failed".into()))?;

    let url = format!("{UPLOAD_ANALYZE}?analysis_type={analysis_type}");
    let request = Request::post(&url)
        .body(form_data)
        .map_err(|err| ApiError::Network(err.to_string()))?;
    read_envelope(&url, request).await
}

pub async fn self_test() -> Result<AnalysisEnvelope, ApiError> {
    let request = Request::post(TEST_ANALYZE)
        .build()
        .map_err(|err| ApiError::Network(err.to_string()))?;
    read_envelope(TEST_ANALYZE, request).await
}

pub async fn logout() -> Result<(), ApiError> {
    let response = Request::post(AUTH_LOGOUT)
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(())
}

async fn read_envelope(
    url: &str,
    request: gloo_net::http::Request,
) -> Result<AnalysisEnvelope, ApiError> {
    let response = request.send().await.map_err(|err| {
        error!(format!("POST {url} failed: {err:?}"));
        ApiError::Network(err.to_string())
    })?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json::<AnalysisEnvelope>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url).send().await.map_err(|err| {
        error!(format!("GET {url} failed: {err:?}"));
        ApiError::Network(err.to_string())
    })?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}
