//! Backend gateway: typed fetch wrappers over the Design AI Hub REST API.
//!
//! Every call attaches the session token as a bearer credential when one is
//! present, and every failure is normalized into [`ApiError`] before it
//! leaves this module; nothing downstream ever handles a raw `JsValue`.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

use hub_api_types::{
    AdminStats, AdminUser, AdminUsersResponse, AnalysisResult, AuthResponse, DesignResponse,
    HistoryEnvelope, HistoryResponse, LoginRequest, OauthRequest, PromptRequest, SignupRequest,
};

use crate::session;

const API_BASE: &str = "http://localhost:3000";

/// Client-side upload ceiling; anything larger is rejected before a single
/// byte goes over the wire.
pub const MAX_IMAGE_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

// ── Error type ──

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    /// HTTP status when the failure came from a response; `None` for
    /// transport-level failures and client-side validation.
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: None,
        }
    }

    fn with_status(message: impl Into<String>, status: u16) -> Self {
        ApiError {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

fn js_err(e: JsValue) -> ApiError {
    ApiError::new(format!("{:?}", e))
}

// ── Upload pre-validation ──

/// Reject non-image MIME types and oversized payloads before any network
/// call. `size` comes straight from `File::size()`, hence the `f64`.
pub fn validate_image(mime: &str, size: f64) -> Result<(), ApiError> {
    if !mime.starts_with("image/") {
        return Err(ApiError::new("Please upload a valid image file"));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ApiError::new("Image must be smaller than 5MB"));
    }
    Ok(())
}

// ── Generic fetch helpers ──

async fn send(
    method: &str,
    url: &str,
    body: Option<&JsValue>,
    json_body: bool,
) -> Result<Response, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = body {
        opts.set_body(body);
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
    let headers = request.headers();
    headers.set("Accept", "application/json").map_err(js_err)?;
    if json_body {
        // Multipart bodies must NOT get an explicit Content-Type; the
        // browser fills in the boundary itself.
        headers
            .set("Content-Type", "application/json")
            .map_err(js_err)?;
    }
    if let Some(token) = session::token() {
        headers
            .set("Authorization", &format!("Bearer {token}"))
            .map_err(js_err)?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::new("no global window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let resp: Response = resp_value.dyn_into().map_err(js_err)?;

    if resp.ok() {
        return Ok(resp);
    }
    Err(error_from_response(resp).await)
}

/// Pull a human-readable message out of a failed response, falling back to
/// the bare status code when the body is not the usual `{error}`/`{message}`
/// JSON.
async fn error_from_response(resp: Response) -> ApiError {
    let status = resp.status();
    let fallback = format!("Request failed with status {status}");
    let message = match resp.json() {
        Ok(promise) => match JsFuture::from(promise).await {
            Ok(json) => serde_wasm_bindgen::from_value::<serde_json::Value>(json)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .or_else(|| v.get("message"))
                        .and_then(|m| m.as_str().map(String::from))
                })
                .unwrap_or(fallback),
            Err(_) => fallback,
        },
        Err(_) => fallback,
    };
    ApiError::with_status(message, status)
}

async fn response_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let json = JsFuture::from(resp.json().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::new(format!("{:?}", e)))
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = send("GET", url, None, false).await?;
    response_json(resp).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, ApiError> {
    let body_str = serde_json::to_string(body).map_err(|e| ApiError::new(e.to_string()))?;
    let resp = send("POST", url, Some(&JsValue::from_str(&body_str)), true).await?;
    response_json(resp).await
}

/// POST a single file under the given multipart field name and return the
/// raw JSON body for caller-specific interpretation.
async fn post_multipart(
    url: &str,
    field: &str,
    file: &web_sys::File,
) -> Result<serde_json::Value, ApiError> {
    let form = FormData::new().map_err(js_err)?;
    form.append_with_blob(field, file).map_err(js_err)?;
    let resp = send("POST", url, Some(form.as_ref()), false).await?;
    response_json(resp).await
}

async fn delete_request(url: &str) -> Result<(), ApiError> {
    send("DELETE", url, None, false).await.map(|_| ())
}

// ── Auth operations ──

pub async fn signup(full_name: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let body = SignupRequest {
        full_name: full_name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    post_json(&format!("{API_BASE}/auth/signup"), &body).await
}

pub async fn login(email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let body = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    post_json(&format!("{API_BASE}/auth/login"), &body).await
}

pub async fn google_auth(code: &str) -> Result<AuthResponse, ApiError> {
    let body = OauthRequest {
        code: code.to_string(),
    };
    post_json(&format!("{API_BASE}/auth/google"), &body).await
}

pub async fn github_auth(code: &str) -> Result<AuthResponse, ApiError> {
    let body = OauthRequest {
        code: code.to_string(),
    };
    post_json(&format!("{API_BASE}/auth/github"), &body).await
}

/// Ask the backend whether the stored token is still good.
pub async fn verify() -> Result<AuthResponse, ApiError> {
    get_json(&format!("{API_BASE}/auth/verify")).await
}

// ── History ──

/// Callers pass the page size explicitly: the history page uses 6, the admin
/// user table 10.
pub async fn fetch_history(page: u32, limit: u32) -> Result<HistoryResponse, ApiError> {
    let envelope: HistoryEnvelope =
        get_json(&format!("{API_BASE}/api/history?page={page}&limit={limit}")).await?;
    Ok(envelope.data)
}

// ── Admin operations ──

pub async fn fetch_admin_users(page: u32, limit: u32) -> Result<AdminUsersResponse, ApiError> {
    get_json(&format!("{API_BASE}/admin/users?page={page}&limit={limit}")).await
}

pub async fn fetch_admin_user(id: &str) -> Result<AdminUser, ApiError> {
    get_json(&format!("{API_BASE}/admin/users/{id}")).await
}

pub async fn delete_admin_user(id: &str) -> Result<(), ApiError> {
    delete_request(&format!("{API_BASE}/admin/users/{id}")).await
}

pub async fn fetch_admin_stats() -> Result<AdminStats, ApiError> {
    get_json(&format!("{API_BASE}/admin/stats")).await
}

// ── Generation service ──

/// The generation/analysis surface the dashboard coordinator depends on.
/// A trait so tests can substitute a scripted implementation for the HTTP
/// one.
#[async_trait(?Send)]
pub trait DesignApi {
    /// Start a prompt-based generation job. The backend acknowledges the
    /// job; the rendered asset arrives later via [`DesignApi::latest_design`].
    async fn generate_from_prompt(&self, prompt: &str) -> Result<DesignResponse, ApiError>;

    /// Start an image-based generation job. May return partial design data
    /// synchronously.
    async fn generate_from_image(&self, file: &web_sys::File) -> Result<DesignResponse, ApiError>;

    /// Poll target: the most recent completed design, or an empty response
    /// while the job is still rendering.
    async fn latest_design(&self) -> Result<DesignResponse, ApiError>;

    /// Synchronous design critique; no polling involved.
    async fn analyze_design(&self, file: &web_sys::File) -> Result<AnalysisResult, ApiError>;
}

/// Production [`DesignApi`] backed by the REST endpoints above.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDesignApi;

#[async_trait(?Send)]
impl DesignApi for HttpDesignApi {
    async fn generate_from_prompt(&self, prompt: &str) -> Result<DesignResponse, ApiError> {
        let body = PromptRequest {
            prompt: prompt.to_string(),
        };
        post_json(&format!("{API_BASE}/get-design/tokens"), &body).await
    }

    async fn generate_from_image(&self, file: &web_sys::File) -> Result<DesignResponse, ApiError> {
        let value = post_multipart(
            &format!("{API_BASE}/get-design/generate-from-image"),
            "image",
            file,
        )
        .await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    async fn latest_design(&self) -> Result<DesignResponse, ApiError> {
        // An empty or null body means "not ready yet", not a failure.
        let value: serde_json::Value =
            get_json(&format!("{API_BASE}/get-design/latest-tokens")).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    async fn analyze_design(&self, file: &web_sys::File) -> Result<AnalysisResult, ApiError> {
        let value = post_multipart(&format!("{API_BASE}/analysis/analyze"), "image", file).await?;

        // The analysis backend has two reply shapes: the structured
        // categorized form, and a raw-text fallback (either a bare string
        // or `{rawAnalysis}`). Both normalize to `AnalysisResult`.
        if let Some(text) = value.as_str() {
            return Ok(AnalysisResult::from_raw_text(text));
        }
        if let Some(text) = value.get("rawAnalysis").and_then(|v| v.as_str()) {
            return Ok(AnalysisResult::from_raw_text(text));
        }
        serde_json::from_value(value)
            .map_err(|e| ApiError::new(format!("Unexpected analysis response: {e}")))
    }
}
