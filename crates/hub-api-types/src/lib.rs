//! Shared API types for the Design AI Hub frontend.
//!
//! This crate provides the wire-format types exchanged with the backend so
//! the UI and any future service share one set of definitions. The backend
//! serializes in camelCase and omits fields freely, so every response field
//! carries `#[serde(default)]`.

use serde::{Deserialize, Serialize};

// ── Identity ──

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: String,
    pub user: ApiUser,
}

// ── Design generation ──

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(default)]
    pub font_family: String,
    #[serde(default)]
    pub font_size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub typography: Typography,
}

/// Result of a generation job. `design_image` is base64-encoded PNG data;
/// it is absent while the job is still rendering.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DesignResponse {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub design_image: Option<String>,
    #[serde(default)]
    pub design_tokens: Option<DesignTokens>,
}

impl DesignResponse {
    /// A poll result counts as ready only once the rendered image is present.
    pub fn has_image(&self) -> bool {
        self.design_image
            .as_deref()
            .is_some_and(|img| !img.is_empty())
    }
}

// ── History ──

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub design_image: Option<String>,
    #[serde(default)]
    pub design_tokens: Option<DesignTokens>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryItem>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// The history endpoint wraps its payload in a `data` envelope; the gateway
/// unwraps it before anything else sees the response.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEnvelope {
    pub data: HistoryResponse,
}

// ── Design analysis ──

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DesignIssue {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub severity: u8,
    #[serde(default)]
    pub color_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    #[serde(default)]
    pub critical: Option<Vec<DesignIssue>>,
    #[serde(default)]
    pub moderate: Option<Vec<DesignIssue>>,
    #[serde(default)]
    pub suggestions: Option<Vec<DesignIssue>>,
    /// Unstructured fallback when the backend could not produce categories.
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl AnalysisData {
    pub fn is_structured(&self) -> bool {
        self.critical.is_some() || self.moderate.is_some() || self.suggestions.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub analysis: AnalysisData,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AnalysisResult {
    /// Wrap a raw-text backend reply in the structured shape callers expect.
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        AnalysisResult {
            id: None,
            analysis: AnalysisData {
                raw_text: Some(text.into()),
                ..AnalysisData::default()
            },
            created_at: None,
        }
    }
}

// ── Admin ──

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub total_designs: u64,
    #[serde(default)]
    pub total_analyses: u64,
    #[serde(default)]
    pub last_active: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub stats: UserStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminUsersResponse {
    #[serde(default)]
    pub users: Vec<AdminUser>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub total_designs: u64,
    #[serde(default)]
    pub total_analyses: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub designs: u64,
    #[serde(default)]
    pub analyses: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub overview: AdminOverview,
    #[serde(default)]
    pub daily_stats: Vec<DailyStat>,
}

// ── Request bodies ──

#[derive(Debug, Serialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// OAuth code exchange body shared by the Google and GitHub endpoints.
#[derive(Debug, Serialize)]
pub struct OauthRequest {
    pub code: String,
}
