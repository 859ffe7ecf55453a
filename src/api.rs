//! JSON shapes exchanged with the learning backend.
//!
//! Only the encoding lives here. Sending requests is up to whoever embeds
//! the crate; the visualizer consumes `VisualizationPayload` values that
//! arrived with an analyze-code response or were saved to disk.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::visualizer::{Step, Value, VisualizationKind};
use crate::error::ApiError;

/// Backend routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Chat,
    AnalyzeCode,
    RunCode,
    PreviewHtml,
    PreviewMarkdown,
    AnalyzeGrammar,
    SessionStatus,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Chat => "/api/chat",
            Endpoint::AnalyzeCode => "/api/analyze-code",
            Endpoint::RunCode => "/api/run-code",
            Endpoint::PreviewHtml => "/api/preview-html",
            Endpoint::PreviewMarkdown => "/api/preview-markdown",
            Endpoint::AnalyzeGrammar => "/api/analyze-grammar",
            Endpoint::SessionStatus => "/api/session-status",
        }
    }

    /// Preview route for a file name, if the backend can render it
    pub fn preview_for(filename: &str) -> Option<Endpoint> {
        match crate::core::files::language_for(filename) {
            "html" => Some(Endpoint::PreviewHtml),
            "markdown" => Some(Endpoint::PreviewMarkdown),
            _ => None,
        }
    }
}

/// A request body together with its route and response type
pub trait ApiRequest: Serialize {
    type Response: DeserializeOwned;

    fn endpoint(&self) -> Endpoint;
}

/// Serialize `request` into `(path, body)`
pub fn encode_request<R: ApiRequest>(request: &R) -> Result<(&'static str, String), ApiError> {
    Ok((request.endpoint().path(), serde_json::to_string(request)?))
}

/// Decode a response body for `R`
pub fn decode_response<R: ApiRequest>(body: &str) -> Result<R::Response, ApiError> {
    Ok(serde_json::from_str(body)?)
}

// ==================== Visualization ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    pub array: Vec<Value>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationPayload {
    #[serde(rename = "type")]
    pub kind: VisualizationKind,
    pub data: VisualizationData,
}

/// Read a visualization from either a bare payload or a full
/// analyze-code response.
pub fn parse_visualization(json: &str) -> Result<VisualizationPayload, ApiError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let is_payload = value.get("type").is_some() && value.get("data").is_some();
    if is_payload {
        return Ok(serde_json::from_value(value)?);
    }

    let response: AnalyzeCodeResponse = serde_json::from_value(value)?;
    if let Some(error) = response.error {
        return Err(ApiError::Backend(error));
    }
    response.visualization.ok_or(ApiError::NoVisualization)
}

// ==================== Code analysis ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeCodeRequest {
    pub code: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeCodeResponse {
    #[serde(default)]
    pub analysis: Option<String>,
    /// Free-form; the backend currently always sends an empty list
    #[serde(default)]
    pub suggestions: Vec<serde_json::Value>,
    #[serde(default)]
    pub visualization: Option<VisualizationPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiRequest for AnalyzeCodeRequest {
    type Response = AnalyzeCodeResponse;

    fn endpoint(&self) -> Endpoint {
        Endpoint::AnalyzeCode
    }
}

// ==================== Code execution ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCodeRequest {
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub interactive: bool,
    /// Values fed to `input()` calls, in order
    #[serde(default)]
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCodeResponse {
    pub success: bool,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RunCodeResponse {
    /// Program output, or the backend's error text
    pub fn into_result(self) -> Result<String, ApiError> {
        if self.success {
            Ok(self.output.unwrap_or_default())
        } else {
            Err(ApiError::Backend(
                self.error.unwrap_or_else(|| "Execution failed".to_string()),
            ))
        }
    }
}

impl ApiRequest for RunCodeRequest {
    type Response = RunCodeResponse;

    fn endpoint(&self) -> Endpoint {
        Endpoint::RunCode
    }
}

// ==================== Chat ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Learn,
    Code,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "type")]
    pub mode: ChatMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub is_learning_mode: bool,
    #[serde(default)]
    pub suggested_topic: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiRequest for ChatRequest {
    type Response = ChatResponse;

    fn endpoint(&self) -> Endpoint {
        Endpoint::Chat
    }
}

// ==================== Preview ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub content: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub success: bool,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiRequest for PreviewRequest {
    type Response = PreviewResponse;

    fn endpoint(&self) -> Endpoint {
        Endpoint::preview_for(&self.filename).unwrap_or(Endpoint::PreviewHtml)
    }
}

// ==================== Grammar ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarRequest {
    pub content: String,
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarSuggestion {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarResponse {
    pub success: bool,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<GrammarSuggestion>,
    #[serde(default)]
    pub suggestions_count: usize,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiRequest for GrammarRequest {
    type Response = GrammarResponse;

    fn endpoint(&self) -> Endpoint {
        Endpoint::AnalyzeGrammar
    }
}

// ==================== Session ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_id: Option<String>,
    pub interactions: u64,
}
