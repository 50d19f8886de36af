// src/web/types.rs - JSON envelopes shared by every API route

use crate::error::AnalyzerError;
use crate::report::ProfileReport;
use crate::text_analysis::{AnnotationSpan, TaggedToken};
use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct AnalyzeProfileRequest {
    pub profile_url: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct AnnotateRequest {
    pub text: String,
    #[serde(default)]
    pub include_tags: bool,
}

/// A request payload plus the caller's conversation id, echoed back on reply
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl<T> StandardRequest<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            conversation_id: None,
        }
    }

    pub fn in_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    pub fn into_parts(self) -> (T, Option<String>) {
        (self.data, self.conversation_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_format: Option<DisplayFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl<T> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message: message.into(),
            data,
            display_format: None,
            conversation_id: None,
        }
    }

    pub fn with_display_format(mut self, display_format: DisplayFormat) -> Self {
        self.display_format = Some(display_format);
        self
    }

    pub fn in_conversation(mut self, conversation_id: Option<String>) -> Self {
        self.conversation_id = conversation_id;
        self
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl StandardErrorResponse {
    pub fn new(error: impl Into<String>, error_code: &str, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error: error.into(),
            error_code: error_code.to_string(),
            suggestions,
            conversation_id: None,
        }
    }

    pub fn bad_request(error: impl Into<String>, suggestion: &str) -> Self {
        Self::new(error, "BAD_REQUEST", vec![suggestion.to_string()])
    }

    pub fn in_conversation(mut self, conversation_id: Option<String>) -> Self {
        self.conversation_id = conversation_id;
        self
    }
}

impl From<&AnalyzerError> for StandardErrorResponse {
    fn from(e: &AnalyzerError) -> Self {
        Self::new(e.to_string(), e.code(), e.suggestions())
    }
}

/// Rendering hints for chat-style clients
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DisplayFormat {
    #[serde(rename = "type")]
    pub layout: DisplayLayout,
    pub sections: Vec<DisplaySection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "snake_case")]
pub enum DisplayLayout {
    ProfileAnalysis,
    Annotation,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DisplaySection {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<String>,
}

pub type ProfileAnalysisData = ProfileReport;

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AnnotationData {
    pub tagger_version: String,
    pub matches: Vec<AnnotationSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<TaggedToken>>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthData {
    pub status: String,
    pub tagger_version: String,
    pub rule_count: usize,
}
