//! Request and response bodies of the Gemini `generateContent` REST endpoint,
//! kept free of any HTTP dependency so replies can be decoded offline.

use crate::error::{DashboardError, Result};
use crate::insights::types::Citation;
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_json_schema: serde_json::Value,
}

impl GenerationConfig {
    /// Constrains the reply to JSON matching `T`.
    pub fn json_for<T: JsonSchema>() -> Result<Self> {
        Ok(Self {
            response_mime_type: "application/json".to_string(),
            response_json_schema: response_schema::<T>()?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: serde_json::Value,
}

impl Tool {
    pub fn google_search() -> Self {
        Self {
            google_search: serde_json::json!({}),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerateContentRequest {
    pub fn text(prompt: &str) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: None,
            tools: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Result<String> {
        let candidate = self.candidates.first().ok_or_else(|| {
            DashboardError::ProviderError("No candidates returned".to_string())
        })?;
        let content = candidate.content.as_ref().ok_or_else(|| {
            DashboardError::ProviderError("Candidate has no content".to_string())
        })?;

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            return Err(DashboardError::ProviderError(
                "Model returned no text content".to_string(),
            ));
        }
        Ok(text)
    }

    /// Web sources from the first candidate's grounding metadata. Chunks
    /// without a URI are skipped.
    pub fn citations(&self) -> Vec<Citation> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| {
                        web.uri.as_ref().map(|uri| Citation {
                            uri: uri.clone(),
                            title: web.title.clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// JSON Schema for `T` with every subschema inlined, since the endpoint does
/// not resolve `definitions` references.
pub fn response_schema<T: JsonSchema>() -> Result<serde_json::Value> {
    let schema = SchemaSettings::draft07()
        .with(|s| {
            s.inline_subschemas = true;
            s.meta_schema = None;
        })
        .into_generator()
        .into_root_schema_for::<T>();
    Ok(serde_json::to_value(schema)?)
}
