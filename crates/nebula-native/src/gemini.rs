//! Palette generation over the Gemini `generateContent` REST endpoint.

use anyhow::{anyhow, Context};
use nebula_core::{palette_schema, PaletteService};
use serde_json::{json, Value};
use std::time::Duration;

const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiService {
    agent: ureq::Agent,
    api_key: String,
    model: String,
}

impl GeminiService {
    pub fn new(api_key: String, model: String) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            api_key,
            model,
        }
    }

    fn url(&self) -> String {
        format!("{ENDPOINT}/{}:generateContent", self.model)
    }
}

/// Request body asking for a JSON answer constrained to the palette schema.
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": palette_schema()
        }
    })
}

/// Text of the first candidate's first part.
pub fn response_text(response: &Value) -> anyhow::Result<String> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no text in palette response"))
}

impl PaletteService for GeminiService {
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let response = self
            .agent
            .post(&self.url())
            .set("x-goog-api-key", &self.api_key)
            .send_json(request_body(prompt))
            .map_err(|e| anyhow!("palette request to {} failed: {e}", self.model))?;
        let body: Value = response
            .into_json()
            .context("palette response is not JSON")?;
        response_text(&body)
    }
}
