//! AI design studio
//!
//! The "Create Your Tattoo" feature talks to a generative backend twice: a
//! text model suggests design ideas for a concept, and an image model
//! renders a flash-sheet design for a description. This module owns the
//! reproducible parts (prompt shaping, idea-list parsing, error surfacing)
//! and hides the transport behind [`DesignStudio`] so the backend can be a
//! real HTTP service or a canned stand-in.

use crate::{Artifact, Error, Result};

/// Style chips offered next to the prompt box.
pub const STYLE_PRESETS: [&str; 8] = [
    "Neo Traditional",
    "Watercolor",
    "Realism",
    "Minimalist",
    "Black & Grey",
    "Japanese",
    "Cartoon",
    "Abstract",
];

/// System instruction for the idea consultant.
pub const CONSULTANT_INSTRUCTION: &str = "You are an expert tattoo consultant specializing in \
symbolism and creative concepts. Provide thoughtful, inspiring, and concise ideas for tattoos. \
Your tone is knowledgeable, slightly edgy, and creative, matching the vibe of a high-end tattoo \
studio.";

/// Wrap a raw description into the image prompt the studio always uses.
pub fn flash_sheet_prompt(description: &str) -> String {
    format!(
        "A high-quality, detailed tattoo design of {}. The design must be centered on a clean, \
         solid white background, suitable for a tattoo flash sheet.",
        description
    )
}

/// Ask the text model for three ideas around a concept.
pub fn idea_prompt(concept: &str) -> String {
    format!(
        "Based on the concept \"{}\", generate 3 distinct and creative tattoo ideas. For each \
         idea, provide a short, evocative description. Format the response as a numbered list \
         (e.g., \"1. Idea description\").",
        concept
    )
}

/// Append a style chip to a prompt, or start a prompt from the chip alone.
pub fn with_style_preset(prompt: &str, style: &str) -> String {
    let style = style.to_lowercase();
    if prompt.is_empty() {
        format!("A tattoo in a {} style", style)
    } else {
        format!("{}, in a {} style", prompt, style)
    }
}

fn strip_list_number(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }
    rest.strip_prefix('.').map(str::trim_start)
}

/// Keep only the `N. …` lines of a model response, stripped of their
/// numbering, in order.
pub fn parse_idea_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(strip_list_number)
        .map(str::to_string)
        .collect()
}

/// The generative backend behind the design studio.
pub trait DesignStudio: Send + Sync {
    /// Three-ish short design ideas for a concept.
    fn suggest_ideas(&self, concept: &str) -> Result<Vec<String>>;

    /// Render a flash-sheet design for a description.
    fn render_design(&self, description: &str) -> Result<Artifact>;
}

/// In-memory studio serving scripted responses; used in tests and demos.
pub struct CannedStudio {
    ideas_text: String,
    design: Artifact,
}

impl CannedStudio {
    pub fn new(ideas_text: impl Into<String>, design: Artifact) -> Self {
        CannedStudio {
            ideas_text: ideas_text.into(),
            design,
        }
    }
}

impl DesignStudio for CannedStudio {
    fn suggest_ideas(&self, concept: &str) -> Result<Vec<String>> {
        if concept.trim().is_empty() {
            return Err(Error::Designer("Please enter a topic for ideas.".into()));
        }
        Ok(parse_idea_list(&self.ideas_text))
    }

    fn render_design(&self, description: &str) -> Result<Artifact> {
        if description.trim().is_empty() {
            return Err(Error::Designer(
                "Please describe the tattoo you want to create.".into(),
            ));
        }
        Ok(self.design.clone())
    }
}

#[cfg(feature = "designer")]
pub use http::{DesignerConfig, HttpDesignStudio};

#[cfg(feature = "designer")]
mod http {
    use std::time::Duration;

    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;
    use serde_json::json;
    use url::Url;

    use super::{flash_sheet_prompt, idea_prompt, DesignStudio, CONSULTANT_INSTRUCTION};
    use crate::{Artifact, Error, Result};

    const IDEAS_BUSY: &str = "The AI consultant is busy. Please try again in a moment.";
    const IMAGE_BUSY: &str = "The AI is a bit busy. Please try again in a moment.";

    /// Connection settings for the generative backend.
    #[derive(Debug, Clone)]
    pub struct DesignerConfig {
        /// Base URL of the backend, e.g. `https://ai.example.com/v1`
        pub endpoint: String,
        /// Text model used for idea suggestions
        pub idea_model: String,
        /// Image model used for flash-sheet renders
        pub image_model: String,
        /// API key sent as `x-api-key`; empty sends no key
        pub api_key: String,
        /// Per-request timeout in milliseconds
        pub timeout_ms: u64,
    }

    impl Default for DesignerConfig {
        fn default() -> Self {
            DesignerConfig {
                endpoint: "https://ai.corruptink.example/v1".to_string(),
                idea_model: "gemini-2.5-flash".to_string(),
                image_model: "imagen-3.0-generate-002".to_string(),
                api_key: String::new(),
                timeout_ms: 30000,
            }
        }
    }

    /// Blocking HTTP client for the generative backend.
    pub struct HttpDesignStudio {
        client: reqwest::blocking::Client,
        base: String,
        config: DesignerConfig,
    }

    impl HttpDesignStudio {
        pub fn new(config: DesignerConfig) -> Result<Self> {
            let base = config.endpoint.trim_end_matches('/').to_string();
            Url::parse(&base)
                .map_err(|e| Error::ConfigError(format!("Bad designer endpoint: {}", e)))?;
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
            Ok(HttpDesignStudio {
                client,
                base,
                config,
            })
        }

        fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value> {
            let url = format!("{}/{}", self.base, path);
            let mut request = self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .body(body.to_string());
            if !self.config.api_key.is_empty() {
                request = request.header("x-api-key", self.config.api_key.clone());
            }
            let response = request
                .send()
                .map_err(|e| Error::Designer(format!("Request to {} failed: {}", path, e)))?;
            if !response.status().is_success() {
                return Err(Error::Designer(format!(
                    "{} returned HTTP {}",
                    path,
                    response.status()
                )));
            }
            let text = response
                .text()
                .map_err(|e| Error::Designer(format!("Failed to read {} response: {}", path, e)))?;
            serde_json::from_str(&text)
                .map_err(|e| Error::Designer(format!("Bad JSON from {}: {}", path, e)))
        }
    }

    impl DesignStudio for HttpDesignStudio {
        fn suggest_ideas(&self, concept: &str) -> Result<Vec<String>> {
            if concept.trim().is_empty() {
                return Err(Error::Designer("Please enter a topic for ideas.".into()));
            }
            let body = json!({
                "model": self.config.idea_model,
                "prompt": idea_prompt(concept),
                "systemInstruction": CONSULTANT_INSTRUCTION,
            });
            let value = self.post("ideas", body).map_err(|e| {
                log::warn!("idea suggestion failed: {}", e);
                Error::Designer(IDEAS_BUSY.into())
            })?;
            let text = value
                .get("text")
                .and_then(|t| t.as_str())
                .ok_or_else(|| {
                    log::warn!("idea response missing text field");
                    Error::Designer(IDEAS_BUSY.into())
                })?;
            Ok(super::parse_idea_list(text))
        }

        fn render_design(&self, description: &str) -> Result<Artifact> {
            if description.trim().is_empty() {
                return Err(Error::Designer(
                    "Please describe the tattoo you want to create.".into(),
                ));
            }
            let body = json!({
                "model": self.config.image_model,
                "prompt": flash_sheet_prompt(description),
                "numberOfImages": 1,
                "outputMimeType": "image/jpeg",
                "aspectRatio": "1:1",
            });
            let value = self.post("designs", body).map_err(|e| {
                log::warn!("design render failed: {}", e);
                Error::Designer(IMAGE_BUSY.into())
            })?;
            let encoded = value
                .pointer("/generatedImages/0/image/imageBytes")
                .and_then(|b| b.as_str())
                .ok_or_else(|| {
                    log::warn!("design response missing image bytes");
                    Error::Designer(IMAGE_BUSY.into())
                })?;
            let bytes = BASE64.decode(encoded).map_err(|e| {
                log::warn!("design response image bytes not base64: {}", e);
                Error::Designer(IMAGE_BUSY.into())
            })?;
            Ok(Artifact::from_bytes("image/jpeg", bytes))
        }
    }
}
