//! Transcription and translation capabilities.
//!
//! Both are opaque remote capabilities: bytes or text in, text out, or fail.
//! Quota is never charged for a failed call; the handlers own that ordering.

use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;

use super::openai;

const MODEL: &str = "gpt-4o";
const MAX_TOKENS: u32 = 500;

const TRANSCRIBE_PROMPT: &str = "Please transcribe the Arabic text in this image, \
     preserving all diacritical marks (tashkeel). Return only the transcribed text \
     without any explanations or translations.";

const TRANSLATE_PROMPT: &str = "Translate the following Arabic text to English. \
     Return only the translation without any explanations.";

/// Extracts the Arabic text from an image.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, image: &[u8], mime_type: &str) -> Result<String>;
}

/// Translates Arabic text to English.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;
}

/// OpenAI implementation of both capabilities.
pub struct OpenAiInference {
    client: openai::Client,
}

impl OpenAiInference {
    pub fn new(client: openai::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transcriber for OpenAiInference {
    async fn transcribe(&self, image: &[u8], mime_type: &str) -> Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        let data_url = format!("data:{};base64,{}", mime_type, encoded);

        let request = openai::ChatRequest {
            model: MODEL,
            messages: vec![openai::Message {
                role: "user",
                content: openai::MessageContent::Parts(vec![
                    openai::ContentPart::Text {
                        text: TRANSCRIBE_PROMPT.to_string(),
                    },
                    openai::ContentPart::ImageUrl {
                        image_url: openai::ImageUrl { url: data_url },
                    },
                ]),
            }],
            max_tokens: MAX_TOKENS,
        };

        let text = self
            .client
            .chat_completion(&request)
            .await
            .map_err(|e| anyhow::anyhow!("transcription request failed: {}", e))?;

        Ok(text)
    }
}

#[async_trait]
impl Translator for OpenAiInference {
    async fn translate(&self, text: &str) -> Result<String> {
        let request = openai::ChatRequest {
            model: MODEL,
            messages: vec![
                openai::Message {
                    role: "system",
                    content: openai::MessageContent::Text(TRANSLATE_PROMPT.to_string()),
                },
                openai::Message {
                    role: "user",
                    content: openai::MessageContent::Text(text.to_string()),
                },
            ],
            max_tokens: MAX_TOKENS,
        };

        let translation = self
            .client
            .chat_completion(&request)
            .await
            .map_err(|e| anyhow::anyhow!("translation request failed: {}", e))?;

        Ok(translation)
    }
}
