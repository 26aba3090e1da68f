//! Google Translate text-to-speech adapter

use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};

use crate::application::ports::{SpeechError, SpeechSynthesizer};
use crate::domain::speech::{AudioData, SpeechOptions};

use super::chunker::{split_text, MAX_CHUNK_CHARS};

/// RPC id of the speech method on the batchexecute endpoint
const RPC_ID: &str = "jQ1olc";

/// Path of the batchexecute endpoint below the Translate host
const BATCH_EXECUTE_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Text-to-speech through the Google Translate web endpoint
pub struct GoogleTranslateTts {
    base_url: String,
    options: SpeechOptions,
    client: reqwest::Client,
}

impl GoogleTranslateTts {
    /// Create a synthesizer targeting `translate.google.<tld>`
    pub fn new(options: SpeechOptions) -> Self {
        let base_url = format!("https://translate.google.{}", options.tld);
        Self::with_base_url(base_url, options)
    }

    /// Create a synthesizer against a custom host (used by tests)
    pub fn with_base_url(base_url: impl Into<String>, options: SpeechOptions) -> Self {
        Self {
            base_url: base_url.into(),
            options,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), BATCH_EXECUTE_PATH)
    }

    /// Build the `f.req` payload for one chunk
    fn build_rpc(&self, chunk: &str) -> String {
        let speed = if self.options.slow {
            Value::Bool(true)
        } else {
            Value::Null
        };
        // The inner parameter list travels as a JSON string inside the RPC
        let parameter = json!([chunk, self.options.language, speed, "null"]).to_string();
        json!([[[RPC_ID, parameter, Value::Null, "generic"]]]).to_string()
    }

    /// Pull the base64 audio out of a batchexecute response body
    fn extract_audio(body: &str) -> Result<Vec<u8>, SpeechError> {
        const MARKER: &str = "jQ1olc\",\"[\\\"";
        const END: &str = "\\\"]";

        for line in body.lines().filter(|l| l.contains(RPC_ID)) {
            let Some(start) = line.find(MARKER) else {
                continue;
            };
            let rest = &line[start + MARKER.len()..];
            let Some(end) = rest.find(END) else {
                continue;
            };
            let encoded = &rest[..end];
            if encoded.is_empty() {
                continue;
            }
            return base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| SpeechError::DecodeError(e.to_string()));
        }

        Err(SpeechError::EmptyResponse)
    }

    async fn synthesize_chunk(&self, chunk: &str) -> Result<Vec<u8>, SpeechError> {
        let rpc = self.build_rpc(chunk);
        let url = self.endpoint();

        tracing::debug!(%url, chars = chunk.chars().count(), "requesting speech chunk");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::REFERER, "http://translate.google.com/")
            .form(&[("f.req", rpc.as_str())])
            .send()
            .await
            .map_err(|e| SpeechError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SpeechError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SpeechError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SpeechError::RequestFailed(e.to_string()))?;

        Self::extract_audio(&body)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str) -> Result<AudioData, SpeechError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let mut audio = AudioData::mp3(Vec::new());
        for chunk in &chunks {
            audio.append(AudioData::mp3(self.synthesize_chunk(chunk).await?));
        }

        if audio.is_empty() {
            return Err(SpeechError::EmptyResponse);
        }

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tts(options: SpeechOptions) -> GoogleTranslateTts {
        GoogleTranslateTts::with_base_url("http://localhost", options)
    }

    #[test]
    fn default_host_uses_tld() {
        let tts = GoogleTranslateTts::new(SpeechOptions {
            tld: "co.uk".to_string(),
            ..Default::default()
        });
        assert_eq!(
            tts.endpoint(),
            "https://translate.google.co.uk/_/TranslateWebserverUi/data/batchexecute"
        );
    }

    #[test]
    fn rpc_has_nested_parameter_string() {
        let rpc = tts(SpeechOptions::default()).build_rpc("Hello");
        assert_eq!(
            rpc,
            r#"[[["jQ1olc","[\"Hello\",\"en\",null,\"null\"]",null,"generic"]]]"#
        );
    }

    #[test]
    fn rpc_marks_slow_speech() {
        let rpc = tts(SpeechOptions {
            slow: true,
            language: "fr".to_string(),
            ..Default::default()
        })
        .build_rpc("Bonjour");
        assert!(rpc.contains(r#"\"fr\",true,"#));
    }

    #[test]
    fn extracts_audio_payload() {
        let body = ")]}'\n\n123\n[[\"wrb.fr\",\"jQ1olc\",\"[\\\"AQID\\\"]\",null,null,null,\"generic\"]]\n";
        let audio = GoogleTranslateTts::extract_audio(body).unwrap();
        assert_eq!(audio, vec![1, 2, 3]);
    }

    #[test]
    fn missing_payload_is_empty_response() {
        let body = ")]}'\n\n[[\"wrb.fr\",\"jQ1olc\",null,null,null,[3],\"generic\"]]";
        assert!(matches!(
            GoogleTranslateTts::extract_audio(body),
            Err(SpeechError::EmptyResponse)
        ));
    }

    #[test]
    fn invalid_base64_is_decode_error() {
        let body = "[[\"wrb.fr\",\"jQ1olc\",\"[\\\"!!!\\\"]\"]]";
        assert!(matches!(
            GoogleTranslateTts::extract_audio(body),
            Err(SpeechError::DecodeError(_))
        ));
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_request() {
        let result = tts(SpeechOptions::default()).synthesize("  ").await;
        assert!(matches!(result, Err(SpeechError::EmptyText)));
    }
}
