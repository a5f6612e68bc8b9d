//! Remote embedding provider for OpenAI-compatible `/embeddings` endpoints.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use super::{EmbeddingError, EmbeddingProvider};
use crate::config::EmbeddingConfig;

/// Output size of `text-embedding-3-small`, used when the model is not recognized.
const DEFAULT_DIMENSIONS: usize = 1536;

pub struct RemoteEmbeddingProvider {
    http: Client,
    url: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl RemoteEmbeddingProvider {
    /// Build from config, reading the API key from the configured environment variable.
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| EmbeddingError::MissingApiKey {
                var: config.api_key_env.clone(),
            })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: format!("{}/embeddings", config.api_base.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            dimensions: model_dimensions(&config.model),
        })
    }
}

impl EmbeddingProvider for RemoteEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = serde_json::json!({
            "input": text,
            "model": self.model,
        });

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response
            .json()
            .map_err(|e| EmbeddingError::MalformedResponse(e.to_string()))?;
        parse_embedding_response(&json)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}

fn model_dimensions(model: &str) -> usize {
    match model {
        "text-embedding-3-large" => 3072,
        "text-embedding-3-small" | "text-embedding-ada-002" => 1536,
        _ => DEFAULT_DIMENSIONS,
    }
}

/// Pull `data[0].embedding` out of an `/embeddings` response.
fn parse_embedding_response(json: &Value) -> Result<Vec<f32>, EmbeddingError> {
    let first = json
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| EmbeddingError::MalformedResponse("missing data array".into()))?
        .first()
        .ok_or_else(|| EmbeddingError::MalformedResponse("no embedding returned".into()))?;

    let values = first
        .get("embedding")
        .and_then(|v| v.as_array())
        .ok_or_else(|| EmbeddingError::MalformedResponse("item missing embedding array".into()))?;

    let embedding = values
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|n| n as f32)
                .ok_or_else(|| EmbeddingError::MalformedResponse("embedding value must be numeric".into()))
        })
        .collect::<Result<Vec<f32>, _>>()?;

    if embedding.is_empty() {
        return Err(EmbeddingError::EmptyEmbedding);
    }
    Ok(embedding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_embedding() {
        let json = serde_json::json!({
            "object": "list",
            "data": [{ "object": "embedding", "index": 0, "embedding": [0.5, -1.5, 2.0] }],
            "model": "text-embedding-3-small"
        });
        let parsed = parse_embedding_response(&json).unwrap();
        assert_eq!(parsed, vec![0.5, -1.5, 2.0]);
    }

    #[test]
    fn empty_data_is_malformed() {
        let json = serde_json::json!({ "data": [] });
        let err = parse_embedding_response(&json).unwrap_err();
        assert!(matches!(err, EmbeddingError::MalformedResponse(_)));
    }

    #[test]
    fn missing_data_is_malformed() {
        let json = serde_json::json!({ "error": { "message": "bad key" } });
        assert!(matches!(
            parse_embedding_response(&json),
            Err(EmbeddingError::MalformedResponse(_))
        ));
    }

    #[test]
    fn non_numeric_values_are_malformed() {
        let json = serde_json::json!({ "data": [{ "embedding": [1.0, "x"] }] });
        assert!(matches!(
            parse_embedding_response(&json),
            Err(EmbeddingError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_vector_is_rejected() {
        let json = serde_json::json!({ "data": [{ "embedding": [] }] });
        assert!(matches!(
            parse_embedding_response(&json),
            Err(EmbeddingError::EmptyEmbedding)
        ));
    }

    #[test]
    fn known_model_dimensions() {
        assert_eq!(model_dimensions("text-embedding-3-small"), 1536);
        assert_eq!(model_dimensions("text-embedding-3-large"), 3072);
        assert_eq!(model_dimensions("something-else"), DEFAULT_DIMENSIONS);
    }

    #[test]
    fn missing_key_is_reported_by_variable_name() {
        let config = EmbeddingConfig {
            api_key_env: "BRAIN_REMOTE_TEST_KEY_NEVER_SET".into(),
            ..EmbeddingConfig::default()
        };
        let err = RemoteEmbeddingProvider::from_config(&config).err().unwrap();
        assert!(matches!(err, EmbeddingError::MissingApiKey { ref var } if var == "BRAIN_REMOTE_TEST_KEY_NEVER_SET"));
    }
}
