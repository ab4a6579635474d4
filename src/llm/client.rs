//! HTTP clients for the external embedding and chat services.
//!
//! Both services speak the Ollama wire contract: `POST {url}/api/embed`
//! takes `{"model", "input": [..]}` and answers `{"embeddings": [[..]]}`
//! index-aligned to the request; `POST {url}/api/chat` takes a message list
//! and answers an object with a `message.content` text field. Transient
//! failures (429, 5xx, network errors) are retried with exponential
//! backoff; anything terminal surfaces as `ServiceUnavailable`.

use crate::config::ServicesConfig;
use crate::error::{JobFinderError, Result};
use log::{debug, warn};
use std::time::Duration;

pub struct EmbeddingClient {
    client: reqwest::Client,
    url: String,
    model: String,
    max_retries: u32,
}

impl EmbeddingClient {
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            url: config.embedding.url.trim_end_matches('/').to_string(),
            model: config.embedding.model.clone(),
            max_retries: config.max_retries,
        })
    }

    /// Embed a batch of texts, returning one vector per input in request
    /// order. Batches of one are fine.
    pub async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        let body = serde_json::json!({
            "model": self.model,
            "input": inputs,
        });

        let url = format!("{}/api/embed", self.url);
        let json =
            post_with_retry(&self.client, &url, None, &body, self.max_retries, "embedding").await?;

        let vectors = parse_embed_response(&json)?;
        if vectors.len() != inputs.len() {
            return Err(service_error(
                "embedding",
                format!("expected {} vectors, got {}", inputs.len(), vectors.len()),
            ));
        }

        debug!("embedded batch of {}", inputs.len());
        Ok(vectors)
    }
}

pub struct ChatClient {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
    max_retries: u32,
}

impl ChatClient {
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let api_key = config
            .chat
            .api_key_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok());

        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            url: config.chat.url.trim_end_matches('/').to_string(),
            model: config.chat.model.clone(),
            api_key,
            max_retries: config.max_retries,
        })
    }

    /// Send a single-prompt chat request and return the raw response text.
    pub async fn chat(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "stream": false,
        });

        let url = format!("{}/api/chat", self.url);
        let json = post_with_retry(
            &self.client,
            &url,
            self.api_key.as_deref(),
            &body,
            self.max_retries,
            "chat",
        )
        .await?;

        parse_chat_response(&json)
    }
}

fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| JobFinderError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

fn service_error(service: &str, detail: String) -> JobFinderError {
    JobFinderError::ServiceUnavailable {
        service: service.to_string(),
        detail,
    }
}

/// POST a JSON body, retrying 429/5xx and network errors with exponential
/// backoff (1s, 2s, 4s, ... capped at 32s). Other client errors fail
/// immediately.
async fn post_with_retry(
    client: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
    body: &serde_json::Value,
    max_retries: u32,
    service: &str,
) -> Result<serde_json::Value> {
    let mut last_err = None;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            let delay = Duration::from_secs(1 << (attempt - 1).min(5));
            warn!("{} request failed, retrying in {:?}", service, delay);
            tokio::time::sleep(delay).await;
        }

        let mut request = client.post(url).json(body);
        if let Some(key) = bearer {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return response.json().await.map_err(|e| {
                        service_error(service, format!("invalid JSON response: {}", e))
                    });
                }

                let text = response.text().await.unwrap_or_default();
                if status.as_u16() == 429 || status.is_server_error() {
                    last_err = Some(service_error(service, format!("HTTP {}: {}", status, text)));
                    continue;
                }

                return Err(service_error(service, format!("HTTP {}: {}", status, text)));
            }
            Err(e) => {
                last_err = Some(service_error(service, e.to_string()));
                continue;
            }
        }
    }

    Err(last_err
        .unwrap_or_else(|| service_error(service, "request failed after retries".to_string())))
}

fn parse_embed_response(json: &serde_json::Value) -> Result<Vec<Vec<f32>>> {
    let arrays = json
        .get("embeddings")
        .and_then(|e| e.as_array())
        .ok_or_else(|| service_error("embedding", "missing embeddings array in response".into()))?;

    let mut vectors = Vec::with_capacity(arrays.len());
    for item in arrays {
        let values = item
            .as_array()
            .ok_or_else(|| service_error("embedding", "embeddings entry is not an array".into()))?;
        vectors.push(values.iter().map(|v| v.as_f64().unwrap_or(0.0) as f32).collect());
    }

    Ok(vectors)
}

fn parse_chat_response(json: &serde_json::Value) -> Result<String> {
    json.get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| service_error("chat", "missing message.content in response".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embed_response_aligned() {
        let json = serde_json::json!({
            "model": "nomic-embed-text:latest",
            "embeddings": [[0.1, 0.2], [0.3, 0.4]],
        });
        let vectors = parse_embed_response(&json).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], vec![0.1, 0.2]);
        assert_eq!(vectors[1], vec![0.3, 0.4]);
    }

    #[test]
    fn test_parse_embed_response_missing_field() {
        let json = serde_json::json!({ "model": "x" });
        assert!(parse_embed_response(&json).is_err());
    }

    #[test]
    fn test_parse_chat_response_content() {
        let json = serde_json::json!({
            "message": { "role": "assistant", "content": "{\"skills\": []}" },
        });
        assert_eq!(parse_chat_response(&json).unwrap(), "{\"skills\": []}");
    }

    #[test]
    fn test_parse_chat_response_unexpected_shape() {
        let json = serde_json::json!({ "choices": [] });
        assert!(parse_chat_response(&json).is_err());
    }
}
