//! Workout generation through an OpenAI compatible chat completions api

use std::{fmt, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{
    api::{payloads::GeneratedWorkout, response_errors::AiError},
    model::Profile,
};
use tracing::{debug, error, instrument};

use crate::cli::Cli;

mod prompt;
pub use prompt::*;

mod response;
pub use response::*;

/// Value shipped in example env files, treated as no key
const PLACEHOLDER_API_KEY: &str = "your-openai-api-key-here";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct AiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl fmt::Debug for AiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiClient")
            .field("configured", &self.is_configured())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl AiClient {
    pub fn from_args(args: &Cli) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(args.openai_timeout_secs))
            .build()?;

        let api_key = args
            .openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
            .map(str::to_string);

        Ok(Self {
            http,
            api_key,
            base_url: args.openai_base_url.trim_end_matches('/').to_string(),
            model: args.openai_model.clone(),
            temperature: args.openai_temperature,
            max_tokens: args.openai_max_tokens,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Asks the model for workout plans matching `prompt`, tailored to the
    /// physical data in `profile`
    #[instrument(skip(self, profile, prompt), fields(model = %self.model))]
    pub async fn generate_workouts(
        &self,
        profile: &Profile,
        prompt: &str,
    ) -> Result<Vec<GeneratedWorkout>, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured)?;

        let content = self.complete(api_key, &system_prompt(profile), prompt).await?;
        debug!(%content, "Model response");

        parse_workouts(&content)
    }

    async fn complete(&self, api_key: &str, system: &str, user: &str) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(upstream_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "Chat completion failed");
            return Err(AiError::Upstream {
                message: format!("status {status}"),
            });
        }

        let response: ChatResponse = response.json().await.map_err(upstream_error)?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

fn upstream_error(err: reqwest::Error) -> AiError {
    error!(?err, "Chat completion request failed");
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "unable to connect".to_string()
    } else if err.is_decode() {
        "unreadable response".to_string()
    } else {
        "request failed".to_string()
    };
    AiError::Upstream { message }
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::*;

    fn client(extra: &[&str]) -> AiClient {
        let args = Cli::parse_from(["gymtracker-server"].iter().chain(extra));
        AiClient::from_args(&args).unwrap()
    }

    #[test]
    fn test_missing_or_placeholder_key_is_not_configured() {
        assert!(!client(&["--openai-api-key", "your-openai-api-key-here"]).is_configured());
        assert!(!client(&["--openai-api-key", "  "]).is_configured());
        assert!(client(&["--openai-api-key", "sk-test"]).is_configured());
    }

    #[test]
    fn test_debug_hides_the_key() {
        let client = client(&["--openai-api-key", "sk-secret"]);
        assert!(!format!("{client:?}").contains("sk-secret"));
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "legs",
                },
            ],
            temperature: 0.5,
            max_tokens: 4000,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 4000);
        assert_eq!(json["temperature"], 0.5);
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_fast() {
        let profile = Profile {
            id: shared::types::Uuid::new_v4(),
            email: "ana@gym.io".to_string(),
            name: "Ana".to_string(),
            gender: None,
            height: None,
            weight: None,
            created_at: chrono::Utc::now(),
        };
        assert_eq!(
            client(&["--openai-api-key", "your-openai-api-key-here"])
                .generate_workouts(&profile, "leg day please")
                .await,
            Err(AiError::NotConfigured)
        );
    }
}
