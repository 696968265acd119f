//! The external reasoning collaborator and its OpenAI-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::chat::{ApiErrorBody, ChatCompletion, ChatMessage, ChatRequest, ToolPayload};
use crate::error::AgentError;
use crate::prompts::GuidePrompt;
use crate::tools::Toolbox;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Request timeout for chat completions. Model responses are slow compared to
/// the directory fetch, so this is generous and fixed.
const CHAT_TIMEOUT_SECS: u64 = 60;

/// An external reasoning service that answers one prompt, consulting the
/// toolbox as it sees fit.
///
/// The guide never depends on how an implementation sequences tool calls —
/// only on getting free text back.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produces the free-text answer for one prompt.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] when the underlying service fails or never
    /// settles on an answer.
    async fn respond(
        &self,
        prompt: &GuidePrompt,
        tools: &dyn Toolbox,
    ) -> Result<String, AgentError>;
}

/// [`Responder`] backed by an OpenAI-compatible chat-completions API.
///
/// Drives the tool-calling loop: while the assistant requests tool calls,
/// each is executed through the toolbox and its output appended to the
/// transcript as a `tool` message, then the conversation is re-submitted.
/// A plain assistant message ends the loop. Tool failures go back to the
/// model as text rather than aborting, so it can recover or answer without
/// the tool; `max_tool_steps` bounds the whole exchange.
pub struct OpenAiResponder {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tool_steps: usize,
}

impl OpenAiResponder {
    /// Creates a responder pointed at the production OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        temperature: f32,
        max_tool_steps: usize,
    ) -> Result<Self, AgentError> {
        Self::with_base_url(api_key, model, temperature, max_tool_steps, DEFAULT_BASE_URL)
    }

    /// Creates a responder with a custom base URL (for testing with wiremock
    /// or routing through a compatible gateway).
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        temperature: f32,
        max_tool_steps: usize,
        base_url: &str,
    ) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(CHAT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("byteguide/0.1 (mall-guide)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            temperature,
            max_tool_steps,
        })
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolPayload],
    ) -> Result<ChatCompletion, AgentError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            tools: tools.to_vec(),
            temperature: self.temperature,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AgentError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let completion =
            serde_json::from_str::<ChatCompletion>(&body).map_err(|e| AgentError::Deserialize {
                context: format!("chat completion from {url}"),
                source: e,
            })?;

        if let Some(usage) = &completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl Responder for OpenAiResponder {
    async fn respond(
        &self,
        prompt: &GuidePrompt,
        tools: &dyn Toolbox,
    ) -> Result<String, AgentError> {
        let mut messages = vec![
            ChatMessage::system(prompt.system.as_str()),
            ChatMessage::user(prompt.user.as_str()),
        ];
        let tool_payloads: Vec<ToolPayload> = tools
            .definitions()
            .into_iter()
            .map(ToolPayload::from)
            .collect();

        for _ in 0..self.max_tool_steps {
            let completion = self.complete(&messages, &tool_payloads).await?;
            let choice = completion
                .choices
                .into_iter()
                .next()
                .ok_or(AgentError::NoChoices)?;
            let message = choice.message;

            let Some(tool_calls) = message.tool_calls.clone().filter(|calls| !calls.is_empty())
            else {
                return Ok(message.content.unwrap_or_default());
            };

            // Echo the assistant turn back, then answer each of its calls.
            messages.push(message);
            for call in tool_calls {
                let output = match tools
                    .invoke(&call.function.name, &call.function.arguments)
                    .await
                {
                    Ok(output) => output,
                    Err(e) => format!("Tool error: {e}"),
                };
                debug!(
                    tool = %call.function.name,
                    output_len = output.len(),
                    "tool call completed"
                );
                messages.push(ChatMessage::tool(call.id, output));
            }
        }

        Err(AgentError::ToolLoopLimit {
            max_steps: self.max_tool_steps,
        })
    }
}

/// Extracts the API's error message from a non-2xx body, falling back to a
/// truncated raw snippet when the envelope does not parse.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_prefers_the_envelope() {
        let body = r#"{"error": {"message": "Invalid API key", "type": "auth"}}"#;
        assert_eq!(api_error_message(body), "Invalid API key");
    }

    #[test]
    fn api_error_message_falls_back_to_a_snippet() {
        assert_eq!(api_error_message("<html>bad gateway</html>"), "<html>bad gateway</html>");
        let long = "x".repeat(500);
        assert_eq!(api_error_message(&long).chars().count(), 200);
    }
}
