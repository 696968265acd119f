//! Orchestrates one visitor query end to end.

use tracing::{info, warn};
use uuid::Uuid;

use crate::prompts::GuidePrompt;
use crate::responder::Responder;
use crate::tools::Toolbox;

/// The conversational mall guide.
///
/// Owns a responder and a toolbox. Queries are independent of each other;
/// each gets a fresh request id, used for log correlation only.
pub struct MallGuide<R> {
    responder: R,
    tools: Box<dyn Toolbox>,
}

impl<R: Responder> MallGuide<R> {
    #[must_use]
    pub fn new(responder: R, tools: Box<dyn Toolbox>) -> Self {
        Self { responder, tools }
    }

    /// Answers one visitor query, always returning display text.
    ///
    /// Responder failures are logged and rendered as the search-error line
    /// instead of propagating.
    pub async fn find_store(&self, query: &str) -> String {
        let request_id = Uuid::new_v4();
        info!(%request_id, query, "visitor query");

        let prompt = GuidePrompt::for_query(query);
        match self.responder.respond(&prompt, self.tools.as_ref()).await {
            Ok(answer) => {
                info!(%request_id, answer_len = answer.len(), "visitor query answered");
                render_results(query, &answer)
            }
            Err(e) => {
                warn!(%request_id, error = %e, "visitor query failed");
                format!("⚠️ Search error: {e}")
            }
        }
    }
}

/// The fixed results block around the responder's answer.
fn render_results(query: &str, answer: &str) -> String {
    format!(
        "🏬 Mall of America Results\n\
         ========================\n\
         Search: \"{query}\"\n\
         \n\
         {answer}\n\
         \n\
         ℹ️ Visit information desk for directions"
    )
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::chat::ToolDefinition;
    use crate::error::{AgentError, ToolError};

    /// Responder scripted with either a fixed answer or a failure.
    struct CannedResponder(Option<String>);

    #[async_trait]
    impl Responder for CannedResponder {
        async fn respond(
            &self,
            _prompt: &GuidePrompt,
            _tools: &dyn Toolbox,
        ) -> Result<String, AgentError> {
            match &self.0 {
                Some(answer) => Ok(answer.clone()),
                None => Err(AgentError::NoChoices),
            }
        }
    }

    /// Responder that answers with the user prompt it was handed.
    struct EchoPromptResponder;

    #[async_trait]
    impl Responder for EchoPromptResponder {
        async fn respond(
            &self,
            prompt: &GuidePrompt,
            _tools: &dyn Toolbox,
        ) -> Result<String, AgentError> {
            Ok(prompt.user.clone())
        }
    }

    struct NoTools;

    #[async_trait]
    impl Toolbox for NoTools {
        fn definitions(&self) -> Vec<ToolDefinition> {
            Vec::new()
        }

        async fn invoke(&self, name: &str, _arguments: &str) -> Result<String, ToolError> {
            Err(ToolError::UnknownTool(name.to_owned()))
        }
    }

    #[tokio::test]
    async fn find_store_wraps_the_answer_in_the_results_block() {
        let responder = CannedResponder(Some("Try Caribou Coffee on Level 1! ☕".to_owned()));
        let guide = MallGuide::new(responder, Box::new(NoTools));

        let output = guide.find_store("hot coffee").await;

        assert!(output.starts_with("🏬 Mall of America Results"), "got: {output}");
        assert!(output.contains("========================"));
        assert!(output.contains("Search: \"hot coffee\""));
        assert!(output.contains("Try Caribou Coffee on Level 1! ☕"));
        assert!(
            output.ends_with("ℹ️ Visit information desk for directions"),
            "got: {output}"
        );
    }

    #[tokio::test]
    async fn find_store_passes_the_query_to_the_responder() {
        let guide = MallGuide::new(EchoPromptResponder, Box::new(NoTools));
        let output = guide.find_store("kids clothes").await;
        assert!(output.contains("Find stores in Mall of America matching: kids clothes"));
    }

    #[tokio::test]
    async fn find_store_renders_the_error_line_on_responder_failure() {
        let guide = MallGuide::new(CannedResponder(None), Box::new(NoTools));
        let output = guide.find_store("anything").await;
        assert!(output.starts_with("⚠️ Search error:"), "got: {output}");
        assert!(output.contains("no choices"), "got: {output}");
    }
}
