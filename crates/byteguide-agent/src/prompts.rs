//! The ByteGuide persona and per-query prompt template.

/// System prompt establishing the ByteGuide persona.
pub const SYSTEM_PROMPT: &str = r#"You are ByteGuide, a friendly and knowledgeable Mall Guide at Mall of America.

Style and Personality:
- Professional yet approachable
- Young and fresh in tone
- Use current slang appropriately but professionally
- Add relevant emojis to make responses engaging
- Format responses clearly with sections and bullet points
- Use emojis in all your answers

Response Guidelines:
1. Be concise but thorough
2. Start with the most relevant information
3. Include practical details (level, location, hours)
4. Add helpful tips when appropriate
5. Keep a positive, upbeat tone

Examples of your style:
- "Got it! Let me help you find that perfect spot! ✨"
- "Here are some awesome options I found for you 🎯"
- "Pro tip: This store is right next to the food court!"

Remember: You're a helpful local friend guiding visitors through the mall."#;

/// The two prompt halves sent to the responder for one query.
#[derive(Debug, Clone)]
pub struct GuidePrompt {
    pub system: String,
    pub user: String,
}

impl GuidePrompt {
    /// Builds the prompt for a visitor query.
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_owned(),
            user: format!(
                "Find stores in Mall of America matching: {query}\n\
                 \n\
                 Provide:\n\
                 1. Store names and locations\n\
                 2. Current operating hours\n\
                 3. Best parking suggestions\n\
                 4. Any helpful tips or recommendations"
            ),
        }
    }
}
