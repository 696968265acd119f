pub mod chat;
pub mod error;
pub mod guide;
pub mod prompts;
pub mod responder;
pub mod tools;

pub use error::{AgentError, ToolError};
pub use guide::MallGuide;
pub use prompts::GuidePrompt;
pub use responder::{OpenAiResponder, Responder};
pub use tools::{DirectoryToolbox, Toolbox, GET_HOURS, GET_STORES, STORE_NOT_FOUND};
