pub mod error;
pub mod openai;
pub mod traits;
pub mod util;

pub use error::{AssistantError, Result};
pub use openai::types::{
    Attachment, AttachmentTool, ContentBlock, FileObject, MessageContent, MessageRole, NewMessage,
    Run, RunError, RunStatus, TextContent, TextPart, Thread, ThreadMessage,
};
pub use openai::OpenAiAssistants;
pub use traits::AssistantApi;
