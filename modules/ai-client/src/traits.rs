use async_trait::async_trait;

use crate::error::Result;
use crate::openai::types::{FileObject, NewMessage, Run, Thread, ThreadMessage};

// =============================================================================
// AssistantApi Trait
// =============================================================================

/// The slice of a hosted assistant service needed to submit work and read the
/// answer back: one thread per conversation, one run per invocation.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    async fn create_thread(&self) -> Result<Thread>;

    async fn create_message(&self, thread_id: &str, message: NewMessage) -> Result<ThreadMessage>;

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// Messages of a thread, newest first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>>;

    /// Upload a file for use by assistants (retrieval / file search).
    async fn upload_file(&self, file_name: &str, bytes: Vec<u8>, mime: &str)
        -> Result<FileObject>;
}
