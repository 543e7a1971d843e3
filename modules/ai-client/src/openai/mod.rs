mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::AssistantApi;

use client::OpenAiClient;
use types::{FileObject, NewMessage, Run, Thread, ThreadMessage};

// =============================================================================
// OpenAi Assistants
// =============================================================================

/// Assistants API v2 client. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct OpenAiAssistants {
    api_key: String,
    base_url: Option<String>,
    http: reqwest::Client,
}

impl OpenAiAssistants {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    fn client(&self) -> OpenAiClient {
        let client = OpenAiClient::new(&self.api_key, self.http.clone());
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }
}

// =============================================================================
// AssistantApi Implementation
// =============================================================================

#[async_trait]
impl AssistantApi for OpenAiAssistants {
    async fn create_thread(&self) -> Result<Thread> {
        self.client().create_thread().await
    }

    async fn create_message(&self, thread_id: &str, message: NewMessage) -> Result<ThreadMessage> {
        self.client().create_message(thread_id, &message).await
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        self.client().create_run(thread_id, assistant_id).await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.client().retrieve_run(thread_id, run_id).await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        self.client().list_messages(thread_id).await
    }

    async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<FileObject> {
        self.client().upload_file(file_name, bytes, mime).await
    }
}
