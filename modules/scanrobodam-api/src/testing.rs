//! In-memory assistant service for handler and pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use ai_client::{
    AssistantApi, AssistantError, ContentBlock, FileObject, MessageRole, NewMessage, Run,
    RunStatus, Thread, ThreadMessage,
};
use async_trait::async_trait;

/// Replays a scripted sequence of run statuses (the last one repeats forever)
/// and answers with a fixed reply. Records every call it receives.
pub struct ScriptedAssistant {
    statuses: Mutex<VecDeque<RunStatus>>,
    reply: Option<String>,
    fail_polls: bool,
    calls: Mutex<Vec<&'static str>>,
    messages: Mutex<Vec<NewMessage>>,
    uploads: Mutex<Vec<(String, usize, String)>>,
    assistant_ids: Mutex<Vec<String>>,
}

impl ScriptedAssistant {
    pub const THREAD_ID: &'static str = "thread_test";
    pub const RUN_ID: &'static str = "run_test";
    pub const FILE_ID: &'static str = "file-test";

    pub fn new(statuses: &[RunStatus], reply: &str) -> Self {
        Self {
            statuses: Mutex::new(statuses.iter().copied().collect()),
            reply: Some(reply.to_string()),
            fail_polls: false,
            calls: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            assistant_ids: Mutex::new(Vec::new()),
        }
    }

    /// The thread ends up with no assistant message.
    pub fn without_reply(mut self) -> Self {
        self.reply = None;
        self
    }

    /// Every status query fails with a server error.
    pub fn failing_polls(mut self) -> Self {
        self.fail_polls = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_polls(&self) -> usize {
        self.calls().iter().filter(|c| **c == "retrieve_run").count()
    }

    pub fn posted_messages(&self) -> Vec<NewMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<(String, usize, String)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn assistant_ids(&self) -> Vec<String> {
        self.assistant_ids.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_status(&self) -> RunStatus {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front().unwrap_or(RunStatus::Queued)
        } else {
            statuses.front().copied().unwrap_or(RunStatus::Queued)
        }
    }

    fn run(status: RunStatus) -> Run {
        Run {
            id: Self::RUN_ID.to_string(),
            thread_id: Self::THREAD_ID.to_string(),
            status,
            last_error: None,
        }
    }
}

#[async_trait]
impl AssistantApi for ScriptedAssistant {
    async fn create_thread(&self) -> ai_client::Result<Thread> {
        self.record("create_thread");
        Ok(Thread {
            id: Self::THREAD_ID.to_string(),
        })
    }

    async fn create_message(
        &self,
        _thread_id: &str,
        message: NewMessage,
    ) -> ai_client::Result<ThreadMessage> {
        self.record("create_message");
        self.messages.lock().unwrap().push(message);
        Ok(ThreadMessage {
            id: "msg_user".to_string(),
            role: MessageRole::User,
            content: Vec::new(),
        })
    }

    async fn create_run(&self, _thread_id: &str, assistant_id: &str) -> ai_client::Result<Run> {
        self.record("create_run");
        self.assistant_ids
            .lock()
            .unwrap()
            .push(assistant_id.to_string());
        Ok(Self::run(RunStatus::Queued))
    }

    async fn retrieve_run(&self, _thread_id: &str, _run_id: &str) -> ai_client::Result<Run> {
        self.record("retrieve_run");
        if self.fail_polls {
            return Err(AssistantError::Api {
                status: 500,
                message: "server error".to_string(),
            });
        }
        Ok(Self::run(self.next_status()))
    }

    async fn list_messages(&self, _thread_id: &str) -> ai_client::Result<Vec<ThreadMessage>> {
        self.record("list_messages");
        let Some(reply) = &self.reply else {
            return Ok(Vec::new());
        };
        Ok(vec![
            ThreadMessage {
                id: "msg_assistant".to_string(),
                role: MessageRole::Assistant,
                content: vec![ContentBlock::text(reply.clone())],
            },
            ThreadMessage {
                id: "msg_user".to_string(),
                role: MessageRole::User,
                content: vec![ContentBlock::text("ignored")],
            },
        ])
    }

    async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> ai_client::Result<FileObject> {
        self.record("upload_file");
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.len(), mime.to_string()));
        Ok(FileObject {
            id: Self::FILE_ID.to_string(),
            filename: Some(file_name.to_string()),
            bytes: Some(bytes.len() as u64),
            purpose: Some("assistants".to_string()),
        })
    }
}
