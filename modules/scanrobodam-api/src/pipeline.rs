use std::time::Duration;

use ai_client::util::truncate_to_char_boundary;
use ai_client::{AssistantApi, Attachment, NewMessage, Run, TextPart, Thread};
use scanrobodam_common::{parse_assistant_json, ExtractError};
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const TEXT_TIMEOUT: Duration = Duration::from_secs(90);
pub const PDF_TIMEOUT: Duration = Duration::from_secs(120);

/// Fixed instruction posted alongside an uploaded PDF.
pub const PDF_INSTRUCTION: &str = "Please extract the invoice data from the PDF file.";

const PDF_MIME: &str = "application/pdf";

/// One invoice to extract: pasted text or an uploaded PDF.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingRequest {
    Text { text: String },
    Pdf { bytes: Vec<u8>, file_name: String },
}

impl ProcessingRequest {
    fn poll_settings(&self) -> PollSettings {
        let timeout = match self {
            ProcessingRequest::Text { .. } => TEXT_TIMEOUT,
            ProcessingRequest::Pdf { .. } => PDF_TIMEOUT,
        };
        PollSettings {
            interval: POLL_INTERVAL,
            timeout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

pub fn validate_pdf_name(file_name: &str) -> Result<(), ExtractError> {
    if file_name.to_lowercase().ends_with(".pdf") {
        Ok(())
    } else {
        Err(ExtractError::unsupported_file(file_name))
    }
}

/// Submit an invoice to the assistant, wait for the run and parse the reply.
pub async fn process(
    api: &dyn AssistantApi,
    assistant_id: &str,
    request: ProcessingRequest,
) -> Result<Value, ExtractError> {
    let settings = request.poll_settings();
    let thread = submit(api, request).await?;

    let run = api.create_run(&thread.id, assistant_id).await?;
    info!(thread_id = %thread.id, run_id = %run.id, "Assistant run started, polling for completion");

    wait_for_run(api, &thread.id, &run.id, settings).await?;

    let reply = latest_reply(api, &thread.id).await?;
    debug!(
        thread_id = %thread.id,
        reply = truncate_to_char_boundary(&reply, 200),
        "Assistant replied"
    );

    parse_assistant_json(&reply)
}

/// Create the thread and post the first message for either request kind.
async fn submit(api: &dyn AssistantApi, request: ProcessingRequest) -> Result<Thread, ExtractError> {
    match request {
        ProcessingRequest::Text { text } => {
            let thread = api.create_thread().await?;
            api.create_message(&thread.id, NewMessage::user(text))
                .await?;
            Ok(thread)
        }
        ProcessingRequest::Pdf { bytes, file_name } => {
            validate_pdf_name(&file_name)?;

            let file = api.upload_file(&file_name, bytes, PDF_MIME).await?;
            info!(file_id = %file.id, file_name = %file_name, "Uploaded invoice PDF");

            let thread = api.create_thread().await?;
            let message = NewMessage::user_parts(vec![TextPart::new(PDF_INSTRUCTION)])
                .with_attachment(Attachment::file_search(file.id));
            api.create_message(&thread.id, message).await?;
            Ok(thread)
        }
    }
}

/// Poll a run at a fixed interval until it completes, fails, or the timeout
/// elapses. Dropping the returned future stops polling.
pub async fn wait_for_run(
    api: &dyn AssistantApi,
    thread_id: &str,
    run_id: &str,
    settings: PollSettings,
) -> Result<Run, ExtractError> {
    let started = Instant::now();

    loop {
        let run = api.retrieve_run(thread_id, run_id).await?;

        if run.status.is_completed() {
            info!(run_id, elapsed_ms = started.elapsed().as_millis() as u64, "Assistant run completed");
            return Ok(run);
        }
        if run.status.is_failure() {
            warn!(
                run_id,
                status = %run.status,
                last_error = run.last_error.as_ref().map(|e| e.message.as_str()),
                "Assistant run ended without an answer"
            );
            return Err(ExtractError::RunFailed(run.status));
        }
        if started.elapsed() > settings.timeout {
            warn!(run_id, status = %run.status, "Gave up waiting for assistant run");
            return Err(ExtractError::Timeout(settings.timeout));
        }

        debug!(run_id, status = %run.status, "Run still in progress");
        tokio::time::sleep(settings.interval).await;
    }
}

/// Text of the newest message's first content block.
async fn latest_reply(api: &dyn AssistantApi, thread_id: &str) -> Result<String, ExtractError> {
    let messages = api.list_messages(thread_id).await?;
    messages
        .first()
        .and_then(|m| m.first_text())
        .map(str::to_string)
        .ok_or(ExtractError::EmptyReply)
}
