use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{AssistantError, Result};

use super::types::*;

pub(crate) const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Assistants endpoints are gated behind a beta header.
const ASSISTANTS_BETA: &str = "assistants=v2";

pub(crate) struct OpenAiClient {
    api_key: String,
    http: reqwest::Client,
    pub(super) base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, http: reqwest::Client) -> Self {
        Self {
            api_key: api_key.to_string(),
            http,
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        headers.insert("OpenAI-Beta", HeaderValue::from_static(ASSISTANTS_BETA));
        Ok(headers)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "OpenAI assistants POST");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(body)
            .send()
            .await?;

        Self::read(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "OpenAI assistants GET");

        let response = self
            .http
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;

        Self::read(response).await
    }

    pub async fn create_thread(&self) -> Result<Thread> {
        self.post_json("/threads", &serde_json::json!({})).await
    }

    pub async fn create_message(
        &self,
        thread_id: &str,
        message: &NewMessage,
    ) -> Result<ThreadMessage> {
        self.post_json(&format!("/threads/{thread_id}/messages"), message)
            .await
    }

    pub async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        self.post_json(
            &format!("/threads/{thread_id}/runs"),
            &CreateRunRequest { assistant_id },
        )
        .await
    }

    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get_json(&format!("/threads/{thread_id}/runs/{run_id}"))
            .await
    }

    pub async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let list: ListResponse<ThreadMessage> = self
            .get_json(&format!("/threads/{thread_id}/messages?order=desc"))
            .await?;
        Ok(list.data)
    }

    pub async fn upload_file(&self, file_name: &str, bytes: Vec<u8>, mime: &str) -> Result<FileObject> {
        let url = format!("{}/files", self.base_url);
        debug!(file_name, size = bytes.len(), "OpenAI file upload");

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = Form::new().text("purpose", "assistants").part("file", part);

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .multipart(form)
            .send()
            .await?;

        Self::read(response).await
    }
}
