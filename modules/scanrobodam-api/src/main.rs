use std::sync::Arc;

use ai_client::{AssistantApi, OpenAiAssistants};
use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scanrobodam_common::Config;

mod auth;
mod error;
mod pipeline;
mod rest;
#[cfg(test)]
mod testing;

pub struct AppState {
    pub config: Config,
    pub assistants: Arc<dyn AssistantApi>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("scanrobodam=info".parse()?)
                .add_directive("api=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let mut assistants = OpenAiAssistants::new(config.openai_api_key.clone());
    if let Some(ref url) = config.openai_base_url {
        assistants = assistants.with_base_url(url.clone());
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState {
        config,
        assistants: Arc::new(assistants),
    });

    let app = rest::router(state);

    info!("ScanRobodam API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
