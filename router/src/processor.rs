use crate::{error::ApiError, ChatRequest, ChatResponse};
use llm_client::Client;

use std::time::Instant;
use tracing::{instrument, Span};

/// Handle to the upstream relay. Read-only after startup, so clones share nothing mutable.
#[derive(Clone, Debug)]
pub struct Processor {
    client: Client,
}

impl Processor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(elapsed_time))]
    pub async fn process_request(&self, request: ChatRequest) -> Result<ChatResponse, ApiError> {
        let span = Span::current();
        let start_time = Instant::now();

        tracing::info!("Received message: {}", request.message);

        let result = self.client.generate_reply(&request.message).await;
        span.record("elapsed_time", start_time.elapsed().as_secs_f32());

        let content = result?;
        tracing::info!("SUCCESS");
        Ok(ChatResponse { content })
    }
}
