use anyhow::{bail, Result};
use clap::Parser;
use std::fmt::Debug;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::instrument;

#[derive(Parser, Debug)]
#[clap(author = "Alex Markov", version = "0.1.0", about = "Terminal client for the LLM chat relay")]
struct Args {
    #[clap(short, long, default_value = "127.0.0.1:8000")]
    server_address: String,
    /// Send a single message and exit instead of reading stdin
    #[clap(short, long)]
    message: Option<String>,
}

#[derive(serde::Deserialize, Debug, PartialEq, Eq)]
#[serde(untagged)]
enum HttpResponse {
    Content { content: String },
    Error { error: String },
}

impl HttpResponse {
    pub fn to_message(&self) -> String {
        match self {
            HttpResponse::Content { content } => content.clone(),
            HttpResponse::Error { error } => format!("Error: {}", error),
        }
    }
}

struct HttpClient {
    client: reqwest::Client,
    url: String,
}
impl Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("url", &self.url)
            .finish()
    }
}

impl HttpClient {
    fn new(address: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("http://{}/chat", address),
        }
    }

    #[instrument(skip_all, fields(status))]
    async fn send_message(&self, message: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;

        let status = response.status();
        tracing::Span::current().record("status", status.as_u16());

        let body = response.bytes().await?;
        match serde_json::from_slice(&body) {
            Ok(reply) => Ok(reply),
            Err(e) => bail!(
                "unexpected response from {} (status {}): {}",
                self.url,
                status,
                e
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!(
        "Starting chat client connected to HTTP server on [{:?}]",
        args.server_address
    );

    let client = HttpClient::new(&args.server_address);

    if let Some(message) = args.message {
        let response = client.send_message(&message).await?;
        println!("{}", response.to_message());
        return Ok(());
    }

    let stdin = BufReader::new(tokio::io::stdin());
    chat_loop(&client, stdin, &mut std::io::stdout()).await
}

/// Sends each non-blank input line as a message and writes one reply line per message.
async fn chat_loop<R, W>(client: &HttpClient, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match client.send_message(&line).await {
            Ok(response) => writeln!(output, "{}", response.to_message())?,
            Err(e) => tracing::error!("Error sending message: {:?}", e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::new(&server.address().to_string())
    }

    #[tokio::test]
    async fn prints_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({"message": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "hi there"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).send_message("hello").await.unwrap();
        assert_eq!(response.to_message(), "hi there");
    }

    #[tokio::test]
    async fn prints_error_body_for_failed_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({"error": "Error from LLM endpoint"})),
            )
            .mount(&server)
            .await;

        let response = client_for(&server).send_message("hello").await.unwrap();
        assert_eq!(response.to_message(), "Error: Error from LLM endpoint");
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"message": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "hi"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_json(json!({"message": "  how are you?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "fine"})))
            .expect(1)
            .mount(&server)
            .await;

        let input: &[u8] = b"hello\n\n   \n\t\n  how are you?\n";
        let mut output = Vec::new();
        chat_loop(&client_for(&server), input, &mut output)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "hi\nfine\n");
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unexpected_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        assert!(client_for(&server).send_message("hello").await.is_err());
    }
}
