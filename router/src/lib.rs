pub mod config;
pub mod error;
pub mod processor;
mod routes;

pub use routes::app;

pub const WELCOME_MESSAGE: &str = "Welcome to the LLM Chat API";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub content: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct WelcomeResponse {
    pub message: &'static str,
}
