use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{ACCEPT, CONTENT_TYPE, ORIGIN},
        Method,
    },
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::ApiError, processor::Processor, ChatRequest, ChatResponse, WelcomeResponse,
    WELCOME_MESSAGE,
};

pub fn app(processor: Processor) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/chat", post(message_handler))
        .route_layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(processor)
}

// Answers every OPTIONS on a known route with 200 and an empty body. Unknown
// paths fall through to the router's 404. Any origin is accepted; it is
// echoed back because a literal `*` cannot be combined with credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT])
}

async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}

async fn message_handler(
    State(processor): State<Processor>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = request?;
    let response = processor.process_request(request).await?;
    Ok(Json(response))
}
