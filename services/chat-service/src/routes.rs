// API Routes untuk Chat Service

use crate::config::AppState;
use crate::handlers::{chats, messages};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

// OpenAPI Documentation untuk Chat Service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chat Service API",
        version = "1.0.0",
        description = "Anonymous chat backend\n\n## Features\n\n- 💬 Chat per pasangan user (urutan nama tidak penting)\n- 📝 Append-only message log\n- 🔄 Polling history",
    ),
    paths(
        chats::start_chat,
        chats::health_check,
        messages::post_message,
        messages::get_messages,
    ),
    components(
        schemas(
            shared::StartChatRequest,
            shared::StartChatResponse,
            shared::PostMessageRequest,
            shared::PostMessageResponse,
            shared::MessagesResponse,
            shared::ChatMessage,
            shared::ErrorResponse,
            crate::config::HealthCheckResponse,
        )
    ),
    tags(
        (name = "chats", description = "Session registry"),
        (name = "messages", description = "Message log per chat"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

// Tambahkan base path sebagai server OpenAPI supaya "Try it out" kena prefix yang benar
struct BasePathAddon<'a>(&'a str);

impl Modify for BasePathAddon<'_> {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if !self.0.is_empty() {
            openapi.servers = Some(vec![Server::new(self.0)]);
        }
    }
}

// Security headers middleware
async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("Referrer-Policy", HeaderValue::from_static("strict-origin-when-cross-origin"));

    response
}

// CORS: permissive kalau FRONTEND_URL kosong, selain itu hanya origin tersebut
fn cors_layer(allowed_origin: Option<HeaderValue>) -> CorsLayer {
    match allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
            .max_age(Duration::from_secs(86400)),
        None => CorsLayer::permissive(),
    }
}

// Buat router lengkap dengan docs, CORS, tracing dan security headers
pub fn create_router(state: AppState) -> Router {
    if state.config.is_production() {
        tracing::warn!("Chat Service running in PRODUCTION mode");
    } else {
        tracing::info!("Chat Service running in DEVELOPMENT mode");
    }

    let allowed_origin = state.config.allowed_origin().unwrap_or_else(|e| {
        tracing::error!("{}. CORS fallback ke permissive", e);
        None
    });

    let base_path = state.config.base_path.clone();

    // Setup OpenAPI documentation
    let mut openapi = ApiDoc::openapi();
    BasePathAddon(&base_path).modify(&mut openapi);

    // Public routes - health dan docs selalu di root
    let public_routes = Router::new()
        .route("/health", get(chats::health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi))
        .with_state(state.clone());

    let chat_routes = build_chat_routes(state);

    let app = if base_path.is_empty() {
        public_routes.merge(chat_routes)
    } else {
        public_routes.nest(&base_path, chat_routes)
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(allowed_origin)),
    )
    .layer(axum::middleware::from_fn(security_headers_middleware))
}

// Chat API routes
fn build_chat_routes(state: AppState) -> Router {
    Router::new()
        // ===== Session Registry =====
        .route("/chat/start", post(chats::start_chat))

        // ===== Message Log =====
        .route("/chat/{chat_id}/message", post(messages::post_message))
        .route("/chat/{chat_id}/messages", get(messages::get_messages))

        .with_state(state)
}
