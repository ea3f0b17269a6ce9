// Konfigurasi Chat Service - satu binary, beberapa instance lewat environment
use axum::http::HeaderValue;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::env;

use crate::repositories::{ChatRepository, ChatStore, MessageRepository};

pub const DEFAULT_PORT: u16 = 3001;

// Health check response structure
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthCheckResponse {
    pub service: String,
    pub instance: String,
    pub status: String,
    pub version: String,
    pub chats: usize,
    pub started_at: String,
}

// Application configuration yang di-load dari environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub base_path: String,
    pub instance_name: String,
    pub frontend_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: DEFAULT_PORT,
            environment: "development".to_string(),
            base_path: String::new(),
            instance_name: "chat-service".to_string(),
            frontend_url: None,
        }
    }
}

impl AppConfig {
    // Load konfigurasi dari environment variables dengan validasi
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let server_host = env::var("CHAT_SERVICE_HOST").unwrap_or(defaults.server_host);

        let server_port = match env::var("CHAT_SERVICE_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| format!("CHAT_SERVICE_PORT tidak valid: {}", raw))?,
            Err(_) => defaults.server_port,
        };

        let environment = env::var("RUST_ENV").unwrap_or(defaults.environment);

        let base_path = env::var("CHAT_BASE_PATH")
            .map(|raw| normalize_base_path(&raw))
            .unwrap_or(defaults.base_path);

        let instance_name = env::var("CHAT_INSTANCE_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(defaults.instance_name);

        let frontend_url = env::var("FRONTEND_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let config = AppConfig {
            server_host,
            server_port,
            environment,
            base_path,
            instance_name,
            frontend_url,
        };
        config.allowed_origin()?;

        Ok(config)
    }

    // Helper cek production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn host(&self) -> &str {
        &self.server_host
    }

    pub fn port(&self) -> u16 {
        self.server_port
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    // Origin CORS dari FRONTEND_URL, None berarti permissive
    pub fn allowed_origin(&self) -> Result<Option<HeaderValue>, String> {
        self.frontend_url
            .as_deref()
            .map(|url| {
                url.parse::<HeaderValue>()
                    .map_err(|_| format!("FRONTEND_URL harus valid URL format: {}", url))
            })
            .transpose()
    }
}

/// Normalises a route prefix to `""` or `/segment[/segment..]`.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

// Application state yang di-share ke semua handlers
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub chat_repo: ChatRepository,
    pub message_repo: MessageRepository,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    // Inisialisasi application state dengan store kosong
    pub fn new(config: AppConfig) -> Self {
        let store = ChatStore::new();

        Self {
            config,
            chat_repo: ChatRepository::new(store.clone()),
            message_repo: MessageRepository::new(store),
            started_at: Utc::now(),
        }
    }

    // Inisialisasi application state dari environment
    pub fn from_env() -> Result<Self, String> {
        let config = AppConfig::from_env()?;
        Ok(Self::new(config))
    }

    pub async fn health_check(&self) -> HealthCheckResponse {
        HealthCheckResponse {
            service: "chat-service".to_string(),
            instance: self.config.instance_name.clone(),
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            chats: self.chat_repo.chat_count().await,
            started_at: self.started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
