//! HTTP server settings and the builder-style configuration object.

use std::net::{AddrParseError, SocketAddr, TcpListener};
use std::sync::Arc;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ports::{CoffeeRepository, ImageStore, UnconfiguredImageStore};
use crate::outbound::persistence::InMemoryCoffeeRepository;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Listener settings loaded from `SERVER_*` variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: Option<usize>,
}

impl ServerSettings {
    /// Parse the bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Body size limit, defaulting to 10 MiB.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

/// Where the server accepts connections.
#[derive(Debug)]
pub enum Listen {
    /// Bind a fresh socket.
    Addr(SocketAddr),
    /// Serve on an already bound listener.
    Listener(TcpListener),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) listen: Listen,
    pub(crate) max_upload_bytes: usize,
    pub(crate) repository: Arc<dyn CoffeeRepository>,
    pub(crate) images: Arc<dyn ImageStore>,
}

impl ServerConfig {
    /// Configuration serving an empty in-memory catalogue without uploads.
    #[must_use]
    pub fn new(listen: Listen) -> Self {
        Self {
            listen,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            repository: Arc::new(InMemoryCoffeeRepository::new()),
            images: Arc::new(UnconfiguredImageStore),
        }
    }

    /// Use `repository` for coffee rows.
    #[must_use]
    pub fn with_repository(mut self, repository: Arc<dyn CoffeeRepository>) -> Self {
        self.repository = repository;
        self
    }

    /// Use `images` for uploads.
    #[must_use]
    pub fn with_image_store(mut self, images: Arc<dyn ImageStore>) -> Self {
        self.images = images;
        self
    }

    /// Limit request bodies to `bytes`.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}
