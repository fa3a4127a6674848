pub mod cli;
pub mod diagram;
pub mod provider;
pub mod proxy;
pub mod server;
pub mod session;
pub mod spec;

// Re-export frequently used items for easier access
pub use provider::{create_generator, ProviderError, TextGenerator};
pub use session::{Session, SpecOverview, SuggestedRequest};
pub use spec::{fetch_spec, OpenApiSpec, SpecError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Provider error: {0}")]
    ProviderError(#[from] provider::ProviderError),

    #[error("Spec error: {0}")]
    SpecError(#[from] spec::SpecError),

    #[error("Proxy error: {0}")]
    ProxyError(#[from] proxy::ProxyError),

    #[error("No specification could be fetched from {0}")]
    MissingSpec(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
