//! Framework-wide error types
//!
//! Startup failures (`DiscoveryError`, `InstantiationError`, `RouteError`,
//! `ConfigError`, `RenderError`) are fatal: they surface through
//! `StartupError` and prevent the server from accepting any request.
//! `DispatchError` is recoverable per request and always ends in a written
//! response.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Namespace scan failure. Fatal at startup.
#[derive(Debug, Error)]
#[error("component namespace `{namespace}` matched no registered components")]
pub struct DiscoveryError {
    pub namespace: String,
}

/// Component construction failure. Fatal at startup; the container finishes
/// the batch before reporting so every failing component is named once.
#[derive(Debug, Error)]
pub enum InstantiationError {
    #[error("component type `{0}` is not registered")]
    UnknownType(&'static str),

    #[error("failed to construct `{type_name}`: {reason}")]
    Construct {
        type_name: &'static str,
        reason: String,
    },

    #[error("component construction failed: {}", summarize(.0))]
    Batch(Vec<InstantiationError>),
}

fn summarize(failures: &[InstantiationError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration load or lookup failure. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("missing required config key `{0}`")]
    Missing(&'static str),
}

/// Route pattern compilation failure. Fatal at startup.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid route pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Template I/O failure. Fatal when the template registry is built at
/// startup; recoverable per render call (the render produces no output).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template I/O failure at `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure raised by a handler invocation.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The route's owning instance is not of the type the handler expects.
    #[error("handler target is not a `{expected}` instance")]
    WrongInstance { expected: &'static str },

    /// The invoked handler itself failed.
    #[error("handler failed: {0}")]
    Handler(Box<dyn std::error::Error + Send + Sync>),
}

impl InvokeError {
    pub fn handler(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Handler(err.into())
    }
}

/// Request-level dispatch failure. Never fatal to the process.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no route matches `{0}`")]
    NotFound(String),

    #[error("parameter `{name}` rejected: `{value}` is not a valid integer")]
    BadParam { name: String, value: String },

    #[error("handler invocation failed")]
    Invoke(#[from] InvokeError),
}

/// Umbrella for everything that can go wrong before the first request.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("component scan failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("component construction failed: {0}")]
    Instantiation(#[from] InstantiationError),

    #[error("route table build failed: {0}")]
    Route(#[from] RouteError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("template registry build failed: {0}")]
    Render(#[from] RenderError),
}
