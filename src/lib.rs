//! # zbctl-rs
//!
//! Command-line client for a workflow engine gateway.
//!
//! Each subcommand validates its arguments, builds a gateway request,
//! dispatches it under a fixed deadline, and renders the response in the
//! selected output mode.
//!
//! ## Features
//!
//! - **Dual rendering**: every result has a `human` one-liner and a `json` document
//! - **Bounded dispatch**: gateway calls are cancelled after a fixed deadline
//! - **Early validation**: bad keys, payloads or output modes fail before any network call

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod cli;
pub mod error;
pub mod gateway;
pub mod logging;

// Re-export commonly used types at crate root
pub use error::{CommandError, Error, OutputError, RemoteError, Result};

// Re-export gateway types
pub use gateway::{DEFAULT_TIMEOUT, GatewayConfig, HttpGateway, JobGateway, dispatch};

// Re-export CLI types
pub use cli::{Cli, Commands, Renderable, Renderer, RendererRegistry, execute, renderers};
